use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use kube::CustomResourceExt;
use platform_core::Domain;
use platform_db_postgres::{create_record_store, mask_password};
use platform_operator::config::loader::{DEFAULT_CONFIG_PATH, load_config};
use platform_operator::{KubeEntityApi, KubeNamespaceApi, Reconciler, controller, observability};
use platform_storage::DynRecordStore;

#[derive(Parser)]
#[command(name = "domain-operator")]
#[command(about = "Reconciles Domain resources into database records and namespaces")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML). Missing files are skipped.
    #[arg(short, long, env = "DOMAIN_OPERATOR_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Print the Domain CustomResourceDefinition as JSON and exit
    #[arg(long)]
    print_crd: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    let cli = Cli::parse();
    if cli.print_crd {
        println!("{}", serde_json::to_string_pretty(&Domain::crd())?);
        return Ok(());
    }

    observability::init_tracing();

    let cfg = load_config(Some(&cli.config))
        .map_err(|e| anyhow::anyhow!("Configuration error: {e}"))?;
    observability::apply_logging_level(&cfg.logging.level);
    tracing::info!(path = %cli.config, "Configuration loaded");

    tracing::info!(
        url = %mask_password(&cfg.database.url),
        pool_size = cfg.database.pool_size,
        "Connecting to database"
    );
    let records: DynRecordStore = create_record_store(cfg.database.to_postgres_config())
        .await
        .context("failed to initialize record store")?;

    let client = kube::Client::try_default()
        .await
        .context("failed to create Kubernetes client")?;

    let reconciler = Reconciler::new(
        Arc::new(KubeEntityApi::new(client.clone())),
        records,
        Arc::new(KubeNamespaceApi::new(client.clone())),
    )
    .with_operator_name(cfg.operator.name.clone());

    controller::run(client, reconciler, cfg.error_requeue()).await;
    Ok(())
}
