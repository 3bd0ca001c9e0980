//! Dispatch wiring on top of `kube::runtime::Controller`.
//!
//! The controller watches `Domain` objects and the namespaces the operator
//! created. It serializes reconciles per object, requeues failed ones after a
//! fixed delay and otherwise waits for the next change.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use k8s_openapi::api::core::v1::Namespace;
use kube::runtime::controller::{Action, Controller};
use kube::runtime::reflector::ObjectRef;
use kube::runtime::watcher;
use kube::{Api, Client, ResourceExt};
use platform_core::{DOMAIN_LABEL, Domain, MANAGED_BY_LABEL};
use tracing::{debug, info, warn};

use crate::error::ReconcileError;
use crate::reconcile::{ReconcileOutcome, Reconciler};

/// State shared by every reconcile invocation.
pub struct Context {
    pub reconciler: Reconciler,
    pub error_requeue: Duration,
}

impl Context {
    pub fn new(reconciler: Reconciler, error_requeue: Duration) -> Self {
        Self {
            reconciler,
            error_requeue,
        }
    }
}

async fn reconcile(domain: Arc<Domain>, ctx: Arc<Context>) -> Result<Action, ReconcileError> {
    let key = domain.object_key();
    let outcome = ctx.reconciler.reconcile(&key).await?;
    match &outcome {
        ReconcileOutcome::Invalid(reason) => {
            info!(domain = %key, ?reason, "Domain marked invalid");
        }
        other => debug!(domain = %key, outcome = ?other, "Reconcile finished"),
    }
    Ok(Action::await_change())
}

fn error_policy(domain: Arc<Domain>, err: &ReconcileError, ctx: Arc<Context>) -> Action {
    warn!(
        domain = %domain.object_key(),
        kind = err.kind(),
        storage = ?err.storage_category(),
        error = %err,
        retry_in = ?ctx.error_requeue,
        "Reconcile failed, requeueing"
    );
    Action::requeue(ctx.error_requeue)
}

/// Maps a managed namespace back to the domains claiming it.
pub fn domains_for_namespace(domains: &[Arc<Domain>], namespace: &Namespace) -> Vec<ObjectRef<Domain>> {
    let Some(id) = namespace.labels().get(DOMAIN_LABEL) else {
        return Vec::new();
    };
    domains
        .iter()
        .filter(|d| &d.spec.id == id)
        .map(|d| ObjectRef::from_obj(d.as_ref()))
        .collect()
}

/// Label selector matching namespaces created by `operator_name`.
pub fn managed_namespace_selector(operator_name: &str) -> String {
    format!("{MANAGED_BY_LABEL}={operator_name}")
}

/// Runs the controller until a shutdown signal arrives. Failed reconciles
/// are retried after `error_requeue`.
pub async fn run(client: Client, reconciler: Reconciler, error_requeue: Duration) {
    let domains = Api::<Domain>::all(client.clone());
    let namespaces = Api::<Namespace>::all(client);
    let selector = managed_namespace_selector(reconciler.operator_name());
    let ctx = Arc::new(Context::new(reconciler, error_requeue));

    let controller = Controller::new(domains, watcher::Config::default());
    let store = controller.store();

    info!(selector = %selector, "Starting domain controller");
    controller
        .watches(
            namespaces,
            watcher::Config::default().labels(&selector),
            move |ns| domains_for_namespace(&store.state(), &ns),
        )
        .shutdown_on_signal()
        .run(reconcile, error_policy, ctx)
        .for_each(|res| async move {
            match res {
                Ok((obj, action)) => debug!(domain = %obj, ?action, "Reconciled"),
                Err(err) => warn!(error = %err, "Controller error"),
            }
        })
        .await;
    info!("Domain controller stopped");
}
