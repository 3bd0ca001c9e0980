//! SQL query implementations.
//!
//! - [`records`]: get/create/update/delete of rows in the `domains` table

pub mod records;
