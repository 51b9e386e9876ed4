//! CLI command implementations

pub mod defaults;
pub mod reconcile;
pub mod shapes;
