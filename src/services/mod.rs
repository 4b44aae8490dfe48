pub mod reconciler;

pub use reconciler::{Reconciler, ReconcilerOptions, SyncReport, SyncSource};
