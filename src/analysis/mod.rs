pub mod content;
pub mod presentation;
pub mod reconcile;
pub mod structured;
