//! Sidecar records (`*.dvc`) and how paths relate to them.

pub mod record;
pub mod resolver;

pub use record::SidecarRecord;
pub use resolver::{TrackingRelation, TrackingResolver};
