//! Host-facing extension hooks.
//!
//! Keep extensions observational and avoid coupling them into render paths.

pub mod observers;

pub use observers::{ObserverRegistry, WidgetContext, WidgetEvent, WidgetKind, WidgetObserver};
