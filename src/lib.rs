//! stat-charts: headless statistics chart widgets.
//!
//! Two widgets, a stacked/grouped bar chart and a pseudo-3D donut chart,
//! turn statistics series into deterministic render frames. Time is driven
//! by the host through explicit `now_ms` arguments, so debounced renders and
//! transitions replay identically in tests.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{BarChartConfig, BarChartWidget, DonutChartConfig, DonutChartWidget};
pub use error::{ChartError, ChartResult};
