//! Widget surface: reactive bindings, debounced scheduling and the two
//! chart widgets built on top of `core` geometry and `render` frames.

mod bar_chart_widget;
mod bar_data_controller;
mod bar_frame_builder;
mod bar_pointer_controller;
mod bar_scene;
mod bar_transition_controller;
mod binding;
mod donut_chart_widget;
mod donut_frame_builder;
mod donut_pointer_controller;
mod donut_scene;
mod donut_transition_controller;
mod localization;
mod render_scheduler;
mod widget_config;

pub use bar_chart_widget::BarChartWidget;
pub use bar_frame_builder::BAR_CANVAS_ID;
pub use bar_pointer_controller::BAR_TOOLTIP_OFFSET;
pub use bar_scene::BarId;
pub use binding::{Binding, WatchId};
pub use donut_chart_widget::DonutChartWidget;
pub use donut_pointer_controller::DONUT_TOOLTIP_OFFSET;
pub use donut_scene::{LEGEND_CANVAS_ID, SliceId, donut_canvas_id};
pub use localization::{Catalog, IdentityTranslator, Translator};
pub use render_scheduler::{DebouncedTask, Scheduled, TimerHandle};
pub use widget_config::{BarChartConfig, DonutChartConfig};
