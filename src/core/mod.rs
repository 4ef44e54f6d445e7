pub mod bar_layout;
pub mod donut;
pub mod join;
pub mod legend;
pub mod path;
pub mod pie;
pub mod sample;
pub mod scale;
pub mod stack;
pub mod transition;
pub mod types;
pub mod view_model;

pub use bar_layout::{BarChartGeometry, BarRect};
pub use donut::{DonutShape, SliceFace};
pub use join::{KeyedJoin, join_by_key};
pub use legend::{LegendEntryLayout, LegendGrid};
pub use path::{PathData, PathSegment};
pub use pie::{
    PERCENT_LABEL_MIN_SPAN, PieDatum, PieSlice, SliceAngles, percent_label, pie_layout,
};
pub use sample::{Sample, StackedSeries, format_date_label, leading_calendar_date};
pub use scale::{LinearScale, format_integer_tick};
pub use stack::{StackLayout, StackedValue, stack_layers};
pub use transition::{Ease, Interpolate, Timeline, Tween, TweenTiming};
pub use types::{Margins, Viewport};
pub use view_model::{DonutViewModel, Indicator, reconcile_detail};
