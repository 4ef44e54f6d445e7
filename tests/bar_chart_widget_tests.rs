use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use stat_charts::api::{BAR_CANVAS_ID, BarChartConfig, BarChartWidget, BarId};
use stat_charts::core::{Indicator, Sample, StackedSeries};
use stat_charts::render::NullRenderer;

const PLOT_HEIGHT: f64 = 209.5;

fn date(month: u32) -> String {
    format!("2015-{month:02}-01 00:00.00.000")
}

fn series() -> StackedSeries {
    StackedSeries::new(vec![
        vec![
            Sample::new(date(1), 2.0, "Teacher", "#ff0000"),
            Sample::new(date(2), 6.0, "Teacher", "#ff0000"),
            Sample::new(date(3), 1.0, "Teacher", "#ff0000"),
        ],
        vec![
            Sample::new(date(1), 4.0, "Student", "#00ff00"),
            Sample::new(date(2), 2.0, "Student", "#00ff00"),
            Sample::new(date(3), 3.0, "Student", "#00ff00"),
        ],
    ])
}

/// Widget with a rendered, fully settled scene at t=1000.
fn rendered_widget() -> BarChartWidget<NullRenderer> {
    let mut widget =
        BarChartWidget::new(NullRenderer::default(), BarChartConfig::default()).expect("widget");
    widget.set_indicator(Indicator::new("connection", "connections"));
    widget.set_container_width(400.0, 0.0);
    widget.set_val(Some(series()), 0.0);
    assert!(widget.tick(200.0).expect("tick"));
    widget.tick(1_000.0).expect("tick");
    widget
}

#[test]
fn render_waits_for_debounce_window() {
    let mut widget =
        BarChartWidget::new(NullRenderer::default(), BarChartConfig::default()).expect("widget");
    widget.set_container_width(400.0, 0.0);
    widget.set_val(Some(series()), 0.0);

    assert!(widget.is_render_pending());
    assert!(!widget.tick(199.0).expect("tick"));
    assert_eq!(widget.bar_count(), 0);
    assert!(widget.tick(200.0).expect("tick"));
    assert!(!widget.is_render_pending());
    assert_eq!(widget.layer_count(), 2);
    assert_eq!(widget.bar_count(), 6);
    assert_eq!(widget.bars_in_layer(1), 3);
}

#[test]
fn entrance_grows_bars_from_the_axis() {
    let mut widget =
        BarChartWidget::new(NullRenderer::default(), BarChartConfig::default()).expect("widget");
    widget.set_container_width(400.0, 0.0);
    widget.set_val(Some(series()), 0.0);
    widget.tick(200.0).expect("tick");

    let start = widget.bar_rect(0, 0).expect("bar");
    assert_abs_diff_eq!(start.y, PLOT_HEIGHT, epsilon = 1e-9);
    assert_abs_diff_eq!(start.height, 0.0, epsilon = 1e-9);
    assert!(widget.is_animating());

    widget.tick(470.0).expect("tick");
    assert!(!widget.is_animating());
    let settled = widget.bar_rect(0, 0).expect("bar");
    assert_abs_diff_eq!(settled.y, 157.125, epsilon = 1e-9);
    assert_abs_diff_eq!(settled.height, 52.375, epsilon = 1e-9);
}

#[test]
fn stacked_geometry_matches_cumulative_totals() {
    let widget = rendered_widget();

    let top = widget.bar_rect(1, 1).expect("bar");
    assert_abs_diff_eq!(top.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(top.y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(top.width, 99.0, epsilon = 1e-9);
    // Student spans 6..8 of a max total of 8.
    assert_abs_diff_eq!(top.height, 52.375, epsilon = 1e-9);

    let base = widget.bar_rect(0, 1).expect("bar");
    assert_abs_diff_eq!(base.y, 52.375, epsilon = 1e-9);
    assert_abs_diff_eq!(base.height, 157.125, epsilon = 1e-9);

    let bounds = widget.bar_bounds(1, 1).expect("bounds");
    assert_abs_diff_eq!(bounds.x, 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.y, 20.0, epsilon = 1e-9);
    assert_eq!(widget.axis_max(), Some(8.0));
}

#[test]
fn grouping_runs_horizontal_phase_before_vertical_phase() {
    let mut widget = rendered_widget();
    widget.set_grouped(true, 1_000.0);
    assert!(widget.grouped());

    widget.tick(1_500.0).expect("tick");
    let midway = widget.bar_rect(1, 0).expect("bar");
    assert_abs_diff_eq!(midway.x, 49.5, epsilon = 1e-9);
    assert_abs_diff_eq!(midway.width, 49.5, epsilon = 1e-9);
    assert_abs_diff_eq!(midway.y, 52.375, epsilon = 1e-9);
    assert_abs_diff_eq!(midway.height, 104.75, epsilon = 1e-9);

    widget.tick(3_000.0).expect("tick");
    let grouped = widget.bar_rect(1, 1).expect("bar");
    let expected_height = 2.0 / 6.0 * PLOT_HEIGHT;
    assert_abs_diff_eq!(grouped.x, 49.5, epsilon = 1e-9);
    assert_abs_diff_eq!(grouped.height, expected_height, epsilon = 1e-9);
    assert_abs_diff_eq!(grouped.y, PLOT_HEIGHT - expected_height, epsilon = 1e-9);
    assert_abs_diff_eq!(widget.axis_max().expect("axis"), 6.0, epsilon = 1e-9);
}

#[test]
fn stacking_restores_full_width_bars() {
    let mut widget = rendered_widget();
    widget.set_grouped(true, 1_000.0);
    widget.tick(3_000.0).expect("tick");
    widget.set_grouped(false, 3_000.0);
    widget.tick(5_000.0).expect("tick");

    let restored = widget.bar_rect(1, 1).expect("bar");
    assert_abs_diff_eq!(restored.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(restored.width, 99.0, epsilon = 1e-9);
    assert_abs_diff_eq!(restored.y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(restored.height, 52.375, epsilon = 1e-9);
    assert_abs_diff_eq!(widget.axis_max().expect("axis"), 8.0, epsilon = 1e-9);
}

#[test]
fn interrupted_transition_continues_from_live_geometry() {
    let mut widget = rendered_widget();
    widget.set_grouped(true, 1_000.0);
    widget.tick(1_250.0).expect("tick");
    let before = widget.bar_rect(1, 2).expect("bar");

    widget.set_grouped(false, 1_250.0);
    let after = widget.bar_rect(1, 2).expect("bar");
    assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-9);
    assert_abs_diff_eq!(before.width, after.width, epsilon = 1e-9);
}

#[test]
fn new_data_resets_grouped_and_notifies_watchers() {
    let mut widget = rendered_widget();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    widget.watch_grouped(move |new, old| sink.borrow_mut().push((*new, *old)));

    widget.set_grouped(true, 1_000.0);
    widget.set_val(Some(series()), 1_100.0);

    assert!(!widget.grouped());
    assert!(!widget.has_scene());
    assert_eq!(*seen.borrow(), vec![(true, false), (false, true)]);
}

#[test]
fn grouped_before_render_applies_after_render() {
    let mut widget =
        BarChartWidget::new(NullRenderer::default(), BarChartConfig::default()).expect("widget");
    widget.set_container_width(400.0, 0.0);
    widget.set_val(Some(series()), 0.0);
    widget.set_grouped(true, 50.0);
    widget.tick(200.0).expect("tick");
    widget.tick(5_000.0).expect("tick");

    let bar = widget.bar_rect(1, 0).expect("bar");
    assert_abs_diff_eq!(bar.width, 49.5, epsilon = 1e-9);
    assert_abs_diff_eq!(widget.axis_max().expect("axis"), 6.0, epsilon = 1e-9);
}

#[test]
fn clearing_data_cancels_pending_render() {
    let mut widget =
        BarChartWidget::new(NullRenderer::default(), BarChartConfig::default()).expect("widget");
    widget.set_container_width(400.0, 0.0);
    widget.set_val(Some(series()), 0.0);
    widget.set_val(None, 100.0);

    assert!(!widget.is_render_pending());
    assert!(!widget.tick(500.0).expect("tick"));
    widget.render().expect("render");
    assert_eq!(widget.renderer().passes, 1);
    assert!(widget.renderer().last_canvas_ids.is_empty());
}

#[test]
fn empty_series_counts_as_missing() {
    let mut widget =
        BarChartWidget::new(NullRenderer::default(), BarChartConfig::default()).expect("widget");
    widget.set_container_width(400.0, 0.0);
    widget.set_val(Some(StackedSeries::default()), 0.0);
    assert!(widget.val().is_none());
    assert!(!widget.is_render_pending());
}

#[test]
fn narrow_container_skips_render() {
    let mut widget =
        BarChartWidget::new(NullRenderer::default(), BarChartConfig::default()).expect("widget");
    widget.set_container_width(50.0, 0.0);
    widget.set_val(Some(series()), 0.0);
    assert!(!widget.tick(200.0).expect("tick"));
    assert!(!widget.has_scene());
}

#[test]
fn frame_contains_bars_axis_labels_and_legend() {
    let mut widget = rendered_widget();
    let frame = widget.frame().expect("frame");
    assert_eq!(frame.canvas_id, BAR_CANVAS_ID);
    assert_eq!(frame.viewport.width, 400);
    assert_eq!(frame.viewport.height, 350);

    // 6 bars + 2 legend swatches.
    assert_eq!(frame.rects.len(), 8);
    // Domain line + ticks 0..=8.
    assert_eq!(frame.lines.len(), 10);
    // 3 dates + 9 tick labels + 2 legend names.
    assert_eq!(frame.texts.len(), 14);
    assert!(
        frame
            .texts
            .iter()
            .any(|text| text.text == "2015-01-01 00:00.00.000")
    );
    assert!(frame.texts.iter().any(|text| text.text == "Student"));
    assert!(frame.texts.iter().any(|text| text.text == "8"));

    widget.render().expect("render");
    assert_eq!(widget.renderer().last_canvas_ids, vec![BAR_CANVAS_ID]);
    assert_eq!(widget.renderer().last_rect_count, 8);
}

#[test]
fn configured_label_format_rewrites_dates() {
    let config = BarChartConfig::default().with_date_label_format("%m/%Y");
    let mut widget = BarChartWidget::new(NullRenderer::default(), config).expect("widget");
    widget.set_container_width(400.0, 0.0);
    widget.set_val(
        Some(StackedSeries::new(vec![vec![
            Sample::new(date(1), 1.0, "Guest", "#336699"),
            Sample::new("week 6", 2.0, "Guest", "#336699"),
        ]])),
        0.0,
    );
    widget.tick(200.0).expect("tick");

    let labels: Vec<String> = widget
        .frame()
        .expect("frame")
        .texts
        .iter()
        .map(|text| text.text.clone())
        .collect();
    assert!(labels.contains(&"01/2015".to_owned()));
    assert!(labels.contains(&"week 6".to_owned()));
}

#[test]
fn legend_fills_two_rows_per_column() {
    let widget = rendered_widget();
    let frame = widget.frame().expect("frame");
    let swatches: Vec<_> = frame.rects.iter().rev().take(2).rev().collect();
    assert_abs_diff_eq!(swatches[0].x, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(swatches[0].y, 20.0 + PLOT_HEIGHT + 36.0, epsilon = 1e-9);
    assert_abs_diff_eq!(swatches[1].x, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(swatches[1].y, 20.0 + PLOT_HEIGHT + 66.0, epsilon = 1e-9);
}

#[test]
fn hover_shows_pluralized_tooltip_above_bar() {
    let mut widget = rendered_widget();

    // Student occupies y 20..72.375 of slot 1; Teacher sits below it.
    assert_eq!(
        widget.pointer_move(250.0, 100.0),
        Some(BarId { layer: 0, sample: 1 })
    );
    let hit = widget.pointer_move(250.0, 50.0);
    assert_eq!(hit, Some(BarId { layer: 1, sample: 1 }));
    let tooltip = widget.tooltip();
    assert!(tooltip.is_visible());
    assert_eq!(
        tooltip.html(),
        r#"<div class="arrow"></div><div class="content">2 connections Students</div>"#
    );
    let (x, y) = tooltip.position();
    assert_abs_diff_eq!(x, 249.5, epsilon = 1e-9);
    assert_abs_diff_eq!(y, 10.0, epsilon = 1e-9);

    let hit = widget.pointer_move(350.0, 220.0);
    assert_eq!(hit, Some(BarId { layer: 0, sample: 2 }));
    assert_eq!(
        widget.tooltip().html(),
        r#"<div class="arrow"></div><div class="content">1 connection Teacher</div>"#
    );

    assert_eq!(widget.pointer_move(5.0, 5.0), None);
    assert!(!widget.tooltip().is_visible());
}

#[test]
fn pointer_leave_hides_tooltip() {
    let mut widget = rendered_widget();
    widget.pointer_move(250.0, 100.0);
    widget.pointer_leave();
    assert!(!widget.tooltip().is_visible());
}

#[test]
fn unparsable_color_falls_back_to_neutral() {
    let mut widget =
        BarChartWidget::new(NullRenderer::default(), BarChartConfig::default()).expect("widget");
    widget.set_container_width(400.0, 0.0);
    widget.set_val(
        Some(StackedSeries::new(vec![vec![Sample::new(
            date(1),
            3.0,
            "Guest",
            "not-a-color",
        )]])),
        0.0,
    );
    widget.tick(200.0).expect("tick");
    widget.tick(1_000.0).expect("tick");
    widget.render().expect("render with neutral fill");
    assert_eq!(widget.renderer().last_rect_count, 2);
}
