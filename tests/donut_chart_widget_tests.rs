use std::f64::consts::{PI, TAU};

use approx::assert_abs_diff_eq;
use stat_charts::api::{Catalog, DonutChartConfig, DonutChartWidget, LEGEND_CANVAS_ID, SliceId};
use stat_charts::core::{DonutViewModel, Indicator, PieDatum};
use stat_charts::render::NullRenderer;

fn model() -> DonutViewModel {
    DonutViewModel::new(
        vec![
            PieDatum::new("a", 50.0, 50.0, "#1f77b4"),
            PieDatum::new("b", 30.0, 30.0, "#ff7f0e"),
            PieDatum::new("c", 20.0, 20.0, "#2ca02c"),
        ],
        vec![
            vec![
                PieDatum::new("b", 10.0, 10.0, "#ff7f0e").with_profile("teacher"),
                PieDatum::new("a", 30.0, 30.0, "#1f77b4").with_profile("teacher"),
                PieDatum::new("x", 99.0, 99.0, "#000000").with_profile("teacher"),
            ],
            vec![
                PieDatum::new("a", 5.0, 5.0, "#1f77b4").with_profile("student"),
                PieDatum::new("c", 5.0, 5.0, "#2ca02c").with_profile("student"),
            ],
        ],
    )
}

fn widget() -> DonutChartWidget<NullRenderer> {
    let mut widget =
        DonutChartWidget::new(NullRenderer::default(), DonutChartConfig::default()).expect("widget");
    widget.set_indicator(Indicator::new("connection", "connections"));
    widget.set_translator(Box::new(
        Catalog::new()
            .with_entry("teacher", "Teachers")
            .with_entry("student", "Students"),
    ));
    widget
}

#[test]
fn missing_value_draws_nothing() {
    let mut widget = widget();
    widget.set_val(None, 0.0);
    assert!(widget.canvas_ids().is_empty());
    widget.render().expect("render");
    assert!(widget.renderer().last_canvas_ids.is_empty());
}

#[test]
fn aggregate_view_draws_donut_and_legend() {
    let mut widget = widget();
    widget.set_val(Some(model()), 0.0);

    assert_eq!(widget.canvas_ids(), vec!["piechart0", LEGEND_CANVAS_ID]);
    assert_eq!(widget.slice_count("piechart0"), 3);
    let first = widget.slice_angles("piechart0", 0).expect("slice");
    assert_abs_diff_eq!(first.start, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(first.end, PI, epsilon = 1e-12);
    assert_eq!(widget.slice_label("piechart0", 0), Some("50%"));
    assert_eq!(widget.slice_label("piechart0", 2), Some("20%"));
    assert_eq!(widget.profile_label("piechart0"), None);
    assert!(!widget.is_animating());
}

#[test]
fn detail_view_morphs_main_donut_and_adds_profiles() {
    let mut widget = widget();
    widget.set_val(Some(model()), 0.0);
    widget.set_grouped(true, 0.0);

    assert!(widget.is_detail_view());
    assert_eq!(
        widget.canvas_ids(),
        vec!["piechart0", "piechart1", LEGEND_CANVAS_ID]
    );
    assert_eq!(widget.profile_label("piechart0"), Some("Teachers"));
    assert_eq!(widget.profile_label("piechart1"), Some("Students"));
    assert!(widget.is_animating());

    widget.tick(750.0);
    assert!(!widget.is_animating());
    let a = widget.slice_angles("piechart0", 0).expect("a");
    let b = widget.slice_angles("piechart0", 1).expect("b");
    let c = widget.slice_angles("piechart0", 2).expect("c");
    assert_abs_diff_eq!(a.end, 1.5 * PI, epsilon = 1e-9);
    assert_abs_diff_eq!(b.start, 1.5 * PI, epsilon = 1e-9);
    assert_abs_diff_eq!(b.end, TAU, epsilon = 1e-9);
    assert_abs_diff_eq!(c.span(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(c.start, TAU, epsilon = 1e-9);
    assert_eq!(widget.slice_label("piechart0", 2), None);

    let side = widget.slice_angles("piechart1", 1).expect("side");
    assert_abs_diff_eq!(side.start, PI, epsilon = 1e-12);
    assert_abs_diff_eq!(side.end, TAU, epsilon = 1e-12);
}

#[test]
fn aggregate_view_restores_angles_and_removes_profiles() {
    let mut widget = widget();
    widget.set_val(Some(model()), 0.0);
    widget.set_grouped(true, 0.0);
    widget.tick(1_000.0);
    widget.set_grouped(false, 1_000.0);

    assert!(!widget.is_detail_view());
    assert_eq!(widget.canvas_ids(), vec!["piechart0", LEGEND_CANVAS_ID]);
    assert_eq!(widget.profile_label("piechart0"), None);

    widget.tick(1_750.0);
    let c = widget.slice_angles("piechart0", 2).expect("c");
    assert_abs_diff_eq!(c.start, 1.6 * PI, epsilon = 1e-9);
    assert_abs_diff_eq!(c.end, TAU, epsilon = 1e-9);
}

#[test]
fn reversal_mid_transition_starts_from_displayed_angles() {
    let mut widget = widget();
    widget.set_val(Some(model()), 0.0);
    widget.set_grouped(true, 0.0);
    widget.tick(375.0);
    let displayed = widget.slice_angles("piechart0", 0).expect("a");
    assert_abs_diff_eq!(displayed.end, 1.25 * PI, epsilon = 1e-9);

    widget.set_grouped(false, 375.0);
    let resumed = widget.slice_angles("piechart0", 0).expect("a");
    assert_abs_diff_eq!(resumed.end, displayed.end, epsilon = 1e-12);
    assert_abs_diff_eq!(
        widget.slice_target("piechart0", 0).expect("target").end,
        PI,
        epsilon = 1e-12
    );
}

#[test]
fn category_missing_mid_profile_collapses_after_previous_slice() {
    let mut widget = widget();
    let mut model = model();
    model.detail_data.swap(0, 1);
    widget.set_val(Some(model), 0.0);
    widget.set_grouped(true, 0.0);
    widget.tick(750.0);

    let a = widget.slice_angles("piechart0", 0).expect("a");
    let b = widget.slice_angles("piechart0", 1).expect("b");
    let c = widget.slice_angles("piechart0", 2).expect("c");
    assert_abs_diff_eq!(a.end, PI, epsilon = 1e-9);
    assert_abs_diff_eq!(b.start, PI, epsilon = 1e-9);
    assert_abs_diff_eq!(b.span(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(c.start, PI, epsilon = 1e-9);
    assert_abs_diff_eq!(c.end, TAU, epsilon = 1e-9);
    assert_eq!(widget.profile_label("piechart0"), Some("Students"));
}

#[test]
fn displayed_angles_only_move_with_the_clock() {
    let mut widget = widget();
    widget.set_val(Some(model()), 0.0);
    widget.set_grouped(true, 0.0);
    let start = widget.slice_angles("piechart0", 0).expect("a");
    assert_abs_diff_eq!(start.end, PI, epsilon = 1e-12);

    widget.tick(375.0);
    widget.tick(100.0);
    let displayed = widget.slice_angles("piechart0", 0).expect("a");
    assert_abs_diff_eq!(displayed.end, 1.25 * PI, epsilon = 1e-9);
    assert_abs_diff_eq!(widget.clock_ms(), 375.0, epsilon = 1e-12);
}

#[test]
fn grouped_before_data_applies_detail_view_on_set_val() {
    let mut widget = widget();
    widget.set_grouped(true, 0.0);
    widget.set_val(Some(model()), 10.0);
    assert!(widget.grouped());
    assert!(widget.is_detail_view());
    assert_eq!(widget.canvas_ids().len(), 3);
}

#[test]
fn detail_view_without_profiles_keeps_aggregate() {
    let mut widget = widget();
    let mut model = model();
    model.detail_data.clear();
    widget.set_val(Some(model), 0.0);
    widget.set_grouped(true, 0.0);
    assert!(!widget.is_detail_view());
    assert_eq!(widget.canvas_ids(), vec!["piechart0", LEGEND_CANVAS_ID]);
}

#[test]
fn frames_follow_canvas_order() {
    let mut widget = widget();
    widget.set_val(Some(model()), 0.0);
    widget.set_grouped(true, 0.0);
    widget.tick(750.0);
    widget.render().expect("render");

    assert_eq!(
        widget.renderer().last_canvas_ids,
        vec!["piechart0", "piechart1", LEGEND_CANVAS_ID]
    );

    let legend = widget.frame(LEGEND_CANVAS_ID).expect("legend");
    assert_eq!(legend.rects.len(), 3);
    assert_abs_diff_eq!(legend.rects[0].x, 30.0, epsilon = 1e-12);
    assert_abs_diff_eq!(legend.rects[2].y, 60.0, epsilon = 1e-12);
    assert!(legend.texts.iter().any(|text| text.text == "c"));

    let main = widget.frame("piechart0").expect("main");
    assert!(main.texts.iter().any(|text| text.text == "Teachers"));
    assert!(main.texts.iter().any(|text| text.text == "75%"));
}

#[test]
fn hover_on_top_face_shows_count_tooltip() {
    let mut widget = widget();
    widget.set_val(Some(model()), 0.0);

    let hit = widget.pointer_move("piechart0", 104.0, 94.6);
    assert_eq!(
        hit,
        Some(SliceId {
            canvas_id: "piechart0".to_owned(),
            index: 1,
        })
    );
    assert_eq!(
        widget.tooltip().html(),
        r#"<div class="arrow"></div><div class="content">30 connections b</div>"#
    );
    assert_abs_diff_eq!(widget.tooltip().offset().top, 30.0, epsilon = 1e-12);

    assert_eq!(widget.pointer_move("piechart0", 5.0, 5.0), None);
    assert!(!widget.tooltip().is_visible());
}

#[test]
fn front_rim_is_hit_before_top_face() {
    let mut widget = widget();
    widget.set_val(Some(model()), 0.0);
    let hit = widget.pointer_move("piechart0", 150.0, 244.5).expect("rim hit");
    assert_eq!(hit.index, 0);
    assert!(widget.tooltip().is_visible());
}

#[test]
fn detail_tooltip_reports_profile_counts() {
    let mut widget = widget();
    widget.set_val(Some(model()), 0.0);
    widget.set_grouped(true, 0.0);
    widget.tick(750.0);
    assert_eq!(
        widget.tooltip_html("piechart0", 0).as_deref(),
        Some(r#"<div class="arrow"></div><div class="content">30 connections a</div>"#)
    );
}
