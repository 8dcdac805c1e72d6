use timeline_tool::chart::SELF_PACED_BAR_LABEL;
use timeline_tool::{
    ChartLayout, ChartOptions, ColorKey, ConfigError, Palette, Phase, PlanOptions, PlanRequest,
    ProductRegistry, TierTable, build_plan,
};

fn layout(employee_count: i64, product: &str) -> ChartLayout {
    let plan = build_plan(
        &PlanRequest::new(employee_count, product),
        &TierTable::default(),
        &ProductRegistry::default(),
        &PlanOptions::default(),
    )
    .unwrap();
    ChartLayout::build(&plan.timeline(), &Palette::default(), &ChartOptions::default())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn short_plans_use_minimum_horizon() {
    let chart = layout(750, "ClearRecruit");
    assert_eq!(chart.week_headers.len(), 25);
    assert_eq!(chart.week_headers[0], "Week 1");
    assert_eq!(chart.week_headers[24], "Week 25");
    assert!(close(chart.scale_weeks, 30.0));
}

#[test]
fn long_plans_extend_headers_and_scale() {
    let chart = layout(2001, "TotalTalent");
    assert_eq!(chart.week_headers.len(), 68);
    assert!(close(chart.scale_weeks, 68.0 * 1.2));
}

#[test]
fn bars_are_positioned_as_percentages() {
    let chart = layout(750, "ClearRecruit");
    let execution = &chart.sections[1];
    assert_eq!(execution.phase, Phase::Execution);
    let implementation = &execution.bars[0];
    assert_eq!(implementation.task_id, "recruiting-implementation");
    assert!(close(implementation.left_pct, 2.0 / 30.0 * 100.0));
    assert!(close(implementation.width_pct, 7.0 / 30.0 * 100.0));
    assert_eq!(implementation.label, "7 wks");
    assert_eq!(implementation.color, "#1a325a");

    let kickoff = &chart.sections[0].bars[0];
    assert_eq!(kickoff.label, "1 wk");
    assert!(close(kickoff.left_pct, 0.0));
}

#[test]
fn bar_width_has_a_floor() {
    let wide = ChartOptions {
        min_weeks: 25,
        min_scale_weeks: 200,
    };
    let plan = build_plan(
        &PlanRequest::new(750, "ClearRecruit"),
        &TierTable::default(),
        &ProductRegistry::default(),
        &PlanOptions::default(),
    )
    .unwrap();
    let chart = ChartLayout::build(&plan.timeline(), &Palette::default(), &wide);
    let golive = chart.sections[2].bars.last().unwrap();
    assert_eq!(golive.task_id, "golive");
    assert!(close(golive.width_pct, 2.0));
}

#[test]
fn self_paced_bars_span_the_chart() {
    let chart = layout(50, "ClearLearn");
    let execution = &chart.sections[1];
    for bar in &execution.bars {
        assert!(close(bar.left_pct, 0.0));
        assert!(close(bar.width_pct, 100.0));
        assert_eq!(bar.label, SELF_PACED_BAR_LABEL);
    }
    let setup = &chart.sections[0].bars[0];
    assert_eq!(setup.label, "2 wks");
}

#[test]
fn phase_headers_use_phase_colours() {
    let chart = layout(750, "ClearRecruit");
    let colors: Vec<&str> = chart
        .sections
        .iter()
        .map(|s| s.header_color.as_str())
        .collect();
    assert_eq!(colors, ["#1a325a", "#254677", "#822275"]);
}

#[test]
fn palette_overrides_are_validated() {
    let mut palette = Palette::default();
    palette.set(ColorKey::Primary, "#000").unwrap();
    assert_eq!(palette.hex(ColorKey::Primary), "#000");
    assert!(matches!(
        palette.set(ColorKey::Primary, "blue"),
        Err(ConfigError::Palette { .. })
    ));
    assert!(matches!(
        palette.set(ColorKey::Primary, "#12345"),
        Err(ConfigError::Palette { .. })
    ));
    assert_eq!(palette.hex(ColorKey::Primary), "#000");
}
