use timeline_tool::{
    ProductRegistry, TierBand, TierTable, TotalWeeks, comparison_matrix, render_matrix,
};

#[test]
fn matrix_covers_every_product_and_band_in_order() {
    let tiers = TierTable::default();
    let registry = ProductRegistry::default();
    let cells = comparison_matrix(&tiers, &registry).unwrap();
    assert_eq!(cells.len(), 6 * 6);
    assert_eq!(cells[0].product_key, "ClearRecruit (ATS Only)");
    assert_eq!(cells[0].band, TierBand::SmallBusiness);
    assert_eq!(cells[0].employee_count, 1);
    assert_eq!(cells[5].band, TierBand::EnterpriseCustom);
    assert_eq!(cells[6].product_key, "ClearRecruit");
}

#[test]
fn matrix_totals_match_generated_timelines() {
    let cells = comparison_matrix(&TierTable::default(), &ProductRegistry::default()).unwrap();
    let totals: Vec<TotalWeeks> = cells
        .iter()
        .filter(|c| c.product_key == "TotalTalent")
        .map(|c| c.total_weeks)
        .collect();
    assert_eq!(
        totals,
        [
            TotalWeeks::SelfPaced,
            TotalWeeks::Weeks(26),
            TotalWeeks::Weeks(36),
            TotalWeeks::Weeks(47),
            TotalWeeks::Weeks(57),
            TotalWeeks::Weeks(68),
        ]
    );
    let ats = cells
        .iter()
        .find(|c| c.product_key == "ClearRecruit (ATS Only)" && c.weeks_per_module == 5)
        .unwrap();
    assert_eq!(ats.task_count, 10);
    assert_eq!(ats.total_weeks, TotalWeeks::Weeks(10));
}

#[test]
fn rendered_matrix_has_row_per_product() {
    let tiers = TierTable::default();
    let cells = comparison_matrix(&tiers, &ProductRegistry::default()).unwrap();
    let text = render_matrix(&cells, &tiers);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("Product"));
    assert!(lines[0].contains("Enterprise-Custom"));
    let clear_learn = lines.iter().find(|l| l.starts_with("ClearLearn")).unwrap();
    assert!(clear_learn.contains("self-paced"));
    assert!(clear_learn.contains("20 wks"));
}
