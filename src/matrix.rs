use crate::error::PlanError;
use crate::plan::{PlanOptions, PlanRequest, TotalWeeks, build_plan};
use crate::product::ProductRegistry;
use crate::tier::{TierBand, TierTable};
use rayon::prelude::*;
use serde::Serialize;

/// One product evaluated at one tier band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    pub product_key: String,
    pub band: TierBand,
    pub employee_count: i64,
    pub weeks_per_module: u32,
    pub task_count: usize,
    pub total_weeks: TotalWeeks,
}

/// Evaluates every product at the lower bound of every tier rule. Cells come
/// back in registry order, then table order.
pub fn comparison_matrix(
    tiers: &TierTable,
    registry: &ProductRegistry,
) -> Result<Vec<MatrixCell>, PlanError> {
    let inputs: Vec<(&str, i64)> = registry
        .keys()
        .flat_map(|key| {
            tiers
                .rules()
                .iter()
                .map(move |rule| (key, rule.min_employees))
        })
        .collect();

    let options = PlanOptions::default();
    inputs
        .par_iter()
        .map(|&(key, employee_count)| {
            let request = PlanRequest::new(employee_count, key);
            let plan = build_plan(&request, tiers, registry, &options)?;
            Ok(MatrixCell {
                product_key: key.to_string(),
                band: plan.tier.band,
                employee_count,
                weeks_per_module: plan.tier.weeks_per_module,
                task_count: plan.tasks.len(),
                total_weeks: plan.total_weeks,
            })
        })
        .collect()
}

/// Text table with one row per product and one column per band.
pub fn render_matrix(cells: &[MatrixCell], tiers: &TierTable) -> String {
    let bands: Vec<TierBand> = tiers.rules().iter().map(|r| r.band).collect();
    let mut products: Vec<&str> = Vec::new();
    for cell in cells {
        if !products.contains(&cell.product_key.as_str()) {
            products.push(&cell.product_key);
        }
    }

    let key_width = products
        .iter()
        .map(|p| p.len())
        .max()
        .unwrap_or(0)
        .max("Product".len());
    let col_widths: Vec<usize> = bands.iter().map(|b| b.to_string().len().max(10)).collect();

    let mut out = format!("{:<key_width$}", "Product");
    for (band, width) in bands.iter().zip(&col_widths) {
        out.push_str(&format!(" | {:<width$}", band.to_string()));
    }
    out.push('\n');

    for product in products {
        out.push_str(&format!("{product:<key_width$}"));
        for (band, width) in bands.iter().zip(&col_widths) {
            let value = cells
                .iter()
                .find(|c| c.product_key == product && c.band == *band)
                .map(|c| match c.total_weeks {
                    TotalWeeks::Weeks(n) => format!("{n} wks"),
                    TotalWeeks::SelfPaced => "self-paced".to_string(),
                })
                .unwrap_or_default();
            out.push_str(&format!(" | {value:<width$}"));
        }
        out.push('\n');
    }
    out
}
