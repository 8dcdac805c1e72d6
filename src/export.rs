use crate::chart::Palette;
use crate::error::ExportError;
use crate::plan::{Plan, TotalWeeks};
use crate::product::ProductBundle;
use crate::task::Task;
use crate::tier::TierDescriptor;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct ExportedTask<'a> {
    #[serde(flatten)]
    task: &'a Task,
    end: u32,
    hex: &'a str,
}

#[derive(Serialize)]
struct PlanDocument<'a> {
    company_name: &'a str,
    employee_count: i64,
    tier: &'a TierDescriptor,
    product: &'a ProductBundle,
    module_count: usize,
    total_weeks: TotalWeeks,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    tasks: Vec<ExportedTask<'a>>,
}

#[derive(Serialize)]
struct TaskCsvRecord<'a> {
    id: &'a str,
    name: &'a str,
    phase: String,
    start: u32,
    duration: u32,
    end: u32,
    color: String,
    hex: &'a str,
    self_paced: bool,
}

impl<'a> TaskCsvRecord<'a> {
    fn new(task: &'a Task, palette: &'a Palette) -> Self {
        Self {
            id: &task.id,
            name: &task.name,
            phase: task.phase.to_string(),
            start: task.start,
            duration: task.duration,
            end: task.end(),
            color: task.color.to_string(),
            hex: palette.hex(task.color),
            self_paced: task.is_self_paced,
        }
    }
}

fn document<'a>(plan: &'a Plan, palette: &'a Palette) -> PlanDocument<'a> {
    PlanDocument {
        company_name: plan.display_company_name(),
        employee_count: plan.employee_count,
        tier: &plan.tier,
        product: &plan.product,
        total_weeks: plan.total_weeks,
        start_date: plan.start_date,
        end_date: plan.end_date,
        module_count: plan.product.module_count(),
        tasks: plan
            .tasks
            .iter()
            .map(|task| ExportedTask {
                task,
                end: task.end(),
                hex: palette.hex(task.color),
            })
            .collect(),
    }
}

/// Full plan as pretty JSON, each task carrying its end week and hex colour.
pub fn write_plan_json<W: Write>(
    plan: &Plan,
    palette: &Palette,
    writer: W,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, &document(plan, palette))?;
    Ok(())
}

/// One CSV row per task, header included.
pub fn write_plan_csv<W: Write>(
    plan: &Plan,
    palette: &Palette,
    writer: W,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    for task in &plan.tasks {
        writer.serialize(TaskCsvRecord::new(task, palette))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_plan_to_json<P: AsRef<Path>>(
    plan: &Plan,
    palette: &Palette,
    path: P,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_plan_json(plan, palette, file)
}

pub fn save_plan_to_csv<P: AsRef<Path>>(
    plan: &Plan,
    palette: &Palette,
    path: P,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_plan_csv(plan, palette, file)
}
