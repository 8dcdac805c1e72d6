//! Timeline generation.
//!
//! Two shapes exist. Self-paced tiers (zero weeks per module) produce a flat
//! checklist with nominal durations. Every other tier walks a week cursor
//! through the bundle's modules, overlapping consecutive modules by one week.

use crate::product::{Module, ProductBundle};
use crate::task::{ColorKey, Phase, Task, slugify};
use crate::tier::TierDescriptor;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SETUP_SHARE: u32 = 30;
const LEARNING_SHARE: u32 = 70;
const DATA_IMPORT_SHARE: u32 = 50;
const INTEGRATION_SHARE: u32 = 60;
const ROLLOUT_SHARE: u32 = 30;

const KICKOFF_WEEKS: u32 = 1;
const REQUIREMENTS_WEEKS: u32 = 2;
const GO_LIVE_WEEKS: u32 = 1;
const OPTIONAL_SETUP_WEEKS: u32 = 2;

/// `round(weeks * percent / 100)`, halves rounded up.
fn round_share(weeks: u32, percent: u32) -> u32 {
    (weeks * percent + 50) / 100
}

/// `ceil(weeks * percent / 100)`.
fn ceil_share(weeks: u32, percent: u32) -> u32 {
    (weeks * percent).div_ceil(100)
}

/// Ordered task list produced for one tier and bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    tasks: Vec<Task>,
}

impl From<Vec<Task>> for Timeline {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl Timeline {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Latest task end, in weeks. Display only; never fed back into generation.
    pub fn total_weeks(&self) -> u32 {
        self.tasks.iter().map(Task::end).max().unwrap_or(0)
    }

    /// Tasks grouped by phase, phases in order of first appearance.
    pub fn tasks_by_phase(&self) -> Vec<(Phase, Vec<&Task>)> {
        let mut groups: Vec<(Phase, Vec<&Task>)> = Vec::new();
        for task in &self.tasks {
            match groups.iter_mut().find(|(phase, _)| *phase == task.phase) {
                Some((_, members)) => members.push(task),
                None => groups.push((task.phase, vec![task])),
            }
        }
        groups
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let ids: Vec<&str> = self.tasks.iter().map(|t| t.id.as_str()).collect();
        let names: Vec<&str> = self.tasks.iter().map(|t| t.name.as_str()).collect();
        let phases: Vec<String> = self.tasks.iter().map(|t| t.phase.to_string()).collect();
        let starts: Vec<i64> = self.tasks.iter().map(|t| i64::from(t.start)).collect();
        let durations: Vec<i64> = self.tasks.iter().map(|t| i64::from(t.duration)).collect();
        let ends: Vec<i64> = self.tasks.iter().map(|t| i64::from(t.end())).collect();
        let colors: Vec<String> = self.tasks.iter().map(|t| t.color.to_string()).collect();
        let self_paced: Vec<bool> = self.tasks.iter().map(|t| t.is_self_paced).collect();

        let columns: Vec<Column> = vec![
            Series::new(PlSmallStr::from_static("id"), ids).into_column(),
            Series::new(PlSmallStr::from_static("name"), names).into_column(),
            Series::new(PlSmallStr::from_static("phase"), phases).into_column(),
            Series::new(PlSmallStr::from_static("start"), starts).into_column(),
            Series::new(PlSmallStr::from_static("duration"), durations).into_column(),
            Series::new(PlSmallStr::from_static("end"), ends).into_column(),
            Series::new(PlSmallStr::from_static("color"), colors).into_column(),
            Series::new(PlSmallStr::from_static("self_paced"), self_paced).into_column(),
        ];
        DataFrame::new(columns)
    }
}

/// Builds the full task list from scratch. Identical inputs always yield
/// identical output, ids included.
pub fn generate_timeline(tier: &TierDescriptor, product: &ProductBundle) -> Timeline {
    let tasks = if tier.is_self_paced() {
        self_paced_tasks(product)
    } else {
        scheduled_tasks(tier.weeks_per_module, product)
    };
    debug!(
        product = %product.key,
        band = %tier.band,
        tasks = tasks.len(),
        "generated timeline"
    );
    Timeline { tasks }
}

fn self_paced_tasks(product: &ProductBundle) -> Vec<Task> {
    let mut tasks = Vec::with_capacity(product.modules.len() * 4 + 2);
    tasks.push(Task::scheduled(
        "optional-setup",
        "Optional ClearCompany Setup Assistance",
        Phase::InitiationAndPlanning,
        0,
        OPTIONAL_SETUP_WEEKS,
        ColorKey::PrimaryDark,
    ));

    for module in &product.modules {
        let slug = slugify(&module.to_string());
        tasks.push(Task::self_paced(
            format!("{slug}-implementation"),
            format!("{module} Implementation"),
            Phase::Execution,
            ColorKey::PrimaryDark,
        ));
        tasks.push(Task::self_paced(
            format!("{slug}-setup"),
            "Setup",
            Phase::Execution,
            ColorKey::SecondaryAlt,
        ));
        tasks.push(Task::self_paced(
            format!("{slug}-learning"),
            "Learning",
            Phase::Execution,
            ColorKey::SecondaryDark,
        ));
        tasks.push(Task::self_paced(
            format!("{slug}-testing"),
            "Testing",
            Phase::Execution,
            ColorKey::PrimaryLight,
        ));
    }

    tasks.push(Task::self_paced(
        "golive",
        "Go Live",
        Phase::Launch,
        ColorKey::SecondaryAlt,
    ));
    tasks
}

fn scheduled_tasks(weeks: u32, product: &ProductBundle) -> Vec<Task> {
    let setup_weeks = round_share(weeks, SETUP_SHARE).max(1);
    let learning_weeks = ceil_share(weeks, LEARNING_SHARE).max(1);
    let data_import_weeks = round_share(weeks, DATA_IMPORT_SHARE).max(1);
    let integration_weeks = round_share(weeks, INTEGRATION_SHARE).max(1);
    let rollout_weeks = round_share(weeks, ROLLOUT_SHARE).max(1);

    let mut tasks = Vec::with_capacity(product.modules.len() * 6 + 4);
    let mut cursor: u32 = 0;

    // Kickoff and requirements run side by side; the cursor moves once.
    tasks.push(Task::scheduled(
        "kickoff",
        "Project Kickoff",
        Phase::InitiationAndPlanning,
        cursor,
        KICKOFF_WEEKS,
        ColorKey::PrimaryDark,
    ));
    tasks.push(Task::scheduled(
        "requirements",
        "Requirements Gathering",
        Phase::InitiationAndPlanning,
        cursor,
        REQUIREMENTS_WEEKS,
        ColorKey::PrimaryLighter,
    ));
    cursor += REQUIREMENTS_WEEKS;

    for (idx, module) in product.modules.iter().enumerate() {
        // Each module after the first starts a week before the previous one ends.
        if idx > 0 {
            cursor = cursor.saturating_sub(1);
        }
        let module_end = cursor + weeks;
        let slug = slugify(&module.to_string());

        tasks.push(Task::scheduled(
            format!("{slug}-implementation"),
            format!("{module} Implementation"),
            Phase::Execution,
            cursor,
            weeks,
            ColorKey::PrimaryDark,
        ));
        tasks.push(Task::scheduled(
            format!("{slug}-setup"),
            "Setup",
            Phase::Execution,
            cursor,
            setup_weeks,
            ColorKey::SecondaryAlt,
        ));
        tasks.push(Task::scheduled(
            format!("{slug}-learning"),
            "Learning",
            Phase::Execution,
            cursor,
            learning_weeks,
            ColorKey::SecondaryDark,
        ));

        let testing_start = cursor + learning_weeks - 1;
        let testing_weeks = module_end.saturating_sub(testing_start).max(1);
        tasks.push(Task::scheduled(
            format!("{slug}-testing"),
            "Testing",
            Phase::Execution,
            testing_start,
            testing_weeks,
            ColorKey::PrimaryLight,
        ));

        match module {
            Module::Recruiting => {
                tasks.push(Task::scheduled(
                    "historical-data-import",
                    "Historical Data Import",
                    Phase::Execution,
                    module_end.saturating_sub(data_import_weeks),
                    data_import_weeks,
                    ColorKey::SecondaryAltLight,
                ));
                if product.has_integration {
                    tasks.push(Task::scheduled(
                        "recruiting-integration",
                        "Integration",
                        Phase::Execution,
                        module_end.saturating_sub(integration_weeks),
                        integration_weeks,
                        ColorKey::PrimaryDark,
                    ));
                }
            }
            Module::Onboarding => {
                tasks.push(Task::scheduled(
                    "onboarding-integration",
                    "Integration",
                    Phase::Execution,
                    module_end.saturating_sub(integration_weeks),
                    integration_weeks,
                    ColorKey::SecondaryAltLight,
                ));
            }
            _ => {}
        }

        cursor = module_end;
    }

    tasks.push(Task::scheduled(
        "rollout-training",
        "Rollout Training",
        Phase::Launch,
        cursor,
        rollout_weeks,
        ColorKey::Secondary,
    ));
    cursor += rollout_weeks;

    tasks.push(Task::scheduled(
        "golive",
        "Go Live",
        Phase::Launch,
        cursor,
        GO_LIVE_WEEKS,
        ColorKey::SecondaryAlt,
    ));
    tasks
}
