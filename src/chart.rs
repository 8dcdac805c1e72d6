//! Presentation geometry for Gantt renderers.
//!
//! Nothing here feeds back into generation; it turns a task list into
//! percentages, labels and colours that any front end can draw.

use crate::error::ConfigError;
use crate::task::{ColorKey, Phase, Task};
use crate::timeline::Timeline;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MIN_WEEKS: u32 = 25;
pub const DEFAULT_MIN_SCALE_WEEKS: u32 = 30;
pub const SELF_PACED_BAR_LABEL: &str = "Self-Paced";
const MIN_BAR_WIDTH_PCT: f64 = 2.0;
const SCALE_HEADROOM: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Minimum number of week headers drawn.
    pub min_weeks: u32,
    /// Minimum horizon, in weeks, bars are scaled against.
    pub min_scale_weeks: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            min_weeks: DEFAULT_MIN_WEEKS,
            min_scale_weeks: DEFAULT_MIN_SCALE_WEEKS,
        }
    }
}

/// Colour key to hex value mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: BTreeMap<String, String>,
}

impl Default for Palette {
    fn default() -> Self {
        let entries = [
            (ColorKey::Primary, "#254677"),
            (ColorKey::PrimaryLight, "#55BAEA"),
            (ColorKey::Secondary, "#E6E651"),
            (ColorKey::SecondaryAlt, "#822275"),
            (ColorKey::PrimaryDark, "#1a325a"),
            (ColorKey::PrimaryLighter, "#7dcbf2"),
            (ColorKey::SecondaryDark, "#baba41"),
            (ColorKey::SecondaryAltLight, "#a22f91"),
            (ColorKey::Dark, "#333333"),
            (ColorKey::White, "#FFFFFF"),
            (ColorKey::LightGray, "#F5F5F5"),
        ];
        Self {
            colors: entries
                .into_iter()
                .map(|(key, hex)| (key.to_string(), hex.to_string()))
                .collect(),
        }
    }
}

impl Palette {
    pub fn hex(&self, key: ColorKey) -> &str {
        self.colors
            .get(key.to_string().as_str())
            .map(String::as_str)
            .unwrap_or("#000000")
    }

    /// Replaces one slot. Values must be `#rgb` or `#rrggbb`.
    pub fn set(&mut self, key: ColorKey, hex: &str) -> Result<(), ConfigError> {
        if !is_hex_color(hex) {
            return Err(ConfigError::Palette {
                key: key.to_string(),
                value: hex.to_string(),
            });
        }
        self.colors.insert(key.to_string(), hex.to_string());
        Ok(())
    }

    pub fn phase_color(&self, phase: Phase) -> &str {
        self.hex(phase_color_key(phase))
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

pub fn phase_color_key(phase: Phase) -> ColorKey {
    match phase {
        Phase::InitiationAndPlanning => ColorKey::PrimaryDark,
        Phase::Execution => ColorKey::Primary,
        Phase::Launch => ColorKey::SecondaryAlt,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub task_id: String,
    pub task_name: String,
    pub left_pct: f64,
    pub width_pct: f64,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSection {
    pub phase: Phase,
    pub header_color: String,
    pub bars: Vec<BarGeometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub week_headers: Vec<String>,
    pub scale_weeks: f64,
    pub sections: Vec<PhaseSection>,
}

impl ChartLayout {
    pub fn build(timeline: &Timeline, palette: &Palette, options: &ChartOptions) -> Self {
        let total_weeks = timeline.total_weeks();
        let week_headers = (1..=options.min_weeks.max(total_weeks))
            .map(|week| format!("Week {week}"))
            .collect();
        let scale_weeks =
            f64::from(options.min_scale_weeks).max(f64::from(total_weeks) * SCALE_HEADROOM);

        let sections = timeline
            .tasks_by_phase()
            .into_iter()
            .map(|(phase, tasks)| PhaseSection {
                phase,
                header_color: palette.phase_color(phase).to_string(),
                bars: tasks
                    .into_iter()
                    .map(|task| bar_geometry(task, scale_weeks, palette))
                    .collect(),
            })
            .collect();

        Self {
            week_headers,
            scale_weeks,
            sections,
        }
    }
}

fn bar_geometry(task: &Task, scale_weeks: f64, palette: &Palette) -> BarGeometry {
    let (left_pct, width_pct, label) = if task.is_self_paced {
        (0.0, 100.0, SELF_PACED_BAR_LABEL.to_string())
    } else {
        let left = f64::from(task.start) / scale_weeks * 100.0;
        let width = (f64::from(task.duration) / scale_weeks * 100.0).max(MIN_BAR_WIDTH_PCT);
        (left, width, task.duration_label())
    };
    BarGeometry {
        task_id: task.id.clone(),
        task_name: task.name.clone(),
        left_pct,
        width_pct,
        label,
        color: palette.hex(task.color).to_string(),
    }
}
