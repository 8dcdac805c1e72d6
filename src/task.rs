use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub const SELF_PACED_LABEL: &str = "Variable - Client Self-Paced";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Phase {
    #[serde(rename = "Initiation & Planning")]
    #[strum(serialize = "Initiation & Planning")]
    InitiationAndPlanning,
    #[serde(rename = "Execution")]
    #[strum(serialize = "Execution")]
    Execution,
    #[serde(rename = "Launch")]
    #[strum(serialize = "Launch")]
    Launch,
}

/// Palette slot a task is drawn with. Presentation only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ColorKey {
    Primary,
    PrimaryLight,
    Secondary,
    SecondaryAlt,
    PrimaryDark,
    PrimaryLighter,
    SecondaryDark,
    SecondaryAltLight,
    Dark,
    White,
    LightGray,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub phase: Phase,
    /// Week offset from the project start.
    pub start: u32,
    /// Weeks. Self-paced tasks carry a nominal 1 used only for layout.
    pub duration: u32,
    pub color: ColorKey,
    #[serde(default)]
    pub is_self_paced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_paced_label: Option<String>,
}

impl Task {
    pub fn scheduled(
        id: impl Into<String>,
        name: impl Into<String>,
        phase: Phase,
        start: u32,
        duration: u32,
        color: ColorKey,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phase,
            start,
            duration,
            color,
            is_self_paced: false,
            self_paced_label: None,
        }
    }

    pub fn self_paced(
        id: impl Into<String>,
        name: impl Into<String>,
        phase: Phase,
        color: ColorKey,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phase,
            start: 0,
            duration: 1,
            color,
            is_self_paced: true,
            self_paced_label: Some(SELF_PACED_LABEL.to_string()),
        }
    }

    /// Exclusive end week.
    pub fn end(&self) -> u32 {
        self.start + self.duration
    }

    /// `1 wk` or `<n> wks`.
    pub fn duration_label(&self) -> String {
        if self.duration == 1 {
            "1 wk".to_string()
        } else {
            format!("{} wks", self.duration)
        }
    }
}

/// Lowercases and replaces every character outside `[a-z0-9]` with `-`.
/// Runs of separators are kept as-is so ids stay stable for existing consumers.
pub fn slugify(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect()
}
