use crate::calendar::WorkCalendar;
use crate::error::PlanError;
use crate::product::{ProductBundle, ProductRegistry};
use crate::task::Task;
use crate::tier::{TierDescriptor, TierTable};
use crate::timeline::{Timeline, generate_timeline};
use chrono::{Duration, NaiveDate};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub const DEFAULT_COMPANY_NAME: &str = "Company Name";
const SELF_PACED_SENTINEL: &str = "self-paced";
const SELF_PACED_DISPLAY: &str = "Client Self Paced";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub company_name: String,
    pub employee_count: i64,
    pub product_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl PlanRequest {
    pub fn new(employee_count: i64, product_key: impl Into<String>) -> Self {
        Self {
            company_name: String::new(),
            employee_count,
            product_key: product_key.into(),
            start_date: None,
        }
    }

    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }
}

/// Knobs that change how a plan is projected onto dates, never its tasks.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// When set, the projected end date rolls forward onto a working day.
    pub working_calendar: Option<WorkCalendar>,
}

/// Overall length of a plan. Self-paced plans have no week count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalWeeks {
    Weeks(u32),
    SelfPaced,
}

impl TotalWeeks {
    pub fn weeks(self) -> Option<u32> {
        match self {
            TotalWeeks::Weeks(n) => Some(n),
            TotalWeeks::SelfPaced => None,
        }
    }

    pub fn is_self_paced(self) -> bool {
        matches!(self, TotalWeeks::SelfPaced)
    }
}

impl fmt::Display for TotalWeeks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalWeeks::Weeks(n) => write!(f, "{n} weeks"),
            TotalWeeks::SelfPaced => f.write_str(SELF_PACED_DISPLAY),
        }
    }
}

impl Serialize for TotalWeeks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TotalWeeks::Weeks(n) => serializer.serialize_u32(*n),
            TotalWeeks::SelfPaced => serializer.serialize_str(SELF_PACED_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for TotalWeeks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TotalWeeksVisitor;

        impl Visitor<'_> for TotalWeeksVisitor {
            type Value = TotalWeeks;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a week count or \"{SELF_PACED_SENTINEL}\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<TotalWeeks, E> {
                u32::try_from(value)
                    .map(TotalWeeks::Weeks)
                    .map_err(|_| E::custom(format!("week count {value} out of range")))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<TotalWeeks, E> {
                u32::try_from(value)
                    .map(TotalWeeks::Weeks)
                    .map_err(|_| E::custom(format!("week count {value} out of range")))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<TotalWeeks, E> {
                if value == SELF_PACED_SENTINEL {
                    Ok(TotalWeeks::SelfPaced)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_any(TotalWeeksVisitor)
    }
}

/// Everything a front end needs to draw one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub company_name: String,
    pub employee_count: i64,
    pub tier: TierDescriptor,
    pub product: ProductBundle,
    pub tasks: Vec<Task>,
    pub total_weeks: TotalWeeks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Plan {
    /// Company name for titles; blank names fall back to a placeholder.
    pub fn display_company_name(&self) -> &str {
        let trimmed = self.company_name.trim();
        if trimmed.is_empty() {
            DEFAULT_COMPANY_NAME
        } else {
            trimmed
        }
    }

    pub fn timeline(&self) -> Timeline {
        Timeline::from(self.tasks.clone())
    }
}

/// `start + weeks * 7` days, or nothing for self-paced plans.
pub fn project_end_date(
    start: NaiveDate,
    total_weeks: TotalWeeks,
    calendar: Option<&WorkCalendar>,
) -> Option<NaiveDate> {
    let weeks = total_weeks.weeks()?;
    let end = start.checked_add_signed(Duration::weeks(i64::from(weeks)))?;
    Some(match calendar {
        Some(calendar) => calendar.roll_forward(end),
        None => end,
    })
}

/// Resolves the tier, generates the timeline and projects dates. Fails before
/// any task is built when the count or product key is invalid.
pub fn build_plan(
    request: &PlanRequest,
    tiers: &TierTable,
    registry: &ProductRegistry,
    options: &PlanOptions,
) -> Result<Plan, PlanError> {
    let tier = tiers.resolve(request.employee_count)?;
    let product = registry.get(&request.product_key)?;

    let timeline = generate_timeline(&tier, product);
    let total_weeks = if tier.is_self_paced() {
        TotalWeeks::SelfPaced
    } else {
        TotalWeeks::Weeks(timeline.total_weeks())
    };
    let end_date = request
        .start_date
        .and_then(|start| project_end_date(start, total_weeks, options.working_calendar.as_ref()));

    Ok(Plan {
        company_name: request.company_name.clone(),
        employee_count: request.employee_count,
        tier,
        product: product.clone(),
        tasks: timeline.into_tasks(),
        total_weeks,
        start_date: request.start_date,
        end_date,
    })
}
