//! Tier resolution: employee count to service tier.
//!
//! The rule table is plain data. [`TierTable::default`] carries the standard
//! six bands; configuration may supply another table as long as it still
//! partitions `[1, ∞)`.

use crate::error::{PlanError, RegistryError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Employee counts at or above this are displayed as a capped label.
pub const EMPLOYEE_DISPLAY_CAP: i64 = 4500;

/// Largest weeks-per-module a rule may carry; keeps every plan's week
/// arithmetic inside `u32`.
pub const MAX_WEEKS_PER_MODULE: u32 = 520;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum TierBand {
    #[serde(rename = "Small Business")]
    #[strum(serialize = "Small Business")]
    SmallBusiness,
    #[serde(rename = "Mid-Market-Advanced")]
    #[strum(serialize = "Mid-Market-Advanced")]
    MidMarketAdvanced,
    #[serde(rename = "Mid-Market-Advanced-7wk")]
    #[strum(serialize = "Mid-Market-Advanced-7wk")]
    MidMarketAdvanced7wk,
    #[serde(rename = "Enterprise-Max-9wk")]
    #[strum(serialize = "Enterprise-Max-9wk")]
    EnterpriseMax9wk,
    #[serde(rename = "Enterprise-Max-11wk")]
    #[strum(serialize = "Enterprise-Max-11wk")]
    EnterpriseMax11wk,
    #[serde(rename = "Enterprise-Custom")]
    #[strum(serialize = "Enterprise-Custom")]
    EnterpriseCustom,
}

impl TierBand {
    /// Package name sold for this band.
    pub fn package_name(self) -> &'static str {
        match self {
            TierBand::SmallBusiness => "ClearCare Pro",
            TierBand::MidMarketAdvanced | TierBand::MidMarketAdvanced7wk => "ClearCare Advanced",
            TierBand::EnterpriseMax9wk | TierBand::EnterpriseMax11wk => "ClearCare Max",
            TierBand::EnterpriseCustom => "Custom",
        }
    }

    pub fn is_self_paced(self) -> bool {
        matches!(self, TierBand::SmallBusiness)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum CustomerTier {
    #[serde(rename = "Small Business")]
    #[strum(serialize = "Small Business")]
    SmallBusiness,
    #[serde(rename = "Mid-Market")]
    #[strum(serialize = "Mid-Market")]
    MidMarket,
    #[serde(rename = "Enterprise")]
    #[strum(serialize = "Enterprise")]
    Enterprise,
}

/// One row of the tier table. `max_employees` is inclusive; `None` means
/// unbounded and is only valid on the last row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    pub band: TierBand,
    pub min_employees: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_employees: Option<i64>,
    pub customer_tier: CustomerTier,
    pub module_check_ins: u32,
    pub weeks_per_module: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl TierRule {
    pub fn new(
        band: TierBand,
        min_employees: i64,
        max_employees: Option<i64>,
        customer_tier: CustomerTier,
        module_check_ins: u32,
        weeks_per_module: u32,
    ) -> Self {
        Self {
            band,
            min_employees,
            max_employees,
            customer_tier,
            module_check_ins,
            weeks_per_module,
            package: None,
        }
    }

    pub fn contains(&self, employee_count: i64) -> bool {
        employee_count >= self.min_employees
            && self.max_employees.is_none_or(|max| employee_count <= max)
    }

    pub fn package(&self) -> &str {
        self.package
            .as_deref()
            .unwrap_or_else(|| self.band.package_name())
    }

    pub fn descriptor(&self) -> TierDescriptor {
        TierDescriptor {
            band: self.band,
            package: self.package().to_string(),
            customer_tier: self.customer_tier,
            module_check_ins: self.module_check_ins,
            weeks_per_module: self.weeks_per_module,
        }
    }
}

/// Resolved service tier for one employee count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDescriptor {
    pub band: TierBand,
    pub package: String,
    pub customer_tier: CustomerTier,
    /// Informational only; the timeline generator ignores it.
    pub module_check_ins: u32,
    pub weeks_per_module: u32,
}

impl TierDescriptor {
    /// Zero weeks per module selects the self-paced timeline.
    pub fn is_self_paced(&self) -> bool {
        self.weeks_per_module == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable {
    rules: Vec<TierRule>,
}

impl Default for TierTable {
    fn default() -> Self {
        use CustomerTier::{Enterprise, MidMarket};
        use TierBand::*;
        Self {
            rules: vec![
                TierRule::new(SmallBusiness, 1, Some(199), CustomerTier::SmallBusiness, 0, 0),
                TierRule::new(MidMarketAdvanced, 200, Some(599), MidMarket, 4, 5),
                TierRule::new(MidMarketAdvanced7wk, 600, Some(999), MidMarket, 4, 7),
                TierRule::new(EnterpriseMax9wk, 1000, Some(1499), Enterprise, 6, 9),
                TierRule::new(EnterpriseMax11wk, 1500, Some(2000), Enterprise, 6, 11),
                TierRule::new(EnterpriseCustom, 2001, None, Enterprise, 8, 13),
            ],
        }
    }
}

impl TierTable {
    /// Builds a table after checking that the rules partition `[1, ∞)`.
    pub fn new(rules: Vec<TierRule>) -> Result<Self, RegistryError> {
        let table = Self { rules };
        table.validate()?;
        Ok(table)
    }

    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        let first = self.rules.first().ok_or(RegistryError::EmptyTierTable)?;
        if first.min_employees != 1 {
            return Err(RegistryError::TierTableStart(first.min_employees));
        }

        let last_idx = self.rules.len() - 1;
        let mut expected = 1;
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.min_employees != expected {
                return Err(RegistryError::TierGap {
                    index,
                    expected,
                    found: rule.min_employees,
                });
            }
            if rule.weeks_per_module == 0 && !rule.band.is_self_paced() {
                return Err(RegistryError::ZeroWeeksNotSelfPaced(index));
            }
            if rule.weeks_per_module > MAX_WEEKS_PER_MODULE {
                return Err(RegistryError::WeeksPerModuleTooLarge {
                    index,
                    weeks: rule.weeks_per_module,
                    max: MAX_WEEKS_PER_MODULE,
                });
            }
            match rule.max_employees {
                Some(max) if max < rule.min_employees => {
                    return Err(RegistryError::TierInverted {
                        index,
                        min: rule.min_employees,
                        max,
                    });
                }
                Some(_) if index == last_idx => return Err(RegistryError::BoundedLastTier),
                Some(max) => {
                    expected = max
                        .checked_add(1)
                        .ok_or(RegistryError::TierBoundOverflow(index))?;
                }
                None if index != last_idx => {
                    return Err(RegistryError::UnboundedTierNotLast(index));
                }
                None => {}
            }
        }
        Ok(())
    }

    pub fn resolve(&self, employee_count: i64) -> Result<TierDescriptor, PlanError> {
        if employee_count < 1 {
            return Err(PlanError::InvalidEmployeeCount(employee_count));
        }
        self.rules
            .iter()
            .find(|rule| rule.contains(employee_count))
            .map(TierRule::descriptor)
            .ok_or(PlanError::NoMatchingTier(employee_count))
    }
}

/// Maps an employee count to its tier. Counts below 1 are rejected rather
/// than falling through to the smallest band.
pub fn resolve_tier(employee_count: i64, table: &TierTable) -> Result<TierDescriptor, PlanError> {
    table.resolve(employee_count)
}

/// `4,500+` above the cap, otherwise the count with thousands separators.
pub fn format_employee_count(employee_count: i64) -> String {
    if employee_count >= EMPLOYEE_DISPLAY_CAP {
        return "4,500+".to_string();
    }
    let digits = employee_count.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if employee_count < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
