//! TOML configuration.
//!
//! Every section is optional. Missing sections fall back to the built-in tier
//! table, product registry, brand palette and chart defaults.
//!
//! ```toml
//! [defaults]
//! company_name = "TechCorp Solutions"
//! employee_count = 750
//! product = "ClearRecruit"
//! start_date = "2025-01-06"
//!
//! [chart]
//! min_weeks = 25
//! min_scale_weeks = 30
//!
//! [palette]
//! primary = "#254677"
//!
//! [[products]]
//! key = "ClearRecruit"
//! modules = ["Recruiting", "Onboarding"]
//!
//! [calendar]
//! working_days = ["Mon", "Tue", "Wed", "Thu", "Fri"]
//! holidays = ["2025-12-24"]
//! ```

use crate::calendar::{WorkCalendar, WorkCalendarConfig};
use crate::chart::{ChartOptions, Palette};
use crate::error::ConfigError;
use crate::plan::PlanRequest;
use crate::product::{ProductBundle, ProductRegistry};
use crate::session::Configurator;
use crate::task::ColorKey;
use crate::tier::{TierRule, TierTable};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub company_name: String,
    pub employee_count: i64,
    pub product: String,
    pub start_date: Option<NaiveDate>,
    pub use_working_days: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            company_name: "TechCorp Solutions".to_string(),
            employee_count: 750,
            product: "ClearRecruit".to_string(),
            start_date: None,
            use_working_days: false,
        }
    }
}

impl Defaults {
    pub fn to_request(&self) -> PlanRequest {
        PlanRequest {
            company_name: self.company_name.clone(),
            employee_count: self.employee_count,
            product_key: self.product.clone(),
            start_date: self.start_date,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    defaults: Defaults,
    #[serde(default)]
    chart: Option<ChartOptions>,
    #[serde(default)]
    palette: BTreeMap<String, String>,
    #[serde(default)]
    tiers: Option<Vec<TierRule>>,
    #[serde(default)]
    products: Option<Vec<ProductBundle>>,
    #[serde(default)]
    calendar: Option<WorkCalendarConfig>,
}

/// Validated configuration shared by the CLI and the HTTP server.
#[derive(Debug, Clone)]
pub struct ConfiguratorConfig {
    pub defaults: Defaults,
    pub chart: ChartOptions,
    pub palette: Palette,
    pub tiers: Arc<TierTable>,
    pub products: Arc<ProductRegistry>,
    /// Custom working-day calendar; `None` uses the US federal default.
    pub calendar: Option<WorkCalendar>,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            chart: ChartOptions::default(),
            palette: Palette::default(),
            tiers: Arc::new(TierTable::default()),
            products: Arc::new(ProductRegistry::default()),
            calendar: None,
        }
    }
}

impl ConfiguratorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(source)?;
        Self::from_raw(raw)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        info!(
            path = %path.display(),
            products = config.products.products().len(),
            tiers = config.tiers.rules().len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Session seeded with the configured defaults, tables and calendar.
    pub fn configurator(&self) -> Configurator {
        let mut session = Configurator::new(
            self.tiers.clone(),
            self.products.clone(),
            self.defaults.to_request(),
        );
        if self.calendar.is_some() {
            session.set_calendar(self.calendar.clone());
        }
        if self.defaults.use_working_days {
            session.set_use_working_days(true);
        }
        session
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let chart = raw.chart.unwrap_or_default();
        if chart.min_scale_weeks == 0 {
            return Err(ConfigError::Chart(
                "min_scale_weeks must be greater than zero".into(),
            ));
        }

        let mut palette = Palette::default();
        for (key, value) in &raw.palette {
            let color_key: ColorKey = key.parse().map_err(|_| ConfigError::Palette {
                key: key.clone(),
                value: value.clone(),
            })?;
            palette.set(color_key, value)?;
        }

        let tiers = match raw.tiers {
            Some(rules) => TierTable::new(rules)?,
            None => TierTable::default(),
        };
        let products = match raw.products {
            Some(products) => ProductRegistry::new(products)?,
            None => ProductRegistry::default(),
        };

        let calendar = raw
            .calendar
            .as_ref()
            .map(WorkCalendar::from_config)
            .transpose()?;

        Ok(Self {
            defaults: raw.defaults,
            chart,
            palette,
            tiers: Arc::new(tiers),
            products: Arc::new(products),
            calendar,
        })
    }
}
