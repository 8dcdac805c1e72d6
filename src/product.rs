use crate::error::{PlanError, RegistryError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Product capability that contributes a cluster of tasks to the timeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Module {
    #[serde(rename = "Recruiting")]
    #[strum(serialize = "Recruiting")]
    Recruiting,
    #[serde(rename = "Onboarding")]
    #[strum(serialize = "Onboarding")]
    Onboarding,
    #[serde(rename = "LMS")]
    #[strum(serialize = "LMS")]
    Lms,
    #[serde(rename = "Performance/Goals/Engagement")]
    #[strum(serialize = "Performance/Goals/Engagement")]
    PerformanceGoalsEngagement,
    #[serde(rename = "Compensation Management")]
    #[strum(serialize = "Compensation Management")]
    CompensationManagement,
}

impl Module {
    /// The fixed module vocabulary in its canonical order.
    pub fn vocabulary() -> impl Iterator<Item = Module> {
        Module::iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBundle {
    pub key: String,
    /// Scheduling order of the bundle's modules.
    pub modules: Vec<Module>,
    /// Adds a Recruiting integration task to scheduled timelines.
    #[serde(default)]
    pub has_integration: bool,
}

impl ProductBundle {
    pub fn new(key: impl Into<String>, modules: Vec<Module>, has_integration: bool) -> Self {
        Self {
            key: key.into(),
            modules,
            has_integration,
        }
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn includes(&self, module: Module) -> bool {
        self.modules.contains(&module)
    }
}

/// Static table of sellable bundles, kept in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRegistry {
    products: Vec<ProductBundle>,
}

impl Default for ProductRegistry {
    fn default() -> Self {
        use Module::*;
        Self {
            products: vec![
                ProductBundle::new("ClearRecruit (ATS Only)", vec![Recruiting], true),
                ProductBundle::new("ClearRecruit", vec![Recruiting, Onboarding], false),
                ProductBundle::new("ClearTalent", vec![Recruiting, Onboarding, Lms], false),
                ProductBundle::new(
                    "TotalTalent",
                    vec![
                        Recruiting,
                        Onboarding,
                        Lms,
                        PerformanceGoalsEngagement,
                        CompensationManagement,
                    ],
                    false,
                ),
                ProductBundle::new("ClearLearn", vec![Lms], false),
                ProductBundle::new(
                    "ClearGrow",
                    vec![Lms, PerformanceGoalsEngagement, CompensationManagement],
                    false,
                ),
            ],
        }
    }
}

impl ProductRegistry {
    pub fn new(products: Vec<ProductBundle>) -> Result<Self, RegistryError> {
        let registry = Self { products };
        registry.validate()?;
        Ok(registry)
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.products.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }
        let mut keys = HashSet::with_capacity(self.products.len());
        for product in &self.products {
            if product.key.trim().is_empty() {
                return Err(RegistryError::EmptyProductKey);
            }
            if !keys.insert(product.key.as_str()) {
                return Err(RegistryError::DuplicateProductKey(product.key.clone()));
            }
            if product.modules.is_empty() {
                return Err(RegistryError::NoModules(product.key.clone()));
            }
            let mut seen = HashSet::with_capacity(product.modules.len());
            for module in &product.modules {
                if !seen.insert(*module) {
                    return Err(RegistryError::DuplicateModule {
                        key: product.key.clone(),
                        module: module.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn products(&self) -> &[ProductBundle] {
        &self.products
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.key.as_str())
    }

    pub fn find(&self, key: &str) -> Option<&ProductBundle> {
        self.products.iter().find(|p| p.key == key)
    }

    /// Looks up a bundle by exact key. Never falls back to a default product.
    pub fn get(&self, key: &str) -> Result<&ProductBundle, PlanError> {
        self.find(key)
            .ok_or_else(|| PlanError::UnknownProductKey(key.to_string()))
    }
}
