use thiserror::Error;

/// Failures of a single plan computation. Generation is all-or-nothing: when
/// one of these is returned no task list was produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("employee count must be a positive integer (got {0})")]
    InvalidEmployeeCount(i64),

    #[error("unknown product key '{0}'")]
    UnknownProductKey(String),

    #[error("tier table has no rule for employee count {0}")]
    NoMatchingTier(i64),
}

/// Problems found while validating a tier table or product registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tier table is empty")]
    EmptyTierTable,

    #[error("tier table must start at 1 employee (first rule starts at {0})")]
    TierTableStart(i64),

    #[error("tier rule {index} starts at {found}, expected {expected}")]
    TierGap {
        index: usize,
        expected: i64,
        found: i64,
    },

    #[error("tier rule {index} has max {max} below its min {min}")]
    TierInverted { index: usize, min: i64, max: i64 },

    #[error("only the last tier rule may be unbounded (rule {0})")]
    UnboundedTierNotLast(usize),

    #[error("last tier rule must be unbounded")]
    BoundedLastTier,

    #[error("tier rule {0} has zero weeks per module but is not a self-paced band")]
    ZeroWeeksNotSelfPaced(usize),

    #[error("tier rule {index} has {weeks} weeks per module, more than the {max} allowed")]
    WeeksPerModuleTooLarge { index: usize, weeks: u32, max: u32 },

    #[error("tier rule {0} ends at the largest employee count, leaving no room for the next rule")]
    TierBoundOverflow(usize),

    #[error("product registry is empty")]
    EmptyRegistry,

    #[error("product key must not be empty")]
    EmptyProductKey,

    #[error("duplicate product key '{0}'")]
    DuplicateProductKey(String),

    #[error("product '{0}' has no modules")]
    NoModules(String),

    #[error("product '{key}' lists module '{module}' more than once")]
    DuplicateModule { key: String, module: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid palette colour '{value}' for {key}")]
    Palette { key: String, value: String },

    #[error("invalid chart option: {0}")]
    Chart(String),

    #[error("invalid work calendar: {0}")]
    Calendar(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
