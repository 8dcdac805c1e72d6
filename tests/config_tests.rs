use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;
use timeline_tool::{
    ColorKey, ConfigError, ConfiguratorConfig, RegistryError, TierBand, TotalWeeks,
};

#[test]
fn empty_file_uses_built_in_tables() {
    let config = ConfiguratorConfig::from_toml_str("").unwrap();
    assert_eq!(config.defaults.company_name, "TechCorp Solutions");
    assert_eq!(config.defaults.employee_count, 750);
    assert_eq!(config.defaults.product, "ClearRecruit");
    assert_eq!(config.products.products().len(), 6);
    assert_eq!(config.tiers.rules().len(), 6);
    assert_eq!(config.chart.min_weeks, 25);
    assert!(config.calendar.is_none());
}

#[test]
fn sections_override_defaults() {
    let source = r##"
[defaults]
company_name = "Acme"
employee_count = 1200
product = "Learning Suite"
start_date = "2025-01-06"

[chart]
min_weeks = 40

[palette]
primary = "#101010"

[[products]]
key = "Learning Suite"
modules = ["LMS", "Performance/Goals/Engagement"]
"##;
    let config = ConfiguratorConfig::from_toml_str(source).unwrap();
    assert_eq!(config.defaults.company_name, "Acme");
    assert_eq!(
        config.defaults.start_date,
        NaiveDate::from_ymd_opt(2025, 1, 6)
    );
    assert_eq!(config.chart.min_weeks, 40);
    assert_eq!(config.chart.min_scale_weeks, 30);
    assert_eq!(config.palette.hex(ColorKey::Primary), "#101010");
    assert_eq!(config.palette.hex(ColorKey::Secondary), "#E6E651");
    assert_eq!(config.products.keys().collect::<Vec<_>>(), ["Learning Suite"]);

    let session = config.configurator();
    let plan = session.plan().unwrap();
    assert_eq!(plan.product.key, "Learning Suite");
    assert_eq!(plan.total_weeks, TotalWeeks::Weeks(23));
}

#[test]
fn tier_override_is_validated() {
    let source = r#"
[[tiers]]
band = "Small Business"
min_employees = 1
max_employees = 99
customer_tier = "Small Business"
module_check_ins = 0
weeks_per_module = 0

[[tiers]]
band = "Enterprise-Custom"
min_employees = 100
customer_tier = "Enterprise"
module_check_ins = 8
weeks_per_module = 13
package = "Bespoke"
"#;
    let config = ConfiguratorConfig::from_toml_str(source).unwrap();
    let tier = config.tiers.resolve(150).unwrap();
    assert_eq!(tier.band, TierBand::EnterpriseCustom);
    assert_eq!(tier.package, "Bespoke");

    let broken = source.replace("min_employees = 100", "min_employees = 101");
    assert!(matches!(
        ConfiguratorConfig::from_toml_str(&broken),
        Err(ConfigError::Registry(RegistryError::TierGap { .. }))
    ));
}

#[test]
fn oversized_tier_values_are_rejected() {
    let source = r#"
[[tiers]]
band = "Small Business"
min_employees = 1
max_employees = 99
customer_tier = "Small Business"
module_check_ins = 0
weeks_per_module = 0

[[tiers]]
band = "Enterprise-Custom"
min_employees = 100
customer_tier = "Enterprise"
module_check_ins = 8
weeks_per_module = 13
"#;
    let huge_weeks = source.replace("weeks_per_module = 13", "weeks_per_module = 4294967295");
    assert!(matches!(
        ConfiguratorConfig::from_toml_str(&huge_weeks),
        Err(ConfigError::Registry(RegistryError::WeeksPerModuleTooLarge {
            index: 1,
            weeks: 4294967295,
            ..
        }))
    ));

    let edge_bound = source.replace("max_employees = 99", "max_employees = 9223372036854775807");
    assert!(matches!(
        ConfiguratorConfig::from_toml_str(&edge_bound),
        Err(ConfigError::Registry(RegistryError::TierBoundOverflow(0)))
    ));

    let at_limit = source.replace("weeks_per_module = 13", "weeks_per_module = 520");
    let config = ConfiguratorConfig::from_toml_str(&at_limit).unwrap();
    assert_eq!(config.tiers.resolve(100).unwrap().weeks_per_module, 520);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(
        ConfiguratorConfig::from_toml_str("[palette]\nprimary = \"navy\"\n"),
        Err(ConfigError::Palette { .. })
    ));
    assert!(matches!(
        ConfiguratorConfig::from_toml_str("[palette]\nchartreuse = \"#00ff00\"\n"),
        Err(ConfigError::Palette { .. })
    ));
    assert!(matches!(
        ConfiguratorConfig::from_toml_str("[chart]\nmin_scale_weeks = 0\n"),
        Err(ConfigError::Chart(_))
    ));
    assert!(matches!(
        ConfiguratorConfig::from_toml_str("[unknown]\nkey = 1\n"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        ConfiguratorConfig::from_toml_str("[[products]]\nkey = \"None\"\nmodules = []\n"),
        Err(ConfigError::Registry(RegistryError::NoModules(_)))
    ));
    assert!(matches!(
        ConfiguratorConfig::from_toml_str("[calendar]\nworking_days = []\nholidays = []\n"),
        Err(ConfigError::Calendar(_))
    ));
}

#[test]
fn calendar_section_drives_working_day_projection() {
    // 18 weeks after Monday 2025-01-06 is Monday 2025-05-12, declared a holiday here.
    let source = r#"
[defaults]
start_date = "2025-01-06"
use_working_days = true

[calendar]
working_days = ["Mon", "Tue", "Wed", "Thu", "Fri"]
holidays = ["2025-05-12"]
"#;
    let config = ConfiguratorConfig::from_toml_str(source).unwrap();
    let session = config.configurator();
    assert!(session.use_working_days());
    assert_eq!(
        session.plan().unwrap().end_date,
        NaiveDate::from_ymd_opt(2025, 5, 13)
    );
}

#[test]
fn load_reads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[defaults]\nemployee_count = 50").unwrap();
    let config = ConfiguratorConfig::load(file.path()).unwrap();
    assert_eq!(config.defaults.employee_count, 50);
    assert!(matches!(
        ConfiguratorConfig::load("/nonexistent/timeline-tool.toml"),
        Err(ConfigError::Io(_))
    ));
}
