pub mod calendar;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod matrix;
pub mod plan;
pub mod product;
pub mod render;
pub mod session;
pub mod task;
pub mod tier;
pub mod timeline;

pub use calendar::{WorkCalendar, WorkCalendarConfig};
pub use chart::{ChartLayout, ChartOptions, Palette};
pub use config::{ConfiguratorConfig, Defaults};
pub use error::{ConfigError, ExportError, PlanError, RegistryError};
pub use export::{save_plan_to_csv, save_plan_to_json, write_plan_csv, write_plan_json};
pub use matrix::{MatrixCell, comparison_matrix, render_matrix};
pub use plan::{Plan, PlanOptions, PlanRequest, TotalWeeks, build_plan, project_end_date};
pub use product::{Module, ProductBundle, ProductRegistry};
pub use render::render_text_chart;
pub use session::{Configurator, PlanListener};
pub use task::{ColorKey, Phase, Task, slugify};
pub use tier::{CustomerTier, TierBand, TierDescriptor, TierRule, TierTable, resolve_tier};
pub use timeline::{Timeline, generate_timeline};
