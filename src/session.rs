//! Host-side configurator state.
//!
//! The generator itself is stateless. `Configurator` holds the inputs the
//! user is editing and rebuilds the plan synchronously on every change, then
//! hands the new result to any registered listeners.

use crate::calendar::WorkCalendar;
use crate::error::PlanError;
use crate::plan::{Plan, PlanOptions, PlanRequest, build_plan};
use crate::product::ProductRegistry;
use crate::tier::TierTable;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

pub type PlanListener = Box<dyn Fn(&Result<Plan, PlanError>) + Send + Sync>;

pub struct Configurator {
    tiers: Arc<TierTable>,
    registry: Arc<ProductRegistry>,
    request: PlanRequest,
    use_working_days: bool,
    calendar: Option<WorkCalendar>,
    current: Result<Plan, PlanError>,
    listeners: Vec<PlanListener>,
}

impl Configurator {
    pub fn new(
        tiers: Arc<TierTable>,
        registry: Arc<ProductRegistry>,
        request: PlanRequest,
    ) -> Self {
        let current = Self::compute(&tiers, &registry, &request, false, None);
        Self {
            tiers,
            registry,
            request,
            use_working_days: false,
            calendar: None,
            current,
            listeners: Vec::new(),
        }
    }

    pub fn with_defaults(request: PlanRequest) -> Self {
        Self::new(
            Arc::new(TierTable::default()),
            Arc::new(ProductRegistry::default()),
            request,
        )
    }

    pub fn request(&self) -> &PlanRequest {
        &self.request
    }

    pub fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn use_working_days(&self) -> bool {
        self.use_working_days
    }

    /// Latest computation. A newer input change always replaces it.
    pub fn current(&self) -> &Result<Plan, PlanError> {
        &self.current
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.current.as_ref().ok()
    }

    pub fn subscribe(&mut self, listener: PlanListener) {
        self.listeners.push(listener);
    }

    pub fn set_employee_count(&mut self, employee_count: i64) -> &Result<Plan, PlanError> {
        self.request.employee_count = employee_count;
        self.recompute()
    }

    pub fn set_product(&mut self, product_key: impl Into<String>) -> &Result<Plan, PlanError> {
        self.request.product_key = product_key.into();
        self.recompute()
    }

    pub fn set_start_date(&mut self, start_date: Option<NaiveDate>) -> &Result<Plan, PlanError> {
        self.request.start_date = start_date;
        self.recompute()
    }

    pub fn set_company_name(&mut self, name: impl Into<String>) -> &Result<Plan, PlanError> {
        self.request.company_name = name.into();
        self.recompute()
    }

    pub fn set_use_working_days(&mut self, enabled: bool) -> &Result<Plan, PlanError> {
        self.use_working_days = enabled;
        self.recompute()
    }

    /// Calendar used when working days are enabled. Without one, weekends and
    /// US federal holidays covering the projection are used.
    pub fn set_calendar(&mut self, calendar: Option<WorkCalendar>) -> &Result<Plan, PlanError> {
        self.calendar = calendar;
        self.recompute()
    }

    /// Replaces every input at once and recomputes a single time.
    pub fn update(
        &mut self,
        request: PlanRequest,
        use_working_days: bool,
    ) -> &Result<Plan, PlanError> {
        self.request = request;
        self.use_working_days = use_working_days;
        self.recompute()
    }

    fn recompute(&mut self) -> &Result<Plan, PlanError> {
        self.current = Self::compute(
            &self.tiers,
            &self.registry,
            &self.request,
            self.use_working_days,
            self.calendar.as_ref(),
        );
        for listener in &self.listeners {
            listener(&self.current);
        }
        &self.current
    }

    fn compute(
        tiers: &TierTable,
        registry: &ProductRegistry,
        request: &PlanRequest,
        use_working_days: bool,
        calendar: Option<&WorkCalendar>,
    ) -> Result<Plan, PlanError> {
        let working_calendar = match (use_working_days, request.start_date, calendar) {
            (true, Some(_), Some(calendar)) => Some(calendar.clone()),
            (true, Some(start), None) => Some(WorkCalendar::for_projection(
                start,
                max_plan_weeks(tiers, registry),
            )),
            _ => None,
        };
        let options = PlanOptions { working_calendar };
        let result = build_plan(request, tiers, registry, &options);
        match &result {
            Ok(plan) => debug!(
                employee_count = request.employee_count,
                product = %request.product_key,
                total = %plan.total_weeks,
                "plan recomputed"
            ),
            Err(err) => warn!(error = %err, "plan rejected"),
        }
        result
    }
}

/// Upper bound on any plan length this table and registry can produce; sizes
/// the holiday calendar for end-date projection.
fn max_plan_weeks(tiers: &TierTable, registry: &ProductRegistry) -> u32 {
    let weeks = tiers
        .rules()
        .iter()
        .map(|rule| rule.weeks_per_module)
        .max()
        .unwrap_or(0);
    let modules = registry
        .products()
        .iter()
        .map(|p| p.module_count())
        .max()
        .unwrap_or(0) as u32;
    // kickoff/requirements + modules + rollout + go-live
    modules
        .saturating_add(1)
        .saturating_mul(weeks)
        .saturating_add(3)
}
