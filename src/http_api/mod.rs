use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    ChartLayout, Configurator, ConfiguratorConfig, MatrixCell, Plan, PlanError, PlanOptions,
    PlanRequest, ProductBundle, TierDescriptor, TierRule, build_plan, comparison_matrix,
};

#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfiguratorConfig>,
    session: Arc<RwLock<Configurator>>,
}

impl AppState {
    pub fn new(config: ConfiguratorConfig) -> Self {
        let session = config.configurator();
        Self {
            config: Arc::new(config),
            session: Arc::new(RwLock::new(session)),
        }
    }

    fn session(&self) -> Arc<RwLock<Configurator>> {
        self.session.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
}

impl From<PlanError> for ApiError {
    fn from(value: PlanError) -> Self {
        match value {
            PlanError::UnknownProductKey(_) => ApiError::NotFound(value.to_string()),
            PlanError::InvalidEmployeeCount(_) | PlanError::NoMatchingTier(_) => {
                ApiError::Invalid(value.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Serialize)]
struct SessionView {
    request: PlanRequest,
    use_working_days: bool,
}

/// Partial update of the session inputs. Absent fields keep their value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SessionUpdate {
    company_name: Option<String>,
    employee_count: Option<i64>,
    product_key: Option<String>,
    start_date: Option<NaiveDate>,
    clear_start_date: bool,
    use_working_days: Option<bool>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/tiers", get(list_tiers))
        .route("/tier/:employee_count", get(get_tier))
        .route("/plan", post(create_plan))
        .route("/session", get(get_session).put(update_session))
        .route("/session/plan", get(get_session_plan))
        .route("/session/chart", get(get_session_chart))
        .route("/matrix", get(get_matrix))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, config: ConfiguratorConfig) -> std::io::Result<()> {
    let state = AppState::new(config);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "timeline-tool HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_products(State(state): State<AppState>) -> Json<Vec<ProductBundle>> {
    Json(state.config.products.products().to_vec())
}

async fn list_tiers(State(state): State<AppState>) -> Json<Vec<TierRule>> {
    Json(state.config.tiers.rules().to_vec())
}

async fn get_tier(
    State(state): State<AppState>,
    Path(employee_count): Path<i64>,
) -> Result<Json<TierDescriptor>, ApiError> {
    let tier = state.config.tiers.resolve(employee_count)?;
    Ok(Json(tier))
}

async fn create_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<Plan>, ApiError> {
    let plan = build_plan(
        &request,
        &state.config.tiers,
        &state.config.products,
        &PlanOptions::default(),
    )?;
    Ok(Json(plan))
}

async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session();
    let guard = session.read();
    Json(SessionView {
        request: guard.request().clone(),
        use_working_days: guard.use_working_days(),
    })
}

async fn update_session(
    State(state): State<AppState>,
    Json(update): Json<SessionUpdate>,
) -> Result<Json<Plan>, ApiError> {
    let session = state.session();
    let mut guard = session.write();
    let mut request = guard.request().clone();
    if let Some(name) = update.company_name {
        request.company_name = name;
    }
    if let Some(count) = update.employee_count {
        request.employee_count = count;
    }
    if let Some(key) = update.product_key {
        request.product_key = key;
    }
    if update.clear_start_date {
        request.start_date = None;
    } else if let Some(date) = update.start_date {
        request.start_date = Some(date);
    }
    let use_working_days = update
        .use_working_days
        .unwrap_or_else(|| guard.use_working_days());

    let plan = guard.update(request, use_working_days).clone()?;
    Ok(Json(plan))
}

async fn get_session_plan(State(state): State<AppState>) -> Result<Json<Plan>, ApiError> {
    let session = state.session();
    let plan = session.read().current().clone()?;
    Ok(Json(plan))
}

async fn get_session_chart(State(state): State<AppState>) -> Result<Json<ChartLayout>, ApiError> {
    let session = state.session();
    let plan = session.read().current().clone()?;
    let layout = ChartLayout::build(
        &plan.timeline(),
        &state.config.palette,
        &state.config.chart,
    );
    Ok(Json(layout))
}

async fn get_matrix(State(state): State<AppState>) -> Result<Json<Vec<MatrixCell>>, ApiError> {
    let cells = comparison_matrix(&state.config.tiers, &state.config.products)?;
    Ok(Json(cells))
}
