use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::{debug, warn};

use crate::{
    api::{app_state::AppState, dto::catalog_dto::*},
    error::AppError,
    services::catalog_view::ViewOutput,
};

pub async fn list_models(
    State(state): State<AppState>,
    Query(params): Query<CatalogQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = state.catalog_service.defaults();
    let spec = params.filter_spec()?;
    let sort = params.sort_order(defaults.default_sort)?;
    debug!("List models: filter={:?}, sort={}", spec, sort);

    let start_time = std::time::Instant::now();
    let models = state.catalog_service.sorted(&spec, sort);
    let took_ms = start_time.elapsed().as_millis() as u64;

    Ok(Json(ModelListResponse {
        matched: models.len(),
        models: models.to_vec(),
        total: state.catalog_service.total(),
        sort,
        took_ms,
    }))
}

pub async fn grouped_models(
    State(state): State<AppState>,
    Query(params): Query<CatalogQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = state.catalog_service.defaults();
    let spec = params.filter_spec()?;
    let sort = params.sort_order(defaults.default_sort)?;
    let group_by = params.group_key(defaults.default_group)?;
    debug!("Group models: filter={:?}, sort={}, group_by={}", spec, sort, group_by);

    let matched = state.catalog_service.filtered(&spec).len();
    let groups = state.catalog_service.grouped(&spec, sort, group_by);

    Ok(Json(GroupedResponse::from_groups(
        &groups, group_by, sort, matched,
    )))
}

pub async fn model_tree(
    State(state): State<AppState>,
    Query(params): Query<CatalogQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = state.catalog_service.defaults();
    let spec = params.filter_spec()?;
    let sort = params.sort_order(defaults.default_sort)?;
    debug!("Model tree: filter={:?}, sort={}", spec, sort);

    let matched = state.catalog_service.filtered(&spec).len();
    let tree = state.catalog_service.tree(&spec, sort);
    if !tree.dropped.is_empty() {
        warn!(
            "{} model(s) left out of the tree, parent not in the same company/status: {}",
            tree.dropped.len(),
            tree.dropped.join(", ")
        );
    }

    Ok(Json(TreeResponse {
        nodes: tree.nodes.clone(),
        dropped: tree.dropped.clone(),
        matched,
    }))
}

pub async fn model_facets(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let facets = state.catalog_service.facets();
    Ok(Json((*facets).clone()))
}

pub async fn get_model(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Get model: {}", name);

    let model = state
        .catalog_service
        .find(&name)
        .ok_or_else(|| AppError::NotFound(format!("Model not found: {}", name)))?;
    let children = state.catalog_service.children_of(&name);

    Ok(Json(ModelDetailResponse { model, children }))
}

pub async fn render_view(
    State(state): State<AppState>,
    Query(params): Query<CatalogQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = state.catalog_service.defaults();
    let request = params.view_request(
        defaults.default_sort,
        defaults.default_group,
        defaults.default_mode,
    )?;
    debug!("Render view: {:?}", request);

    let output: ViewOutput = state.catalog_service.render(&request);
    Ok(Json(output))
}
