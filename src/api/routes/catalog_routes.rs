//! Catalog Routes
//!
//! 定义目录视图相关的 API 路由。

use crate::api::handlers::catalog_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建目录路由器
pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/models", get(list_models))
        .route("/models/grouped", get(grouped_models))
        .route("/models/tree", get(model_tree))
        .route("/models/facets", get(model_facets))
        .route("/models/:name", get(get_model))
        .route("/view", get(render_view))
}
