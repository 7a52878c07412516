//! HTTP handlers. Each one validates its input shape, delegates to
//! [`crate::Graph`], and lets [`ApiError`] pick the status code.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::error::ApiError;
use super::types::{
    CreateCompoundRequest, CreateReactionRequest, HealthResponse, PathParams, SearchParams,
    SuggestParams,
};
use super::AppState;
use crate::model::{property_map_from_json, Compound, PathRecord, ReactionEdge};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// `GET /health`
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    let health = state.graph.health().await?;
    Ok(Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        compounds: health.compounds,
        reactions: health.reactions,
    }))
}

/// `GET /compounds?search=`
pub async fn list_compounds(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Vec<Compound>> {
    let Query(params) = params?;
    let needle = params.search.unwrap_or_default();
    Ok(Json(state.graph.search_compounds(&needle).await?))
}

/// `POST /compounds`
pub async fn create_compound(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateCompoundRequest>, JsonRejection>,
) -> ApiResult<Compound> {
    let Json(req) = body?;
    let formula = req.formula.clone();
    let props = property_map_from_json(req.into_properties())?;
    Ok(Json(state.graph.upsert_compound(&formula, props).await?))
}

/// `GET /compounds/suggestions?prefix=&limit=`
pub async fn compound_suggestions(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SuggestParams>, QueryRejection>,
) -> ApiResult<Vec<Compound>> {
    let Query(params) = params?;
    Ok(Json(state.graph.suggest_compounds(&params.prefix, params.limit).await?))
}

/// `GET /compounds/{formula}`
pub async fn get_compound(
    State(state): State<Arc<AppState>>,
    Path(formula): Path<String>,
) -> ApiResult<Compound> {
    Ok(Json(state.graph.get_compound(&formula).await?))
}

/// `GET /compounds/{formula}/reactions`
pub async fn compound_reactions(
    State(state): State<Arc<AppState>>,
    Path(formula): Path<String>,
) -> ApiResult<Vec<ReactionEdge>> {
    Ok(Json(state.graph.outgoing(&formula).await?))
}

/// `POST /reactions`
pub async fn create_reaction(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateReactionRequest>, JsonRejection>,
) -> ApiResult<ReactionEdge> {
    let Json(req) = body?;
    let props = property_map_from_json(req.conditions)?;
    let edge = match req.id.as_deref() {
        Some(id) => state.graph.add_reaction_with_id(id, &req.reactant, &req.product, props).await?,
        None => state.graph.add_reaction(&req.reactant, &req.product, props).await?,
    };
    Ok(Json(edge))
}

/// `GET /paths?start=&end=&max_steps=`
///
/// No route between the compounds is an empty list, not an error.
pub async fn find_paths(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PathParams>, QueryRejection>,
) -> ApiResult<Vec<PathRecord>> {
    let Query(params) = params?;
    let paths = state.graph.find_paths(&params.start, &params.end, params.max_steps).await?;
    Ok(Json(paths))
}
