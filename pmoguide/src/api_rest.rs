//! Endpoints API REST pour le guide TV
//!
//! Ce module définit les handlers HTTP pour accéder aux groupes de chaînes,
//! aux chaînes d'un groupe et au programme courant/suivant d'une chaîne.

use crate::catalog::Catalog;
use crate::error::Error;
use crate::models::{ChannelListing, Group, ProgramWindow};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;

/// État partagé pour les handlers du guide TV
#[derive(Clone)]
pub struct TvGuideState {
    pub catalog: Arc<Catalog>,
}

impl TvGuideState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

// ============ Gestion des erreurs ============

/// Domain errors mapped onto HTTP statuses
///
/// Not-found replies carry an empty body; anything else means the dataset
/// invariants are broken and surfaces as a 500.
pub struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_not_found() {
            StatusCode::NOT_FOUND.into_response()
        } else {
            tracing::error!("TV guide request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

/// Query flag for `/group/{id}/channel`
///
/// Presence of `withProgram` is what matters; the value is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LineupQuery {
    #[serde(rename = "withProgram")]
    with_program: Option<String>,
}

impl LineupQuery {
    fn with_program(&self) -> bool {
        self.with_program.is_some()
    }
}

/// Crée le router pour l'API du guide TV
pub fn create_router(state: TvGuideState) -> Router {
    Router::new()
        .route("/group", get(get_groups))
        .route("/group/{id}/channel", get(get_group_channels))
        .route("/channel/{id}/program", get(get_channel_program))
        .with_state(state)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /group
/// Returns every group label, with the synthetic "all" group first
#[utoipa::path(
    get,
    path = "/group",
    responses(
        (status = 200, description = "Liste ordonnée des groupes", body = [Group])
    ),
    tag = "TV Guide"
)]
pub async fn get_groups(State(state): State<TvGuideState>) -> Json<Vec<Group>> {
    Json(state.catalog.groups())
}

/// GET /group/{id}/channel
/// Returns the channels of a group; `?withProgram` adds the resolved window
#[utoipa::path(
    get,
    path = "/group/{id}/channel",
    params(
        ("id" = String, Path, description = "Label du groupe, ou \"all\""),
        ("withProgram" = Option<String>, Query, description = "Inclure le programme courant/suivant")
    ),
    responses(
        (status = 200, description = "Chaînes du groupe", body = [ChannelListing]),
        (status = 404, description = "Groupe sans chaînes")
    ),
    tag = "TV Guide"
)]
pub async fn get_group_channels(
    State(state): State<TvGuideState>,
    Path(id): Path<String>,
    Query(query): Query<LineupQuery>,
) -> Result<Json<Vec<ChannelListing>>, ApiError> {
    let now = Local::now().naive_local();
    let listings = state
        .catalog
        .group_channels(&id, now, query.with_program())?;
    Ok(Json(listings))
}

/// GET /channel/{id}/program
/// Returns the resolved current/next window for one channel
#[utoipa::path(
    get,
    path = "/channel/{id}/program",
    params(
        ("id" = String, Path, description = "Identifiant de la chaîne")
    ),
    responses(
        (status = 200, description = "Programme courant et suivant", body = ProgramWindow),
        (status = 404, description = "Chaîne inconnue")
    ),
    tag = "TV Guide"
)]
pub async fn get_channel_program(
    State(state): State<TvGuideState>,
    Path(id): Path<String>,
) -> Result<Json<ProgramWindow>, ApiError> {
    let now = Local::now().naive_local();
    let window = state.catalog.channel_program(&id, now)?;
    Ok(Json(window))
}
