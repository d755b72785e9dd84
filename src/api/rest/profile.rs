use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use axum::Router;
use tracing::info;

use crate::error::AppError;
use crate::models::profile::Profile;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

async fn get_profile(State(state): State<Arc<AppState>>) -> Json<Profile> {
    Json(state.profile.read().await.clone())
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Profile>,
) -> Result<Json<Profile>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let mut profile = state.profile.write().await;
    *profile = payload;

    info!("profile updated");
    Ok(Json(profile.clone()))
}
