use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{dto::MessageResponse, AuthUser},
    error::ApiError,
    state::AppState,
    users::dto::{PublicUser, UpdateUserRequest},
};

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn require_owner(caller: &AuthUser, id: i64) -> Result<(), ApiError> {
    if caller.id != id {
        warn!(caller_id = caller.id, target_id = id, "identity mismatch");
        return Err(ApiError::Unauthorized);
    }
    Ok(())
}

#[instrument(skip_all, fields(caller_id = caller.id))]
pub async fn list_users(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.store.list().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip_all, fields(caller_id = caller.id))]
pub async fn get_user(
    State(state): State<AppState>,
    caller: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PublicUser>, ApiError> {
    let Path(id) = id?;
    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}

#[instrument(skip_all, fields(caller_id = caller.id))]
pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    require_owner(&caller, id)?;

    let Json(payload) = payload?;
    let update = payload.validate()?;

    if !state
        .store
        .update_profile(id, &update.name, &update.email)
        .await?
    {
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!(user_id = id, "user updated");
    Ok(Json(MessageResponse::new("User updated successfully")))
}

#[instrument(skip_all, fields(caller_id = caller.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    caller: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    require_owner(&caller, id)?;

    if !state.store.delete(id).await? {
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!(user_id = id, "user deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
