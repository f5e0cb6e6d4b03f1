use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{AppError, ErrorBody},
    extractors::{JsonBody, UserId},
    state::AppState,
    users::{
        dto::{Confirmation, PublicUser, UserPayload},
        services::prepare_user,
    },
};

pub fn collection_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user))
}

pub fn item_routes() -> Router<AppState> {
    Router::new().route(
        "/user/:id",
        get(get_user).put(update_user).delete(delete_user),
    )
}

/// Getting all the users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Every stored user; passwords are never returned",
            body = Vec<PublicUser>),
        (status = 503, description = "Storage unavailable", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

/// Creating the user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User created", body = Confirmation,
            headers(("location" = String, description = "Path of the created user"))),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody),
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let new = prepare_user(payload)?;
    let user = state.users.insert(new).await?;

    info!(user_id = user.id, "user created");
    Ok((
        StatusCode::OK,
        [(header::LOCATION, format!("/user/{}", user.id))],
        Json(Confirmation::created(user.id)),
    ))
}

/// Getting the user based on id
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "ID of User (type any number)")),
    responses(
        (status = 200, description = "Returns the user based on id, without its password",
            body = PublicUser),
        (status = 400, description = "Id is not a positive integer", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<PublicUser>, AppError> {
    match state.users.get(id).await? {
        Some(user) => Ok(Json(user.into())),
        None => {
            warn!(user_id = id, "user not found");
            Err(AppError::user_not_found(id))
        }
    }
}

/// Updating the user; all three fields are overwritten
#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "ID of User (type any number)")),
    request_body = UserPayload,
    responses(
        (status = 201, description = "User Updated", body = Confirmation),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let new = prepare_user(payload)?;
    match state.users.update(id, new).await? {
        Some(user) => {
            info!(user_id = user.id, "user updated");
            Ok((StatusCode::CREATED, Json(Confirmation::updated(user.id))))
        }
        None => {
            warn!(user_id = id, "update of unknown user");
            Err(AppError::user_not_found(id))
        }
    }
}

/// Deleting the user based on id
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "ID of User (type any number)")),
    responses(
        (status = 200, description = "Returns the deleted user, without its password", body = PublicUser),
        (status = 400, description = "Id is not a positive integer", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<PublicUser>, AppError> {
    match state.users.delete(id).await? {
        Some(user) => {
            info!(user_id = user.id, "user deleted");
            Ok(Json(user.into()))
        }
        None => {
            warn!(user_id = id, "delete of unknown user");
            Err(AppError::user_not_found(id))
        }
    }
}
