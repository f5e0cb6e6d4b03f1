use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::{
    error::{ErrorBody, ErrorDetail},
    state::AppState,
    users::{
        dto::{Confirmation, PublicUser, UserPayload},
        handlers,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "usersvc", description = "CRUD API for users"),
    paths(
        handlers::list_users,
        handlers::create_user,
        handlers::get_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(UserPayload, PublicUser, Confirmation, ErrorBody, ErrorDetail)),
    tags((name = "users", description = "User management"))
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/apidocs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
