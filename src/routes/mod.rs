pub mod farms;
pub mod plants;

use crate::common::state::AppState;
use crate::config::Config;
use axum::Router;
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub fn build_router(db: &DatabaseConnection, config: &Config) -> Router {
    #[derive(OpenApi)]
    #[openapi(info(
        title = "UPick API",
        description = "Read-only directory of pick-your-own farms and the plants they offer"
    ))]
    struct ApiDoc;

    let app_state: AppState = AppState {
        db: db.clone(),
        config: config.clone(),
    };

    tracing::debug!(app = %app_state.config.app_name, "building router");

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(crate::common::views::router(&app_state)) // Root routes
        .nest("/api/farms", farms::views::router(&app_state))
        .nest("/api/plants", plants::views::router(&app_state))
        .split_for_parts();

    router.merge(Scalar::with_url("/api/docs", api))
}
