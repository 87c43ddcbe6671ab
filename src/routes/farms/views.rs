use super::db;
use super::models::{FarmFilterParams, FarmResponse};
use crate::common::errors::ApiError;
use crate::common::pagination::{ListEnvelope, Pagination};
use crate::common::state::AppState;
use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
};
use sea_orm::{DatabaseConnection, PaginatorTrait, QuerySelect};
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_all_farms))
        .routes(routes!(get_one_farm))
        .with_state(state.db.clone())
}

#[utoipa::path(
    get,
    path = "/",
    params(FarmFilterParams, Pagination),
    responses(
        (status = OK, description = "Paginated farm list", body = ListEnvelope<FarmResponse>),
        (status = BAD_REQUEST, description = "Invalid filter parameters")
    ),
    operation_id = "get_all_farms",
    summary = "List farms",
    description = "Paginated farm summaries. Optional filters: currently open/closed, \
                   radius search around a coordinate, and entrance-fee range. Summaries \
                   carry only today's working hours."
)]
pub async fn get_all_farms(
    State(db): State<DatabaseConnection>,
    OriginalUri(uri): OriginalUri,
    Query(filters): Query<FarmFilterParams>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ListEnvelope<FarmResponse>>, ApiError> {
    let now = chrono::Local::now().naive_local();

    let query = db::filtered_farms(&db, &filters, now).await?;
    let count = query.clone().count(&db).await?;
    let page = query
        .offset(pagination.offset())
        .limit(pagination.page_size())
        .all(&db)
        .await?;
    let results = db::load_farm_summaries(&db, page, now).await?;

    Ok(Json(ListEnvelope::new(&uri, pagination, count, results)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Farm ID")),
    responses(
        (status = OK, description = "Farm detail", body = FarmResponse),
        (status = NOT_FOUND, description = "Farm not found")
    ),
    operation_id = "get_one_farm",
    summary = "Get one farm",
    description = "Full farm detail: the whole week of working hours, each entry \
                   annotated with its open flag, plus every plant the farm offers."
)]
pub async fn get_one_farm(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<FarmResponse>, ApiError> {
    let now = chrono::Local::now().naive_local();
    Ok(Json(db::get_farm_detail(&db, id, now).await?))
}
