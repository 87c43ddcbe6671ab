use super::db;
use super::models::{PlantFarmsResponse, PlantFilterParams};
use crate::common::errors::ApiError;
use crate::common::pagination::{ListEnvelope, Pagination};
use crate::common::state::AppState;
use axum::{
    Json,
    extract::{OriginalUri, Query, State},
};
use sea_orm::{DatabaseConnection, PaginatorTrait, QuerySelect};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_all_plants))
        .with_state(state.db.clone())
}

#[utoipa::path(
    get,
    path = "/",
    params(PlantFilterParams, Pagination),
    responses(
        (status = OK, description = "Paginated plant offerings", body = ListEnvelope<PlantFarmsResponse>),
        (status = BAD_REQUEST, description = "Invalid filter parameters")
    ),
    operation_id = "get_all_plants",
    summary = "List plant offerings",
    description = "Paginated farm-plant associations, filterable by plant, category, \
                   and farm. Each result surfaces the plant's fields alongside the \
                   offering farm as a summary."
)]
pub async fn get_all_plants(
    State(db): State<DatabaseConnection>,
    OriginalUri(uri): OriginalUri,
    Query(filters): Query<PlantFilterParams>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ListEnvelope<PlantFarmsResponse>>, ApiError> {
    let now = chrono::Local::now().naive_local();

    let query = db::filtered_associations(&filters);
    let count = query.clone().count(&db).await?;
    let page = query
        .offset(pagination.offset())
        .limit(pagination.page_size())
        .all(&db)
        .await?;
    let results = db::load_plant_farms(&db, page, now).await?;

    Ok(Json(ListEnvelope::new(&uri, pagination, count, results)))
}
