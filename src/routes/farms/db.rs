use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, ModelTrait, Order,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use upick_entity::working_hours::DayOfWeek;
use upick_entity::{addresses, farm_plants, farms, plant_categories, plants, working_hours};
use uuid::Uuid;

use super::models::{
    FarmFilterParams, FarmPlantEntry, FarmResponse, FarmView, shape_farm, shape_farm_plant,
};
use crate::common::errors::ApiError;
use crate::services::geo;
use crate::services::hours::{OpenStatus, evaluate};

/// Compose the optional filters into one query over the farm collection,
/// ordered by id so offset pagination is stable.
pub async fn filtered_farms(
    db: &DatabaseConnection,
    params: &FarmFilterParams,
    at: NaiveDateTime,
) -> Result<Select<farms::Entity>, ApiError> {
    let mut query = farms::Entity::find();
    let mut condition = Condition::all();

    if let Some((lat, long, radius)) = params.radius_query()? {
        let bbox = geo::bounding_box(lat, long, radius)?;
        query = query.join(JoinType::InnerJoin, farms::Relation::Addresses.def());
        condition = condition
            .add(addresses::Column::Latitude.gte(bbox.lat_min))
            .add(addresses::Column::Latitude.lte(bbox.lat_max))
            .add(addresses::Column::Longitude.gte(bbox.lon_min))
            .add(addresses::Column::Longitude.lte(bbox.lon_max));
    }

    let fee_range = params.fee_range();
    if !fee_range.is_unbounded() {
        let (min, max) = fee_range.bounds();
        // Null stored fees count as free
        let fee: SimpleExpr = Func::coalesce([
            Expr::col((farms::Entity, farms::Column::EntranceFee)).into(),
            Expr::val(Decimal::ZERO).into(),
        ])
        .into();
        condition = condition
            .add(Expr::expr(fee.clone()).gte(min))
            .add(Expr::expr(fee).lte(max));
    }

    if let Some(want_open) = params.is_open {
        let ids = open_status_farm_ids(db, want_open, at).await?;
        condition = condition.add(farms::Column::Id.is_in(ids));
    }

    Ok(query
        .filter(condition)
        .order_by(farms::Column::Id, Order::Asc))
}

/// Farms with at least one same-day entry whose evaluated status matches
/// the requested open flag. Entries for other days or with incomplete
/// times match neither value.
async fn open_status_farm_ids(
    db: &DatabaseConnection,
    want_open: bool,
    at: NaiveDateTime,
) -> Result<Vec<Uuid>, ApiError> {
    let today = DayOfWeek::from_weekday(at.weekday());
    let entries = working_hours::Entity::find()
        .filter(working_hours::Column::Day.eq(today))
        .all(db)
        .await?;

    let mut ids: Vec<Uuid> = entries
        .iter()
        .filter(|entry| match evaluate(entry, at) {
            OpenStatus::Open => want_open,
            OpenStatus::Closed => !want_open,
            OpenStatus::OtherDay | OpenStatus::Unknown => false,
        })
        .map(|entry| entry.farm_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// Shape one page of farms into list-mode responses.
pub async fn load_farm_summaries(
    db: &DatabaseConnection,
    farm_models: Vec<farms::Model>,
    at: NaiveDateTime,
) -> Result<Vec<FarmResponse>, ApiError> {
    let mut results = Vec::with_capacity(farm_models.len());
    for farm in farm_models {
        results.push(load_farm(db, farm, FarmView::List, at).await?);
    }
    Ok(results)
}

/// Fetch a farm's related records and project it into the given view.
pub async fn load_farm(
    db: &DatabaseConnection,
    farm: farms::Model,
    view: FarmView,
    at: NaiveDateTime,
) -> Result<FarmResponse, ApiError> {
    let address = farm.find_related(addresses::Entity).one(db).await?;
    let hour_entries = farm.find_related(working_hours::Entity).all(db).await?;
    let plant_entries = match view {
        FarmView::List => Vec::new(),
        FarmView::Detail => load_farm_plant_entries(db, &farm).await?,
    };
    Ok(shape_farm(
        farm,
        address,
        hour_entries,
        plant_entries,
        view,
        at,
    ))
}

pub async fn get_farm_detail(
    db: &DatabaseConnection,
    id: Uuid,
    at: NaiveDateTime,
) -> Result<FarmResponse, ApiError> {
    let farm = farms::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("farm", id))?;
    load_farm(db, farm, FarmView::Detail, at).await
}

async fn load_farm_plant_entries(
    db: &DatabaseConnection,
    farm: &farms::Model,
) -> Result<Vec<FarmPlantEntry>, ApiError> {
    let associations = farm.find_related(farm_plants::Entity).all(db).await?;
    let mut entries = Vec::with_capacity(associations.len());
    for association in associations {
        let plant = association
            .find_related(plants::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::Internal {
                message: format!("farm plant {} references a missing plant", association.id),
            })?;
        let category = plant
            .find_related(plant_categories::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::Internal {
                message: format!("plant {} references a missing category", plant.id),
            })?;
        entries.push(shape_farm_plant(association, plant, category));
    }
    Ok(entries)
}
