use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, ModelTrait, Order,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use upick_entity::{farm_plants, farms, plant_categories, plants};

use super::models::{PlantFarmsResponse, PlantFilterParams};
use crate::common::errors::ApiError;
use crate::routes::farms::db::load_farm;
use crate::routes::farms::models::{FarmView, shape_farm_plant};

/// Compose the association filters into one query, ordered by id so
/// offset pagination is stable.
pub fn filtered_associations(params: &PlantFilterParams) -> Select<farm_plants::Entity> {
    let mut query = farm_plants::Entity::find();
    let mut condition = Condition::all();

    if let Some(farm_id) = params.farm {
        condition = condition.add(farm_plants::Column::FarmId.eq(farm_id));
    }
    if let Some(plant_id) = params.plant {
        condition = condition.add(farm_plants::Column::PlantId.eq(plant_id));
    }
    if let Some(category_id) = params.plant_category {
        query = query.join(JoinType::InnerJoin, farm_plants::Relation::Plants.def());
        condition = condition.add(plants::Column::CategoryId.eq(category_id));
    }

    query
        .filter(condition)
        .order_by(farm_plants::Column::Id, Order::Asc)
}

/// Shape one page of associations into plant-centric responses, each
/// carrying its farm as a list-mode summary.
pub async fn load_plant_farms(
    db: &DatabaseConnection,
    associations: Vec<farm_plants::Model>,
    at: NaiveDateTime,
) -> Result<Vec<PlantFarmsResponse>, ApiError> {
    let mut results = Vec::with_capacity(associations.len());
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
        let farm = association
            .find_related(farms::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::Internal {
                message: format!("farm plant {} references a missing farm", association.id),
            })?;

        let plant_farm = load_farm(db, farm, FarmView::List, at).await?;
        results.push(PlantFarmsResponse {
            plant: shape_farm_plant(association, plant, category),
            plant_farm,
        });
    }
    Ok(results)
}
