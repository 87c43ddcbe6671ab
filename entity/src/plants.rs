use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub scientific_name: Option<String>,
    pub country_of_origin: Option<String>,
    pub category_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub last_updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::plant_categories::Entity",
        from = "Column::CategoryId",
        to = "super::plant_categories::Column::Id",
        on_delete = "Restrict"
    )]
    PlantCategories,
    #[sea_orm(has_many = "super::farm_plants::Entity")]
    FarmPlants,
}

impl Related<super::plant_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlantCategories.def()
    }
}

impl Related<super::farm_plants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarmPlants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
