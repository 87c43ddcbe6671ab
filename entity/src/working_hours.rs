use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Three-letter day codes as stored in the `day` column and exposed in
/// responses.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    #[sea_orm(string_value = "mon")]
    Mon,
    #[sea_orm(string_value = "tue")]
    Tue,
    #[sea_orm(string_value = "wed")]
    Wed,
    #[sea_orm(string_value = "thu")]
    Thu,
    #[sea_orm(string_value = "fri")]
    Fri,
    #[sea_orm(string_value = "sat")]
    Sat,
    #[sea_orm(string_value = "sun")]
    Sun,
}

impl DayOfWeek {
    /// Single source of the weekday -> day-code mapping.
    pub fn from_weekday(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
            chrono::Weekday::Sun => Self::Sun,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "working_hours")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub day: DayOfWeek,
    pub opening_time: Option<Time>,
    pub closing_time: Option<Time>,
    pub farm_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::farms::Entity",
        from = "Column::FarmId",
        to = "super::farms::Column::Id",
        on_delete = "Cascade"
    )]
    Farms,
}

impl Related<super::farms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
