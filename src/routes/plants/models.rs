use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::routes::farms::models::{FarmPlantEntry, FarmResponse};

/// Exact-match filters over the farm-plant association collection.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlantFilterParams {
    /// Keep associations whose plant belongs to this category
    #[serde(rename = "plant__category")]
    pub plant_category: Option<Uuid>,
    /// Keep associations for this farm
    pub farm: Option<Uuid>,
    /// Keep associations for this plant
    pub plant: Option<Uuid>,
}

/// Plant-centric shape: the association and plant fields at the top level,
/// with the offering farm nested as a list-mode summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlantFarmsResponse {
    #[serde(flatten)]
    pub plant: FarmPlantEntry,
    pub plant_farm: FarmResponse,
}
