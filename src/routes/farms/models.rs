use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use upick_entity::working_hours::DayOfWeek;
use upick_entity::{addresses, farm_plants, farms, plant_categories, plants, working_hours};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::common::errors::ApiError;
use crate::services::fees::FeeRange;
use crate::services::hours::evaluate;

/// Optional farm list filters. All are conjunctive; the radius triple is
/// all-or-nothing.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FarmFilterParams {
    /// Keep farms that are currently open (true) or currently closed (false)
    pub is_open: Option<bool>,
    /// Search radius in miles; requires address__lat and address__long
    pub radius: Option<f64>,
    /// Search centre latitude in degrees; requires radius and address__long
    #[serde(rename = "address__lat")]
    pub address_lat: Option<f64>,
    /// Search centre longitude in degrees; requires radius and address__lat
    #[serde(rename = "address__long")]
    pub address_long: Option<f64>,
    /// Minimum entrance fee, inclusive (defaults to 0)
    pub entrance_fee_min: Option<Decimal>,
    /// Maximum entrance fee, inclusive (defaults to unbounded)
    pub entrance_fee_max: Option<Decimal>,
}

impl FarmFilterParams {
    /// The (lat, long, radius) triple, or an error when only part of it
    /// was supplied.
    pub fn radius_query(&self) -> Result<Option<(f64, f64, f64)>, ApiError> {
        match (self.address_lat, self.address_long, self.radius) {
            (None, None, None) => Ok(None),
            (Some(lat), Some(long), Some(radius)) => Ok(Some((lat, long, radius))),
            _ => Err(ApiError::validation(
                "must supply radius, address__lat, and address__long together",
            )),
        }
    }

    pub fn fee_range(&self) -> FeeRange {
        FeeRange::new(self.entrance_fee_min, self.entrance_fee_max)
    }
}

/// Which response shape a farm is projected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmView {
    /// Summary shape: today's working hours only, no plant associations.
    List,
    /// Full shape: the whole week of hours plus every plant association.
    Detail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GeoLocation {
    pub lat: f64,
    pub long: f64,
}

/// Address flattened into its postal fields plus a nested geo point.
#[derive(Debug, Serialize, ToSchema)]
pub struct FarmAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
    pub geo_location: GeoLocation,
}

impl From<addresses::Model> for FarmAddress {
    fn from(model: addresses::Model) -> Self {
        Self {
            street: model.street,
            city: model.city,
            state: model.state,
            country: model.country,
            zip_code: model.zip_code,
            geo_location: GeoLocation {
                lat: model.latitude,
                long: model.longitude,
            },
        }
    }
}

/// One working-hour entry annotated with its computed open flag.
/// `is_open` is null for entries on another day than the reference
/// instant, and for entries whose times are incomplete.
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkingHoursEntry {
    pub day: DayOfWeek,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    pub is_open: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlantCategoryRef {
    pub id: Uuid,
    pub name: String,
}

/// A farm-plant association with the linked plant flattened into it.
#[derive(Debug, Serialize, ToSchema)]
pub struct FarmPlantEntry {
    pub id: Uuid,
    pub title: String,
    pub category: PlantCategoryRef,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub season_start: NaiveDate,
    pub season_end: NaiveDate,
    pub organic: bool,
    pub scientific_name: Option<String>,
    pub country_of_origin: Option<String>,
}

pub fn shape_farm_plant(
    association: farm_plants::Model,
    plant: plants::Model,
    category: plant_categories::Model,
) -> FarmPlantEntry {
    FarmPlantEntry {
        id: association.id,
        title: plant.title,
        category: PlantCategoryRef {
            id: category.id,
            name: category.name,
        },
        image_url: association.image_url,
        description: association.description,
        season_start: association.season_start,
        season_end: association.season_end,
        organic: association.organic,
        scientific_name: plant.scientific_name,
        country_of_origin: plant.country_of_origin,
    }
}

/// Farm response shape shared by the list and detail views.
#[derive(Debug, Serialize, ToSchema)]
pub struct FarmResponse {
    pub id: Uuid,
    pub image_url: Option<String>,
    pub title: String,
    pub working_hours: Vec<WorkingHoursEntry>,
    pub description: Option<String>,
    pub address: Option<FarmAddress>,
    pub entrance_fee: Option<Decimal>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub farm_plants: Vec<FarmPlantEntry>,
}

/// Pure projection of a farm and its related records into a response
/// shape. List mode keeps only same-day hour entries and drops plant
/// associations; detail mode keeps everything.
pub fn shape_farm(
    farm: farms::Model,
    address: Option<addresses::Model>,
    hour_entries: Vec<working_hours::Model>,
    plant_entries: Vec<FarmPlantEntry>,
    view: FarmView,
    at: NaiveDateTime,
) -> FarmResponse {
    let working_hours = hour_entries
        .into_iter()
        .filter_map(|entry| {
            let status = evaluate(&entry, at);
            if view == FarmView::List && !status.is_same_day() {
                return None;
            }
            Some(WorkingHoursEntry {
                day: entry.day,
                opening_time: entry.opening_time,
                closing_time: entry.closing_time,
                is_open: status.flag(),
            })
        })
        .collect();

    FarmResponse {
        id: farm.id,
        image_url: farm.image_url,
        title: farm.title,
        working_hours,
        description: farm.description,
        address: address.map(FarmAddress::from),
        entrance_fee: farm.entrance_fee,
        phone: farm.phone,
        email: farm.email,
        website: farm.website,
        farm_plants: match view {
            FarmView::List => Vec::new(),
            FarmView::Detail => plant_entries,
        },
    }
}
