pub mod addresses;
pub mod farm_plants;
pub mod farms;
pub mod plant_categories;
pub mod plants;
pub mod working_hours;
