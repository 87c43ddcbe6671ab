use crate::common::errors::ApiError;

/// Approximate miles spanned by one degree of latitude.
const MILES_PER_DEGREE: f64 = 69.0;

/// Longitude degrees shrink towards the poles; below this cosine the
/// bounding box degenerates and the query is rejected.
const MIN_ABS_COS_LAT: f64 = 1e-6;

/// Rectangular lat/long approximation of a circular search radius.
///
/// This is a flat-earth approximation, not great-circle distance. It is
/// fine for the short-range local-search queries this API serves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

/// Convert a (latitude, longitude, radius-in-miles) query into a bounding
/// box of inclusive lat/long ranges.
pub fn bounding_box(lat: f64, long: f64, radius_miles: f64) -> Result<BoundingBox, ApiError> {
    if !radius_miles.is_finite() || radius_miles <= 0.0 {
        return Err(ApiError::validation("radius must be a positive number"));
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&long) {
        return Err(ApiError::validation(
            "address__lat must be within [-90, 90] and address__long within [-180, 180]",
        ));
    }

    let cos_lat = lat.to_radians().cos().abs();
    if cos_lat < MIN_ABS_COS_LAT {
        return Err(ApiError::validation(
            "address__lat is too close to a pole for a radius search",
        ));
    }

    let lat_delta = radius_miles / MILES_PER_DEGREE;
    let lon_delta = radius_miles / (MILES_PER_DEGREE * cos_lat);

    Ok(BoundingBox {
        lat_min: lat - lat_delta,
        lat_max: lat + lat_delta,
        lon_min: long - lon_delta,
        lon_max: long + lon_delta,
    })
}
