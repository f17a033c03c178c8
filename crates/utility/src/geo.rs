use std::f64::consts::FRAC_PI_2;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Scale between degrees and the fixed-point representation used by map views.
pub const MICRO_DEGREES_PER_DEGREE: f64 = 1_000_000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Converts degrees to micro-degrees. Truncates toward zero, never rounds.
pub fn to_micro_degrees(degrees: f64) -> i32 {
    (degrees * MICRO_DEGREES_PER_DEGREE) as i32
}

pub fn from_micro_degrees(micro_degrees: i32) -> f64 {
    micro_degrees as f64 / MICRO_DEGREES_PER_DEGREE
}

/// A point in degrees. Latitude and longitude only ever exist together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// Fixed-point map coordinate (degrees * 1E6).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude_e6: i32,
    pub longitude_e6: i32,
}

impl GeoPoint {
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            latitude_e6: to_micro_degrees(coordinate.latitude),
            longitude_e6: to_micro_degrees(coordinate.longitude),
        }
    }

    pub fn to_coordinate(self) -> Coordinate {
        Coordinate::new(
            from_micro_degrees(self.latitude_e6),
            from_micro_degrees(self.longitude_e6),
        )
    }
}

/// Smallest axis-aligned box enclosing a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Degenerate box around a single coordinate.
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            min_latitude: coordinate.latitude,
            max_latitude: coordinate.latitude,
            min_longitude: coordinate.longitude,
            max_longitude: coordinate.longitude,
        }
    }

    pub fn extend(&mut self, coordinate: Coordinate) {
        if coordinate.latitude < self.min_latitude {
            self.min_latitude = coordinate.latitude;
        }
        if coordinate.latitude > self.max_latitude {
            self.max_latitude = coordinate.latitude;
        }
        if coordinate.longitude < self.min_longitude {
            self.min_longitude = coordinate.longitude;
        }
        if coordinate.longitude > self.max_longitude {
            self.max_longitude = coordinate.longitude;
        }
    }

    /// Bounds are seeded from the first coordinate, not from zero, so sets far
    /// from the origin are not pulled towards it. `None` for an empty input.
    pub fn enclosing<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut coordinates = coordinates.into_iter();
        let mut bounds = Self::from_coordinate(coordinates.next()?);
        for coordinate in coordinates {
            bounds.extend(coordinate);
        }
        Some(bounds)
    }

    /// Midpoint of both axes. Not the centroid of the enclosed points.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_latitude + self.max_latitude) / 2.0,
            (self.min_longitude + self.max_longitude) / 2.0,
        )
    }

    /// Bounds are inclusive. A box reaching past ±180° longitude wraps around
    /// the antimeridian.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        let longitudes = self.min_longitude..=self.max_longitude;
        (self.min_latitude..=self.max_latitude).contains(&coordinate.latitude)
            && [0.0, 360.0, -360.0]
                .iter()
                .any(|shift| longitudes.contains(&(coordinate.longitude + shift)))
    }
}

/// Search window around a point. The longitude bounds may reach past ±180°,
/// which [`BoundingBox::contains`] wraps. A window covering a pole spans all
/// longitudes.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_rad = to_radians(lat);
    let lon_rad = to_radians(lon);

    // Latitude bounds
    let min_lat = lat_rad - radius_km / EARTH_RADIUS_KM;
    let max_lat = lat_rad + radius_km / EARTH_RADIUS_KM;

    if min_lat <= -FRAC_PI_2 || max_lat >= FRAC_PI_2 {
        return BoundingBox {
            min_latitude: to_degrees(min_lat).max(-90.0),
            max_latitude: to_degrees(max_lat).min(90.0),
            min_longitude: -180.0,
            max_longitude: 180.0,
        };
    }

    // Longitude bounds (adjusted by latitude)
    let lon_delta = radius_km / (EARTH_RADIUS_KM * lat_rad.cos());
    let min_lon = lon_rad - lon_delta;
    let max_lon = lon_rad + lon_delta;

    BoundingBox {
        min_latitude: to_degrees(min_lat),
        max_latitude: to_degrees(max_lat),
        min_longitude: to_degrees(min_lon),
        max_longitude: to_degrees(max_lon),
    }
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micro_degrees_truncate_toward_zero() {
        assert_eq!(to_micro_degrees(1.5), 1_500_000);
        assert_eq!(to_micro_degrees(0.0000009), 0);
        assert_eq!(to_micro_degrees(-0.0000009), 0);
        assert_eq!(to_micro_degrees(-0.0000019), -1);
    }

    #[test]
    fn enclosing_empty_is_none() {
        assert_eq!(BoundingBox::enclosing(Vec::<Coordinate>::new()), None);
    }

    #[test]
    fn enclosing_negative_coordinates_is_not_pulled_to_origin() {
        let bounds = BoundingBox::enclosing([
            Coordinate::new(-37.80, 144.96),
            Coordinate::new(-37.82, 144.90),
        ])
        .unwrap();
        assert_eq!(bounds.max_latitude, -37.80);
        assert_eq!(bounds.min_latitude, -37.82);
        assert_eq!(bounds.min_longitude, 144.90);
        assert_eq!(bounds.max_longitude, 144.96);
    }

    #[test]
    fn center_is_box_midpoint_not_centroid() {
        let bounds = BoundingBox::enclosing([
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 10.0),
        ])
        .unwrap();
        assert_eq!(bounds.center(), Coordinate::new(5.0, 5.0));
    }

    #[test]
    fn haversine_melbourne_cbd() {
        // Flinders Street to Melbourne Central, roughly a kilometre.
        let distance = haversine_distance(-37.8183, 144.9671, -37.8102, 144.9628);
        assert!((0.9..1.2).contains(&distance), "{}", distance);
    }

    #[test]
    fn search_window_contains_its_center() {
        let window = calculate_bounding_box(-37.81, 144.96, 1.0);
        assert!(window.contains(&Coordinate::new(-37.81, 144.96)));
        assert!(!window.contains(&Coordinate::new(-37.90, 144.96)));
    }

    #[test]
    fn search_window_wraps_at_antimeridian() {
        let west = calculate_bounding_box(-16.0, -179.999, 1.0);
        assert!(west.min_longitude < -180.0);
        assert!(west.contains(&Coordinate::new(-16.0, 179.999)));
        assert!(!west.contains(&Coordinate::new(-16.0, 179.9)));

        let east = calculate_bounding_box(-16.0, 179.999, 1.0);
        assert!(east.contains(&Coordinate::new(-16.0, -179.999)));
    }

    #[test]
    fn search_window_over_pole_spans_all_longitudes() {
        let window = calculate_bounding_box(89.995, 0.0, 5.0);
        assert_eq!(window.max_latitude, 90.0);
        assert!(window.contains(&Coordinate::new(89.995, 180.0)));
        assert!(window.contains(&Coordinate::new(89.99, -90.0)));
    }
}
