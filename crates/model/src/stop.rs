use itertools::Itertools;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    geo::Coordinate,
    id::{HasId, Id},
};

use crate::{ExampleData, WithDistance};

/// Tram tracker IDs at or above this value belong to termini, which can not
/// report arrival predictions.
pub const TERMINUS_ID_THRESHOLD: u32 = 8000;

/// Stops in the order the data source returned them. Duplicates are kept.
pub type StopCollection = Vec<Stop>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    tram_tracker_id: Id<Stop>,
    pub flag_stop_number: String,
    pub primary_name: String,
    pub secondary_name: Option<String>,
    pub city_direction: String,
    pub location: Coordinate,
    #[serde(default)]
    pub routes: Vec<String>,
}

impl Stop {
    pub fn new(
        tram_tracker_id: Id<Stop>,
        flag_stop_number: impl Into<String>,
        primary_name: impl Into<String>,
        city_direction: impl Into<String>,
        location: Coordinate,
    ) -> Self {
        Self {
            tram_tracker_id,
            flag_stop_number: flag_stop_number.into(),
            primary_name: primary_name.into(),
            secondary_name: None,
            city_direction: city_direction.into(),
            location,
            routes: Vec::new(),
        }
    }

    pub fn with_secondary_name(mut self, secondary_name: impl Into<String>) -> Self {
        self.secondary_name = Some(secondary_name.into());
        self
    }

    pub fn with_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.routes = routes.into_iter().map(Into::into).collect();
        self
    }

    pub fn tram_tracker_id(&self) -> Id<Stop> {
        self.tram_tracker_id
    }

    pub fn is_terminus(&self) -> bool {
        self.tram_tracker_id.raw() >= TERMINUS_ID_THRESHOLD
    }

    /// e.g. `Collins St & Swanston St`
    pub fn stop_name(&self) -> String {
        match &self.secondary_name {
            Some(secondary_name) => {
                format!("{} & {}", self.primary_name, secondary_name)
            }
            None => self.primary_name.clone(),
        }
    }

    /// e.g. `Stop 5: Swanston St - Towards City (1005)`
    pub fn details_line(&self) -> String {
        let mut details = format!("Stop {}", self.flag_stop_number);
        if let Some(secondary_name) = &self.secondary_name {
            details.push_str(": ");
            details.push_str(secondary_name);
        }
        format!(
            "{} - {} ({})",
            details, self.city_direction, self.tram_tracker_id
        )
    }

    pub fn routes_string(&self) -> String {
        match self.routes.len() {
            0 => String::new(),
            1 => format!("Route {}", self.routes[0]),
            _ => format!("Routes {}", self.routes.iter().join(", ")),
        }
    }

    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        Coordinate::new(latitude, longitude).distance_km(&self.location)
    }

    pub fn with_distance_to(self, latitude: f64, longitude: f64) -> WithDistance<Stop> {
        let distance = self.distance_to(latitude, longitude);
        WithDistance::new(distance, self)
    }
}

impl HasId for Stop {
    type IdType = u32;
}

impl ExampleData for Stop {
    fn example_data() -> Self {
        Stop::new(
            Id::new(1005),
            "5",
            "Collins St",
            "Towards City",
            Coordinate::new(-37.8155, 144.9666),
        )
        .with_secondary_name("Swanston St")
        .with_routes(["1", "3", "5", "6"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminus_starts_at_threshold() {
        let stop = |id| {
            Stop::new(Id::new(id), "1", "A", "B", Coordinate::new(0.0, 0.0))
        };
        assert!(!stop(7999).is_terminus());
        assert!(stop(8000).is_terminus());
        assert!(stop(8003).is_terminus());
    }

    #[test]
    fn details_line_with_secondary_name() {
        assert_eq!(
            Stop::example_data().details_line(),
            "Stop 5: Swanston St - Towards City (1005)"
        );
    }

    #[test]
    fn details_line_without_secondary_name() {
        let stop = Stop::new(
            Id::new(1920),
            "64",
            "Melbourne University",
            "Towards City",
            Coordinate::new(-37.7967, 144.9614),
        );
        assert_eq!(stop.details_line(), "Stop 64 - Towards City (1920)");
        assert_eq!(stop.stop_name(), "Melbourne University");
    }

    #[test]
    fn stop_name_joins_both_names() {
        assert_eq!(Stop::example_data().stop_name(), "Collins St & Swanston St");
    }

    #[test]
    fn routes_string_is_pluralised() {
        let stop = Stop::example_data();
        assert_eq!(stop.routes_string(), "Routes 1, 3, 5, 6");
        assert_eq!(stop.clone().with_routes(["19"]).routes_string(), "Route 19");
        assert_eq!(
            stop.with_routes(Vec::<String>::new()).routes_string(),
            ""
        );
    }

    #[test]
    fn json_uses_camel_case_and_skips_missing_secondary_name() {
        let stop = Stop::new(
            Id::new(1920),
            "64",
            "Melbourne University",
            "Towards City",
            Coordinate::new(-37.7967, 144.9614),
        );
        let json = serde_json::to_value(&stop).unwrap();
        assert_eq!(json["tramTrackerId"], 1920);
        assert_eq!(json["location"]["latitude"], -37.7967);
        assert!(json.get("secondaryName").is_none());

        let parsed: Stop = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, stop);
    }
}
