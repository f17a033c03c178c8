use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::ExampleData;

/// One direction of a route, e.g. route 19 towards North Coburg.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: Id<Destination>,
    pub route_number: String,
    pub destination: String,
    #[serde(default)]
    pub up: bool,
}

impl Destination {
    pub fn title(&self) -> String {
        format!("Route {} to {}", self.route_number, self.destination)
    }
}

impl HasId for Destination {
    type IdType = u64;
}

impl ExampleData for Destination {
    fn example_data() -> Self {
        Self {
            id: Id::new(38),
            route_number: "19".to_owned(),
            destination: "North Coburg".to_owned(),
            up: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_names_route_and_destination() {
        assert_eq!(
            Destination::example_data().title(),
            "Route 19 to North Coburg"
        );
    }

    #[test]
    fn up_defaults_to_false() {
        let destination: Destination = serde_json::from_str(
            r#"{"id": 7, "routeNumber": "96", "destination": "St Kilda Beach"}"#,
        )
        .unwrap();
        assert!(!destination.up);
        assert_eq!(destination.id.raw(), 7);
    }
}
