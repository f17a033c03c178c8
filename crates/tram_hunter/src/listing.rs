use model::{
    destination::Destination,
    stop::{Stop, StopCollection},
};
use schemars::JsonSchema;
use serde::Serialize;
use utility::id::Id;

use crate::{catalog::StopCatalog, curation::filter_termini, Result};

#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StopRow {
    pub tram_tracker_id: Id<Stop>,
    pub name: String,
    pub details: String,
    pub routes: String,
}

impl StopRow {
    pub fn for_stop(stop: &Stop) -> Self {
        Self {
            tram_tracker_id: stop.tram_tracker_id(),
            name: stop.primary_name.clone(),
            details: stop.details_line(),
            routes: stop.routes_string(),
        }
    }
}

/// A titled list of stops. Rows and stops share positions, so a selected row
/// resolves to its stop through [`StopList::stop_at`].
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StopList {
    pub title: String,
    pub rows: Vec<StopRow>,
    #[serde(skip)]
    stops: StopCollection,
}

impl StopList {
    pub fn new(title: impl Into<String>, stops: StopCollection) -> Self {
        Self {
            title: title.into(),
            rows: stops.iter().map(StopRow::for_stop).collect(),
            stops,
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop_at(&self, position: usize) -> Option<&Stop> {
        self.stops.get(position)
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

pub fn search_title(query: &str) -> String {
    format!("Search results for \"{}\"", query)
}

/// Boardable stops towards a destination. Termini are left out because no
/// arrival times can be fetched for them.
pub fn list_for_destination<C>(
    catalog: &C,
    destination_id: Id<Destination>,
) -> Result<StopList>
where
    C: StopCatalog + ?Sized,
{
    let destination = catalog.destination(destination_id)?;
    let stops = filter_termini(catalog.stops_for_destination(destination_id)?);
    Ok(StopList::new(destination.title(), stops))
}

pub fn list_for_search<C>(catalog: &C, query: &str) -> StopList
where
    C: StopCatalog + ?Sized,
{
    StopList::new(search_title(query), catalog.stops_for_search(query))
}

#[cfg(test)]
mod tests {
    use model::ExampleData;

    use super::*;

    #[test]
    fn row_shows_name_details_and_routes() {
        let row = StopRow::for_stop(&Stop::example_data());
        assert_eq!(row.name, "Collins St");
        assert_eq!(row.details, "Stop 5: Swanston St - Towards City (1005)");
        assert_eq!(row.routes, "Routes 1, 3, 5, 6");
        assert_eq!(row.tram_tracker_id.raw(), 1005);
    }

    #[test]
    fn selected_row_resolves_to_stop() {
        let list = StopList::new("Test", vec![Stop::example_data()]);
        assert_eq!(
            list.stop_at(0).map(|stop| stop.tram_tracker_id()),
            Some(list.rows[0].tram_tracker_id)
        );
        assert!(list.stop_at(1).is_none());
    }

    #[test]
    fn search_title_quotes_query() {
        assert_eq!(search_title("swanston"), "Search results for \"swanston\"");
    }

    #[test]
    fn stops_are_not_serialized() {
        let list = StopList::new("Test", vec![Stop::example_data()]);
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.get("stops").is_none());
        assert_eq!(json["rows"][0]["tramTrackerId"], 1005);
    }
}
