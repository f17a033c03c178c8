//! Read-only access to stops and destinations. Callers own the catalog and
//! pass it to the operations that need it.

use std::{cmp::Ordering, fs::File, io::Read, path::Path};

use indexmap::IndexMap;
use model::{
    destination::Destination,
    stop::{Stop, StopCollection},
    WithDistance,
};
use serde::{Deserialize, Serialize};
use utility::{
    geo::{calculate_bounding_box, Coordinate},
    id::Id,
};

use crate::{Error, Result};

pub trait StopCatalog {
    fn stop(&self, id: Id<Stop>) -> Result<Stop>;

    fn destination(&self, id: Id<Destination>) -> Result<Destination>;

    /// Stops served towards a destination, in route order.
    fn stops_for_destination(&self, id: Id<Destination>) -> Result<StopCollection>;

    fn stops_for_search(&self, query: &str) -> StopCollection;

    /// Stops within `radius_km`, nearest first.
    fn stops_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Vec<WithDistance<Stop>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationStops {
    pub destination: Destination,
    pub stops: Vec<Id<Stop>>,
}

/// Document layout of a catalog export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDump {
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub destinations: Vec<DestinationStops>,
}

/// Flat stop row, as found in spreadsheet exports.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StopRecord {
    tram_tracker_id: u32,
    flag_stop_number: String,
    primary_name: String,
    secondary_name: Option<String>,
    city_direction: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    routes: Option<String>,
}

impl From<StopRecord> for Stop {
    fn from(record: StopRecord) -> Self {
        let mut stop = Stop::new(
            Id::new(record.tram_tracker_id),
            record.flag_stop_number,
            record.primary_name,
            record.city_direction,
            Coordinate::new(record.latitude, record.longitude),
        );
        if let Some(secondary_name) =
            record.secondary_name.filter(|name| !name.trim().is_empty())
        {
            stop = stop.with_secondary_name(secondary_name);
        }
        if let Some(routes) = record.routes {
            stop = stop.with_routes(
                routes
                    .split(';')
                    .map(str::trim)
                    .filter(|route| !route.is_empty()),
            );
        }
        stop
    }
}

/// Reads stops from CSV with a header row. Routes are separated by `;`.
pub fn read_stops_csv<R: Read>(reader: R) -> Result<StopCollection> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut stops = StopCollection::new();
    for row in csv_reader.deserialize() {
        let record: StopRecord = row?;
        stops.push(record.into());
    }
    Ok(stops)
}

pub fn read_stops_csv_file(path: impl AsRef<Path>) -> Result<StopCollection> {
    read_stops_csv(File::open(path)?)
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    stops: IndexMap<Id<Stop>, Stop>,
    destinations: IndexMap<Id<Destination>, DestinationStops>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dump(dump: CatalogDump) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.insert_stops(dump.stops);
        for destination_stops in dump.destinations {
            catalog.insert_destination(destination_stops)?;
        }
        log::info!(
            "loaded catalog with {} stops and {} destinations",
            catalog.stops.len(),
            catalog.destinations.len()
        );
        Ok(catalog)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let dump: CatalogDump = serde_json::from_reader(reader)?;
        Self::from_dump(dump)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_reader(File::open(path)?)
    }

    /// Later stops replace earlier ones with the same tram tracker ID.
    pub fn insert_stops<I>(&mut self, stops: I)
    where
        I: IntoIterator<Item = Stop>,
    {
        for stop in stops {
            if let Some(previous) = self.stops.insert(stop.tram_tracker_id(), stop) {
                log::warn!(
                    "replaced duplicate stop {}",
                    previous.tram_tracker_id()
                );
            }
        }
    }

    /// Every referenced stop has to be known already.
    pub fn insert_destination(
        &mut self,
        destination_stops: DestinationStops,
    ) -> Result<()> {
        let destination_id = destination_stops.destination.id;
        if let Some(unknown) = destination_stops
            .stops
            .iter()
            .find(|id| !self.stops.contains_key(*id))
        {
            return Err(Error::UnknownStopInDestination {
                destination: destination_id,
                stop: *unknown,
            });
        }
        self.destinations.insert(destination_id, destination_stops);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    fn matches_query(stop: &Stop, query: &str, id_query: Option<u32>) -> bool {
        if id_query == Some(stop.tram_tracker_id().raw()) {
            return true;
        }
        let names = std::iter::once(&stop.primary_name).chain(&stop.secondary_name);
        names
            .map(|name| name.to_lowercase())
            .any(|name| name.contains(query))
    }
}

impl StopCatalog for InMemoryCatalog {
    fn stop(&self, id: Id<Stop>) -> Result<Stop> {
        self.stops.get(&id).cloned().ok_or(Error::StopNotFound(id))
    }

    fn destination(&self, id: Id<Destination>) -> Result<Destination> {
        self.destinations
            .get(&id)
            .map(|entry| entry.destination.clone())
            .ok_or(Error::DestinationNotFound(id))
    }

    fn stops_for_destination(&self, id: Id<Destination>) -> Result<StopCollection> {
        let entry = self
            .destinations
            .get(&id)
            .ok_or(Error::DestinationNotFound(id))?;
        entry.stops.iter().map(|stop_id| self.stop(*stop_id)).collect()
    }

    /// Case-insensitive match on either name, or on the tram tracker ID when
    /// the query is a number. A blank query matches nothing.
    fn stops_for_search(&self, query: &str) -> StopCollection {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return StopCollection::new();
        }
        let id_query = query.parse::<u32>().ok();
        let result = self
            .stops
            .values()
            .filter(|stop| Self::matches_query(stop, &query, id_query))
            .cloned()
            .collect::<StopCollection>();
        log::debug!("search {:?} matched {} stops", query, result.len());
        result
    }

    fn stops_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Vec<WithDistance<Stop>> {
        let window = calculate_bounding_box(latitude, longitude, radius_km);
        let mut result = self
            .stops
            .values()
            .filter(|stop| window.contains(&stop.location))
            .cloned()
            .map(|stop| stop.with_distance_to(latitude, longitude))
            .filter(|stop| stop.distance_km <= radius_km)
            .collect::<Vec<_>>();
        result.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
        });
        result
    }
}
