//! Prepares a collection of stops for display on a map: one marker per stop
//! and a single center point. Fitting the zoom level to the bounds is left to
//! the caller, which picks a fixed zoom.

use model::stop::Stop;
use schemars::JsonSchema;
use serde::Serialize;
use utility::{
    geo::{BoundingBox, Coordinate, GeoPoint},
    id::Id,
};

use crate::{Error, Result};

pub const DEFAULT_ZOOM: u8 = 15;

pub const MULTIPLE_STOPS_TITLE: &str = "Stops Map";

/// Center of the bounding box of all stop locations.
///
/// The box is seeded from the first stop, so the result always lies within
/// the coordinates of the input and does not depend on its order. An empty
/// collection has no center and yields [`Error::NoStops`].
pub fn compute_center(stops: &[Stop]) -> Result<Coordinate> {
    BoundingBox::enclosing(stops.iter().map(|stop| stop.location))
        .map(|bounds| bounds.center())
        .ok_or(Error::NoStops)
}

#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub tram_tracker_id: Id<Stop>,
    pub point: GeoPoint,
    pub title: String,
    pub snippet: String,
}

impl MapMarker {
    pub fn for_stop(stop: &Stop) -> Self {
        Self {
            tram_tracker_id: stop.tram_tracker_id(),
            point: GeoPoint::from_coordinate(stop.location),
            title: stop.primary_name.clone(),
            snippet: stop.details_line(),
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapFraming {
    pub title: String,
    pub center: GeoPoint,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

pub fn map_title(stops: &[Stop]) -> String {
    match stops {
        [stop] => stop.stop_name(),
        _ => MULTIPLE_STOPS_TITLE.to_owned(),
    }
}

pub fn frame_stops(stops: &[Stop], zoom: u8) -> Result<MapFraming> {
    let center = compute_center(stops)?;
    log::debug!(
        "framing {} stops around ({}, {})",
        stops.len(),
        center.latitude,
        center.longitude
    );
    Ok(MapFraming {
        title: map_title(stops),
        center: GeoPoint::from_coordinate(center),
        zoom,
        markers: stops.iter().map(MapMarker::for_stop).collect(),
    })
}

/// Markers are created in stop order, so a tapped marker index maps straight
/// back to its stop.
pub fn marker_stop(stops: &[Stop], index: usize) -> Option<&Stop> {
    stops.get(index)
}
