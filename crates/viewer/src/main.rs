use std::{error, process};

use config::ViewerConfig;
use model::WithDistance;
use schemars::{schema_for, JsonSchema};
use serde::Serialize;
use structopt::{clap::AppSettings, StructOpt};
use tram_hunter::{
    catalog::{read_stops_csv_file, InMemoryCatalog, StopCatalog},
    framing::{frame_stops, MapFraming},
    listing::{list_for_destination, list_for_search, StopList},
};
use utility::id::Id;

mod config;

/// Prints a stop list and the map framed around it as JSON. The catalog is
/// read from TRAM_HUNTER_CATALOG.
#[derive(Debug, PartialEq, StructOpt)]
#[structopt(name = "viewer")]
struct Args {
    /// Print the JSON schema of the output instead
    #[structopt(long)]
    schema: bool,
    #[structopt(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, PartialEq, StructOpt)]
enum Command {
    /// Stops served on the way to a destination, termini removed
    Destination { id: u64 },
    /// Stops whose name or tram tracker ID matches
    Search {
        #[structopt(required = true)]
        query: Vec<String>,
    },
    /// A single stop
    Stop { id: u32 },
    /// Stops within a radius, nearest first
    #[structopt(setting = AppSettings::AllowNegativeNumbers)]
    Nearby {
        latitude: f64,
        longitude: f64,
        #[structopt(default_value = "0.5")]
        radius_km: f64,
    },
}

/// What a screen pair shows: the stop list and, if there is anything to
/// show, the map framed around it.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct Screen {
    list: StopList,
    map: Option<MapFraming>,
}

impl Screen {
    fn new(list: StopList, zoom: u8) -> Result<Self, tram_hunter::Error> {
        let map = if list.is_empty() {
            log::info!("{:?} has no stops to show on a map", list.title);
            None
        } else {
            Some(frame_stops(list.stops(), zoom)?)
        };
        Ok(Self { list, map })
    }
}

fn load_catalog(config: &ViewerConfig) -> Result<InMemoryCatalog, tram_hunter::Error> {
    let mut catalog = InMemoryCatalog::from_json_file(&config.catalog_path)?;
    if let Some(stops_csv_path) = &config.stops_csv_path {
        let stops = read_stops_csv_file(stops_csv_path)?;
        log::info!(
            "adding {} stops from {}",
            stops.len(),
            stops_csv_path.display()
        );
        catalog.insert_stops(stops);
    }
    Ok(catalog)
}

fn build_list(
    catalog: &InMemoryCatalog,
    command: Command,
) -> Result<StopList, tram_hunter::Error> {
    match command {
        Command::Destination { id } => list_for_destination(catalog, Id::new(id)),
        Command::Search { query } => Ok(list_for_search(catalog, &query.join(" "))),
        Command::Stop { id } => {
            let stop = catalog.stop(Id::new(id))?;
            Ok(StopList::new(stop.stop_name(), vec![stop]))
        }
        Command::Nearby {
            latitude,
            longitude,
            radius_km,
        } => {
            let stops = catalog
                .stops_nearby(latitude, longitude, radius_km)
                .into_iter()
                .map(WithDistance::into_content)
                .collect();
            Ok(StopList::new("Nearby Stops", stops))
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn error::Error>> {
    if args.schema {
        println!("{}", serde_json::to_string_pretty(&schema_for!(Screen))?);
        return Ok(());
    }
    let command = args
        .command
        .ok_or("expected a command, see `viewer --help`.")?;

    let config = ViewerConfig::from_env().ok_or(
        "expected TRAM_HUNTER_CATALOG (and a numeric TRAM_HUNTER_ZOOM) in env.",
    )?;
    let catalog = load_catalog(&config)?;
    let screen = Screen::new(build_list(&catalog, command)?, config.zoom)?;
    println!("{}", serde_json::to_string_pretty(&screen)?);
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(why) = run(Args::from_args()) {
        log::error!("{}", why);
        eprintln!("{}", why);
        process::exit(1);
    }
}
