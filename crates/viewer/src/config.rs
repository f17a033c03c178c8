use std::{env, path::PathBuf};

use tram_hunter::framing::DEFAULT_ZOOM;

pub struct ViewerConfig {
    pub catalog_path: PathBuf,
    pub stops_csv_path: Option<PathBuf>,
    pub zoom: u8,
}

impl ViewerConfig {
    pub fn from_env() -> Option<Self> {
        let catalog_path = env::var("TRAM_HUNTER_CATALOG").ok()?.into();
        let stops_csv_path = env::var("TRAM_HUNTER_STOPS_CSV").ok().map(PathBuf::from);
        let zoom = match env::var("TRAM_HUNTER_ZOOM") {
            Ok(zoom) => zoom.parse().ok()?,
            Err(_) => DEFAULT_ZOOM,
        };
        Some(Self {
            catalog_path,
            stops_csv_path,
            zoom,
        })
    }
}
