mod extract;
mod generator;
mod geojson;
mod store;

pub use extract::{write_bi_extract, write_summary_csv};
pub use generator::{generate_observations, FACILITY_COORDS};
pub use geojson::{export_geojson, facility_feature_collection};
pub use store::{read_csv, write_csv};
