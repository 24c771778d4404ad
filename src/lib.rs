pub mod centroid;
pub mod config;
pub mod error;
pub mod iso3166;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod resolver;

pub use config::Config;
pub use error::{Error, GeometryError};
pub use model::{Coordinates, CountryCoordinates, CountryRecord};
pub use pipeline::{process_feature, process_features, run, FeatureOutcome, Report};
pub use resolver::{country_code, resolve, Resolution};
