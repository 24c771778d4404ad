use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid GeoJSON in {}: {source}", path.display())]
    GeoJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} is not a GeoJSON FeatureCollection", path.display())]
    NotFeatureCollection { path: PathBuf },

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while computing the centroid of a single feature.
///
/// These never abort a run; the offending feature is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    #[error("malformed coordinates: {0}")]
    MalformedCoordinates(String),

    #[error("degenerate geometry with zero area")]
    DegenerateGeometry,

    #[error("geometry is empty")]
    EmptyGeometry,
}

pub type Result<T> = std::result::Result<T, Error>;
