//! Failure taxonomy for one unit of work in the boundary pipeline.

use thiserror::Error;

use crate::geofile::geojson::WriteError;
use crate::osm::conversion::ConvertError;
use crate::osm::download::FetchError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Network or service error, or a body that is not JSON.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The response could not be converted to GeoJSON.
    #[error("conversion failed: {0}")]
    Convert(#[from] ConvertError),

    /// An output file could not be written.
    #[error("write failed: {0}")]
    Write(#[from] WriteError),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Convert(_) => "convert",
            PipelineError::Write(_) => "write",
        }
    }
}
