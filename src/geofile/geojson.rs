use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::feature::BoundaryCollection;

pub const GEOJSON_EXTENSION: &str = "geojson";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("could not create output directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not serialize GeoJSON for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoJsonStyle {
    /// Two-space indentation, one key per line.
    Pretty,
    /// No whitespace between tokens.
    Minified,
}

/// The derived shapes a collection is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputVariant {
    All,
    Cleaned,
    Short,
}

impl OutputVariant {
    pub fn name(&self) -> &'static str {
        match self {
            OutputVariant::All => "all",
            OutputVariant::Cleaned => "cleaned",
            OutputVariant::Short => "short",
        }
    }
}

impl fmt::Display for OutputVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `<stem>.<variant>.geojson` or `<stem>.<variant>.min.geojson`.
pub fn output_filename(stem: &str, variant: OutputVariant, style: GeoJsonStyle) -> String {
    match style {
        GeoJsonStyle::Pretty => format!("{stem}.{variant}.{GEOJSON_EXTENSION}"),
        GeoJsonStyle::Minified => format!("{stem}.{variant}.min.{GEOJSON_EXTENSION}"),
    }
}

/// Mode for written files, before the umask is applied. Temporary files would
/// otherwise be readable by their owner only.
#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o644;

/// Serialize `collection` to `output_filepath`. The file is written to a
/// temporary file next to the destination and renamed into place, so an
/// existing file is either fully replaced or left untouched.
pub fn write_geojson(
    collection: &BoundaryCollection,
    output_filepath: &Path,
    style: GeoJsonStyle,
) -> Result<(), WriteError> {
    let contents = match style {
        GeoJsonStyle::Pretty => serde_json::to_vec_pretty(collection),
        GeoJsonStyle::Minified => serde_json::to_vec(collection),
    }
    .map_err(|source| WriteError::Serialize {
        path: output_filepath.to_path_buf(),
        source,
    })?;

    let io_error = |source| WriteError::Io {
        path: output_filepath.to_path_buf(),
        source,
    };
    let parent = match output_filepath.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(OUTPUT_FILE_MODE));
    }
    let mut temp_file = builder.tempfile_in(parent).map_err(io_error)?;
    temp_file.write_all(&contents).map_err(io_error)?;
    temp_file.flush().map_err(io_error)?;
    temp_file
        .persist(output_filepath)
        .map_err(|err| io_error(err.error))?;
    Ok(())
}

/// Write `collection` pretty and minified into `output_dir`, creating the
/// directory first. Returns the written paths, pretty first.
pub fn write_collection_variants(
    collection: &BoundaryCollection,
    output_dir: &Path,
    stem: &str,
    variant: OutputVariant,
) -> Result<Vec<PathBuf>, WriteError> {
    fs::create_dir_all(output_dir).map_err(|source| WriteError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::new();
    for style in [GeoJsonStyle::Pretty, GeoJsonStyle::Minified] {
        let output_filepath = output_dir.join(output_filename(stem, variant, style));
        write_geojson(collection, &output_filepath, style)?;
        log::info!("Created: {}", output_filepath.display());
        written.push(output_filepath);
    }
    Ok(written)
}
