// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Reading roads and flood zones from [GeoJSON](https://geojson.org/) files.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use geojson::GeoJson;

use crate::{Polygon, Road};

mod model;

pub use model::Feature;

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Format of the input GeoJSON file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    #[default]
    Unknown,

    /// Force uncompressed GeoJSON
    GeoJson,

    /// Force GeoJSON with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    GeoJsonGz,

    /// Force GeoJSON with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    GeoJsonBz2,
}

impl FileFormat {
    /// Guesses the format of a file based on its first bytes.
    pub fn detect(header: &[u8]) -> Self {
        if header.starts_with(GZIP_MAGIC) {
            Self::GeoJsonGz
        } else if header.starts_with(BZIP2_MAGIC) {
            Self::GeoJsonBz2
        } else {
            Self::GeoJson
        }
    }
}

/// Additional controls for reading GeoJSON data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,
}

/// Error conditions which may occur when loading GeoJSON data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("geojson: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("position must have at least 2 elements, got {0}")]
    InvalidPosition(usize),

    #[error("position with non-finite coordinates")]
    NonFiniteCoordinate,
}

/// Roads and flood zones, as read from GeoJSON.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dataset {
    pub roads: Vec<Road>,
    pub zones: Vec<Polygon>,
}

impl Dataset {
    /// Splits [Features](Feature) into roads and flood zones.
    pub fn from_features<I: IntoIterator<Item = Feature>>(features: I) -> Self {
        let mut d = Self::default();
        for f in features {
            match f {
                Feature::Road(r) => d.roads.push(r),
                Feature::Zone(z) => d.zones.push(z),
            }
        }
        d
    }
}

/// Parses GeoJSON text into [Features](Feature).
///
/// The top-level object may be a FeatureCollection, a single Feature or a bare Geometry.
/// Features without a geometry are skipped.
pub fn parse_features(text: &str) -> Result<Vec<Feature>, Error> {
    let mut features = Vec::new();

    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => {
            for f in &fc.features {
                if let Some(g) = &f.geometry {
                    model::extend_from_geometry(&mut features, g)?;
                }
            }
        }

        GeoJson::Feature(f) => {
            if let Some(g) = &f.geometry {
                model::extend_from_geometry(&mut features, g)?;
            }
        }

        GeoJson::Geometry(g) => model::extend_from_geometry(&mut features, &g)?,
    }

    Ok(features)
}

fn read_to_string<R: Read>(mut reader: R) -> Result<String, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// Fills `header` from the reader, stopping early only at the end of the stream.
/// Returns the number of bytes read.
fn read_header<R: Read>(reader: &mut R, header: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn decode<R: Read>(file_format: FileFormat, reader: R) -> Result<String, Error> {
    match file_format {
        FileFormat::Unknown | FileFormat::GeoJson => read_to_string(io::BufReader::new(reader)),
        FileFormat::GeoJsonGz => read_to_string(flate2::read::MultiGzDecoder::new(reader)),
        FileFormat::GeoJsonBz2 => read_to_string(bzip2::read::MultiBzDecoder::new(reader)),
    }
}

/// Parse GeoJSON features from a reader as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader when needed.
pub fn load_from_io<R: Read>(options: &Options, mut reader: R) -> Result<Dataset, Error> {
    let text = match options.file_format {
        FileFormat::Unknown => {
            let mut header = [0u8; 3];
            let n = read_header(&mut reader, &mut header)?;
            let header = &header[..n];
            decode(FileFormat::detect(header), io::Cursor::new(header).chain(reader))?
        }
        f => decode(f, reader)?,
    };

    let features = parse_features(&text)?;
    Ok(Dataset::from_features(features))
}

/// Parse GeoJSON features from a file at the provided path as per the provided [Options].
pub fn load_from_file<P: AsRef<Path>>(options: &Options, path: P) -> Result<Dataset, Error> {
    let f = File::open(path)?;
    load_from_io(options, f)
}

/// Parse GeoJSON features from a static buffer as per the provided [Options].
pub fn load_from_buffer(options: &Options, data: &[u8]) -> Result<Dataset, Error> {
    load_from_io(options, io::Cursor::new(data))
}

/// Loads roads from a GeoJSON file, ignoring any non-linear geometries.
pub fn load_roads_from_file<P: AsRef<Path>>(
    options: &Options,
    path: P,
) -> Result<Vec<Road>, Error> {
    let d = load_from_file(options, path)?;
    if !d.zones.is_empty() {
        log::debug!("ignoring {} polygons in the road file", d.zones.len());
    }
    Ok(d.roads)
}

/// Loads flood zones from a GeoJSON file, ignoring any non-polygon geometries.
pub fn load_flood_zones_from_file<P: AsRef<Path>>(
    options: &Options,
    path: P,
) -> Result<Vec<Polygon>, Error> {
    let d = load_from_file(options, path)?;
    if !d.roads.is_empty() {
        log::debug!("ignoring {} lines in the flood zone file", d.roads.len());
    }
    Ok(d.zones)
}
