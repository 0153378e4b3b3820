use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Payload format of a fetched resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Geotiff,
    Zip,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Geotiff => "geotiff",
            DataType::Zip => "zip",
        }
    }

    /// Media type for the payload, used by hooks when describing output.
    pub fn mime(&self) -> mime::Mime {
        match self {
            DataType::Geotiff => "image/tiff".parse().unwrap(),
            DataType::Zip => "application/zip".parse().unwrap(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One downloadable resource planned by a module.
///
/// Entries are immutable once built; the runner reads `url`, `dest_name`
/// and `data_type` to perform the transfer, the rest is descriptive
/// metadata carried through to hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct ResultEntry {
    /// Fully qualified, already-encoded locator.
    #[builder(into)]
    pub url: String,
    /// Filesystem-safe destination filename, derived deterministically
    /// from module + parameters.
    #[builder(into)]
    pub dest_name: String,
    pub data_type: DataType,
    /// Providing agency, e.g. "GEBCO / BODC".
    #[builder(into)]
    pub agency: String,
    #[builder(into)]
    pub title: String,
}

/// Geographic bounding box in EPSG:4326 degrees.
///
/// Parsed from the CLI form `west/east/south/north`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

#[derive(Debug, Error)]
pub enum RegionParseError {
    #[error("expected west/east/south/north, got {0} bounds")]
    WrongArity(usize),
    #[error("invalid bound '{0}'")]
    InvalidBound(String),
    #[error("west bound {west} must be less than east bound {east}")]
    EastWestOrder { west: f64, east: f64 },
    #[error("south bound {south} must be less than north bound {north}")]
    SouthNorthOrder { south: f64, north: f64 },
}

impl Region {
    pub fn new(
        west: f64,
        east: f64,
        south: f64,
        north: f64,
    ) -> Result<Self, RegionParseError> {
        if west >= east {
            return Err(RegionParseError::EastWestOrder { west, east });
        }
        if south >= north {
            return Err(RegionParseError::SouthNorthOrder { south, north });
        }
        Ok(Self {
            west,
            east,
            south,
            north,
        })
    }

    /// Filesystem-safe token encoding the four bounds.
    ///
    /// Each bound is formatted with the shortest round-trip float form,
    /// then `.` becomes `p` and `-` becomes `m`. The substitution is
    /// reversible, so the original bounds are recoverable from a
    /// filename and distinct regions never collide.
    pub fn path_token(&self) -> String {
        format!(
            "w{}_e{}_s{}_n{}",
            self.west, self.east, self.south, self.north
        )
        .replace('.', "p")
        .replace('-', "m")
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 4 {
            return Err(RegionParseError::WrongArity(parts.len()));
        }
        let mut bounds = [0f64; 4];
        for (slot, part) in bounds.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| RegionParseError::InvalidBound(part.to_string()))?;
        }
        Region::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.west, self.east, self.south, self.north
        )
    }
}

/// Ordered accumulator shared by all modules.
///
/// Accumulation is purely additive: no dedup, no validation. Calling a
/// module's `run` twice appends a second batch; idempotence belongs to
/// the caller.
#[derive(Debug, Default)]
pub struct ResultSet {
    entries: Vec<ResultEntry>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: ResultEntry) {
        tracing::debug!(url = %entry.url, dest = %entry.dest_name, "Planned entry");
        self.entries.push(entry);
    }

    pub fn as_slice(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn take(&mut self) -> Vec<ResultEntry> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Open set of named module options from the CLI (`-O key=value`).
///
/// Accessors are total: an unknown or unparsable value falls back to the
/// caller's default instead of failing, so module construction never
/// rejects an option combination. Anything that must fail does so in
/// `run`.
#[derive(Debug, Clone, Default)]
pub struct ModuleArgs(BTreeMap<String, String>);

impl ModuleArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self(pairs.into_iter().collect())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    /// Boolean option with a fallback. Accepts the usual spellings;
    /// anything unrecognized yields `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get_str(key).map(str::to_ascii_lowercase).as_deref() {
            Some("true" | "1" | "yes" | "on") => true,
            Some("false" | "0" | "no" | "off") => false,
            _ => default,
        }
    }
}
