//! Process-wide configuration passed explicitly into every operation.

use std::fmt;
use std::str::FromStr;

use crate::error::DirodsError;

/// Zone used when neither `--zone` nor `DIRODS_ZONE` is given.
pub const DEFAULT_ZONE: &str = "/jic_archive";

/// The top-level iRODS namespace root that dataset collections live under.
///
/// A zone is an absolute path with exactly one segment, e.g. `/jic_archive`.
/// Collections are addressed as `<zone>/<uuid>`, so the uuid is always the
/// third `/`-delimited segment of a collection path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Zone(String);

impl Zone {
    /// Parses and validates a zone string.
    pub fn new(zone: impl Into<String>) -> Result<Self, DirodsError> {
        let zone = zone.into();

        let invalid = |message: &str| DirodsError::InvalidZone {
            zone: zone.clone(),
            message: message.to_string(),
        };

        let Some(name) = zone.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };
        if name.is_empty() {
            return Err(invalid("zone name is empty"));
        }
        if name.contains('/') {
            return Err(invalid("must be a single top-level segment like '/tempZone'"));
        }

        Ok(Self(zone))
    }

    /// Returns the zone as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self(DEFAULT_ZONE.to_string())
    }
}

impl FromStr for Zone {
    type Err = DirodsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settings shared by all subcommands.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub zone: Zone,
}

impl Config {
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }
}
