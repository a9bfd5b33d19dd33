use chronomap_shared::{MapError, Region};

/// A basemap is either a label still to be loaded or the loaded feature
/// set. The explicit sum type replaces sniffing the payload for a loader
/// method; resolution happens exactly once, before the map is built.
#[derive(Debug, Clone)]
pub enum BasemapSource {
    /// Period label / filename, e.g. `"world_bc500.geojson"`.
    Pending(String),
    Resolved(Vec<Region>),
}

impl BasemapSource {
    pub fn is_resolved(&self) -> bool {
        matches!(self, BasemapSource::Resolved(_))
    }

    /// Run the load step if still pending. The loader sees the period
    /// label; an already-resolved source passes through untouched.
    pub fn resolve_with<F>(self, loader: F) -> Result<Vec<Region>, MapError>
    where
        F: FnOnce(&str) -> Result<Vec<Region>, MapError>,
    {
        match self {
            BasemapSource::Pending(label) => loader(&label),
            BasemapSource::Resolved(regions) => Ok(regions),
        }
    }

    /// The loaded regions; a pending source is a usage error.
    pub fn regions(&self) -> Result<&[Region], MapError> {
        match self {
            BasemapSource::Pending(_) => Err(MapError::UnresolvedBasemap),
            BasemapSource::Resolved(regions) => Ok(regions),
        }
    }
}
