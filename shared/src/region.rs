use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection};
use tracing::debug;

/// The literal sentinel basemap authors use for territory nobody claims.
pub const UNCLAIMED_SENTINEL: &str = "unclaimed";

/// A named region of a historical basemap. `claiming_entity` is the polity
/// that controlled the region in that period (e.g. a colonial subject's
/// parent), distinct from the region's own name.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Stable per-feature identity within one basemap.
    pub id: usize,
    pub name: Option<String>,
    pub claiming_entity: Option<String>,
    pub boundary: MultiPolygon<f64>,
}

impl Region {
    /// Resolved label for hover display. `None` marks the region unclaimed:
    /// a missing name or the literal sentinel. When name and claiming
    /// entity differ, both are shown, tab-separated.
    pub fn display_name(&self) -> Option<String> {
        let name = self
            .name
            .as_deref()
            .filter(|n| !n.is_empty() && *n != UNCLAIMED_SENTINEL)?;
        match self.claiming_entity.as_deref() {
            Some(claimant) if !claimant.is_empty() && claimant != name => {
                Some(format!("{name}\t{claimant}"))
            }
            _ => Some(name.to_string()),
        }
    }
}

/// Convert a GeoJSON feature collection (NAME / SUBJECTO properties, as in
/// the historical-basemaps data set) into regions. Features without area
/// geometry are skipped rather than rejected; basemap data is externally
/// sourced and occasionally carries stray points or lines.
pub fn regions_from_geojson(collection: &FeatureCollection) -> Vec<Region> {
    let mut regions = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for feature in &collection.features {
        let Some(boundary) = area_boundary(feature) else {
            skipped += 1;
            continue;
        };
        regions.push(Region {
            id: regions.len(),
            name: string_property(feature, "NAME"),
            claiming_entity: string_property(feature, "SUBJECTO"),
            boundary,
        });
    }

    if skipped > 0 {
        debug!(skipped, kept = regions.len(), "dropped non-area features");
    }
    regions
}

fn area_boundary(feature: &Feature) -> Option<MultiPolygon<f64>> {
    let geometry = feature.geometry.as_ref()?;
    match geo::Geometry::<f64>::try_from(geometry.value.clone()).ok()? {
        geo::Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon])),
        geo::Geometry::MultiPolygon(multi) => Some(multi),
        _ => None,
    }
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .properties
        .as_ref()?
        .get(key)?
        .as_str()
        .map(str::to_string)
}
