use chronomap_shared::{HistoricalEvent, Region, region_color};
use geo::{Contains, Point};

use crate::projection::Projection;
use crate::reconcile::MarkerDiff;
use crate::theme::MapTheme;
use crate::viewport::ZoomTransform;

const REGION_STROKE_WIDTH: f64 = 1.5;
const REGION_HIGHLIGHT_STROKE_WIDTH: f64 = 2.5;
/// Claimed borders stay subtle; unclaimed territory is outlined harder so
/// ambiguous ground stands out.
const CLAIMED_STROKE_OPACITY: f64 = 0.3;
const UNCLAIMED_STROKE_OPACITY: f64 = 0.8;

const MARKER_RADIUS: f64 = 3.0;
const MARKER_STROKE_WIDTH: f64 = 1.0;
const HIGHLIGHT_MARKER_RADIUS: f64 = 4.5;
const HIGHLIGHT_MARKER_STROKE_WIDTH: f64 = 2.0;

/// A filled region outline in viewport coordinates, one entry per ring
/// (exterior and holes alike).
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    pub id: usize,
    pub rings: Vec<Vec<(f64, f64)>>,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub highlighted: bool,
    /// Resolved display name, `None` for unclaimed regions.
    pub hover_label: Option<String>,
}

/// One rendered event dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub highlighted: bool,
}

/// Everything an adapter needs to draw one frame: static shapes, the marker
/// diff against the previous frame, and the live zoom transform to apply as
/// a group transform over all of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub width: f64,
    pub height: f64,
    pub sea_fill: String,
    pub transform: ZoomTransform,
    pub regions: Vec<RegionShape>,
    pub markers: MarkerDiff,
}

/// Stable identity for a rendered event marker across reconciliation
/// passes. Uses the markup-stripped description so cosmetic markup changes
/// upstream do not churn markers.
pub fn marker_key(event: &HistoricalEvent) -> String {
    format!(
        "{}|{}|{}|{}",
        event.year,
        event.longitude,
        event.latitude,
        event.plain_description()
    )
}

/// Geometry containment with the fail-closed rule: an out-of-range
/// coordinate is simply not contained anywhere.
pub fn region_contains(region: &Region, longitude: f64, latitude: f64) -> bool {
    if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
        return false;
    }
    region.boundary.contains(&Point::new(longitude, latitude))
}

/// Build the region layer. The region containing the highlighted event (if
/// any) is re-filled with the theme highlight and outlined heavier.
pub fn region_shapes(
    regions: &[Region],
    projection: &Projection,
    theme: &MapTheme,
    highlighted: Option<&HistoricalEvent>,
) -> Vec<RegionShape> {
    regions
        .iter()
        .filter_map(|region| {
            let rings = project_rings(region, projection);
            if rings.is_empty() {
                return None;
            }

            let claimed = region.display_name().is_some();
            let contains_highlight = highlighted
                .is_some_and(|event| region_contains(region, event.longitude, event.latitude));

            let fill = if contains_highlight {
                theme.land_highlight.clone()
            } else {
                region_color(region, &theme.unclaimed_fill).to_string()
            };

            Some(RegionShape {
                id: region.id,
                rings,
                fill,
                stroke: theme.land_stroke.clone(),
                stroke_width: if contains_highlight {
                    REGION_HIGHLIGHT_STROKE_WIDTH
                } else {
                    REGION_STROKE_WIDTH
                },
                stroke_opacity: if claimed {
                    CLAIMED_STROKE_OPACITY
                } else {
                    UNCLAIMED_STROKE_OPACITY
                },
                highlighted: contains_highlight,
                hover_label: region.display_name(),
            })
        })
        .collect()
}

/// Project one event to a marker. `None` when the coordinate pair is not
/// renderable.
pub fn event_marker(
    event: &HistoricalEvent,
    projection: &Projection,
    theme: &MapTheme,
    highlighted: bool,
) -> Option<Marker> {
    let (x, y) = projection.project(event.longitude, event.latitude)?;
    Some(Marker {
        key: marker_key(event),
        x,
        y,
        radius: if highlighted {
            HIGHLIGHT_MARKER_RADIUS
        } else {
            MARKER_RADIUS
        },
        fill: if highlighted {
            theme.land_highlight.clone()
        } else {
            theme.point_fill.clone()
        },
        stroke: theme.point_stroke.clone(),
        stroke_width: if highlighted {
            HIGHLIGHT_MARKER_STROKE_WIDTH
        } else {
            MARKER_STROKE_WIDTH
        },
        highlighted,
    })
}

fn project_rings(region: &Region, projection: &Projection) -> Vec<Vec<(f64, f64)>> {
    let mut rings = Vec::new();
    for polygon in &region.boundary {
        let mut polygon_rings = std::iter::once(polygon.exterior())
            .chain(polygon.interiors().iter())
            .filter_map(|ring| {
                let projected: Vec<(f64, f64)> = ring
                    .coords()
                    .filter_map(|coord| projection.project(coord.x, coord.y))
                    .collect();
                // A degenerate ring cannot enclose area; drop it.
                (projected.len() >= 3).then_some(projected)
            })
            .collect::<Vec<_>>();
        rings.append(&mut polygon_rings);
    }
    rings
}
