use chronomap_shared::{MapError, Region};
use geo::CoordsIter;

/// Margin between the viewport edge and the fitted map.
pub const PROJECTION_PADDING: f64 = 20.0;

/// Viewport height as a fraction of width.
pub const ASPECT_RATIO: f64 = 0.6;

/// Natural Earth world projection fit to a feature collection inside a
/// padded viewport box. The interactive zoom/pan transform is a separate
/// affine layer on top; refitting here never disturbs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    /// Fit the projection to the regions' projected bounds within
    /// `width x height` minus `PROJECTION_PADDING` on each side.
    pub fn fit_to_regions(
        regions: &[Region],
        width: f64,
        height: f64,
    ) -> Result<Self, MapError> {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        let mut seen = false;

        for region in regions {
            for coord in region.boundary.coords_iter() {
                let Some((x, y)) = raw_project(coord.x, coord.y) else {
                    continue;
                };
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                seen = true;
            }
        }

        if !seen {
            return Err(MapError::EmptyBasemap);
        }

        let inner_w = (width - 2.0 * PROJECTION_PADDING).max(1.0);
        let inner_h = (height - 2.0 * PROJECTION_PADDING).max(1.0);
        let bounds_w = (max_x - min_x).max(f64::EPSILON);
        let bounds_h = (max_y - min_y).max(f64::EPSILON);
        let scale = (inner_w / bounds_w).min(inner_h / bounds_h);

        // Center the fitted bounds in the inner box. Projected y grows
        // north; screen y grows down, hence the flip around max_y.
        let offset_x = PROJECTION_PADDING + (inner_w - bounds_w * scale) / 2.0 - min_x * scale;
        let offset_y = PROJECTION_PADDING + (inner_h - bounds_h * scale) / 2.0 + max_y * scale;

        Ok(Self {
            scale,
            offset_x,
            offset_y,
        })
    }

    /// Project geographic degrees to viewport coordinates. Out-of-range
    /// coordinates fail closed: event data is externally sourced and a bad
    /// pair means "not renderable", not a crash.
    pub fn project(&self, longitude: f64, latitude: f64) -> Option<(f64, f64)> {
        let (x, y) = raw_project(longitude, latitude)?;
        Some((
            x * self.scale + self.offset_x,
            self.offset_y - y * self.scale,
        ))
    }
}

/// The Natural Earth pseudocylindrical polynomial, in radians internally.
/// Returns `None` outside valid geographic bounds.
fn raw_project(longitude: f64, latitude: f64) -> Option<(f64, f64)> {
    // NaN fails both range checks, so non-finite input falls through here.
    if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
        return None;
    }

    let lambda = longitude.to_radians();
    let phi = latitude.to_radians();
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;

    let x = lambda
        * (0.8707 - 0.131979 * phi2
            + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4)));
    let y = phi
        * (1.007226
            + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)));
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{MultiPolygon, polygon};

    fn world_spanning_region() -> Region {
        Region {
            id: 0,
            name: Some("World".to_string()),
            claiming_entity: None,
            boundary: MultiPolygon(vec![polygon![
                (x: -180.0, y: -85.0),
                (x: 180.0, y: -85.0),
                (x: 180.0, y: 85.0),
                (x: -180.0, y: 85.0),
            ]]),
        }
    }

    #[test]
    fn fit_fails_on_an_empty_collection() {
        assert_eq!(
            Projection::fit_to_regions(&[], 1000.0, 600.0),
            Err(MapError::EmptyBasemap)
        );
    }

    #[test]
    fn projected_points_stay_inside_the_padded_box() {
        let projection =
            Projection::fit_to_regions(&[world_spanning_region()], 1000.0, 600.0).unwrap();

        for (lon, lat) in [
            (0.0, 0.0),
            (-180.0, -85.0),
            (180.0, 85.0),
            (12.5, 41.9),
            (-77.0, 38.9),
        ] {
            let (x, y) = projection.project(lon, lat).unwrap();
            assert!(
                (PROJECTION_PADDING - 1e-6..=1000.0 - PROJECTION_PADDING + 1e-6).contains(&x),
                "x out of box for ({lon}, {lat}): {x}"
            );
            assert!(
                (PROJECTION_PADDING - 1e-6..=600.0 - PROJECTION_PADDING + 1e-6).contains(&y),
                "y out of box for ({lon}, {lat}): {y}"
            );
        }
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let projection =
            Projection::fit_to_regions(&[world_spanning_region()], 1000.0, 600.0).unwrap();

        let (x_west, _) = projection.project(-90.0, 0.0).unwrap();
        let (x_east, _) = projection.project(90.0, 0.0).unwrap();
        assert!(x_west < x_east);

        let (_, y_north) = projection.project(0.0, 60.0).unwrap();
        let (_, y_south) = projection.project(0.0, -60.0).unwrap();
        assert!(y_north < y_south);
    }

    #[test]
    fn out_of_range_coordinates_fail_closed() {
        let projection =
            Projection::fit_to_regions(&[world_spanning_region()], 1000.0, 600.0).unwrap();

        assert_eq!(projection.project(181.0, 0.0), None);
        assert_eq!(projection.project(0.0, -91.0), None);
        assert_eq!(projection.project(f64::NAN, 0.0), None);
    }

    #[test]
    fn refitting_with_the_same_inputs_is_deterministic() {
        let regions = [world_spanning_region()];
        let a = Projection::fit_to_regions(&regions, 1000.0, 600.0).unwrap();
        let b = Projection::fit_to_regions(&regions, 1000.0, 600.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.project(2.3, 48.8), b.project(2.3, 48.8));
    }
}
