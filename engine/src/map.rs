use chronomap_shared::{HistoricalEvent, MapError, Region};
use tracing::info;

use crate::basemap::BasemapSource;
use crate::projection::{ASPECT_RATIO, Projection};
use crate::reconcile::MarkerReconciler;
use crate::scene::{self, Marker, SceneFrame, marker_key};
use crate::theme::MapTheme;
use crate::tooltip::{Tooltip, TooltipState};
use crate::viewport::{Viewport, ZoomTransform};

/// One interactive map instance. Owns the viewport transform, the fitted
/// projection, the marker reconciler and the tooltip; `render` combines
/// them with a filtered event list into a declarative scene frame.
///
/// Rebuilding the instance for a new basemap is expected; callers carry the
/// transform across with `current_transform` / `restore_transform`.
#[derive(Debug, Clone)]
pub struct WorldMap {
    width: f64,
    height: f64,
    theme: MapTheme,
    regions: Vec<Region>,
    projection: Projection,
    viewport: Viewport,
    reconciler: MarkerReconciler,
    tooltip: Tooltip,
}

impl WorldMap {
    /// Build a map over a resolved basemap. A pending source must go
    /// through its load step first.
    pub fn new(source: BasemapSource, width: f64, theme: MapTheme) -> Result<Self, MapError> {
        theme.validate()?;
        let regions = match source {
            BasemapSource::Pending(_) => return Err(MapError::UnresolvedBasemap),
            BasemapSource::Resolved(regions) => regions,
        };
        if regions.is_empty() {
            return Err(MapError::EmptyBasemap);
        }

        let height = width * ASPECT_RATIO;
        let projection = Projection::fit_to_regions(&regions, width, height)?;
        info!(regions = regions.len(), width, "fitted basemap");

        Ok(Self {
            width,
            height,
            theme,
            regions,
            projection,
            viewport: Viewport::new(width, height),
            reconciler: MarkerReconciler::new(),
            tooltip: Tooltip::new(),
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn theme(&self) -> &MapTheme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: MapTheme) -> Result<(), MapError> {
        theme.validate()?;
        self.theme = theme;
        Ok(())
    }

    /// Swap in a different period's basemap. The projection refits; the
    /// user's pan/zoom and any rendered markers survive untouched.
    pub fn set_basemap(&mut self, source: BasemapSource) -> Result<(), MapError> {
        let regions = match source {
            BasemapSource::Pending(_) => return Err(MapError::UnresolvedBasemap),
            BasemapSource::Resolved(regions) => regions,
        };
        if regions.is_empty() {
            return Err(MapError::EmptyBasemap);
        }
        self.projection = Projection::fit_to_regions(&regions, self.width, self.height)?;
        self.regions = regions;
        Ok(())
    }

    /// Refit to a new viewport width. The zoom transform is a separate
    /// layer over the projection, so the view the user set up survives.
    pub fn resize(&mut self, width: f64) -> Result<(), MapError> {
        self.width = width;
        self.height = width * ASPECT_RATIO;
        self.projection = Projection::fit_to_regions(&self.regions, self.width, self.height)?;
        self.viewport.set_viewport_size(self.width, self.height);
        Ok(())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn current_transform(&self) -> ZoomTransform {
        self.viewport.current_transform()
    }

    /// Resume the pan/zoom left by a previous instance.
    pub fn restore_transform(&mut self, transform: ZoomTransform) {
        self.viewport.restore_transform(transform);
    }

    /// Produce the frame for the current inputs. Calling this twice with
    /// identical inputs yields a second diff with no inserts or removals;
    /// the only state advanced here is the reconciler's rendered set and
    /// any in-flight reset animation sampled at `now_ms`.
    pub fn render(
        &mut self,
        events: &[HistoricalEvent],
        highlighted: Option<&HistoricalEvent>,
        now_ms: f64,
    ) -> SceneFrame {
        let transform = self.viewport.transform_at(now_ms);
        let highlight_key = highlighted.map(marker_key);

        let mut markers: Vec<Marker> = Vec::with_capacity(events.len() + 1);
        for event in events {
            let is_highlight = highlight_key.as_deref() == Some(marker_key(event).as_str());
            if let Some(marker) =
                scene::event_marker(event, &self.projection, &self.theme, is_highlight)
            {
                markers.push(marker);
            }
        }

        // The highlighted event is drawn even when the active filter does
        // not include it.
        if let (Some(event), Some(key)) = (highlighted, highlight_key) {
            if !markers.iter().any(|marker| marker.key == key) {
                if let Some(marker) =
                    scene::event_marker(event, &self.projection, &self.theme, true)
                {
                    markers.push(marker);
                }
            }
        }

        SceneFrame {
            width: self.width,
            height: self.height,
            sea_fill: self.theme.sea_fill.clone(),
            transform,
            regions: scene::region_shapes(&self.regions, &self.projection, &self.theme, highlighted),
            markers: self.reconciler.reconcile(markers),
        }
    }

    /// The first region whose boundary contains the coordinate; fails
    /// closed on bad coordinates.
    pub fn region_containing(&self, longitude: f64, latitude: f64) -> Option<&Region> {
        self.regions
            .iter()
            .find(|region| scene::region_contains(region, longitude, latitude))
    }

    pub fn tooltip_state(&self) -> &TooltipState {
        self.tooltip.state()
    }

    /// Hover over a region by its stable id, as reported in `RegionShape`.
    pub fn hover_region(&mut self, region_id: usize, pointer_x: f64, pointer_y: f64) {
        if let Some(region) = self.regions.iter().find(|region| region.id == region_id) {
            self.tooltip.hover_region(region, pointer_x, pointer_y);
        }
    }

    pub fn hover_event(&mut self, event: &HistoricalEvent, pointer_x: f64, pointer_y: f64) {
        self.tooltip.hover_event(event, pointer_x, pointer_y);
    }

    pub fn pointer_moved(&mut self, pointer_x: f64, pointer_y: f64) {
        self.tooltip.pointer_moved(pointer_x, pointer_y);
    }

    pub fn leave_hover(&mut self) {
        self.tooltip.leave();
    }
}
