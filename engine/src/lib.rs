pub mod basemap;
pub mod map;
pub mod projection;
pub mod reconcile;
pub mod scene;
pub mod theme;
pub mod tooltip;
pub mod viewport;

pub use basemap::BasemapSource;
pub use map::WorldMap;
pub use projection::Projection;
pub use reconcile::{MarkerDiff, MarkerReconciler};
pub use scene::{Marker, RegionShape, SceneFrame, marker_key};
pub use theme::MapTheme;
pub use tooltip::{Tooltip, TooltipContent, TooltipState};
pub use viewport::{Viewport, ZoomTransform};
