pub mod colors;
pub mod error;
pub mod event;
pub mod period;
pub mod region;
pub mod search;

pub use colors::{PALETTE, UNCLAIMED_COLOR, color_for, region_color};
pub use error::MapError;
pub use event::{HistoricalEvent, merge_monthly, strip_html};
pub use period::{AVAILABLE_YEARS, basemap_filename, basemap_for_year, closest_period};
pub use region::{Region, regions_from_geojson};
pub use search::{EventFilter, YearRange, filter_events, tokenize};
