use chronomap_shared::MapError;
use serde::{Deserialize, Serialize};

/// Render colors for one map instance, validated up front so a missing
/// entry cannot surface as an undefined lookup mid-render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapTheme {
    pub land_fill: String,
    pub unclaimed_fill: String,
    pub land_stroke: String,
    pub land_highlight: String,
    pub sea_fill: String,
    pub point_fill: String,
    pub point_stroke: String,
    pub tooltip_bg: String,
    pub tooltip_fg: String,
}

impl MapTheme {
    pub fn light() -> Self {
        Self {
            land_fill: "darkgrey".to_string(),
            unclaimed_fill: "lightgrey".to_string(),
            land_stroke: "black".to_string(),
            land_highlight: "crimson".to_string(),
            sea_fill: "lightblue".to_string(),
            point_fill: "darkgrey".to_string(),
            point_stroke: "white".to_string(),
            tooltip_bg: "ivory".to_string(),
            tooltip_fg: "darkslategrey".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            land_fill: "darkgrey".to_string(),
            unclaimed_fill: "lightgrey".to_string(),
            land_stroke: "white".to_string(),
            land_highlight: "coral".to_string(),
            sea_fill: "steelblue".to_string(),
            point_fill: "white".to_string(),
            point_stroke: "black".to_string(),
            tooltip_bg: "darkslategrey".to_string(),
            tooltip_fg: "ivory".to_string(),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        let entries = [
            ("land_fill", &self.land_fill),
            ("unclaimed_fill", &self.unclaimed_fill),
            ("land_stroke", &self.land_stroke),
            ("land_highlight", &self.land_highlight),
            ("sea_fill", &self.sea_fill),
            ("point_fill", &self.point_fill),
            ("point_stroke", &self.point_stroke),
            ("tooltip_bg", &self.tooltip_bg),
            ("tooltip_fg", &self.tooltip_fg),
        ];
        for (field, value) in entries {
            if value.trim().is_empty() {
                return Err(MapError::InvalidTheme(field));
            }
        }
        Ok(())
    }
}

impl Default for MapTheme {
    fn default() -> Self {
        Self::light()
    }
}
