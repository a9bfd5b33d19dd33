use chronomap_shared::{HistoricalEvent, Region};

/// Pointer offset so the tooltip trails the cursor instead of sitting
/// under it.
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, 10.0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub heading: String,
    /// Present for events (the description, markup preserved for the
    /// adapter to render); absent for regions.
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipState {
    Hidden,
    Visible {
        content: TooltipContent,
        x: f64,
        y: f64,
    },
}

/// Hover state machine for one map instance. The original shared a single
/// document-level tooltip element across maps; per-instance state makes
/// concurrent maps and headless tests possible.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    state: TooltipState,
}

impl Tooltip {
    pub fn new() -> Self {
        Self {
            state: TooltipState::Hidden,
        }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, TooltipState::Visible { .. })
    }

    /// Entering a region shows its resolved name. Unclaimed regions have
    /// nothing to say; the hover is ignored and the state is unchanged.
    pub fn hover_region(&mut self, region: &Region, pointer_x: f64, pointer_y: f64) {
        let Some(name) = region.display_name() else {
            return;
        };
        self.show(
            TooltipContent {
                heading: name,
                body: None,
            },
            pointer_x,
            pointer_y,
        );
    }

    /// Entering an event marker shows the formatted date and description,
    /// e.g. heading `"March 15, 44 BCE"`.
    pub fn hover_event(&mut self, event: &HistoricalEvent, pointer_x: f64, pointer_y: f64) {
        self.show(
            TooltipContent {
                heading: event.date_label(),
                body: Some(event.description.clone()),
            },
            pointer_x,
            pointer_y,
        );
    }

    /// Pointer movement while hovering repositions the tooltip without
    /// touching its content. Ignored while hidden.
    pub fn pointer_moved(&mut self, pointer_x: f64, pointer_y: f64) {
        if let TooltipState::Visible { x, y, .. } = &mut self.state {
            *x = pointer_x + TOOLTIP_OFFSET.0;
            *y = pointer_y + TOOLTIP_OFFSET.1;
        }
    }

    pub fn leave(&mut self) {
        self.state = TooltipState::Hidden;
    }

    fn show(&mut self, content: TooltipContent, pointer_x: f64, pointer_y: f64) {
        self.state = TooltipState::Visible {
            content,
            x: pointer_x + TOOLTIP_OFFSET.0,
            y: pointer_y + TOOLTIP_OFFSET.1,
        };
    }
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::MultiPolygon;

    fn event(year: i32) -> HistoricalEvent {
        HistoricalEvent {
            day: 15,
            month: "March".to_string(),
            year,
            description: "Caesar is assassinated".to_string(),
            latitude: 41.9,
            longitude: 12.5,
        }
    }

    fn region(name: Option<&str>) -> Region {
        Region {
            id: 0,
            name: name.map(str::to_string),
            claiming_entity: None,
            boundary: MultiPolygon(vec![]),
        }
    }

    #[test]
    fn starts_hidden() {
        assert_eq!(*Tooltip::new().state(), TooltipState::Hidden);
    }

    #[test]
    fn event_hover_formats_bce_dates() {
        let mut tooltip = Tooltip::new();
        tooltip.hover_event(&event(-44), 100.0, 50.0);

        let TooltipState::Visible { content, x, y } = tooltip.state() else {
            panic!("tooltip should be visible");
        };
        assert_eq!(content.heading, "March 15, 44 BCE");
        assert_eq!(content.body.as_deref(), Some("Caesar is assassinated"));
        assert_eq!((*x, *y), (110.0, 60.0));
    }

    #[test]
    fn event_hover_formats_ce_dates() {
        let mut tooltip = Tooltip::new();
        tooltip.hover_event(&event(1815), 0.0, 0.0);

        let TooltipState::Visible { content, .. } = tooltip.state() else {
            panic!("tooltip should be visible");
        };
        assert_eq!(content.heading, "March 15, 1815 CE");
    }

    #[test]
    fn region_hover_shows_the_name() {
        let mut tooltip = Tooltip::new();
        tooltip.hover_region(&region(Some("Carthage")), 5.0, 5.0);

        let TooltipState::Visible { content, .. } = tooltip.state() else {
            panic!("tooltip should be visible");
        };
        assert_eq!(content.heading, "Carthage");
        assert_eq!(content.body, None);
    }

    #[test]
    fn unclaimed_region_hover_is_ignored() {
        let mut tooltip = Tooltip::new();
        tooltip.hover_region(&region(None), 5.0, 5.0);
        assert_eq!(*tooltip.state(), TooltipState::Hidden);
    }

    #[test]
    fn movement_updates_position_only() {
        let mut tooltip = Tooltip::new();
        tooltip.hover_event(&event(-44), 100.0, 50.0);
        tooltip.pointer_moved(200.0, 80.0);

        let TooltipState::Visible { content, x, y } = tooltip.state() else {
            panic!("tooltip should be visible");
        };
        assert_eq!(content.heading, "March 15, 44 BCE");
        assert_eq!((*x, *y), (210.0, 90.0));
    }

    #[test]
    fn movement_while_hidden_stays_hidden() {
        let mut tooltip = Tooltip::new();
        tooltip.pointer_moved(200.0, 80.0);
        assert_eq!(*tooltip.state(), TooltipState::Hidden);
    }

    #[test]
    fn leave_hides() {
        let mut tooltip = Tooltip::new();
        tooltip.hover_event(&event(-44), 100.0, 50.0);
        tooltip.leave();
        assert_eq!(*tooltip.state(), TooltipState::Hidden);
    }
}
