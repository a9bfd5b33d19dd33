use std::collections::HashMap;

use tracing::debug;

use crate::scene::Marker;

/// The visual mutations one reconciliation pass asks of the adapter.
/// Updates refresh position/content of elements that already exist; they
/// never tear an element down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerDiff {
    pub inserts: Vec<Marker>,
    pub updates: Vec<Marker>,
    pub removals: Vec<String>,
}

impl MarkerDiff {
    pub fn is_noop(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.removals.is_empty()
    }
}

/// Keyed set-diff of rendered markers against the latest filtered event
/// list. Matching by `MarkerKey` rather than index keeps unrelated filter
/// changes from rebuilding markers that did not move.
#[derive(Debug, Clone, Default)]
pub struct MarkerReconciler {
    rendered: HashMap<String, Marker>,
}

impl MarkerReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered_len(&self) -> usize {
        self.rendered.len()
    }

    /// Diff `next` against the currently rendered set and adopt it as the
    /// new rendered state. Duplicate keys in the input collapse to their
    /// first occurrence. Removals are sorted so output order is stable.
    pub fn reconcile(&mut self, next: Vec<Marker>) -> MarkerDiff {
        let mut next_rendered: HashMap<String, Marker> = HashMap::with_capacity(next.len());
        let mut inserts = Vec::new();
        let mut updates = Vec::new();

        for marker in next {
            if next_rendered.contains_key(&marker.key) {
                continue;
            }
            if self.rendered.contains_key(&marker.key) {
                updates.push(marker.clone());
            } else {
                inserts.push(marker.clone());
            }
            next_rendered.insert(marker.key.clone(), marker);
        }

        let mut removals: Vec<String> = self
            .rendered
            .keys()
            .filter(|key| !next_rendered.contains_key(*key))
            .cloned()
            .collect();
        removals.sort_unstable();

        self.rendered = next_rendered;
        debug!(
            inserts = inserts.len(),
            updates = updates.len(),
            removals = removals.len(),
            rendered = self.rendered.len(),
            "reconciled markers"
        );

        MarkerDiff {
            inserts,
            updates,
            removals,
        }
    }
}
