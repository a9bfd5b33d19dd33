use crate::region::{Region, UNCLAIMED_SENTINEL};

/// Fill for regions with no resolvable claimant.
pub const UNCLAIMED_COLOR: &str = "lightgrey";

/// A fixed palette of visually distinct colors. Order is part of the
/// contract: the hash-modulo assignment below depends on it.
pub const PALETTE: [&str; 50] = [
    "#4e79a7", // blue
    "#f28e2b", // orange
    "#e15759", // red
    "#76b7b2", // teal
    "#59a14f", // green
    "#edc948", // yellow
    "#b07aa1", // purple
    "#ff9da7", // pink
    "#9c755f", // brown
    "#bab0ac", // grey
    "#1f77b4", // darker blue
    "#2ca02c", // darker green
    "#d62728", // crimson
    "#9467bd", // violet
    "#8c564b", // chocolate
    "#e377c2", // orchid
    "#7f7f7f", // dark grey
    "#bcbd22", // olive
    "#17becf", // cyan
    "#aec7e8", // light blue
    "#ffbb78", // light orange
    "#98df8a", // light green
    "#ff9896", // light red
    "#c5b0d5", // light purple
    "#c49c94", // light brown
    "#f7b6d2", // light pink
    "#c7c7c7", // silver
    "#dbdb8d", // light olive
    "#9edae5", // light cyan
    "#393b79", // navy
    "#5254a3", // indigo
    "#6b6ecf", // periwinkle
    "#637939", // dark olive
    "#8ca252", // moss
    "#b5cf6b", // lime
    "#8c6d31", // bronze
    "#bd9e39", // gold
    "#e7ba52", // amber
    "#843c39", // maroon
    "#ad494a", // brick
    "#d6616b", // salmon
    "#7b4173", // plum
    "#a55194", // magenta
    "#ce6dbd", // fuschia
    "#de9ed6", // lavender
    "#3182bd", // royal blue
    "#6baed6", // sky blue
    "#9ecae1", // powder blue
    "#31a354", // emerald
    "#74c476", // seafoam
];

/// Rolling polynomial hash over UTF-16 code units with 32-bit wraparound,
/// then absolute value. Stable across runs for the same input.
fn hash_name(name: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    hash.unsigned_abs()
}

/// Deterministic palette color for a name.
pub fn color_for(name: &str) -> &'static str {
    PALETTE[hash_name(name) as usize % PALETTE.len()]
}

/// Palette color for a region: the claiming entity when it resolves,
/// otherwise the region's own name, otherwise `unclaimed_color`.
/// Known historical aliases are normalized first so the same polity keeps
/// one color across basemap eras.
pub fn region_color<'a>(region: &Region, unclaimed_color: &'a str) -> &'a str {
    let Some(key) = color_key(region) else {
        return unclaimed_color;
    };
    color_for(normalize_alias(key))
}

fn color_key(region: &Region) -> Option<&str> {
    let resolvable =
        |value: &&str| !value.is_empty() && *value != UNCLAIMED_SENTINEL;
    region
        .claiming_entity
        .as_deref()
        .filter(resolvable)
        .or_else(|| region.name.as_deref().filter(resolvable))
}

/// Some basemap eras name the same polity differently. Collapse the known
/// variants before hashing.
fn normalize_alias(key: &str) -> &str {
    match key {
        "United Kingdom of Great Britain and Ireland" => "United Kingdom",
        "United States" => "United States of America",
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::MultiPolygon;

    fn region(name: Option<&str>, claimant: Option<&str>) -> Region {
        Region {
            id: 0,
            name: name.map(str::to_string),
            claiming_entity: claimant.map(str::to_string),
            boundary: MultiPolygon(vec![]),
        }
    }

    #[test]
    fn color_for_is_deterministic() {
        assert_eq!(color_for("Roman Empire"), color_for("Roman Empire"));
    }

    #[test]
    fn color_for_matches_the_hash_contract() {
        // "a" hashes to 97; 97 % 50 = 47.
        assert_eq!(color_for("a"), PALETTE[47]);
        assert_eq!(color_for("a"), "#9ecae1");
    }

    #[test]
    fn color_for_always_lands_in_the_palette() {
        for name in ["France", "曹魏", "Khanate of the Golden Horde", "?!"] {
            assert!(PALETTE.contains(&color_for(name)));
        }
    }

    #[test]
    fn claiming_entity_wins_over_name() {
        let subject = region(Some("Bengal"), Some("United Kingdom"));
        assert_eq!(
            region_color(&subject, UNCLAIMED_COLOR),
            color_for("United Kingdom")
        );
    }

    #[test]
    fn unclaimed_sentinel_claimant_falls_back_to_name() {
        let r = region(Some("Gauls"), Some("unclaimed"));
        assert_eq!(region_color(&r, UNCLAIMED_COLOR), color_for("Gauls"));
    }

    #[test]
    fn nameless_region_gets_the_unclaimed_color() {
        let r = region(None, None);
        assert_eq!(region_color(&r, UNCLAIMED_COLOR), UNCLAIMED_COLOR);
        assert_eq!(region_color(&r, "dimgrey"), "dimgrey");
    }

    #[test]
    fn historical_aliases_share_a_color() {
        let victorian = region(None, Some("United Kingdom of Great Britain and Ireland"));
        let modern = region(None, Some("United Kingdom"));
        assert_eq!(
            region_color(&victorian, UNCLAIMED_COLOR),
            region_color(&modern, UNCLAIMED_COLOR)
        );

        let colonial = region(Some("United States"), None);
        let modern = region(Some("United States of America"), None);
        assert_eq!(
            region_color(&colonial, UNCLAIMED_COLOR),
            region_color(&modern, UNCLAIMED_COLOR)
        );
    }
}
