use crate::error::MapError;

/// Years for which a historical basemap exists, sparse and ordered from the
/// deep past forward. Matches the `world_*.geojson` files shipped with the
/// historical-basemaps data set.
pub const AVAILABLE_YEARS: [i32; 53] = [
    -123000, -10000, -8000, -5000, -4000, -3000, -2000, -1500, -1000, -700, -500, -400, -323,
    -300, -200, -100, -1, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000, 1100, 1200, 1279,
    1300, 1400, 1492, 1500, 1530, 1600, 1650, 1700, 1715, 1783, 1800, 1815, 1880, 1900, 1914,
    1920, 1930, 1938, 1945, 1960, 1994, 2000, 2010,
];

/// The element of `available_years` closest to `target_year`. Ties resolve
/// to the first minimal-distance candidate in a left-to-right scan; callers
/// depend on that exact behavior for reproducible basemap selection.
pub fn closest_period(target_year: i32, available_years: &[i32]) -> Result<i32, MapError> {
    let mut candidates = available_years.iter().copied();
    let Some(first) = candidates.next() else {
        return Err(MapError::InvalidInput(
            "no available basemap years".to_string(),
        ));
    };

    let distance = |year: i32| (i64::from(year) - i64::from(target_year)).abs();
    Ok(candidates.fold(first, |best, candidate| {
        if distance(candidate) < distance(best) {
            candidate
        } else {
            best
        }
    }))
}

/// Basemap filename for a period year, e.g. `-500` -> `"world_bc500.geojson"`
/// and `1914` -> `"world_1914.geojson"`.
pub fn basemap_filename(period_year: i32) -> String {
    if period_year < 0 {
        format!("world_bc{}.geojson", period_year.unsigned_abs())
    } else {
        format!("world_{period_year}.geojson")
    }
}

/// Filename of the basemap nearest to an arbitrary target year.
pub fn basemap_for_year(target_year: i32) -> Result<String, MapError> {
    closest_period(target_year, &AVAILABLE_YEARS).map(basemap_filename)
}
