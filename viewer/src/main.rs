use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chronomap_engine::{BasemapSource, MapTheme, WorldMap};
use chronomap_shared::{
    EventFilter, HistoricalEvent, Region, YearRange, basemap_for_year, filter_events,
    merge_monthly, regions_from_geojson,
};

mod svg;

/// Render a filtered slice of the historical event corpus over a period
/// world basemap, as a static SVG document.
#[derive(Parser)]
#[command(name = "chronomap")]
#[command(author, version)]
#[command(about = "Render historical events on a period world map as SVG")]
struct Cli {
    /// Historical basemap GeoJSON file (NAME / SUBJECTO properties)
    #[arg(long)]
    basemap: PathBuf,

    /// Event corpus: a JSON array of events, or a directory of
    /// month-partitioned arrays to merge
    #[arg(long)]
    events: PathBuf,

    /// Free-text search over descriptions; double-quote phrases to keep them whole
    #[arg(long)]
    search: Option<String>,

    /// Start of an inclusive year window (negative = BCE); requires --to
    #[arg(long, allow_negative_numbers = true)]
    from: Option<i32>,

    /// End of an inclusive year window; requires --from
    #[arg(long, allow_negative_numbers = true)]
    to: Option<i32>,

    /// Year ceiling: with --search, keep matching events up to this year
    #[arg(long, allow_negative_numbers = true)]
    year: Option<i32>,

    /// Use the dark theme
    #[arg(long)]
    dark: bool,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Highlight the event whose description contains this exact text
    #[arg(long)]
    highlight: Option<String>,

    /// Output SVG path
    #[arg(short, long, default_value = "map.svg")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let filter = build_filter(&cli)?;

    let corpus = load_corpus(&cli.events)?;
    let regions = load_basemap(&cli.basemap)?;
    info!(
        events = corpus.len(),
        regions = regions.len(),
        "loaded corpus and basemap"
    );

    let implausible = corpus.iter().filter(|event| !event.is_plausible()).count();
    if implausible > 0 {
        warn!(implausible, "corpus contains events with impossible dates");
    }

    if let EventFilter::YearWindow { range } = &filter {
        let midpoint = range.start / 2 + range.end / 2;
        if let Ok(name) = basemap_for_year(midpoint) {
            info!(basemap = %name, "nearest period basemap for the window midpoint");
        }
    }

    let filtered = filter_events(&corpus, &filter);
    info!(matched = filtered.len(), "filtered corpus");
    if filtered.is_empty() {
        warn!("no events matched; the map will carry no markers");
    }

    let highlighted = cli.highlight.as_deref().and_then(|needle| {
        let found = filtered
            .iter()
            .find(|event| event.plain_description().contains(needle));
        if found.is_none() {
            warn!(needle, "no filtered event matches the highlight text");
        }
        found.cloned()
    });

    let theme = MapTheme::for_mode(cli.dark);
    let mut map = WorldMap::new(BasemapSource::Resolved(regions), cli.width, theme)?;
    let frame = map.render(&filtered, highlighted.as_ref(), 0.0);

    let document = svg::render_svg(&frame);
    fs::write(&cli.out, document)
        .with_context(|| format!("writing {}", cli.out.display()))?;
    info!(out = %cli.out.display(), "wrote SVG");
    Ok(())
}

/// Pick the filter policy from the flags. Search and year-window modes are
/// mutually exclusive by design, not layered.
fn build_filter(cli: &Cli) -> Result<EventFilter> {
    match (&cli.search, cli.from, cli.to, cli.year) {
        (Some(terms), None, None, Some(year)) => Ok(EventFilter::SearchUpTo {
            terms: terms.clone(),
            year,
        }),
        (Some(terms), None, None, None) => Ok(EventFilter::Search {
            terms: terms.clone(),
        }),
        (None, Some(from), Some(to), None) => Ok(EventFilter::YearWindow {
            range: YearRange::new(from, to)?,
        }),
        (None, None, None, None) => {
            warn!("no filter given; an empty search matches no events");
            Ok(EventFilter::Search {
                terms: String::new(),
            })
        }
        _ => bail!(
            "choose one filter mode: --search [--year N], or --from/--to as a pair"
        ),
    }
}

/// Load the corpus from one JSON array, or merge a directory of
/// month-partitioned arrays (`01.json` .. `12.json`) into one.
fn load_corpus(path: &Path) -> Result<Vec<HistoricalEvent>> {
    if !path.is_dir() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading event corpus {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("parsing event corpus {}", path.display()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)
        .with_context(|| format!("listing corpus directory {}", path.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|file| file.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut monthly = Vec::with_capacity(files.len());
    for file in files {
        let raw = fs::read_to_string(&file)
            .with_context(|| format!("reading event corpus {}", file.display()))?;
        let events: Vec<HistoricalEvent> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing event corpus {}", file.display()))?;
        monthly.push(events);
    }
    Ok(merge_monthly(monthly))
}

fn load_basemap(path: &Path) -> Result<Vec<Region>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading basemap {}", path.display()))?;
    let collection: geojson::FeatureCollection = raw
        .parse()
        .with_context(|| format!("parsing basemap {}", path.display()))?;
    Ok(regions_from_geojson(&collection))
}
