//! SceneFrame to SVG adapter. The engine emits a declarative frame; this
//! module is the thin layer that serializes it for a concrete surface.

use std::fmt::Write;

use chronomap_engine::{Marker, RegionShape, SceneFrame};

pub fn render_svg(frame: &SceneFrame) -> String {
    let mut out = String::with_capacity(64 * 1024);

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        frame.width, frame.height
    );

    // Everything sits in one group so pan/zoom applies uniformly.
    let t = &frame.transform;
    let _ = writeln!(
        out,
        r#"  <g transform="translate({},{}) scale({})">"#,
        t.translate_x, t.translate_y, t.scale
    );

    let _ = writeln!(
        out,
        r#"    <rect x="0" y="0" width="{}" height="{}" fill="{}" stroke="black" stroke-width="1.5"/>"#,
        frame.width, frame.height, frame.sea_fill
    );

    for region in &frame.regions {
        write_region(&mut out, region);
    }

    // A one-shot document draws the full rendered set: inserts plus
    // refreshed survivors. Removals only matter to retained surfaces.
    for marker in frame.markers.inserts.iter().chain(&frame.markers.updates) {
        write_marker(&mut out, marker);
    }

    out.push_str("  </g>\n</svg>\n");
    out
}

fn write_region(out: &mut String, region: &RegionShape) {
    let mut path = String::new();
    for ring in &region.rings {
        for (i, (x, y)) in ring.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(path, "{command}{x:.2},{y:.2}");
        }
        path.push('Z');
    }

    let _ = write!(
        out,
        r#"    <path d="{path}" fill="{}" stroke="{}" stroke-width="{}" stroke-opacity="{}">"#,
        region.fill, region.stroke, region.stroke_width, region.stroke_opacity
    );
    if let Some(label) = &region.hover_label {
        let _ = write!(out, "<title>{}</title>", xml_escape(label));
    }
    out.push_str("</path>\n");
}

fn write_marker(out: &mut String, marker: &Marker) {
    let _ = writeln!(
        out,
        r#"    <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        marker.x, marker.y, marker.radius, marker.fill, marker.stroke, marker.stroke_width
    );
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
