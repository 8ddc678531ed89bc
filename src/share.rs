//! Sharing the summary: a tweet intent link and an SVG summary card.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;
use url::Url;

use crate::geometry::{circumference, pie_segments, svg_path, trend_points, PIE_RADIUS};
use crate::payload::{PersonaKind, StatisticsPayload};
use crate::util::group_thousands;

const TWEET_INTENT: &str = "https://twitter.com/intent/tweet";

const PERSONA_COLORS: [&str; 5] = ["#8b5cf6", "#f97316", "#3b82f6", "#ec4899", "#10b981"];
const GOLD: &str = "#d4a855";
const BACKGROUND: &str = "#0a0908";

pub fn share_text(payload: &StatisticsPayload) -> String {
    format!(
        "I'm in the top {:.0}% of typists! Check out my typing stats 🚀",
        payload.top_percent()
    )
}

pub fn tweet_url(payload: &StatisticsPayload) -> Result<Url, url::ParseError> {
    Url::parse_with_params(TWEET_INTENT, &[("text", share_text(payload))])
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn persona_color(kind: PersonaKind, index: usize) -> &'static str {
    match kind {
        PersonaKind::FlowState => PERSONA_COLORS[0],
        PersonaKind::SpeedDemon => PERSONA_COLORS[1],
        PersonaKind::SteadyEddie => PERSONA_COLORS[2],
        PersonaKind::WarmUpMode => PERSONA_COLORS[3],
        PersonaKind::BalancedPerformer => PERSONA_COLORS[4],
        PersonaKind::Unrecognized => PERSONA_COLORS[index % PERSONA_COLORS.len()],
    }
}

/// The summary card as a standalone SVG document.
pub fn card_svg(payload: &StatisticsPayload) -> String {
    let mut svg = String::new();
    let c = circumference(PIE_RADIUS);
    let stats = [
        (format!("{:.0}", payload.comparisons.max_wpm), "Top WPM"),
        (
            format!("{:.1}%", payload.accuracy.overall_accuracy),
            "Accuracy",
        ),
        (group_thousands(payload.year_in_numbers.total_tests), "Tests"),
        (
            payload.year_in_numbers.longest_streak.to_string(),
            "Day Streak",
        ),
    ];

    let _ = writeln!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="800" viewBox="0 0 600 800">"##
    );
    let _ = writeln!(svg, r##"<rect width="600" height="800" fill="{BACKGROUND}"/>"##);
    let _ = writeln!(
        svg,
        r##"<text x="300" y="70" fill="{GOLD}" font-family="monospace" font-size="18" text-anchor="middle">THAT'S A WRAP</text>"##
    );
    let _ = writeln!(
        svg,
        r##"<text x="300" y="110" fill="#ffffff" font-family="monospace" font-size="30" text-anchor="middle">Your 2025 Summary</text>"##
    );

    for (i, (value, label)) in stats.iter().enumerate() {
        let x = 90 + (i % 2) * 240 + 60;
        let y = 180 + (i / 2) * 90;
        let _ = writeln!(
            svg,
            r##"<text x="{x}" y="{y}" fill="{GOLD}" font-family="monospace" font-size="34" text-anchor="middle">{}</text>"##,
            escape_xml(value)
        );
        let _ = writeln!(
            svg,
            r##"<text x="{x}" y="{}" fill="#9a9a9a" font-family="monospace" font-size="14" text-anchor="middle">{label}</text>"##,
            y + 24
        );
    }

    // persona donut
    let personas = &payload.persona.all_personas;
    let percentages: Vec<f64> = personas.iter().map(|p| p.percentage).collect();
    let _ = writeln!(svg, r##"<g transform="translate(150 470) rotate(-90)">"##);
    for (i, (segment, persona)) in pie_segments(&percentages).iter().zip(personas).enumerate() {
        let _ = writeln!(
            svg,
            r##"<circle r="{PIE_RADIUS}" fill="none" stroke="{}" stroke-width="18" stroke-dasharray="{:.2} {:.2}" stroke-dashoffset="{:.2}"/>"##,
            persona_color(persona.kind, i),
            segment.dash_array(PIE_RADIUS),
            c,
            segment.dash_offset(PIE_RADIUS)
        );
    }
    let _ = writeln!(svg, "</g>");
    let dominant = &payload.persona.dominant_persona;
    let _ = writeln!(
        svg,
        r##"<text x="230" y="465" fill="#ffffff" font-family="monospace" font-size="22">{}</text>"##,
        escape_xml(&dominant.name)
    );
    let _ = writeln!(
        svg,
        r##"<text x="230" y="490" fill="#9a9a9a" font-family="monospace" font-size="14">{:.0}% of your tests</text>"##,
        dominant.percentage
    );

    // journey trend in a 100x100 box
    let monthly: Vec<f64> = payload
        .journey
        .monthly_trend
        .iter()
        .map(|m| m.avg_wpm)
        .collect();
    let path = svg_path(&trend_points(&monthly));
    if !path.is_empty() {
        let _ = writeln!(
            svg,
            r##"<svg x="80" y="560" width="440" height="120" viewBox="0 0 100 100" preserveAspectRatio="none"><path d="{path}" fill="none" stroke="{GOLD}" stroke-width="2" vector-effect="non-scaling-stroke"/></svg>"##
        );
    }

    let _ = writeln!(
        svg,
        r##"<text x="300" y="740" fill="{GOLD}" font-family="monospace" font-size="20" text-anchor="middle">top {:.0}% of all typists worldwide</text>"##,
        payload.top_percent()
    );
    let _ = writeln!(svg, "</svg>");
    svg
}

/// Write the summary card into `dir`, named after the export time.
pub fn export_card(
    payload: &StatisticsPayload,
    dir: &Path,
    at: DateTime<Local>,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "typewrapped-2025-{}.svg",
        at.format("%Y%m%d-%H%M%S")
    ));
    fs::write(&path, card_svg(payload))?;
    info!(path = %path.display(), "share card exported");
    Ok(path)
}
