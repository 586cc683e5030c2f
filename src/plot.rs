//! SVG rendering of the score distribution.
//!
//! One image, two panels:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  histogram of compound score │  20 bins
//! ├──────────────────────────────┤
//! │  pie of category counts      │  Positive / Neutral / Negative
//! └──────────────────────────────┘
//! ```
//!
//! The SVG is written by hand; the image is small and fixed-layout.

use anyhow::{Context, Result};
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tweet_sentiment_core::{histogram, Sentiment, SummaryResult, HISTOGRAM_BINS};

use crate::report::output_path;

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 800.0;

// Histogram plot area.
const HIST_LEFT: f64 = 90.0;
const HIST_RIGHT: f64 = 1160.0;
const HIST_TOP: f64 = 60.0;
const HIST_BOTTOM: f64 = 330.0;

// Pie centre and radius.
const PIE_CX: f64 = 600.0;
const PIE_CY: f64 = 590.0;
const PIE_R: f64 = 150.0;

const BAR_FILL: &str = "skyblue";
const BAR_EDGE: &str = "black";

/// File name of the plot image for a run.
pub fn plots_file_name(timestamp: &str) -> String {
    format!("sentiment_analysis_plots_{}.svg", timestamp)
}

/// Render the plots and write them into `dir`.
pub fn write_plots(summary: &SummaryResult, title: &str, dir: &Path, timestamp: &str) -> Result<PathBuf> {
    let path = output_path(dir, &plots_file_name(timestamp))
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    let svg = render_svg(summary, title);
    std::fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn slice_color(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "green",
        Sentiment::Neutral => "gray",
        Sentiment::Negative => "red",
    }
}

/// Render the two-panel SVG document.
pub fn render_svg(summary: &SummaryResult, title: &str) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

    render_histogram(&mut svg, &summary.compound_scores(), title);
    render_pie(&mut svg, summary);

    svg.push_str("</svg>\n");
    svg
}

fn render_histogram(svg: &mut String, scores: &[f64], title: &str) {
    let bins = histogram(scores, HISTOGRAM_BINS);

    let _ = writeln!(
        svg,
        r#"<text x="{}" y="35" font-size="20" text-anchor="middle">{}</text>"#,
        (HIST_LEFT + HIST_RIGHT) / 2.0,
        xml_escape(title)
    );

    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return;
    };
    let lo = first.lower;
    let hi = last.upper;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    let plot_w = HIST_RIGHT - HIST_LEFT;
    let plot_h = HIST_BOTTOM - HIST_TOP;
    let x_of = |v: f64| HIST_LEFT + (v - lo) / (hi - lo) * plot_w;
    let y_of = |c: f64| HIST_BOTTOM - c / max_count as f64 * plot_h;

    for bin in &bins {
        if bin.count == 0 {
            continue;
        }
        let x = x_of(bin.lower);
        let y = y_of(bin.count as f64);
        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}"/>"#,
            x,
            y,
            x_of(bin.upper) - x,
            HIST_BOTTOM - y,
            BAR_FILL,
            BAR_EDGE
        );
    }

    // Axes.
    let _ = writeln!(
        svg,
        r#"<path d="M{l} {t} L{l} {b} L{r} {b}" fill="none" stroke="black"/>"#,
        l = HIST_LEFT,
        t = HIST_TOP,
        b = HIST_BOTTOM,
        r = HIST_RIGHT
    );

    for i in 0..=4 {
        let v = lo + (hi - lo) * i as f64 / 4.0;
        let x = x_of(v);
        let _ = writeln!(
            svg,
            r#"<line x1="{x:.2}" y1="{b}" x2="{x:.2}" y2="{b5}" stroke="black"/><text x="{x:.2}" y="{by}" font-size="12" text-anchor="middle">{v:.2}</text>"#,
            x = x,
            b = HIST_BOTTOM,
            b5 = HIST_BOTTOM + 5.0,
            by = HIST_BOTTOM + 20.0,
            v = v
        );
    }

    let step = (max_count + 4) / 5;
    let mut tick = 0;
    while tick <= max_count {
        let y = y_of(tick as f64);
        let _ = writeln!(
            svg,
            r#"<line x1="{l5}" y1="{y:.2}" x2="{l}" y2="{y:.2}" stroke="black"/><text x="{lt}" y="{yt:.2}" font-size="12" text-anchor="end">{c}</text>"#,
            l5 = HIST_LEFT - 5.0,
            l = HIST_LEFT,
            lt = HIST_LEFT - 8.0,
            y = y,
            yt = y + 4.0,
            c = tick
        );
        tick += step;
    }

    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="14" text-anchor="middle">Sentiment Score</text>"#,
        (HIST_LEFT + HIST_RIGHT) / 2.0,
        HIST_BOTTOM + 45.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="30" y="{y}" font-size="14" text-anchor="middle" transform="rotate(-90 30 {y})">Frequency</text>"#,
        y = (HIST_TOP + HIST_BOTTOM) / 2.0
    );
}

fn render_pie(svg: &mut String, summary: &SummaryResult) {
    let counts = summary.counts();
    let total = counts.total();

    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="20" text-anchor="middle">Distribution of Sentiment Categories</text>"#,
        PIE_CX,
        PIE_CY - PIE_R - 40.0
    );

    if total == 0 {
        return;
    }

    let slices: Vec<(Sentiment, usize)> = Sentiment::ALL
        .iter()
        .map(|s| (*s, counts.get(*s)))
        .filter(|(_, n)| *n > 0)
        .collect();

    // Angles run counter-clockwise from 3 o'clock; SVG y grows downwards.
    let point = |angle: f64, r: f64| (PIE_CX + r * angle.cos(), PIE_CY - r * angle.sin());

    let mut start = 0.0f64;
    for (sentiment, n) in slices {
        let fraction = n as f64 / total as f64;
        let sweep = fraction * 2.0 * PI;
        let end = start + sweep;

        if n == total {
            let _ = writeln!(
                svg,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                PIE_CX,
                PIE_CY,
                PIE_R,
                slice_color(sentiment)
            );
        } else {
            let (x1, y1) = point(start, PIE_R);
            let (x2, y2) = point(end, PIE_R);
            let large_arc = if sweep > PI { 1 } else { 0 };
            let _ = writeln!(
                svg,
                r#"<path d="M{cx} {cy} L{x1:.2} {y1:.2} A{r} {r} 0 {la} 0 {x2:.2} {y2:.2} Z" fill="{c}"/>"#,
                cx = PIE_CX,
                cy = PIE_CY,
                x1 = x1,
                y1 = y1,
                r = PIE_R,
                la = large_arc,
                x2 = x2,
                y2 = y2,
                c = slice_color(sentiment)
            );
        }

        let mid = start + sweep / 2.0;
        let (px, py) = point(mid, PIE_R * 0.6);
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="14" text-anchor="middle">{:.1}%</text>"#,
            px,
            py,
            fraction * 100.0
        );
        let (lx, ly) = point(mid, PIE_R * 1.15);
        let anchor = if mid.cos() >= 0.0 { "start" } else { "end" };
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="14" text-anchor="{}">{}</text>"#,
            lx,
            ly,
            anchor,
            sentiment
        );

        start = end;
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tweet_sentiment_core::{classify, summarize, LabeledRecord, ScoreRecord};

    fn summary(scores: &[f64]) -> SummaryResult {
        let records = scores
            .iter()
            .enumerate()
            .map(|(i, &c)| LabeledRecord {
                index: i,
                record: ScoreRecord {
                    text: format!("t{}", i),
                    compound: c,
                    pos: 0.0,
                    neg: 0.0,
                    neu: 1.0,
                },
                sentiment: classify(c),
            })
            .collect();
        summarize(records).into_summary().unwrap()
    }

    #[test]
    fn test_svg_has_bars_and_slices() {
        let svg = render_svg(&summary(&[0.8, -0.7, 0.0]), "Scores");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches(r#"fill="skyblue""#).count(), 3);
        assert!(svg.contains(r#"fill="green""#));
        assert!(svg.contains(r#"fill="gray""#));
        assert!(svg.contains(r#"fill="red""#));
        assert_eq!(svg.matches("33.3%").count(), 3);
    }

    #[test]
    fn test_single_category_draws_full_circle() {
        let svg = render_svg(&summary(&[0.5, 0.6]), "Scores");
        assert!(svg.contains("<circle"));
        assert!(svg.contains("100.0%"));
        assert!(!svg.contains(r#"fill="red""#));
    }

    #[test]
    fn test_title_is_escaped() {
        let svg = render_svg(&summary(&[0.1]), "Tweets about 'R&D' <2024>");
        assert!(svg.contains("Tweets about &apos;R&amp;D&apos; &lt;2024&gt;"));
    }
}
