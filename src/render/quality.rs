use super::{write_png, FIGURE_SIZE, FONT};
use crate::boxplot::BoxSummary;
use anyhow::Result;
use indexmap::IndexMap;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

const TITLE: &str = "Quality Scores by Read Position";
const X_DESC: &str = "Position in Read (bp)";
const Y_DESC: &str = "Base Quality Value";

/// A little above the highest Illumina quality so the tops of the boxes show
const Y_RANGE: Range<f64> = 0.0..43.0;

const BOX_HALF_WIDTH: f64 = 0.25;
const CAP_HALF_WIDTH: f64 = 0.125;

const BOX_FILL: RGBColor = YELLOW;
const MEDIAN_COLOUR: RGBColor = RGBColor(0xff, 0x7f, 0x0e);

/// A background rectangle spanning the whole x axis, marking a quality category.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
    pub colour: RGBColor,
}

/// Poor, fair and good base quality
const BANDS: [Band; 3] = [
    Band {
        low: 0.0,
        high: 20.0,
        colour: RGBColor(0xe6, 0xc3, 0xc3),
    },
    Band {
        low: 20.0,
        high: 28.0,
        colour: RGBColor(0xe6, 0xdc, 0xc3),
    },
    Band {
        low: 28.0,
        high: 100.0,
        colour: RGBColor(0xc3, 0xe6, 0xc3),
    },
];

/// The bands which fall within `y_range`, clipped to it.
fn visible_bands(y_range: &Range<f64>) -> Vec<Band> {
    BANDS
        .iter()
        .filter(|b| b.low < y_range.end && b.high > y_range.start)
        .map(|b| Band {
            low: b.low.max(y_range.start),
            high: b.high.min(y_range.end),
            ..*b
        })
        .collect()
}

/// One box-and-whisker glyph, centred on `x`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct BoxGlyph {
    x: f64,
    summary: BoxSummary,
}

/// Glyphs are placed at 1, 2, ... in the order of the samples.
fn layout_glyphs(samples: &IndexMap<String, Vec<u32>>) -> Vec<BoxGlyph> {
    samples
        .values()
        .enumerate()
        .filter_map(|(i, sample)| {
            BoxSummary::from_sample(sample).map(|summary| BoxGlyph {
                x: (i + 1) as f64,
                summary,
            })
        })
        .collect()
}

/// The label of the glyph at an x value. Ticks between glyphs are blank.
fn tick_label(labels: &[&str], x: f64) -> String {
    let nearest = x.round();
    if nearest < 1.0 || (x - nearest).abs() > 1e-6 {
        return String::new();
    }

    labels
        .get(nearest as usize - 1)
        .map(|l| l.to_string())
        .unwrap_or_default()
}

/// Creates a box-and-whisker plot in the style of FastQC from mocked samples
/// keyed by read position, and writes it to `<prefix>.png`.
///
/// Glyphs are drawn in the order of `samples`.
pub fn box_and_whisker_plot(samples: &IndexMap<String, Vec<u32>>, prefix: &str) -> Result<PathBuf> {
    let labels: Vec<&str> = samples.keys().map(|k| k.as_str()).collect();
    let glyphs = layout_glyphs(samples);

    write_png(prefix, |path| draw(path, &labels, &glyphs))
}

fn draw(path: &Path, labels: &[&str], glyphs: &[BoxGlyph]) -> Result<()> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = 0.5..(labels.len() as f64 + 0.5);

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, (FONT, 20))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), Y_RANGE)?;

    // background quality categories go underneath everything else
    chart.draw_series(visible_bands(&Y_RANGE).into_iter().map(|band| {
        Rectangle::new(
            [(x_range.start, band.low), (x_range.end, band.high)],
            band.colour.filled(),
        )
    }))?;

    let x_formatter = |x: &f64| tick_label(labels, *x);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&x_formatter)
        .x_label_style((FONT, 10).into_font().transform(FontTransform::Rotate90))
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .axis_desc_style((FONT, 14))
        .draw()?;

    // whiskers span the whole range, capped at both ends
    chart.draw_series(glyphs.iter().flat_map(|g| {
        let s = &g.summary;
        [
            vec![(g.x, s.whisker_low), (g.x, s.q1)],
            vec![(g.x, s.q3), (g.x, s.whisker_high)],
            vec![(g.x - CAP_HALF_WIDTH, s.whisker_low), (g.x + CAP_HALF_WIDTH, s.whisker_low)],
            vec![(g.x - CAP_HALF_WIDTH, s.whisker_high), (g.x + CAP_HALF_WIDTH, s.whisker_high)],
        ]
        .map(|points| PathElement::new(points, BLACK.stroke_width(1)))
    }))?;

    chart.draw_series(glyphs.iter().map(|g| {
        Rectangle::new(
            [(g.x - BOX_HALF_WIDTH, g.summary.q1), (g.x + BOX_HALF_WIDTH, g.summary.q3)],
            BOX_FILL.filled(),
        )
    }))?;

    chart.draw_series(glyphs.iter().map(|g| {
        Rectangle::new(
            [(g.x - BOX_HALF_WIDTH, g.summary.q1), (g.x + BOX_HALF_WIDTH, g.summary.q3)],
            BLACK.stroke_width(1),
        )
    }))?;

    chart.draw_series(glyphs.iter().map(|g| {
        debug!("Position {}: {:?}", tick_label(labels, g.x), g.summary);
        PathElement::new(
            vec![
                (g.x - BOX_HALF_WIDTH, g.summary.median),
                (g.x + BOX_HALF_WIDTH, g.summary.median),
            ],
            MEDIAN_COLOUR.stroke_width(2),
        )
    }))?;

    root.present()?;
    Ok(())
}
