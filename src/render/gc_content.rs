use super::{write_png, FIGURE_SIZE, FONT};
use crate::gc_content::GcDistribution;
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::TRANSPARENT;
use std::ops::Range;
use std::path::{Path, PathBuf};

const TITLE: &str = "Read GC Content Distribution";
const X_DESC: &str = "Percent GC Content";
const Y_DESC: &str = "Fraction of Reads";

const X_RANGE: Range<f64> = 0.0..100.0;
/// A little head room above the usual peak of a GC distribution
const Y_RANGE: Range<f64> = 0.0..4.5;

const X_TICKS: usize = 11;
const Y_TICKS: usize = 5;

const LINE_COLOUR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

fn x_tick(x: &f64) -> String {
    format!("{x:.0}")
}

fn y_tick(y: &f64) -> String {
    format!("{y:.1}")
}

/// Plots the GC content distribution as a single line, in the style of
/// FastQC, and writes it to `<prefix>.png`.
pub fn gc_content_plot(distribution: &GcDistribution, prefix: &str) -> Result<PathBuf> {
    let points = distribution.sorted_points();
    write_png(prefix, |path| draw(path, &points))
}

fn draw(path: &Path, points: &[(f64, f64)]) -> Result<()> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, (FONT, 20))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(X_RANGE, Y_RANGE)?;

    // grid lines on the major y ticks only
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT.stroke_width(0))
        .x_labels(X_TICKS)
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_tick)
        .y_label_formatter(&y_tick)
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .axis_desc_style((FONT, 14))
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        LINE_COLOUR.stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gc_content::GcCounts;
    use crate::render::font_available;
    use plotters::coord::ranged1d::Ranged;
    use plotters::coord::types::RangedCoordf64;

    fn key_points(range: Range<f64>, hint: usize) -> Vec<f64> {
        RangedCoordf64::from(range).key_points(hint)
    }

    #[test]
    fn y_axis_has_at_most_five_labels() {
        let ticks = key_points(Y_RANGE, Y_TICKS);
        let labels: Vec<String> = ticks.iter().map(y_tick).collect();

        assert!(ticks.len() <= Y_TICKS, "{ticks:?}");
        assert!(ticks.iter().all(|y| Y_RANGE.contains(y)));
        assert_eq!(labels.first().map(String::as_str), Some("0.0"));
        assert!(labels.contains(&"4.0".to_string()), "{labels:?}");
    }

    #[test]
    fn x_axis_is_labelled_every_ten_percent() {
        let labels: Vec<String> = key_points(X_RANGE, X_TICKS).iter().map(x_tick).collect();

        assert!(labels.len() <= X_TICKS, "{labels:?}");
        assert_eq!(&labels[..3], ["0", "10", "20"]);
        assert!(labels.contains(&"90".to_string()), "{labels:?}");
    }

    #[test]
    fn plot_is_written_as_png() {
        if !font_available() {
            eprintln!("skipping: no {FONT} font on this system");
            return;
        }

        let mut counts = GcCounts::default();
        for gc in 20..=80u8 {
            let spread = (gc as i64 - 50).unsigned_abs();
            counts.insert(gc, 1000 / (spread + 1));
        }
        let distribution = counts.normalize().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("gc");
        std::fs::write(dir.path().join("gc.png"), b"stale").unwrap();

        let written = gc_content_plot(&distribution, prefix.to_str().unwrap()).unwrap();

        let png = std::fs::read(written).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }
}
