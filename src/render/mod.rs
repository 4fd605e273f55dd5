//! PNG rendering of the parsed metrics, in the style of a FastQC report.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

pub mod gc_content;
pub mod quality;

/// 16x4 inches at 100 dpi
pub const FIGURE_SIZE: (u32, u32) = (1600, 400);

pub const FONT: &str = "sans-serif";

/// The image written for an output prefix
pub fn output_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}.png"))
}

/// Renders a chart to `<prefix>.png`.
///
/// The `draw` closure is handed a temporary `.png` path in the same directory
/// as the output, which is only moved over the output once drawing has
/// finished. A failed render therefore never leaves a partial image behind.
///
/// # Returns
///
/// The path of the written image.
pub fn write_png<F>(prefix: &str, draw: F) -> Result<PathBuf>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let path = output_path(prefix);

    // the temporary file must be on the same filesystem for the final rename
    let mut dir = std::path::absolute(&path)?;
    dir.pop();

    let mut builder = tempfile::Builder::new();
    builder.prefix(".qcplot-").suffix(".png");

    // the same mode as a freshly created file, subject to the umask
    #[cfg(unix)]
    builder.permissions(std::fs::Permissions::from_mode(0o666));

    let temp = builder
        .tempfile_in(&dir)
        .with_context(|| format!("Unable to create a temporary image in {}", dir.display()))?;

    draw(temp.path()).with_context(|| format!("Unable to render {}", path.display()))?;

    temp.persist(&path)
        .with_context(|| format!("Unable to write {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(path)
}

/// Whether text can be rendered with the chart font on this system.
#[cfg(test)]
pub(crate) fn font_available() -> bool {
    use plotters::style::IntoFont;
    (FONT, 12).into_font().box_size("0").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[test]
    fn output_path_appends_png() {
        assert_eq!(output_path("out/sample"), PathBuf::from("out/sample.png"));
        assert_eq!(output_path("sample.v2"), PathBuf::from("sample.v2.png"));
    }

    #[test]
    fn written_image_replaces_output() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("chart");
        let prefix = prefix.to_str().unwrap();
        std::fs::write(output_path(prefix), b"old").unwrap();

        let written = write_png(prefix, |tmp| {
            assert_eq!(tmp.extension().unwrap(), "png");
            assert_eq!(tmp.parent(), Some(dir.path()));
            std::fs::write(tmp, b"new")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(written, output_path(prefix));
        assert_eq!(std::fs::read(&written).unwrap(), b"new");
    }

    #[test]
    fn failed_render_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("chart");

        let err = write_png(prefix.to_str().unwrap(), |tmp| {
            std::fs::write(tmp, b"partial")?;
            bail!("backend failure")
        })
        .unwrap_err();

        assert!(format!("{err:#}").contains("backend failure"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn written_image_has_default_file_mode() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.png");
        std::fs::File::create(&reference).unwrap();
        let expected = std::fs::metadata(&reference).unwrap().permissions().mode() & 0o777;

        let prefix = dir.path().join("chart");
        let written = write_png(prefix.to_str().unwrap(), |tmp| {
            std::fs::write(tmp, b"image")?;
            Ok(())
        })
        .unwrap();

        let mode = std::fs::metadata(written).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
    }

    #[test]
    fn missing_output_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("missing").join("chart");

        assert!(write_png(prefix.to_str().unwrap(), |_| Ok(())).is_err());
    }
}
