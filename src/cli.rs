use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
qcplot version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   FastQC-style charts from DRAGEN QC metrics";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw Read1 base quality quantiles by read position as a box-and-whisker plot
    #[command(arg_required_else_help = true, visible_alias = "box-and-whisker")]
    Quality {
        /// the metrics .csv containing `POSITIONAL QUALITY` rows
        input: String,

        /// the image is written to <OUTPUT_PREFIX>.png, replacing any existing file
        output_prefix: String,
    },

    /// Draw the Read1 GC content distribution as a line plot
    #[command(arg_required_else_help = true, visible_alias = "gc")]
    GcContent {
        /// the metrics .csv containing `READ GC CONTENT` rows
        input: String,

        /// the image is written to <OUTPUT_PREFIX>.png, replacing any existing file
        output_prefix: String,
    },
}
