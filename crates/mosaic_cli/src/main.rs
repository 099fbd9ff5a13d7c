use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use mosaic_render::{
    ComposeSummary, FontSpec, MosaicOptions, MosaicRenderer, RowProgress, Rgb, DEFAULT_FONT_FAMILY,
};

const DEFAULT_ADJUST: f64 = 0.7;

#[derive(Parser, Debug)]
#[command(author, version, about = "Redraw an image as colored letters of a text")]
struct Cli {
    /// Input image path
    input: PathBuf,
    /// Text written into the image, repeated as needed
    text: String,
    /// Output PNG path
    output: PathBuf,
    /// Treat <TEXT> as a file path and use its trimmed lines, joined
    #[arg(long, default_value_t = false)]
    text_file: bool,
    /// Show a progress bar
    #[arg(long, default_value_t = false)]
    progress_bar: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Text size in output image
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    text_size: u32,
    /// Text font family in output image
    #[arg(long, default_value = DEFAULT_FONT_FAMILY)]
    text_font: String,
    /// Font file used instead of a system font family
    #[arg(long, conflicts_with = "text_font")]
    font_file: Option<PathBuf>,
    /// Ratio applied to both letter spacings [default: 0.7]
    #[arg(long)]
    adjust: Option<f64>,
    /// Ratio applied to distances between letters of the same row
    #[arg(long, requires = "y_just", conflicts_with = "adjust")]
    x_just: Option<f64>,
    /// Ratio applied to distances between letters of the same column
    #[arg(long, requires = "x_just", conflicts_with = "adjust")]
    y_just: Option<f64>,
    /// Background color as R,G,B, overriding the one found in the image
    #[arg(long)]
    background: Option<Rgb>,
    /// Draw letters over background-colored pixels too
    #[arg(long, default_value_t = false)]
    background_consume_text: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let text = if cli.text_file { read_text_file(Path::new(&cli.text))? } else { cli.text.clone() };

    let options = cli.settings.to_options();
    let progress = cli.progress_bar.then(row_progress_bar);
    let summary = render(&cli, &text, &options, progress.as_ref())?;

    info!(
        "{} letters drawn, {}x{} written to {:?}",
        summary.glyphs_drawn, summary.geometry.width, summary.geometry.height, cli.output
    );
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// The bar is cleared whether or not the render succeeds.
fn render(
    cli: &Cli,
    text: &str,
    options: &MosaicOptions,
    progress: Option<&ProgressBar>,
) -> Result<ComposeSummary> {
    let result = MosaicRenderer.render_to_file(&cli.input, text, &cli.output, options, |row| {
        if let Some(bar) = progress {
            bar.set_position(progress_percent(row));
        }
    });

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    result.with_context(|| format!("failed to render {:?} into {:?}", cli.input, cli.output))
}

fn progress_percent(row: RowProgress) -> u64 {
    (row.ratio() * 100.0) as u64
}

fn row_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("[{bar:40.cyan/blue}] {percent}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

fn read_text_file(path: &Path) -> Result<String> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read text file {:?}", path))?;
    Ok(join_trimmed_lines(&contents))
}

fn join_trimmed_lines(contents: &str) -> String {
    contents.lines().map(str::trim).collect()
}

impl RenderSettings {
    fn to_options(&self) -> MosaicOptions {
        let font = match &self.font_file {
            Some(path) => FontSpec::File(path.clone()),
            None => FontSpec::Family(self.text_font.clone()),
        };

        let mut options = MosaicOptions {
            text_size: self.text_size,
            font,
            background: self.background,
            background_consume_text: self.background_consume_text,
            ..MosaicOptions::default()
        };
        match (self.x_just, self.y_just) {
            (Some(x_just), Some(y_just)) => {
                options.x_just = x_just;
                options.y_just = y_just;
            },
            _ => options.adjust = Some(self.adjust.unwrap_or(DEFAULT_ADJUST)),
        }
        options
    }
}
