use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use pnp_board::Board;
use pnp_export::{ExportOptions, FieldConfig, ManifestFormat, Notify, export};

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum FormatArg {
    /// Comma-separated values
    #[default]
    Csv,
    /// Fixed-width aligned columns
    Pos,
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatArg::Csv => write!(f, "csv"),
            FormatArg::Pos => write!(f, "pos"),
        }
    }
}

impl From<FormatArg> for ManifestFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ManifestFormat::Csv,
            FormatArg::Pos => ManifestFormat::Pos,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OriginArg {
    /// Coordinates relative to the user-configured auxiliary origin
    #[default]
    Aux,
    /// Absolute board coordinates
    Board,
}

impl std::fmt::Display for OriginArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OriginArg::Aux => write!(f, "aux"),
            OriginArg::Board => write!(f, "board"),
        }
    }
}

#[derive(Args, Debug, Clone)]
#[command(about = "Export a pick-and-place manifest from a board snapshot")]
pub struct ExportArgs {
    /// Board snapshot JSON to process
    #[arg(value_name = "SNAPSHOT", value_hint = clap::ValueHint::FilePath)]
    pub snapshot: PathBuf,

    /// Output format
    #[arg(short, long, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Coordinate reference frame
    #[arg(long, default_value_t = OriginArg::Aux)]
    pub origin: OriginArg,

    /// Keep the host's downward-growing Y axis instead of inverting it
    #[arg(long = "no-invert-y")]
    pub no_invert_y: bool,

    /// Field consulted for the Val column before falling back to the
    /// declared value
    #[arg(long, value_name = "NAME", default_value = pnp_export::DEFAULT_VALUE_FIELD)]
    pub value_field: String,

    /// Field consulted for the Height column
    #[arg(long, value_name = "NAME", default_value = pnp_export::DEFAULT_HEIGHT_FIELD)]
    pub height_field: String,
}

struct ConsoleNotify;

impl Notify for ConsoleNotify {
    fn error(&mut self, text: &str) {
        eprintln!("{} {text}", "✗".red());
    }

    fn info(&mut self, text: &str) {
        println!("{} {text}", "✓".green());
    }
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let board = Board::from_file(&args.snapshot)
        .with_context(|| format!("Failed to load board snapshot {}", args.snapshot.display()))?;

    let options = ExportOptions {
        format: args.format.into(),
        use_aux_origin: matches!(args.origin, OriginArg::Aux),
        invert_y: !args.no_invert_y,
        fields: FieldConfig {
            value_field: args.value_field,
            height_field: args.height_field,
        },
    };

    let mut notify = ConsoleNotify;
    if export(&board, &options, &mut notify).is_err() {
        // The notifier has already reported the failure.
        std::process::exit(1);
    }
    Ok(())
}
