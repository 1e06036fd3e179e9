//! One-shot export orchestration: validate, collect, build, write, report.

use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info};
use pnp_board::{Board, Point};
use thiserror::Error;

use crate::fields::FieldConfig;
use crate::record::PlacementRecord;
use crate::writer::{self, ManifestFormat, ManifestHeader};

/// Suffix appended to the source stem when deriving the output file name.
const OUTPUT_SUFFIX: &str = "_custom";

/// Terminal failures of one export invocation. None are retried; the first
/// two are detected before any file is touched.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("board has no file path; save the board before exporting")]
    NoSourceIdentity,

    #[error("board has no components to export")]
    EmptyComponentSet,

    #[error("failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Host notification sink. The pipeline produces exactly one terminal
/// notification per invocation through this interface, so it can run
/// against a dialog-based host, a console, or a test recorder.
pub trait Notify {
    fn error(&mut self, text: &str);
    fn info(&mut self, text: &str);
}

/// Export profile: output layout, coordinate reference frame, Y-axis
/// handling, and the field names consulted per component.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: ManifestFormat,
    /// Translate coordinates to the board's auxiliary origin.
    pub use_aux_origin: bool,
    /// Flip the converted Y axis so it grows upward.
    pub invert_y: bool,
    pub fields: FieldConfig,
}

impl ExportOptions {
    /// Delimited output with coordinates relative to the auxiliary origin
    /// and the Y axis flipped to grow upward.
    pub fn origin_relative_csv() -> Self {
        ExportOptions {
            format: ManifestFormat::Csv,
            use_aux_origin: true,
            invert_y: true,
            fields: FieldConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub record_count: usize,
}

/// Run the full pipeline against a board snapshot and report the outcome
/// through `notify`: an `info` naming the output path on success, one
/// `error` naming the failed precondition otherwise.
pub fn export(
    board: &Board,
    options: &ExportOptions,
    notify: &mut dyn Notify,
) -> Result<ExportReport, ExportError> {
    match run(board, options) {
        Ok(report) => {
            notify.info(&format!(
                "Wrote {} placement records to {}",
                report.record_count,
                report.output_path.display()
            ));
            Ok(report)
        }
        Err(err) => {
            notify.error(&err.to_string());
            Err(err)
        }
    }
}

fn run(board: &Board, options: &ExportOptions) -> Result<ExportReport, ExportError> {
    let source = board.saved_path().ok_or(ExportError::NoSourceIdentity)?;
    if board.components.is_empty() {
        return Err(ExportError::EmptyComponentSet);
    }

    let origin = if options.use_aux_origin {
        board.aux_origin
    } else {
        Point::default()
    };
    debug!(
        "exporting {} components from {} (origin {:?}, invert_y={})",
        board.components.len(),
        source.display(),
        origin,
        options.invert_y
    );

    let records: Vec<PlacementRecord> = board
        .components
        .iter()
        .map(|component| PlacementRecord::build(component, origin, options.invert_y, &options.fields))
        .collect();

    let output_path = output_path(source, options.format);
    let header = ManifestHeader {
        created: Local::now(),
        origin_relative: options.use_aux_origin,
        invert_y: options.invert_y,
    };
    writer::write_manifest(&output_path, &records, &header, options.format).map_err(|source| {
        ExportError::Write {
            path: output_path.clone(),
            source,
        }
    })?;

    info!("wrote manifest {}", output_path.display());
    Ok(ExportReport {
        output_path,
        record_count: records.len(),
    })
}

/// `<stem>_custom.<ext>` next to the source file.
fn output_path(source: &Path, format: ManifestFormat) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "board".to_string());
    source.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{}", format.extension()))
}
