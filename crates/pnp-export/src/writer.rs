//! Manifest serialization: delimited and fixed-width layouts.
//!
//! Both layouts are rendered fully into memory and committed with an
//! atomic rename, so the target path either holds a complete manifest or
//! nothing at all.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{DateTime, Local};

use crate::record::PlacementRecord;

/// Concrete manifest layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManifestFormat {
    /// Comma-separated with standard CSV quoting.
    #[default]
    Csv,
    /// Whitespace-aligned columns.
    Pos,
}

impl ManifestFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ManifestFormat::Csv => "csv",
            ManifestFormat::Pos => "pos",
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Metadata rendered above the column titles.
#[derive(Debug, Clone)]
pub struct ManifestHeader {
    pub created: DateTime<Local>,
    /// Coordinates were translated to the auxiliary origin.
    pub origin_relative: bool,
    /// The Y axis was flipped to grow upward.
    pub invert_y: bool,
}

impl ManifestHeader {
    fn legend(&self) -> String {
        let mut legend = String::from("Unit = mm, Angle = deg.");
        if self.origin_relative {
            legend.push_str(" Coordinates relative to board origin.");
        }
        if self.invert_y {
            legend.push_str(" Y inverted.");
        }
        legend
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const CSV_TITLES: [&str; 8] = ["Ref", "Val", "Package", "X", "Y", "Rot", "Side", "Height"];
const POS_TITLES: [&str; 8] = ["Ref", "Val", "Package", "PosX", "PosY", "Rot", "Side", "Height"];

/// Numeric columns and the height column are right-justified in the
/// fixed-width layout; text columns are left-justified.
const POS_RIGHT_ALIGNED: [bool; 8] = [false, false, false, true, true, true, false, true];

const COLUMN_GAP: &str = "  ";

/// Render the manifest into a byte buffer, rows in the given order.
pub fn render(
    records: &[PlacementRecord],
    header: &ManifestHeader,
    format: ManifestFormat,
) -> io::Result<Vec<u8>> {
    match format {
        ManifestFormat::Csv => render_csv(records, header),
        ManifestFormat::Pos => render_pos(records, header),
    }
}

/// Render the manifest and commit it atomically to `path`.
pub fn write_manifest(
    path: &Path,
    records: &[PlacementRecord],
    header: &ManifestHeader,
    format: ManifestFormat,
) -> io::Result<()> {
    let rendered = render(records, header, format)?;
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|file| file.write_all(&rendered))
        .map_err(|err| match err {
            atomicwrites::Error::Internal(err) | atomicwrites::Error::User(err) => err,
        })
}

fn csv_row(record: &PlacementRecord) -> [&str; 8] {
    [
        &record.reference,
        &record.value,
        &record.package,
        &record.x,
        &record.y,
        &record.rotation,
        record.side.as_word(),
        &record.height,
    ]
}

fn render_csv(records: &[PlacementRecord], header: &ManifestHeader) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    writeln!(buf, "# Created on {}", header.created.format(TIMESTAMP_FORMAT))?;
    writeln!(buf, "# {}", header.legend())?;

    let mut writer = csv::Writer::from_writer(&mut buf);
    writer.write_record(CSV_TITLES).map_err(io::Error::other)?;
    for record in records {
        writer.write_record(csv_row(record)).map_err(io::Error::other)?;
    }
    writer.flush()?;
    drop(writer);

    Ok(buf)
}

fn pos_row(record: &PlacementRecord) -> [&str; 8] {
    [
        &record.reference,
        &record.value,
        &record.package,
        &record.x,
        &record.y,
        &record.rotation,
        record.side.as_letter(),
        &record.height,
    ]
}

fn render_pos(records: &[PlacementRecord], header: &ManifestHeader) -> io::Result<Vec<u8>> {
    let rows: Vec<[&str; 8]> = records.iter().map(pos_row).collect();

    // Each column is as wide as its title or its longest value.
    let mut widths = POS_TITLES.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut buf = Vec::new();
    writeln!(buf, "### Created on {}", header.created.format(TIMESTAMP_FORMAT))?;
    writeln!(buf, "## {}", header.legend())?;
    write_aligned_row(&mut buf, &POS_TITLES, &widths)?;
    for row in &rows {
        write_aligned_row(&mut buf, row, &widths)?;
    }

    Ok(buf)
}

fn write_aligned_row(
    buf: &mut Vec<u8>,
    row: &[&str; 8],
    widths: &[usize; 8],
) -> io::Result<()> {
    for (index, cell) in row.iter().enumerate() {
        if index > 0 {
            buf.extend_from_slice(COLUMN_GAP.as_bytes());
        }
        if POS_RIGHT_ALIGNED[index] {
            write!(buf, "{cell:>width$}", width = widths[index])?;
        } else {
            write!(buf, "{cell:<width$}", width = widths[index])?;
        }
    }
    writeln!(buf)?;
    Ok(())
}
