//! Read-only board snapshot model for pick-and-place export.
//!
//! The host board editor dumps its query surface once per invocation as a
//! JSON document: the saved board path, the auxiliary origin, and the
//! ordered component list. The structures here are serialisable using
//! `serde` so that snapshots can be stored or transferred as plain JSON –
//! nothing in this crate mutates them, and the export pipeline treats a
//! loaded [`Board`] as immutable input.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Front copper layer id in the host's layer numbering.
pub const F_CU: u32 = 0;

/// Back copper layer id in the host's layer numbering.
pub const B_CU: u32 = 31;

/// A 2D point in board internal units (nanometers).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }
}

/// One placed footprint instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Reference designator, unique within a board.
    pub reference: String,
    /// Declared value text (e.g. "10kOhm").
    pub value: String,
    /// Library-qualified footprint identifier.
    pub package: String,
    /// Shown text of the footprint fields, keyed by field name. Absent
    /// keys read as empty.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Absolute position in internal units.
    pub position: Point,
    /// Orientation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Copper layer id; [`F_CU`] is the top side, anything else the bottom.
    #[serde(default)]
    pub layer: u32,
}

/// A board snapshot: the read-only query surface the export pipeline
/// consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Path of the saved board file; absent until the host has saved it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    /// User-configured auxiliary (drill/plot) origin.
    #[serde(default)]
    pub aux_origin: Point,
    /// Components in the host's enumeration order.
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Board {
    /// Path the board was saved under, or `None` for an unsaved board.
    ///
    /// Hosts that report "no file" as an empty string are normalised to
    /// `None` here.
    pub fn saved_path(&self) -> Option<&Path> {
        self.source_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse board snapshot JSON")
    }

    /// Load a snapshot from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read board snapshot {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid board snapshot {}", path.display()))
    }
}
