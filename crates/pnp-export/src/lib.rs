//! Placement-record transformation pipeline.
//!
//! Turns a [`pnp_board::Board`] snapshot into a pick-and-place manifest:
//! per-component field-fallback resolution, coordinate transformation into
//! the requested reference frame, side classification, deterministic
//! numeric formatting, and serialization as either a comma-delimited or a
//! fixed-width text file. Each invocation is a full, synchronous, one-shot
//! transform; the pipeline holds no state between runs.

pub mod fields;
pub mod geometry;
pub mod pipeline;
pub mod record;
pub mod writer;

pub use fields::{DEFAULT_HEIGHT_FIELD, DEFAULT_VALUE_FIELD, FieldConfig, ResolvedFields};
pub use geometry::Side;
pub use pipeline::{ExportError, ExportOptions, ExportReport, Notify, export};
pub use record::PlacementRecord;
pub use writer::{ManifestFormat, ManifestHeader};
