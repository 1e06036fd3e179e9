//! Placement-record construction.

use pnp_board::{Component, Point};

use crate::fields::FieldConfig;
use crate::geometry::{self, Side};

/// One fully-resolved output row. Numeric fields are formatted at build
/// time so that both manifest layouts emit identical cell content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRecord {
    pub reference: String,
    pub value: String,
    pub package: String,
    /// X in millimeters, four decimal places.
    pub x: String,
    /// Y in millimeters, four decimal places, sign-inverted when requested.
    pub y: String,
    /// Rotation in degrees, three decimal places.
    pub rotation: String,
    pub side: Side,
    /// Height text, may be empty.
    pub height: String,
}

impl PlacementRecord {
    /// Build the record for one component.
    ///
    /// Values are correctly rounded by the standard float formatter
    /// (ties to even); this is the pinned rounding policy.
    pub fn build(
        component: &Component,
        origin: Point,
        invert_y: bool,
        fields: &FieldConfig,
    ) -> Self {
        let resolved = fields.resolve(&component.fields, &component.value);
        let (x, y) = geometry::transform(component.position, origin, invert_y);

        PlacementRecord {
            reference: component.reference.clone(),
            value: resolved.value,
            package: component.package.clone(),
            x: format!("{x:.4}"),
            y: format!("{y:.4}"),
            rotation: format!("{:.3}", component.rotation),
            side: Side::from_layer(component.layer),
            height: resolved.height,
        }
    }
}
