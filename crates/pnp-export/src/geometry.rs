//! Internal-unit coordinate handling and assembly-side classification.

use std::fmt;

use pnp_board::{F_CU, Point};

/// Board internal units per millimeter. The host stores coordinates as
/// nanometer integers, so this must stay exactly 1e6.
pub const IU_PER_MM: i64 = 1_000_000;

/// Convert a length in internal units to millimeters.
pub fn to_mm(iu: i64) -> f64 {
    iu as f64 / IU_PER_MM as f64
}

/// Translate `position` into the frame anchored at `origin` and convert
/// both axes to millimeters.
///
/// The host's Y axis grows downward; `invert_y` negates the converted Y so
/// it grows upward in the output. The translation happens in internal
/// units, so the result is exact for any origin.
pub fn transform(position: Point, origin: Point, invert_y: bool) -> (f64, f64) {
    let x = to_mm(position.x - origin.x);
    let y = to_mm(position.y - origin.y);
    (x, if invert_y { -y } else { y })
}

/// The assembly side a component sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    /// Front copper is the only layer that counts as the top side; every
    /// other layer id is the bottom.
    pub fn from_layer(layer: u32) -> Self {
        if layer == F_CU { Side::Top } else { Side::Bottom }
    }

    pub fn as_word(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }

    pub fn as_letter(self) -> &'static str {
        match self {
            Side::Top => "F",
            Side::Bottom => "B",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_word())
    }
}
