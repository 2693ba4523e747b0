//! Multipart wire contract toward the MRS3 backend.
//!
//! The backend receives geometry as a *textual* form field rather than a
//! typed object graph: a JSON array of polygons, each an array of
//! `[x, y]` integer pairs, coordinates rounded to the nearest pixel. This
//! module owns that serialization plus the small integer selectors
//! (`scaler`, `mrs3_mode`) and the field-name constants, so every other
//! layer treats request bodies as opaque.

use serde::{Deserialize, Serialize};

use crate::types::Polygon;

/// Multipart field carrying the source image binary.
pub const FIELD_IMAGE: &str = "image";
/// Multipart field carrying the JSON-encoded polygon list.
pub const FIELD_POLYGONS: &str = "polygons";
/// Multipart field carrying the stringified scale factor.
pub const FIELD_SCALER: &str = "scaler";
/// Multipart field carrying the package binary.
pub const FIELD_PKG: &str = "pkg";
/// Multipart field carrying the stringified restore mode.
pub const FIELD_MODE: &str = "mrs3_mode";

/// Suggested filename for a downloaded compression package.
pub const PACKAGE_FILENAME: &str = "compressed-output.pkg";
/// Suggested filename for a downloaded restored image.
pub const RESTORED_FILENAME: &str = "restored-image.png";

/// Downscale factor sent to `/compress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleFactor {
    /// Halve each axis.
    #[default]
    X2,
    /// Divide each axis by three.
    X3,
    /// Quarter each axis.
    X4,
}

impl ScaleFactor {
    /// All selectable factors, in menu order.
    pub const ALL: [Self; 3] = [Self::X2, Self::X3, Self::X4];

    /// The numeric factor.
    #[must_use]
    pub const fn factor(self) -> u32 {
        match self {
            Self::X2 => 2,
            Self::X3 => 3,
            Self::X4 => 4,
        }
    }

    /// Parse a numeric factor back into a selector.
    #[must_use]
    pub const fn from_factor(factor: u32) -> Option<Self> {
        match factor {
            2 => Some(Self::X2),
            3 => Some(Self::X3),
            4 => Some(Self::X4),
            _ => None,
        }
    }

    /// The stringified integer the backend expects in [`FIELD_SCALER`].
    #[must_use]
    pub fn form_value(self) -> String {
        self.factor().to_string()
    }
}

/// Restoration algorithm selector sent to `/restore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RestoreMode {
    /// AI-based high-quality upscaling (backend value `-1`).
    #[default]
    HighQuality,
    /// Fast classical upscaling (backend value `0`).
    Fast,
}

impl RestoreMode {
    /// All selectable modes, in menu order.
    pub const ALL: [Self; 2] = [Self::HighQuality, Self::Fast];

    /// The backend's integer encoding.
    #[must_use]
    pub const fn mode_value(self) -> i32 {
        match self {
            Self::HighQuality => -1,
            Self::Fast => 0,
        }
    }

    /// The stringified integer the backend expects in [`FIELD_MODE`].
    #[must_use]
    pub fn form_value(self) -> String {
        self.mode_value().to_string()
    }
}

/// Serialize completed polygons for the [`FIELD_POLYGONS`] form field.
///
/// Schema: array of polygons, each an array of 2-element integer arrays.
/// Coordinates are rounded to the nearest pixel. An empty slice encodes
/// as `[]`.
///
/// # Errors
///
/// Propagates `serde_json` failures; with this shape they cannot occur in
/// practice, but the boundary stays fallible rather than panicking.
pub fn polygons_form_value(polygons: &[Polygon]) -> Result<String, serde_json::Error> {
    let rounded: Vec<Vec<(i64, i64)>> = polygons
        .iter()
        .map(|polygon| polygon.points().iter().map(|p| p.rounded()).collect())
        .collect();
    serde_json::to_string(&rounded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn square_matches_backend_contract() {
        let square = Polygon::new(vec![
            Point::new(10.0, 10.0),
            Point::new(100.0, 10.0),
            Point::new(100.0, 100.0),
            Point::new(10.0, 100.0),
        ]);
        let json = polygons_form_value(&[square]).unwrap();
        assert_eq!(json, "[[[10,10],[100,10],[100,100],[10,100]]]");
    }

    #[test]
    fn coordinates_round_to_nearest() {
        let polygon = Polygon::new(vec![
            Point::new(0.4, 0.6),
            Point::new(2.5, 3.49),
            Point::new(7.0, 8.0),
        ]);
        let json = polygons_form_value(&[polygon]).unwrap();
        assert_eq!(json, "[[[0,1],[3,3],[7,8]]]");
    }

    #[test]
    fn empty_collection_encodes_as_empty_array() {
        assert_eq!(polygons_form_value(&[]).unwrap(), "[]");
    }

    #[test]
    fn multiple_polygons_preserve_order() {
        let a = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);
        let b = Polygon::new(vec![
            Point::new(5.0, 5.0),
            Point::new(6.0, 5.0),
            Point::new(6.0, 6.0),
        ]);
        let json = polygons_form_value(&[a, b]).unwrap();
        assert_eq!(json, "[[[0,0],[1,0],[1,1]],[[5,5],[6,5],[6,6]]]");
    }

    #[test]
    fn scaler_form_values() {
        assert_eq!(ScaleFactor::X2.form_value(), "2");
        assert_eq!(ScaleFactor::X3.form_value(), "3");
        assert_eq!(ScaleFactor::X4.form_value(), "4");
        assert_eq!(ScaleFactor::from_factor(3), Some(ScaleFactor::X3));
        assert_eq!(ScaleFactor::from_factor(5), None);
    }

    #[test]
    fn restore_mode_form_values() {
        assert_eq!(RestoreMode::HighQuality.form_value(), "-1");
        assert_eq!(RestoreMode::Fast.form_value(), "0");
    }
}
