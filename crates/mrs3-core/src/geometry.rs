//! Display-to-image coordinate scaling and natural-size probing.
//!
//! The region selector renders the uploaded image at whatever size the
//! page layout gives it, but all recorded coordinates must live in the
//! image's natural pixel space. [`CanvasScale`] holds the per-axis ratio
//! between the two; it is cheap to build and is recomputed from the
//! element's bounding rectangle on every pointer event, because layout
//! can change between events (scroll, resize, sidebar toggles).

use std::io::Cursor;

use crate::types::{Dimensions, Point};

/// Errors from coordinate scaling or image probing.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// The displayed element has no extent, so no scale exists.
    #[error("displayed size must be positive, got {width}x{height}")]
    EmptyViewport {
        /// Displayed width in CSS pixels.
        width: f64,
        /// Displayed height in CSS pixels.
        height: f64,
    },

    /// The uploaded bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The image header could not be decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

/// Per-axis ratio between an image's natural resolution and its on-screen
/// displayed size: `scale = natural / displayed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasScale {
    /// Horizontal scale (natural pixels per CSS pixel).
    pub x: f64,
    /// Vertical scale (natural pixels per CSS pixel).
    pub y: f64,
}

impl CanvasScale {
    /// Compute the scale for an image of `natural` size displayed at
    /// `displayed_width` x `displayed_height` CSS pixels.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyViewport`] when either displayed
    /// extent is zero or negative (the element is not laid out yet).
    pub fn new(
        natural: Dimensions,
        displayed_width: f64,
        displayed_height: f64,
    ) -> Result<Self, GeometryError> {
        if displayed_width <= 0.0 || displayed_height <= 0.0 {
            return Err(GeometryError::EmptyViewport {
                width: displayed_width,
                height: displayed_height,
            });
        }
        Ok(Self {
            x: f64::from(natural.width) / displayed_width,
            y: f64::from(natural.height) / displayed_height,
        })
    }

    /// Map a position relative to the displayed element into image-pixel
    /// coordinates.
    #[must_use]
    pub fn to_image(self, display_x: f64, display_y: f64) -> Point {
        Point::new(display_x * self.x, display_y * self.y)
    }
}

/// Read the natural dimensions of an encoded image without decoding the
/// pixel data.
///
/// # Errors
///
/// Returns [`GeometryError::EmptyInput`] for empty input and
/// [`GeometryError::ImageDecode`] when the format is unrecognized or the
/// header is corrupt.
pub fn probe_dimensions(bytes: &[u8]) -> Result<Dimensions, GeometryError> {
    if bytes.is_empty() {
        return Err(GeometryError::EmptyInput);
    }
    let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let (width, height) = reader.into_dimensions()?;
    Ok(Dimensions { width, height })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Encode a small solid PNG for probing tests.
    fn solid_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 40, 40, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn scale_is_natural_over_displayed() {
        let natural = Dimensions {
            width: 1920,
            height: 1080,
        };
        let scale = CanvasScale::new(natural, 960.0, 270.0).unwrap();
        assert!((scale.x - 2.0).abs() < f64::EPSILON);
        assert!((scale.y - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn click_round_trip_arbitrary_sizes() {
        // (dx, dy) must map to (dx * W / w, dy * H / h).
        let cases = [
            (3840_u32, 2160_u32, 1280.0, 720.0, 100.0, 50.0),
            (800, 600, 800.0, 600.0, 10.0, 10.0),
            (31, 17, 450.5, 122.25, 7.5, 3.25),
            (1, 1, 1000.0, 1000.0, 999.0, 0.5),
        ];
        for (nw, nh, dw, dh, dx, dy) in cases {
            let scale = CanvasScale::new(
                Dimensions {
                    width: nw,
                    height: nh,
                },
                dw,
                dh,
            )
            .unwrap();
            let p = scale.to_image(dx, dy);
            assert!((p.x - dx * f64::from(nw) / dw).abs() < 1e-9);
            assert!((p.y - dy * f64::from(nh) / dh).abs() < 1e-9);
        }
    }

    #[test]
    fn identity_scale_when_displayed_at_natural_size() {
        let natural = Dimensions {
            width: 640,
            height: 480,
        };
        let scale = CanvasScale::new(natural, 640.0, 480.0).unwrap();
        let p = scale.to_image(123.0, 45.0);
        assert_eq!(p, Point::new(123.0, 45.0));
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let natural = Dimensions {
            width: 100,
            height: 100,
        };
        assert!(matches!(
            CanvasScale::new(natural, 0.0, 50.0),
            Err(GeometryError::EmptyViewport { .. })
        ));
        assert!(matches!(
            CanvasScale::new(natural, 50.0, -1.0),
            Err(GeometryError::EmptyViewport { .. })
        ));
    }

    #[test]
    fn probe_reads_png_header() {
        let png = solid_png(37, 23);
        let dims = probe_dimensions(&png).unwrap();
        assert_eq!(
            dims,
            Dimensions {
                width: 37,
                height: 23
            }
        );
    }

    #[test]
    fn probe_empty_input() {
        assert!(matches!(
            probe_dimensions(&[]),
            Err(GeometryError::EmptyInput)
        ));
    }

    #[test]
    fn probe_corrupt_input() {
        assert!(matches!(
            probe_dimensions(&[0xFF, 0x00, 0x12]),
            Err(GeometryError::ImageDecode(_))
        ));
    }
}
