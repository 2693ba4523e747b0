//! Integration test: drive the full compress-page logic in memory, from
//! image bytes through display-space clicks to the serialized form field.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use mrs3_core::{
    CanvasScale, PageFlow, PolygonSession, SessionMode, UploadPolicy, probe_dimensions,
    wire::polygons_form_value,
};

/// Encode a blank RGBA image of the given size as PNG bytes.
fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::new(width, height);
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
        .expect("in-memory PNG encode should succeed");
    bytes
}

#[test]
fn clicks_on_a_scaled_canvas_produce_the_backend_square() {
    // A 1000x800 source image validated and probed as the compress page
    // does after upload.
    let bytes = png_bytes(1000, 800);
    let policy = UploadPolicy::source_image();
    policy
        .validate("photo.png", "image/png", u64::try_from(bytes.len()).unwrap())
        .expect("a small PNG should pass the source image policy");
    let dimensions = probe_dimensions(&bytes).expect("PNG header should probe");
    assert_eq!((dimensions.width, dimensions.height), (1000, 800));

    // The browser displays the canvas at half size in each axis.
    let scale = CanvasScale::new(dimensions, 500.0, 400.0).expect("non-empty viewport");

    // Four clicks tracing a square in display coordinates.
    let mut flow = PageFlow::new();
    flow.file_selected().unwrap();
    let mut session = PolygonSession::new(SessionMode::Multi);
    for (dx, dy) in [(5.0, 5.0), (50.0, 5.0), (50.0, 50.0), (5.0, 50.0)] {
        session.add_point(scale.to_image(dx, dy)).unwrap();
    }
    session.complete().expect("four points close a region");

    // Submit: exactly the field value the backend contract specifies.
    flow.begin_submit().unwrap();
    let json = polygons_form_value(session.completed()).unwrap();
    assert_eq!(json, "[[[10,10],[100,10],[100,100],[10,100]]]");

    // A second submit while the first is in flight is rejected.
    assert!(flow.begin_submit().is_err());
    flow.finish_success();
    assert!(!flow.is_processing());
}

#[test]
fn clearing_regions_yields_an_empty_geometry_field() {
    let dimensions = probe_dimensions(&png_bytes(64, 64)).unwrap();
    let scale = CanvasScale::new(dimensions, 64.0, 64.0).unwrap();

    let mut session = PolygonSession::new(SessionMode::Multi);
    for (dx, dy) in [(1.0, 1.0), (10.0, 1.0), (10.0, 10.0)] {
        session.add_point(scale.to_image(dx, dy)).unwrap();
    }
    session.complete().unwrap();
    session.reset();

    // Submitting with no regions is allowed; the whole image is treated
    // as background.
    assert_eq!(polygons_form_value(session.completed()).unwrap(), "[]");
}
