//! Polygon region selector widget.
//!
//! Composes the uploaded image with an SVG overlay whose `viewBox` equals
//! the image's natural resolution, so recorded geometry is
//! resolution-exact no matter how the page scales the element. Clicks are
//! mapped from display coordinates into image-pixel space through
//! [`CanvasScale`]; the element's bounding rectangle is re-read on every
//! event because scroll and resize can move it between clicks.
//!
//! Rendering policy (straight-edge variant): completed region `i` is
//! filled with a translucent hue at `i * 60°` around the color wheel and
//! stroked solid in the same hue, the in-progress region is a dashed
//! polyline with no fill, and the first point of any region carries a
//! highlight marker so the user can see where a region closes.

use std::fmt::Write;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCheck, LdTrash2, LdUndo2};
use mrs3_core::{CanvasScale, Dimensions, Point, Polygon, PolygonSession, SessionMode};

/// Fill color of the start-of-region marker.
const START_MARKER_COLOR: &str = "#fbbf24";
/// Stroke color of the in-progress (dashed) region.
const DRAFT_STROKE_COLOR: &str = "#f8fafc";

/// Props for the [`RegionSelector`] component.
#[derive(Props, Clone, PartialEq)]
pub struct RegionSelectorProps {
    /// Object URL of the uploaded image.
    image_url: String,
    /// The image's natural resolution (drives the overlay `viewBox`).
    dimensions: Dimensions,
    /// Single- or multi-region drawing. Defaults to multi.
    #[props(default)]
    mode: SessionMode,
    /// Fired with the **full** completed-region collection every time it
    /// changes (a region closed, or everything cleared). Consumers must
    /// treat each call as the authoritative set, not a delta.
    on_regions: EventHandler<Vec<Polygon>>,
}

/// Image canvas with click-to-draw polygon regions.
///
/// Interaction: click to add points, *Close region* (or Enter) to
/// complete one (needs at least 3 points), *Undo point* (or Backspace)
/// to drop the latest point, *Clear* (or Escape) to start over.
///
/// The widget owns its [`PolygonSession`]; swap the `key` of this
/// component when a new image is loaded to start a fresh session.
#[component]
pub fn RegionSelector(props: RegionSelectorProps) -> Element {
    let mode = props.mode;
    let on_regions = props.on_regions;
    let dimensions = props.dimensions;

    let mut session = use_signal(move || PolygonSession::new(mode));
    let mut surface = use_signal(|| Option::<std::rc::Rc<MountedData>>::None);

    let add_point = move |evt: MouseEvent| {
        // Element-relative coordinates, taken before any await.
        let coords = evt.element_coordinates();
        async move {
            let Some(element) = surface() else {
                return;
            };
            // The bounding rect is re-read per event, never cached.
            let Ok(rect) = element.get_client_rect().await else {
                return;
            };
            let Ok(scale) = CanvasScale::new(dimensions, rect.size.width, rect.size.height) else {
                return;
            };
            // Ignored while a single-region session is locked.
            let _ = session.write().add_point(scale.to_image(coords.x, coords.y));
        }
    };

    let mut close_region = move || {
        if session.write().complete().is_ok() {
            on_regions.call(session.read().completed().to_vec());
        }
    };
    let mut undo_point = move || {
        session.write().undo_last_point();
    };
    let mut clear_all = move || {
        session.write().reset();
        on_regions.call(Vec::new());
    };

    let handle_key = move |evt: KeyboardEvent| match evt.key() {
        Key::Enter => close_region(),
        Key::Backspace => undo_point(),
        Key::Escape => clear_all(),
        _ => {}
    };

    // Immutable snapshot for rendering.
    let (completed, current, can_complete, locked) = {
        let state = session.read();
        (
            state.completed().to_vec(),
            state.current().to_vec(),
            state.can_complete(),
            state.is_locked(),
        )
    };

    let w = dimensions.width;
    let h = dimensions.height;
    let view_box = format!("0 0 {w} {h}");
    let marker_r = (f64::from(w.max(h)) / 150.0).max(3.0);

    rsx! {
        div { class: "region-selector",
            div {
                class: "region-selector__canvas",
                tabindex: "0",
                onmounted: move |evt| surface.set(Some(evt.data())),
                onclick: add_point,
                onkeydown: handle_key,

                img {
                    src: "{props.image_url}",
                    draggable: "false",
                    alt: "Uploaded image",
                }

                svg {
                    xmlns: "http://www.w3.org/2000/svg",
                    view_box: "{view_box}",
                    "preserveAspectRatio": "none",

                    for (i, region) in completed.iter().enumerate() {
                        polygon {
                            key: "{i}",
                            points: "{points_attr(region.points())}",
                            fill: "{region_fill(i)}",
                            stroke: "{region_stroke(i)}",
                            stroke_width: "2",
                            "vector-effect": "non-scaling-stroke",
                        }
                    }
                    for (i, region) in completed.iter().enumerate() {
                        if let Some(start) = region.first() {
                            circle {
                                key: "start-{i}",
                                cx: "{start.x}",
                                cy: "{start.y}",
                                r: "{marker_r}",
                                fill: START_MARKER_COLOR,
                            }
                        }
                    }

                    if current.len() >= 2 {
                        polyline {
                            points: "{points_attr(&current)}",
                            fill: "none",
                            stroke: DRAFT_STROKE_COLOR,
                            stroke_width: "2",
                            stroke_dasharray: "8 6",
                            "vector-effect": "non-scaling-stroke",
                        }
                    }
                    for (i, point) in current.iter().enumerate() {
                        circle {
                            key: "draft-{i}",
                            cx: "{point.x}",
                            cy: "{point.y}",
                            r: "{marker_r}",
                            fill: if i == 0 { START_MARKER_COLOR } else { DRAFT_STROKE_COLOR },
                        }
                    }
                }
            }

            div { class: "region-selector__actions",
                button {
                    class: if can_complete { "btn btn--primary" } else { "btn btn--disabled" },
                    disabled: !can_complete,
                    onclick: move |_| close_region(),
                    Icon { icon: LdCheck, width: 16, height: 16 }
                    "Close region"
                }
                button {
                    class: if current.is_empty() { "btn btn--disabled" } else { "btn btn--ghost" },
                    disabled: current.is_empty(),
                    onclick: move |_| undo_point(),
                    Icon { icon: LdUndo2, width: 16, height: 16 }
                    "Undo point"
                }
                button {
                    class: if completed.is_empty() && current.is_empty() { "btn btn--disabled" } else { "btn btn--ghost" },
                    disabled: completed.is_empty() && current.is_empty(),
                    onclick: move |_| clear_all(),
                    Icon { icon: LdTrash2, width: 16, height: 16 }
                    "Clear"
                }
            }

            p { class: "region-selector__status",
                if locked {
                    "Region completed. Clear to draw a different one."
                } else {
                    "{completed.len()} region(s), {current.len()} point(s) in progress. "
                    "Click to add points; a region needs at least 3."
                }
            }
        }
    }
}

/// Hue for region `index`: even 60° spacing, repeating after 6 regions.
const fn hue(index: usize) -> usize {
    (index * 60) % 360
}

/// Translucent fill for completed region `index`.
fn region_fill(index: usize) -> String {
    format!("hsla({}, 78%, 60%, 0.35)", hue(index))
}

/// Solid stroke for completed region `index`.
fn region_stroke(index: usize) -> String {
    format!("hsl({}, 78%, 52%)", hue(index))
}

/// Build an SVG `points` attribute from a point slice.
///
/// Coordinates are formatted to 1 decimal place.
fn points_attr(points: &[Point]) -> String {
    let mut attr = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            attr.push(' ');
        }
        let _ = write!(attr, "{:.1},{:.1}", p.x, p.y);
    }
    attr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hues_step_sixty_degrees_and_wrap() {
        assert_eq!(hue(0), 0);
        assert_eq!(hue(1), 60);
        assert_eq!(hue(5), 300);
        // Hues repeat after six regions.
        assert_eq!(hue(6), 0);
        assert_eq!(hue(7), 60);
    }

    #[test]
    fn fill_is_translucent_stroke_is_solid() {
        assert_eq!(region_fill(2), "hsla(120, 78%, 60%, 0.35)");
        assert_eq!(region_stroke(2), "hsl(120, 78%, 52%)");
    }

    #[test]
    fn points_attr_formats_pairs() {
        let points = [Point::new(10.0, 10.0), Point::new(100.25, 10.5)];
        assert_eq!(points_attr(&points), "10.0,10.0 100.2,10.5");
    }

    #[test]
    fn points_attr_empty() {
        assert_eq!(points_attr(&[]), "");
    }
}
