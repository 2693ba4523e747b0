//! Landing page: explains the two flows and links to them.

use dioxus::prelude::*;

use crate::Route;

/// Entry page with one card per flow.
#[component]
pub fn LandingPage() -> Element {
    rsx! {
        section { class: "page",
            h2 { "What do you want to do?" }

            div { class: "card-row",
                div { class: "card",
                    h3 { "Downscale & compress" }
                    p {
                        "Upload an image, outline the regions that matter, and "
                        "get back a compact package. Marked regions keep detail "
                        "for later restoration."
                    }
                    Link { class: "btn btn--primary", to: Route::CompressPage {}, "Start compressing" }
                }

                div { class: "card",
                    h3 { "Restore" }
                    p {
                        "Upload a package produced by the compress flow and "
                        "reconstruct the full-resolution image, with AI-based "
                        "or fast classical upscaling."
                    }
                    Link { class: "btn btn--primary", to: Route::RestorePage {}, "Start restoring" }
                }
            }
        }
    }
}
