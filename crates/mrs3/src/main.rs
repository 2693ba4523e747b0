//! MRS3 front end application.
//!
//! Three routes: a landing page describing the two flows, the
//! downscale/compress page (upload an image, draw regions of interest,
//! submit), and the restore page (upload a package, pick a mode,
//! submit). The backend client and its endpoint configuration are
//! created once here and injected via context, so no page reaches for
//! globals.

use std::rc::Rc;

use dioxus::prelude::*;
use mrs3_core::ApiConfig;
use mrs3_io::BackendClient;

mod pages;

use pages::{CompressPage, LandingPage, RestorePage};

fn main() {
    dioxus::launch(app);
}

/// Application routes.
#[derive(Debug, Clone, PartialEq, Routable)]
pub(crate) enum Route {
    #[layout(Shell)]
    #[route("/")]
    LandingPage {},
    #[route("/compress")]
    CompressPage {},
    #[route("/restore")]
    RestorePage {},
}

/// Root application component.
///
/// Builds the backend client from `MRS3_API_BASE` (compile-time, falling
/// back to the local development backend) and provides it to all pages.
fn app() -> Element {
    use_context_provider(|| {
        let config = ApiConfig::new(option_env!("MRS3_API_BASE").unwrap_or("http://localhost:8000"));
        Rc::new(BackendClient::new(config))
    });

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }
        Router::<Route> {}
    }
}

/// Shared page chrome: header with navigation, content outlet below.
#[component]
fn Shell() -> Element {
    rsx! {
        header { class: "site-header",
            h1 { class: "site-header__brand", "MRS3" }
            p { class: "site-header__tagline", "Region-aware image downscaling and restoration" }
            nav { class: "site-header__nav",
                Link { to: Route::LandingPage {}, "Home" }
                Link { to: Route::CompressPage {}, "Compress" }
                Link { to: Route::RestorePage {}, "Restore" }
            }
        }
        main { class: "site-main", Outlet::<Route> {} }
    }
}
