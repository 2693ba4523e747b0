//! Downscale/compress page controller.
//!
//! Orchestrates the full flow: accept an image through the policy-gated
//! upload control, probe its natural resolution, collect region geometry
//! from the region selector, and submit everything to the backend. A new
//! input file invalidates all derived state (regions, result, error);
//! submission is guarded by [`PageFlow`] so only one request is ever in
//! flight.

use std::rc::Rc;

use dioxus::prelude::*;
use mrs3_core::wire::PACKAGE_FILENAME;
use mrs3_core::{Dimensions, PageFlow, Polygon, ScaleFactor, UploadPolicy, probe_dimensions};
use mrs3_io::blob;
use mrs3_io::{BackendClient, FileUpload, ProcessedBlob, RegionSelector, ResultPanel, SelectedFile};

/// Page controller for `POST /compress`.
#[component]
#[allow(clippy::too_many_lines)]
pub fn CompressPage() -> Element {
    let client: Rc<BackendClient> = use_context();

    // --- Page state ---
    let mut flow = use_signal(PageFlow::new);
    let mut file = use_signal(|| Option::<SelectedFile>::None);
    let mut preview_url = use_signal(|| Option::<String>::None);
    let mut dimensions = use_signal(|| Option::<Dimensions>::None);
    let mut regions = use_signal(Vec::<Polygon>::new);
    let mut scaler = use_signal(ScaleFactor::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut result = use_signal(|| Option::<Rc<ProcessedBlob>>::None);

    // Release the preview object URL when the user navigates away.
    {
        let preview_url = preview_url;
        use_drop(move || {
            if let Some(ref url) = *preview_url.peek() {
                blob::revoke_blob_url(url);
            }
        });
    }

    // Drop everything derived from the previous input file.
    let mut clear_derived_state = move || {
        if let Some(ref prev) = preview_url.take() {
            blob::revoke_blob_url(prev);
        }
        dimensions.set(None);
        regions.set(Vec::new());
        result.set(None);
        error.set(None);
    };

    // --- File upload handlers ---
    let on_select = move |selected: SelectedFile| {
        clear_derived_state();
        match probe_dimensions(&selected.bytes) {
            Ok(dims) => match blob::bytes_to_blob_url(&selected.bytes, &selected.content_type) {
                Ok(url) => {
                    preview_url.set(Some(url));
                    dimensions.set(Some(dims));
                    file.set(Some(selected));
                    let _ = flow.write().file_selected();
                }
                Err(e) => {
                    file.set(None);
                    flow.write().clear_file();
                    error.set(Some(format!("Could not preview image: {e}")));
                }
            },
            Err(e) => {
                file.set(None);
                flow.write().clear_file();
                error.set(Some(format!("Could not read image: {e}")));
            }
        }
    };

    let on_reject = move |message: String| {
        // A rejected file clears the previously accepted one.
        clear_derived_state();
        file.set(None);
        flow.write().clear_file();
        error.set(Some(message));
    };

    // --- Submission ---
    let submit = move |_| {
        if flow.write().begin_submit().is_err() {
            return;
        }
        let Some(selected) = file.peek().clone() else {
            flow.write().finish_failure();
            return;
        };
        let polygons = regions.peek().clone();
        let factor = *scaler.peek();
        error.set(None);
        let client = Rc::clone(&client);
        spawn(async move {
            let outcome = client
                .compress(
                    &selected.name,
                    (*selected.bytes).clone(),
                    &polygons,
                    factor,
                )
                .await;
            // The flag clears on both arms; a settled request always
            // re-enables the submit control.
            match outcome {
                Ok(bytes) => {
                    result.set(Some(Rc::new(ProcessedBlob {
                        bytes,
                        filename: PACKAGE_FILENAME.to_owned(),
                        mime_type: "application/octet-stream",
                    })));
                    flow.write().finish_success();
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    flow.write().finish_failure();
                }
            }
        });
    };

    let processing = flow.read().is_processing();
    let has_file = file.read().is_some();
    let selector_key = file
        .read()
        .as_ref()
        .map_or_else(String::new, |f| format!("{}-{}", f.name, f.bytes.len()));

    rsx! {
        section { class: "page",
            h2 { "Downscale & compress" }
            p { class: "page__lead",
                "Upload an image, outline the regions of interest, choose a "
                "scale factor, and submit. The backend returns a package file "
                "you can later restore."
            }

            FileUpload {
                policy: UploadPolicy::source_image(),
                on_select,
                on_reject,
                disabled: processing,
            }

            if let (Some(url), Some(dims)) = (preview_url(), dimensions()) {
                RegionSelector {
                    key: "{selector_key}",
                    image_url: url,
                    dimensions: dims,
                    on_regions: move |completed: Vec<Polygon>| regions.set(completed),
                }
            }

            if has_file {
                div { class: "field",
                    label { r#for: "scaler", "Scale factor" }
                    select {
                        id: "scaler",
                        disabled: processing,
                        onchange: move |evt| {
                            if let Some(s) = evt.value().parse().ok().and_then(ScaleFactor::from_factor) {
                                scaler.set(s);
                            }
                        },
                        for s in ScaleFactor::ALL {
                            option {
                                value: "{s.factor()}",
                                selected: *scaler.read() == s,
                                "1/{s.factor()} of each axis"
                            }
                        }
                    }
                }

                button {
                    class: if processing { "btn btn--disabled" } else { "btn btn--primary" },
                    disabled: processing,
                    onclick: submit,
                    if processing { "Processing..." } else { "Compress" }
                }
            }

            if let Some(ref message) = error() {
                p { class: "error-text", "{message}" }
            }

            ResultPanel { result: result() }
        }
    }
}
