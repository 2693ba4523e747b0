//! Restore page controller.
//!
//! Accepts a package file produced by the compress flow, lets the user
//! choose between AI-based and fast classical upscaling, and submits the
//! package to the backend. The restored image is shown inline and
//! offered as a download.

use std::rc::Rc;

use dioxus::prelude::*;
use mrs3_core::wire::RESTORED_FILENAME;
use mrs3_core::{PageFlow, RestoreMode, UploadPolicy};
use mrs3_io::{BackendClient, FileUpload, ProcessedBlob, ResultPanel, SelectedFile};

/// Display label for a restore mode.
const fn mode_label(mode: RestoreMode) -> &'static str {
    match mode {
        RestoreMode::HighQuality => "High quality (AI upscaling)",
        RestoreMode::Fast => "Fast (classical)",
    }
}

/// Page controller for `POST /restore`.
#[component]
pub fn RestorePage() -> Element {
    let client: Rc<BackendClient> = use_context();

    // --- Page state ---
    let mut flow = use_signal(PageFlow::new);
    let mut file = use_signal(|| Option::<SelectedFile>::None);
    let mut mode = use_signal(RestoreMode::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut result = use_signal(|| Option::<Rc<ProcessedBlob>>::None);

    // --- File upload handlers ---
    let on_select = move |selected: SelectedFile| {
        result.set(None);
        error.set(None);
        file.set(Some(selected));
        let _ = flow.write().file_selected();
    };

    let on_reject = move |message: String| {
        file.set(None);
        result.set(None);
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
        let restore_mode = *mode.peek();
        error.set(None);
        let client = Rc::clone(&client);
        spawn(async move {
            let outcome = client
                .restore(&selected.name, (*selected.bytes).clone(), restore_mode)
                .await;
            match outcome {
                Ok(bytes) => {
                    result.set(Some(Rc::new(ProcessedBlob {
                        bytes,
                        filename: RESTORED_FILENAME.to_owned(),
                        mime_type: "image/png",
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

    rsx! {
        section { class: "page",
            h2 { "Restore" }
            p { class: "page__lead",
                "Upload an MRS3 package and reconstruct the full-resolution "
                "image. AI upscaling gives the best quality; the classical "
                "mode is faster."
            }

            FileUpload {
                policy: UploadPolicy::package(),
                on_select,
                on_reject,
                disabled: processing,
            }

            if has_file {
                div { class: "field",
                    label { r#for: "mode", "Restoration mode" }
                    select {
                        id: "mode",
                        disabled: processing,
                        onchange: move |evt| {
                            match evt.value().as_str() {
                                "-1" => mode.set(RestoreMode::HighQuality),
                                "0" => mode.set(RestoreMode::Fast),
                                _ => {}
                            }
                        },
                        for m in RestoreMode::ALL {
                            option {
                                value: "{m.mode_value()}",
                                selected: *mode.read() == m,
                                {mode_label(m)}
                            }
                        }
                    }
                }

                button {
                    class: if processing { "btn btn--disabled" } else { "btn btn--primary" },
                    disabled: processing,
                    onclick: submit,
                    if processing { "Processing..." } else { "Restore" }
                }
            }

            if let Some(ref message) = error() {
                p { class: "error-text", "{message}" }
            }

            ResultPanel { result: result() }
        }
    }
}
