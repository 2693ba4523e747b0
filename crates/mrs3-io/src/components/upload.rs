//! File upload component with drag-and-drop and file picker.

use std::rc::Rc;

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use mrs3_core::UploadPolicy;

/// A file accepted by the upload policy, with its bytes already read.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// The file's name as reported by the browser.
    pub name: String,
    /// Declared MIME type (may be empty for unknown extensions).
    pub content_type: String,
    /// Raw file bytes. `Rc` so page state can clone handles cheaply.
    pub bytes: Rc<Vec<u8>>,
}

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Accepted-type and size policy for this control.
    policy: UploadPolicy,
    /// Called with the validated file after a successful upload.
    on_select: EventHandler<SelectedFile>,
    /// Called with a message when a file fails validation or cannot be
    /// read. The owning page must clear any previously accepted file and
    /// downstream state.
    on_reject: EventHandler<String>,
    /// Disables the control (e.g. while a request is in flight).
    #[props(default)]
    disabled: bool,
}

/// A drag-and-drop zone with a file picker button.
///
/// The accepted-type pattern and the size limit come from the
/// caller-supplied [`UploadPolicy`]; validation runs against the file's
/// name, declared MIME type, and size *before* any bytes are read. On
/// success the control fires `on_select` with the file contents; on
/// failure it fires `on_reject` with the validation message.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut filename = use_signal(|| Option::<String>::None);

    // Validate, read, and forward the first file from a list.
    //
    // Shared by the file-picker and drag-and-drop paths so the
    // validation/read/callback logic lives in one place.
    let policy = props.policy.clone();
    let on_select = props.on_select;
    let on_reject = props.on_reject;
    let process_files = use_callback(move |files: Vec<FileData>| {
        let policy = policy.clone();
        spawn(async move {
            let Some(file) = files.first() else {
                return;
            };
            let name = file.name();
            let content_type = file.content_type().unwrap_or_default();
            if let Err(e) = policy.validate(&name, &content_type, file.size()) {
                filename.set(None);
                on_reject.call(e.to_string());
                return;
            }
            match file.read_bytes().await {
                Ok(bytes) => {
                    filename.set(Some(name.clone()));
                    on_select.call(SelectedFile {
                        name,
                        content_type,
                        bytes: Rc::new(bytes.to_vec()),
                    });
                }
                Err(e) => {
                    filename.set(None);
                    on_reject.call(format!("Failed to read file: {e}"));
                }
            }
        });
    });

    let handle_files = move |evt: FormEvent| {
        process_files.call(evt.files());
    };

    let disabled = props.disabled;
    let handle_drop = move |evt: DragEvent| {
        evt.prevent_default();
        dragging.set(false);
        if !disabled {
            process_files.call(evt.files());
        }
    };

    let zone_class = if dragging() {
        "upload-zone upload-zone--active"
    } else {
        "upload-zone"
    };
    let accept = props.policy.accept.input_accept();

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref name) = filename() {
                p { class: "upload-zone__loaded", "Loaded: {name}" }
            }

            p { class: "upload-zone__prompt", "Drop a file here or" }

            label { class: if props.disabled { "btn btn--disabled" } else { "btn btn--primary" },
                Icon { icon: LdUpload, width: 16, height: 16 }
                input {
                    r#type: "file",
                    accept: "{accept}",
                    class: "hidden-input",
                    disabled: props.disabled,
                    onchange: handle_files,
                }
                "Choose File"
            }

            if let Some(ref hint) = props.policy.hint {
                p { class: "upload-zone__hint", "{hint}" }
            }
        }
    }
}
