//! Processing result panel with download button and optional preview.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;

use crate::blob;
use crate::download;

/// An opaque binary returned by the backend, plus what the page knows
/// about it. The internal structure of the bytes is never inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedBlob {
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Suggested download filename (e.g. `compressed-output.pkg`).
    pub filename: String,
    /// MIME type used for the download Blob and preview.
    pub mime_type: &'static str,
}

impl ProcessedBlob {
    /// Whether the blob can be previewed as an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Per-result render state, keyed by the result's `Rc` pointer.
///
/// One entry per result, image or not, so a pointer change is always
/// observable: a miss means a new result arrived and everything tied to
/// the previous one (preview URL, download error) is stale. Returned
/// URLs must be revoked by the caller.
#[derive(Debug, Default)]
struct ResultCache {
    entry: Option<(usize, Option<String>)>,
}

impl ResultCache {
    /// The cached preview URL when `ptr` matches the stored entry.
    ///
    /// Outer `None` is a miss; `Some(None)` is a hit for a result with no
    /// preview.
    fn lookup(&self, ptr: usize) -> Option<Option<String>> {
        self.entry
            .as_ref()
            .filter(|(stored, _)| *stored == ptr)
            .map(|(_, url)| url.clone())
    }

    /// Store the entry for `ptr`, returning any displaced URL for
    /// revocation.
    fn replace(&mut self, ptr: usize, url: Option<String>) -> Option<String> {
        let prev = self.entry.take().and_then(|(_, prev)| prev);
        self.entry = Some((ptr, url));
        prev
    }

    /// Drop the entry, returning any stored URL for revocation.
    fn clear(&mut self) -> Option<String> {
        self.entry.take().and_then(|(_, prev)| prev)
    }

    /// The stored URL regardless of key, for unmount cleanup.
    fn lookup_any(&self) -> Option<String> {
        self.entry.as_ref().and_then(|(_, url)| url.clone())
    }
}

/// Props for the [`ResultPanel`] component.
#[derive(Props, Clone)]
pub struct ResultPanelProps {
    /// The result to offer. `None` renders nothing actionable.
    /// Wrapped in `Rc` to avoid cloning response bodies on each render.
    result: Option<Rc<ProcessedBlob>>,
}

impl PartialEq for ResultPanelProps {
    fn eq(&self, other: &Self) -> bool {
        match (&self.result, &other.result) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Download button plus, for image results, an inline preview.
///
/// The preview Blob URL is revoked whenever the result changes or the
/// panel unmounts; a download error from a previous result is cleared
/// when a new one arrives.
#[component]
pub fn ResultPanel(props: ResultPanelProps) -> Element {
    let mut download_error = use_signal(|| Option::<String>::None);
    let mut cache: Signal<ResultCache> = use_signal(ResultCache::default);

    {
        let cache = cache;
        use_drop(move || {
            if let Some(ref url) = cache.peek().lookup_any() {
                blob::revoke_blob_url(url);
            }
        });
    }

    let Some(result) = props.result else {
        // Drop anything left over from a previous result.
        if let Some(ref prev) = cache.write().clear() {
            blob::revoke_blob_url(prev);
        }
        return rsx! {};
    };

    // A cache miss means this result has not been rendered before: build
    // its preview (if any) and discard state tied to the previous one.
    let result_ptr = Rc::as_ptr(&result) as usize;
    let cached = cache.peek().lookup(result_ptr);
    let preview = match cached {
        Some(url) => url,
        None => {
            let url = if result.is_image() {
                blob::bytes_to_blob_url(&result.bytes, result.mime_type).ok()
            } else {
                None
            };
            if let Some(ref prev) = cache.write().replace(result_ptr, url.clone()) {
                blob::revoke_blob_url(prev);
            }
            download_error.set(None);
            url
        }
    };

    let download_click = {
        let result = Rc::clone(&result);
        move |_| {
            if let Err(e) =
                download::trigger_download(&result.bytes, &result.filename, result.mime_type)
            {
                download_error.set(Some(format!("Download failed: {e}")));
            } else {
                download_error.set(None);
            }
        }
    };

    rsx! {
        div { class: "result-panel",
            h3 { class: "result-panel__title", "Result" }

            if let Some(ref err) = download_error() {
                p { class: "error-text", "{err}" }
            }

            if let Some(ref url) = preview {
                img {
                    class: "result-panel__preview",
                    src: "{url}",
                    alt: "Restored image preview",
                }
            }

            button {
                class: "btn btn--primary",
                onclick: download_click,
                Icon { icon: LdDownload, width: 16, height: 16 }
                "Download {result.filename}"
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn package_results_are_not_previewable() {
        let blob = ProcessedBlob {
            bytes: vec![1, 2, 3],
            filename: "compressed-output.pkg".to_owned(),
            mime_type: "application/octet-stream",
        };
        assert!(!blob.is_image());

        let blob = ProcessedBlob {
            bytes: vec![1, 2, 3],
            filename: "restored-image.png".to_owned(),
            mime_type: "image/png",
        };
        assert!(blob.is_image());
    }

    #[test]
    fn new_result_pointer_is_a_miss_even_without_a_preview() {
        let mut cache = ResultCache::default();
        // First render of a non-image result stores a no-preview entry.
        assert_eq!(cache.lookup(0x10), None);
        assert_eq!(cache.replace(0x10, None), None);

        // Re-render of the same result is a hit; stale state must stay.
        assert_eq!(cache.lookup(0x10), Some(None));

        // A replacement result is a miss again, so the panel clears the
        // previous result's download error before rendering it.
        assert_eq!(cache.lookup(0x20), None);
    }

    #[test]
    fn replacing_an_image_result_hands_back_its_url() {
        let mut cache = ResultCache::default();
        cache.replace(0x10, Some("blob:a".to_owned()));
        assert_eq!(cache.lookup(0x10), Some(Some("blob:a".to_owned())));

        let displaced = cache.replace(0x20, Some("blob:b".to_owned()));
        assert_eq!(displaced, Some("blob:a".to_owned()));
        assert_eq!(cache.lookup(0x20), Some(Some("blob:b".to_owned())));
    }

    #[test]
    fn clear_empties_the_cache_and_returns_the_url() {
        let mut cache = ResultCache::default();
        cache.replace(0x10, Some("blob:a".to_owned()));
        assert_eq!(cache.clear(), Some("blob:a".to_owned()));
        assert_eq!(cache.lookup(0x10), None);
        assert_eq!(cache.clear(), None);
    }
}
