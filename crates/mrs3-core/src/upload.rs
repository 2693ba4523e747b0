//! Upload acceptance policy.
//!
//! Checks a selected or dropped file against an accepted-type pattern and
//! a maximum byte size before any bytes are read. Validation order follows
//! the page contract: type/extension first, then size; the first failing
//! check wins and its message is surfaced to the user as-is.

use serde::{Deserialize, Serialize};

/// What kind of files a policy accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptKind {
    /// Any image: the declared MIME type must start with `image/`.
    Image,
    /// An exact filename extension, e.g. `.pkg` (matched case-insensitively).
    Extension(String),
}

impl AcceptKind {
    /// The `accept` attribute value for a file input.
    #[must_use]
    pub fn input_accept(&self) -> String {
        match self {
            Self::Image => "image/*".to_owned(),
            Self::Extension(ext) => ext.clone(),
        }
    }
}

/// Why a file was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadError {
    /// The declared MIME type is not an image type.
    #[error("\"{name}\" is not an image file")]
    NotAnImage {
        /// The offending file's name.
        name: String,
    },

    /// The filename does not end with the required extension.
    #[error("\"{name}\" does not have the required {expected} extension")]
    WrongExtension {
        /// The offending file's name.
        name: String,
        /// The extension the policy requires.
        expected: String,
    },

    /// The file exceeds the policy's size limit.
    #[error("file is too large: {size} bytes (limit {limit})")]
    TooLarge {
        /// Declared file size in bytes.
        size: u64,
        /// The policy's maximum in bytes.
        limit: u64,
    },
}

/// Caller-supplied acceptance policy for one upload control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Accepted file kind.
    pub accept: AcceptKind,
    /// Maximum accepted size in bytes (inclusive).
    pub max_size_bytes: u64,
    /// Optional display text shown under the drop zone.
    pub hint: Option<String>,
}

impl UploadPolicy {
    /// Default policy for source photographs (any image, 20 MiB).
    #[must_use]
    pub fn source_image() -> Self {
        Self {
            accept: AcceptKind::Image,
            max_size_bytes: 20 * 1024 * 1024,
            hint: Some("PNG, JPEG, BMP, or WebP up to 20 MiB".to_owned()),
        }
    }

    /// Default policy for MRS3 package files (`.pkg`, 200 MiB).
    #[must_use]
    pub fn package() -> Self {
        Self {
            accept: AcceptKind::Extension(".pkg".to_owned()),
            max_size_bytes: 200 * 1024 * 1024,
            hint: Some("An MRS3 package (.pkg) up to 200 MiB".to_owned()),
        }
    }

    /// Validate a file's name, declared MIME type, and size against this
    /// policy.
    ///
    /// The extension check ignores the MIME type entirely: browsers report
    /// unreliable (often empty) types for non-standard extensions.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: [`UploadError::NotAnImage`] or
    /// [`UploadError::WrongExtension`] for type mismatches, then
    /// [`UploadError::TooLarge`] when the size exceeds the limit.
    pub fn validate(&self, name: &str, content_type: &str, size: u64) -> Result<(), UploadError> {
        match &self.accept {
            AcceptKind::Image => {
                if !content_type.starts_with("image/") {
                    return Err(UploadError::NotAnImage {
                        name: name.to_owned(),
                    });
                }
            }
            AcceptKind::Extension(ext) => {
                if !ends_with_ignore_case(name, ext) {
                    return Err(UploadError::WrongExtension {
                        name: name.to_owned(),
                        expected: ext.clone(),
                    });
                }
            }
        }
        if size > self.max_size_bytes {
            return Err(UploadError::TooLarge {
                size,
                limit: self.max_size_bytes,
            });
        }
        Ok(())
    }
}

/// ASCII case-insensitive suffix check.
fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn package_extension_ignores_mime_type() {
        let policy = UploadPolicy::package();
        assert_eq!(policy.validate("foo.pkg", "", 1024), Ok(()));
        assert_eq!(
            policy.validate("foo.pkg", "application/x-unknown", 1024),
            Ok(())
        );
        assert_eq!(policy.validate("FOO.PKG", "text/plain", 1024), Ok(()));
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let policy = UploadPolicy::package();
        let err = policy.validate("archive.txt", "text/plain", 10).unwrap_err();
        assert_eq!(
            err,
            UploadError::WrongExtension {
                name: "archive.txt".to_owned(),
                expected: ".pkg".to_owned(),
            }
        );
    }

    #[test]
    fn image_wildcard_checks_mime_prefix() {
        let policy = UploadPolicy::source_image();
        assert_eq!(policy.validate("photo.jpg", "image/jpeg", 2 << 20), Ok(()));
        assert!(matches!(
            policy.validate("photo.jpg", "application/pdf", 100),
            Err(UploadError::NotAnImage { .. })
        ));
        assert!(matches!(
            policy.validate("photo.jpg", "", 100),
            Err(UploadError::NotAnImage { .. })
        ));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let policy = UploadPolicy {
            accept: AcceptKind::Image,
            max_size_bytes: 4096,
            hint: None,
        };
        assert_eq!(policy.validate("a.png", "image/png", 4096), Ok(()));
        assert_eq!(
            policy.validate("a.png", "image/png", 4097),
            Err(UploadError::TooLarge {
                size: 4097,
                limit: 4096
            })
        );
    }

    #[test]
    fn type_check_runs_before_size_check() {
        let policy = UploadPolicy {
            accept: AcceptKind::Extension(".pkg".to_owned()),
            max_size_bytes: 10,
            hint: None,
        };
        // Both checks would fail; the type error must win.
        assert!(matches!(
            policy.validate("big.txt", "", 1_000_000),
            Err(UploadError::WrongExtension { .. })
        ));
    }

    #[test]
    fn short_name_does_not_panic_suffix_check() {
        assert!(!ends_with_ignore_case("a", ".pkg"));
        assert!(ends_with_ignore_case(".pkg", ".pkg"));
    }
}
