//! Uploaded meal photos and their validated in-memory form.

use std::fmt;

use crate::models::Part;

use super::outcome::{AnalysisFailure, FailureKind};

/// MIME type assumed when neither the upload nor its file name declares one.
const FALLBACK_MIME: ImageMime = ImageMime::Jpeg;

/// The image formats the analyzer forwards to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    /// `image/jpeg`
    Jpeg,
    /// `image/png`
    Png,
}

impl ImageMime {
    /// The canonical MIME string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Parses a declared content type, ignoring case and parameters.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file as received from the upload control, before validation.
#[derive(Debug, Clone, Default)]
pub struct UploadedImage {
    /// Client-side file name, if the browser sent one.
    pub file_name: Option<String>,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Creates an upload with a declared content type and no file name.
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: None,
            content_type: Some(content_type.into()),
            bytes: bytes.into(),
        }
    }

    /// Sets the client-side file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Resolves the MIME type: the declared type wins, then a guess from the
    /// file name, then `image/jpeg`.
    fn resolve_mime(&self) -> Result<ImageMime, AnalysisFailure> {
        let declared = self
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream");

        if let Some(declared) = declared {
            return ImageMime::from_content_type(declared).ok_or_else(|| unsupported(declared));
        }

        let guessed = self
            .file_name
            .as_deref()
            .and_then(|name| mime_guess::from_path(name).first());

        match guessed {
            Some(mime) => ImageMime::from_content_type(mime.essence_str())
                .ok_or_else(|| unsupported(mime.essence_str())),
            None => Ok(FALLBACK_MIME),
        }
    }
}

fn unsupported(mime: &str) -> AnalysisFailure {
    AnalysisFailure::new(
        FailureKind::UnsupportedImage,
        format!("Unsupported image type '{mime}'. Please upload a JPG or PNG image."),
    )
}

/// A validated image held in memory for the duration of one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime: ImageMime,
    bytes: Vec<u8>,
}

impl ImagePayload {
    /// Validates an upload against the supported types and the size cap.
    pub fn from_upload(upload: UploadedImage, max_bytes: usize) -> Result<Self, AnalysisFailure> {
        if upload.bytes.is_empty() {
            return Err(AnalysisFailure::new(
                FailureKind::UnsupportedImage,
                "The uploaded file is empty. Please upload a JPG or PNG image.",
            ));
        }
        if upload.bytes.len() > max_bytes {
            return Err(AnalysisFailure::image_too_large(max_bytes));
        }

        let mime = upload.resolve_mime()?;
        Ok(Self {
            mime,
            bytes: upload.bytes,
        })
    }

    /// Builds a payload from bytes already known to be of type `mime`.
    pub fn new(mime: ImageMime, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mime,
            bytes: bytes.into(),
        }
    }

    /// The image format.
    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    /// The raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The inline image part sent to the model.
    pub fn to_part(&self) -> Part {
        Part::inline(self.mime.as_str(), &self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1024;

    fn validate(upload: UploadedImage) -> Result<ImagePayload, AnalysisFailure> {
        ImagePayload::from_upload(upload, LIMIT)
    }

    #[test]
    fn declared_type_wins_over_file_name() {
        let upload = UploadedImage::new("image/png", vec![1, 2]).with_file_name("meal.jpg");
        assert_eq!(validate(upload).unwrap().mime(), ImageMime::Png);
    }

    #[test]
    fn declared_type_is_case_and_parameter_insensitive() {
        let upload = UploadedImage::new("Image/JPEG; charset=binary", vec![1]);
        assert_eq!(validate(upload).unwrap().mime(), ImageMime::Jpeg);
    }

    #[test]
    fn file_name_is_used_when_type_is_missing() {
        let upload = UploadedImage {
            file_name: Some("dinner.PNG".into()),
            content_type: None,
            bytes: vec![7],
        };
        assert_eq!(validate(upload).unwrap().mime(), ImageMime::Png);
    }

    #[test]
    fn octet_stream_falls_back_to_file_name() {
        let upload =
            UploadedImage::new("application/octet-stream", vec![7]).with_file_name("lunch.jpeg");
        assert_eq!(validate(upload).unwrap().mime(), ImageMime::Jpeg);
    }

    #[test]
    fn unknown_type_defaults_to_jpeg() {
        let upload = UploadedImage {
            file_name: Some("snapshot".into()),
            content_type: Some(String::new()),
            bytes: vec![7],
        };
        assert_eq!(validate(upload).unwrap().mime(), ImageMime::Jpeg);
    }

    #[test]
    fn other_image_types_are_rejected() {
        let err = validate(UploadedImage::new("image/gif", vec![1])).unwrap_err();
        assert_eq!(err.kind, FailureKind::UnsupportedImage);
        assert!(err.message.contains("image/gif"));

        let err = validate(UploadedImage {
            file_name: Some("scan.pdf".into()),
            content_type: None,
            bytes: vec![1],
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::UnsupportedImage);
    }

    #[test]
    fn empty_and_oversized_uploads_are_rejected() {
        let err = validate(UploadedImage::new("image/png", Vec::new())).unwrap_err();
        assert_eq!(err.kind, FailureKind::UnsupportedImage);

        let err = validate(UploadedImage::new("image/png", vec![0; LIMIT + 1])).unwrap_err();
        assert_eq!(err.kind, FailureKind::ImageTooLarge);

        assert!(validate(UploadedImage::new("image/png", vec![0; LIMIT])).is_ok());
    }
}
