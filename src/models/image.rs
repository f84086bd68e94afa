//! Image payloads for hero images and profile pictures.

use std::fmt;

use crate::errors::ValidationError;

/// Largest accepted upload, 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Png,
    Jpeg,
    Gif,
}

impl ImageType {
    pub fn as_mime(&self) -> &'static str {
        match self {
            ImageType::Png => "image/png",
            ImageType::Jpeg => "image/jpeg",
            ImageType::Gif => "image/gif",
        }
    }

    pub fn from_mime(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageType::Png),
            "image/jpeg" => Some(ImageType::Jpeg),
            "image/gif" => Some(ImageType::Gif),
            _ => None,
        }
    }
}

/// What the image is for; names the field in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSubject {
    HeroImage,
    ProfilePicture,
}

impl fmt::Display for ImageSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSubject::HeroImage => write!(f, "Hero image"),
            ImageSubject::ProfilePicture => write!(f, "Profile picture"),
        }
    }
}

/// An image that passed the type and size checks and may be uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    kind: ImageType,
    bytes: Vec<u8>,
}

impl Image {
    /// Accept a file by its declared content type and size.
    pub fn new(
        subject: ImageSubject,
        declared_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        let kind = ImageType::from_mime(declared_type).ok_or(ValidationError::ImageType(subject))?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageSize(subject));
        }
        Ok(Self { kind, bytes })
    }

    pub fn kind(&self) -> ImageType {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}
