//! Receipt attachments
//!
//! Receipts are held in memory as part of the draft until the expense is
//! committed. Only PDF, PNG and JPEG files are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Accepted receipt file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeKind {
    Pdf,
    Png,
    Jpeg,
}

impl MimeKind {
    /// Detect the kind from a filename's extension
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// IANA media type
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for MimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Png => write!(f, "PNG"),
            Self::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// A receipt file held in memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    filename: String,
    kind: MimeKind,
    #[serde(with = "base64_bytes")]
    bytes: Vec<u8>,
}

impl Attachment {
    /// Build an attachment, refusing files that are not PDF/PNG/JPEG
    ///
    /// Directory components are dropped from `filename`.
    pub fn new(filename: &str, bytes: Vec<u8>) -> Result<Self, AttachmentError> {
        let base_name = Path::new(filename.trim())
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or(AttachmentError::MissingFilename)?
            .to_string();

        let kind = MimeKind::from_filename(&base_name)
            .ok_or_else(|| AttachmentError::UnsupportedKind(base_name.clone()))?;

        Ok(Self {
            filename: base_name,
            kind,
            bytes,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn kind(&self) -> MimeKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Errors raised when a file is offered as a receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    MissingFilename,
    UnsupportedKind(String),
}

impl fmt::Display for AttachmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFilename => write!(f, "Attachment has no filename"),
            Self::UnsupportedKind(name) => write!(
                f,
                "Unsupported receipt file '{}'. Only PDF, PNG and JPEG are accepted",
                name
            ),
        }
    }
}

impl std::error::Error for AttachmentError {}

/// Serializes byte buffers as base64 strings inside JSON documents
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
