/*
[INPUT]:  Proof text and optional photo bytes supplied by the session layer
[OUTPUT]: Typed request structs ready for multipart encoding
[POS]:    Data layer - type definitions for task service communication
[UPDATE]: When the validation form fields change
*/

use std::path::Path;

use crate::http::Result;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Binary image attached as proof of completion
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for PhotoAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl PhotoAttachment {
    /// Wrap in-memory bytes, guessing the content type from the file name
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo")
            .to_string();
        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fields of the `POST /api/validate-task` multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofSubmission {
    /// Description of the assigned task, empty when none is assigned
    pub task: String,
    pub proof: String,
    pub photo: Option<PhotoAttachment>,
}

impl ProofSubmission {
    pub fn new(
        description: Option<&str>,
        proof: impl Into<String>,
        photo: Option<PhotoAttachment>,
    ) -> Self {
        Self {
            task: description.unwrap_or_default().to_string(),
            proof: proof.into(),
            photo,
        }
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
