//! File attachments owned by a task.

use super::{AttachmentId, TaskDomainError};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of an uploaded file about to be attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    filename: String,
    original_name: String,
    mime_type: String,
    size: u64,
}

impl NewAttachment {
    /// Creates validated attachment metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IncompleteAttachment`] when a name or the
    /// MIME type is blank.
    pub fn new(
        filename: impl Into<String>,
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
    ) -> Result<Self, TaskDomainError> {
        let stored = filename.into().trim().to_owned();
        let original = original_name.into().trim().to_owned();
        let mime = mime_type.into().trim().to_owned();
        if stored.is_empty() || original.is_empty() || mime.is_empty() {
            return Err(TaskDomainError::IncompleteAttachment);
        }
        Ok(Self {
            filename: stored,
            original_name: original,
            mime_type: mime,
            size,
        })
    }
}

/// File attached to a task, keyed by a stable [`AttachmentId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    filename: String,
    original_name: String,
    mime_type: String,
    size: u64,
    uploaded_by: UserId,
    uploaded_at: DateTime<Utc>,
}

impl Attachment {
    pub(crate) fn new(fields: NewAttachment, uploaded_by: UserId, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            id: AttachmentId::new(),
            filename: fields.filename,
            original_name: fields.original_name,
            mime_type: fields.mime_type,
            size: fields.size,
            uploaded_by,
            uploaded_at,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the stored file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the name the file was uploaded with.
    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the uploading user.
    #[must_use]
    pub const fn uploaded_by(&self) -> UserId {
        self.uploaded_by
    }

    /// Returns the upload time.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}
