//! Transaction attachments.

// self
use crate::_prelude::*;

/// Image attached to a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
	/// Attachment identifier (`attach_…`).
	pub id: String,
	/// Owner of the attachment.
	pub user_id: String,
	/// Transaction the attachment belongs to.
	pub external_id: String,
	/// Public URL of the image.
	pub file_url: String,
	/// MIME type of the image.
	pub file_type: String,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created: OffsetDateTime,
}

/// Upload slot returned by `POST /attachment/upload`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentUpload {
	/// URL the file will be served from once uploaded.
	pub file_url: String,
	/// URL the file must be `PUT` to.
	pub upload_url: String,
}
