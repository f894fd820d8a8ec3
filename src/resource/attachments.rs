//! `/attachment`: upload slots, registration, and removal.

// crates.io
use reqwest::Method;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	client::Client,
	obs::ResourceKind,
	schema::{Attachment, AttachmentUpload},
};

#[derive(Deserialize)]
struct AttachmentEnvelope {
	attachment: Attachment,
}

/// Images attached to transactions.
#[derive(Clone, Copy, Debug)]
pub struct AttachmentsResource<'c> {
	client: &'c Client,
}
impl<'c> AttachmentsResource<'c> {
	pub(crate) fn new(client: &'c Client) -> Self {
		Self { client }
	}

	/// Requests a temporary upload URL for a file of `content_length` bytes.
	pub async fn upload(
		&self,
		file_name: &str,
		file_type: &str,
		content_length: u64,
	) -> Result<AttachmentUpload> {
		let params = [
			("file_name".to_owned(), file_name.to_owned()),
			("file_type".to_owned(), file_type.to_owned()),
			("content_length".to_owned(), content_length.to_string()),
		];

		self.client
			.session
			.request(
				ResourceKind::Attachments,
				"upload",
				Method::POST,
				"/attachment/upload",
				&params,
			)
			.await
	}

	/// Attaches the image at `file_url` to `transaction_id`.
	pub async fn register(
		&self,
		transaction_id: &str,
		file_url: &Url,
		file_type: &str,
	) -> Result<Attachment> {
		let params = [
			("external_id".to_owned(), transaction_id.to_owned()),
			("file_url".to_owned(), file_url.to_string()),
			("file_type".to_owned(), file_type.to_owned()),
		];
		let envelope: AttachmentEnvelope = self
			.client
			.session
			.request(
				ResourceKind::Attachments,
				"register",
				Method::POST,
				"/attachment/register",
				&params,
			)
			.await?;

		Ok(envelope.attachment)
	}

	/// Removes the attachment `attachment_id`.
	pub async fn deregister(&self, attachment_id: &str) -> Result<Value> {
		let params = [("id".to_owned(), attachment_id.to_owned())];

		self.client
			.session
			.request(
				ResourceKind::Attachments,
				"deregister",
				Method::POST,
				"/attachment/deregister",
				&params,
			)
			.await
	}
}
