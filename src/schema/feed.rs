//! Feed items.

// self
use crate::_prelude::*;

/// Basic feed item pushed into the user's Monzo feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFeedItem {
	/// Title to display.
	pub title: String,
	/// Icon shown in the feed.
	pub image_url: Url,
	/// Body text.
	pub body: String,
	/// Background colour as `#RRGGBB`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub background_color: Option<String>,
	/// Title colour as `#RRGGBB`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title_color: Option<String>,
	/// Body colour as `#RRGGBB`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub body_color: Option<String>,
}
impl BasicFeedItem {
	/// Creates an item with the required fields.
	pub fn new(title: impl Into<String>, image_url: Url, body: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			image_url,
			body: body.into(),
			background_color: None,
			title_color: None,
			body_color: None,
		}
	}

	/// Sets the background colour.
	pub fn background_color(mut self, value: impl Into<String>) -> Self {
		self.background_color = Some(value.into());

		self
	}

	/// Sets the title colour.
	pub fn title_color(mut self, value: impl Into<String>) -> Self {
		self.title_color = Some(value.into());

		self
	}

	/// Sets the body colour.
	pub fn body_color(mut self, value: impl Into<String>) -> Self {
		self.body_color = Some(value.into());

		self
	}

	/// Flattens the item into `params[<field>]` form pairs, skipping unset fields.
	pub fn to_params(&self) -> Vec<(String, String)> {
		let fields = [
			("title", Some(self.title.as_str())),
			("image_url", Some(self.image_url.as_str())),
			("body", Some(self.body.as_str())),
			("background_color", self.background_color.as_deref()),
			("title_color", self.title_color.as_deref()),
			("body_color", self.body_color.as_deref()),
		];

		fields
			.into_iter()
			.filter_map(|(key, value)| value.map(|value| (format!("params[{key}]"), value.to_owned())))
			.collect()
	}
}
