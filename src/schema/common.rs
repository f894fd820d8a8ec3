//! Serde helpers shared by the schema records.

// crates.io
use serde::{Deserializer, Serializer, de::DeserializeOwned};
use time::format_description::well_known::Rfc3339;
// self
use crate::_prelude::*;

/// Declares a string-backed enum whose unknown values fall back to `Unknown(String)`.
macro_rules! string_enum {
	(
		$(#[$meta:meta])*
		pub enum $name:ident {
			$(
				$(#[$variant_meta:meta])*
				$variant:ident => $value:literal,
			)+
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$(
				$(#[$variant_meta])*
				$variant,
			)+
			/// Value this crate does not know about, preserved verbatim.
			Unknown(String),
		}
		impl $name {
			/// Returns the wire value.
			pub fn as_str(&self) -> &str {
				match self {
					$(Self::$variant => $value,)+
					Self::Unknown(value) => value,
				}
			}
		}
		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				match value {
					$($value => Self::$variant,)+
					other => Self::Unknown(other.to_owned()),
				}
			}
		}
		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				f.write_str(self.as_str())
			}
		}
		impl serde::Serialize for $name {
			fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
			where
				S: serde::Serializer,
			{
				serializer.serialize_str(self.as_str())
			}
		}
		impl<'de> serde::Deserialize<'de> for $name {
			fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
			where
				D: serde::Deserializer<'de>,
			{
				let value = <String as serde::Deserialize>::deserialize(deserializer)?;

				Ok(Self::from(value.as_str()))
			}
		}
	};
}
pub(crate) use string_enum;

/// RFC 3339 timestamps where the API sends `""` for "not yet".
pub(crate) mod rfc3339_or_empty {
	// self
	use super::*;

	pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		time::serde::rfc3339::option::serialize(value, serializer)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = Option::<String>::deserialize(deserializer)?;

		match raw.as_deref().map(str::trim) {
			None | Some("") => Ok(None),
			Some(value) =>
				OffsetDateTime::parse(value, &Rfc3339).map(Some).map_err(serde::de::Error::custom),
		}
	}
}

/// Strings where the API sends `""` for "absent".
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<String>::deserialize(deserializer)?;

	Ok(raw.filter(|value| !value.is_empty()))
}

/// Nested objects where the API sends `{}` for "absent".
pub(crate) fn empty_object_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	let raw = serde_json::Value::deserialize(deserializer)?;

	match raw {
		serde_json::Value::Null => Ok(None),
		serde_json::Value::Object(ref map) if map.is_empty() => Ok(None),
		value => serde_json::from_value(value).map(Some).map_err(serde::de::Error::custom),
	}
}

/// Numbers the API sometimes sends as `""` or as a numeric string.
pub(crate) fn number_or_empty<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = serde_json::Value::deserialize(deserializer)?;

	match raw {
		serde_json::Value::Null => Ok(None),
		serde_json::Value::Number(number) => Ok(number.as_f64()),
		serde_json::Value::String(value) if value.trim().is_empty() => Ok(None),
		serde_json::Value::String(value) =>
			value.trim().parse().map(Some).map_err(serde::de::Error::custom),
		other => Err(serde::de::Error::custom(format!("expected a number, found {other}"))),
	}
}
