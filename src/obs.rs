//! Optional observability helpers for API calls and OAuth steps.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit `monzo_api.request` spans (fields `resource` and `operation`)
//!   around API calls and `monzo_api.oauth` spans (field `stage`) around token work.
//! - Enable `metrics` to increment the `monzo_api_request_total` counter for every
//!   attempt/success/failure, labeled by `resource` + `outcome`, and to record the
//!   `monzo_api_request_duration_seconds` histogram, labeled by `resource`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// API areas observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
	/// `/ping/whoami`.
	WhoAmI,
	/// `/accounts`.
	Accounts,
	/// `/balance`.
	Balance,
	/// `/pots`.
	Pots,
	/// `/transactions`.
	Transactions,
	/// `/feed`.
	Feed,
	/// `/webhooks`.
	Webhooks,
	/// `/attachment/*`.
	Attachments,
	/// Authorization and token endpoint calls.
	OAuth,
}
impl ResourceKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ResourceKind::WhoAmI => "whoami",
			ResourceKind::Accounts => "accounts",
			ResourceKind::Balance => "balance",
			ResourceKind::Pots => "pots",
			ResourceKind::Transactions => "transactions",
			ResourceKind::Feed => "feed",
			ResourceKind::Webhooks => "webhooks",
			ResourceKind::Attachments => "attachments",
			ResourceKind::OAuth => "oauth",
		}
	}
}
impl Display for ResourceKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// A request is about to be sent.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
