// std
use std::time::Duration as StdDuration;
// self
use crate::obs::{Outcome, ResourceKind};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(kind: ResourceKind, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"monzo_api_request_total",
			"resource" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records how long an API call took, from the first token check to the decoded body.
pub fn record_request_duration(kind: ResourceKind, elapsed: StdDuration) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!("monzo_api_request_duration_seconds", "resource" => kind.as_str())
			.record(elapsed.as_secs_f64());
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, elapsed);
	}
}
