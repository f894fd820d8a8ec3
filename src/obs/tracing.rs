// self
use crate::{_prelude::*, obs::ResourceKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Span wrapping one API call or OAuth step.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a span for `operation` on `kind`.
	///
	/// [`ResourceKind::OAuth`] produces a `monzo_api.oauth` span with `operation` as its
	/// `stage`; every other kind produces a `monzo_api.request` span.
	pub fn new(kind: ResourceKind, operation: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = match kind {
				ResourceKind::OAuth => tracing::info_span!("monzo_api.oauth", stage = operation),
				_ => tracing::info_span!(
					"monzo_api.request",
					resource = kind.as_str(),
					operation
				),
			};

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, operation);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> CallSpanGuard {
		#[cfg(feature = "tracing")]
		{
			CallSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			CallSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`CallSpan::entered`].
pub struct CallSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for CallSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("CallSpanGuard(..)")
	}
}

/// Logs the HTTP status of a response at `debug`.
pub fn log_response_status(method: &str, endpoint: &str, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(method, endpoint, status, "Monzo API responded.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, endpoint, status);
	}
}

/// Logs that the access token is about to be refreshed.
pub fn log_token_refresh(expires_at: Option<OffsetDateTime>) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(?expires_at, "Refreshing Monzo access token.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = expires_at;
	}
}
