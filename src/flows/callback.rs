//! Short-lived local HTTP listener that captures the OAuth redirect.
//!
//! [`CallbackListener::bind`] claims the redirect URI's host and port before the user is sent
//! to the authorize URL, so a fast browser cannot race the listener. [`CallbackListener::wait`]
//! then serves requests until one hits the redirect path, answers it with a plain-text page,
//! and returns the full callback URL.

// std
use std::net::SocketAddr;
// crates.io
use axum::{
	Router,
	extract::State,
	http::{StatusCode, Uri, header},
	response::{IntoResponse, Response},
};
use tokio::{
	net::TcpListener,
	sync::oneshot,
	time::{self, Duration as StdDuration},
};
use url::Host;
// self
use crate::{
	_prelude::*,
	error::{AuthorizationError, ConfigError, TransportError},
};

/// Body served to the browser once the callback has been captured.
pub const CALLBACK_RESPONSE_BODY: &str =
	"Monzo OAuth authorization complete. You can close this window and return to the terminal.";

const SHUTDOWN_GRACE: StdDuration = StdDuration::from_secs(5);

struct CallbackState {
	path: String,
	redirect_uri: Url,
	sender: Mutex<Option<oneshot::Sender<Url>>>,
}

/// One-shot listener bound to the redirect URI's host and port.
#[derive(Debug)]
pub struct CallbackListener {
	listener: TcpListener,
	redirect_uri: Url,
	local_addr: SocketAddr,
}
impl CallbackListener {
	/// Binds the host and port named by `redirect_uri`.
	///
	/// Port `0` binds an ephemeral port; [`CallbackListener::redirect_uri`] then reports the
	/// effective URI to register with the provider.
	pub async fn bind(redirect_uri: &Url) -> Result<Self> {
		if redirect_uri.scheme() != "http" {
			return Err(invalid_redirect(redirect_uri, "the local listener only serves plain HTTP"));
		}

		let host = match redirect_uri.host() {
			Some(Host::Domain(domain)) => domain.to_owned(),
			Some(Host::Ipv4(ip)) => ip.to_string(),
			Some(Host::Ipv6(ip)) => ip.to_string(),
			None => return Err(invalid_redirect(redirect_uri, "a host is required")),
		};
		let port = redirect_uri.port_or_known_default().unwrap_or(80);
		let listener =
			TcpListener::bind((host.as_str(), port)).await.map_err(TransportError::Io)?;
		let local_addr = listener.local_addr().map_err(TransportError::Io)?;
		let mut effective = redirect_uri.clone();

		if port == 0 && effective.set_port(Some(local_addr.port())).is_err() {
			return Err(invalid_redirect(redirect_uri, "the port cannot be rewritten"));
		}

		Ok(Self { listener, redirect_uri: effective, local_addr })
	}

	/// Redirect URI to embed in the authorize URL.
	pub fn redirect_uri(&self) -> &Url {
		&self.redirect_uri
	}

	/// Socket address the listener is bound to.
	pub fn local_addr(&self) -> SocketAddr {
		self.local_addr
	}

	/// Waits up to `timeout` for the callback request.
	pub async fn wait(self, timeout: StdDuration) -> Result<Url> {
		self.wait_until(timeout, std::future::pending::<()>()).await
	}

	/// Waits up to `timeout` for the callback request, giving up early once `cancel` resolves.
	pub async fn wait_until<F>(self, timeout: StdDuration, cancel: F) -> Result<Url>
	where
		F: Future<Output = ()>,
	{
		let (url_tx, url_rx) = oneshot::channel();
		let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
		let path = match self.redirect_uri.path() {
			"" => "/".to_owned(),
			path => path.to_owned(),
		};
		let state = Arc::new(CallbackState {
			path,
			redirect_uri: self.redirect_uri.clone(),
			sender: Mutex::new(Some(url_tx)),
		});
		let app = Router::new().fallback(handle_callback).with_state(state);
		let server = axum::serve(self.listener, app)
			.with_graceful_shutdown(async move {
				let _ = shutdown_rx.await;
			})
			.into_future();
		let mut server_task = tokio::spawn(server);
		let outcome: Result<Url> = tokio::select! {
			received = url_rx =>
				received.map_err(|_| Error::from(AuthorizationError::CallbackCancelled)),
			_ = time::sleep(timeout) =>
				Err(Error::from(AuthorizationError::CallbackTimeout { timeout })),
			_ = cancel => Err(Error::from(AuthorizationError::CallbackCancelled)),
		};
		let _ = shutdown_tx.send(());

		if time::timeout(SHUTDOWN_GRACE, &mut server_task).await.is_err() {
			server_task.abort();
		}

		outcome
	}
}

async fn handle_callback(State(state): State<Arc<CallbackState>>, uri: Uri) -> Response {
	if uri.path() != state.path {
		return (StatusCode::NOT_FOUND, "Not found.").into_response();
	}

	let mut callback = state.redirect_uri.clone();

	callback.set_query(uri.query());

	if let Some(sender) = state.sender.lock().take() {
		let _ = sender.send(callback);
	}

	(
		[(header::CONTENT_TYPE, "text/plain; charset=utf-8"), (header::CONNECTION, "close")],
		CALLBACK_RESPONSE_BODY,
	)
		.into_response()
}

fn invalid_redirect(uri: &Url, reason: &'static str) -> Error {
	ConfigError::InvalidRedirect { uri: uri.to_string(), reason }.into()
}
