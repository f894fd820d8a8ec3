//! OAuth flows: the authorization-code handshake, the local callback listener, and token refresh.

pub mod authorize;
pub mod callback;

mod refresh;

pub use authorize::*;
pub use callback::*;

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	http::ReqwestHttpClient,
	oauth::OAuthFacade,
	provider::ProviderDescriptor,
};

/// Drives OAuth grants for one client registration against one provider descriptor.
#[derive(Clone)]
pub struct Authorizer {
	/// Provider descriptor that defines the OAuth endpoints.
	pub descriptor: ProviderDescriptor,
	/// OAuth 2.0 client identifier used in every grant.
	pub client_id: String,
	client_secret: TokenSecret,
	http_client: ReqwestHttpClient,
}
impl Authorizer {
	/// Creates an authorizer for the provided credentials.
	pub fn new(
		descriptor: ProviderDescriptor,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		http_client: ReqwestHttpClient,
	) -> Self {
		Self {
			descriptor,
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			http_client,
		}
	}

	fn facade(&self, redirect_uri: Option<&Url>) -> Result<OAuthFacade> {
		OAuthFacade::from_descriptor(
			&self.descriptor,
			&self.client_id,
			self.client_secret.expose(),
			redirect_uri,
			self.http_client.clone(),
		)
	}
}
impl Debug for Authorizer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authorizer")
			.field("descriptor", &self.descriptor)
			.field("client_id", &self.client_id)
			.finish()
	}
}
