//! Entry point: the [`Client`], its builder, and the interactive authorization helper.

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	flows::{Authorizer, CallbackListener},
	http::ReqwestHttpClient,
	provider::{self, ProviderDescriptor},
	resource::{
		AccountsResource, AttachmentsResource, BalanceResource, FeedResource, PotsResource,
		TransactionsResource, WebhooksResource, WhoAmIResource,
	},
	schema::{Account, Pot},
	session::Session,
	store::{FileSettingsStore, Settings, SettingsStore},
};

/// Redirect URI used by [`AuthorizeOptions::default`].
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:6600/monzo";
/// Callback wait used by [`AuthorizeOptions::default`].
pub const DEFAULT_AUTHORIZE_TIMEOUT: StdDuration = StdDuration::from_secs(300);

/// Authenticated Monzo API client.
///
/// Resource views borrow the client; list results for accounts and pots are memoized on the
/// client instance until [`Client::clear_cache`] or a `refresh` flag asks for fresh data.
pub struct Client {
	pub(crate) session: Session,
	pub(crate) accounts_cache: Mutex<Option<Vec<Account>>>,
	pub(crate) pots_cache: Mutex<HashMap<String, Vec<Pot>>>,
}
impl Client {
	/// Starts a builder from already loaded settings.
	pub fn builder(settings: Settings) -> ClientBuilder {
		ClientBuilder::new(settings)
	}

	/// Loads settings from [`Settings::default_path`] and builds a production client.
	pub async fn load() -> Result<Self> {
		let store: Arc<dyn SettingsStore> = Arc::new(FileSettingsStore::open_default()?);

		Self::from_store(store).await
	}

	/// Loads settings from `store` and builds a production client that persists refreshed
	/// tokens back into it.
	///
	/// Settings without credentials or with a blank access token count as missing.
	pub async fn from_store(store: Arc<dyn SettingsStore>) -> Result<Self> {
		let settings = store
			.load()
			.await?
			.filter(Settings::is_authorized)
			.ok_or(ConfigError::MissingSettings)?;

		Self::builder(settings).settings_store(store).build()
	}

	/// Runs the authorization-code flow and returns a ready client.
	///
	/// The listener is bound before `on_url` receives the authorize URL, so the caller may
	/// print it or open a browser right away. The resulting settings are saved to the
	/// configured store (the settings file by default).
	pub async fn authorize<F>(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		options: AuthorizeOptions,
		on_url: F,
	) -> Result<Self>
	where
		F: FnOnce(&Url),
	{
		let AuthorizeOptions { redirect_uri, timeout, descriptor, http_client, settings_store } =
			options;
		let client_id = client_id.into();
		let client_secret = client_secret.into();
		let http_client = match http_client {
			Some(client) => client,
			None => ReqwestHttpClient::new()?,
		};
		let store: Arc<dyn SettingsStore> = match settings_store {
			Some(store) => store,
			None => Arc::new(FileSettingsStore::open_default()?),
		};
		let listener = CallbackListener::bind(&redirect_uri).await?;
		let authorizer = Authorizer::new(
			descriptor.clone(),
			client_id.clone(),
			client_secret.clone(),
			http_client.clone(),
		);
		let session = authorizer.start_authorization(listener.redirect_uri().clone());

		on_url(&session.authorize_url);

		let callback = listener.wait(timeout).await?;
		let token = authorizer.exchange_callback(session, &callback).await?;
		let settings = Settings::new(client_id, client_secret, token);

		store.save(settings.clone()).await?;

		Self::builder(settings)
			.descriptor(descriptor)
			.http_client(http_client)
			.settings_store(store)
			.build()
	}

	/// Underlying authenticated session.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Drops every memoized list so the next call refetches.
	pub fn clear_cache(&self) {
		*self.accounts_cache.lock() = None;
		self.pots_cache.lock().clear();
	}

	/// Accounts resource.
	pub fn accounts(&self) -> AccountsResource<'_> {
		AccountsResource::new(self)
	}

	/// Balance resource.
	pub fn balance(&self) -> BalanceResource<'_> {
		BalanceResource::new(self)
	}

	/// Pots resource.
	pub fn pots(&self) -> PotsResource<'_> {
		PotsResource::new(self)
	}

	/// Transactions resource.
	pub fn transactions(&self) -> TransactionsResource<'_> {
		TransactionsResource::new(self)
	}

	/// Feed resource.
	pub fn feed(&self) -> FeedResource<'_> {
		FeedResource::new(self)
	}

	/// Webhooks resource.
	pub fn webhooks(&self) -> WebhooksResource<'_> {
		WebhooksResource::new(self)
	}

	/// Attachments resource.
	pub fn attachments(&self) -> AttachmentsResource<'_> {
		AttachmentsResource::new(self)
	}

	/// Token introspection resource.
	pub fn whoami(&self) -> WhoAmIResource<'_> {
		WhoAmIResource::new(self)
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client").field("session", &self.session).finish()
	}
}

/// Builder for [`Client`].
pub struct ClientBuilder {
	settings: Settings,
	descriptor: Option<ProviderDescriptor>,
	http_client: Option<ReqwestHttpClient>,
	settings_store: Option<Arc<dyn SettingsStore>>,
}
impl ClientBuilder {
	/// Creates a builder around `settings`.
	pub fn new(settings: Settings) -> Self {
		Self { settings, descriptor: None, http_client: None, settings_store: None }
	}

	/// Overrides the provider descriptor (defaults to [`ProviderDescriptor::monzo`]).
	pub fn descriptor(mut self, descriptor: ProviderDescriptor) -> Self {
		self.descriptor = Some(descriptor);

		self
	}

	/// Overrides the HTTP client.
	pub fn http_client(mut self, http_client: ReqwestHttpClient) -> Self {
		self.http_client = Some(http_client);

		self
	}

	/// Overrides where refreshed settings are persisted (defaults to the settings file).
	pub fn settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
		self.settings_store = Some(store);

		self
	}

	/// Builds the client.
	pub fn build(self) -> Result<Client> {
		let descriptor = self.descriptor.unwrap_or_default();
		let http_client = match self.http_client {
			Some(client) => client,
			None => ReqwestHttpClient::new()?,
		};
		let store: Arc<dyn SettingsStore> = match self.settings_store {
			Some(store) => store,
			None => Arc::new(FileSettingsStore::open_default()?),
		};

		Ok(Client {
			session: Session::new(self.settings, descriptor, http_client, store),
			accounts_cache: Mutex::new(None),
			pots_cache: Mutex::new(HashMap::new()),
		})
	}
}
impl Debug for ClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientBuilder")
			.field("client_id", &self.settings.client_id)
			.field("descriptor", &self.descriptor)
			.field("settings_store_set", &self.settings_store.is_some())
			.finish()
	}
}

/// Knobs for [`Client::authorize`].
#[derive(Clone)]
pub struct AuthorizeOptions {
	/// Redirect URI registered with the OAuth client; must be plain HTTP on a local host.
	pub redirect_uri: Url,
	/// How long to wait for the browser to come back.
	pub timeout: StdDuration,
	/// Provider endpoints.
	pub descriptor: ProviderDescriptor,
	/// HTTP client override.
	pub http_client: Option<ReqwestHttpClient>,
	/// Where to persist the resulting settings (defaults to the settings file).
	pub settings_store: Option<Arc<dyn SettingsStore>>,
}
impl AuthorizeOptions {
	/// Overrides the redirect URI.
	pub fn redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = redirect_uri;

		self
	}

	/// Overrides the callback timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the provider descriptor.
	pub fn descriptor(mut self, descriptor: ProviderDescriptor) -> Self {
		self.descriptor = descriptor;

		self
	}

	/// Overrides the HTTP client.
	pub fn http_client(mut self, http_client: ReqwestHttpClient) -> Self {
		self.http_client = Some(http_client);

		self
	}

	/// Overrides the settings store.
	pub fn settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
		self.settings_store = Some(store);

		self
	}
}
impl Default for AuthorizeOptions {
	fn default() -> Self {
		Self {
			redirect_uri: provider::parse_static(DEFAULT_REDIRECT_URI),
			timeout: DEFAULT_AUTHORIZE_TIMEOUT,
			descriptor: ProviderDescriptor::monzo(),
			http_client: None,
			settings_store: None,
		}
	}
}
impl Debug for AuthorizeOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizeOptions")
			.field("redirect_uri", &self.redirect_uri)
			.field("timeout", &self.timeout)
			.field("descriptor", &self.descriptor)
			.finish()
	}
}
