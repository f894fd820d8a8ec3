//! Runs the interactive authorization flow and writes the settings file.
//!
//! Reads `MONZO_CLIENT_ID` and `MONZO_CLIENT_SECRET`, prints the authorize URL, and waits for
//! the browser to come back to `http://localhost:6600/monzo`. Set `MONZO_API_SETTINGS` to
//! write somewhere other than `~/.monzo-api`.

// std
use std::env;
// crates.io
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
// self
use monzo_api::client::{AuthorizeOptions, Client};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

	let client_id = env::var("MONZO_CLIENT_ID")?;
	let client_secret = env::var("MONZO_CLIENT_SECRET")?;
	let client =
		Client::authorize(client_id, client_secret, AuthorizeOptions::default(), |url| {
			println!("Open this URL in your browser to grant access:\n\n{url}\n");
		})
		.await?;
	let whoami = client.whoami().get().await?;

	println!("Authorized as {} (client {}).", whoami.user_id, whoami.client_id);
	println!("Approve the login in the Monzo app before calling account endpoints.");

	Ok(())
}
