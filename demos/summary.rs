//! Prints the default account's balance, pots, and last week of transactions.

// crates.io
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
// self
use monzo_api::{
	client::Client,
	resource::{ListTransactions, n_days_ago},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

	let client = Client::load().await?;
	let account = client.accounts().get_default_account().await?;
	let balance = client.balance().get(Some(&account.id)).await?;

	println!("{} ({})", account.description, account.id);
	println!("Balance: {} {}", format_minor(balance.balance), balance.currency);
	println!("Spent today: {} {}", format_minor(-balance.spend_today), balance.currency);

	for pot in client.pots().list(Some(&account.id), false).await? {
		if pot.is_active() {
			println!("Pot {}: {} {}", pot.name, format_minor(pot.balance), pot.currency);
		}
	}

	let mut filter = ListTransactions::default().account_id(account.id.clone());

	if let Some(since) = n_days_ago(7) {
		filter = filter.since(since);
	}

	for transaction in client.transactions().list(filter).await? {
		let category = transaction.category.as_ref().map(ToString::to_string).unwrap_or_default();

		println!(
			"{} {:>10} {} {}",
			transaction.created.date(),
			format_minor(transaction.amount),
			category,
			transaction.description,
		);
	}

	Ok(())
}

fn format_minor(amount: i64) -> String {
	let sign = if amount < 0 { "-" } else { "" };
	let amount = amount.unsigned_abs();

	format!("{sign}{}.{:02}", amount / 100, amount % 100)
}
