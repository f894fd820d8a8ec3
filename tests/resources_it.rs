#![cfg(feature = "test")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use monzo_api::{
	_preludet::*,
	resource::{ListTransactions, PotTransfer},
	schema::{BasicFeedItem, TransactionCategory},
};

const BEARER: &str = "Bearer test-access-token";

fn account(id: &str, closed: bool) -> serde_json::Value {
	json!({
		"id": id,
		"description": format!("Account {id}"),
		"created": "2015-11-13T12:17:42Z",
		"closed": closed,
		"type": "uk_retail",
		"currency": "GBP",
		"country_code": "GB",
		"owners": []
	})
}

fn pot(id: &str, deleted: bool, balance: i64) -> serde_json::Value {
	json!({
		"id": id,
		"name": "Savings",
		"style": "beach_ball",
		"balance": balance,
		"currency": "GBP",
		"created": "2017-12-09T09:57:39.353Z",
		"updated": "2018-01-25T11:11:41.12Z",
		"deleted": deleted,
		"current_account_id": "acc_1"
	})
}

fn transaction(id: &str) -> serde_json::Value {
	json!({
		"id": id,
		"amount": -510,
		"created": "2015-08-22T12:20:18Z",
		"currency": "GBP",
		"description": "THE DE BEAUVOIR DELI C LONDON GBR",
		"merchant": "merch_00008zIcpbAKe8shBxXUtl",
		"metadata": {},
		"notes": "",
		"is_load": false,
		"settled": "",
		"category": "eating_out",
		"account_balance": 13013
	})
}

async fn mock_accounts(server: &MockServer, accounts: serde_json::Value) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(GET).path("/accounts").header("authorization", BEARER);
			then.status(200).json_body(json!({ "accounts": accounts }));
		})
		.await
}

#[tokio::test]
async fn accounts_list_decodes_minimal_payload() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/accounts");
			then.status(200).header("content-type", "application/json").body(
				"{\"accounts\":[{\"id\":\"acc_1\",\"description\":\"d\",\"created\":\"2015-11-13T12:17:42Z\"}]}",
			);
		})
		.await;
	let accounts = client.accounts().list(false).await.expect("Accounts should list.");

	mock.assert_async().await;

	assert_eq!(accounts.len(), 1);
	assert_eq!(accounts[0].id, "acc_1");
	assert_eq!(accounts[0].description, "d");
}

#[tokio::test]
async fn accounts_are_memoized_until_refresh_or_clear() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = mock_accounts(&server, json!([account("acc_1", false)])).await;

	client.accounts().list(false).await.expect("First list should succeed.");
	client.accounts().list(false).await.expect("Cached list should succeed.");

	mock.assert_async().await;
	mock.delete_async().await;

	let cached = client.accounts().list(false).await.expect("Cache should survive the mock.");

	assert_eq!(cached[0].id, "acc_1");

	client.clear_cache();

	let err = client.accounts().list(false).await.expect_err("Cleared cache should refetch.");

	assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn empty_account_list_is_fetched_again() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = mock_accounts(&server, json!([])).await;

	assert!(client.accounts().list(false).await.expect("First list should succeed.").is_empty());
	assert!(client.accounts().list(false).await.expect("Second list should succeed.").is_empty());

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn default_account_needs_a_single_open_account() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());

	mock_accounts(&server, json!([account("acc_1", true), account("acc_2", false)])).await;

	let default = client.accounts().get_default_account().await.expect("Default should resolve.");

	assert_eq!(default.id, "acc_2");

	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());

	mock_accounts(&server, json!([account("acc_1", false), account("acc_2", false)])).await;

	let err = client
		.accounts()
		.get_default_account()
		.await
		.expect_err("Two open accounts should be ambiguous.");

	assert!(matches!(err, Error::CannotDetermineDefaultAccount));

	let err = client.balance().get(None).await.expect_err("Balance needs a default account.");

	assert!(matches!(err, Error::CannotDetermineDefaultAccount));
}

#[tokio::test]
async fn balance_uses_default_account() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());

	mock_accounts(&server, json!([account("acc_1", false)])).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/balance").query_param("account_id", "acc_1");
			then.status(200).json_body(json!({
				"balance": 5000,
				"total_balance": 6000,
				"currency": "GBP",
				"spend_today": -120,
				"local_currency": "",
				"local_exchange_rate": "",
				"local_spend": []
			}));
		})
		.await;
	let balance = client.balance().get(None).await.expect("Balance should load.");

	mock.assert_async().await;

	assert_eq!(balance.balance, 5000);
	assert_eq!(balance.total_balance, 6000);
	assert_eq!(balance.spend_today, -120);
	assert_eq!(balance.local_currency, None);
	assert_eq!(balance.local_exchange_rate, None);
}

#[tokio::test]
async fn pots_are_listed_per_account_and_cached() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/pots").query_param("current_account_id", "acc_1");
			then.status(200)
				.json_body(json!({ "pots": [pot("pot_1", true, 0), pot("pot_2", false, 100)] }));
		})
		.await;
	let pots = client.pots().list(Some("acc_1"), false).await.expect("Pots should list.");
	let default =
		client.pots().get_default_pot(Some("acc_1")).await.expect("Default pot should resolve.");

	mock.assert_async().await;

	assert_eq!(pots.len(), 2);
	assert_eq!(default.id, "pot_2");
}

#[tokio::test]
async fn empty_pot_list_is_fetched_again() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/pots").query_param("current_account_id", "acc_1");
			then.status(200).json_body(json!({ "pots": [] }));
		})
		.await;

	client.pots().list(Some("acc_1"), false).await.expect("First list should succeed.");
	client.pots().list(Some("acc_1"), false).await.expect("Second list should succeed.");

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn deposit_fills_defaults_and_returns_pot() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());

	mock_accounts(&server, json!([account("acc_1", false)])).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/pots").query_param("current_account_id", "acc_1");
			then.status(200).json_body(json!({ "pots": [pot("pot_1", false, 100)] }));
		})
		.await;

	let mock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/pots/pot_1/deposit")
				.header("content-type", "application/x-www-form-urlencoded")
				.form_urlencoded_tuple("source_account_id", "acc_1")
				.form_urlencoded_tuple("amount", "500");
			then.status(200).json_body(pot("pot_1", false, 600));
		})
		.await;
	let pot = client.pots().deposit(PotTransfer::new(500)).await.expect("Deposit should succeed.");

	mock.assert_async().await;

	assert_eq!(pot.balance, 600);
}

#[tokio::test]
async fn withdraw_sends_explicit_ids() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/pots/pot_9/withdraw")
				.form_urlencoded_tuple("destination_account_id", "acc_9")
				.form_urlencoded_tuple("amount", "250")
				.form_urlencoded_tuple("dedupe_id", "withdraw-1");
			then.status(200).json_body(pot("pot_9", false, 0));
		})
		.await;
	let transfer = PotTransfer::new(250).pot_id("pot_9").account_id("acc_9").dedupe_id("withdraw-1");
	let pot = client.pots().withdraw(transfer).await.expect("Withdraw should succeed.");

	mock.assert_async().await;

	assert_eq!(pot.id, "pot_9");
	assert_eq!(pot.balance, 0);
}

#[tokio::test]
async fn transactions_list_sends_server_side_filters() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/transactions")
				.query_param("account_id", "acc_1")
				.query_param("since", "2024-01-09T00:00:00Z")
				.query_param("limit", "2");
			then.status(200).json_body(json!({
				"transactions": [transaction("tx_1"), transaction("tx_2")]
			}));
		})
		.await;
	let filter = ListTransactions::default()
		.account_id("acc_1")
		.since(time::macros::datetime!(2024-01-09 00:00:00 UTC))
		.limit(2);
	let transactions = client.transactions().list(filter).await.expect("Transactions should list.");

	mock.assert_async().await;

	assert_eq!(transactions.len(), 2);
	assert_eq!(transactions[0].id, "tx_1");
	assert_eq!(transactions[0].settled, None);
	assert_eq!(transactions[0].category, Some(TransactionCategory::EatingOut));
}

#[tokio::test]
async fn transaction_get_can_expand_merchant() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/transactions/tx_1").query_param("expand[]", "merchant");
			then.status(200).json_body(json!({ "transaction": transaction("tx_1") }));
		})
		.await;
	let transaction =
		client.transactions().get("tx_1", true).await.expect("Transaction should load.");

	mock.assert_async().await;

	assert_eq!(transaction.id, "tx_1");
	assert_eq!(
		transaction.merchant.as_ref().map(|merchant| merchant.id()),
		Some("merch_00008zIcpbAKe8shBxXUtl"),
	);
}

#[tokio::test]
async fn transaction_annotate_patches_metadata() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mut annotated = transaction("tx_1");

	annotated["metadata"] = json!({ "note": "lunch" });

	let mock = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/transactions/tx_1")
				.form_urlencoded_tuple("metadata[note]", "lunch");
			then.status(200).json_body(json!({ "transaction": annotated }));
		})
		.await;
	let transaction = client
		.transactions()
		.annotate("tx_1", [("note", "lunch")])
		.await
		.expect("Annotation should succeed.");

	mock.assert_async().await;

	assert_eq!(transaction.metadata.get("note").map(String::as_str), Some("lunch"));
}

#[tokio::test]
async fn feed_item_is_flattened_into_params() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/feed")
				.form_urlencoded_tuple("account_id", "acc_1")
				.form_urlencoded_tuple("type", "basic")
				.form_urlencoded_tuple("params[title]", "Hello")
				.form_urlencoded_tuple("params[image_url]", "https://example.com/icon.png")
				.form_urlencoded_tuple("params[body]", "World")
				.form_urlencoded_tuple("params[background_color]", "#FCF1EE")
				.form_urlencoded_tuple("url", "https://example.com/");
			then.status(200).json_body(json!({}));
		})
		.await;
	let item = BasicFeedItem::new(
		"Hello",
		Url::parse("https://example.com/icon.png").expect("Icon URL should parse."),
		"World",
	)
	.background_color("#FCF1EE");
	let target = Url::parse("https://example.com/").expect("Target URL should parse.");
	let response = client
		.feed()
		.create(&item, Some("acc_1"), Some(&target))
		.await
		.expect("Feed item should be created.");

	mock.assert_async().await;

	assert_eq!(response, json!({}));
}

#[tokio::test]
async fn webhooks_round_trip() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let hook = json!({ "id": "webhook_1", "account_id": "acc_1", "url": "https://example.com/hook" });
	let list = server
		.mock_async(|when, then| {
			when.method(GET).path("/webhooks").query_param("account_id", "acc_1");
			then.status(200).json_body(json!({ "webhooks": [hook.clone()] }));
		})
		.await;
	let register = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/webhooks")
				.form_urlencoded_tuple("account_id", "acc_1")
				.form_urlencoded_tuple("url", "https://example.com/hook");
			then.status(200).json_body(json!({ "webhook": hook.clone() }));
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/webhooks/webhook_1");
			then.status(200).json_body(json!({}));
		})
		.await;
	let hooks = client.webhooks().list(Some("acc_1")).await.expect("Webhooks should list.");
	let url = Url::parse("https://example.com/hook").expect("Hook URL should parse.");
	let registered =
		client.webhooks().register(&url, Some("acc_1")).await.expect("Webhook should register.");

	client.webhooks().delete("webhook_1").await.expect("Webhook should delete.");

	list.assert_async().await;
	register.assert_async().await;
	delete.assert_async().await;

	assert_eq!(hooks.len(), 1);
	assert_eq!(registered.id, "webhook_1");
	assert_eq!(registered.url, "https://example.com/hook");
}

#[tokio::test]
async fn attachments_upload_register_and_deregister() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let upload = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/attachment/upload")
				.form_urlencoded_tuple("file_name", "receipt.png")
				.form_urlencoded_tuple("file_type", "image/png")
				.form_urlencoded_tuple("content_length", "1024");
			then.status(200).json_body(json!({
				"file_url": "https://s3.example.com/receipt.png",
				"upload_url": "https://s3.example.com/upload/receipt.png"
			}));
		})
		.await;
	let register = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/attachment/register")
				.form_urlencoded_tuple("external_id", "tx_1")
				.form_urlencoded_tuple("file_url", "https://s3.example.com/receipt.png")
				.form_urlencoded_tuple("file_type", "image/png");
			then.status(200).json_body(json!({
				"attachment": {
					"id": "attach_1",
					"user_id": "user_1",
					"external_id": "tx_1",
					"file_url": "https://s3.example.com/receipt.png",
					"file_type": "image/png",
					"created": "2015-11-12T18:37:02Z"
				}
			}));
		})
		.await;
	let deregister = server
		.mock_async(|when, then| {
			when.method(POST).path("/attachment/deregister").form_urlencoded_tuple("id", "attach_1");
			then.status(200).json_body(json!({}));
		})
		.await;
	let slot = client
		.attachments()
		.upload("receipt.png", "image/png", 1024)
		.await
		.expect("Upload slot should be issued.");
	let file_url = Url::parse(&slot.file_url).expect("File URL should parse.");
	let attachment = client
		.attachments()
		.register("tx_1", &file_url, "image/png")
		.await
		.expect("Attachment should register.");

	client.attachments().deregister(&attachment.id).await.expect("Attachment should deregister.");

	upload.assert_async().await;
	register.assert_async().await;
	deregister.assert_async().await;

	assert_eq!(attachment.external_id, "tx_1");
}

#[tokio::test]
async fn whoami_reports_token_owner() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/ping/whoami").header("authorization", BEARER);
			then.status(200).json_body(json!({
				"authenticated": true,
				"client_id": TEST_CLIENT_ID,
				"user_id": "user_1"
			}));
		})
		.await;
	let whoami = client.whoami().get().await.expect("Whoami should load.");

	mock.assert_async().await;

	assert!(whoami.authenticated);
	assert_eq!(whoami.client_id, TEST_CLIENT_ID);
	assert_eq!(whoami.user_id, "user_1");
}
