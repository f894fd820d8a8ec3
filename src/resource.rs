//! Resource views that translate method calls into API requests.
//!
//! Every view borrows the [`Client`](crate::client::Client); building one is free.

pub mod accounts;
pub mod attachments;
pub mod balance;
pub mod feed;
pub mod pots;
pub mod transactions;
pub mod webhooks;
pub mod whoami;

pub use accounts::*;
pub use attachments::*;
pub use balance::*;
pub use feed::*;
pub use pots::*;
pub use transactions::*;
pub use webhooks::*;
pub use whoami::*;

/// Picks the item a caller means when they did not name one.
///
/// A single item is returned as is. Otherwise the items are filtered with `is_active` and the
/// sole survivor, if there is exactly one, is returned.
pub fn select_default<T, P>(items: &[T], is_active: P) -> Option<&T>
where
	P: Fn(&T) -> bool,
{
	if let [only] = items {
		return Some(only);
	}

	let mut active = items.iter().filter(|item| is_active(item));

	match (active.next(), active.next()) {
		(Some(item), None) => Some(item),
		_ => None,
	}
}
