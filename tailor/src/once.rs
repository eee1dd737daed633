use std::collections::HashSet;

use lazy_static::lazy_static;
use parking_lot::Mutex;

lazy_static! {
    static ref CONSUMED: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
}

/// Executes `block` at most once per `token` for the lifetime of the process.
///
/// The token is consumed before `block` runs, so concurrent callers racing on
/// the same token skip instead of waiting for the winner to finish. The lock
/// is released before `block` executes, which makes nested `once` calls safe.
pub fn once<F: FnOnce()>(token: &str, block: F) {
    {
        let mut consumed = CONSUMED.lock();

        if consumed.contains(token) {
            return;
        }

        consumed.insert(token.to_string());
    }

    block();
}
