//! Human-facing identifier generation
//!
//! Order numbers and transaction ids are distinct from the storage-assigned
//! record ids. Both are generated exactly once, immediately before the durable
//! write; uniqueness is ultimately enforced by the storage unique index, and a
//! collision surfaces as a conflict instead of a silent overwrite.

use rand::Rng;

use crate::utils::now_millis;

/// Order number prefix
pub const ORDER_PREFIX: &str = "ORD";

/// Transaction id prefix
pub const TXN_PREFIX: &str = "TXN";

const TXN_SUFFIX_LEN: usize = 9;
const TXN_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate an order number: `ORD` + millisecond timestamp + zero-padded
/// 3-digit random suffix.
///
/// Same-millisecond collisions are possible by construction; the unique index
/// on `order.orderNumber` catches them.
pub fn new_order_number() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("{}{}{:03}", ORDER_PREFIX, now_millis(), suffix)
}

/// Generate a transaction id: `TXN` + millisecond timestamp + 9 uppercase
/// base-36 characters.
pub fn new_transaction_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TXN_SUFFIX_LEN)
        .map(|_| TXN_ALPHABET[rng.gen_range(0..TXN_ALPHABET.len())] as char)
        .collect();
    format!("{}{}{}", TXN_PREFIX, now_millis(), suffix)
}
