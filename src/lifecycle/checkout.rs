//! Checkout validation gate
//!
//! Turns raw creation payloads into well-formed entities, or rejects them
//! before anything touches storage. All-or-nothing: one bad item fails the
//! whole request, and no partial entity is ever persisted.
//!
//! The two-step online checkout (Payment first, then Order carrying the
//! payment id) is the caller's contract; this module only validates each
//! single entity. The payment-existence and amount-match checks need storage
//! and live in `OrderRepository::create`.

use crate::db::models::{
    Order, OrderCreate, OrderPaymentMethod, Payment, PaymentCreate, PaymentMethod,
};
use crate::db::repository::RepoError;
use crate::lifecycle::{OrderStatus, PaymentStatus, TransactionStatus, money, numbering};
use crate::utils::now_millis;

/// Validate an order creation payload and assemble the entity.
///
/// The order number is generated here, immediately before the caller's
/// durable write.
pub fn build_order(data: OrderCreate) -> Result<Order, RepoError> {
    if data.user_id.trim().is_empty() {
        return Err(invalid("userId must not be empty"));
    }
    if data.items.is_empty() {
        return Err(invalid("items must not be empty"));
    }
    for (i, item) in data.items.iter().enumerate() {
        if item.product_id.trim().is_empty() {
            return Err(invalid(format!("items[{i}].productId must not be empty")));
        }
        if item.name.trim().is_empty() {
            return Err(invalid(format!("items[{i}].name must not be empty")));
        }
        if item.image.trim().is_empty() {
            return Err(invalid(format!("items[{i}].image must not be empty")));
        }
        if item.quantity < 1 {
            return Err(invalid(format!("items[{i}].quantity must be at least 1")));
        }
        if item.price < 0.0 {
            return Err(invalid(format!("items[{i}].price must not be negative")));
        }
    }

    let shipping_address = data
        .shipping_address
        .ok_or_else(|| invalid("shippingAddress is required"))?;
    for (field, value) in shipping_address.fields() {
        if value.trim().is_empty() {
            return Err(invalid(format!(
                "shippingAddress.{field} must not be empty"
            )));
        }
    }

    let payment_method: OrderPaymentMethod = data
        .payment_method
        .parse()
        .map_err(|_| invalid(format!("Invalid paymentMethod: '{}'", data.payment_method)))?;

    let subtotal = data.subtotal.ok_or_else(|| invalid("subtotal is required"))?;
    let total_amount = data
        .total_amount
        .ok_or_else(|| invalid("totalAmount is required"))?;
    if subtotal < 0.0 || data.shipping_cost < 0.0 || total_amount < 0.0 {
        return Err(invalid("Amounts must not be negative"));
    }
    if !money::totals_balance(subtotal, data.shipping_cost, total_amount) {
        return Err(invalid("totalAmount must equal subtotal + shippingCost"));
    }

    let payment_status = parse_or_default::<PaymentStatus>(&data.payment_status, "paymentStatus")?;
    let order_status = parse_or_default::<OrderStatus>(&data.order_status, "orderStatus")?;

    let payment_id = data.payment_id.filter(|id| !id.trim().is_empty());

    Ok(Order {
        id: None,
        order_number: numbering::new_order_number(),
        user_id: data.user_id,
        items: data.items,
        shipping_address,
        payment_method,
        payment_id,
        subtotal,
        shipping_cost: data.shipping_cost,
        total_amount,
        payment_status,
        order_status,
        order_date: now_millis(),
        delivery_date: None,
        notes: data.notes,
    })
}

/// Validate a payment creation payload and assemble the entity.
pub fn build_payment(data: PaymentCreate) -> Result<Payment, RepoError> {
    if data.user_id.trim().is_empty() {
        return Err(invalid("userId must not be empty"));
    }

    let amount = data.amount.ok_or_else(|| invalid("amount is required"))?;
    if amount < 0.0 {
        return Err(invalid("amount must not be negative"));
    }

    let payment_method: PaymentMethod = data
        .payment_method
        .parse()
        .map_err(|_| invalid(format!("Invalid paymentMethod: '{}'", data.payment_method)))?;

    if let Some(last_four) = &data.card_last_four
        && (last_four.len() != 4 || !last_four.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(invalid("cardLastFour must be exactly 4 digits"));
    }

    let transaction_status =
        parse_or_default::<TransactionStatus>(&data.transaction_status, "transactionStatus")?;

    Ok(Payment {
        id: None,
        user_id: data.user_id,
        order_id: None,
        amount,
        payment_method,
        card_last_four: data.card_last_four,
        transaction_id: numbering::new_transaction_id(),
        transaction_status,
        payment_date: now_millis(),
        refund_date: None,
        refund_amount: 0.0,
        notes: data.notes,
    })
}

fn invalid(msg: impl Into<String>) -> RepoError {
    RepoError::Validation(msg.into())
}

/// Parse an optional enum-valued string; absent means the type's default,
/// out-of-set fails naming the field.
fn parse_or_default<T>(value: &Option<String>, field: &str) -> Result<T, RepoError>
where
    T: std::str::FromStr + Default,
{
    match value {
        Some(s) => s
            .parse()
            .map_err(|_| invalid(format!("Invalid {field}: '{s}'"))),
        None => Ok(T::default()),
    }
}
