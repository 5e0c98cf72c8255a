//! Payment Model
//!
//! 只存卡号后四位，完整卡号/CVV 永不落库。
//! `orderId` 在订单创建后回填；没有回填的记录出现在孤儿列表。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use surrealdb::RecordId;

use super::order::Order;
use super::serde_helpers;
use super::user::UserSummary;
use crate::lifecycle::TransactionStatus;

/// Payment instrument
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "Credit/Debit Card")]
    Card,
    PayPal,
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    Other,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Other => "Other",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit/Debit Card" => Ok(PaymentMethod::Card),
            "PayPal" => Ok(PaymentMethod::PayPal),
            "Cash on Delivery" => Ok(PaymentMethod::CashOnDelivery),
            "Other" => Ok(PaymentMethod::Other),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Opaque account reference
    pub user_id: String,
    /// Weak reference to the order this payment settled, if any
    pub order_id: Option<String>,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    /// Last 4 digits only
    pub card_last_four: Option<String>,
    /// Human-facing unique id, immutable once set
    pub transaction_id: String,
    pub transaction_status: TransactionStatus,
    /// Creation timestamp (Unix millis)
    pub payment_date: i64,
    pub refund_date: Option<i64>,
    #[serde(default)]
    pub refund_amount: f64,
    pub notes: Option<String>,
}

// =============================================================================
// API Request Types
// =============================================================================

/// Create payment payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    #[serde(default)]
    pub user_id: String,
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_method: String,
    pub card_last_four: Option<String>,
    pub transaction_status: Option<String>,
    pub notes: Option<String>,
}

/// Transaction status update payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusUpdate {
    pub transaction_status: Option<String>,
}

// =============================================================================
// API Response Types
// =============================================================================

/// Payment with its order cross-reference resolved
#[derive(Debug, Serialize)]
pub struct PaymentWithOrder {
    #[serde(flatten)]
    pub payment: Payment,
    pub order: Option<Order>,
}

/// Admin listing row: userId resolved to a display projection
#[derive(Debug, Serialize)]
pub struct AdminPayment {
    #[serde(flatten)]
    pub payment: Payment,
    pub user: Option<UserSummary>,
    pub order: Option<Order>,
}
