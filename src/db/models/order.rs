//! Order Model
//!
//! 订单实体：条目快照 + 收货地址为内嵌文档，不引用 Catalog 活数据。
//! `paymentId` 是指向 Payment 的弱引用，查询层负责解析。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use surrealdb::RecordId;

use super::payment::Payment;
use super::serde_helpers;
use super::user::UserSummary;
use crate::lifecycle::{OrderStatus, PaymentStatus};

// =============================================================================
// Order (主表)
// =============================================================================

/// How the customer pays for an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderPaymentMethod {
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    #[serde(rename = "Online Payment")]
    OnlinePayment,
}

impl OrderPaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderPaymentMethod::CashOnDelivery => "Cash on Delivery",
            OrderPaymentMethod::OnlinePayment => "Online Payment",
        }
    }
}

impl FromStr for OrderPaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash on Delivery" => Ok(OrderPaymentMethod::CashOnDelivery),
            "Online Payment" => Ok(OrderPaymentMethod::OnlinePayment),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrderPaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized product snapshot embedded in an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub image: String,
}

/// Shipping address value object. All seven fields are required at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
}

impl ShippingAddress {
    /// Field name / value pairs, for the validation gate
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("fullName", &self.full_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
            ("country", &self.country),
        ]
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Human-facing unique number, immutable once set
    pub order_number: String,
    /// Opaque account reference, not existence-checked here
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: OrderPaymentMethod,
    /// Weak reference to a Payment (online payment flow)
    pub payment_id: Option<String>,
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    /// Creation timestamp (Unix millis), immutable
    pub order_date: i64,
    pub delivery_date: Option<i64>,
    pub notes: Option<String>,
}

// =============================================================================
// API Request Types
// =============================================================================

/// Create order payload
///
/// Enum-valued fields arrive as strings and are parsed by the validation
/// gate, so an out-of-set value fails with a 400 naming the field instead of
/// a serde rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_id: Option<String>,
    pub subtotal: Option<f64>,
    #[serde(default)]
    pub shipping_cost: f64,
    pub total_amount: Option<f64>,
    pub payment_status: Option<String>,
    pub order_status: Option<String>,
    pub notes: Option<String>,
}

/// Status update payload. Whichever fields are present get applied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub order_status: Option<String>,
    pub payment_status: Option<String>,
}

// =============================================================================
// API Response Types
// =============================================================================

/// Order with its payment cross-reference resolved
#[derive(Debug, Serialize)]
pub struct OrderWithPayment {
    #[serde(flatten)]
    pub order: Order,
    pub payment: Option<Payment>,
}

/// Admin listing row: userId resolved to a display projection
#[derive(Debug, Serialize)]
pub struct AdminOrder {
    #[serde(flatten)]
    pub order: Order,
    pub user: Option<UserSummary>,
    pub payment: Option<Payment>,
}
