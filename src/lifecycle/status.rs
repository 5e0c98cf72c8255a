//! Status state machines
//!
//! A single transition table drives both the generic status update and the
//! dedicated cancel operation, so terminal states are terminal on every path.
//!
//! Order status graph:
//!
//! ```text
//! Processing ──► Confirmed ──► Shipped ──► Delivered
//!     │              │            │
//!     └──────────────┴────────────X──► Cancelled
//! ```
//!
//! Forward skips are allowed (an admin can mark a Processing order Delivered);
//! backward moves are not. A same-state update is accepted as a no-op.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// OrderStatus
// =============================================================================

/// Fulfilment status of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Processing,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Allowed target set per current state
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        if self == target {
            return true;
        }
        matches!(
            (self, target),
            (Processing, Confirmed | Shipped | Delivered | Cancelled)
                | (Confirmed, Shipped | Delivered | Cancelled)
                | (Shipped, Delivered)
        )
    }

    /// Cancellation is a transition to `Cancelled` like any other
    pub fn can_cancel(self) -> bool {
        self.can_transition_to(OrderStatus::Cancelled)
    }

    /// No outgoing transitions (other than the same-state no-op)
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(OrderStatus::Processing),
            "Confirmed" => Ok(OrderStatus::Confirmed),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Processing
    }
}

// =============================================================================
// PaymentStatus (on the order)
// =============================================================================

/// Payment status as seen from the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn can_transition_to(self, target: PaymentStatus) -> bool {
        use PaymentStatus::*;
        if self == target {
            return true;
        }
        matches!(
            (self, target),
            (Pending, Paid | Failed) | (Failed, Pending | Paid) | (Paid, Refunded)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PaymentStatus::Pending),
            "Paid" => Ok(PaymentStatus::Paid),
            "Failed" => Ok(PaymentStatus::Failed),
            "Refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

// =============================================================================
// TransactionStatus (on the payment)
// =============================================================================

/// Processing status of a payment transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl TransactionStatus {
    pub fn can_transition_to(self, target: TransactionStatus) -> bool {
        use TransactionStatus::*;
        if self == target {
            return true;
        }
        matches!(
            (self, target),
            (Pending, Completed | Failed) | (Failed, Pending | Completed) | (Completed, Refunded)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Refunded => "Refunded",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(TransactionStatus::Pending),
            "Completed" => Ok(TransactionStatus::Completed),
            "Failed" => Ok(TransactionStatus::Failed),
            "Refunded" => Ok(TransactionStatus::Refunded),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Pending
    }
}

// =============================================================================
// Tests
// =============================================================================
