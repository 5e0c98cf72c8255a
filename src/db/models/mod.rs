//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod user;

// Catalog
pub mod product;

// Contact
pub mod contact;

// Order/Payment lifecycle
pub mod order;
pub mod payment;

// Re-exports
pub use contact::{ContactCreate, ContactMessage};
pub use order::{
    AdminOrder, Order, OrderCreate, OrderItem, OrderPaymentMethod, OrderStatusUpdate,
    OrderWithPayment, ShippingAddress,
};
pub use payment::{
    AdminPayment, Payment, PaymentCreate, PaymentMethod, PaymentWithOrder,
    TransactionStatusUpdate,
};
pub use product::{Product, ProductCreate};
pub use user::{User, UserLogin, UserSignup, UserSummary};
