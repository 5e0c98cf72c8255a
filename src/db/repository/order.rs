//! Order Repository
//!
//! Creation runs through the checkout validation gate, the payment-linkage
//! check, and the unique order-number index, in that sequence; a rejected
//! request never leaves a partial write behind. Status changes go through the
//! lifecycle transition table on every path, cancel included.

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{
    BaseRepository, PaymentRepository, RepoError, RepoResult, UserRepository,
    is_unique_violation, record_id,
};
use crate::db::models::{
    AdminOrder, Order, OrderCreate, OrderStatusUpdate, OrderWithPayment, Payment, UserSummary,
};
use crate::lifecycle::{OrderStatus, PaymentStatus, checkout, money};

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an order.
    ///
    /// For online payments the caller must have created the Payment first;
    /// its amount has to match the order total and it must not already be
    /// linked. After the write the payment's `orderId` is back-filled
    /// best-effort; a failure leaves the payment visible in the orphan
    /// listing instead of being silently corrected.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let order = checkout::build_order(data)?;

        let payments = PaymentRepository::new(self.base.db().clone());
        if let Some(payment_id) = &order.payment_id {
            let payment = payments
                .find_by_id(payment_id)
                .await?
                .ok_or_else(|| RepoError::Validation(format!("Payment {payment_id} not found")))?;
            if payment.order_id.is_some() {
                return Err(RepoError::Validation(format!(
                    "Payment {payment_id} is already linked to an order"
                )));
            }
            if !money::amounts_equal(payment.amount, order.total_amount) {
                return Err(RepoError::Validation(
                    "Payment amount does not match order totalAmount".to_string(),
                ));
            }
        }

        let order_number = order.order_number.clone();
        let created: Option<Order> = match self.base.db().create(TABLE).content(order).await {
            Ok(created) => created,
            Err(e) if is_unique_violation(&e) => {
                return Err(RepoError::Duplicate(format!(
                    "Order number {order_number} already exists"
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))?;

        if let (Some(payment_id), Some(id)) = (&created.payment_id, &created.id)
            && let Err(e) = payments.link_to_order(payment_id, &id.to_string()).await
        {
            tracing::warn!(
                payment_id = %payment_id,
                error = %e,
                "Failed to back-fill payment order link; payment stays in the orphan listing"
            );
        }

        Ok(created)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(order)
    }

    /// Find order by id with its payment resolved
    pub async fn find_by_id_with_payment(&self, id: &str) -> RepoResult<Option<OrderWithPayment>> {
        let Some(order) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let payment = self.resolve_payment(&order).await?;
        Ok(Some(OrderWithPayment { order, payment }))
    }

    /// All orders for a user, newest first, payments resolved
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<OrderWithPayment>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE userId = $user_id ORDER BY orderDate DESC")
            .bind(("user_id", user_id.to_string()))
            .await?
            .take(0)?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let payment = self.resolve_payment(&order).await?;
            result.push(OrderWithPayment { order, payment });
        }
        Ok(result)
    }

    /// All orders across all users, newest first (admin listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY orderDate DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Admin listing: every order with `userId` resolved to a display
    /// projection and the payment cross-link resolved. Weak references that
    /// do not resolve stay `None`.
    pub async fn find_all_admin(&self) -> RepoResult<Vec<AdminOrder>> {
        let orders = self.find_all().await?;
        let users = UserRepository::new(self.base.db().clone());

        let mut summaries: std::collections::HashMap<String, Option<UserSummary>> =
            std::collections::HashMap::new();
        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            if !summaries.contains_key(&order.user_id) {
                let summary = users
                    .find_by_id(&order.user_id)
                    .await?
                    .map(|u| UserSummary::from(&u));
                summaries.insert(order.user_id.clone(), summary);
            }
            let user = summaries.get(&order.user_id).cloned().flatten();
            let payment = self.resolve_payment(&order).await?;
            result.push(AdminOrder {
                order,
                user,
                payment,
            });
        }
        Ok(result)
    }

    /// Apply a status update. Whichever fields are present are validated
    /// against the transition tables before anything is written; a rejected
    /// transition leaves the order unmodified.
    pub async fn update_status(&self, id: &str, data: OrderStatusUpdate) -> RepoResult<Order> {
        let order = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

        let mut order_status: Option<OrderStatus> = None;
        if let Some(s) = &data.order_status {
            let target: OrderStatus = s
                .parse()
                .map_err(|_| RepoError::Validation(format!("Invalid orderStatus: '{s}'")))?;
            if !order.order_status.can_transition_to(target) {
                return Err(RepoError::InvalidTransition(format!(
                    "Cannot change order status from {} to {}",
                    order.order_status, target
                )));
            }
            order_status = Some(target);
        }

        let mut payment_status: Option<PaymentStatus> = None;
        if let Some(s) = &data.payment_status {
            let target: PaymentStatus = s
                .parse()
                .map_err(|_| RepoError::Validation(format!("Invalid paymentStatus: '{s}'")))?;
            if !order.payment_status.can_transition_to(target) {
                return Err(RepoError::InvalidTransition(format!(
                    "Cannot change payment status from {} to {}",
                    order.payment_status, target
                )));
            }
            payment_status = Some(target);
        }

        // 空更新：原样返回 (last-write-wins, 无版本字段)
        if order_status.is_none() && payment_status.is_none() {
            return Ok(order);
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct StatusMerge {
            #[serde(skip_serializing_if = "Option::is_none")]
            order_status: Option<OrderStatus>,
            #[serde(skip_serializing_if = "Option::is_none")]
            payment_status: Option<PaymentStatus>,
        }

        let merge = StatusMerge {
            order_status,
            payment_status,
        };

        let updated: Vec<Order> = self
            .base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", record_id(TABLE, id)))
            .bind(("data", merge))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Cancel an order: a guarded transition to `Cancelled`, driven by the
    /// same table as the generic update. Orders are never deleted.
    pub async fn cancel(&self, id: &str) -> RepoResult<Order> {
        let order = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

        if !order.order_status.can_cancel() {
            return Err(RepoError::InvalidTransition(
                "Cannot cancel order that has been shipped or delivered".to_string(),
            ));
        }

        let updated: Vec<Order> = self
            .base
            .db()
            .query("UPDATE $id SET orderStatus = $status")
            .bind(("id", record_id(TABLE, id)))
            .bind(("status", OrderStatus::Cancelled))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Weak reference: a payment id that no longer resolves is returned as
    /// `None`, not an error.
    async fn resolve_payment(&self, order: &Order) -> RepoResult<Option<Payment>> {
        let Some(payment_id) = &order.payment_id else {
            return Ok(None);
        };
        PaymentRepository::new(self.base.db().clone())
            .find_by_id(payment_id)
            .await
    }
}
