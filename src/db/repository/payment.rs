//! Payment Repository
//!
//! transactionId UNIQUE 索引保证编号唯一；冲突以 409 暴露。
//! `orderId` 为 NONE 的记录是两步 checkout 留下的孤儿，单独可查。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{
    BaseRepository, RepoError, RepoResult, UserRepository, is_unique_violation, record_id,
};
use crate::db::models::{
    AdminPayment, Order, Payment, PaymentCreate, PaymentWithOrder, TransactionStatusUpdate,
    UserSummary,
};
use crate::lifecycle::{TransactionStatus, checkout};

const TABLE: &str = "payment";
const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a payment. The transaction id is generated immediately before
    /// the write; the unique index turns a same-millisecond collision into a
    /// conflict instead of an overwrite.
    pub async fn create(&self, data: PaymentCreate) -> RepoResult<Payment> {
        let payment = checkout::build_payment(data)?;

        let transaction_id = payment.transaction_id.clone();
        let created: Option<Payment> = match self.base.db().create(TABLE).content(payment).await {
            Ok(created) => created,
            Err(e) if is_unique_violation(&e) => {
                return Err(RepoError::Duplicate(format!(
                    "Transaction id {transaction_id} already exists"
                )));
            }
            Err(e) => return Err(e.into()),
        };

        created.ok_or_else(|| RepoError::Database("Failed to create payment".to_string()))
    }

    /// Find payment by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>> {
        let payment: Option<Payment> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(payment)
    }

    /// Find payment by id with its order resolved
    pub async fn find_by_id_with_order(&self, id: &str) -> RepoResult<Option<PaymentWithOrder>> {
        let Some(payment) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let order = self.resolve_order(&payment).await?;
        Ok(Some(PaymentWithOrder { payment, order }))
    }

    /// All payments for a user, newest first, orders resolved
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<PaymentWithOrder>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE userId = $user_id ORDER BY paymentDate DESC")
            .bind(("user_id", user_id.to_string()))
            .await?
            .take(0)?;

        let mut result = Vec::with_capacity(payments.len());
        for payment in payments {
            let order = self.resolve_order(&payment).await?;
            result.push(PaymentWithOrder { payment, order });
        }
        Ok(result)
    }

    /// All payments across all users, newest first (admin listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payment ORDER BY paymentDate DESC")
            .await?
            .take(0)?;
        Ok(payments)
    }

    /// Admin listing: every payment with `userId` resolved to a display
    /// projection and the order cross-link resolved.
    pub async fn find_all_admin(&self) -> RepoResult<Vec<AdminPayment>> {
        let payments = self.find_all().await?;
        let users = UserRepository::new(self.base.db().clone());

        let mut summaries: std::collections::HashMap<String, Option<UserSummary>> =
            std::collections::HashMap::new();
        let mut result = Vec::with_capacity(payments.len());
        for payment in payments {
            if !summaries.contains_key(&payment.user_id) {
                let summary = users
                    .find_by_id(&payment.user_id)
                    .await?
                    .map(|u| UserSummary::from(&u));
                summaries.insert(payment.user_id.clone(), summary);
            }
            let user = summaries.get(&payment.user_id).cloned().flatten();
            let order = self.resolve_order(&payment).await?;
            result.push(AdminPayment {
                payment,
                user,
                order,
            });
        }
        Ok(result)
    }

    /// Payments with no linked order: the visible residue of a checkout that
    /// stopped after step one. Reconciliation view, admin only.
    pub async fn find_orphaned(&self) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query(
                "SELECT * FROM payment WHERE orderId = NONE OR orderId = NULL ORDER BY paymentDate DESC",
            )
            .await?
            .take(0)?;
        Ok(payments)
    }

    /// Update the transaction status through the transition table.
    pub async fn update_status(
        &self,
        id: &str,
        data: TransactionStatusUpdate,
    ) -> RepoResult<Payment> {
        let payment = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Payment {id} not found")))?;

        let Some(s) = &data.transaction_status else {
            return Err(RepoError::Validation(
                "transactionStatus is required".to_string(),
            ));
        };
        let target: TransactionStatus = s
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid transactionStatus: '{s}'")))?;
        if !payment.transaction_status.can_transition_to(target) {
            return Err(RepoError::InvalidTransition(format!(
                "Cannot change transaction status from {} to {}",
                payment.transaction_status, target
            )));
        }

        let updated: Vec<Payment> = self
            .base
            .db()
            .query("UPDATE $id SET transactionStatus = $status")
            .bind(("id", record_id(TABLE, id)))
            .bind(("status", target))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Payment {id} not found")))
    }

    /// Back-fill the order reference after the order write succeeded.
    pub async fn link_to_order(&self, payment_id: &str, order_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $id SET orderId = $order_id")
            .bind(("id", record_id(TABLE, payment_id)))
            .bind(("order_id", order_id.to_string()))
            .await?
            .check()
            .map_err(RepoError::from)?;
        Ok(())
    }

    /// Weak reference: an order id that no longer resolves is returned as
    /// `None`, not an error.
    async fn resolve_order(&self, payment: &Payment) -> RepoResult<Option<Order>> {
        let Some(order_id) = &payment.order_id else {
            return Ok(None);
        };
        let order: Option<Order> = self
            .base
            .db()
            .select(record_id(ORDER_TABLE, order_id))
            .await?;
        Ok(order)
    }
}
