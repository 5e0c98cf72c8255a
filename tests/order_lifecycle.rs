//! 订单生命周期集成测试 - 内存数据库
//!
//! Covers creation invariants, numbering uniqueness, the transition table on
//! both the generic update path and the cancel path, and the unique-index
//! conflict surface.

use quickcart_server::DbService;
use quickcart_server::db::models::{OrderCreate, OrderItem, OrderStatusUpdate, ShippingAddress};
use quickcart_server::db::repository::{OrderRepository, RepoError, is_unique_violation};
use quickcart_server::lifecycle::{OrderStatus, PaymentStatus};

async fn setup() -> (DbService, OrderRepository) {
    let db = DbService::new_memory().await.expect("in-memory db");
    let orders = OrderRepository::new(db.db.clone());
    (db, orders)
}

fn grocery_items() -> Vec<OrderItem> {
    vec![OrderItem {
        product_id: "product:bananas".into(),
        name: "Organic Bananas".into(),
        price: 3.49,
        quantity: 2,
        image: "/images/bananas.jpg".into(),
    }]
}

fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Asha Rao".into(),
        phone: "555-0142".into(),
        address: "12 Elm Street".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        zip_code: "62704".into(),
        country: "USA".into(),
    }
}

fn cash_order(user_id: &str) -> OrderCreate {
    OrderCreate {
        user_id: user_id.into(),
        items: grocery_items(),
        shipping_address: Some(shipping_address()),
        payment_method: "Cash on Delivery".into(),
        payment_id: None,
        subtotal: Some(6.98),
        shipping_cost: 0.0,
        total_amount: Some(6.98),
        payment_status: None,
        order_status: None,
        notes: None,
    }
}

#[tokio::test]
async fn cash_order_gets_defaults_and_a_number() {
    let (_db, orders) = setup().await;

    let order = orders.create(cash_order("user:asha")).await.unwrap();
    assert_eq!(order.order_status, OrderStatus::Processing);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert!(order.order_number.starts_with("ORD"));
    assert!(order.id.is_some());
    assert_eq!(order.total_amount, 6.98);
}

#[tokio::test]
async fn order_numbers_are_unique_within_a_run() {
    let (_db, orders) = setup().await;

    let mut numbers = std::collections::HashSet::new();
    for _ in 0..5 {
        let order = orders.create(cash_order("user:asha")).await.unwrap();
        assert!(!order.order_number.is_empty());
        assert!(numbers.insert(order.order_number));
    }
}

#[tokio::test]
async fn empty_items_are_rejected_and_nothing_is_persisted() {
    let (_db, orders) = setup().await;

    let mut data = cash_order("user:nobody");
    data.items.clear();
    let err = orders.create(data).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // verify absence by subsequent query
    let listed = orders.find_by_user("user:nobody").await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn unbalanced_totals_are_rejected() {
    let (_db, orders) = setup().await;

    let mut data = cash_order("user:asha");
    data.total_amount = Some(9.99);
    let err = orders.create(data).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(msg) if msg.contains("totalAmount")));
}

#[tokio::test]
async fn cancel_succeeds_before_shipment() {
    let (_db, orders) = setup().await;

    for initial in ["Processing", "Confirmed"] {
        let mut data = cash_order("user:asha");
        data.order_status = Some(initial.into());
        let order = orders.create(data).await.unwrap();
        let id = order.id.unwrap().to_string();

        let cancelled = orders.cancel(&id).await.unwrap();
        assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    }
}

#[tokio::test]
async fn cancel_after_shipment_fails_and_leaves_the_order_alone() {
    let (_db, orders) = setup().await;

    let order = orders.create(cash_order("user:asha")).await.unwrap();
    let id = order.id.unwrap().to_string();

    let update = OrderStatusUpdate {
        order_status: Some("Shipped".into()),
        payment_status: None,
    };
    orders.update_status(&id, update).await.unwrap();

    let err = orders.cancel(&id).await.unwrap_err();
    assert!(matches!(err, RepoError::InvalidTransition(_)));

    let unchanged = orders.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(unchanged.order_status, OrderStatus::Shipped);
}

#[tokio::test]
async fn generic_update_respects_the_transition_table() {
    let (_db, orders) = setup().await;

    let order = orders.create(cash_order("user:asha")).await.unwrap();
    let id = order.id.unwrap().to_string();

    // forward along the chain
    for target in ["Confirmed", "Shipped", "Delivered"] {
        let updated = orders
            .update_status(
                &id,
                OrderStatusUpdate {
                    order_status: Some(target.into()),
                    payment_status: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.order_status.as_str(), target);
    }

    // Delivered is terminal, even through the generic update
    for target in ["Processing", "Confirmed", "Shipped", "Cancelled"] {
        let err = orders
            .update_status(
                &id,
                OrderStatusUpdate {
                    order_status: Some(target.into()),
                    payment_status: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidTransition(_)));
    }

    let unchanged = orders.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(unchanged.order_status, OrderStatus::Delivered);
}

#[tokio::test]
async fn cancelled_orders_cannot_be_revived() {
    let (_db, orders) = setup().await;

    let order = orders.create(cash_order("user:asha")).await.unwrap();
    let id = order.id.unwrap().to_string();
    orders.cancel(&id).await.unwrap();

    let err = orders
        .update_status(
            &id,
            OrderStatusUpdate {
                order_status: Some("Processing".into()),
                payment_status: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidTransition(_)));
}

#[tokio::test]
async fn out_of_set_status_in_update_is_a_validation_error() {
    let (_db, orders) = setup().await;

    let order = orders.create(cash_order("user:asha")).await.unwrap();
    let id = order.id.unwrap().to_string();

    let err = orders
        .update_status(
            &id,
            OrderStatusUpdate {
                order_status: Some("Teleported".into()),
                payment_status: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(msg) if msg.contains("orderStatus")));
}

#[tokio::test]
async fn payment_status_follows_its_own_table() {
    let (_db, orders) = setup().await;

    let order = orders.create(cash_order("user:asha")).await.unwrap();
    let id = order.id.unwrap().to_string();

    let updated = orders
        .update_status(
            &id,
            OrderStatusUpdate {
                order_status: None,
                payment_status: Some("Paid".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.payment_status, PaymentStatus::Paid);

    // Paid can only move to Refunded
    let err = orders
        .update_status(
            &id,
            OrderStatusUpdate {
                order_status: None,
                payment_status: Some("Pending".into()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidTransition(_)));
}

#[tokio::test]
async fn updating_an_unknown_order_is_not_found() {
    let (_db, orders) = setup().await;

    let err = orders
        .update_status(
            "order:doesnotexist",
            OrderStatusUpdate {
                order_status: Some("Confirmed".into()),
                payment_status: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn listings_come_back_newest_first() {
    let (_db, orders) = setup().await;

    for _ in 0..3 {
        orders.create(cash_order("user:asha")).await.unwrap();
        // distinct orderDate millis
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let listed = orders.find_by_user("user:asha").await.unwrap();
    assert_eq!(listed.len(), 3);
    let dates: Vec<i64> = listed.iter().map(|o| o.order.order_date).collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn orders_survive_on_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db = DbService::new(&tmp.path().join("quickcart.db"))
        .await
        .expect("on-disk db");
    let orders = OrderRepository::new(db.db.clone());

    let order = orders.create(cash_order("user:asha")).await.unwrap();
    let id = order.id.unwrap().to_string();

    let read_back = orders.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(read_back.order_number, order.order_number);
}

#[tokio::test]
async fn the_unique_index_turns_number_collisions_into_errors() {
    let (db, _orders) = setup().await;

    db.db
        .query("CREATE order:a SET orderNumber = 'ORD1700000000000123'")
        .await
        .unwrap()
        .check()
        .unwrap();

    let err = db
        .db
        .query("CREATE order:b SET orderNumber = 'ORD1700000000000123'")
        .await
        .unwrap()
        .check()
        .unwrap_err();
    assert!(is_unique_violation(&err));
}
