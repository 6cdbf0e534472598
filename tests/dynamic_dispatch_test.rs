use payorder::domain::order::{Amount, PaymentOrder};
use payorder::domain::ports::OrderStoreBox;
use payorder::infrastructure::in_memory::InMemoryOrderStore;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_store_as_trait_object() {
    let store: OrderStoreBox = Box::new(InMemoryOrderStore::new());
    let order = PaymentOrder::new("u1", Amount::new(dec!(100.0)).unwrap());
    let order_id = order.id.clone();

    // Verify Send + Sync by spawning a task
    let handle = tokio::spawn(async move {
        store.put(order).await.unwrap();
        store.get(&order_id).await.unwrap()
    });

    let retrieved = handle.await.unwrap();
    assert_eq!(retrieved.user_id, "u1");
    assert_eq!(retrieved.amount.value(), dec!(100.0));
}

#[tokio::test]
async fn test_cloned_store_shares_state() {
    let store = InMemoryOrderStore::new();
    let boxed: OrderStoreBox = Box::new(store.clone());

    let order = PaymentOrder::new("u1", Amount::new(dec!(1.0)).unwrap());
    boxed.put(order.clone()).await.unwrap();

    let other: OrderStoreBox = Box::new(store);
    assert_eq!(other.get(&order.id).await.unwrap(), order);
}
