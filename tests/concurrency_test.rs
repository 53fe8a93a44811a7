use rentledger::domain::account::{AccountId, CallContext};
use rentledger::error::RentalError;
use std::sync::Arc;

mod common;
use common::near;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rents_admit_a_single_renter() {
    let (engine, settlement) = common::engine();
    common::register_owner(&engine, "alice.near", 3).await;
    for i in 0..32 {
        common::register_user(&engine, &format!("user{i}.near")).await;
    }
    let engine = Arc::new(engine);

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine
                    .rent(
                        &CallContext::new(format!("user{i}.near"), near(3)),
                        &AccountId::from("alice.near"),
                    )
                    .await
            })
        })
        .collect();

    let mut rented = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => rented += 1,
            Err(RentalError::UnavailableError(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(rented, 1);
    assert_eq!(settlement.transfers().await.len(), 1);

    let renting: Vec<_> = engine
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .filter(|u| u.has_rented)
        .collect();
    assert_eq!(renting.len(), 1);
}

#[tokio::test]
async fn test_engine_is_shareable_across_tasks() {
    let (engine, _) = common::engine();
    let engine = Arc::new(engine);

    let handles: Vec<_> = ["alice.near", "carol.near", "erin.near"]
        .into_iter()
        .map(|account| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { common::register_owner(&engine, account, 2).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(engine.list_owners().await.unwrap().len(), 3);
}
