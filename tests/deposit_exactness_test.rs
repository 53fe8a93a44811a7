use rand::Rng;
use rentledger::domain::account::{AccountId, CallContext};
use rentledger::domain::money::{BASE_UNIT, Yocto};
use rentledger::error::RentalError;

mod common;
use common::near;

#[tokio::test]
async fn test_only_the_exact_deposit_rents_the_car() {
    let mut rng = rand::thread_rng();

    for price in [2u32, 3, 17, 250] {
        let (engine, settlement) = common::engine();
        common::register_owner(&engine, "alice.near", price).await;
        common::register_user(&engine, "bob.near").await;
        let alice = AccountId::from("alice.near");
        let exact = near(u128::from(price));

        for _ in 0..50 {
            let deposit = match rng.gen_range(0..3) {
                // Off by a few yocto.
                0 => Yocto(exact.value() - rng.gen_range(1..=1_000)),
                1 => Yocto(exact.value() + rng.gen_range(1..=1_000)),
                // Anywhere up to twice the price.
                _ => Yocto(rng.gen_range(0..=2 * exact.value())),
            };
            if deposit == exact {
                continue;
            }

            let result = engine
                .rent(&CallContext::new("bob.near", deposit), &alice)
                .await;
            assert!(
                matches!(result, Err(RentalError::ValidationError(_))),
                "deposit {deposit} for price {price} was not rejected"
            );
        }

        assert!(settlement.transfers().await.is_empty());
        assert!(engine.get_owner(&alice).await.unwrap().unwrap().available);
        assert!(
            !engine
                .get_user(&AccountId::from("bob.near"))
                .await
                .unwrap()
                .unwrap()
                .has_rented
        );

        engine
            .rent(&CallContext::new("bob.near", exact), &alice)
            .await
            .unwrap();
        assert_eq!(settlement.received_by(&alice).await, exact);
    }
}

#[tokio::test]
async fn test_whole_price_units_are_not_raw_yocto() {
    let (engine, settlement) = common::engine();
    common::register_owner(&engine, "alice.near", 2).await;
    common::register_user(&engine, "bob.near").await;
    let alice = AccountId::from("alice.near");

    // A deposit equal to the stored multiplier, not scaled by the base unit.
    let result = engine
        .rent(&CallContext::new("bob.near", Yocto(2)), &alice)
        .await;
    assert!(matches!(result, Err(RentalError::ValidationError(_))));

    engine
        .rent(&CallContext::new("bob.near", Yocto(2 * BASE_UNIT.value())), &alice)
        .await
        .unwrap();
    assert_eq!(settlement.transfers().await.len(), 1);
}
