//! Integration tests for the PostgreSQL NAV store
//!
//! These tests start a PostgreSQL container and need a Docker daemon:
//! `cargo test -p infra_db -- --ignored`

use rust_decimal_macros::dec;

use domain_fund::{NavQuery, NavStore};
use infra_db::PgNavStore;
use test_utils::{create_isolated_test_database, FundFixtures, NavFixtures};

#[tokio::test]
#[ignore = "requires docker"]
async fn test_latest_info_date_per_fund() {
    let db = create_isolated_test_database().await.unwrap();
    let store = PgNavStore::new(db.pool().clone());
    let code = FundFixtures::code();

    assert_eq!(store.latest_info_date(&code).await.unwrap(), None);

    for record in NavFixtures::quarter_2022() {
        assert!(store.insert_nav(&record).await.unwrap());
    }
    store
        .insert_nav(&NavFixtures::record(
            &FundFixtures::other_code(),
            NavFixtures::date(2023, 1, 1),
            dec!(2),
        ))
        .await
        .unwrap();

    assert_eq!(
        store.latest_info_date(&code).await.unwrap(),
        Some(NavFixtures::date(2022, 3, 1))
    );
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_insert_is_idempotent() {
    let db = create_isolated_test_database().await.unwrap();
    let store = PgNavStore::new(db.pool().clone());
    let record = NavFixtures::record(&FundFixtures::code(), NavFixtures::date(2022, 4, 11), dec!(1.234));

    assert!(store.insert_nav(&record).await.unwrap());
    assert!(!store.insert_nav(&record).await.unwrap());
    assert_eq!(store.count(&FundFixtures::code()).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_query_is_ascending_and_bounded() {
    let db = create_isolated_test_database().await.unwrap();
    let store = PgNavStore::new(db.pool().clone());
    let code = FundFixtures::code();

    let mut records = NavFixtures::daily(&code, NavFixtures::date(2022, 1, 1), 10);
    records.reverse();
    for record in &records {
        store.insert_nav(record).await.unwrap();
    }

    let all = store.query_nav(&NavQuery::new(code.clone())).await.unwrap();
    assert_eq!(all.len(), 10);
    assert!(all.windows(2).all(|w| w[0].info_date < w[1].info_date));
    assert!(all.iter().all(|r| r.id.is_some()));

    let window = store
        .query_nav(
            &NavQuery::new(code.clone())
                .since(Some(NavFixtures::date(2022, 1, 3)))
                .until(Some(NavFixtures::date(2022, 1, 5))),
        )
        .await
        .unwrap();
    let days: Vec<_> = window.iter().map(|r| r.info_date).collect();
    assert_eq!(
        days,
        vec![
            NavFixtures::date(2022, 1, 3),
            NavFixtures::date(2022, 1, 4),
            NavFixtures::date(2022, 1, 5)
        ]
    );
    assert_eq!(window[0].unit_worth, dec!(1.002));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_has_fund_data_and_ping() {
    let db = create_isolated_test_database().await.unwrap();
    let store = PgNavStore::new(db.pool().clone());

    store.ping().await.unwrap();
    assert!(!store.has_fund_data(&FundFixtures::code()).await.unwrap());

    for record in NavFixtures::holiday_gap() {
        store.insert_nav(&record).await.unwrap();
    }
    assert!(store.has_fund_data(&FundFixtures::code()).await.unwrap());
    assert!(!store.has_fund_data(&FundFixtures::other_code()).await.unwrap());
}
