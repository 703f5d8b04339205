//! Integration tests for the analytics query semantics

use chrono::{Duration, NaiveDate, Utc};
use shop_analytics::analytics::AnalyticsService;
use shop_analytics::error::AppError;
use shop_analytics::test_utils::{
    seed_customer, seed_order, seed_order_item, seed_product, setup_test_db,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_birthdays_match_month_and_day_ignoring_year() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    let alice = seed_customer(conn, "Alice Martin", date(1990, 3, 15)).await;
    let bob = seed_customer(conn, "Bob Keller", date(1985, 3, 15)).await;
    seed_customer(conn, "Carol Singh", date(1990, 3, 16)).await;

    let matches = service
        .birthdays_on(Some(date(2024, 3, 15)))
        .await
        .unwrap();

    let mut ids: Vec<i32> = matches.iter().map(|c| c.id).collect();
    ids.sort();
    assert_eq!(ids, vec![alice.id, bob.id]);
    assert!(matches.iter().any(|c| c.full_name == "Alice Martin"));
}

#[tokio::test]
async fn test_birthdays_next_day_is_excluded() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    seed_customer(conn, "Alice Martin", date(1990, 3, 15)).await;

    let matches = service
        .birthdays_on(Some(date(2024, 3, 16)))
        .await
        .unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_leap_day_birthday_matches_feb_29_query() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    let leapling = seed_customer(conn, "Lea Plinger", date(1992, 2, 29)).await;
    seed_customer(conn, "Marta Feb", date(1990, 2, 28)).await;

    // 2024 is a leap year, so Feb 29 is a representable query date
    let matches = service
        .birthdays_on(Some(date(2024, 2, 29)))
        .await
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, leapling.id);
}

#[tokio::test]
async fn test_birthdays_empty_result_for_unmatched_date() {
    let db = setup_test_db().await;
    let service = AnalyticsService::new(db.connection().clone());

    let matches = service
        .birthdays_on(Some(date(2024, 7, 1)))
        .await
        .unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_recent_purchasers_only_inside_window() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    let now = Utc::now();
    let active = seed_customer(conn, "Active Buyer", date(1980, 1, 2)).await;
    let dormant = seed_customer(conn, "Dormant Buyer", date(1981, 2, 3)).await;

    seed_order(conn, active.id, "ORD-001", now - Duration::days(2)).await;
    seed_order(conn, dormant.id, "ORD-002", now - Duration::days(30)).await;

    let recent = service.recent_purchasers(7).await.unwrap();

    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, active.id);
    assert_eq!(recent[0].full_name, "Active Buyer");
}

#[tokio::test]
async fn test_recent_purchasers_last_purchase_is_max_of_qualifying_orders() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    let now = Utc::now();
    let customer = seed_customer(conn, "Repeat Buyer", date(1975, 6, 7)).await;

    let newest = now - Duration::days(1);
    seed_order(conn, customer.id, "ORD-010", now - Duration::days(4)).await;
    seed_order(conn, customer.id, "ORD-011", newest).await;
    // Outside the window, must not influence the result
    seed_order(conn, customer.id, "ORD-012", now - Duration::days(40)).await;

    let recent = service.recent_purchasers(7).await.unwrap();

    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, customer.id);
    let diff = (recent[0].last_purchase - newest).num_seconds().abs();
    assert!(diff <= 1, "lastPurchase should be the newest qualifying order");
}

#[tokio::test]
async fn test_recent_purchasers_one_entry_per_customer() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    let now = Utc::now();
    let a = seed_customer(conn, "Buyer A", date(1970, 1, 1)).await;
    let b = seed_customer(conn, "Buyer B", date(1971, 1, 1)).await;

    seed_order(conn, a.id, "ORD-020", now - Duration::days(1)).await;
    seed_order(conn, a.id, "ORD-021", now - Duration::days(2)).await;
    seed_order(conn, b.id, "ORD-022", now - Duration::days(3)).await;

    let recent = service.recent_purchasers(10).await.unwrap();

    let mut ids: Vec<i32> = recent.iter().map(|r| r.id).collect();
    ids.sort();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[tokio::test]
async fn test_recent_purchasers_empty_when_no_orders_qualify() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    let customer = seed_customer(conn, "Old Buyer", date(1960, 5, 5)).await;
    seed_order(conn, customer.id, "ORD-030", Utc::now() - Duration::days(100)).await;

    let recent = service.recent_purchasers(7).await.unwrap();
    assert!(recent.is_empty());
}

#[tokio::test]
async fn test_category_demand_sums_quantities_per_category() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    let now = Utc::now();
    let customer = seed_customer(conn, "Reader", date(1988, 8, 8)).await;
    let book_a = seed_product(conn, "Novel", "Books", "ART-A").await;
    let book_b = seed_product(conn, "Atlas", "Books", "ART-B").await;
    let toy_d = seed_product(conn, "Puzzle", "Toys", "ART-D").await;

    let order1 = seed_order(conn, customer.id, "ORD-040", now - Duration::days(3)).await;
    let order2 = seed_order(conn, customer.id, "ORD-041", now - Duration::days(1)).await;

    seed_order_item(conn, order1.id, book_a.id, 3).await;
    seed_order_item(conn, order2.id, book_b.id, 2).await;
    seed_order_item(conn, order2.id, toy_d.id, 1).await;

    let mut demand = service.category_demand(customer.id).await.unwrap();
    demand.sort_by(|a, b| a.category.cmp(&b.category));

    assert_eq!(demand.len(), 2);
    assert_eq!(demand[0].category, "Books");
    assert_eq!(demand[0].total_quantity, 5);
    assert_eq!(demand[1].category, "Toys");
    assert_eq!(demand[1].total_quantity, 1);
}

#[tokio::test]
async fn test_category_demand_excludes_other_customers() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    let now = Utc::now();
    let customer = seed_customer(conn, "Reader", date(1988, 8, 8)).await;
    let other = seed_customer(conn, "Other", date(1989, 9, 9)).await;
    let book = seed_product(conn, "Novel", "Books", "ART-A").await;
    let toy = seed_product(conn, "Puzzle", "Toys", "ART-D").await;

    let own_order = seed_order(conn, customer.id, "ORD-050", now).await;
    let other_order = seed_order(conn, other.id, "ORD-051", now).await;

    seed_order_item(conn, own_order.id, book.id, 2).await;
    seed_order_item(conn, other_order.id, toy.id, 7).await;

    let demand = service.category_demand(customer.id).await.unwrap();

    assert_eq!(demand.len(), 1);
    assert_eq!(demand[0].category, "Books");
    assert_eq!(demand[0].total_quantity, 2);
}

#[tokio::test]
async fn test_category_demand_empty_for_customer_without_orders() {
    let db = setup_test_db().await;
    let conn = db.connection();
    let service = AnalyticsService::new(conn.clone());

    let customer = seed_customer(conn, "Window Shopper", date(1995, 4, 4)).await;

    let demand = service.category_demand(customer.id).await.unwrap();
    assert!(demand.is_empty());
}

#[tokio::test]
async fn test_category_demand_unknown_customer_is_not_found() {
    let db = setup_test_db().await;
    let service = AnalyticsService::new(db.connection().clone());

    let err = service.category_demand(12345).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
