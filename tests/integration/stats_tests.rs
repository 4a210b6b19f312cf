//! Statistics aggregation tests

use crate::common::{copy_ids, date, seed_catalog, setup};
use libris::models::{GroupDimension, StatRow};

fn row<'a>(rows: &'a [StatRow], key: &str) -> &'a StatRow {
    rows.iter()
        .find(|r| r.group_key == key)
        .unwrap_or_else(|| panic!("no group {:?} in {:?}", key, rows))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn overall_row_aggregates_per_copy() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    let rows = services.stats.overview_stats(None).await.unwrap();
    assert_eq!(rows.len(), 1);

    let overall = &rows[0];
    assert_eq!(overall.group_key, "overall");
    assert_eq!(overall.total_titles, 3);
    assert_eq!(overall.total_copies, 4);
    // valuation sums the title price once per copy: 2*9.5 + 12.0 + 5.25
    assert!(close(overall.total_value.unwrap(), 36.25));
    assert!(close(overall.avg_price.unwrap(), 36.25 / 4.0));
}

#[tokio::test]
async fn grouping_by_location_uses_section_names() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    let rows = services
        .stats
        .overview_stats(Some(GroupDimension::Location))
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);

    let fiction = row(&rows, "Fiction");
    assert_eq!(fiction.total_titles, 1);
    assert_eq!(fiction.total_copies, 2);
    assert!(close(fiction.total_value.unwrap(), 19.0));

    assert_eq!(row(&rows, "Science").total_copies, 1);
    assert_eq!(row(&rows, "Non-Fiction").total_copies, 1);
}

#[tokio::test]
async fn grouping_by_status_splits_borrowed_copies() {
    let (services, _repo) = setup().await;
    let books = seed_catalog(&services).await;
    let copy = copy_ids(&services, books[0]).await[0];
    services
        .circulation
        .borrow(copy, "alice", date("2024-01-01"))
        .await
        .unwrap();

    let rows = services
        .stats
        .overview_stats(Some(GroupDimension::Status))
        .await
        .unwrap();

    assert_eq!(row(&rows, "Borrowed").total_copies, 1);
    assert_eq!(row(&rows, "Available").total_copies, 3);
}

#[tokio::test]
async fn grouping_by_borrower_uses_open_records_only() {
    let (services, _repo) = setup().await;
    let books = seed_catalog(&services).await;
    let copies = copy_ids(&services, books[0]).await;
    services
        .circulation
        .borrow(copies[0], "alice", date("2024-01-01"))
        .await
        .unwrap();
    services
        .circulation
        .borrow(copies[1], "bob", date("2024-01-01"))
        .await
        .unwrap();
    services
        .circulation
        .return_copy(copies[1], date("2024-01-05"), false)
        .await
        .unwrap();

    let rows = services
        .stats
        .overview_stats(Some(GroupDimension::Borrower))
        .await
        .unwrap();

    assert_eq!(row(&rows, "alice").total_copies, 1);
    // bob's record is closed, so his copy is back under "(none)"
    assert_eq!(row(&rows, "(none)").total_copies, 3);
    assert!(rows.iter().all(|r| r.group_key != "bob"));
}

#[tokio::test]
async fn grouping_by_year_and_buy_date_keys_are_textual() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    let rows = services
        .stats
        .overview_stats(Some(GroupDimension::Year))
        .await
        .unwrap();
    assert_eq!(row(&rows, "1965").total_copies, 2);
    assert_eq!(row(&rows, "1603").total_copies, 1);

    let rows = services
        .stats
        .overview_stats(Some(GroupDimension::BuyDate))
        .await
        .unwrap();
    assert_eq!(row(&rows, "2020-01-15").total_copies, 2);
    assert_eq!(row(&rows, "2021-03-12").total_copies, 1);
}

#[tokio::test]
async fn grouping_by_condition_splits_damaged_copies() {
    let (services, _repo) = setup().await;
    let books = seed_catalog(&services).await;
    let copy = copy_ids(&services, books[0]).await[0];
    services.circulation.set_damaged(copy).await.unwrap();

    let rows = services
        .stats
        .overview_stats(Some(GroupDimension::Condition))
        .await
        .unwrap();

    assert_eq!(row(&rows, "Damaged").total_copies, 1);
    assert_eq!(row(&rows, "Good").total_copies, 3);
}

#[tokio::test]
async fn statistics_all_batches_every_dimension() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    let all = services.stats.statistics_all().await.unwrap();

    let keys: Vec<&str> = all.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "overall",
            "location",
            "author",
            "year",
            "status",
            "condition",
            "borrower",
            "buy_date"
        ]
    );

    assert_eq!(all["overall"].len(), 1);
    assert_eq!(all["location"].len(), 3);
    assert_eq!(all["author"].len(), 3);
}

#[tokio::test]
async fn overall_row_exists_even_for_an_empty_inventory() {
    let (services, _repo) = setup().await;

    let rows = services.stats.overview_stats(None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_copies, 0);
    assert_eq!(rows[0].total_titles, 0);
    assert!(rows[0].avg_price.is_none());
}
