//! Query engine tests: filters, sort chain, allow-list boundary

use crate::common::{copy_ids, date, seed_catalog, setup};
use libris::models::BookQuery;

#[tokio::test]
async fn unfiltered_query_returns_every_copy_with_its_count() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    let (rows, total) = services
        .catalog
        .query_books(&BookQuery::default())
        .await
        .unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(total, rows.len());
}

#[tokio::test]
async fn equality_filters_match_exactly() {
    let (services, _repo) = setup().await;
    let books = seed_catalog(&services).await;

    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            title: Some("Dune".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.title == "Dune"));

    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            author: Some("Carl Sagan".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            book_id: Some(books[2]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Hamlet");

    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            location: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].section, "Science");
}

#[tokio::test]
async fn range_filters_are_inclusive() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    // year 1965..=1980 excludes Hamlet (1603)
    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            year_min: Some(1965),
            year_max: Some(1980),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.title != "Hamlet"));

    // price bounds land exactly on Dune's price
    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            price_min: Some(9.5),
            price_max: Some(9.5),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.title == "Dune"));
}

#[tokio::test]
async fn borrow_state_filters_are_tri_state() {
    let (services, _repo) = setup().await;
    let books = seed_catalog(&services).await;
    let copy = copy_ids(&services, books[0]).await[0];
    services
        .circulation
        .borrow(copy, "alice", date("2024-01-01"))
        .await
        .unwrap();

    let (out, _) = services
        .catalog
        .query_books(&BookQuery {
            borrowed: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].status, "Borrowed");
    assert_eq!(out[0].borrow_date, Some(date("2024-01-01")));

    let (shelved, _) = services
        .catalog
        .query_books(&BookQuery {
            borrowed: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(shelved.len(), 3);

    let (all, _) = services
        .catalog
        .query_books(&BookQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn borrower_filter_matches_open_records_only() {
    let (services, _repo) = setup().await;
    let books = seed_catalog(&services).await;
    let copy = copy_ids(&services, books[0]).await[0];
    services
        .circulation
        .borrow(copy, "alice", date("2024-01-01"))
        .await
        .unwrap();

    let by_alice = BookQuery {
        borrower: Some("alice".into()),
        ..Default::default()
    };
    let (rows, _) = services.catalog.query_books(&by_alice).await.unwrap();
    assert_eq!(rows.len(), 1);

    // once returned, the record is closed and the filter no longer matches
    services
        .circulation
        .return_copy(copy, date("2024-01-02"), false)
        .await
        .unwrap();
    let (rows, _) = services.catalog.query_books(&by_alice).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn damaged_filter_matches_condition_flag() {
    let (services, _repo) = setup().await;
    let books = seed_catalog(&services).await;
    let copy = copy_ids(&services, books[0]).await[0];
    services.circulation.set_damaged(copy).await.unwrap();

    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            damaged: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, copy);
    assert_eq!(rows[0].fine, "No(wait to throw away)");

    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            damaged: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.fine == "Yes"));
}

#[tokio::test]
async fn sort_levels_apply_left_to_right() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            sort_by_1: Some("year".into()),
            sort_order_1: Some("desc".into()),
            sort_by_2: Some("buy_date".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let years: Vec<i64> = rows.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![1980, 1965, 1965, 1603]);
}

#[tokio::test]
async fn sort_chain_gap_drops_all_sorting() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    // level 1 unset: level 2 must be ignored entirely
    let (sorted_gap, _) = services
        .catalog
        .query_books(&BookQuery {
            sort_by_2: Some("author".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let (unsorted, _) = services
        .catalog
        .query_books(&BookQuery::default())
        .await
        .unwrap();

    let gap_ids: Vec<i64> = sorted_gap.iter().map(|r| r.id).collect();
    let plain_ids: Vec<i64> = unsorted.iter().map(|r| r.id).collect();
    assert_eq!(gap_ids, plain_ids);
}

#[tokio::test]
async fn hostile_sort_field_is_ignored_not_interpolated() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    let (rows, total) = services
        .catalog
        .query_books(&BookQuery {
            sort_by_1: Some("'; DROP TABLE books;--".into()),
            sort_order_1: Some("'; DROP TABLE books;--".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(total, rows.len());
    assert_eq!(rows.len(), 4);

    // the table is still there
    assert_eq!(services.catalog.list_books().await.unwrap().len(), 3);
}

#[tokio::test]
async fn hostile_filter_values_are_bound_not_interpolated() {
    let (services, _repo) = setup().await;
    seed_catalog(&services).await;

    let (rows, _) = services
        .catalog
        .query_books(&BookQuery {
            title: Some("' OR '1'='1".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(rows.is_empty());
}
