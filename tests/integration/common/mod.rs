//! Shared test fixtures: an in-memory database with sections and users.

use chrono::NaiveDate;
use libris::repository::Repository;
use libris::services::Services;
use sqlx::sqlite::SqlitePoolOptions;

/// Fresh in-memory database with migrations applied, three sections and two
/// users (`admin` is an administrator, `alice` is not).
pub async fn setup() -> (Services, Repository) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect to in-memory database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("run migrations");

    let repository = Repository::new(pool);

    repository.sections.upsert(1, "Fiction").await.unwrap();
    repository.sections.upsert(2, "Non-Fiction").await.unwrap();
    repository.sections.upsert(3, "Science").await.unwrap();
    repository.users.upsert("admin", "admin", true).await.unwrap();
    repository.users.upsert("alice", "wonder", false).await.unwrap();

    (Services::new(repository.clone()), repository)
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date literal")
}

/// Three titles across the three sections: Dune has two copies, the others
/// one each. Returns the book ids in insertion order.
pub async fn seed_catalog(services: &Services) -> Vec<i64> {
    let dune = services
        .catalog
        .add_book("Dune", "Frank Herbert", 1965, 9.5, date("2020-01-15"), 1)
        .await
        .unwrap();
    services
        .catalog
        .add_copies(dune, 1, date("2020-01-15"), 1)
        .await
        .unwrap();

    let cosmos = services
        .catalog
        .add_book("Cosmos", "Carl Sagan", 1980, 12.0, date("2021-03-12"), 3)
        .await
        .unwrap();

    let hamlet = services
        .catalog
        .add_book("Hamlet", "William Shakespeare", 1603, 5.25, date("2019-05-20"), 2)
        .await
        .unwrap();

    vec![dune, cosmos, hamlet]
}

/// Copy ids belonging to a book, in id order
pub async fn copy_ids(services: &Services, book_id: i64) -> Vec<i64> {
    let mut ids: Vec<i64> = services
        .catalog
        .list_book_boxes()
        .await
        .unwrap()
        .into_iter()
        .filter(|row| row.book_id == book_id)
        .map(|row| row.id)
        .collect();
    ids.sort_unstable();
    ids
}

/// Assert the book-level invariant 0 <= borrowed_count <= num_books
pub async fn assert_book_invariant(services: &Services) {
    for book in services.catalog.list_books().await.unwrap() {
        assert!(
            book.borrowed_count >= 0 && book.borrowed_count <= book.num_books,
            "invariant violated for book {}: borrowed_count={} num_books={}",
            book.book_id,
            book.borrowed_count,
            book.num_books
        );
    }
}
