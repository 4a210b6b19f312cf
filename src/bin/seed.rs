//! Initialize the library database and load the reference data set.
//!
//! Runs the embedded migrations, then inserts the shelving sections, an
//! administrator account and a small starting catalog. Safe to re-run: the
//! section and user inserts upsert, the catalog is only seeded into an
//! empty inventory.

use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris::{config::AppConfig, repository::Repository, services::Services};

struct SeedBook {
    title: &'static str,
    author: &'static str,
    year: i64,
    price: f64,
    buy_date: &'static str,
    location: i64,
    copies: i64,
}

const SEED_BOOKS: [SeedBook; 5] = [
    SeedBook {
        title: "The Great Gatsby",
        author: "F. Scott Fitzgerald",
        year: 1925,
        price: 10.99,
        buy_date: "2020-01-15",
        location: 1,
        copies: 2,
    },
    SeedBook {
        title: "1984",
        author: "George Orwell",
        year: 1949,
        price: 8.99,
        buy_date: "2019-05-20",
        location: 1,
        copies: 3,
    },
    SeedBook {
        title: "The Catcher in the Rye",
        author: "J.D. Salinger",
        year: 1951,
        price: 9.99,
        buy_date: "2022-09-10",
        location: 2,
        copies: 2,
    },
    SeedBook {
        title: "A Brief History of Time",
        author: "Stephen Hawking",
        year: 1988,
        price: 15.99,
        buy_date: "2021-03-12",
        location: 3,
        copies: 6,
    },
    SeedBook {
        title: "The Selfish Gene",
        author: "Richard Dawkins",
        year: 1976,
        price: 12.99,
        buy_date: "2017-11-25",
        location: 3,
        copies: 1,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris={}", config.logging.level).into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Seeding Libris database at {}", config.database.url);

    let pool = libris::connect(&config.database).await?;
    let repository = Repository::new(pool);
    let services = Services::new(repository.clone());

    repository.sections.upsert(1, "Fiction").await?;
    repository.sections.upsert(2, "Non-Fiction").await?;
    repository.sections.upsert(3, "Science").await?;
    repository.users.upsert("admin", "admin", true).await?;

    if !services.catalog.list_books().await?.is_empty() {
        tracing::info!("Inventory already populated, skipping catalog seed");
        return Ok(());
    }

    for book in SEED_BOOKS {
        let buy_date: NaiveDate = book.buy_date.parse()?;
        let book_id = services
            .catalog
            .add_book(
                book.title,
                book.author,
                book.year,
                book.price,
                buy_date,
                book.location,
            )
            .await?;
        if book.copies > 1 {
            services
                .catalog
                .add_copies(book_id, book.copies - 1, buy_date, book.location)
                .await?;
        }
    }

    tracing::info!(titles = SEED_BOOKS.len(), "Catalog seeded");

    Ok(())
}
