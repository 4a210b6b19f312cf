//! Repository layer for database operations

pub mod books;
pub mod circulation;
pub mod copies;
pub mod sections;
pub mod stats;
pub mod users;

use sqlx::{Pool, Sqlite};

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub books: books::BooksRepository,
    pub copies: copies::CopiesRepository,
    pub circulation: circulation::CirculationRepository,
    pub sections: sections::SectionsRepository,
    pub users: users::UsersRepository,
    pub stats: stats::StatsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            copies: copies::CopiesRepository::new(pool.clone()),
            circulation: circulation::CirculationRepository::new(pool.clone()),
            sections: sections::SectionsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            stats: stats::StatsRepository::new(pool.clone()),
            pool,
        }
    }
}
