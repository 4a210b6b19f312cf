//! Domain models

pub mod book;
pub mod copy;
pub mod outcome;
pub mod query;
pub mod record;
pub mod section;
pub mod stats;
pub mod user;

pub use book::{AddedCopies, Book};
pub use copy::CopyRow;
pub use outcome::{BorrowOutcome, DamageOutcome, DiscardedCopy, ReturnOutcome};
pub use query::{BookQuery, SortField, SortOrder};
pub use record::BorrowRecordRow;
pub use section::Section;
pub use stats::{GroupDimension, StatRow};
pub use user::User;
