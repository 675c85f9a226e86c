pub mod finance;
pub mod forms;
pub mod listing;
pub mod query;
pub mod submission;
pub mod validation;

pub use listing::Listing;
pub use query::{Criteria, Direction, SortKey, SortOption};
