mod alternative;
mod loader;
mod loader_error;

pub use alternative::synthesize_listings;
pub use loader::{
    extract_listings, fallback_listings, DataSource, ListingLoader, LoadedListings, LoaderSettings,
};
pub use loader_error::LoaderError;
