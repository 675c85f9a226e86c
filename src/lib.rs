pub mod config;
pub mod content;
pub mod domain;
pub mod errors;
pub mod loader;
pub mod paths;
pub mod responses;
pub mod router;
pub mod state;
pub mod storage;
pub mod templates;
pub mod ui;
pub mod weather;

#[cfg(test)]
mod tests;
