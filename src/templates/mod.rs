pub mod components;
pub mod layouts;
pub mod pages;

pub use layouts::site::site_layout;
