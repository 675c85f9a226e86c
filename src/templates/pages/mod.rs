pub mod calculator;
pub mod courses;
pub mod detail;
pub mod directory;
pub mod favorites;
pub mod form;
pub mod listings;
pub mod neighborhoods;
pub mod resources;
pub mod thank_you;

pub use calculator::{calculator_page, CalculatorVm};
pub use courses::{courses_page, CoursesVm};
pub use detail::{detail_page, DetailPageVm};
pub use directory::{directory_page, DirectoryVm};
pub use favorites::favorites_page;
pub use form::{form_page, FormPageVm};
pub use listings::{listings_page, ListingsPageVm};
pub use neighborhoods::{neighborhoods_page, NeighborhoodsVm};
pub use resources::{resources_page, service_page, ResourcesVm};
pub use thank_you::{thank_you_page, ThankYouVm};
