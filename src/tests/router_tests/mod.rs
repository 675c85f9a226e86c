mod api_tests;
mod content_tests;
mod detail_tests;
mod favorites_tests;
mod forms_tests;
mod listings_tests;
mod thank_you_tests;
