mod auth_tests;
mod favorites_tests;
mod pages_tests;
mod search_tests;
