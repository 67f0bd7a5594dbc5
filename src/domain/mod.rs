pub mod catalog;
pub mod favorites;
pub mod filter;
pub mod images;
pub mod listing;
