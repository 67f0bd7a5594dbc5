pub mod auth;
pub mod connection;
pub mod favorites;
pub mod listings;
pub mod repository;

pub use connection::{apply_sql_file, init_db, Database};
pub use repository::ListingRepository;
