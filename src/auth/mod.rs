pub mod magic;
pub mod sessions;
pub mod token;

pub use sessions::Session;
