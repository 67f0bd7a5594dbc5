pub mod check_email;
pub mod error;
pub mod favorites;
pub mod home;
pub mod login;
pub mod property;
pub mod search;

pub use check_email::{check_email_content, check_email_page};
pub use error::error_page;
pub use favorites::favorites_page;
pub use home::{home_page, HomeVm};
pub use login::login_page;
pub use property::property_page;
pub use search::search_page;
