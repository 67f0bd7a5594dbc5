pub mod email_cta;
pub mod filter_form;
pub mod property_card;

pub use email_cta::email_cta_form;
pub use filter_form::filter_form;
pub use property_card::{favorite_button, property_card, property_grid};
