pub mod card;
pub mod confirm;
pub mod hints;
pub mod money;
pub mod panel;
pub mod toast;
