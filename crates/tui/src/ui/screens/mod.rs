pub mod balances;
pub mod expenses;
pub mod form;
pub mod overview;
pub mod settlements;
