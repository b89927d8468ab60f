pub mod account;
pub mod errors;
pub mod fleet;
pub mod trip;
