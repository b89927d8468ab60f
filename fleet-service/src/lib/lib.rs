pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::account;
pub use domain::fleet;
pub use domain::trip;
pub use outbound::repositories;
