pub mod account;
pub mod driver;
pub mod memory;
pub mod trip;
pub mod truck;

pub use account::PostgresAccountRepository;
pub use driver::PostgresDriverRepository;
pub use memory::MemoryStore;
pub use trip::PostgresTripRepository;
pub use truck::PostgresTruckRepository;
