pub mod identity;
pub mod payment;
pub mod storage;

pub use identity::{IdentityStore, Role, User};
pub use payment::{CardDetails, PaymentAdapter, SimulatedGateway};
pub use storage::{MemoryStore, StateStore, StorageError};
