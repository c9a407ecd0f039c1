//! Infrastructure layer.

pub mod database;
pub mod payment;

pub use self::database::Database;
#[cfg(feature = "in-memory")]
pub use self::database::InMemory;
pub use self::payment::Stripe;
