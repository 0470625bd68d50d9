//! Domain types.

pub mod identity;
mod recipient;
mod secret_set;

pub use identity::Identity;
pub use recipient::Recipient;
pub use secret_set::SecretSet;
