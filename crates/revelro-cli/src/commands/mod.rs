//! Command implementations for revelro-cli

pub mod credentials;
pub mod health;
pub mod lookup;

pub use credentials::test_credentials;
pub use health::health;
pub use lookup::lookup;
