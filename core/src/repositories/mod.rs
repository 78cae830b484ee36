pub mod revocation;

pub use revocation::{InMemoryRevocationOracle, RevocationOracle};
