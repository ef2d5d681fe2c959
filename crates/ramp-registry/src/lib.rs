//! Static registries for the Split off-ramp.
//!
//! The (network, token) → contract/decimals table is the correctness-critical
//! mapping of the transfer path: a wrong entry misrepresents amounts by a
//! power of ten. Tables here are built at startup and covered pair-by-pair in
//! tests.

pub mod error;
pub mod factory;
pub mod profile;
pub mod tokens;

pub use error::{RegistryError, RegistryResult};
pub use factory::FactoryRegistry;
pub use profile::NetworkProfile;
pub use tokens::{TokenEntry, TokenRegistry, TransferRecord};
