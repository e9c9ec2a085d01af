pub mod fixture;
pub mod provider;

pub use fixture::StaticProvider;
pub use provider::*;
