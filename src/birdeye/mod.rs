pub mod client;
pub mod types;

pub use client::{BirdeyeClient, BirdeyeError};
pub use types::{ApiPriceVolume, ApiTokenMetadata};
