pub mod client;
pub mod error;
pub mod normalize;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use normalize::normalize_payload;
