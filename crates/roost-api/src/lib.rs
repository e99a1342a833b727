// roost-api: Async Rust client for the apartment listing REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApartmentClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{ApartmentBody, ApartmentResponse, PriceSort};
