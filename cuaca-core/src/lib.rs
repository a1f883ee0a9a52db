//! Core library for the `cuaca` forecast proxy.
//!
//! This crate defines:
//! - Normalization of BMKG forecast payloads into a strict model
//! - The outward JSON response shape
//! - Static administrative region tables
//! - The upstream provider and configuration handling
//!
//! It is used by `cuaca-server`, but the normalization pipeline has no I/O and
//! can be reused on its own.

pub mod config;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod region;
pub mod response;
pub mod timestamp;
pub mod vocab;

pub use config::{Config, ServerConfig, UpstreamConfig};
pub use model::{Cuaca, ListCuaca, Lokasi};
pub use provider::{ProviderError, WeatherProvider};
pub use region::RegionDirectory;
pub use response::{ForecastResponse, assemble, assemble_from_upstream};
pub use timestamp::Timestamp;
