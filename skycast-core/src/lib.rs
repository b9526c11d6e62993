//! Core library for the `skycast` weather lookup client.
//!
//! This crate defines:
//! - Configuration for the backend endpoint
//! - The HTTP client for the weather lookup API
//! - Query normalization and temperature display formatting
//! - The interactive session state machine
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod model;
pub mod session;
pub mod units;

pub use client::{ApiClient, ApiError, WeatherBackend};
pub use config::Config;
pub use model::{Query, QueryMode, WeatherReport};
pub use session::{RequestState, Session, Submission};
pub use units::{Unit, format_temperature};
