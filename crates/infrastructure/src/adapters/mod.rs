//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod metno_adapter;

pub use metno_adapter::MetNoForecastAdapter;
