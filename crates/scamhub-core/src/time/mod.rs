//! Timestamp normalization between reporter-local wall time and stored instants

mod normalizer;

pub use normalizer::{
    parse_received_at, parse_timezone, resolve_local, to_absolute, to_display, Normalized,
};
