//! Static lookup tables.

pub mod constants;
