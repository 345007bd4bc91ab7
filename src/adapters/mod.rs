// Adapters layer: concrete implementations of the domain ports.

pub mod csv_table;
pub mod http;
