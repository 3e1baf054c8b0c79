#[cfg(test)]
#[macro_use]
mod test_support;

pub mod aggregate;
pub mod api;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod sample;
pub mod store;
pub mod utils;
