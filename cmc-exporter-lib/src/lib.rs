pub mod api;
pub mod collector;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;

#[cfg(test)]
mod test_server;
