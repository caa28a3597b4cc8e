//! Shared helpers for integration tests across the workspace

mod server;

pub use server::TestServer;
