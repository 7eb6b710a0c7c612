//! Helpers shared by integration tests.

pub mod ping_server;
