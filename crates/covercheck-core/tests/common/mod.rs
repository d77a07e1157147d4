//! Shared helpers for integration tests.
#![allow(dead_code)]

pub mod fake_transport;
pub mod image_server;
pub mod images;
pub mod silent_server;
