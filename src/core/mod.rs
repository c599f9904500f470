// src/core/mod.rs
//! Outbound service plumbing

pub mod service_client;

pub use service_client::AtsServiceClient;
