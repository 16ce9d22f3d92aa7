// Adapters layer: concrete implementations for external systems (http transport, api gateway).

pub mod gateway;
pub mod http;
