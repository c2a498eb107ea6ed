//! Cross-module tests for the backend client.

mod http_roundtrip;
