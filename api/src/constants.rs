//! Application constants

/// Default bind host when HOST is unset
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port when PORT is unset
pub const DEFAULT_PORT: u16 = 8080;

/// Default Postgres pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Request body limit for tweet payloads (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;
