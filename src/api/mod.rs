/// HTTP client for the external recoloring backend.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{Backdrop, ImageResponse};

/// Address the original backend binds when run locally.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Base API URL, injected at build time via `ROOM_PAINTER_API_URL`.
pub fn base_url() -> String {
    option_env!("ROOM_PAINTER_API_URL")
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_has_no_trailing_slash() {
        assert!(!base_url().ends_with('/'));
        assert!(base_url().starts_with("http"));
    }
}
