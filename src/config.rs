/// Default base URL of the Google Books volumes API.
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/books/v1";

/// Catalog access configuration, read once at process start and shared
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the volumes API, without a trailing slash.
    pub base_url: String,
    /// API key sent as the `key` query parameter. May be absent; every
    /// catalog operation then fails before touching the network.
    pub api_key: Option<String>,
}

impl CatalogConfig {
    /// Read `GOOGLE_BOOKS_API_KEY` and the optional `BOOKFINDER_API_URL`
    /// override from the environment. A set-but-blank variable counts as
    /// absent.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GOOGLE_BOOKS_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let base_url = std::env::var("BOOKFINDER_API_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if api_key.is_none() {
            tracing::warn!("GOOGLE_BOOKS_API_KEY is not set; catalog calls will fail");
        }

        Self { base_url, api_key }
    }

    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, api_key }
    }
}
