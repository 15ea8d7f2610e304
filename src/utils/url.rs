//! URL utilities for consistent URL handling
//!
//! This module provides utilities for normalizing base URLs to prevent issues
//! with trailing slashes when constructing backend endpoints.

/// Normalize a base URL by removing trailing slashes
///
/// This ensures consistent URL construction when appending endpoints,
/// preventing double slashes in the final URLs.
///
/// # Examples
///
/// ```
/// use contextiq::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000///"), "http://localhost:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and endpoint path
///
/// This function normalizes the base URL and safely appends the endpoint,
/// ensuring there are no double slashes in the result.
///
/// # Examples
///
/// ```
/// use contextiq::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000", "chat"),
///     "http://localhost:8000/chat"
/// );
/// assert_eq!(
///     construct_api_url("http://localhost:8000/", "/discord/connected"),
///     "http://localhost:8000/discord/connected"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        // No trailing slash - should remain unchanged
        assert_eq!(
            normalize_base_url("http://localhost:8000"),
            "http://localhost:8000"
        );

        // Single trailing slash - should be removed
        assert_eq!(
            normalize_base_url("http://localhost:8000/"),
            "http://localhost:8000"
        );

        // Multiple trailing slashes - should all be removed
        assert_eq!(
            normalize_base_url("https://api.contextiq.dev///"),
            "https://api.contextiq.dev"
        );

        // Empty string
        assert_eq!(normalize_base_url(""), "");

        // Just slashes
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn test_construct_api_url() {
        // Normal case - no trailing slash on base URL
        assert_eq!(
            construct_api_url("http://localhost:8000", "health"),
            "http://localhost:8000/health"
        );

        // Base URL with trailing slash
        assert_eq!(
            construct_api_url("http://localhost:8000/", "chat"),
            "http://localhost:8000/chat"
        );

        // Endpoint with leading slash
        assert_eq!(
            construct_api_url("https://api.contextiq.dev", "/discord/login"),
            "https://api.contextiq.dev/discord/login"
        );

        // Both base URL with trailing slash and endpoint with leading slash
        assert_eq!(
            construct_api_url("https://api.contextiq.dev/", "/discord/connected"),
            "https://api.contextiq.dev/discord/connected"
        );

        // Multiple slashes on both sides
        assert_eq!(
            construct_api_url("http://localhost:8000///", "///health"),
            "http://localhost:8000/health"
        );
    }
}
