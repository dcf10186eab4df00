/// Local development backend.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:8080/api";
/// Same-origin fallback when nothing else matches.
pub const RELATIVE_API_BASE_URL: &str = "/api";

const HOSTING_DOMAIN_MARKER: &str = "onrender.com";

/// Picks the backend base URL for the host the front end is served from.
///
/// Order: explicit override, `localhost`, hosted deployment (the `frontend`
/// fragment of the host name becomes `backend`), then the relative `/api`.
pub fn resolve_api_base_url(override_url: Option<&str>, host: Option<&str>) -> String {
    if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }

    match host {
        Some("localhost") => LOCAL_API_BASE_URL.to_string(),
        Some(host) if host.contains(HOSTING_DOMAIN_MARKER) => {
            // Only `frontend` is swapped; a `resume-review-hub` host keeps its name.
            let backend_host = host.replacen("frontend", "backend", 1);
            format!("https://{backend_host}/api")
        }
        _ => RELATIVE_API_BASE_URL.to_string(),
    }
}

/// A relative base only makes sense inside a browser; outbound calls need a scheme.
pub fn is_absolute(base_url: &str) -> bool {
    base_url.starts_with("http://") || base_url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localhost_uses_local_endpoint() {
        assert_eq!(
            resolve_api_base_url(None, Some("localhost")),
            LOCAL_API_BASE_URL
        );
    }

    #[test]
    fn test_hosted_frontend_maps_to_backend() {
        let url = resolve_api_base_url(None, Some("resume-review-hub-frontend.onrender.com"));
        assert_eq!(url, "https://resume-review-hub-backend.onrender.com/api");
        assert!(!url.contains("frontend"));
    }

    #[test]
    fn test_override_wins_over_host() {
        let url = resolve_api_base_url(Some("https://api.example.com/v1/"), Some("localhost"));
        assert_eq!(url, "https://api.example.com/v1");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        assert_eq!(
            resolve_api_base_url(Some("  "), Some("localhost")),
            LOCAL_API_BASE_URL
        );
    }

    #[test]
    fn test_unknown_host_falls_back_to_relative() {
        assert_eq!(
            resolve_api_base_url(None, Some("resumes.example.org")),
            RELATIVE_API_BASE_URL
        );
        assert_eq!(resolve_api_base_url(None, None), RELATIVE_API_BASE_URL);
        assert!(!is_absolute(RELATIVE_API_BASE_URL));
    }
}
