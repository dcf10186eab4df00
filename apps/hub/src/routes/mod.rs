pub mod health;

use anyhow::{bail, Result};
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    services::{ServeDir, ServeFile},
    set_header::{SetResponseHeader, SetResponseHeaderLayer},
};

use crate::state::{ServeVariant, ServerState};

pub const DIST_ENTRY: &str = "index.html";
pub const LITE_ENTRY: &str = "index-lite.html";

const ASSET_CACHE: &str = "public, max-age=3600";
const ENTRY_CACHE: &str = "no-cache";

/// Builds the static router. Any path that is not a file falls back to the
/// SPA entry document so client-side routing can take over.
pub fn build_router(variant: ServeVariant) -> Result<Router> {
    let root = variant.root().clone();
    if !root.is_dir() {
        bail!(
            "{} directory not found at {}. Build the front end first.",
            variant.name(),
            root.display()
        );
    }

    let state = ServerState {
        variant: variant.clone(),
    };
    let router = Router::new().route("/health", get(health::health_handler));

    let router = match variant {
        ServeVariant::Dist { dir } => {
            let entry = SetResponseHeader::overriding(
                ServeFile::new(dir.join(DIST_ENTRY)),
                header::CACHE_CONTROL,
                HeaderValue::from_static(ENTRY_CACHE),
            );
            let assets = ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static(ASSET_CACHE),
                ))
                .service(ServeDir::new(&dir).fallback(entry));
            router.fallback_service(assets)
        }
        ServeVariant::Lite { root } => {
            let files = ServeDir::new(&root)
                .append_index_html_on_directories(false)
                .fallback(ServeFile::new(root.join(LITE_ENTRY)));
            router.fallback_service(files)
        }
    };

    Ok(router.with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::path::Path;
    use tower::ServiceExt;

    fn write(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    async fn get_path(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_dist_serves_assets_with_cache() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DIST_ENTRY, "<html>app</html>");
        write(dir.path(), "assets/app.js", "console.log(1)");
        let app = build_router(ServeVariant::Dist {
            dir: dir.path().to_path_buf(),
        })
        .unwrap();

        let (status, cache, body) = get_path(app, "/assets/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some(ASSET_CACHE));
        assert_eq!(body, "console.log(1)");
    }

    #[tokio::test]
    async fn test_dist_falls_back_to_entry() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DIST_ENTRY, "<html>app</html>");
        let app = build_router(ServeVariant::Dist {
            dir: dir.path().to_path_buf(),
        })
        .unwrap();

        let (status, cache, body) = get_path(app, "/jobs/42").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some(ENTRY_CACHE));
        assert_eq!(body, "<html>app</html>");
    }

    #[tokio::test]
    async fn test_missing_dist_fails_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_router(ServeVariant::Dist {
            dir: dir.path().join("dist"),
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_lite_serves_entry_without_cache_headers() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), LITE_ENTRY, "<html>lite</html>");
        write(dir.path(), DIST_ENTRY, "<html>full</html>");
        write(dir.path(), "styles.css", "body{}");
        let variant = ServeVariant::Lite {
            root: dir.path().to_path_buf(),
        };

        let (status, cache, body) = get_path(build_router(variant.clone()).unwrap(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache, None);
        assert_eq!(body, "<html>lite</html>");

        let (_, _, body) = get_path(build_router(variant.clone()).unwrap(), "/review").await;
        assert_eq!(body, "<html>lite</html>");

        let (status, cache, body) = get_path(build_router(variant).unwrap(), "/styles.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache, None);
        assert_eq!(body, "body{}");
    }

    #[tokio::test]
    async fn test_health_reports_variant() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(ServeVariant::Lite {
            root: dir.path().to_path_buf(),
        })
        .unwrap();

        let (status, _, body) = get_path(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["variant"], "lite");
    }
}
