//! Serving of the embedded SPA.
//!
//! Release builds carry the Trunk output inside the binary; debug builds
//! read `dist/` from the filesystem (running the Trunk dev server directly
//! is the usual dev workflow).

use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::Response,
};
use rust_embed::RustEmbed;

/// Trunk build output: the WASM bundle, its JS glue, and styles.
#[derive(RustEmbed)]
#[folder = "dist/"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.wasm"]
#[include = "*.css"]
#[include = "snippets/**/*"]
struct FrontendAssets;

// Paths owned by other routers; the fallback must not shadow them.
const RESERVED_PREFIXES: &[&str] = &["api/", "ws", "docs"];

fn asset_response(path: &str, data: std::borrow::Cow<'static, [u8]>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        // Trunk hashes asset filenames, so everything but index.html can
        // be cached indefinitely.
        .header(
            header::CACHE_CONTROL,
            if path == "index.html" {
                "no-cache"
            } else {
                "public, max-age=31536000"
            },
        )
        .body(Body::from(data))
        .unwrap()
}

/// Router fallback: serve an asset by exact path, or index.html for any
/// client-side route. Reserved prefixes get a plain 404 instead of the
/// SPA shell.
pub async fn serve_frontend(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if RESERVED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::empty())
            .unwrap();
    }

    let asset_path = if path.is_empty() { "index.html" } else { path };

    if let Some(asset) = FrontendAssets::get(asset_path) {
        return asset_response(asset_path, asset.data);
    }

    match FrontendAssets::get("index.html") {
        Some(index) => asset_response("index.html", index.data),
        None => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Body::from(
                "Frontend assets not found. Run 'trunk build --release' first.",
            ))
            .unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn status_for(path: &str) -> StatusCode {
        let uri: Uri = path.parse().unwrap();
        serve_frontend(uri).await.status()
    }

    #[tokio::test]
    async fn root_serves_index_html() {
        assert_eq!(status_for("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn reserved_prefixes_return_404() {
        assert_eq!(status_for("/api/v1/accounts").await, StatusCode::NOT_FOUND);
        assert_eq!(status_for("/ws").await, StatusCode::NOT_FOUND);
        assert_eq!(status_for("/docs").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn client_routes_fall_back_to_index() {
        // /accounts/<id> is a SPA route, not an asset
        assert_eq!(status_for("/accounts/abc123").await, StatusCode::OK);
    }
}
