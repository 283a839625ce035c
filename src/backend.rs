use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode, Uri},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::any,
    Router,
};
use std::{
    io,
    path::PathBuf,
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};
use tower_http::services::ServeDir;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);
const INDEX_FILE: &str = "index.html";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

/// Static host for the built site. Read once from the environment at start-up.
#[derive(Clone, Debug, PartialEq)]
struct ServerConfig {
    port: u16,
    dist_dir: PathBuf,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_u16_with_bounds(lookup("PORT"), DEFAULT_PORT, PORT_BOUNDS);
        let dist_dir = parse_non_empty_string(lookup("DIST_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
        let log_level = parse_log_level(lookup("LOG_LEVEL"), DEFAULT_LOG_LEVEL);

        Self {
            port,
            dist_dir,
            log_level,
        }
    }

    fn index_path(&self) -> PathBuf {
        self.dist_dir.join(INDEX_FILE)
    }
}

fn parse_u16_with_bounds(value: Option<String>, default: u16, bounds: (u16, u16)) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(value: Option<String>, default: LogLevel) -> LogLevel {
    match parse_non_empty_string(value)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn log_record(level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert("ts".to_string(), serde_json::Value::from(now_unix_seconds()));
    payload.insert("level".to_string(), serde_json::Value::from(level.as_str()));
    payload.insert("event".to_string(), serde_json::Value::from(event));

    if let serde_json::Value::Object(extra) = fields {
        payload.extend(extra);
    }

    serde_json::Value::Object(payload)
}

fn log_event(config: &ServerConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }
    println!("{}", log_record(level, event, fields));
}

async fn log_requests(
    State(config): State<Arc<ServerConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;
    let is_page = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"));
    if is_page {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    }

    log_event(
        &config,
        LogLevel::Debug,
        "request",
        serde_json::json!({
            "method": method,
            "path": path,
            "status": response.status().as_u16(),
            "elapsed_ms": started.elapsed().as_millis() as u64,
        }),
    );
    response
}

/// Page routes have no file extension in their last segment; anything else
/// names an asset.
fn is_page_route(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .map_or(true, |segment| !segment.contains('.'))
}

async fn page_fallback(State(config): State<Arc<ServerConfig>>, uri: Uri) -> Response {
    if !is_page_route(uri.path()) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read_to_string(config.index_path()).await {
        Ok(page) => Html(page).into_response(),
        Err(error) => {
            log_event(
                &config,
                LogLevel::Info,
                "index_unreadable",
                serde_json::json!({
                    "path": config.index_path().display().to_string(),
                    "error": error.to_string(),
                }),
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Serves the Trunk output directory. Missing page routes fall back to the
/// page; missing assets are a 404.
fn router(config: Arc<ServerConfig>) -> Router {
    let static_service = ServeDir::new(&config.dist_dir)
        .fallback(any(page_fallback).with_state::<()>(Arc::clone(&config)));

    Router::new()
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(config, log_requests))
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(ServerConfig::from_env());

    if !config.index_path().is_file() {
        return Err(Box::new(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "{} not found; run `trunk build --release` first",
                config.index_path().display()
            ),
        )));
    }

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        &config,
        LogLevel::Info,
        "server_start",
        serde_json::json!({
            "address": bind_address,
            "dist_dir": config.dist_dir.display().to_string(),
        }),
    );

    axum::serve(listener, router(config)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| values.get(name).cloned())
    }

    fn temp_dist(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dist");
        std::fs::write(dir.join(INDEX_FILE), "<div id=\"app\"></div>").expect("write index");
        std::fs::write(dir.join("folio.js"), "export {};").expect("write script");
        dir
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.dist_dir, PathBuf::from(DEFAULT_DIST_DIR));
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn values_are_trimmed_and_parsed() {
        let config = config_from(&[("PORT", " 3000 "), ("DIST_DIR", " site "), ("LOG_LEVEL", "DEBUG")]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.dist_dir, PathBuf::from("site"));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "0"), ("DIST_DIR", "   "), ("LOG_LEVEL", "trace")]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.dist_dir, PathBuf::from(DEFAULT_DIST_DIR));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(parse_u16_with_bounds(Some("70000".into()), 1, PORT_BOUNDS), 1);
    }

    #[test]
    fn debug_events_are_below_info() {
        assert!(LogLevel::Debug < LogLevel::Info);
    }

    #[test]
    fn log_record_merges_fields() {
        let record = log_record(LogLevel::Info, "server_start", serde_json::json!({ "port": 8080 }));

        assert_eq!(record["level"], "info");
        assert_eq!(record["event"], "server_start");
        assert_eq!(record["port"], 8080);
        assert!(record["ts"].is_u64());
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_index() {
        let dist_dir = temp_dist("fallback");
        let config = Arc::new(config_from(&[("DIST_DIR", dist_dir.to_str().expect("utf-8 path"))]));

        let response = router(config)
            .oneshot(axum::http::Request::builder().uri("/projects").body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-cache"))
        );
        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        assert_eq!(&body[..], b"<div id=\"app\"></div>");
    }

    #[tokio::test]
    async fn missing_assets_are_not_found() {
        let dist_dir = temp_dist("assets-missing");
        let config = Arc::new(config_from(&[("DIST_DIR", dist_dir.to_str().expect("utf-8 path"))]));

        for uri in ["/resume.pdf", "/img/photo.png", "/nested/route/folio.wasm"] {
            let response = router(Arc::clone(&config))
                .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).expect("request"))
                .await
                .expect("router is infallible");

            assert_eq!(response.status(), 404, "{uri}");
            assert_ne!(
                response.headers().get(header::CONTENT_TYPE),
                Some(&HeaderValue::from_static("text/html; charset=utf-8"))
            );
        }
    }

    #[test]
    fn page_routes_are_extensionless() {
        assert!(is_page_route("/"));
        assert!(is_page_route("/projects"));
        assert!(is_page_route("/a.b/contact"));
        assert!(!is_page_route("/resume.pdf"));
        assert!(!is_page_route("/assets/folio_bg.wasm"));
    }

    #[tokio::test]
    async fn static_assets_are_served_directly() {
        let dist_dir = temp_dist("assets");
        let config = Arc::new(config_from(&[("DIST_DIR", dist_dir.to_str().expect("utf-8 path"))]));

        let response = router(config)
            .oneshot(axum::http::Request::builder().uri("/folio.js").body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), 200);
        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        assert_eq!(&body[..], b"export {};");
    }
}
