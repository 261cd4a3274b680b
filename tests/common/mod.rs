use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use munchmatch::{
    api::{handlers::AppState, routes},
    backend::BackendClient,
    config::{BackendConfig, ServerConfig, Settings, UploadConfig},
};
use tower::ServiceExt;

pub const BOUNDARY: &str = "munchmatch-boundary";

pub fn test_settings(backend_url: String) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            external_url: None,
            api_rate_limit: 100,
        },
        backend: BackendConfig {
            url: backend_url,
            timeout_seconds: 5,
            user_agent: "MunchMatch/test".to_string(),
        },
        upload: UploadConfig {
            max_image_size: 1024,
            max_request_body_size: 8192,
        },
    }
}

/// Router wired to a backend at `{server_url}/api/search`
pub fn test_app(server_url: &str) -> Router {
    app_with_settings(test_settings(format!("{server_url}/api/search")))
}

pub fn app_with_settings(settings: Settings) -> Router {
    let state = AppState {
        backend: BackendClient::new(&settings.backend).expect("client"),
        settings: settings.clone(),
    };
    routes::create_router(state, &settings)
}

pub fn text_part(name: &str, value: &str) -> String {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
}

pub fn file_part(name: &str, file_name: &str, content_type: &str, data: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n"
    )
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[String]) -> Response<Body> {
    let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
