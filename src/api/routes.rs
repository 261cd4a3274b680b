use axum::extract::DefaultBodyLimit;
use axum::middleware::map_response;
use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

#[cfg(not(test))]
use {
    std::net::{IpAddr, SocketAddr},
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
    tracing::warn,
};

use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;
use crate::web::handlers as web_handlers;

/// Create the router with all endpoints (API + Web UI)
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    // The proxy route answers 405 with a JSON body for anything but POST
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        .route(
            "/search",
            post(api_handlers::search_recipes).fallback(api_handlers::method_not_allowed),
        )
        .with_state(state.clone());

    // Apply rate limiting only in non-test builds.
    // The key is the peer IP from ConnectInfo, falling back to 127.0.0.1 when
    // the router is driven without a socket (e.g. tower::ServiceExt::oneshot).
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> Result<Self::Key, tower_governor::GovernorError> {
                if let Some(info) = req
                    .extensions()
                    .get::<axum::extract::ConnectInfo<SocketAddr>>()
                {
                    return Ok(info.0.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        // API_RATE_LIMIT is requests per second; the builder wants the
        // replenish period of a single token
        let rate = settings.server.api_rate_limit.max(1);
        let period_ms = (1000 / rate).max(1);
        let burst = u32::try_from(rate.saturating_mul(2)).unwrap_or(u32::MAX);
        match GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_millisecond(period_ms)
            .burst_size(burst)
            .finish()
        {
            Some(config) => {
                api_routes = api_routes.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => warn!("Invalid rate limit configuration, API rate limiting disabled"),
        }
    }

    // Limiter rejections are folded into the proxy's JSON error responses
    let api_routes = api_routes
        .layer(RequestBodyLimitLayer::new(
            settings.upload.max_request_body_size,
        ))
        .layer(map_response(api_handlers::collapse_layer_rejections));

    // Web UI routes
    let web_routes = Router::new()
        .route("/", get(web_handlers::index))
        .route("/search", post(web_handlers::search_page))
        .with_state(state.clone())
        .layer(RequestBodyLimitLayer::new(
            settings.upload.max_request_body_size,
        ));

    // Health check routes
    let health_routes = Router::new()
        .route("/health", get(api_handlers::health_check))
        .route("/ready", get(api_handlers::readiness_check))
        .with_state(state);

    // Static file serving
    let static_routes = Router::new().nest_service("/static", ServeDir::new("src/web/static"));

    // Main router with middleware
    Router::new()
        .merge(web_routes)
        .merge(health_routes)
        .merge(static_routes)
        .nest("/api", api_routes)
        // Multipart would otherwise stop at axum's 2 MB default; the
        // RequestBodyLimitLayer on each upload router takes its place
        .layer(DefaultBodyLimit::disable())
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(
            // Security headers
            SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data: blob:; object-src 'none'; base-uri 'self'",
            ),
        ))
        .layer(
            // Compression
            CompressionLayer::new(),
        )
        .layer(
            // Tracing
            TraceLayer::new_for_http(),
        )
}
