//! Per-request middleware: correlation id, `http.request` span, completion
//! log and HTTP metrics.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, info_span, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use self::request_ids::{REQUEST_ID_HEADER, RequestId};
use super::{metrics, settings};

/// Probes and scrapes get a request id but are neither logged nor counted.
fn is_probe(path: &str) -> bool {
    matches!(path, "/metrics" | "/health")
}

fn request_span(req: &Request, request_id: &RequestId, route: &str) -> Span {
    let span = info_span!(
        parent: None,
        "http.request",
        otel.name = %format!("{} {route}", req.method()),
        otel.kind = "server",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to continue inbound trace: {source}");
    }

    span
}

/// One completion event per request; its level follows the outcome.
fn log_completion(status: StatusCode, elapsed: Duration) {
    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());
    let status = status.as_u16();

    if (500..600).contains(&status) {
        error!(status, duration_ms, "request failed");
    } else if (400..500).contains(&status) {
        warn!(status, duration_ms, "request rejected");
    } else if duration_ms > threshold_ms {
        warn!(status, duration_ms, threshold_ms, "slow request");
    } else {
        info!(status, duration_ms, "request completed");
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let request_id = RequestId::resolve(req.header::<String>(REQUEST_ID_HEADER));

    request_id.apply(res);

    if is_probe(req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let method = req.method().to_string();
    let route = spans::route_template(req.uri().path());
    let span = request_span(req, &request_id, &route);
    let _in_flight = metrics::InFlightRequestGuard::track();

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(&method, &route, status.as_u16(), elapsed.as_secs_f64());

    span.record("status", status.as_u16());
    span.record("duration_ms", elapsed.as_millis());
    span.in_scope(|| log_completion(status, elapsed));
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use uuid::Uuid;

    use super::*;

    #[handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    #[handler]
    async fn missing(res: &mut Response) {
        res.status_code(StatusCode::NOT_FOUND);
    }

    fn service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("health").get(ok))
                .push(Router::with_path("api/v1/brands").get(ok))
                .push(Router::with_path("api/v1/missing").get(missing)),
        )
    }

    fn request_id(res: &Response) -> Option<&str> {
        res.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn inbound_request_id_is_echoed() {
        let res = TestClient::get("http://example.com/api/v1/brands")
            .add_header(REQUEST_ID_HEADER, "req-123", true)
            .send(&service())
            .await;

        assert_eq!(request_id(&res), Some("req-123"));
    }

    #[tokio::test]
    async fn missing_request_id_is_generated() {
        let res = TestClient::get("http://example.com/api/v1/missing")
            .send(&service())
            .await;

        let generated = request_id(&res).map(Uuid::parse_str);

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(
            matches!(generated, Some(Ok(_))),
            "expected a generated uuid request id, got {generated:?}"
        );
    }

    #[tokio::test]
    async fn probes_still_carry_a_request_id() {
        let mut res = TestClient::get("http://example.com/health")
            .send(&service())
            .await;

        assert!(request_id(&res).is_some(), "expected x-request-id on health responses");
        assert_eq!(res.take_string().await.ok().as_deref(), Some("ok"));
    }

    #[test]
    fn only_health_and_metrics_are_probes() {
        assert!(is_probe("/health"));
        assert!(is_probe("/metrics"));
        assert!(!is_probe("/api/v1/brands"));
    }
}
