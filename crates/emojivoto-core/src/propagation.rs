//! W3C trace context across service hops.
//!
//! With the `traces` feature, outgoing gRPC and HTTP requests carry the
//! current span's context, and servers re-parent their request span onto the
//! caller's. Without it every function here compiles to a no-op and
//! [`TraceContextInterceptor`] passes requests through untouched.
//!
//! The propagator itself is installed by
//! [`init_telemetry`](crate::telemetry::init_telemetry).

use tonic::codegen::http::HeaderMap;
use tonic::metadata::MetadataMap;
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::Span;

#[cfg(feature = "traces")]
use opentelemetry::global;
#[cfg(feature = "traces")]
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Client interceptor writing the current span's context into the request
/// metadata.
///
/// ```ignore
/// let client = VotingServiceClient::with_interceptor(channel, TraceContextInterceptor);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceContextInterceptor;

impl Interceptor for TraceContextInterceptor {
    fn call(&mut self, mut req: Request<()>) -> Result<Request<()>, Status> {
        inject_metadata(req.metadata_mut());
        Ok(req)
    }
}

#[cfg(feature = "traces")]
mod carrier {
    use opentelemetry::propagation::{Extractor, Injector};
    use tonic::codegen::http::{HeaderMap, HeaderName, HeaderValue};
    use tonic::metadata::{KeyRef, MetadataKey, MetadataMap, MetadataValue};

    pub(super) struct MetadataInjector<'a>(pub(super) &'a mut MetadataMap);

    impl Injector for MetadataInjector<'_> {
        fn set(&mut self, key: &str, value: String) {
            if let (Ok(key), Ok(value)) = (
                MetadataKey::from_bytes(key.as_bytes()),
                MetadataValue::try_from(value),
            ) {
                self.0.insert(key, value);
            }
        }
    }

    pub(super) struct MetadataExtractor<'a>(pub(super) &'a MetadataMap);

    impl Extractor for MetadataExtractor<'_> {
        fn get(&self, key: &str) -> Option<&str> {
            self.0.get(key).and_then(|v| v.to_str().ok())
        }

        fn keys(&self) -> Vec<&str> {
            self.0
                .keys()
                .map(|key| match key {
                    KeyRef::Ascii(k) => k.as_str(),
                    KeyRef::Binary(k) => k.as_str(),
                })
                .collect()
        }
    }

    pub(super) struct HeaderInjector<'a>(pub(super) &'a mut HeaderMap);

    impl Injector for HeaderInjector<'_> {
        fn set(&mut self, key: &str, value: String) {
            if let (Ok(key), Ok(value)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                self.0.insert(key, value);
            }
        }
    }

    pub(super) struct HeaderExtractor<'a>(pub(super) &'a HeaderMap);

    impl Extractor for HeaderExtractor<'_> {
        fn get(&self, key: &str) -> Option<&str> {
            self.0.get(key).and_then(|v| v.to_str().ok())
        }

        fn keys(&self) -> Vec<&str> {
            self.0.keys().map(HeaderName::as_str).collect()
        }
    }
}

/// Writes the current span's context into gRPC metadata.
#[cfg(feature = "traces")]
pub fn inject_metadata(metadata: &mut MetadataMap) {
    let cx = Span::current().context();
    global::get_text_map_propagator(|p| {
        p.inject_context(&cx, &mut carrier::MetadataInjector(metadata));
    });
}

#[cfg(not(feature = "traces"))]
pub fn inject_metadata(_metadata: &mut MetadataMap) {}

/// Writes the current span's context into HTTP headers.
#[cfg(feature = "traces")]
pub fn inject_headers(headers: &mut HeaderMap) {
    let cx = Span::current().context();
    global::get_text_map_propagator(|p| {
        p.inject_context(&cx, &mut carrier::HeaderInjector(headers));
    });
}

#[cfg(not(feature = "traces"))]
pub fn inject_headers(_headers: &mut HeaderMap) {}

/// Parents `span` on the caller context found in gRPC metadata.
///
/// Call before `span` is first entered.
#[cfg(feature = "traces")]
pub fn set_parent_from_metadata(span: &Span, metadata: &MetadataMap) {
    let parent =
        global::get_text_map_propagator(|p| p.extract(&carrier::MetadataExtractor(metadata)));
    let _ = span.set_parent(parent);
}

#[cfg(not(feature = "traces"))]
pub fn set_parent_from_metadata(_span: &Span, _metadata: &MetadataMap) {}

/// Parents `span` on the caller context found in HTTP headers.
///
/// Call before `span` is first entered.
#[cfg(feature = "traces")]
pub fn set_parent_from_headers(span: &Span, headers: &HeaderMap) {
    let parent =
        global::get_text_map_propagator(|p| p.extract(&carrier::HeaderExtractor(headers)));
    let _ = span.set_parent(parent);
}

#[cfg(not(feature = "traces"))]
pub fn set_parent_from_headers(_span: &Span, _headers: &HeaderMap) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn intercept(req: Request<()>) -> Request<()> {
        TraceContextInterceptor.call(req).unwrap()
    }

    #[cfg(not(feature = "traces"))]
    #[test]
    fn disabled_interceptor_adds_nothing() {
        let req = intercept(Request::new(()));
        assert!(req.metadata().is_empty());

        let mut headers = HeaderMap::new();
        inject_headers(&mut headers);
        assert!(headers.is_empty());
    }

    #[test]
    fn interceptor_keeps_existing_metadata() {
        let mut req = Request::new(());
        req.metadata_mut().insert("x-request-id", "abc".parse().unwrap());
        let req = intercept(req);
        assert_eq!(req.metadata().get("x-request-id").unwrap(), "abc");
    }

    #[cfg(feature = "traces")]
    mod traced {
        use super::super::*;
        use opentelemetry::trace::{TraceContextExt, TracerProvider};
        use opentelemetry_sdk::propagation::TraceContextPropagator;
        use opentelemetry_sdk::trace::SdkTracerProvider;
        use tracing_subscriber::layer::SubscriberExt;

        fn with_tracing(f: impl FnOnce()) {
            global::set_text_map_propagator(TraceContextPropagator::new());
            let provider = SdkTracerProvider::builder().build();
            let subscriber = tracing_subscriber::registry()
                .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("test")));
            tracing::subscriber::with_default(subscriber, f);
        }

        #[test]
        fn metadata_carries_the_current_trace() {
            with_tracing(|| {
                let caller = tracing::info_span!("caller");
                let want = caller.context().span().span_context().trace_id();

                let mut metadata = MetadataMap::new();
                caller.in_scope(|| inject_metadata(&mut metadata));
                assert!(metadata.get("traceparent").is_some());

                let got = global::get_text_map_propagator(|p| {
                    p.extract(&carrier::MetadataExtractor(&metadata))
                });
                assert!(got.span().span_context().is_valid());
                assert_eq!(got.span().span_context().trace_id(), want);
            });
        }

        #[test]
        fn headers_carry_the_current_trace() {
            with_tracing(|| {
                let caller = tracing::info_span!("caller");
                let want = caller.context().span().span_context().trace_id();

                let mut headers = HeaderMap::new();
                caller.in_scope(|| inject_headers(&mut headers));

                let got = global::get_text_map_propagator(|p| {
                    p.extract(&carrier::HeaderExtractor(&headers))
                });
                assert_eq!(got.span().span_context().trace_id(), want);
            });
        }

        #[test]
        fn no_caller_context_leaves_metadata_empty() {
            with_tracing(|| {
                let mut metadata = MetadataMap::new();
                inject_metadata(&mut metadata);
                assert!(metadata.get("traceparent").is_none());
            });
        }
    }
}
