use crate::infrastructure::security::validate_token;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{AUTHORIZATION, HeaderName, HeaderValue},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Per-request identifier stored in request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Caller identity attached by [`JwtAuthMiddleware`] for a valid bearer token.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub email: String,
}

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
const RESPONSE_TIME_HEADER: HeaderName = HeaderName::from_static("x-response-time");

/// Tags each request with a fresh [`RequestId`] and reports it back with the
/// elapsed time, in `x-request-id` and `x-response-time`.
pub struct RequestContextMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestContextMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestContextService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestContextService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestContextService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestContextService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let method = req.method().clone();
        let path = req.path().to_string();

        req.extensions_mut().insert(RequestId(request_id.to_string()));
        debug!(request_id = %request_id, method = %method, path = %path, "Request received");

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let elapsed_ms = started.elapsed().as_millis();
            let status = res.status();

            let headers = res.headers_mut();
            // A hyphenated UUID and a decimal count are always valid header text.
            if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                headers.insert(REQUEST_ID_HEADER, value);
            }
            if let Ok(value) = HeaderValue::from_str(&format!("{}ms", elapsed_ms)) {
                headers.insert(RESPONSE_TIME_HEADER, value);
            }

            if status.is_success() {
                info!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    elapsed_ms,
                    "Request completed"
                );
            } else {
                warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    elapsed_ms,
                    "Request failed"
                );
            }

            Ok(res)
        })
    }
}

/// Verifies `Authorization: Bearer <jwt>` when present and attaches an
/// [`AuthenticatedUser`]. Requests are never rejected here; handlers that
/// need a caller extract `AuthenticatedUser` and get a 401 without one.
pub struct JwtAuthMiddleware {
    secret: Arc<str>,
}

impl JwtAuthMiddleware {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    secret: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string());

        if let Some(token) = bearer {
            match validate_token(&token, &self.secret) {
                Ok(email) => {
                    debug!(email = %email, "Bearer token accepted");
                    req.extensions_mut().insert(AuthenticatedUser { email });
                }
                Err(e) => {
                    let request_id = req
                        .extensions()
                        .get::<RequestId>()
                        .map(|id| id.0.clone())
                        .unwrap_or_default();
                    warn!(
                        error = %e,
                        path = %req.path(),
                        request_id = %request_id,
                        "Rejected bearer token"
                    );
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}
