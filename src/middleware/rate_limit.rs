use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpResponse};
use chrono::Utc;
use futures::future::LocalBoxFuture;
use log::warn;
use redis_async::{client::PairedConnection, resp_array};

pub const WINDOW_SECS: i64 = 15 * 60;
pub const MAX_REQUESTS: i64 = 100;
const REJECTION_MESSAGE: &str = "To many requests from this Ip";

/// Fixed-window rate limiter keyed per client IP, counted in Redis. With no
/// Redis connection the gate is disabled and every request passes.
#[derive(Clone)]
pub struct RateLimiter {
    redis: Option<PairedConnection>,
}

impl RateLimiter {
    pub fn new(redis: Option<PairedConnection>) -> Self {
        Self { redis }
    }
}

fn window_key(client: &str, now_ts: i64) -> (String, i64) {
    let window_start = now_ts - now_ts % WINDOW_SECS;
    (
        format!("rate_limit:{}:{}", client, window_start),
        window_start + WINDOW_SECS,
    )
}

/// Redis errors fail open: an unavailable counter must not deny traffic.
async fn within_limit(redis: &PairedConnection, client: &str) -> bool {
    let (key, expires_at) = window_key(client, Utc::now().timestamp());

    let current_count: i64 = match redis.send(resp_array!["INCR", &key]).await {
        Ok(value) => value,
        Err(err) => {
            warn!("rate limit check failed: {}", err);
            return true;
        }
    };

    if current_count == 1 {
        redis.send_and_forget(resp_array!["EXPIREAT", &key, expires_at.to_string()]);
    }

    current_count <= MAX_REQUESTS
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimiterMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            redis: self.redis.clone(),
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    redis: Option<PairedConnection>,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let redis = self.redis.clone();

        Box::pin(async move {
            if let Some(redis) = redis {
                let client = req
                    .connection_info()
                    .realip_remote_addr()
                    .unwrap_or("unknown")
                    .to_owned();

                if !within_limit(&redis, &client).await {
                    let (request, _) = req.into_parts();
                    let response = HttpResponse::TooManyRequests()
                        .body(REJECTION_MESSAGE)
                        .map_into_right_body();
                    return Ok(ServiceResponse::new(request, response));
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
