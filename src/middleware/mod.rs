pub mod headers;
pub mod rate_limit;

pub use headers::security_headers;
pub use rate_limit::RateLimiter;
