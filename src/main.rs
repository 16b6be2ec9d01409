use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use redis_async::{client, client::PairedConnection, resp_array};

use askdurga::config::{Config, RedisSettings};
use askdurga::middleware::{security_headers, RateLimiter};
use askdurga::routes;

const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let limiter = RateLimiter::new(connect_redis().await);

    let bind = format!("{}:{}", config.host, config.port);
    info!("API server listening on {}", bind);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.frontend_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        App::new()
            .app_data(web::JsonConfig::default().limit(JSON_BODY_LIMIT))
            .wrap(limiter.clone())
            .wrap(cors)
            .wrap(security_headers())
            .wrap(Logger::default())
            .service(routes::explain::explain_routes(&config))
    })
    .bind(bind)?
    .run()
    .await
}

async fn connect_redis() -> Option<PairedConnection> {
    let settings = RedisSettings::from_env();
    if !settings.is_configured() {
        return None;
    }

    match client::paired_connect(settings.redis_host.as_str(), settings.redis_port).await {
        Ok(connection) => {
            if !settings.redis_password.is_empty() {
                if let Err(err) = connection
                    .send::<String>(resp_array!["AUTH", &settings.redis_password])
                    .await
                {
                    warn!("redis AUTH failed, rate limiting disabled: {}", err);
                    return None;
                }
            }
            Some(connection)
        }
        Err(err) => {
            warn!("redis unavailable, rate limiting disabled: {}", err);
            None
        }
    }
}
