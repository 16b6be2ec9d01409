use actix_web::{web, Scope};

use crate::config::Config;
use crate::handlers;
use crate::services::CompletionService;

pub fn explain_routes(config: &Config) -> Scope {
    let completions = web::Data::new(CompletionService::new(
        config.completion_url.clone(),
        config.api_key.clone(),
        config.model.clone(),
    ));

    web::scope("/api")
        .app_data(completions.clone())
        .route("/explain-code", web::post().to(handlers::explain_handler))
}
