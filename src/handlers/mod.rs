use actix_web::{web, HttpResponse, Responder};
use log::{debug, error};
use serde_json::json;

use crate::errors::CompletionError;
use crate::models::explain::{ExplainRequest, ExplainResponse};
use crate::models::template::PromptTemplate;
use crate::services::CompletionService;

pub async fn explain_handler(
    payload: web::Json<ExplainRequest>,
    completions: web::Data<CompletionService>,
) -> impl Responder {
    let ExplainRequest { code, language } = payload.into_inner();
    debug!("payload {:?} {:?}", code, language);

    if code.is_empty() || language.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Code is required" }));
    }

    let template = PromptTemplate::resolve(&language);
    match completions.complete(template.messages(&code)).await {
        Ok(explanation) => HttpResponse::Ok().json(ExplainResponse {
            explanation,
            // unreachable after validation; "unkonwn" kept for wire
            // compatibility with deployed clients
            language: if language.is_empty() {
                "unkonwn".to_string()
            } else {
                language
            },
        }),
        Err(CompletionError::Empty) => {
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to Explain code" }))
        }
        Err(err) => {
            error!("explain api error: {}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Server Error",
                "details": err.to_string(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use serde_json::{json, Value};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn post_explain(
        completion_url: String,
        body: Value,
    ) -> (actix_web::http::StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(CompletionService::new(
                    completion_url,
                    "test-key".to_string(),
                    "test-model".to_string(),
                )))
                .route("/api/explain-code", web::post().to(explain_handler)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/explain-code")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status();
        (status, test::read_body_json(response).await)
    }

    fn completion_response(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": text } }]
        }))
    }

    // validation happens before the provider call, so an unroutable URL
    // is enough for the 400 cases
    const UNUSED_PROVIDER: &str = "http://127.0.0.1:1/v1/chat/completions";

    #[actix_web::test]
    async fn empty_code_is_rejected() {
        let (status, body) = post_explain(
            UNUSED_PROVIDER.to_string(),
            json!({ "code": "", "language": "python" }),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Code is required" }));
    }

    #[actix_web::test]
    async fn empty_language_is_rejected() {
        let (status, body) = post_explain(
            UNUSED_PROVIDER.to_string(),
            json!({ "code": "print('hi')", "language": "" }),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Code is required" }));
    }

    #[actix_web::test]
    async fn missing_fields_are_rejected() {
        for body in [json!({}), json!({ "language": "python" }), json!({ "code": "x" })] {
            let (status, body) = post_explain(UNUSED_PROVIDER.to_string(), body).await;
            assert_eq!(status, 400);
            assert_eq!(body, json!({ "error": "Code is required" }));
        }
    }

    #[actix_web::test]
    async fn zero_and_whitespace_pass_validation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion_response("ok"))
            .mount(&server)
            .await;

        for payload in [
            json!({ "code": "0", "language": "0" }),
            json!({ "code": "   ", "language": " " }),
        ] {
            let (status, _) =
                post_explain(format!("{}/v1/chat/completions", server.uri()), payload).await;
            assert_eq!(status, 200);
        }
    }

    #[actix_web::test]
    async fn grammar_request_reaches_the_provider_with_the_grammar_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("friendly English assistant"))
            .and(body_string_contains("He go to school"))
            .respond_with(completion_response("He goes to school."))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = post_explain(
            format!("{}/v1/chat/completions", server.uri()),
            json!({ "code": "He go to school", "language": "english" }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({ "explanation": "He goes to school.", "language": "english" })
        );
    }

    #[actix_web::test]
    async fn code_request_reaches_the_provider_with_the_code_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("code explainer assistant"))
            .and(body_string_contains("python"))
            .and(body_string_contains("print('hi')"))
            .respond_with(completion_response("# step-1: ..."))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = post_explain(
            format!("{}/v1/chat/completions", server.uri()),
            json!({ "code": "print('hi')", "language": "python" }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["language"], "python");
        assert_eq!(body["explanation"], "# step-1: ...");
    }

    #[actix_web::test]
    async fn empty_completion_maps_to_failed_to_explain() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let (status, body) = post_explain(
            format!("{}/v1/chat/completions", server.uri()),
            json!({ "code": "x", "language": "python" }),
        )
        .await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({ "error": "Failed to Explain code" }));
    }

    #[actix_web::test]
    async fn provider_failure_maps_to_server_error_with_details() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let (status, body) = post_explain(
            format!("{}/v1/chat/completions", server.uri()),
            json!({ "code": "x", "language": "python" }),
        )
        .await;

        assert_eq!(status, 500);
        assert_eq!(body["error"], "Server Error");
        assert!(body["details"].as_str().unwrap().contains("boom"));
    }
}
