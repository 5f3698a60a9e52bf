//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, and the
//! session cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{
    AwardResponse, ExperienceHistoryResponse, LoginRequest, SignupRequest, UserResponse,
};
use crate::inbound::http::answers::{AnswerRequest, AnswerResponse};
use crate::inbound::http::matching::{
    CreatePostRequest, MatchingPostPageResponse, MatchingPostResponse, ReviewRequest,
    ReviewResponse, UpdatePostRequest,
};
use crate::inbound::http::questions::{
    CreateQuestionRequest, QuestionDetailResponse, QuestionPageResponse, QuestionResponse,
    UpdateQuestionRequest,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/signup or /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Titto backend API",
        description = "University community boards: questions with accepted answers and experience awards, and a matching board."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::accounts::experience_history,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::get_question,
        crate::inbound::http::questions::update_question,
        crate::inbound::http::questions::delete_question,
        crate::inbound::http::answers::create_answer,
        crate::inbound::http::answers::update_answer,
        crate::inbound::http::answers::delete_answer,
        crate::inbound::http::answers::accept_answer,
        crate::inbound::http::matching::create_post,
        crate::inbound::http::matching::list_posts,
        crate::inbound::http::matching::get_post,
        crate::inbound::http::matching::update_post,
        crate::inbound::http::matching::delete_post,
        crate::inbound::http::matching::create_review,
        crate::inbound::http::matching::list_reviews,
        crate::inbound::http::matching::update_review,
        crate::inbound::http::matching::delete_review,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        SignupRequest,
        LoginRequest,
        UserResponse,
        AwardResponse,
        ExperienceHistoryResponse,
        CreateQuestionRequest,
        UpdateQuestionRequest,
        QuestionResponse,
        QuestionDetailResponse,
        QuestionPageResponse,
        AnswerRequest,
        AnswerResponse,
        CreatePostRequest,
        UpdatePostRequest,
        MatchingPostResponse,
        MatchingPostPageResponse,
        ReviewRequest,
        ReviewResponse,
    )),
    tags(
        (name = "accounts", description = "Signup, login, and reputation"),
        (name = "questions", description = "The question board"),
        (name = "answers", description = "Answers and acceptance"),
        (name = "matching", description = "The matching board and its reviews"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("QuestionResponse", &["acceptedAnswerId", "bonusExperience", "status"])]
    #[case("UserResponse", &["answerCount", "acceptCount", "experience"])]
    fn schemas_use_camel_case_fields(#[case] schema: &str, #[case] fields: &[&str]) {
        let present = object_fields(schema);
        for field in fields {
            assert!(
                present.iter().any(|name| name == field),
                "{schema} should have field '{field}'"
            );
        }
    }

    #[rstest]
    #[case("/api/v1/signup")]
    #[case("/api/v1/questions/{id}/answers/{answer_id}/accept")]
    #[case("/api/v1/matching-posts/{id}/reviews")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
