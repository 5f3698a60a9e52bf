//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod accounts;
pub mod answers;
pub mod error;
pub mod health;
pub mod matching;
pub mod questions;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on the enclosing scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use titto_backend::inbound::http::api_routes;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(api_routes));
/// ```
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::signup)
        .service(accounts::login)
        .service(accounts::current_user)
        .service(accounts::experience_history)
        .service(questions::create_question)
        .service(questions::list_questions)
        .service(questions::get_question)
        .service(questions::update_question)
        .service(questions::delete_question)
        .service(answers::create_answer)
        .service(answers::update_answer)
        .service(answers::delete_answer)
        .service(answers::accept_answer)
        .service(matching::create_post)
        .service(matching::list_posts)
        .service(matching::get_post)
        .service(matching::update_post)
        .service(matching::delete_post)
        .service(matching::create_review)
        .service(matching::list_reviews)
        .service(matching::update_review)
        .service(matching::delete_review);
}
