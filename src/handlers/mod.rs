pub mod attempt_handler;
pub mod exam_handler;

use actix_web::web;

use crate::{
    errors::AppError,
    graphql::{graphiql, graphql_handler},
};

pub use attempt_handler::{
    create_attempt, get_attempt, get_attempt_history, get_attempt_result, save_answer,
    submit_attempt,
};
pub use exam_handler::{health_check, list_exams, start_exam};

/// Registers every REST and GraphQL route. Expects `web::Data<AppState>` and
/// `web::Data<graphql::Schema>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _| {
        AppError::ValidationError(err.to_string()).into()
    }));

    cfg.service(health_check)
        .service(list_exams)
        .service(start_exam)
        .service(create_attempt)
        // Before the `{attempt_id}` routes so "history" is not taken as an id.
        .service(get_attempt_history)
        .service(get_attempt)
        .service(save_answer)
        .service(submit_attempt)
        .service(get_attempt_result)
        .route("/graphql", web::post().to(graphql_handler))
        .route("/graphiql", web::get().to(graphiql));
}
