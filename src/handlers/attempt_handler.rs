use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{CreateAttemptRequest, HistoryParams, SaveAnswerRequest},
};

#[post("/api/v1/attempts")]
async fn create_attempt(
    state: web::Data<AppState>,
    request: web::Json<CreateAttemptRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let attempt = state
        .attempt_service
        .start_with_questions(request.exam_id, &request.question_ids)
        .await?;
    Ok(HttpResponse::Created().json(attempt))
}

#[get("/api/v1/attempts/history")]
async fn get_attempt_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let response = state
        .attempt_service
        .history(
            params.category,
            params.offset(),
            params.limit_or(state.config.history_default_limit),
        )
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/v1/attempts/{attempt_id}")]
async fn get_attempt(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attempt = state.attempt_service.get_attempt(&attempt_id).await?;
    Ok(HttpResponse::Ok().json(attempt))
}

#[post("/api/v1/attempts/{attempt_id}/answer")]
async fn save_answer(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
    request: web::Json<SaveAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state
        .attempt_service
        .save_answer(
            &attempt_id,
            request.question_id,
            request.answer.map(|a| a.into_tokens()),
            request.time_spent_seconds,
        )
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/v1/attempts/{attempt_id}/submit")]
async fn submit_attempt(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let result = state.attempt_service.submit(&attempt_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/api/v1/attempts/{attempt_id}/result")]
async fn get_attempt_result(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let result = state.attempt_service.get_result(&attempt_id).await?;
    Ok(HttpResponse::Ok().json(result))
}
