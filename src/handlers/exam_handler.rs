use actix_web::{get, post, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::request::ExamListParams};

#[get("/api/v1/exams")]
async fn list_exams(
    state: web::Data<AppState>,
    query: web::Query<ExamListParams>,
) -> Result<HttpResponse, AppError> {
    let response = state.exam_service.list_exams(query.into_inner().category).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/v1/exams/{exam_id}/start")]
async fn start_exam(
    state: web::Data<AppState>,
    exam_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let attempt = state.attempt_service.start_exam(exam_id.into_inner()).await?;
    Ok(HttpResponse::Created().json(attempt))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
