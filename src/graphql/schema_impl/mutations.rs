use async_graphql::{Context, Object, ID};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    graphql::helpers::with_code,
    models::{
        domain::{Attempt, SubmitResult},
        dto::{request::CreateAttemptRequest, response::AckResponse},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn start_exam(&self, ctx: &Context<'_>, exam_id: i64) -> async_graphql::Result<Attempt> {
        let state = ctx.data::<AppState>()?;
        with_code(state.attempt_service.start_exam(exam_id).await)
    }

    /// Starts an attempt over an explicit question list instead of the exam's own.
    async fn create_attempt(
        &self,
        ctx: &Context<'_>,
        exam_id: i64,
        question_ids: Vec<i64>,
    ) -> async_graphql::Result<Attempt> {
        let state = ctx.data::<AppState>()?;
        let request = CreateAttemptRequest {
            exam_id,
            question_ids,
        };
        with_code(request.validate().map_err(AppError::from))?;

        with_code(
            state
                .attempt_service
                .start_with_questions(request.exam_id, &request.question_ids)
                .await,
        )
    }

    /// A missing or empty `answer` clears the saved answer.
    async fn save_answer(
        &self,
        ctx: &Context<'_>,
        attempt_id: ID,
        question_id: i64,
        answer: Option<Vec<String>>,
        time_spent_seconds: Option<u32>,
    ) -> async_graphql::Result<AckResponse> {
        let state = ctx.data::<AppState>()?;
        with_code(
            state
                .attempt_service
                .save_answer(&attempt_id, question_id, answer, time_spent_seconds)
                .await,
        )
    }

    async fn submit_attempt(
        &self,
        ctx: &Context<'_>,
        attempt_id: ID,
    ) -> async_graphql::Result<SubmitResult> {
        let state = ctx.data::<AppState>()?;
        with_code(state.attempt_service.submit(&attempt_id).await)
    }
}
