use async_graphql::{Context, Object, ID};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    graphql::helpers::with_code,
    models::{
        domain::{Attempt, ExamCategory, SubmitResult},
        dto::{
            request::HistoryParams,
            response::{AttemptHistoryResponse, ExamListResponse},
        },
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn attempt(&self, ctx: &Context<'_>, attempt_id: ID) -> async_graphql::Result<Attempt> {
        let state = ctx.data::<AppState>()?;
        with_code(state.attempt_service.get_attempt(&attempt_id).await)
    }

    /// Fails with `INVALID_STATE` while the attempt is still in progress.
    async fn attempt_result(
        &self,
        ctx: &Context<'_>,
        attempt_id: ID,
    ) -> async_graphql::Result<SubmitResult> {
        let state = ctx.data::<AppState>()?;
        with_code(state.attempt_service.get_result(&attempt_id).await)
    }

    async fn attempt_history(
        &self,
        ctx: &Context<'_>,
        category: Option<ExamCategory>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<AttemptHistoryResponse> {
        let state = ctx.data::<AppState>()?;
        let params = HistoryParams {
            category,
            offset,
            limit,
        };
        with_code(params.validate().map_err(AppError::from))?;

        with_code(
            state
                .attempt_service
                .history(
                    params.category,
                    params.offset(),
                    params.limit_or(state.config.history_default_limit),
                )
                .await,
        )
    }

    async fn exams(
        &self,
        ctx: &Context<'_>,
        category: Option<ExamCategory>,
    ) -> async_graphql::Result<ExamListResponse> {
        let state = ctx.data::<AppState>()?;
        with_code(state.exam_service.list_exams(category).await)
    }
}
