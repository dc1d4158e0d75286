use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireIdentity;
use crate::models::submissions::responses::{SubmissionEvaluationInfo, SubmissionResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

/// 学生视角：查看自己对某作业的提交
///
/// 404 表示尚未提交，前端据此决定展示提交表单还是只读视图。
pub async fn get_my_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let actor = match RequireIdentity::extract_actor(request) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取身份信息",
            )));
        }
    };

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(e, "查询作业失败"));
        }
    };

    let submission = match storage
        .get_submission_for_student(assignment_id, actor.id)
        .await
    {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "尚未提交该作业",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(e, "查询提交失败"));
        }
    };

    let evaluation = match storage.get_evaluation_by_submission_id(submission.id).await {
        Ok(evaluation) => evaluation.map(|e| SubmissionEvaluationInfo {
            score: e.score,
            comment: e.comment,
            evaluated_at: e.evaluated_at.to_rfc3339(),
        }),
        Err(e) => {
            return Ok(storage_error_response(e, "查询评分失败"));
        }
    };

    let response = SubmissionResponse::from_submission(submission, assignment.due_at, evaluation);
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
