use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireIdentity;
use crate::models::actors::entities::ActorRole;
use crate::models::submissions::responses::{SubmissionEvaluationInfo, SubmissionResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

/// 查看单条提交：提交学生本人、任课教师或主任
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
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

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(e, "查询提交失败"));
        }
    };

    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
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

    let allowed = match actor.role {
        ActorRole::Director => true,
        ActorRole::Student => submission.student_id == actor.id,
        ActorRole::Instructor => {
            match storage.is_instructor_of(actor.id, assignment.space_id).await {
                Ok(allowed) => allowed,
                Err(e) => {
                    return Ok(storage_error_response(e, "查询教师名册失败"));
                }
            }
        }
    };
    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有查看该提交的权限",
        )));
    }

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
