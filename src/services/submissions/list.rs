use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::SubmissionService;
use crate::middlewares::RequireIdentity;
use crate::models::actors::entities::ActorRole;
use crate::models::submissions::responses::{
    SubmissionEvaluationInfo, SubmissionListResponse, SubmissionResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

/// 教师视角：列出作业的全部提交（附带评分状态）
pub async fn list_submissions(
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

    // 只有该空间的教师或主任可以审阅提交列表
    let allowed = match actor.role {
        ActorRole::Director => true,
        ActorRole::Instructor => {
            match storage.is_instructor_of(actor.id, assignment.space_id).await {
                Ok(allowed) => allowed,
                Err(e) => {
                    return Ok(storage_error_response(e, "查询教师名册失败"));
                }
            }
        }
        ActorRole::Student => false,
    };
    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::SpacePermissionDenied,
            "只有任课教师可以查看提交列表",
        )));
    }

    let submissions = match storage.list_submissions_by_assignment(assignment_id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            return Ok(storage_error_response(e, "查询提交列表失败"));
        }
    };

    // 批量取回评分，按提交 ID 装配
    let evaluations = match storage.list_evaluations_by_assignment(assignment_id).await {
        Ok(evaluations) => evaluations,
        Err(e) => {
            return Ok(storage_error_response(e, "查询评分列表失败"));
        }
    };
    let mut evaluation_map: HashMap<i64, SubmissionEvaluationInfo> = evaluations
        .into_iter()
        .map(|e| {
            (
                e.submission_id,
                SubmissionEvaluationInfo {
                    score: e.score,
                    comment: e.comment,
                    evaluated_at: e.evaluated_at.to_rfc3339(),
                },
            )
        })
        .collect();

    let items: Vec<SubmissionResponse> = submissions
        .into_iter()
        .map(|s| {
            let evaluation = evaluation_map.remove(&s.id);
            SubmissionResponse::from_submission(s, assignment.due_at, evaluation)
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionListResponse { items },
        "查询成功",
    )))
}
