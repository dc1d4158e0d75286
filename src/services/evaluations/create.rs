use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::errors::EduSpaceError;
use crate::middlewares::RequireIdentity;
use crate::models::evaluations::entities::{SCORE_MAX, SCORE_MIN, score_in_range};
use crate::models::evaluations::requests::CreateEvaluationRequest;
use crate::models::evaluations::responses::EvaluationResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

pub async fn create_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    req: CreateEvaluationRequest,
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

    // 分数范围校验，[0, 20] 闭区间
    if !score_in_range(req.score) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ScoreOutOfRange,
            format!("分数必须在 {SCORE_MIN} 到 {SCORE_MAX} 之间"),
        )));
    }

    // 提交必须存在
    let submission = match storage.get_submission_by_id(req.submission_id).await {
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

    // 定位所属作业以确定空间
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

    // 教师只能评阅自己任教空间内的提交
    match storage.is_instructor_of(actor.id, assignment.space_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::SpacePermissionDenied,
                "您未任教该教学空间",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(e, "查询教师名册失败"));
        }
    }

    // 唯一性由数据库裁决；评分一经写入立即对成绩聚合可见，
    // 作业状态在下一次读取时重新派生，无需在此处写回任何列。
    match storage
        .create_evaluation(actor.id, req.submission_id, req.score, req.comment)
        .await
    {
        Ok(evaluation) => {
            let response = EvaluationResponse::from_evaluation(
                evaluation,
                submission.assignment_id,
                submission.student_id,
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(response, "评分成功")))
        }
        Err(EduSpaceError::Duplicate(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::EvaluationAlreadyExists, msg),
        )),
        Err(e) => Ok(storage_error_response(e, "创建评分失败")),
    }
}
