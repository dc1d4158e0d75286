use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::EduSpaceError;
use crate::middlewares::RequireIdentity;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::submissions::responses::SubmissionResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 学生只能以本人身份提交
    let actor = match RequireIdentity::extract_actor(request) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取身份信息",
            )));
        }
    };

    // 内容和资源不能同时为空
    let content = req.content.filter(|c| !c.trim().is_empty());
    let resources = req.resources.unwrap_or_default();
    if content.is_none() && resources.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "提交内容和资源不能同时为空",
        )));
    }
    if let Err(msg) = crate::utils::validate::validate_resource_refs(&resources) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 获取作业信息
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

    // 提交者必须是被指派学生
    if !assignment.assignees.contains(&actor.id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotAssignee,
            "您未被指派该作业",
        )));
    }

    // 逾期不阻止提交，只在读取时标记 is_late。
    // (assignment, student) 唯一性交给数据库裁决，并发下恰有一次成功。
    match storage
        .create_submission(assignment_id, actor.id, content, resources)
        .await
    {
        Ok(submission) => {
            let response = SubmissionResponse::from_submission(submission, assignment.due_at, None);
            Ok(HttpResponse::Created().json(ApiResponse::success(response, "提交成功")))
        }
        Err(EduSpaceError::Duplicate(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SubmissionAlreadyExists, msg),
        )),
        Err(e) => Ok(storage_error_response(e, "创建提交失败")),
    }
}
