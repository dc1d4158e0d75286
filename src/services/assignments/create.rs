use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::AssignmentService;
use crate::middlewares::RequireIdentity;
use crate::models::assignments::entities::{AssignmentKind, AssignmentStatus};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::assignments::responses::AssignmentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取当前调用者
    let actor = match RequireIdentity::extract_actor(request) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取身份信息",
            )));
        }
    };

    // 基本字段校验
    if req.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "作业标题不能为空",
        )));
    }
    if req.instructions.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "作业要求不能为空",
        )));
    }
    if req.opens_at >= req.due_at {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "开放时间必须早于截止时间",
        )));
    }

    // 资源引用只做形状校验，不解释内容
    if let Some(resources) = req.resources.as_deref()
        && let Err(msg) = crate::utils::validate::validate_resource_refs(resources)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 指派名单校验
    let unique: HashSet<i64> = req.assignees.iter().copied().collect();
    if unique.len() != req.assignees.len() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "指派名单中存在重复学生",
        )));
    }
    if !req.kind.assignee_count_ok(req.assignees.len()) {
        let message = match req.kind {
            AssignmentKind::Individual => "个人作业必须恰好指派一名学生",
            AssignmentKind::Collective => "集体作业至少需要两名学生",
        };
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, message)));
    }

    // 空间必须存在
    let space = match storage.get_space_by_id(req.space_id).await {
        Ok(Some(space)) => space,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SpaceNotFound,
                "教学空间不存在",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(e, "查询教学空间失败"));
        }
    };

    // 教师只能在自己任教的空间内发布作业，主任不受限制
    if actor.is_instructor() {
        match storage.is_instructor_of(actor.id, req.space_id).await {
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
    }

    // 指派名单必须是空间名册的子集
    let enrolled: HashSet<i64> = space.students.iter().copied().collect();
    if let Some(outsider) = req.assignees.iter().find(|id| !enrolled.contains(id)) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            format!("学生 {outsider} 不在该空间名册中"),
        )));
    }

    match storage.create_assignment(actor.id, req).await {
        Ok(assignment) => {
            // 新作业必然没有提交，状态从 pending 起步
            let response =
                AssignmentResponse::from_assignment(assignment, AssignmentStatus::Pending);
            Ok(HttpResponse::Created().json(ApiResponse::success(response, "作业创建成功")))
        }
        Err(e) => Ok(storage_error_response(e, "创建作业失败")),
    }
}
