use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, derive_status_for};
use crate::middlewares::RequireIdentity;
use crate::models::assignments::responses::AssignmentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::{has_space_access, storage_error_response};

pub async fn get_assignment(
    service: &AssignmentService,
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

    // 只有空间成员可以查看
    match has_space_access(&storage, &actor, assignment.space_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::SpacePermissionDenied,
                "您不是该教学空间的成员",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(e, "查询空间名册失败"));
        }
    }

    // 状态现算，不读任何缓存列
    let status = match derive_status_for(&storage, assignment_id).await {
        Ok(status) => status,
        Err(e) => {
            return Ok(storage_error_response(e, "计算作业状态失败"));
        }
    };

    let response = AssignmentResponse::from_assignment(assignment, status);
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
