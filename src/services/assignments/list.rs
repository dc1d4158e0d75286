use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, derive_status_map};
use crate::middlewares::RequireIdentity;
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::assignments::requests::AssignmentListParams;
use crate::models::assignments::responses::{AssignmentListResponse, AssignmentResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::{has_space_access, storage_error_response};

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
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

    // 空间必须存在
    match storage.get_space_by_id(query.space_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SpaceNotFound,
                "教学空间不存在",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(e, "查询教学空间失败"));
        }
    }

    match has_space_access(&storage, &actor, query.space_id).await {
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

    let assignments = match storage.list_assignments_by_space(query.space_id).await {
        Ok(assignments) => assignments,
        Err(e) => {
            return Ok(storage_error_response(e, "查询作业列表失败"));
        }
    };

    // 一次取回全部进度计数，再逐个派生状态
    let ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let status_map = match derive_status_map(&storage, &ids).await {
        Ok(map) => map,
        Err(e) => {
            return Ok(storage_error_response(e, "计算作业状态失败"));
        }
    };

    let items: Vec<AssignmentResponse> = assignments
        .into_iter()
        .map(|a| {
            let status = status_map
                .get(&a.id)
                .copied()
                .unwrap_or(AssignmentStatus::Pending);
            AssignmentResponse::from_assignment(a, status)
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentListResponse { items },
        "查询成功",
    )))
}
