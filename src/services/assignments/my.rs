use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, derive_status_map};
use crate::middlewares::RequireIdentity;
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::assignments::responses::{AssignmentListResponse, AssignmentResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

/// 学生视角：列出指派给自己的作业
pub async fn list_my_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
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

    let assignments = match storage.list_assignments_for_student(actor.id).await {
        Ok(assignments) => assignments,
        Err(e) => {
            return Ok(storage_error_response(e, "查询作业列表失败"));
        }
    };

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
