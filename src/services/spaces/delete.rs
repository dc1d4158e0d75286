use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SpaceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

pub async fn delete_space(
    service: &SpaceService,
    request: &HttpRequest,
    space_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 删除会连同空间内的作业、提交、评分与名册一并移除（单一事务）
    match storage.delete_space(space_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("教学空间已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SpaceNotFound,
            "教学空间不存在",
        ))),
        Err(e) => Ok(storage_error_response(e, "删除教学空间失败")),
    }
}
