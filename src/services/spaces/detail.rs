use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SpaceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

pub async fn get_space(
    service: &SpaceService,
    request: &HttpRequest,
    space_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_space_by_id(space_id).await {
        Ok(Some(space)) => Ok(HttpResponse::Ok().json(ApiResponse::success(space, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SpaceNotFound,
            "教学空间不存在",
        ))),
        Err(e) => Ok(storage_error_response(e, "查询教学空间失败")),
    }
}
