use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SpaceService;
use crate::models::ApiResponse;
use crate::storage::Storage;
use crate::services::storage_error_response;

pub async fn list_spaces(
    service: &SpaceService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_spaces().await {
        Ok(spaces) => Ok(HttpResponse::Ok().json(ApiResponse::success(spaces, "查询成功"))),
        Err(e) => Ok(storage_error_response(e, "查询教学空间列表失败")),
    }
}
