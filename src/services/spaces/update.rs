use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SpaceService;
use crate::models::spaces::requests::UpdateSpaceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

pub async fn update_space(
    service: &SpaceService,
    request: &HttpRequest,
    space_id: i64,
    req: UpdateSpaceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(name) = req.name.as_deref()
        && name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "科目名称不能为空",
        )));
    }
    if let Some(code) = req.code.as_deref()
        && code.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "科目代码不能为空",
        )));
    }
    if let Some(coefficient) = req.coefficient
        && coefficient < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "系数必须大于等于 1",
        )));
    }

    match storage.update_space(space_id, req).await {
        Ok(Some(space)) => Ok(HttpResponse::Ok().json(ApiResponse::success(space, "更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SpaceNotFound,
            "教学空间不存在",
        ))),
        Err(e) => Ok(storage_error_response(e, "更新教学空间失败")),
    }
}
