use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SpaceService;
use crate::models::spaces::requests::CreateSpaceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

pub async fn create_space(
    service: &SpaceService,
    request: &HttpRequest,
    req: CreateSpaceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "科目名称不能为空",
        )));
    }
    if req.code.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "科目代码不能为空",
        )));
    }
    // 系数必须是正整数
    if let Some(coefficient) = req.coefficient
        && coefficient < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "系数必须大于等于 1",
        )));
    }

    match storage.create_space(req).await {
        Ok(space) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(space, "教学空间创建成功")))
        }
        Err(e) => Ok(storage_error_response(e, "创建教学空间失败")),
    }
}
