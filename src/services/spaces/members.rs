use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SpaceService;
use crate::models::spaces::requests::{AssignInstructorRequest, EnrollStudentsRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

/// 批量加入学生
pub async fn enroll_students(
    service: &SpaceService,
    request: &HttpRequest,
    space_id: i64,
    req: EnrollStudentsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.student_ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "学生列表不能为空",
        )));
    }

    match storage.get_space_by_id(space_id).await {
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

    match storage.enroll_students(space_id, req.student_ids).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("学生加入成功"))),
        Err(e) => Ok(storage_error_response(e, "加入学生失败")),
    }
}

/// 将学生移出名册
///
/// 已有的提交与评分不回溯重算，名册变化只影响之后的指派。
pub async fn remove_student(
    service: &SpaceService,
    request: &HttpRequest,
    space_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.remove_student(space_id, student_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("学生已移出"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "该学生不在空间名册中",
        ))),
        Err(e) => Ok(storage_error_response(e, "移出学生失败")),
    }
}

/// 指派教师
pub async fn assign_instructor(
    service: &SpaceService,
    request: &HttpRequest,
    space_id: i64,
    req: AssignInstructorRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_space_by_id(space_id).await {
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

    match storage.assign_instructor(space_id, req.instructor_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("教师指派成功"))),
        Err(e) => Ok(storage_error_response(e, "指派教师失败")),
    }
}
