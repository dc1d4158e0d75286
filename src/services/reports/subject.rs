use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReportService, subject_mean};
use crate::middlewares::RequireIdentity;
use crate::models::actors::entities::ActorRole;
use crate::models::reports::responses::SubjectReportResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

/// 单科成绩报告：某学生在某空间的全部分数与算术均分
pub async fn get_subject_report(
    service: &ReportService,
    request: &HttpRequest,
    student_id: i64,
    space_id: i64,
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

    // 学生只能查看自己的成绩；教师需任教该空间；主任不受限制
    let allowed = match actor.role {
        ActorRole::Director => true,
        ActorRole::Student => actor.id == student_id,
        ActorRole::Instructor => match storage.is_instructor_of(actor.id, space_id).await {
            Ok(allowed) => allowed,
            Err(e) => {
                return Ok(storage_error_response(e, "查询教师名册失败"));
            }
        },
    };
    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有查看该成绩报告的权限",
        )));
    }

    let space = match storage.get_space_by_id(space_id).await {
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

    let scores = match storage
        .list_student_scores_in_space(student_id, space_id)
        .await
    {
        Ok(scores) => scores,
        Err(e) => {
            return Ok(storage_error_response(e, "查询学生成绩失败"));
        }
    };

    // 没有评分时 mean 为 None："暂无成绩"不等于 0 分
    let mean = subject_mean(&scores);
    let response = SubjectReportResponse {
        student_id,
        space_id,
        space_name: space.name,
        coefficient: space.coefficient,
        scores,
        mean,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
