use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReportService, subject_mean};
use crate::middlewares::RequireIdentity;
use crate::models::actors::entities::ActorRole;
use crate::models::reports::responses::SpaceStatisticsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

/// 教学空间成绩统计：评分数量、均分、最低分、最高分
pub async fn get_space_statistics(
    service: &ReportService,
    request: &HttpRequest,
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

    let allowed = match actor.role {
        ActorRole::Director => true,
        ActorRole::Instructor => match storage.is_instructor_of(actor.id, space_id).await {
            Ok(allowed) => allowed,
            Err(e) => {
                return Ok(storage_error_response(e, "查询教师名册失败"));
            }
        },
        ActorRole::Student => false,
    };
    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::SpacePermissionDenied,
            "只有任课教师可以查看空间统计",
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

    let scores = match storage.list_space_scores(space_id).await {
        Ok(scores) => scores,
        Err(e) => {
            return Ok(storage_error_response(e, "查询空间成绩失败"));
        }
    };

    let min = scores.iter().copied().fold(None, |acc: Option<f64>, s| {
        Some(acc.map_or(s, |m| m.min(s)))
    });
    let max = scores.iter().copied().fold(None, |acc: Option<f64>, s| {
        Some(acc.map_or(s, |m| m.max(s)))
    });

    let response = SpaceStatisticsResponse {
        space_id,
        space_name: space.name,
        evaluated_count: scores.len() as i64,
        mean: subject_mean(&scores),
        min,
        max,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
