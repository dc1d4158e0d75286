use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReportService, subject_mean, weighted_mean};
use crate::middlewares::RequireIdentity;
use crate::models::actors::entities::ActorRole;
use crate::models::reports::responses::{OverallReportResponse, SubjectReportResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::services::storage_error_response;

/// 总成绩报告：逐空间出单科报告，再按系数加权
pub async fn get_overall_report(
    service: &ReportService,
    request: &HttpRequest,
    student_id: i64,
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

    // 总报告跨越学生的全部空间：学生本人或主任可见
    let allowed = match actor.role {
        ActorRole::Director => true,
        ActorRole::Student => actor.id == student_id,
        ActorRole::Instructor => false,
    };
    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有查看该成绩报告的权限",
        )));
    }

    let spaces = match storage.list_student_spaces(student_id).await {
        Ok(spaces) => spaces,
        Err(e) => {
            return Ok(storage_error_response(e, "查询所属空间失败"));
        }
    };

    let mut subjects = Vec::with_capacity(spaces.len());
    let mut graded_pairs: Vec<(f64, i32)> = Vec::new();

    for space in spaces {
        let scores = match storage
            .list_student_scores_in_space(student_id, space.id)
            .await
        {
            Ok(scores) => scores,
            Err(e) => {
                return Ok(storage_error_response(e, "查询学生成绩失败"));
            }
        };

        let mean = subject_mean(&scores);
        // 没有成绩的空间不进入加权：既不计分子也不计分母
        if let Some(mean) = mean {
            graded_pairs.push((mean, space.coefficient));
        }

        subjects.push(SubjectReportResponse {
            student_id,
            space_id: space.id,
            space_name: space.name,
            coefficient: space.coefficient,
            scores,
            mean,
        });
    }

    let response = OverallReportResponse {
        student_id,
        subjects,
        overall_mean: weighted_mean(&graded_pairs),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
