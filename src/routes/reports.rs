use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireIdentity;
use crate::services::ReportService;

// 懒加载的全局 ReportService 实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

// 单科成绩报告
pub async fn get_subject_report(
    req: HttpRequest,
    path: web::Path<(i64, i64)>, // (student_id, space_id)
) -> ActixResult<HttpResponse> {
    let (student_id, space_id) = path.into_inner();
    REPORT_SERVICE
        .get_subject_report(&req, student_id, space_id)
        .await
}

// 总成绩报告
pub async fn get_overall_report(
    req: HttpRequest,
    path: web::Path<i64>, // student_id
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .get_overall_report(&req, path.into_inner())
        .await
}

// 教学空间统计
pub async fn get_space_statistics(
    req: HttpRequest,
    path: web::Path<i64>, // space_id
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .get_space_statistics(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_reports_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .wrap(RequireIdentity)
            // 访问控制都在业务层：学生只能看自己，教师看任教空间，主任不受限
            .service(
                web::resource("/students/{student_id}/spaces/{space_id}")
                    .route(web::get().to(get_subject_report)),
            )
            .service(
                web::resource("/students/{student_id}").route(web::get().to(get_overall_report)),
            )
            .service(web::resource("/spaces/{space_id}").route(web::get().to(get_space_statistics))),
    );
}
