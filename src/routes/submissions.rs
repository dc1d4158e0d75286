use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireIdentity};
use crate::models::actors::entities::ActorRole;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 创建提交
pub async fn create_submission(
    req: HttpRequest,
    path: web::Path<i64>, // assignment_id
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, path.into_inner(), body.into_inner())
        .await
}

// 列出作业的全部提交（教师审阅）
pub async fn list_submissions(
    req: HttpRequest,
    path: web::Path<i64>, // assignment_id
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, path.into_inner())
        .await
}

// 获取我的提交
pub async fn get_my_submission(
    req: HttpRequest,
    path: web::Path<i64>, // assignment_id
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_my_submission(&req, path.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    // 作业相关的提交路由
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/submissions")
            .wrap(RequireIdentity)
            // 我的提交 - 仅学生
            .service(
                web::resource("/my")
                    .route(web::get().to(get_my_submission))
                    .wrap(middlewares::RequireRole::new(&ActorRole::Student)),
            )
            .service(
                web::resource("")
                    // 提交列表 - 任课教师或主任（业务层校验）
                    .route(web::get().to(list_submissions))
                    // 提交作业 - 仅学生本人
                    .route(
                        web::post()
                            .to(create_submission)
                            .wrap(middlewares::RequireRole::new(&ActorRole::Student)),
                    ),
            ),
    );

    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(RequireIdentity)
            .route("/{id}", web::get().to(get_submission)),
    );
}
