use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireIdentity};
use crate::models::actors::entities::ActorRole;
use crate::models::assignments::requests::{AssignmentListParams, CreateAssignmentRequest};
use crate::services::AssignmentService;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出空间内的作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, body.into_inner())
        .await
}

// 获取作业详情（状态现算）
pub async fn get_assignment(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, path.into_inner())
        .await
}

// 删除作业（级联删除提交与评分）
pub async fn delete_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, path.into_inner())
        .await
}

// 学生视角：指派给我的作业
pub async fn list_my_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_my_assignments(&req).await
}

// 教师视角：待评队列
pub async fn list_pending_evaluation(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_pending_evaluation(&req).await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(RequireIdentity)
            .service(
                web::resource("")
                    // 列出作业 - 空间成员（业务层校验成员资格）
                    .route(web::get().to(list_assignments))
                    // 创建作业 - 仅教师和主任
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(middlewares::RequireRole::new_any(
                                ActorRole::instructor_roles(),
                            )),
                    ),
            )
            // 学生的作业列表 - 仅学生
            .service(
                web::resource("/my")
                    .route(web::get().to(list_my_assignments))
                    .wrap(middlewares::RequireRole::new(&ActorRole::Student)),
            )
            // 待评队列 - 仅教师
            .service(
                web::resource("/pending-evaluation")
                    .route(web::get().to(list_pending_evaluation))
                    .wrap(middlewares::RequireRole::new(&ActorRole::Instructor)),
            )
            .service(
                web::resource("/{id}")
                    // 获取作业详情 - 空间成员（业务层校验成员资格）
                    .route(web::get().to(get_assignment))
                    // 删除作业 - 仅教师和主任（业务层校验发布者）
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(middlewares::RequireRole::new_any(
                                ActorRole::instructor_roles(),
                            )),
                    ),
            ),
    );
}
