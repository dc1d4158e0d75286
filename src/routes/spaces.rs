use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireIdentity};
use crate::models::actors::entities::ActorRole;
use crate::models::spaces::requests::{
    AssignInstructorRequest, CreateSpaceRequest, EnrollStudentsRequest, UpdateSpaceRequest,
};
use crate::services::SpaceService;

// 懒加载的全局 SpaceService 实例
static SPACE_SERVICE: Lazy<SpaceService> = Lazy::new(SpaceService::new_lazy);

// 创建教学空间
pub async fn create_space(
    req: HttpRequest,
    body: web::Json<CreateSpaceRequest>,
) -> ActixResult<HttpResponse> {
    SPACE_SERVICE.create_space(&req, body.into_inner()).await
}

// 列出教学空间
pub async fn list_spaces(req: HttpRequest) -> ActixResult<HttpResponse> {
    SPACE_SERVICE.list_spaces(&req).await
}

// 获取教学空间详情
pub async fn get_space(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SPACE_SERVICE.get_space(&req, path.into_inner()).await
}

// 更新教学空间
pub async fn update_space(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateSpaceRequest>,
) -> ActixResult<HttpResponse> {
    SPACE_SERVICE
        .update_space(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除教学空间
pub async fn delete_space(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SPACE_SERVICE.delete_space(&req, path.into_inner()).await
}

// 批量加入学生
pub async fn enroll_students(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<EnrollStudentsRequest>,
) -> ActixResult<HttpResponse> {
    SPACE_SERVICE
        .enroll_students(&req, path.into_inner(), body.into_inner())
        .await
}

// 将学生移出名册
pub async fn remove_student(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (space_id, student_id) = path.into_inner();
    SPACE_SERVICE
        .remove_student(&req, space_id, student_id)
        .await
}

// 指派教师
pub async fn assign_instructor(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<AssignInstructorRequest>,
) -> ActixResult<HttpResponse> {
    SPACE_SERVICE
        .assign_instructor(&req, path.into_inner(), body.into_inner())
        .await
}

// 配置路由
pub fn configure_spaces_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/spaces")
            .wrap(RequireIdentity)
            .service(
                web::resource("")
                    // 列出空间 - 所有登录用户可访问
                    .route(web::get().to(list_spaces))
                    // 创建空间 - 仅主任
                    .route(
                        web::post()
                            .to(create_space)
                            .wrap(middlewares::RequireRole::new(&ActorRole::Director)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 获取空间详情 - 所有登录用户可访问
                    .route(web::get().to(get_space))
                    // 更新空间 - 仅主任
                    .route(
                        web::put()
                            .to(update_space)
                            .wrap(middlewares::RequireRole::new(&ActorRole::Director)),
                    )
                    // 删除空间 - 仅主任
                    .route(
                        web::delete()
                            .to(delete_space)
                            .wrap(middlewares::RequireRole::new(&ActorRole::Director)),
                    ),
            )
            // 名册管理 - 仅主任（人员目录本身由外部系统维护）
            .service(
                web::resource("/{id}/students").route(
                    web::post()
                        .to(enroll_students)
                        .wrap(middlewares::RequireRole::new(&ActorRole::Director)),
                ),
            )
            .service(
                web::resource("/{id}/students/{student_id}").route(
                    web::delete()
                        .to(remove_student)
                        .wrap(middlewares::RequireRole::new(&ActorRole::Director)),
                ),
            )
            .service(
                web::resource("/{id}/instructors").route(
                    web::post()
                        .to(assign_instructor)
                        .wrap(middlewares::RequireRole::new(&ActorRole::Director)),
                ),
            ),
    );
}
