use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireIdentity};
use crate::models::actors::entities::ActorRole;
use crate::models::evaluations::requests::CreateEvaluationRequest;
use crate::services::EvaluationService;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// 创建评分
pub async fn create_evaluation(
    req: HttpRequest,
    body: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .create_evaluation(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_evaluations_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(RequireIdentity)
            .service(
                // 评分 - 仅教师（业务层校验任教关系）
                web::resource("").route(
                    web::post()
                        .to(create_evaluation)
                        .wrap(middlewares::RequireRole::new(&ActorRole::Instructor)),
                ),
            ),
    );
}
