/*!
 * 调用者身份中间件
 *
 * 身份认证由上游网关完成：网关校验会话后在请求头注入
 * `X-Actor-Id` 与 `X-Actor-Role`，本中间件只负责解析并在
 * 请求扩展中放入 `Actor`，缺失或非法时拒绝请求。
 *
 * ## 使用方法
 *
 * 1. 在路由上应用中间件：
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::require_identity::RequireIdentity;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireIdentity)  // 应用身份中间件
 *                 .route("/protected", web::get().to(protected_handler))
 *         )
 * })
 * ```
 *
 * 2. 在处理程序中提取身份信息：
 * ```rust,ignore
 * async fn protected_handler(req: HttpRequest) -> Result<HttpResponse> {
 *     if let Some(actor) = RequireIdentity::extract_actor(&req) {
 *         return Ok(HttpResponse::Ok().json(format!("Actor: {} ({})", actor.id, actor.role)));
 *     }
 *     Ok(HttpResponse::InternalServerError().finish())
 * }
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::str::FromStr;
use tracing::{debug, info};

use crate::models::ErrorCode;
use crate::models::actors::entities::{Actor, ActorRole};

use super::create_error_response;

const ACTOR_ID_HEADER: &str = "X-Actor-Id";
const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";

#[derive(Clone)]
pub struct RequireIdentity;

// 辅助函数：从请求头解析调用者身份
fn extract_identity(req: &ServiceRequest) -> Result<Actor, String> {
    let id = req
        .headers()
        .get(ACTOR_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| format!("Missing {ACTOR_ID_HEADER} header"))?
        .parse::<i64>()
        .map_err(|_| format!("Invalid {ACTOR_ID_HEADER} header"))?;

    let role = req
        .headers()
        .get(ACTOR_ROLE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| format!("Missing {ACTOR_ROLE_HEADER} header"))?;

    let role = ActorRole::from_str(role).map_err(|e| {
        info!("Actor role parsing failed: {}", e);
        format!("Invalid {ACTOR_ROLE_HEADER} header")
    })?;

    Ok(Actor { id, role })
}

impl<S, B> Transform<S, ServiceRequest> for RequireIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireIdentityMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireIdentityMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_identity(&req) {
                Ok(actor) => {
                    debug!(
                        "Identity resolved for actor {} (role: {})",
                        actor.id, actor.role
                    );
                    req.extensions_mut().insert(actor);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Identity resolution failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取身份信息
impl RequireIdentity {
    /// 从请求扩展中提取调用者身份
    /// 此函数应该在应用了RequireIdentity中间件的路由处理程序中使用
    pub fn extract_actor(req: &actix_web::HttpRequest) -> Option<Actor> {
        req.extensions().get::<Actor>().cloned()
    }

    /// 从请求扩展中提取调用者ID
    /// 此函数应该在应用了RequireIdentity中间件的路由处理程序中使用
    pub fn extract_actor_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Actor>().map(|actor| actor.id)
    }

    /// 从请求扩展中提取调用者角色
    /// 此函数应该在应用了RequireIdentity中间件的路由处理程序中使用
    pub fn extract_actor_role(req: &actix_web::HttpRequest) -> Option<ActorRole> {
        req.extensions()
            .get::<Actor>()
            .map(|actor| actor.role.clone())
    }
}
