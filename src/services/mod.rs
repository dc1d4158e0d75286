pub mod assignments;
pub mod evaluations;
pub mod reports;
pub mod spaces;
pub mod submissions;

pub use assignments::AssignmentService;
pub use evaluations::EvaluationService;
pub use reports::ReportService;
pub use spaces::SpaceService;
pub use submissions::SubmissionService;

use actix_web::HttpResponse;

use crate::errors::EduSpaceError;
use crate::storage::Storage;
use crate::models::{ApiResponse, ErrorCode};

/// 调用者是否与教学空间存在关系
///
/// 主任可访问任意空间；教师要求任教关系；学生要求在名册中。
pub(crate) async fn has_space_access(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    actor: &crate::models::actors::entities::Actor,
    space_id: i64,
) -> crate::errors::Result<bool> {
    use crate::models::actors::entities::ActorRole;

    match actor.role {
        ActorRole::Director => Ok(true),
        ActorRole::Instructor => storage.is_instructor_of(actor.id, space_id).await,
        ActorRole::Student => storage.is_student_enrolled(space_id, actor.id).await,
    }
}

/// 存储层错误到 HTTP 响应的统一映射
///
/// Duplicate 由具体操作自行映射（需要区分提交冲突与评分冲突），
/// 其余错误种类在这里统一收口。
pub(crate) fn storage_error_response(e: EduSpaceError, context: &str) -> HttpResponse {
    match e {
        EduSpaceError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                msg,
            ))
        }
        EduSpaceError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        EduSpaceError::Duplicate(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg))
        }
        EduSpaceError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg))
        }
        other => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("{context}: {other}"),
        )),
    }
}
