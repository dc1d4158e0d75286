use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 业务错误码
//
// 按 HTTP 语义分段：400xx 请求/校验错误，401xx 未认证，403xx 权限不足，
// 404xx 资源不存在，409xx 唯一性冲突，500xx 服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    ValidationFailed = 40001,
    ScoreOutOfRange = 40002,

    Unauthorized = 40100,

    Forbidden = 40300,
    SpacePermissionDenied = 40301,
    NotAssignee = 40302,

    NotFound = 40400,
    SpaceNotFound = 40401,
    AssignmentNotFound = 40402,
    SubmissionNotFound = 40403,
    EvaluationNotFound = 40404,

    Conflict = 40900,
    SubmissionAlreadyExists = 40901,
    EvaluationAlreadyExists = 40902,

    InternalServerError = 50000,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values_are_stable() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::ValidationFailed as i32, 40001);
        assert_eq!(ErrorCode::SubmissionAlreadyExists as i32, 40901);
        assert_eq!(ErrorCode::EvaluationAlreadyExists as i32, 40902);
        assert_eq!(ErrorCode::InternalServerError as i32, 50000);
    }
}
