use serde::Deserialize;
use ts_rs::TS;

/// 创建教学空间请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/space.ts")]
pub struct CreateSpaceRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub coefficient: Option<i32>,
}

/// 更新教学空间请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/space.ts")]
pub struct UpdateSpaceRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub coefficient: Option<i32>,
}

/// 批量加入学生请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/space.ts")]
pub struct EnrollStudentsRequest {
    pub student_ids: Vec<i64>,
}

/// 指派教师请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/space.ts")]
pub struct AssignInstructorRequest {
    pub instructor_id: i64,
}
