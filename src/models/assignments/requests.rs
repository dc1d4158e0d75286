use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::assignments::entities::AssignmentKind;

/// 创建作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub space_id: i64,
    pub title: String,
    pub instructions: String,
    pub kind: AssignmentKind,
    pub opens_at: DateTime<Utc>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub due_at: DateTime<Utc>,   // ISO 8601 格式
    pub resources: Option<Vec<String>>, // 链接或文件标识列表
    pub assignees: Vec<i64>,
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    pub space_id: i64,
}
