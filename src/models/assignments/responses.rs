use serde::Serialize;
use ts_rs::TS;

use crate::models::assignments::entities::{Assignment, AssignmentKind, AssignmentStatus};

/// 作业响应（带派生状态）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentResponse {
    pub id: i64,
    pub space_id: i64,
    pub instructor_id: i64,
    pub title: String,
    pub instructions: String,
    pub kind: AssignmentKind,
    pub opens_at: String,
    pub due_at: String,
    pub resources: Vec<String>,
    pub assignees: Vec<i64>,
    /// 派生状态：每次读取时根据提交/评分现状重新计算
    pub status: AssignmentStatus,
    /// 逾期标记（展示用，不影响状态）
    pub is_overdue: bool,
    pub created_at: String,
}

impl AssignmentResponse {
    pub fn from_assignment(assignment: Assignment, status: AssignmentStatus) -> Self {
        let is_overdue = assignment.is_overdue(chrono::Utc::now());
        Self {
            id: assignment.id,
            space_id: assignment.space_id,
            instructor_id: assignment.instructor_id,
            title: assignment.title,
            instructions: assignment.instructions,
            kind: assignment.kind,
            opens_at: assignment.opens_at.to_rfc3339(),
            due_at: assignment.due_at.to_rfc3339(),
            resources: assignment.resources,
            assignees: assignment.assignees,
            status,
            is_overdue,
            created_at: assignment.created_at.to_rfc3339(),
        }
    }
}

/// 作业列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<AssignmentResponse>,
}
