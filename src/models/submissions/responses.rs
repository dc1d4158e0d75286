use serde::Serialize;
use ts_rs::TS;

use crate::models::submissions::entities::Submission;

/// 提交中的评分信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionEvaluationInfo {
    pub score: f64,
    pub comment: Option<String>,
    pub evaluated_at: String,
}

/// 提交响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    pub resources: Vec<String>,
    pub submitted_at: String,
    /// 迟交标记：提交时间晚于作业截止时间（读取时计算）
    pub is_late: bool,
    pub evaluation: Option<SubmissionEvaluationInfo>,
}

impl SubmissionResponse {
    pub fn from_submission(
        submission: Submission,
        due_at: chrono::DateTime<chrono::Utc>,
        evaluation: Option<SubmissionEvaluationInfo>,
    ) -> Self {
        let is_late = submission.is_late(due_at);
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            student_id: submission.student_id,
            content: submission.content,
            resources: submission.resources,
            submitted_at: submission.submitted_at.to_rfc3339(),
            is_late,
            evaluation,
        }
    }
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionResponse>,
}
