use serde::Serialize;
use ts_rs::TS;

use crate::models::evaluations::entities::Evaluation;

/// 评分响应（附带提交上下文，方便前端直接展示）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationResponse {
    pub id: i64,
    pub submission_id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub instructor_id: i64,
    pub score: f64,
    pub comment: Option<String>,
    pub evaluated_at: String,
}

impl EvaluationResponse {
    pub fn from_evaluation(evaluation: Evaluation, assignment_id: i64, student_id: i64) -> Self {
        Self {
            id: evaluation.id,
            submission_id: evaluation.submission_id,
            assignment_id,
            student_id,
            instructor_id: evaluation.instructor_id,
            score: evaluation.score,
            comment: evaluation.comment,
            evaluated_at: evaluation.evaluated_at.to_rfc3339(),
        }
    }
}
