use serde::Deserialize;
use ts_rs::TS;

/// 创建评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CreateEvaluationRequest {
    pub submission_id: i64,
    pub score: f64,
    pub comment: Option<String>,
}
