use serde::Deserialize;
use ts_rs::TS;

/// 创建提交请求（作业 ID 来自路径）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub content: Option<String>,
    pub resources: Option<Vec<String>>,
}
