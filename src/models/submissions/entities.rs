use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    // 唯一 ID
    pub id: i64,
    // 所属作业 ID
    pub assignment_id: i64,
    // 提交学生 ID
    pub student_id: i64,
    // 文本内容（内容和资源不能同时为空）
    pub content: Option<String>,
    // 资源引用（链接或文件标识）
    pub resources: Vec<String>,
    // 提交时间
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// 迟交标记在读取时对照作业截止时间计算，不落库
    pub fn is_late(&self, due_at: chrono::DateTime<chrono::Utc>) -> bool {
        self.submitted_at > due_at
    }
}
