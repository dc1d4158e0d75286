use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/space.ts")]
pub struct Space {
    // 唯一 ID
    pub id: i64,
    // 科目名称
    pub name: String,
    // 科目代码
    pub code: String,
    // 描述
    pub description: Option<String>,
    // 成绩权重系数（>= 1）
    pub coefficient: i32,
    // 选课学生 ID 列表
    pub students: Vec<i64>,
    // 任课教师 ID 列表
    pub instructors: Vec<i64>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
