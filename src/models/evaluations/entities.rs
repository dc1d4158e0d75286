use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 分数下限
pub const SCORE_MIN: f64 = 0.0;
/// 分数上限（法国 20 分制）
pub const SCORE_MAX: f64 = 20.0;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    // 唯一 ID
    pub id: i64,
    // 所属提交 ID（一次提交至多一条评分）
    pub submission_id: i64,
    // 评分教师 ID
    pub instructor_id: i64,
    // 分数，闭区间 [0, 20]
    pub score: f64,
    // 评语
    pub comment: Option<String>,
    // 评分时间
    pub evaluated_at: chrono::DateTime<chrono::Utc>,
}

/// 校验分数是否在 [0, 20] 闭区间内
pub fn score_in_range(score: f64) -> bool {
    (SCORE_MIN..=SCORE_MAX).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds_are_inclusive() {
        assert!(score_in_range(0.0));
        assert!(score_in_range(20.0));
        assert!(score_in_range(15.5));
    }

    #[test]
    fn test_score_out_of_range() {
        assert!(!score_in_range(-0.1));
        assert!(!score_in_range(20.1));
        assert!(!score_in_range(f64::NAN));
    }
}
