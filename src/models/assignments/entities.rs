use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业类型
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentKind {
    Individual, // 个人作业：恰好一名被指派学生
    Collective, // 集体作业：至少两名被指派学生，各自独立提交、独立评分
}

impl AssignmentKind {
    pub const INDIVIDUAL: &'static str = "individual";
    pub const COLLECTIVE: &'static str = "collective";

    /// 指派人数是否满足作业类型要求：个人恰好 1 人，集体至少 2 人
    pub fn assignee_count_ok(&self, count: usize) -> bool {
        match self {
            AssignmentKind::Individual => count == 1,
            AssignmentKind::Collective => count >= 2,
        }
    }
}

impl<'de> Deserialize<'de> for AssignmentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AssignmentKind::INDIVIDUAL => Ok(AssignmentKind::Individual),
            AssignmentKind::COLLECTIVE => Ok(AssignmentKind::Collective),
            _ => Err(serde::de::Error::custom(format!(
                "无效的作业类型: '{s}'. 支持的类型: individual, collective"
            ))),
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentKind::Individual => write!(f, "{}", AssignmentKind::INDIVIDUAL),
            AssignmentKind::Collective => write!(f, "{}", AssignmentKind::COLLECTIVE),
        }
    }
}

impl std::str::FromStr for AssignmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(AssignmentKind::Individual),
            "collective" => Ok(AssignmentKind::Collective),
            _ => Err(format!("Invalid assignment kind: {s}")),
        }
    }
}

// 作业状态（派生值，任何地方都不落库）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Pending,
    Submitted,
    Evaluated,
}

impl AssignmentStatus {
    /// 从当前提交/评分状态派生作业状态。
    ///
    /// - `evaluated`：每名被指派学生都有提交，且每份提交都已评分；
    /// - `submitted`：至少一份提交，且不满足 `evaluated` 条件；
    /// - `pending`：其余情况。逾期无提交的作业永远停留在 `pending`，
    ///   逾期只是展示层的标记，不是状态。
    ///
    /// `submitted_count` 为已提交的被指派学生数（提交写入时已校验
    /// 提交者必须是被指派学生），`evaluated_count` 为其中已评分的提交数。
    pub fn derive(assignee_count: usize, submitted_count: usize, evaluated_count: usize) -> Self {
        if assignee_count > 0
            && submitted_count == assignee_count
            && evaluated_count == submitted_count
        {
            AssignmentStatus::Evaluated
        } else if submitted_count > 0 {
            AssignmentStatus::Submitted
        } else {
            AssignmentStatus::Pending
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Pending => write!(f, "pending"),
            AssignmentStatus::Submitted => write!(f, "submitted"),
            AssignmentStatus::Evaluated => write!(f, "evaluated"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属教学空间 ID
    pub space_id: i64,
    // 发布教师 ID
    pub instructor_id: i64,
    // 标题
    pub title: String,
    // 作业要求
    pub instructions: String,
    // 作业类型
    pub kind: AssignmentKind,
    // 开放时间
    pub opens_at: chrono::DateTime<chrono::Utc>,
    // 截止时间
    pub due_at: chrono::DateTime<chrono::Utc>,
    // 附件资源引用（链接或文件标识，不解释内容）
    pub resources: Vec<String>,
    // 被指派学生 ID 列表
    pub assignees: Vec<i64>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 是否已过截止时间
    pub fn is_overdue(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now > self.due_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_pending_without_submissions() {
        assert_eq!(
            AssignmentStatus::derive(3, 0, 0),
            AssignmentStatus::Pending
        );
        // 逾期无提交也仍然是 pending，状态不关心时间
        assert_eq!(
            AssignmentStatus::derive(1, 0, 0),
            AssignmentStatus::Pending
        );
    }

    #[test]
    fn test_derive_submitted_with_partial_submissions() {
        assert_eq!(
            AssignmentStatus::derive(3, 1, 0),
            AssignmentStatus::Submitted
        );
        assert_eq!(
            AssignmentStatus::derive(3, 2, 2),
            AssignmentStatus::Submitted
        );
    }

    #[test]
    fn test_derive_submitted_until_every_submission_evaluated() {
        assert_eq!(
            AssignmentStatus::derive(2, 2, 1),
            AssignmentStatus::Submitted
        );
    }

    #[test]
    fn test_derive_evaluated_requires_every_assignee() {
        // 全员提交且全部评分
        assert_eq!(
            AssignmentStatus::derive(2, 2, 2),
            AssignmentStatus::Evaluated
        );
        // 三人指派、两人提交并评分：仍然 submitted，
        // evaluated 要求的是每名被指派学生，而不是每名提交者
        assert_eq!(
            AssignmentStatus::derive(3, 2, 2),
            AssignmentStatus::Submitted
        );
    }

    #[test]
    fn test_derive_is_deterministic() {
        let first = AssignmentStatus::derive(5, 3, 1);
        let second = AssignmentStatus::derive(5, 3, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_assignee_count_rules() {
        assert!(AssignmentKind::Individual.assignee_count_ok(1));
        assert!(!AssignmentKind::Individual.assignee_count_ok(0));
        assert!(!AssignmentKind::Individual.assignee_count_ok(2));

        assert!(AssignmentKind::Collective.assignee_count_ok(2));
        assert!(AssignmentKind::Collective.assignee_count_ok(5));
        assert!(!AssignmentKind::Collective.assignee_count_ok(1));
        assert!(!AssignmentKind::Collective.assignee_count_ok(0));
    }

    #[test]
    fn test_kind_round_trip() {
        use std::str::FromStr;
        assert_eq!(
            AssignmentKind::from_str("individual").unwrap(),
            AssignmentKind::Individual
        );
        assert_eq!(
            AssignmentKind::from_str("collective").unwrap(),
            AssignmentKind::Collective
        );
        assert!(AssignmentKind::from_str("group").is_err());
    }
}
