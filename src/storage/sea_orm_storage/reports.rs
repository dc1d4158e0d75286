//! 成绩聚合查询
//!
//! 报告是纯派生值：这里只负责取出分数，均值计算在服务层集中完成。

use super::SeaOrmStorage;
use crate::entity::assignments::Column as AssignmentColumn;
use crate::entity::evaluations::{Column, Entity as Evaluations};
use crate::entity::submissions::Column as SubmissionColumn;
use crate::errors::{EduSpaceError, Result};
use sea_orm::{ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait};

impl SeaOrmStorage {
    /// 某学生在某空间的全部评分分数（按评分时间排序）
    pub async fn list_student_scores_in_space_impl(
        &self,
        student_id: i64,
        space_id: i64,
    ) -> Result<Vec<f64>> {
        let scores: Vec<f64> = Evaluations::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::evaluations::Relation::Submission.def(),
            )
            .join(
                JoinType::InnerJoin,
                crate::entity::submissions::Relation::Assignment.def(),
            )
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .filter(AssignmentColumn::SpaceId.eq(space_id))
            .order_by_asc(Column::EvaluatedAt)
            .select_only()
            .column(Column::Score)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(scores)
    }

    /// 某空间的全部评分分数
    pub async fn list_space_scores_impl(&self, space_id: i64) -> Result<Vec<f64>> {
        let scores: Vec<f64> = Evaluations::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::evaluations::Relation::Submission.def(),
            )
            .join(
                JoinType::InnerJoin,
                crate::entity::submissions::Relation::Assignment.def(),
            )
            .filter(AssignmentColumn::SpaceId.eq(space_id))
            .select_only()
            .column(Column::Score)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询空间成绩失败: {e}")))?;

        Ok(scores)
    }
}
