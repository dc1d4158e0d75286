//! 评分存储操作

use super::SeaOrmStorage;
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::entity::submissions::Column as SubmissionColumn;
use crate::errors::{EduSpaceError, Result};
use crate::models::evaluations::entities::Evaluation;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 创建评分
    ///
    /// (submission_id) 的唯一性由数据库唯一索引裁决，
    /// 没有改分入口：评分一经写入不可修改。
    pub async fn create_evaluation_impl(
        &self,
        instructor_id: i64,
        submission_id: i64,
        score: f64,
        comment: Option<String>,
    ) -> Result<Evaluation> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            submission_id: Set(submission_id),
            instructor_id: Set(instructor_id),
            score: Set(score),
            comment: Set(comment),
            evaluated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                EduSpaceError::duplicate("该提交已评分，不能重复评分")
            } else {
                EduSpaceError::database_operation(format!("创建评分失败: {e}"))
            }
        })?;

        Ok(result.into_evaluation())
    }

    /// 通过提交 ID 获取评分
    pub async fn get_evaluation_by_submission_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Evaluation>> {
        let result = Evaluations::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    /// 列出作业下的全部评分
    pub async fn list_evaluations_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Evaluation>> {
        let results = Evaluations::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::evaluations::Relation::Submission.def(),
            )
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::EvaluatedAt)
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询评分列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_evaluation()).collect())
    }
}
