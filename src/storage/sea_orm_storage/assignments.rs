//! 作业存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::assignment_assignees::{
    ActiveModel as AssigneeActiveModel, Column as AssigneeColumn, Entity as AssignmentAssignees,
};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{EduSpaceError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::storage::AssignmentProgress;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业（作业记录与指派名单同一事务写入）
    pub async fn create_assignment_impl(
        &self,
        instructor_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let resources_json = match req.resources.as_ref() {
            Some(resources) if !resources.is_empty() => Some(serde_json::to_string(resources)?),
            _ => None,
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            space_id: Set(req.space_id),
            instructor_id: Set(instructor_id),
            title: Set(req.title),
            instructions: Set(req.instructions),
            kind: Set(req.kind.to_string()),
            opens_at: Set(req.opens_at.timestamp()),
            due_at: Set(req.due_at.timestamp()),
            resources: Set(resources_json),
            created_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("创建作业失败: {e}")))?;

        let assignee_models: Vec<AssigneeActiveModel> = req
            .assignees
            .iter()
            .map(|student_id| AssigneeActiveModel {
                assignment_id: Set(inserted.id),
                student_id: Set(*student_id),
                ..Default::default()
            })
            .collect();

        AssignmentAssignees::insert_many(assignee_models)
            .exec(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("写入作业指派失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(inserted.into_assignment(req.assignees))
    }

    /// 通过 ID 获取作业（含指派名单）
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询作业失败: {e}")))?;

        match result {
            Some(model) => {
                let assignees = self.list_assignees_impl(assignment_id).await?;
                Ok(Some(model.into_assignment(assignees)))
            }
            None => Ok(None),
        }
    }

    /// 列出空间内的作业
    pub async fn list_assignments_by_space_impl(&self, space_id: i64) -> Result<Vec<Assignment>> {
        let models = Assignments::find()
            .filter(Column::SpaceId.eq(space_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询作业列表失败: {e}")))?;

        self.attach_assignees(models).await
    }

    /// 列出多个空间内的作业
    pub async fn list_assignments_by_spaces_impl(
        &self,
        space_ids: &[i64],
    ) -> Result<Vec<Assignment>> {
        if space_ids.is_empty() {
            return Ok(vec![]);
        }

        let models = Assignments::find()
            .filter(Column::SpaceId.is_in(space_ids.to_vec()))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询作业列表失败: {e}")))?;

        self.attach_assignees(models).await
    }

    /// 列出指派给某学生的作业
    pub async fn list_assignments_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let assignment_ids: Vec<i64> = AssignmentAssignees::find()
            .filter(AssigneeColumn::StudentId.eq(student_id))
            .select_only()
            .column(AssigneeColumn::AssignmentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询作业指派失败: {e}")))?;

        if assignment_ids.is_empty() {
            return Ok(vec![]);
        }

        let models = Assignments::find()
            .filter(Column::Id.is_in(assignment_ids))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询作业列表失败: {e}")))?;

        self.attach_assignees(models).await
    }

    /// 删除作业（指派、提交、评分一并删除，单一事务，不留孤儿记录）
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("开启事务失败: {e}")))?;

        let submission_ids: Vec<i64> = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .select_only()
            .column(SubmissionColumn::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询提交失败: {e}")))?;

        if !submission_ids.is_empty() {
            Evaluations::delete_many()
                .filter(EvaluationColumn::SubmissionId.is_in(submission_ids))
                .exec(&txn)
                .await
                .map_err(|e| EduSpaceError::database_operation(format!("删除评分失败: {e}")))?;
        }

        Submissions::delete_many()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .exec(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("删除提交失败: {e}")))?;

        AssignmentAssignees::delete_many()
            .filter(AssigneeColumn::AssignmentId.eq(assignment_id))
            .exec(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("删除作业指派失败: {e}")))?;

        let result = Assignments::delete_by_id(assignment_id)
            .exec(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 查询作业进度计数
    ///
    /// 状态的"计算视图"：从指派/提交/评分三张表现场聚合，
    /// 每次读取重新计算，不存在可以过期的缓存列。
    pub async fn get_assignment_progress_impl(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<AssignmentProgress>> {
        if assignment_ids.is_empty() {
            return Ok(vec![]);
        }

        // 1. 指派计数
        let assignee_rows = AssignmentAssignees::find()
            .filter(AssigneeColumn::AssignmentId.is_in(assignment_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询作业指派失败: {e}")))?;

        let mut assignee_counts: HashMap<i64, usize> = HashMap::new();
        for row in &assignee_rows {
            *assignee_counts.entry(row.assignment_id).or_default() += 1;
        }

        // 2. 提交计数（(assignment, student) 唯一，行数即已提交学生数）
        let submission_rows = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询提交失败: {e}")))?;

        let mut submitted_counts: HashMap<i64, usize> = HashMap::new();
        let mut submission_to_assignment: HashMap<i64, i64> = HashMap::new();
        for row in &submission_rows {
            *submitted_counts.entry(row.assignment_id).or_default() += 1;
            submission_to_assignment.insert(row.id, row.assignment_id);
        }

        // 3. 评分计数
        let mut evaluated_counts: HashMap<i64, usize> = HashMap::new();
        if !submission_to_assignment.is_empty() {
            let submission_ids: Vec<i64> = submission_to_assignment.keys().copied().collect();
            let evaluated_submission_ids: Vec<i64> = Evaluations::find()
                .filter(EvaluationColumn::SubmissionId.is_in(submission_ids))
                .select_only()
                .column(EvaluationColumn::SubmissionId)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| EduSpaceError::database_operation(format!("查询评分失败: {e}")))?;

            for submission_id in evaluated_submission_ids {
                if let Some(assignment_id) = submission_to_assignment.get(&submission_id) {
                    *evaluated_counts.entry(*assignment_id).or_default() += 1;
                }
            }
        }

        // 去重后保序组装
        let mut seen: HashSet<i64> = HashSet::new();
        Ok(assignment_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .map(|id| AssignmentProgress {
                assignment_id: *id,
                assignee_count: assignee_counts.get(id).copied().unwrap_or(0),
                submitted_count: submitted_counts.get(id).copied().unwrap_or(0),
                evaluated_count: evaluated_counts.get(id).copied().unwrap_or(0),
            })
            .collect())
    }

    /// 作业的指派学生 ID 列表
    pub async fn list_assignees_impl(&self, assignment_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = AssignmentAssignees::find()
            .filter(AssigneeColumn::AssignmentId.eq(assignment_id))
            .select_only()
            .column(AssigneeColumn::StudentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询作业指派失败: {e}")))?;

        Ok(ids)
    }

    // 批量装配指派名单
    async fn attach_assignees(
        &self,
        models: Vec<crate::entity::assignments::Model>,
    ) -> Result<Vec<Assignment>> {
        if models.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let assignee_rows = AssignmentAssignees::find()
            .filter(AssigneeColumn::AssignmentId.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询作业指派失败: {e}")))?;

        let mut by_assignment: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in assignee_rows {
            by_assignment
                .entry(row.assignment_id)
                .or_default()
                .push(row.student_id);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let assignees = by_assignment.remove(&m.id).unwrap_or_default();
                m.into_assignment(assignees)
            })
            .collect())
    }
}
