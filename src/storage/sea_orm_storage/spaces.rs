//! 教学空间与名册存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignment_assignees::{
    Column as AssigneeColumn, Entity as AssignmentAssignees,
};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::space_instructors::{
    ActiveModel as SpaceInstructorActiveModel, Column as InstructorColumn,
    Entity as SpaceInstructors,
};
use crate::entity::space_students::{
    ActiveModel as SpaceStudentActiveModel, Column as StudentColumn, Entity as SpaceStudents,
};
use crate::entity::spaces::{ActiveModel, Column, Entity as Spaces, Model as SpaceModel};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{EduSpaceError, Result};
use crate::models::spaces::{
    entities::Space,
    requests::{CreateSpaceRequest, UpdateSpaceRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建教学空间
    pub async fn create_space_impl(&self, req: CreateSpaceRequest) -> Result<Space> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            description: Set(req.description),
            coefficient: Set(req.coefficient.unwrap_or(1)),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("创建教学空间失败: {e}")))?;

        Ok(self.assemble_space(result, vec![], vec![]))
    }

    /// 通过 ID 获取教学空间（含名册）
    pub async fn get_space_by_id_impl(&self, space_id: i64) -> Result<Option<Space>> {
        let result = Spaces::find_by_id(space_id)
            .one(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询教学空间失败: {e}")))?;

        match result {
            Some(model) => {
                let students = self.list_enrolled_students_impl(space_id).await?;
                let instructors = self.list_space_instructors_impl(space_id).await?;
                Ok(Some(self.assemble_space(model, students, instructors)))
            }
            None => Ok(None),
        }
    }

    /// 列出全部教学空间（含名册）
    pub async fn list_spaces_impl(&self) -> Result<Vec<Space>> {
        let models = Spaces::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询教学空间列表失败: {e}")))?;

        // 批量查询名册，避免逐空间往返
        let student_rows = SpaceStudents::find()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询学生名册失败: {e}")))?;
        let instructor_rows = SpaceInstructors::find()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询教师名册失败: {e}")))?;

        let mut students_by_space: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in student_rows {
            students_by_space
                .entry(row.space_id)
                .or_default()
                .push(row.student_id);
        }
        let mut instructors_by_space: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in instructor_rows {
            instructors_by_space
                .entry(row.space_id)
                .or_default()
                .push(row.instructor_id);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let students = students_by_space.remove(&m.id).unwrap_or_default();
                let instructors = instructors_by_space.remove(&m.id).unwrap_or_default();
                self.assemble_space(m, students, instructors)
            })
            .collect())
    }

    /// 更新教学空间
    pub async fn update_space_impl(
        &self,
        space_id: i64,
        update: UpdateSpaceRequest,
    ) -> Result<Option<Space>> {
        let existing = Spaces::find_by_id(space_id)
            .one(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询教学空间失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(space_id),
            ..Default::default()
        };

        let mut changed = false;
        if let Some(name) = update.name {
            model.name = Set(name);
            changed = true;
        }
        if let Some(code) = update.code {
            model.code = Set(code);
            changed = true;
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
            changed = true;
        }
        if let Some(coefficient) = update.coefficient {
            model.coefficient = Set(coefficient);
            changed = true;
        }

        // 空更新直接返回现状，避免生成空的 SET 子句
        if !changed {
            return self.get_space_by_id_impl(space_id).await;
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("更新教学空间失败: {e}")))?;

        self.get_space_by_id_impl(space_id).await
    }

    /// 删除教学空间（级联删除作业、提交、评分与名册，单一事务）
    pub async fn delete_space_impl(&self, space_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("开启事务失败: {e}")))?;

        let assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::SpaceId.eq(space_id))
            .select_only()
            .column(AssignmentColumn::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询空间作业失败: {e}")))?;

        if !assignment_ids.is_empty() {
            let submission_ids: Vec<i64> = Submissions::find()
                .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.clone()))
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
                    .map_err(|e| {
                        EduSpaceError::database_operation(format!("删除评分失败: {e}"))
                    })?;
            }

            Submissions::delete_many()
                .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| EduSpaceError::database_operation(format!("删除提交失败: {e}")))?;

            AssignmentAssignees::delete_many()
                .filter(AssigneeColumn::AssignmentId.is_in(assignment_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| EduSpaceError::database_operation(format!("删除作业指派失败: {e}")))?;

            Assignments::delete_many()
                .filter(AssignmentColumn::Id.is_in(assignment_ids))
                .exec(&txn)
                .await
                .map_err(|e| EduSpaceError::database_operation(format!("删除作业失败: {e}")))?;
        }

        SpaceStudents::delete_many()
            .filter(StudentColumn::SpaceId.eq(space_id))
            .exec(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("删除学生名册失败: {e}")))?;

        SpaceInstructors::delete_many()
            .filter(InstructorColumn::SpaceId.eq(space_id))
            .exec(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("删除教师名册失败: {e}")))?;

        let result = Spaces::delete_by_id(space_id)
            .exec(&txn)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("删除教学空间失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量加入学生（已在名册中的跳过）
    pub async fn enroll_students_impl(&self, space_id: i64, student_ids: Vec<i64>) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let existing = self.list_enrolled_students_impl(space_id).await?;
        let to_insert: Vec<SpaceStudentActiveModel> = student_ids
            .into_iter()
            .filter(|id| !existing.contains(id))
            .map(|student_id| SpaceStudentActiveModel {
                space_id: Set(space_id),
                student_id: Set(student_id),
                enrolled_at: Set(now),
                ..Default::default()
            })
            .collect();

        if to_insert.is_empty() {
            return Ok(());
        }

        SpaceStudents::insert_many(to_insert)
            .exec(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("加入学生失败: {e}")))?;

        Ok(())
    }

    /// 将学生移出名册
    pub async fn remove_student_impl(&self, space_id: i64, student_id: i64) -> Result<bool> {
        let result = SpaceStudents::delete_many()
            .filter(StudentColumn::SpaceId.eq(space_id))
            .filter(StudentColumn::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("移出学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 指派教师（已指派的跳过）
    pub async fn assign_instructor_impl(&self, space_id: i64, instructor_id: i64) -> Result<()> {
        if self.is_instructor_of_impl(instructor_id, space_id).await? {
            return Ok(());
        }

        let model = SpaceInstructorActiveModel {
            space_id: Set(space_id),
            instructor_id: Set(instructor_id),
            assigned_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("指派教师失败: {e}")))?;

        Ok(())
    }

    /// 列出空间的选课学生 ID
    pub async fn list_enrolled_students_impl(&self, space_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = SpaceStudents::find()
            .filter(StudentColumn::SpaceId.eq(space_id))
            .select_only()
            .column(StudentColumn::StudentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询学生名册失败: {e}")))?;

        Ok(ids)
    }

    /// 列出空间的任课教师 ID
    pub async fn list_space_instructors_impl(&self, space_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = SpaceInstructors::find()
            .filter(InstructorColumn::SpaceId.eq(space_id))
            .select_only()
            .column(InstructorColumn::InstructorId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询教师名册失败: {e}")))?;

        Ok(ids)
    }

    /// 学生是否在空间名册中
    pub async fn is_student_enrolled_impl(&self, space_id: i64, student_id: i64) -> Result<bool> {
        let count = SpaceStudents::find()
            .filter(StudentColumn::SpaceId.eq(space_id))
            .filter(StudentColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询学生名册失败: {e}")))?;

        Ok(count > 0)
    }

    /// 教师是否任教该空间
    pub async fn is_instructor_of_impl(&self, instructor_id: i64, space_id: i64) -> Result<bool> {
        let count = SpaceInstructors::find()
            .filter(InstructorColumn::SpaceId.eq(space_id))
            .filter(InstructorColumn::InstructorId.eq(instructor_id))
            .count(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询教师名册失败: {e}")))?;

        Ok(count > 0)
    }

    /// 教师任教的空间 ID 列表
    pub async fn list_instructor_space_ids_impl(&self, instructor_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = SpaceInstructors::find()
            .filter(InstructorColumn::InstructorId.eq(instructor_id))
            .select_only()
            .column(InstructorColumn::SpaceId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询任教空间失败: {e}")))?;

        Ok(ids)
    }

    /// 学生所属的空间列表（含名册）
    pub async fn list_student_spaces_impl(&self, student_id: i64) -> Result<Vec<Space>> {
        let space_ids: Vec<i64> = SpaceStudents::find()
            .filter(StudentColumn::StudentId.eq(student_id))
            .select_only()
            .column(StudentColumn::SpaceId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("查询所属空间失败: {e}")))?;

        let mut spaces = Vec::with_capacity(space_ids.len());
        for space_id in space_ids {
            if let Some(space) = self.get_space_by_id_impl(space_id).await? {
                spaces.push(space);
            }
        }

        Ok(spaces)
    }

    // 数据库模型 + 名册 → 业务模型
    fn assemble_space(&self, model: SpaceModel, students: Vec<i64>, instructors: Vec<i64>) -> Space {
        use chrono::{DateTime, Utc};

        Space {
            id: model.id,
            name: model.name,
            code: model.code,
            description: model.description,
            coefficient: model.coefficient,
            students,
            instructors,
            created_at: DateTime::<Utc>::from_timestamp(model.created_at, 0).unwrap_or_default(),
        }
    }
}
