use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    evaluations::entities::Evaluation,
    spaces::{
        entities::Space,
        requests::{CreateSpaceRequest, UpdateSpaceRequest},
    },
    submissions::entities::Submission,
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 作业进度计数
///
/// 派生状态的"计算视图"：状态永远从这些计数现算，不落库。
/// `submitted_count` 为已提交的被指派学生数，`evaluated_count`
/// 为其中已评分的提交数。
#[derive(Debug, Clone, Copy)]
pub struct AssignmentProgress {
    pub assignment_id: i64,
    pub assignee_count: usize,
    pub submitted_count: usize,
    pub evaluated_count: usize,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 教学空间管理方法
    // 创建空间
    async fn create_space(&self, space: CreateSpaceRequest) -> Result<Space>;
    // 通过ID获取空间信息
    async fn get_space_by_id(&self, space_id: i64) -> Result<Option<Space>>;
    // 列出空间
    async fn list_spaces(&self) -> Result<Vec<Space>>;
    // 更新空间信息
    async fn update_space(
        &self,
        space_id: i64,
        update: UpdateSpaceRequest,
    ) -> Result<Option<Space>>;
    // 删除空间（级联删除作业、提交、评分）
    async fn delete_space(&self, space_id: i64) -> Result<bool>;
    // 批量加入学生（已在名册中的跳过）
    async fn enroll_students(&self, space_id: i64, student_ids: Vec<i64>) -> Result<()>;
    // 移出学生
    async fn remove_student(&self, space_id: i64, student_id: i64) -> Result<bool>;
    // 指派教师
    async fn assign_instructor(&self, space_id: i64, instructor_id: i64) -> Result<()>;

    /// 名册查询方法（外部目录只到 ID 为止，人员资料由外部系统维护）
    // 列出空间的选课学生
    async fn list_enrolled_students(&self, space_id: i64) -> Result<Vec<i64>>;
    // 学生是否在空间名册中
    async fn is_student_enrolled(&self, space_id: i64, student_id: i64) -> Result<bool>;
    // 教师是否任教该空间
    async fn is_instructor_of(&self, instructor_id: i64, space_id: i64) -> Result<bool>;
    // 教师任教的空间 ID 列表
    async fn list_instructor_space_ids(&self, instructor_id: i64) -> Result<Vec<i64>>;
    // 学生所属的空间列表
    async fn list_student_spaces(&self, student_id: i64) -> Result<Vec<Space>>;

    /// 作业管理方法
    // 创建作业（与指派名单同一事务写入）
    async fn create_assignment(
        &self,
        instructor_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业信息
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出空间内的作业
    async fn list_assignments_by_space(&self, space_id: i64) -> Result<Vec<Assignment>>;
    // 列出多个空间内的作业（教师待评队列用）
    async fn list_assignments_by_spaces(&self, space_ids: &[i64]) -> Result<Vec<Assignment>>;
    // 列出指派给某学生的作业
    async fn list_assignments_for_student(&self, student_id: i64) -> Result<Vec<Assignment>>;
    // 删除作业（级联删除指派、提交、评分，单一事务）
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
    // 查询作业进度计数（派生状态的数据来源）
    async fn get_assignment_progress(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<AssignmentProgress>>;

    /// 提交管理方法
    // 创建提交；(assignment, student) 唯一性由数据库裁决
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        resources: Vec<String>,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取某学生对某作业的提交
    async fn get_submission_for_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出作业的全部提交
    async fn list_submissions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>>;

    /// 评分管理方法
    // 创建评分；(submission) 唯一性由数据库裁决
    async fn create_evaluation(
        &self,
        instructor_id: i64,
        submission_id: i64,
        score: f64,
        comment: Option<String>,
    ) -> Result<Evaluation>;
    // 通过提交ID获取评分
    async fn get_evaluation_by_submission_id(&self, submission_id: i64)
    -> Result<Option<Evaluation>>;
    // 列出作业下的全部评分
    async fn list_evaluations_by_assignment(&self, assignment_id: i64) -> Result<Vec<Evaluation>>;

    /// 成绩聚合查询方法
    // 某学生在某空间的全部评分分数（按评分时间排序）
    async fn list_student_scores_in_space(
        &self,
        student_id: i64,
        space_id: i64,
    ) -> Result<Vec<f64>>;
    // 某空间的全部评分分数
    async fn list_space_scores(&self, space_id: i64) -> Result<Vec<f64>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
