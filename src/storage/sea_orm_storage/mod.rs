//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod evaluations;
mod reports;
mod spaces;
mod submissions;

use crate::config::AppConfig;
use crate::errors::{EduSpaceError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_database_url(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 通过指定连接参数创建存储实例（测试也走这里）
    pub async fn new_with_database_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EduSpaceError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduSpaceError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EduSpaceError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EduSpaceError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EduSpaceError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    evaluations::entities::Evaluation,
    spaces::{
        entities::Space,
        requests::{CreateSpaceRequest, UpdateSpaceRequest},
    },
    submissions::entities::Submission,
};
use crate::storage::{AssignmentProgress, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 教学空间模块
    async fn create_space(&self, space: CreateSpaceRequest) -> Result<Space> {
        self.create_space_impl(space).await
    }

    async fn get_space_by_id(&self, space_id: i64) -> Result<Option<Space>> {
        self.get_space_by_id_impl(space_id).await
    }

    async fn list_spaces(&self) -> Result<Vec<Space>> {
        self.list_spaces_impl().await
    }

    async fn update_space(
        &self,
        space_id: i64,
        update: UpdateSpaceRequest,
    ) -> Result<Option<Space>> {
        self.update_space_impl(space_id, update).await
    }

    async fn delete_space(&self, space_id: i64) -> Result<bool> {
        self.delete_space_impl(space_id).await
    }

    async fn enroll_students(&self, space_id: i64, student_ids: Vec<i64>) -> Result<()> {
        self.enroll_students_impl(space_id, student_ids).await
    }

    async fn remove_student(&self, space_id: i64, student_id: i64) -> Result<bool> {
        self.remove_student_impl(space_id, student_id).await
    }

    async fn assign_instructor(&self, space_id: i64, instructor_id: i64) -> Result<()> {
        self.assign_instructor_impl(space_id, instructor_id).await
    }

    // 名册查询模块
    async fn list_enrolled_students(&self, space_id: i64) -> Result<Vec<i64>> {
        self.list_enrolled_students_impl(space_id).await
    }

    async fn is_student_enrolled(&self, space_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(space_id, student_id).await
    }

    async fn is_instructor_of(&self, instructor_id: i64, space_id: i64) -> Result<bool> {
        self.is_instructor_of_impl(instructor_id, space_id).await
    }

    async fn list_instructor_space_ids(&self, instructor_id: i64) -> Result<Vec<i64>> {
        self.list_instructor_space_ids_impl(instructor_id).await
    }

    async fn list_student_spaces(&self, student_id: i64) -> Result<Vec<Space>> {
        self.list_student_spaces_impl(student_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        instructor_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(instructor_id, req).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_by_space(&self, space_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_space_impl(space_id).await
    }

    async fn list_assignments_by_spaces(&self, space_ids: &[i64]) -> Result<Vec<Assignment>> {
        self.list_assignments_by_spaces_impl(space_ids).await
    }

    async fn list_assignments_for_student(&self, student_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_for_student_impl(student_id).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    async fn get_assignment_progress(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<AssignmentProgress>> {
        self.get_assignment_progress_impl(assignment_ids).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        resources: Vec<String>,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, student_id, content, resources)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_for_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_for_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_assignment_impl(assignment_id).await
    }

    // 评分模块
    async fn create_evaluation(
        &self,
        instructor_id: i64,
        submission_id: i64,
        score: f64,
        comment: Option<String>,
    ) -> Result<Evaluation> {
        self.create_evaluation_impl(instructor_id, submission_id, score, comment)
            .await
    }

    async fn get_evaluation_by_submission_id(
        &self,
        submission_id: i64,
    ) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_submission_id_impl(submission_id)
            .await
    }

    async fn list_evaluations_by_assignment(&self, assignment_id: i64) -> Result<Vec<Evaluation>> {
        self.list_evaluations_by_assignment_impl(assignment_id)
            .await
    }

    // 成绩聚合模块
    async fn list_student_scores_in_space(
        &self,
        student_id: i64,
        space_id: i64,
    ) -> Result<Vec<f64>> {
        self.list_student_scores_in_space_impl(student_id, space_id)
            .await
    }

    async fn list_space_scores(&self, space_id: i64) -> Result<Vec<f64>> {
        self.list_space_scores_impl(space_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::{AssignmentKind, AssignmentStatus};
    use chrono::{Duration as ChronoDuration, Utc};

    /// 内存 SQLite 存储（单连接，迁移已应用）
    async fn test_storage() -> SeaOrmStorage {
        SeaOrmStorage::new_with_database_url(":memory:", 1, 5)
            .await
            .expect("in-memory storage should initialize")
    }

    async fn seed_space(storage: &SeaOrmStorage, code: &str, coefficient: i32) -> Space {
        storage
            .create_space_impl(CreateSpaceRequest {
                name: format!("科目 {code}"),
                code: code.to_string(),
                description: None,
                coefficient: Some(coefficient),
            })
            .await
            .expect("create space")
    }

    async fn seed_assignment(
        storage: &SeaOrmStorage,
        space_id: i64,
        kind: AssignmentKind,
        assignees: Vec<i64>,
    ) -> Assignment {
        storage
            .create_assignment_impl(
                900,
                CreateAssignmentRequest {
                    space_id,
                    title: "第一次作业".to_string(),
                    instructions: "完成并提交".to_string(),
                    kind,
                    opens_at: Utc::now() - ChronoDuration::hours(1),
                    due_at: Utc::now() + ChronoDuration::days(1),
                    resources: None,
                    assignees: assignees.clone(),
                },
            )
            .await
            .expect("create assignment")
    }

    #[tokio::test]
    async fn test_duplicate_submission_rejected() {
        let storage = test_storage().await;
        let space = seed_space(&storage, "MATH", 2).await;
        storage
            .enroll_students_impl(space.id, vec![1])
            .await
            .unwrap();
        let assignment =
            seed_assignment(&storage, space.id, AssignmentKind::Individual, vec![1]).await;

        let first = storage
            .create_submission_impl(assignment.id, 1, Some("done".to_string()), vec![])
            .await
            .expect("first submission succeeds");

        let second = storage
            .create_submission_impl(assignment.id, 1, Some("again".to_string()), vec![])
            .await;
        assert!(matches!(second, Err(EduSpaceError::Duplicate(_))));

        // 第一次提交内容保持不变
        let stored = storage
            .get_submission_for_student_impl(assignment.id, 1)
            .await
            .unwrap()
            .expect("submission exists");
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.content.as_deref(), Some("done"));
    }

    #[tokio::test]
    async fn test_duplicate_evaluation_rejected() {
        let storage = test_storage().await;
        let space = seed_space(&storage, "PHYS", 1).await;
        storage
            .enroll_students_impl(space.id, vec![7])
            .await
            .unwrap();
        let assignment =
            seed_assignment(&storage, space.id, AssignmentKind::Individual, vec![7]).await;
        let submission = storage
            .create_submission_impl(assignment.id, 7, Some("ok".to_string()), vec![])
            .await
            .unwrap();

        storage
            .create_evaluation_impl(900, submission.id, 15.0, None)
            .await
            .expect("first evaluation succeeds");

        let second = storage
            .create_evaluation_impl(900, submission.id, 18.0, None)
            .await;
        assert!(matches!(second, Err(EduSpaceError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_delete_assignment_cascades() {
        let storage = test_storage().await;
        let space = seed_space(&storage, "CHEM", 1).await;
        storage
            .enroll_students_impl(space.id, vec![3])
            .await
            .unwrap();
        let assignment =
            seed_assignment(&storage, space.id, AssignmentKind::Individual, vec![3]).await;
        let submission = storage
            .create_submission_impl(assignment.id, 3, Some("essai".to_string()), vec![])
            .await
            .unwrap();
        storage
            .create_evaluation_impl(900, submission.id, 12.0, None)
            .await
            .unwrap();

        assert!(storage.delete_assignment_impl(assignment.id).await.unwrap());

        assert!(
            storage
                .get_assignment_by_id_impl(assignment.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .get_submission_by_id_impl(submission.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .get_evaluation_by_submission_id_impl(submission.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_status_lifecycle_individual() {
        let storage = test_storage().await;
        let space = seed_space(&storage, "INFO", 1).await;
        storage
            .enroll_students_impl(space.id, vec![5])
            .await
            .unwrap();
        let assignment =
            seed_assignment(&storage, space.id, AssignmentKind::Individual, vec![5]).await;

        let progress = |p: &[AssignmentProgress]| {
            let entry = p
                .iter()
                .find(|x| x.assignment_id == assignment.id)
                .expect("progress entry");
            AssignmentStatus::derive(
                entry.assignee_count,
                entry.submitted_count,
                entry.evaluated_count,
            )
        };

        let initial = storage
            .get_assignment_progress_impl(&[assignment.id])
            .await
            .unwrap();
        assert_eq!(progress(&initial), AssignmentStatus::Pending);

        let submission = storage
            .create_submission_impl(assignment.id, 5, Some("done".to_string()), vec![])
            .await
            .unwrap();
        let submitted = storage
            .get_assignment_progress_impl(&[assignment.id])
            .await
            .unwrap();
        assert_eq!(progress(&submitted), AssignmentStatus::Submitted);

        storage
            .create_evaluation_impl(900, submission.id, 15.0, None)
            .await
            .unwrap();
        let evaluated = storage
            .get_assignment_progress_impl(&[assignment.id])
            .await
            .unwrap();
        assert_eq!(progress(&evaluated), AssignmentStatus::Evaluated);

        // 单科报告此时均分 15.0
        let scores = storage
            .list_student_scores_in_space_impl(5, space.id)
            .await
            .unwrap();
        assert_eq!(scores, vec![15.0]);
    }

    #[tokio::test]
    async fn test_collective_stays_submitted_until_every_assignee_evaluated() {
        let storage = test_storage().await;
        let space = seed_space(&storage, "HIST", 1).await;
        storage
            .enroll_students_impl(space.id, vec![1, 2, 3])
            .await
            .unwrap();
        let assignment =
            seed_assignment(&storage, space.id, AssignmentKind::Collective, vec![1, 2, 3]).await;

        // 三人指派，两人提交
        let s1 = storage
            .create_submission_impl(assignment.id, 1, Some("a".to_string()), vec![])
            .await
            .unwrap();
        let s2 = storage
            .create_submission_impl(assignment.id, 2, Some("b".to_string()), vec![])
            .await
            .unwrap();

        // 两份提交都已评分，第三人始终未提交：状态停留在 submitted
        storage
            .create_evaluation_impl(900, s1.id, 10.0, None)
            .await
            .unwrap();
        storage
            .create_evaluation_impl(900, s2.id, 11.0, None)
            .await
            .unwrap();

        let progress = storage
            .get_assignment_progress_impl(&[assignment.id])
            .await
            .unwrap();
        let entry = &progress[0];
        assert_eq!(entry.assignee_count, 3);
        assert_eq!(entry.submitted_count, 2);
        assert_eq!(entry.evaluated_count, 2);
        assert_eq!(
            AssignmentStatus::derive(
                entry.assignee_count,
                entry.submitted_count,
                entry.evaluated_count
            ),
            AssignmentStatus::Submitted
        );
    }

    #[tokio::test]
    async fn test_scores_collected_per_space() {
        let storage = test_storage().await;
        let space_a = seed_space(&storage, "A", 2).await;
        let space_b = seed_space(&storage, "B", 1).await;
        storage
            .enroll_students_impl(space_a.id, vec![42])
            .await
            .unwrap();
        storage
            .enroll_students_impl(space_b.id, vec![42])
            .await
            .unwrap();

        // 空间 A：两次作业得 12 和 16；空间 B：一次作业得 18
        for (space_id, score) in [(space_a.id, 12.0), (space_a.id, 16.0), (space_b.id, 18.0)] {
            let assignment =
                seed_assignment(&storage, space_id, AssignmentKind::Individual, vec![42]).await;
            let submission = storage
                .create_submission_impl(assignment.id, 42, Some("x".to_string()), vec![])
                .await
                .unwrap();
            storage
                .create_evaluation_impl(900, submission.id, score, None)
                .await
                .unwrap();
        }

        let scores_a = storage
            .list_student_scores_in_space_impl(42, space_a.id)
            .await
            .unwrap();
        assert_eq!(scores_a.len(), 2);
        assert_eq!(scores_a.iter().sum::<f64>(), 28.0);

        let scores_b = storage
            .list_student_scores_in_space_impl(42, space_b.id)
            .await
            .unwrap();
        assert_eq!(scores_b, vec![18.0]);

        // 没有评分的学生得到空列表，而不是 0 分
        let scores_none = storage
            .list_student_scores_in_space_impl(43, space_a.id)
            .await
            .unwrap();
        assert!(scores_none.is_empty());
    }
}
