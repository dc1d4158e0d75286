use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建教学空间表
        manager
            .create_table(
                Table::create()
                    .table(Spaces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Spaces::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Spaces::Name).string().not_null())
                    .col(
                        ColumnDef::new(Spaces::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Spaces::Description).text().null())
                    .col(
                        ColumnDef::new(Spaces::Coefficient)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Spaces::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建空间学生名册表（学生目录由外部系统维护，这里只存 ID）
        manager
            .create_table(
                Table::create()
                    .table(SpaceStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpaceStudents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SpaceStudents::SpaceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpaceStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpaceStudents::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SpaceStudents::Table, SpaceStudents::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建空间教师名册表
        manager
            .create_table(
                Table::create()
                    .table(SpaceInstructors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpaceInstructors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SpaceInstructors::SpaceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpaceInstructors::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpaceInstructors::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SpaceInstructors::Table, SpaceInstructors::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::SpaceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Instructions).text().not_null())
                    .col(ColumnDef::new(Assignments::Kind).string().not_null())
                    .col(ColumnDef::new(Assignments::OpensAt).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::DueAt).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::Resources).text().null())
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业指派表
        manager
            .create_table(
                Table::create()
                    .table(AssignmentAssignees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentAssignees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentAssignees::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentAssignees::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentAssignees::Table, AssignmentAssignees::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Content).text().null())
                    .col(ColumnDef::new(Submissions::Resources).text().null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::Score).double().not_null())
                    .col(ColumnDef::new(Evaluations::Comment).text().null())
                    .col(
                        ColumnDef::new(Evaluations::EvaluatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 名册表唯一索引：同一学生/教师在同一空间只出现一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_space_students_space_student")
                    .table(SpaceStudents::Table)
                    .col(SpaceStudents::SpaceId)
                    .col(SpaceStudents::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_space_instructors_space_instructor")
                    .table(SpaceInstructors::Table)
                    .col(SpaceInstructors::SpaceId)
                    .col(SpaceInstructors::InstructorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 指派表唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_assignment_assignees_assignment_student")
                    .table(AssignmentAssignees::Table)
                    .col(AssignmentAssignees::AssignmentId)
                    .col(AssignmentAssignees::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 提交表唯一索引：一个学生对一个作业至多一次提交，并发下由数据库裁决
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_submissions_assignment_student")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 评分表唯一索引：一次提交至多一条评分
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_evaluations_submission")
                    .table(Evaluations::Table)
                    .col(Evaluations::SubmissionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_space_id")
                    .table(Assignments::Table)
                    .col(Assignments::SpaceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignment_assignees_student_id")
                    .table(AssignmentAssignees::Table)
                    .col(AssignmentAssignees::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_assignment_id")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_submission_id")
                    .table(Evaluations::Table)
                    .col(Evaluations::SubmissionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentAssignees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SpaceInstructors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SpaceStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Spaces::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Spaces {
    #[sea_orm(iden = "spaces")]
    Table,
    Id,
    Name,
    Code,
    Description,
    Coefficient,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SpaceStudents {
    #[sea_orm(iden = "space_students")]
    Table,
    Id,
    SpaceId,
    StudentId,
    EnrolledAt,
}

#[derive(DeriveIden)]
enum SpaceInstructors {
    #[sea_orm(iden = "space_instructors")]
    Table,
    Id,
    SpaceId,
    InstructorId,
    AssignedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    SpaceId,
    InstructorId,
    Title,
    Instructions,
    Kind,
    OpensAt,
    DueAt,
    Resources,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AssignmentAssignees {
    #[sea_orm(iden = "assignment_assignees")]
    Table,
    Id,
    AssignmentId,
    StudentId,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    Content,
    Resources,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum Evaluations {
    #[sea_orm(iden = "evaluations")]
    Table,
    Id,
    SubmissionId,
    InstructorId,
    Score,
    Comment,
    EvaluatedAt,
}
