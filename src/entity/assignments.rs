//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub space_id: i64,
    pub instructor_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub instructions: String,
    pub kind: String,
    pub opens_at: i64,
    pub due_at: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub resources: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spaces::Entity",
        from = "Column::SpaceId",
        to = "super::spaces::Column::Id"
    )]
    Space,
    #[sea_orm(has_many = "super::assignment_assignees::Entity")]
    Assignees,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::spaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Space.def()
    }
}

impl Related<super::assignment_assignees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignees.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型（指派名单由存储层另行装配）
impl Model {
    pub fn into_assignment(
        self,
        assignees: Vec<i64>,
    ) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, AssignmentKind};
        use chrono::{DateTime, Utc};
        use std::str::FromStr;

        Assignment {
            id: self.id,
            space_id: self.space_id,
            instructor_id: self.instructor_id,
            title: self.title,
            instructions: self.instructions,
            kind: AssignmentKind::from_str(&self.kind).unwrap_or(AssignmentKind::Individual),
            opens_at: DateTime::<Utc>::from_timestamp(self.opens_at, 0).unwrap_or_default(),
            due_at: DateTime::<Utc>::from_timestamp(self.due_at, 0).unwrap_or_default(),
            resources: self
                .resources
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok())
                .unwrap_or_default(),
            assignees,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
