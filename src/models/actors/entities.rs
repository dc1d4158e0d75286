use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 调用者角色
//
// 认证由上游网关完成，本服务只消费已解析的身份（ID + 角色）并据此授权。
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub enum ActorRole {
    Director,   // 教务主任
    Instructor, // 教师
    Student,    // 学生
}

impl ActorRole {
    pub const DIRECTOR: &'static str = "director";
    pub const INSTRUCTOR: &'static str = "instructor";
    pub const STUDENT: &'static str = "student";

    pub fn director_roles() -> &'static [&'static ActorRole] {
        &[&Self::Director]
    }
    pub fn instructor_roles() -> &'static [&'static ActorRole] {
        &[&Self::Instructor, &Self::Director]
    }
    pub fn student_roles() -> &'static [&'static ActorRole] {
        &[&Self::Student]
    }
    pub fn all_roles() -> &'static [&'static ActorRole] {
        &[&Self::Director, &Self::Instructor, &Self::Student]
    }
}

impl<'de> Deserialize<'de> for ActorRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            ActorRole::DIRECTOR => Ok(ActorRole::Director),
            ActorRole::INSTRUCTOR => Ok(ActorRole::Instructor),
            ActorRole::STUDENT => Ok(ActorRole::Student),
            _ => Err(serde::de::Error::custom(format!(
                "无效的角色: '{s}'. 支持的角色: director, instructor, student"
            ))),
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorRole::Director => write!(f, "{}", ActorRole::DIRECTOR),
            ActorRole::Instructor => write!(f, "{}", ActorRole::INSTRUCTOR),
            ActorRole::Student => write!(f, "{}", ActorRole::STUDENT),
        }
    }
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "director" => Ok(ActorRole::Director),
            "instructor" => Ok(ActorRole::Instructor),
            "student" => Ok(ActorRole::Student),
            _ => Err(format!("Invalid actor role: {s}")),
        }
    }
}

// 调用者身份
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub struct Actor {
    pub id: i64,
    pub role: ActorRole,
}

impl Actor {
    pub fn is_director(&self) -> bool {
        self.role == ActorRole::Director
    }

    pub fn is_instructor(&self) -> bool {
        self.role == ActorRole::Instructor
    }

    pub fn is_student(&self) -> bool {
        self.role == ActorRole::Student
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in ActorRole::all_roles() {
            let parsed = ActorRole::from_str(&role.to_string()).expect("role should parse");
            assert_eq!(&&parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(ActorRole::from_str("admin").is_err());
    }
}
