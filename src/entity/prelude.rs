//! 预导入模块，方便使用

pub use super::assignment_assignees::{
    ActiveModel as AssignmentAssigneeActiveModel, Entity as AssignmentAssignees,
    Model as AssignmentAssigneeModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::space_instructors::{
    ActiveModel as SpaceInstructorActiveModel, Entity as SpaceInstructors,
    Model as SpaceInstructorModel,
};
pub use super::space_students::{
    ActiveModel as SpaceStudentActiveModel, Entity as SpaceStudents, Model as SpaceStudentModel,
};
pub use super::spaces::{ActiveModel as SpaceActiveModel, Entity as Spaces, Model as SpaceModel};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
