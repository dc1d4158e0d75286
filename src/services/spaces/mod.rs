pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod members;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::spaces::requests::{
    AssignInstructorRequest, CreateSpaceRequest, EnrollStudentsRequest, UpdateSpaceRequest,
};
use crate::storage::Storage;

pub struct SpaceService {
    storage: Option<Arc<dyn Storage>>,
}

impl SpaceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_space(
        &self,
        request: &HttpRequest,
        req: CreateSpaceRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_space(self, request, req).await
    }

    pub async fn list_spaces(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_spaces(self, request).await
    }

    pub async fn get_space(
        &self,
        request: &HttpRequest,
        space_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_space(self, request, space_id).await
    }

    pub async fn update_space(
        &self,
        request: &HttpRequest,
        space_id: i64,
        req: UpdateSpaceRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_space(self, request, space_id, req).await
    }

    pub async fn delete_space(
        &self,
        request: &HttpRequest,
        space_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_space(self, request, space_id).await
    }

    pub async fn enroll_students(
        &self,
        request: &HttpRequest,
        space_id: i64,
        req: EnrollStudentsRequest,
    ) -> ActixResult<HttpResponse> {
        members::enroll_students(self, request, space_id, req).await
    }

    pub async fn remove_student(
        &self,
        request: &HttpRequest,
        space_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::remove_student(self, request, space_id, student_id).await
    }

    pub async fn assign_instructor(
        &self,
        request: &HttpRequest,
        space_id: i64,
        req: AssignInstructorRequest,
    ) -> ActixResult<HttpResponse> {
        members::assign_instructor(self, request, space_id, req).await
    }
}
