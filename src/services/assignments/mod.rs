pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod my;
pub mod pending;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::assignments::requests::{AssignmentListParams, CreateAssignmentRequest};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, req).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    pub async fn list_my_assignments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        my::list_my_assignments(self, request).await
    }

    pub async fn list_pending_evaluation(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        pending::list_pending_evaluation(self, request).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }
}

/// 派生单个作业的状态
///
/// 状态是提交/评分现状的纯函数，每次读取重新计算。
pub(crate) async fn derive_status_for(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> Result<AssignmentStatus> {
    let progress = storage.get_assignment_progress(&[assignment_id]).await?;
    Ok(progress
        .first()
        .map(|p| AssignmentStatus::derive(p.assignee_count, p.submitted_count, p.evaluated_count))
        .unwrap_or(AssignmentStatus::Pending))
}

/// 批量派生作业状态
pub(crate) async fn derive_status_map(
    storage: &Arc<dyn Storage>,
    assignment_ids: &[i64],
) -> Result<HashMap<i64, AssignmentStatus>> {
    let progress = storage.get_assignment_progress(assignment_ids).await?;
    Ok(progress
        .into_iter()
        .map(|p| {
            (
                p.assignment_id,
                AssignmentStatus::derive(p.assignee_count, p.submitted_count, p.evaluated_count),
            )
        })
        .collect())
}
