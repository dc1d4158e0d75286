pub mod overall;
pub mod space_stats;
pub mod subject;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
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

    pub async fn get_subject_report(
        &self,
        request: &HttpRequest,
        student_id: i64,
        space_id: i64,
    ) -> ActixResult<HttpResponse> {
        subject::get_subject_report(self, request, student_id, space_id).await
    }

    pub async fn get_overall_report(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        overall::get_overall_report(self, request, student_id).await
    }

    pub async fn get_space_statistics(
        &self,
        request: &HttpRequest,
        space_id: i64,
    ) -> ActixResult<HttpResponse> {
        space_stats::get_space_statistics(self, request, space_id).await
    }
}

/// 单科均分：分数列表的算术平均，未舍入
///
/// 没有任何评分时返回 None。"暂无成绩"和"平均 0 分"是两回事，
/// 两位小数的舍入只发生在展示层。
pub(crate) fn subject_mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// 总均分：按空间系数加权的平均，未舍入
///
/// 入参是 (单科均分, 系数) 对；没有成绩的空间在调用方就被排除，
/// 不会出现在入参里，因此也不占分母。
pub(crate) fn weighted_mean(pairs: &[(f64, i32)]) -> Option<f64> {
    let total_coefficient: i64 = pairs.iter().map(|(_, c)| *c as i64).sum();
    if total_coefficient <= 0 {
        return None;
    }
    let weighted_sum: f64 = pairs.iter().map(|(mean, c)| mean * *c as f64).sum();
    Some(weighted_sum / total_coefficient as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_mean_empty_is_none() {
        assert_eq!(subject_mean(&[]), None);
    }

    #[test]
    fn test_subject_mean_is_unrounded_arithmetic_mean() {
        assert_eq!(subject_mean(&[12.0, 16.0]), Some(14.0));
        assert_eq!(subject_mean(&[15.0]), Some(15.0));
        // 10/3 不舍入
        let mean = subject_mean(&[10.0, 0.0, 0.0]).unwrap();
        assert!((mean - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_mean_excludes_nothing_it_never_sees() {
        // 空间 A 均分 14.0 系数 2，空间 B 均分 18.0 系数 1
        let mean = weighted_mean(&[(14.0, 2), (18.0, 1)]).unwrap();
        assert!((mean - 46.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_mean_without_grades_is_none() {
        assert_eq!(weighted_mean(&[]), None);
    }

    #[test]
    fn test_weighted_mean_single_space() {
        assert_eq!(weighted_mean(&[(11.5, 3)]), Some(11.5));
    }
}
