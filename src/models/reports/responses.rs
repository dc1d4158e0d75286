use serde::Serialize;
use ts_rs::TS;

/// 单科成绩报告（派生值，不落库）
///
/// `mean` 为未舍入的算术平均值；没有任何评分时为 None，
/// 调用方必须把"暂无成绩"与"平均 0 分"区分开。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct SubjectReportResponse {
    pub student_id: i64,
    pub space_id: i64,
    pub space_name: String,
    pub coefficient: i32,
    pub scores: Vec<f64>,
    pub mean: Option<f64>,
}

/// 总成绩报告（派生值，不落库）
///
/// `overall_mean` 为按空间系数加权的平均值；没有成绩的空间
/// 既不计入分子也不计入分母。所有空间都没有成绩时为 None。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct OverallReportResponse {
    pub student_id: i64,
    pub subjects: Vec<SubjectReportResponse>,
    pub overall_mean: Option<f64>,
}

/// 教学空间成绩统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct SpaceStatisticsResponse {
    pub space_id: i64,
    pub space_name: String,
    pub evaluated_count: i64,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}
