//! Dashboard statistics and monthly reports.

use crate::error::ApiError;
use crate::indent::{Indent, IndentStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A labelled value for charts and breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_indents: u64,
    pub pending_approval: u64,
    pub approved_indents: u64,
    pub received_indents: u64,
    pub total_value: f64,
    pub this_month_indents: u64,
    pub recent_indents: Vec<Indent>,
    pub chart_data: Vec<ChartPoint>,
    pub status_distribution: Vec<ChartPoint>,
}

impl DashboardStats {
    /// Fills the status distribution from the recent indents when the backend
    /// did not provide one.
    pub fn with_derived_distribution(mut self) -> Self {
        if self.status_distribution.is_empty() && !self.recent_indents.is_empty() {
            let mut counts: Vec<(IndentStatus, f64)> = Vec::new();
            for indent in &self.recent_indents {
                match counts.iter_mut().find(|(s, _)| *s == indent.status) {
                    Some((_, n)) => *n += 1.0,
                    None => counts.push((indent.status, 1.0)),
                }
            }
            self.status_distribution = counts
                .into_iter()
                .map(|(status, n)| ChartPoint::new(status.as_str(), n))
                .collect();
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub total_indents: u64,
    pub approved_indents: u64,
    pub total_value: f64,
    pub avg_processing_days: f64,
    pub chart_data: Vec<ChartPoint>,
    pub category_breakdown: Vec<ChartPoint>,
    pub site_breakdown: Vec<ChartPoint>,
}

/// Kind of data export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Indents,
    Orders,
    Monthly,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indents => "indents",
            Self::Orders => "orders",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indents" => Some(Self::Indents),
            "orders" => Some(Self::Orders),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// Filters passed through to `GET /reports/export`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilters {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub site_id: Option<String>,
}

/// Raw export bytes with a suggested file name.
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ExportedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedReport")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Suggested download name for an export, e.g. `monthly-report-2024-03.json`.
pub fn export_file_name(kind: ReportKind, filters: &ExportFilters) -> String {
    match (filters.year, filters.month) {
        (Some(year), Some(month)) => {
            format!("{}-report-{}-{:02}.json", kind.as_str(), year, month)
        }
        _ => format!("{}-report.json", kind.as_str()),
    }
}

/// The report endpoints of the remote service.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// `GET /reports/dashboard`
    async fn dashboard(&self, site_id: Option<&str>) -> Result<DashboardStats, ApiError>;

    /// `GET /reports/monthly`
    async fn monthly_report(&self, month: u32, year: i32) -> Result<MonthlyReport, ApiError>;

    /// `GET /reports/export`
    async fn export_report(
        &self,
        kind: ReportKind,
        filters: &ExportFilters,
    ) -> Result<ExportedReport, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        let filters = ExportFilters {
            month: Some(3),
            year: Some(2024),
            site_id: None,
        };
        assert_eq!(
            export_file_name(ReportKind::Monthly, &filters),
            "monthly-report-2024-03.json"
        );
        assert_eq!(
            export_file_name(ReportKind::Indents, &ExportFilters::default()),
            "indents-report.json"
        );
    }

    #[test]
    fn test_derived_distribution() {
        let indent = |id: &str, status| Indent {
            id: id.to_string(),
            site_id: "s".to_string(),
            site_name: "S".to_string(),
            requested_materials: Vec::new(),
            status,
            description: None,
            created_at: None,
            total_items: 0,
        };
        let stats = DashboardStats {
            recent_indents: vec![
                indent("a", IndentStatus::Pending),
                indent("b", IndentStatus::Pending),
                indent("c", IndentStatus::Approved),
            ],
            ..Default::default()
        }
        .with_derived_distribution();

        assert_eq!(stats.status_distribution.len(), 2);
        assert_eq!(stats.status_distribution[0], ChartPoint::new("PENDING", 2.0));
    }
}
