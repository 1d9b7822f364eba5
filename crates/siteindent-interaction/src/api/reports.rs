use super::SiteIndentApi;
use crate::mapping::{dashboard_from, monthly_report_from};
use crate::transport::HttpRequest;
use async_trait::async_trait;
use siteindent_core::ApiError;
use siteindent_core::report::{
    DashboardStats, ExportFilters, ExportedReport, MonthlyReport, ReportKind, ReportService,
    export_file_name,
};

#[async_trait]
impl ReportService for SiteIndentApi {
    async fn dashboard(&self, site_id: Option<&str>) -> Result<DashboardStats, ApiError> {
        let payload = self
            .client
            .call(HttpRequest::get("/reports/dashboard").query_opt("siteId", site_id))
            .await?;
        dashboard_from(&payload)
    }

    async fn monthly_report(&self, month: u32, year: i32) -> Result<MonthlyReport, ApiError> {
        let request = HttpRequest::get("/reports/monthly")
            .query("month", month)
            .query("year", year);
        let payload = self.client.call(request).await?;
        monthly_report_from(&payload, month, year)
    }

    async fn export_report(
        &self,
        kind: ReportKind,
        filters: &ExportFilters,
    ) -> Result<ExportedReport, ApiError> {
        let request = HttpRequest::get("/reports/export")
            .query("type", kind.as_str())
            .query_opt("month", filters.month)
            .query_opt("year", filters.year)
            .query_opt("siteId", filters.site_id.as_deref());
        let bytes = self.client.call_raw(request).await?;
        Ok(ExportedReport {
            file_name: export_file_name(kind, filters),
            bytes,
        })
    }
}
