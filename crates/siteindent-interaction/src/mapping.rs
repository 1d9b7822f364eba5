//! Reshaping between backend records and domain types.
//!
//! Every translation is a named function here so call sites never touch
//! raw backend shapes. Inbound functions take the unwrapped payload (see
//! [`unwrap_envelope`](crate::client::unwrap_envelope)); outbound builders
//! produce the request bodies in the backend's snake_case field names.

use crate::wire::{LoginPayload, Record, UploadPayload, one_or_many};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use serde_json::{Map, Value, json};
use siteindent_core::ApiError;
use siteindent_core::auth::AuthGrant;
use siteindent_core::indent::{
    ApprovalDecision, Indent, IndentPage, IndentStatus, NewIndent, ReceiptConfirmation,
    ReceiptUpload, RequestedMaterial, UploadedReceipt,
};
use siteindent_core::material::Material;
use siteindent_core::order::{NewOrder, Order, OrderLineItem, OrderPage, OrderStatus};
use siteindent_core::report::{ChartPoint, DashboardStats, MonthlyReport};
use siteindent_core::site::Site;
use siteindent_core::user::{Role, User};
use std::collections::HashMap;

/// Shown when a site id is not known.
pub const UNKNOWN_SITE: &str = "Unknown Site";

const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_UNIT: &str = "units";

static SITE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("site-chembur", "Chembur Site"),
        ("site-andheri", "Andheri Site"),
        ("site-thane", "Thane Site"),
        ("site-powai", "Powai Site"),
        ("site-bandra", "Bandra Site"),
    ])
});

// ============================================================================
// Reference data
// ============================================================================

/// Display name for a site id from the fixed lookup table.
pub fn site_name_for(site_id: &str) -> &'static str {
    SITE_NAMES.get(site_id).copied().unwrap_or(UNKNOWN_SITE)
}

/// A name sent by the backend wins over the lookup table.
pub fn resolve_site_name(site_id: &str, provided: Option<String>) -> String {
    provided.unwrap_or_else(|| site_name_for(site_id).to_string())
}

pub fn normalize_user(value: &Value) -> Result<User, ApiError> {
    let record = Record::new(value, "user")?;
    let id = record.require_text(&["id", "_id", "userId", "user_id"], "user")?;
    let email = record.text(&["email"]).unwrap_or_default();
    let name = record
        .text(&["name", "displayName", "display_name"])
        .unwrap_or_else(|| email.clone());

    let role_name = record.require_text(&["role"], "user")?;
    let role = Role::parse(&role_name)
        .ok_or_else(|| ApiError::malformed(format!("unknown role '{}'", role_name)))?;

    let site_id = record.text(&["siteId", "site_id"]);
    let site_name = record.text(&["siteName", "site_name"]).or_else(|| {
        site_id
            .as_deref()
            .map(site_name_for)
            .filter(|name| *name != UNKNOWN_SITE)
            .map(str::to_string)
    });

    Ok(User {
        id,
        name,
        email,
        role,
        site_id,
        site_name,
    })
}

pub fn normalize_material(value: &Value) -> Result<Material, ApiError> {
    let record = Record::new(value, "material")?;
    Ok(Material {
        id: record.require_text(&["id", "_id", "materialId", "material_id"], "material")?,
        name: record.require_text(&["name", "materialName", "material_name"], "material")?,
        category: record
            .text(&["category"])
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        unit: record
            .text(&["unit"])
            .unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        specifications: record.field(&["specifications"]).map(|spec| match spec {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
    })
}

/// Material list; a lone material object becomes a one-element list.
pub fn material_list_from(payload: &Value) -> Result<Vec<Material>, ApiError> {
    one_or_many(payload)
        .into_iter()
        .map(normalize_material)
        .collect()
}

pub fn normalize_site(value: &Value) -> Result<Site, ApiError> {
    let record = Record::new(value, "site")?;
    let id = record.require_text(&["id", "_id", "siteId", "site_id"], "site")?;
    let name = resolve_site_name(&id, record.text(&["name", "siteName", "site_name"]));
    Ok(Site {
        id,
        name,
        location: record.text(&["location", "address"]),
    })
}

pub fn site_list_from(payload: &Value) -> Result<Vec<Site>, ApiError> {
    one_or_many(payload).into_iter().map(normalize_site).collect()
}

// ============================================================================
// Indents
// ============================================================================

fn parse_timestamp(text: Option<String>) -> Option<DateTime<Utc>> {
    let text = text?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn normalize_requested_material(value: &Value) -> Result<RequestedMaterial, ApiError> {
    let record = Record::new(value, "indent material")?;
    let material_id = record
        .text(&["materialId", "material_id", "id"])
        .unwrap_or_default();
    let name = record
        .text(&["name", "materialName", "material_name"])
        .unwrap_or_else(|| material_id.clone());

    Ok(RequestedMaterial {
        material_id,
        name,
        quantity: record.number(&["quantity", "qty"]).unwrap_or(0.0),
        specifications: record.field(&["specifications"]).cloned(),
    })
}

/// Material lines of an indent record.
///
/// The list may come under several names; a record carrying a single
/// `material_name` instead of a list yields one line built from the record.
pub fn requested_materials_from(value: &Value) -> Result<Vec<RequestedMaterial>, ApiError> {
    let record = Record::new(value, "indent")?;

    if let Some(items) = record.list(&[
        "requestedMaterials",
        "requested_materials",
        "materials",
        "items",
    ]) {
        return items
            .into_iter()
            .map(normalize_requested_material)
            .collect();
    }

    match record.text(&["material_name", "materialName"]) {
        Some(name) => Ok(vec![RequestedMaterial {
            material_id: record
                .text(&["materialId", "material_id"])
                .unwrap_or_default(),
            name,
            quantity: record.number(&["quantity", "qty"]).unwrap_or(0.0),
            specifications: record.field(&["specifications"]).cloned(),
        }]),
        None => Ok(Vec::new()),
    }
}

fn indent_status_from(record: &Record<'_>) -> Result<IndentStatus, ApiError> {
    match record.text(&["status"]) {
        None => Ok(IndentStatus::Pending),
        Some(status) => IndentStatus::parse(&status)
            .ok_or_else(|| ApiError::malformed(format!("unknown indent status '{}'", status))),
    }
}

/// Indent record in any observed shape.
///
/// The site name comes from the backend or the lookup table, the status
/// defaults to pending, and `total_items` is the number of material lines.
pub fn normalize_indent(value: &Value) -> Result<Indent, ApiError> {
    let record = Record::new(value, "indent")?;
    let id = record.require_text(&["id", "_id", "indentId", "indent_id"], "indent")?;
    let site_id = record.text(&["siteId", "site_id"]).unwrap_or_default();
    let site_name = resolve_site_name(&site_id, record.text(&["siteName", "site_name"]));
    let requested_materials = requested_materials_from(value)?;

    Ok(Indent {
        total_items: requested_materials.len(),
        id,
        site_id,
        site_name,
        requested_materials,
        status: indent_status_from(&record)?,
        description: record.text(&["description", "notes"]),
        created_at: parse_timestamp(record.text(&["createdAt", "created_at"])),
    })
}

fn page_number(record: &Record<'_>, requested: Option<u32>) -> u32 {
    record
        .count(&["page", "currentPage"])
        .map(|p| p as u32)
        .or(requested)
        .unwrap_or(1)
}

/// `GET /indents` payload: a page object or a bare list.
pub fn indent_page_from(payload: &Value, requested_page: Option<u32>) -> Result<IndentPage, ApiError> {
    let (items, total, page) = match payload {
        Value::Object(_) => {
            let record = Record::new(payload, "indent page")?;
            let items = record
                .list(&["indents", "items", "results"])
                .unwrap_or_default();
            let total = record.count(&["total", "totalCount", "total_count"]);
            (items, total, page_number(&record, requested_page))
        }
        other => (one_or_many(other), None, requested_page.unwrap_or(1)),
    };

    let indents = items
        .into_iter()
        .map(normalize_indent)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(IndentPage {
        total: total.unwrap_or(indents.len() as u64),
        indents,
        page,
    })
}

// ============================================================================
// Orders
// ============================================================================

fn normalize_line_item(value: &Value) -> Result<OrderLineItem, ApiError> {
    let record = Record::new(value, "order line")?;
    let material_id = record
        .text(&["materialId", "material_id", "id"])
        .unwrap_or_default();
    Ok(OrderLineItem {
        name: record
            .text(&["name", "materialName", "material_name"])
            .unwrap_or_else(|| material_id.clone()),
        material_id,
        quantity: record.number(&["quantity", "qty"]).unwrap_or(0.0),
        unit_price: record
            .number(&["unitPrice", "unit_price", "price"])
            .unwrap_or(0.0),
    })
}

/// Sum of the line totals.
pub fn order_total_from_lines(lines: &[OrderLineItem]) -> f64 {
    lines.iter().map(OrderLineItem::line_total).sum()
}

/// Order record; a missing total is derived from the line items.
pub fn normalize_order(value: &Value) -> Result<Order, ApiError> {
    let record = Record::new(value, "order")?;
    let vendor = record
        .field(&["vendor"])
        .filter(|v| v.is_object())
        .and_then(|v| Record::new(v, "vendor").ok());

    let line_items = record
        .list(&["lineItems", "line_items", "materials", "items"])
        .unwrap_or_default()
        .into_iter()
        .map(normalize_line_item)
        .collect::<Result<Vec<_>, _>>()?;

    let total_value = record
        .number(&["totalValue", "total_value", "totalAmount", "total"])
        .unwrap_or_else(|| order_total_from_lines(&line_items));

    let status = match record.text(&["status"]) {
        None => OrderStatus::Pending,
        Some(status) => OrderStatus::parse(&status)
            .ok_or_else(|| ApiError::malformed(format!("unknown order status '{}'", status)))?,
    };

    Ok(Order {
        id: record.require_text(&["id", "_id", "orderId", "order_id"], "order")?,
        indent_id: record
            .text(&["indentId", "indent_id"])
            .unwrap_or_default(),
        vendor_name: record
            .text(&["vendorName", "vendor_name"])
            .or_else(|| vendor.and_then(|v| v.text(&["name"])))
            .unwrap_or_default(),
        vendor_contact: record
            .text(&["vendorContact", "vendor_contact"])
            .or_else(|| vendor.and_then(|v| v.text(&["contact", "phone", "email"])))
            .unwrap_or_default(),
        line_items,
        total_value,
        status,
        created_at: parse_timestamp(record.text(&["createdAt", "created_at"])),
        expected_delivery: parse_timestamp(
            record.text(&["expectedDelivery", "expected_delivery"]),
        ),
    })
}

/// `GET /orders` payload: a page object or a bare list.
pub fn order_page_from(payload: &Value, requested_page: Option<u32>) -> Result<OrderPage, ApiError> {
    let (items, total, page) = match payload {
        Value::Object(_) => {
            let record = Record::new(payload, "order page")?;
            let items = record
                .list(&["orders", "items", "results"])
                .unwrap_or_default();
            let total = record.count(&["total", "totalCount", "total_count"]);
            (items, total, page_number(&record, requested_page))
        }
        other => (one_or_many(other), None, requested_page.unwrap_or(1)),
    };

    let orders = items
        .into_iter()
        .map(normalize_order)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OrderPage {
        total: total.unwrap_or(orders.len() as u64),
        orders,
        page,
    })
}

// ============================================================================
// Reports
// ============================================================================

/// Chart series given as a list of `{name, value}` or as a `{name: value}` map.
pub fn chart_points_from(value: Option<&Value>) -> Vec<ChartPoint> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let record = Record::new(item, "chart point").ok()?;
                let name = record.text(&["name", "label", "month", "status", "category"])?;
                let value = record
                    .number(&["value", "count", "total", "amount"])
                    .unwrap_or(0.0);
                Some(ChartPoint::new(name, value))
            })
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(name, v)| v.as_f64().map(|value| ChartPoint::new(name.clone(), value)))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn dashboard_from(payload: &Value) -> Result<DashboardStats, ApiError> {
    if payload.is_null() {
        return Ok(DashboardStats::default());
    }
    let record = Record::new(payload, "dashboard")?;

    let recent_indents = record
        .list(&["recentIndents", "recent_indents"])
        .unwrap_or_default()
        .into_iter()
        .map(normalize_indent)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DashboardStats {
        total_indents: record.count(&["totalIndents", "total_indents"]).unwrap_or(0),
        pending_approval: record
            .count(&["pendingApproval", "pending_approval", "pendingIndents"])
            .unwrap_or(0),
        approved_indents: record
            .count(&["approvedIndents", "approved_indents"])
            .unwrap_or(0),
        received_indents: record
            .count(&["receivedIndents", "received_indents"])
            .unwrap_or(0),
        total_value: record.number(&["totalValue", "total_value"]).unwrap_or(0.0),
        this_month_indents: record
            .count(&["thisMonthIndents", "this_month_indents"])
            .unwrap_or(0),
        recent_indents,
        chart_data: chart_points_from(record.field(&["chartData", "chart_data"])),
        status_distribution: chart_points_from(
            record.field(&["statusDistribution", "status_distribution"]),
        ),
    }
    .with_derived_distribution())
}

/// Monthly report; the requested period is used when the backend omits it.
pub fn monthly_report_from(payload: &Value, month: u32, year: i32) -> Result<MonthlyReport, ApiError> {
    if payload.is_null() {
        return Ok(MonthlyReport {
            month,
            year,
            ..Default::default()
        });
    }
    let record = Record::new(payload, "monthly report")?;

    Ok(MonthlyReport {
        month: record.count(&["month"]).map(|m| m as u32).unwrap_or(month),
        year: record.number(&["year"]).map(|y| y as i32).unwrap_or(year),
        total_indents: record.count(&["totalIndents", "total_indents"]).unwrap_or(0),
        approved_indents: record
            .count(&["approvedIndents", "approved_indents"])
            .unwrap_or(0),
        total_value: record.number(&["totalValue", "total_value"]).unwrap_or(0.0),
        avg_processing_days: record
            .number(&["avgProcessingTime", "avgProcessingDays", "avg_processing_days"])
            .unwrap_or(0.0),
        chart_data: chart_points_from(record.field(&["chartData", "chart_data"])),
        category_breakdown: chart_points_from(
            record.field(&["categoryBreakdown", "category_breakdown"]),
        ),
        site_breakdown: chart_points_from(record.field(&["siteBreakdown", "site_breakdown"])),
    })
}

// ============================================================================
// Auth and upload payloads
// ============================================================================

pub fn login_grant_from(payload: Value) -> Result<AuthGrant, ApiError> {
    let login: LoginPayload = serde_json::from_value(payload).map_err(ApiError::malformed)?;
    if login.token.trim().is_empty() {
        return Err(ApiError::malformed("empty token"));
    }
    Ok(AuthGrant {
        token: login.token,
        user: normalize_user(&login.user)?,
    })
}

pub fn uploaded_receipt_from(payload: Value) -> Result<UploadedReceipt, ApiError> {
    let upload: UploadPayload = serde_json::from_value(payload).map_err(ApiError::malformed)?;
    Ok(UploadedReceipt { url: upload.url })
}

// ============================================================================
// Outbound bodies
// ============================================================================

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

/// `POST /indents`
pub fn create_indent_body(indent: &NewIndent) -> Value {
    let materials: Vec<Value> = indent
        .materials
        .iter()
        .map(|line| {
            let mut map = Map::new();
            map.insert("material_id".to_string(), json!(line.material_id));
            map.insert("quantity".to_string(), json!(line.quantity));
            insert_opt(&mut map, "specifications", line.specifications.clone());
            Value::Object(map)
        })
        .collect();

    let mut body = Map::new();
    body.insert("site_id".to_string(), json!(indent.site_id));
    body.insert("materials".to_string(), Value::Array(materials));
    insert_opt(
        &mut body,
        "description",
        indent.description.as_ref().map(|d| json!(d)),
    );
    Value::Object(body)
}

/// `PATCH /indents/:id/approve`
pub fn approval_body(decision: &ApprovalDecision) -> Value {
    let mut body = Map::new();
    body.insert("approved".to_string(), json!(decision.approved));
    insert_opt(&mut body, "notes", decision.notes.as_ref().map(|n| json!(n)));
    Value::Object(body)
}

/// `PATCH /indents/:id/receive`
pub fn receipt_body(confirmation: &ReceiptConfirmation) -> Value {
    let mut body = Map::new();
    body.insert("material_id".to_string(), json!(confirmation.material_id));
    body.insert(
        "quantity_received".to_string(),
        json!(confirmation.quantity_received),
    );
    body.insert("is_damaged".to_string(), json!(confirmation.is_damaged));
    insert_opt(
        &mut body,
        "damage_description",
        confirmation
            .damage_description
            .as_ref()
            .map(|d| json!(d)),
    );
    Value::Object(body)
}

/// `PATCH /indents/:id/status`
pub fn status_body(status: IndentStatus, notes: Option<&str>) -> Value {
    let mut body = Map::new();
    body.insert("status".to_string(), json!(status.as_str()));
    insert_opt(&mut body, "notes", notes.map(|n| json!(n)));
    Value::Object(body)
}

/// `POST /orders`
pub fn create_order_body(order: &NewOrder) -> Value {
    json!({
        "indent_id": order.indent_id,
        "vendor_id": order.vendor_id,
        "materials": order
            .materials
            .iter()
            .map(|line| json!({
                "material_id": line.material_id,
                "quantity": line.quantity,
                "unit_price": line.unit_price,
            }))
            .collect::<Vec<_>>(),
    })
}

/// `POST /upload`: the file travels base64-encoded inside the JSON body.
pub fn upload_body(upload: &ReceiptUpload) -> Value {
    json!({
        "base64": STANDARD.encode(&upload.bytes),
        "indent_id": upload.indent_id,
        "file_name": upload.file_name,
        "content_type": upload.content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteindent_core::indent::IndentLine;
    use siteindent_core::order::OrderLine;

    #[test]
    fn test_single_material_indent_normalizes() {
        let raw = json!({"id": "x", "material_name": "Cement", "siteId": "site-chembur"});
        let indent = normalize_indent(&raw).unwrap();

        assert_eq!(indent.site_name, "Chembur Site");
        assert_eq!(indent.total_items, 1);
        assert_eq!(indent.requested_materials[0].name, "Cement");
        assert_eq!(indent.status, IndentStatus::Pending);
    }

    #[test]
    fn test_indent_with_material_list() {
        let raw = json!({
            "id": 17,
            "site_id": "site-unknown",
            "status": "approved",
            "createdAt": "2024-03-05T10:15:00Z",
            "materials": [
                {"materialId": "m1", "name": "Cement", "quantity": 50},
                {"material_id": "m2", "material_name": "Sand", "quantity": "2.5"}
            ]
        });
        let indent = normalize_indent(&raw).unwrap();

        assert_eq!(indent.id, "17");
        assert_eq!(indent.site_name, UNKNOWN_SITE);
        assert_eq!(indent.status, IndentStatus::Approved);
        assert_eq!(indent.total_items, 2);
        assert_eq!(indent.requested_materials[1].quantity, 2.5);
        assert!(indent.created_at.is_some());
    }

    #[test]
    fn test_backend_site_name_wins() {
        let raw = json!({"id": "y", "siteId": "site-chembur", "siteName": "Chembur Phase II"});
        assert_eq!(normalize_indent(&raw).unwrap().site_name, "Chembur Phase II");
    }

    #[test]
    fn test_unknown_indent_status_is_malformed() {
        let raw = json!({"id": "z", "status": "LOST"});
        assert_eq!(normalize_indent(&raw).unwrap_err().status, 502);
    }

    #[test]
    fn test_material_list_wraps_single_object() {
        let single = json!({"id": "m1", "name": "Cement", "unit": "bags"});
        let list = material_list_from(&single).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category, DEFAULT_CATEGORY);

        assert!(material_list_from(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_order_total_derived_from_lines() {
        let raw = json!({
            "id": "o1",
            "indentId": "i1",
            "vendor": {"name": "Shree Traders", "phone": "98200 00000"},
            "materials": [
                {"materialId": "m1", "quantity": 10, "unitPrice": 350},
                {"materialId": "m2", "quantity": 2, "unit_price": 1200.5}
            ]
        });
        let order = normalize_order(&raw).unwrap();

        assert_eq!(order.total_value, 3500.0 + 2401.0);
        assert_eq!(order.vendor_name, "Shree Traders");
        assert_eq!(order.vendor_contact, "98200 00000");
        assert_eq!(order.status, OrderStatus::Pending);

        // Deterministic across calls
        assert_eq!(normalize_order(&raw).unwrap().total_value, order.total_value);
    }

    #[test]
    fn test_order_total_from_backend_is_kept() {
        let raw = json!({"id": "o2", "totalValue": 999, "status": "shipped"});
        let order = normalize_order(&raw).unwrap();
        assert_eq!(order.total_value, 999.0);
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_indent_page_shapes() {
        let page = indent_page_from(
            &json!({"indents": [{"id": "a"}, {"id": "b"}], "total": 12, "page": 2}),
            Some(2),
        )
        .unwrap();
        assert_eq!(page.indents.len(), 2);
        assert_eq!(page.total, 12);
        assert_eq!(page.page, 2);

        let bare = indent_page_from(&json!([{"id": "a"}]), Some(3)).unwrap();
        assert_eq!(bare.total, 1);
        assert_eq!(bare.page, 3);
    }

    #[test]
    fn test_normalize_user_accepts_role_spellings() {
        let user = normalize_user(&json!({
            "id": "u1",
            "name": "Asha",
            "email": "asha@example.com",
            "role": "Site Engineer",
            "siteId": "site-thane"
        }))
        .unwrap();
        assert_eq!(user.role, Role::SiteEngineer);
        assert_eq!(user.site_name.as_deref(), Some("Thane Site"));

        let err = normalize_user(&json!({"id": "u2", "role": "JANITOR"})).unwrap_err();
        assert!(err.message.contains("JANITOR"));
    }

    #[test]
    fn test_login_grant_requires_token() {
        let payload = json!({"token": "", "user": {"id": "u1", "role": "DIRECTOR"}});
        assert!(login_grant_from(payload).is_err());

        let payload = json!({"token": "t", "user": {"id": "u1", "role": "DIRECTOR"}});
        assert_eq!(login_grant_from(payload).unwrap().user.role, Role::Director);
    }

    #[test]
    fn test_dashboard_chart_shapes() {
        let stats = dashboard_from(&json!({
            "totalIndents": 4,
            "pendingApproval": "1",
            "chartData": [{"month": "Jan", "value": 3}],
            "statusDistribution": {"PENDING": 1, "APPROVED": 3}
        }))
        .unwrap();
        assert_eq!(stats.total_indents, 4);
        assert_eq!(stats.pending_approval, 1);
        assert_eq!(stats.chart_data, vec![ChartPoint::new("Jan", 3.0)]);
        assert_eq!(stats.status_distribution.len(), 2);
    }

    #[test]
    fn test_monthly_report_defaults_period() {
        let report = monthly_report_from(&json!({"totalIndents": 9}), 3, 2024).unwrap();
        assert_eq!((report.month, report.year), (3, 2024));
        assert_eq!(report.total_indents, 9);
    }

    #[test]
    fn test_create_indent_body_uses_backend_names() {
        let body = create_indent_body(&NewIndent {
            site_id: "site-powai".to_string(),
            description: None,
            materials: vec![IndentLine::new("m1", 5.0)],
        });
        assert_eq!(
            body,
            json!({"site_id": "site-powai", "materials": [{"material_id": "m1", "quantity": 5.0}]})
        );
    }

    #[test]
    fn test_receipt_and_status_bodies() {
        let body = receipt_body(&ReceiptConfirmation {
            material_id: "m1".to_string(),
            quantity_received: 8.0,
            is_damaged: true,
            damage_description: Some("Two bags torn".to_string()),
        });
        assert_eq!(body["is_damaged"], json!(true));
        assert_eq!(body["damage_description"], json!("Two bags torn"));

        assert_eq!(
            status_body(IndentStatus::Closed, None),
            json!({"status": "CLOSED"})
        );
        assert_eq!(
            approval_body(&ApprovalDecision::reject(Some("Over budget".to_string()))),
            json!({"approved": false, "notes": "Over budget"})
        );
    }

    #[test]
    fn test_order_and_upload_bodies() {
        let body = create_order_body(&NewOrder {
            indent_id: "i1".to_string(),
            vendor_id: "v1".to_string(),
            materials: vec![OrderLine {
                material_id: "m1".to_string(),
                quantity: 2.0,
                unit_price: 10.0,
            }],
        });
        assert_eq!(body["materials"][0]["unit_price"], json!(10.0));

        let body = upload_body(&ReceiptUpload {
            indent_id: "i1".to_string(),
            file_name: "receipt.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: b"hello".to_vec(),
        });
        assert_eq!(body["base64"], json!("aGVsbG8="));
        assert_eq!(body["indent_id"], json!("i1"));
    }
}
