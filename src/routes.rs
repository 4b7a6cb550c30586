use actix_web::{delete, error, get, post, put, web, HttpResponse};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::bill::{compute_bill_from_state, BillView};
use crate::error::BillError;
use crate::export::{self, Clipboard};
use crate::message::{export_payload, render_table};
use crate::schemas::{BillState, ExpenseKind, FieldValue, Tenant, TenantField, TenantName};
use crate::state::{apply, Action};

pub struct AppState {
    pub bill: Mutex<BillState>,
    pub clipboard: Box<dyn Clipboard>,
}

impl AppState {
    pub fn new(bill: BillState, clipboard: Box<dyn Clipboard>) -> Self {
        AppState {
            bill: Mutex::new(bill),
            clipboard,
        }
    }

    fn view(&self) -> BillView {
        compute_bill_from_state(&self.bill.lock())
    }

    fn dispatch(&self, action: Action) -> Result<BillView, BillError> {
        let mut bill = self.bill.lock();
        tracing::info!(?action, "updating bill");
        *bill = apply(&bill, action)?;
        Ok(compute_bill_from_state(&bill))
    }
}

#[derive(Deserialize)]
struct FieldValueJson {
    #[serde(default)]
    value: FieldValue,
}

#[derive(Deserialize, Serialize)]
struct PolicyJson {
    include_owner: bool,
}

#[derive(Serialize)]
struct MessageJson {
    name: TenantName,
    message: String,
}

#[get("/bill")]
async fn get_bill(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.view())
}

#[get("/bill/table")]
async fn get_table(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_table(&data.view()))
}

#[post("/tenants")]
async fn add_tenant(data: web::Data<AppState>, body: web::Bytes) -> actix_web::Result<HttpResponse> {
    // An empty body adds the same blank row as the form's button
    let tenant = if body.iter().all(u8::is_ascii_whitespace) {
        Tenant::default()
    } else {
        serde_json::from_slice(&body).map_err(error::ErrorBadRequest)?
    };
    Ok(HttpResponse::Ok().json(data.dispatch(Action::AddTenant(tenant))?))
}

#[delete("/tenants/{index}")]
async fn remove_tenant(
    data: web::Data<AppState>,
    index: web::Path<usize>,
) -> Result<HttpResponse, BillError> {
    let view = data.dispatch(Action::RemoveTenant(index.into_inner()))?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/tenants/{index}/{field}")]
async fn edit_tenant(
    data: web::Data<AppState>,
    path: web::Path<(usize, TenantField)>,
    json: web::Json<FieldValueJson>,
) -> Result<HttpResponse, BillError> {
    let (index, field) = path.into_inner();
    let view = data.dispatch(Action::EditTenant(index, field, json.into_inner().value))?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/expenses/{kind}")]
async fn edit_expense(
    data: web::Data<AppState>,
    kind: web::Path<ExpenseKind>,
    json: web::Json<FieldValueJson>,
) -> Result<HttpResponse, BillError> {
    let view = data.dispatch(Action::EditExpense(kind.into_inner(), json.into_inner().value))?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/policy")]
async fn set_policy(
    data: web::Data<AppState>,
    json: web::Json<PolicyJson>,
) -> Result<HttpResponse, BillError> {
    let view = data.dispatch(Action::SetIncludeOwner(json.include_owner))?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/policy/toggle")]
async fn toggle_policy(data: web::Data<AppState>) -> Result<HttpResponse, BillError> {
    let view = data.dispatch(Action::ToggleIncludeOwner)?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/messages")]
async fn get_messages(data: web::Data<AppState>) -> HttpResponse {
    let messages: Vec<MessageJson> = data
        .view()
        .rows
        .into_iter()
        .map(|row| MessageJson {
            name: row.name,
            message: row.message,
        })
        .collect();
    HttpResponse::Ok().json(messages)
}

#[post("/messages/copy")]
async fn copy_all(data: web::Data<AppState>) -> Result<HttpResponse, BillError> {
    let view = data.view();
    let payload = export_payload(view.rows.iter().map(|row| row.message.as_str()));
    let receipt = export::copy(data.clipboard.as_ref(), payload, export::copy_all_notice()).await?;
    Ok(HttpResponse::Ok().json(receipt))
}

#[post("/messages/{index}/copy")]
async fn copy_one(
    data: web::Data<AppState>,
    index: web::Path<usize>,
) -> Result<HttpResponse, BillError> {
    let index = index.into_inner();
    let row = data
        .view()
        .rows
        .into_iter()
        .nth(index)
        .ok_or(BillError::TenantNotFound(index))?;
    let notice = export::copy_one_notice(&row.name);
    let receipt = export::copy(data.clipboard.as_ref(), row.message, notice).await?;
    Ok(HttpResponse::Ok().json(receipt))
}

#[get("/messages/export")]
async fn download_messages(data: web::Data<AppState>) -> HttpResponse {
    let view = data.view();
    let payload = export_payload(view.rows.iter().map(|row| row.message.as_str()));
    export::download(payload, Utc::now().date_naive())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_bill)
        .service(get_table)
        .service(add_tenant)
        .service(remove_tenant)
        .service(edit_tenant)
        .service(edit_expense)
        .service(set_policy)
        .service(toggle_policy)
        .service(get_messages)
        .service(download_messages)
        .service(copy_all)
        .service(copy_one);
}
