//! Opportunity API handlers.
//!
//! ```text
//! POST   /api/v1/opportunities
//! GET    /api/v1/opportunities
//! DELETE /api/v1/opportunities/{code}
//! ```
//!
//! The create payload is a flat string-keyed field set: every value crosses
//! the transport as text and all coercion (numbers, dates, the travel flag)
//! happens in the domain, not here.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateOpportunityRequest, DeleteOpportunityRequest};
use crate::domain::{Error, Opportunity, OpportunityForm};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for creating an opportunity. All values are text.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOpportunityBody {
    pub opportunity_code: Option<String>,
    pub opportunity_name: Option<String>,
    pub opportunity_status: Option<String>,
    pub opportunity_description: Option<String>,
    pub customer_info: Option<String>,
    pub pre_sales_owner: Option<String>,
    pub opportunity_amount: Option<String>,
    pub support_start_date: Option<String>,
    pub support_end_date: Option<String>,
    pub need_travel: Option<String>,
    pub travel_days: Option<String>,
    pub travel_location: Option<String>,
}

impl From<CreateOpportunityBody> for OpportunityForm {
    fn from(value: CreateOpportunityBody) -> Self {
        Self {
            opportunity_code: value.opportunity_code,
            opportunity_name: value.opportunity_name,
            opportunity_status: value.opportunity_status,
            opportunity_description: value.opportunity_description,
            customer_info: value.customer_info,
            pre_sales_owner: value.pre_sales_owner,
            opportunity_amount: value.opportunity_amount,
            support_start_date: value.support_start_date,
            support_end_date: value.support_end_date,
            need_travel: value.need_travel,
            travel_days: value.travel_days,
            travel_location: value.travel_location,
        }
    }
}

/// Success envelope matching the presentation contract.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessBody {
    pub success: bool,
}

impl SuccessBody {
    fn ok() -> Self {
        Self { success: true }
    }
}

/// One stored opportunity, as rendered to the dashboard table.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityBody {
    pub opportunity_code: String,
    pub opportunity_name: String,
    pub opportunity_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_description: Option<String>,
    pub customer_info: String,
    pub pre_sales_owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date")]
    pub support_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date")]
    pub support_end_date: Option<String>,
    pub need_travel: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_location: Option<String>,
    pub owner_id: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Opportunity> for OpportunityBody {
    fn from(value: Opportunity) -> Self {
        Self {
            opportunity_code: value.code,
            opportunity_name: value.name,
            opportunity_status: value.status,
            opportunity_description: value.description,
            customer_info: value.customer_info,
            pre_sales_owner: value.pre_sales_owner,
            opportunity_amount: value.amount,
            support_start_date: value.support_start_date.map(|d| d.to_string()),
            support_end_date: value.support_end_date.map(|d| d.to_string()),
            need_travel: value.need_travel,
            travel_days: value.travel_days,
            travel_location: value.travel_location,
            owner_id: value.owner_id.to_string(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Create an opportunity attributed to the authenticated caller.
///
/// The owner is taken from the session, never from the payload, so a caller
/// cannot create a record on another user's behalf.
#[utoipa::path(
    post,
    path = "/api/v1/opportunities",
    request_body = CreateOpportunityBody,
    responses(
        (status = 200, description = "Opportunity created", body = SuccessBody),
        (status = 400, description = "Missing required field", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 502, description = "Store rejected the insert", body = Error)
    ),
    tags = ["opportunities"],
    operation_id = "createOpportunity",
    security(("SessionCookie" = []))
)]
#[post("/opportunities")]
pub async fn create_opportunity(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateOpportunityBody>,
) -> ApiResult<web::Json<SuccessBody>> {
    let owner = session.require_user_id()?;
    state
        .opportunities
        .create(CreateOpportunityRequest {
            owner,
            form: payload.into_inner().into(),
        })
        .await?;
    Ok(web::Json(SuccessBody::ok()))
}

/// List the caller's opportunities, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/opportunities",
    responses(
        (status = 200, description = "Opportunities owned by the caller", body = [OpportunityBody]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 502, description = "Store failed the query", body = Error)
    ),
    tags = ["opportunities"],
    operation_id = "listOpportunities",
    security(("SessionCookie" = []))
)]
#[get("/opportunities")]
pub async fn list_opportunities(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OpportunityBody>>> {
    let owner = session.require_user_id()?;
    let rows = state.opportunities_query.list(&owner).await?;
    Ok(web::Json(rows.into_iter().map(OpportunityBody::from).collect()))
}

/// Delete the caller's rows matching a code.
///
/// A code matching nothing the caller owns is a successful no-op; the
/// response does not distinguish the two outcomes.
#[utoipa::path(
    delete,
    path = "/api/v1/opportunities/{code}",
    params(("code" = String, Path, description = "Opportunity code to delete")),
    responses(
        (status = 200, description = "Delete completed", body = SuccessBody),
        (status = 400, description = "Blank code", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 502, description = "Store failed the delete", body = Error)
    ),
    tags = ["opportunities"],
    operation_id = "deleteOpportunity",
    security(("SessionCookie" = []))
)]
#[delete("/opportunities/{code}")]
pub async fn delete_opportunity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessBody>> {
    let owner = session.require_user_id()?;
    state
        .opportunities
        .delete(DeleteOpportunityRequest {
            owner,
            code: path.into_inner(),
        })
        .await?;
    Ok(web::Json(SuccessBody::ok()))
}

#[cfg(test)]
#[path = "opportunities_tests.rs"]
mod tests;
