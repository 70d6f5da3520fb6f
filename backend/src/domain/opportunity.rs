//! The opportunity record and its validation/coercion rules.
//!
//! The presentation boundary transmits every field as text; the domain is
//! where coercion happens. Required fields must be present and non-empty.
//! Optional numerics are parsed permissively: an unparseable value is
//! dropped from the record rather than failing the whole operation, so a
//! stored row either carries a valid number or no value at all — never a
//! null-as-zero or raw junk string. Calendar dates follow the same policy.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::UserId;

/// Raw field set as collected by the presentation layer.
///
/// Field names mirror the form that submits them; every value arrives as
/// text and `None` means the field was not submitted at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpportunityForm {
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

/// Domain error returned when a form fails required-field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpportunityValidationError {
    /// A required field was missing or blank once trimmed. Carries the
    /// transport-level field name so adapters can point at the input.
    MissingField(&'static str),
}

impl OpportunityValidationError {
    /// Transport-level name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
        }
    }
}

impl fmt::Display for OpportunityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
        }
    }
}

impl std::error::Error for OpportunityValidationError {}

/// Validated opportunity fields, ready to be attributed to an owner.
///
/// ## Invariants
/// - The five required fields are non-empty after trimming.
/// - `amount` and `travel_days`, when present, parsed cleanly from the form.
/// - Carries no owner: the service stamps `owner_id` from the session so a
///   client can never create a record on another user's behalf.
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityDraft {
    pub code: String,
    pub name: String,
    pub status: String,
    pub description: Option<String>,
    pub customer_info: String,
    pub pre_sales_owner: String,
    pub amount: Option<f64>,
    pub support_start_date: Option<NaiveDate>,
    pub support_end_date: Option<NaiveDate>,
    pub need_travel: bool,
    pub travel_days: Option<i32>,
    pub travel_location: Option<String>,
}

impl OpportunityDraft {
    /// Validate and coerce a raw form into a draft.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{OpportunityDraft, OpportunityForm};
    ///
    /// let form = OpportunityForm {
    ///     opportunity_code: Some("OPP-1".into()),
    ///     opportunity_name: Some("Deal".into()),
    ///     opportunity_status: Some("Active".into()),
    ///     customer_info: Some("Acme".into()),
    ///     pre_sales_owner: Some("Jo".into()),
    ///     opportunity_amount: Some("abc".into()),
    ///     ..OpportunityForm::default()
    /// };
    /// let draft = OpportunityDraft::from_form(&form).unwrap();
    /// assert_eq!(draft.amount, None);
    /// ```
    pub fn from_form(form: &OpportunityForm) -> Result<Self, OpportunityValidationError> {
        let code = required(&form.opportunity_code, "opportunityCode")?;
        let name = required(&form.opportunity_name, "opportunityName")?;
        let status = required(&form.opportunity_status, "opportunityStatus")?;
        let customer_info = required(&form.customer_info, "customerInfo")?;
        let pre_sales_owner = required(&form.pre_sales_owner, "preSalesOwner")?;

        Ok(Self {
            code,
            name,
            status,
            description: optional_text(&form.opportunity_description),
            customer_info,
            pre_sales_owner,
            amount: parse_amount(&form.opportunity_amount),
            support_start_date: parse_date(&form.support_start_date),
            support_end_date: parse_date(&form.support_end_date),
            need_travel: parse_flag(&form.need_travel),
            travel_days: parse_days(&form.travel_days),
            travel_location: optional_text(&form.travel_location),
        })
    }
}

fn required(
    value: &Option<String>,
    field: &'static str,
) -> Result<String, OpportunityValidationError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or(OpportunityValidationError::MissingField(field))
}

fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Permissive decimal coercion: unparseable or non-finite values are dropped.
fn parse_amount(value: &Option<String>) -> Option<f64> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|parsed| parsed.is_finite())
}

/// Permissive integer coercion for the travel day count.
fn parse_days(value: &Option<String>) -> Option<i32> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<i32>().ok())
}

/// ISO calendar date coercion, dropped when unparseable.
fn parse_date(value: &Option<String>) -> Option<NaiveDate> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

/// Checkbox serialisation: anything other than an affirmative token is false.
fn parse_flag(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(str::trim)
        .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1" || v.eq_ignore_ascii_case("on"))
}

/// A stored opportunity row, attributed and timestamped.
///
/// ## Invariants
/// - `owner_id` is set once at creation and never reassigned.
/// - `created_at` is set at insertion and immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    pub code: String,
    pub name: String,
    pub status: String,
    pub description: Option<String>,
    pub customer_info: String,
    pub pre_sales_owner: String,
    pub amount: Option<f64>,
    pub support_start_date: Option<NaiveDate>,
    pub support_end_date: Option<NaiveDate>,
    pub need_travel: bool,
    pub travel_days: Option<i32>,
    pub travel_location: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Opportunity {
    /// Attribute a draft to its owner with the given creation timestamp.
    pub fn from_draft(draft: OpportunityDraft, owner_id: UserId, created_at: DateTime<Utc>) -> Self {
        let OpportunityDraft {
            code,
            name,
            status,
            description,
            customer_info,
            pre_sales_owner,
            amount,
            support_start_date,
            support_end_date,
            need_travel,
            travel_days,
            travel_location,
        } = draft;
        Self {
            code,
            name,
            status,
            description,
            customer_info,
            pre_sales_owner,
            amount,
            support_start_date,
            support_end_date,
            need_travel,
            travel_days,
            travel_location,
            owner_id,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn minimal_form() -> OpportunityForm {
        OpportunityForm {
            opportunity_code: Some("OPP-1".to_owned()),
            opportunity_name: Some("Deal".to_owned()),
            opportunity_status: Some("Active".to_owned()),
            customer_info: Some("Acme".to_owned()),
            pre_sales_owner: Some("Jo".to_owned()),
            ..OpportunityForm::default()
        }
    }

    #[rstest]
    #[case("opportunity_code", "opportunityCode")]
    #[case("opportunity_name", "opportunityName")]
    #[case("opportunity_status", "opportunityStatus")]
    #[case("customer_info", "customerInfo")]
    #[case("pre_sales_owner", "preSalesOwner")]
    fn each_required_field_is_enforced(#[case] field: &str, #[case] expected: &'static str) {
        let mut form = minimal_form();
        match field {
            "opportunity_code" => form.opportunity_code = Some("  ".to_owned()),
            "opportunity_name" => form.opportunity_name = None,
            "opportunity_status" => form.opportunity_status = Some(String::new()),
            "customer_info" => form.customer_info = None,
            "pre_sales_owner" => form.pre_sales_owner = Some("   ".to_owned()),
            other => panic!("unknown field under test: {other}"),
        }
        let err = OpportunityDraft::from_form(&form).expect_err("missing field must fail");
        assert_eq!(err, OpportunityValidationError::MissingField(expected));
        assert_eq!(err.field(), expected);
    }

    #[rstest]
    #[case(Some("1200.50"), Some(1200.50))]
    #[case(Some("abc"), None)]
    #[case(Some("NaN"), None)]
    #[case(Some("inf"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn amount_is_parsed_or_absent(#[case] raw: Option<&str>, #[case] expected: Option<f64>) {
        let mut form = minimal_form();
        form.opportunity_amount = raw.map(str::to_owned);
        let draft = OpportunityDraft::from_form(&form).expect("valid form");
        assert_eq!(draft.amount, expected);
    }

    #[rstest]
    #[case(Some("5"), Some(5))]
    #[case(Some("five"), None)]
    #[case(Some("2.5"), None)]
    #[case(None, None)]
    fn travel_days_are_parsed_or_absent(#[case] raw: Option<&str>, #[case] expected: Option<i32>) {
        let mut form = minimal_form();
        form.travel_days = raw.map(str::to_owned);
        let draft = OpportunityDraft::from_form(&form).expect("valid form");
        assert_eq!(draft.travel_days, expected);
    }

    #[rstest]
    #[case(Some("true"), true)]
    #[case(Some("TRUE"), true)]
    #[case(Some("1"), true)]
    #[case(Some("on"), true)]
    #[case(Some("false"), false)]
    #[case(Some("yes"), false)]
    #[case(None, false)]
    fn need_travel_defaults_false(#[case] raw: Option<&str>, #[case] expected: bool) {
        let mut form = minimal_form();
        form.need_travel = raw.map(str::to_owned);
        let draft = OpportunityDraft::from_form(&form).expect("valid form");
        assert_eq!(draft.need_travel, expected);
    }

    #[rstest]
    #[case(Some("2026-02-01"), Some((2026, 2, 1)))]
    #[case(Some("01/02/2026"), None)]
    #[case(Some("not a date"), None)]
    #[case(None, None)]
    fn dates_are_parsed_or_absent(
        #[case] raw: Option<&str>,
        #[case] expected: Option<(i32, u32, u32)>,
    ) {
        let mut form = minimal_form();
        form.support_start_date = raw.map(str::to_owned);
        let draft = OpportunityDraft::from_form(&form).expect("valid form");
        let expected_date =
            expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(draft.support_start_date, expected_date);
    }

    #[rstest]
    fn start_and_end_dates_are_independent() {
        let mut form = minimal_form();
        form.support_start_date = Some("2026-12-31".to_owned());
        form.support_end_date = Some("2026-01-01".to_owned());
        let draft = OpportunityDraft::from_form(&form).expect("no ordering constraint");
        assert!(draft.support_start_date > draft.support_end_date);
    }

    #[rstest]
    fn blank_optional_text_collapses_to_none() {
        let mut form = minimal_form();
        form.opportunity_description = Some("   ".to_owned());
        form.travel_location = Some(" Berlin ".to_owned());
        let draft = OpportunityDraft::from_form(&form).expect("valid form");
        assert_eq!(draft.description, None);
        assert_eq!(draft.travel_location.as_deref(), Some("Berlin"));
    }
}
