use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ConversionError, ValidationError};

/// Fields a submission must carry, in the order presence is checked.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "property_value", "loan_amount", "annual_income"];

/// Identifier wrapper for a single submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer identifier such as `C-100000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Employment status attached to the record.
///
/// `FullEmployed` is not one of the canonical values. Downstream consumers
/// already receive the literal `Full-employed` for one applicant, so it is kept
/// as its own variant rather than folded into `Employed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    #[serde(rename = "EMPLOYED")]
    Employed,
    #[serde(rename = "SELF_EMPLOYED")]
    SelfEmployed,
    #[serde(rename = "RETIRED")]
    Retired,
    #[serde(rename = "UNEMPLOYED")]
    Unemployed,
    #[serde(rename = "Full-employed")]
    FullEmployed,
}

impl EmploymentStatus {
    pub const CANONICAL: [Self; 4] = [
        Self::Employed,
        Self::SelfEmployed,
        Self::Retired,
        Self::Unemployed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Employed => "EMPLOYED",
            Self::SelfEmployed => "SELF_EMPLOYED",
            Self::Retired => "RETIRED",
            Self::Unemployed => "UNEMPLOYED",
            Self::FullEmployed => "Full-employed",
        }
    }

    pub const fn is_canonical(self) -> bool {
        !matches!(self, Self::FullEmployed)
    }
}

/// Typed view of the inbound form payload after boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub name: String,
    pub property_value: i64,
    pub loan_amount: i64,
    pub annual_income: i64,
}

impl ApplicationSubmission {
    /// Parses a raw request body. Malformed JSON counts as a validation failure.
    pub fn from_slice(body: &[u8]) -> Result<Self, SubmissionInputError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|err| ValidationError::MalformedBody(err.to_string()))?;
        Self::from_json(&value)
    }

    /// Checks presence of every required field (first missing wins), then
    /// converts each one. Extra fields are ignored.
    pub fn from_json(value: &Value) -> Result<Self, SubmissionInputError> {
        let object = value.as_object().ok_or_else(|| {
            ValidationError::MalformedBody(format!("expected a JSON object, got {}", kind(value)))
        })?;

        if let Some(field) = REQUIRED_FIELDS
            .into_iter()
            .find(|field| !object.contains_key(*field))
        {
            return Err(ValidationError::MissingField(field).into());
        }

        Ok(Self {
            name: string_field(object, "name")?,
            annual_income: integer_field(object, "annual_income")?,
            loan_amount: integer_field(object, "loan_amount")?,
            property_value: integer_field(object, "property_value")?,
        })
    }
}

/// Input-side failures: either the client omitted something or sent a value
/// that cannot be coerced.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionInputError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

fn string_field(object: &Map<String, Value>, field: &'static str) -> Result<String, ConversionError> {
    match object.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(ConversionError::new(field, format!("expected a string, got {}", kind(other)))),
        None => Err(ConversionError::new(field, "value is absent")),
    }
}

fn integer_field(object: &Map<String, Value>, field: &'static str) -> Result<i64, ConversionError> {
    let value = object
        .get(field)
        .ok_or_else(|| ConversionError::new(field, "value is absent"))?;
    coerce_integer(value).map_err(|reason| ConversionError::new(field, reason))
}

/// Integer coercion for form values: integers pass, floats truncate toward
/// zero, booleans become 0/1 and decimal strings are parsed.
pub(crate) fn coerce_integer(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            match number.as_f64() {
                Some(float) if float.is_finite() && float.abs() < i64::MAX as f64 => {
                    Ok(float.trunc() as i64)
                }
                _ => Err(format!("{number} does not fit in a 64-bit integer")),
            }
        }
        Value::Bool(flag) => Ok(i64::from(*flag)),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("invalid literal for integer: '{text}'")),
        other => Err(format!("expected a number, got {}", kind(other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Flat record published for every accepted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageApplicationRecord {
    pub application_id: ApplicationId,
    pub customer_email: String,
    pub customer_name: String,
    pub applicant_id: ApplicantId,
    pub income: i64,
    pub loan_amount: i64,
    pub property_value: i64,
    pub property_address: String,
    pub property_state: String,
    pub payslips: String,
    pub employment_status: EmploymentStatus,
    /// Epoch milliseconds, tagged `local-timestamp-millis` on the wire.
    pub application_ts: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "name": "Jane Roe",
            "property_value": 500000,
            "loan_amount": 400000,
            "annual_income": 120000,
            "notes": "ignored"
        })
    }

    #[test]
    fn parses_complete_payload_and_ignores_extras() {
        let submission = ApplicationSubmission::from_json(&payload()).expect("valid payload");
        assert_eq!(
            submission,
            ApplicationSubmission {
                name: "Jane Roe".to_string(),
                property_value: 500000,
                loan_amount: 400000,
                annual_income: 120000,
            }
        );
    }

    #[test]
    fn first_missing_field_wins() {
        let mut body = payload();
        let object = body.as_object_mut().expect("object");
        object.remove("loan_amount");
        object.remove("annual_income");

        let err = ApplicationSubmission::from_json(&body).expect_err("fields missing");
        assert!(matches!(
            err,
            SubmissionInputError::Validation(ValidationError::MissingField("loan_amount"))
        ));
        assert_eq!(err.to_string(), "Missing required field: loan_amount");
    }

    #[test]
    fn each_required_field_is_named_when_absent() {
        for field in REQUIRED_FIELDS {
            let mut body = payload();
            body.as_object_mut().expect("object").remove(field);
            let err = ApplicationSubmission::from_json(&body).expect_err("field missing");
            assert_eq!(err.to_string(), format!("Missing required field: {field}"));
        }
    }

    #[test]
    fn null_counts_as_present_but_fails_conversion() {
        let mut body = payload();
        body["annual_income"] = Value::Null;
        let err = ApplicationSubmission::from_json(&body).expect_err("null is not an integer");
        assert!(matches!(err, SubmissionInputError::Conversion(_)));
        assert!(err.to_string().contains("annual_income"));
    }

    #[test]
    fn numeric_strings_and_floats_are_coerced() {
        assert_eq!(coerce_integer(&json!(" 250000 ")), Ok(250000));
        assert_eq!(coerce_integer(&json!(1999.9)), Ok(1999));
        assert_eq!(coerce_integer(&json!(-5.5)), Ok(-5));
        assert_eq!(coerce_integer(&json!(true)), Ok(1));
        assert!(coerce_integer(&json!("12k")).is_err());
        assert!(coerce_integer(&json!([1])).is_err());
    }

    #[test]
    fn non_string_name_is_a_conversion_error() {
        let mut body = payload();
        body["name"] = json!(42);
        let err = ApplicationSubmission::from_json(&body).expect_err("name must be text");
        assert!(matches!(err, SubmissionInputError::Conversion(_)));
    }

    #[test]
    fn malformed_body_is_a_validation_error() {
        let err = ApplicationSubmission::from_slice(b"{not json").expect_err("bad json");
        assert!(matches!(
            err,
            SubmissionInputError::Validation(ValidationError::MalformedBody(_))
        ));

        let err = ApplicationSubmission::from_json(&json!([1, 2])).expect_err("array body");
        assert!(err.to_string().contains("expected a JSON object, got array"));
    }

    #[test]
    fn employment_status_labels_match_serde_names() {
        for status in EmploymentStatus::CANONICAL {
            assert!(status.is_canonical());
            assert_eq!(
                serde_json::to_value(status).expect("serializes"),
                json!(status.label())
            );
        }
        assert!(!EmploymentStatus::FullEmployed.is_canonical());
        assert_eq!(
            serde_json::to_value(EmploymentStatus::FullEmployed).expect("serializes"),
            json!("Full-employed")
        );
    }
}
