use apache_avro::types::Value;
use apache_avro::Schema;

use super::domain::MortgageApplicationRecord;

/// Writer schema registered for the value side of the applications topic.
pub const MORTGAGE_APPLICATION_SCHEMA: &str = r#"{
    "type": "record",
    "name": "MortgageApplication",
    "fields": [
        {"name": "application_id", "type": "string"},
        {"name": "customer_email", "type": "string"},
        {"name": "customer_name", "type": "string"},
        {"name": "applicant_id", "type": "string"},
        {"name": "income", "type": "long"},
        {"name": "loan_amount", "type": "long"},
        {"name": "property_value", "type": "long"},
        {"name": "property_address", "type": "string"},
        {"name": "property_state", "type": "string"},
        {"name": "payslips", "type": "string"},
        {"name": "employment_status", "type": "string"},
        {"name": "application_ts", "type": {"type": "long", "logicalType": "local-timestamp-millis"}}
    ]
}"#;

pub fn mortgage_application_schema() -> Result<Schema, apache_avro::Error> {
    Schema::parse_str(MORTGAGE_APPLICATION_SCHEMA)
}

/// Plain Avro binary datum for `record`, without registry framing.
pub fn encode_datum(schema: &Schema, record: &MortgageApplicationRecord) -> Result<Vec<u8>, apache_avro::Error> {
    apache_avro::to_avro_datum(schema, record.to_avro_value())
}

/// Topic-name strategy: the value schema of `topic` lives under `<topic>-value`.
pub fn value_subject(topic: &str) -> String {
    format!("{topic}-value")
}

impl MortgageApplicationRecord {
    /// Avro record value with fields in schema order.
    pub fn to_avro_value(&self) -> Value {
        Value::Record(vec![
            (
                "application_id".to_string(),
                Value::String(self.application_id.0.clone()),
            ),
            (
                "customer_email".to_string(),
                Value::String(self.customer_email.clone()),
            ),
            (
                "customer_name".to_string(),
                Value::String(self.customer_name.clone()),
            ),
            (
                "applicant_id".to_string(),
                Value::String(self.applicant_id.0.clone()),
            ),
            ("income".to_string(), Value::Long(self.income)),
            ("loan_amount".to_string(), Value::Long(self.loan_amount)),
            ("property_value".to_string(), Value::Long(self.property_value)),
            (
                "property_address".to_string(),
                Value::String(self.property_address.clone()),
            ),
            (
                "property_state".to_string(),
                Value::String(self.property_state.clone()),
            ),
            ("payslips".to_string(), Value::String(self.payslips.clone())),
            (
                "employment_status".to_string(),
                Value::String(self.employment_status.label().to_string()),
            ),
            (
                "application_ts".to_string(),
                Value::LocalTimestampMillis(self.application_ts),
            ),
        ])
    }
}
