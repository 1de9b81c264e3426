use clap::Args;
use riverbank_intake::error::AppError;
use riverbank_intake::workflows::mortgage::schema::{encode_datum, mortgage_application_schema};
use riverbank_intake::workflows::mortgage::{
    assemble_now, ApplicationSubmission, EncodingError, MortgageApplicationRecord,
};

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Applicant name as typed into the form
    #[arg(long)]
    pub(crate) name: String,
    /// Property value in whole currency units
    #[arg(long)]
    pub(crate) property_value: i64,
    /// Requested loan amount in whole currency units
    #[arg(long)]
    pub(crate) loan_amount: i64,
    /// Declared annual income in whole currency units
    #[arg(long)]
    pub(crate) annual_income: i64,
}

impl From<PreviewArgs> for ApplicationSubmission {
    fn from(args: PreviewArgs) -> Self {
        Self {
            name: args.name,
            property_value: args.property_value,
            loan_amount: args.loan_amount,
            annual_income: args.annual_income,
        }
    }
}

/// Assembles and encodes one record locally. Nothing is registered or published.
pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let record = assemble_now(args.into());
    let datum_len = datum_len(&record)?;

    println!("{}", render(&record)?);
    println!("avro datum: {datum_len} bytes (+5 byte registry header)");
    Ok(())
}

fn render(record: &MortgageApplicationRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

fn datum_len(record: &MortgageApplicationRecord) -> Result<usize, EncodingError> {
    let schema = mortgage_application_schema()?;
    Ok(encode_datum(&schema, record)?.len())
}
