use chrono::Local;
use rand::Rng;

use super::domain::{
    ApplicantId, ApplicationId, ApplicationSubmission, EmploymentStatus,
    MortgageApplicationRecord,
};
use super::synthetic::{
    generate_address, generate_email, generate_state, payslip_reference,
};

/// Applicants whose identity is pinned regardless of randomness.
const RESERVED_APPLICANTS: [(&str, &str, EmploymentStatus); 2] = [
    ("john doe", "C-100000", EmploymentStatus::FullEmployed),
    ("omar soli", "C-200000", EmploymentStatus::Unemployed),
];

/// Resolves the applicant id and employment status for a customer name.
///
/// Reserved names match after trimming and case-folding. Everyone else gets
/// an id in the `C-3xxxxx` band and a uniformly drawn canonical status.
pub fn resolve_identity<R: Rng + ?Sized>(name: &str, rng: &mut R) -> (ApplicantId, EmploymentStatus) {
    let normalized = name.trim().to_lowercase();
    if let Some((_, id, status)) = RESERVED_APPLICANTS
        .iter()
        .find(|(reserved, _, _)| *reserved == normalized)
    {
        return (ApplicantId((*id).to_string()), *status);
    }

    let suffix: u32 = rng.random_range(10000..=99999);
    let statuses = EmploymentStatus::CANONICAL;
    let status = statuses[rng.random_range(0..statuses.len())];
    (ApplicantId(format!("C-3{suffix}")), status)
}

/// Merges the submitted fields with generated ones into a publishable record.
pub fn assemble<R: Rng + ?Sized>(
    submission: ApplicationSubmission,
    rng: &mut R,
    application_ts: i64,
) -> MortgageApplicationRecord {
    let (applicant_id, employment_status) = resolve_identity(&submission.name, rng);
    let customer_email = generate_email(&submission.name, rng);
    let property_address = generate_address(rng);
    let property_state = generate_state(rng).to_string();
    let payslips = payslip_reference(&applicant_id);

    MortgageApplicationRecord {
        application_id: ApplicationId::generate(),
        customer_email,
        customer_name: submission.name,
        applicant_id,
        income: submission.annual_income,
        loan_amount: submission.loan_amount,
        property_value: submission.property_value,
        property_address,
        property_state,
        payslips,
        employment_status,
        application_ts,
    }
}

/// [`assemble`] with the thread-local generator and the current wall clock.
pub fn assemble_now(submission: ApplicationSubmission) -> MortgageApplicationRecord {
    let mut rng = rand::rng();
    assemble(submission, &mut rng, Local::now().timestamp_millis())
}
