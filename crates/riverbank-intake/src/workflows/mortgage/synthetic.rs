//! Fictitious customer attributes used to pad out form submissions.
//!
//! Nothing here is checked for real-world plausibility; values only need the
//! right shape for the downstream consumers.

use rand::Rng;

use super::domain::ApplicantId;

pub const EMAIL_DOMAINS: [&str; 4] = ["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

pub const STREET_NAMES: [&str; 9] = [
    "Main",
    "Oak",
    "Pine",
    "Maple",
    "Cedar",
    "Elm",
    "Washington",
    "Lincoln",
    "Jefferson",
];

pub const STREET_TYPES: [&str; 6] = ["St", "Ave", "Blvd", "Rd", "Ln", "Dr"];

pub const US_STATES: [&str; 50] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

pub const PAYSLIP_BUCKET: &str = "s3://riverbank-payslip-bucket";

/// Uniform pick from a non-empty table.
pub(crate) fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[&'static str]) -> &'static str {
    options[rng.random_range(0..options.len())]
}

/// `<lowercased name parts><4 digits>@<domain>`; characters outside
/// `[a-z0-9]` are dropped from the local part.
pub fn generate_email<R: Rng + ?Sized>(name: &str, rng: &mut R) -> String {
    let username: String = name
        .to_lowercase()
        .split_whitespace()
        .flat_map(str::chars)
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let suffix: u16 = rng.random_range(1000..=9999);
    format!("{username}{suffix}@{}", pick(rng, &EMAIL_DOMAINS))
}

pub fn generate_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number: u16 = rng.random_range(1..=9999);
    let street = pick(rng, &STREET_NAMES);
    let street_type = pick(rng, &STREET_TYPES);
    format!("{number} {street} {street_type}")
}

pub fn generate_state<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, &US_STATES)
}

pub fn payslip_reference(applicant_id: &ApplicantId) -> String {
    format!("{PAYSLIP_BUCKET}/{applicant_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_generated_email(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            && EMAIL_DOMAINS.contains(&domain)
    }

    #[test]
    fn email_joins_lowercased_name_parts_with_suffix() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let email = generate_email("  Mary  Ann Smith ", &mut rng);
            assert!(is_generated_email(&email), "unexpected email {email}");
            let local = email.split('@').next().expect("local part");
            assert!(local.starts_with("maryannsmith"));
            let suffix: u16 = local["maryannsmith".len()..].parse().expect("numeric suffix");
            assert!((1000..=9999).contains(&suffix));
        }
    }

    #[test]
    fn email_drops_punctuation_from_names() {
        let mut rng = StdRng::seed_from_u64(3);
        let email = generate_email("Seán O'Brien-Smith", &mut rng);
        assert!(is_generated_email(&email), "unexpected email {email}");
        assert!(email.starts_with("senobriensmith"));
    }

    #[test]
    fn address_uses_known_streets() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let address = generate_address(&mut rng);
            let parts: Vec<&str> = address.split(' ').collect();
            assert_eq!(parts.len(), 3, "unexpected address {address}");
            let number: u16 = parts[0].parse().expect("house number");
            assert!((1..=9999).contains(&number));
            assert!(STREET_NAMES.contains(&parts[1]));
            assert!(STREET_TYPES.contains(&parts[2]));
        }
    }

    #[test]
    fn states_cover_the_fixed_table() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..5000 {
            let state = generate_state(&mut rng);
            assert!(US_STATES.contains(&state));
            seen.insert(state);
        }
        assert_eq!(seen.len(), US_STATES.len());
    }

    #[test]
    fn payslip_reference_is_keyed_by_applicant() {
        let id = ApplicantId("C-312345".to_string());
        assert_eq!(
            payslip_reference(&id),
            "s3://riverbank-payslip-bucket/C-312345"
        );
    }
}
