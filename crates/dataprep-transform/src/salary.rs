//! Salary-estimate parsing and grouped imputation.

use std::sync::LazyLock;

use regex::Regex;

use dataprep_ingest::stats::median;

use crate::recruitment::JobPosting;

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d,.]+").expect("amount regex"));

/// A salary string split into magnitude, pay unit, and currency marker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedSalary {
    pub amount: Option<f64>,
    /// "per year" when the raw string mentions "yr", "per hour" for "hr".
    pub unit: Option<&'static str>,
    /// "$" when present in the raw string.
    pub currency: Option<&'static str>,
}

/// Parse a raw salary estimate such as `"$50,000/yr"`.
///
/// The first run of digits/commas/dots anywhere in the string is the
/// magnitude (commas stripped). Missing or unparseable input yields all
/// missing.
pub fn parse_salary(raw: &str) -> ParsedSalary {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedSalary::default();
    }
    let amount = AMOUNT_RE
        .find(trimmed)
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok());
    let unit = if trimmed.contains("yr") {
        Some("per year")
    } else if trimmed.contains("hr") {
        Some("per hour")
    } else {
        None
    };
    let currency = if trimmed.contains('$') { Some("$") } else { None };
    ParsedSalary {
        amount,
        unit,
        currency,
    }
}

/// Impute missing-or-zero salaries from peer rows.
///
/// A row needs imputation when its magnitude is missing or not positive.
/// Peers are other rows with the same company, job title, and a known
/// equal experience level, whose pre-imputation magnitude is positive;
/// the imputed value is the peer median. Rows without peers stay missing.
///
/// Peer lookup always runs against the values as parsed, so earlier
/// imputations never feed later ones. Returns the number of rows imputed.
pub fn impute_salaries(postings: &mut [JobPosting]) -> usize {
    let original: Vec<Option<f64>> = postings.iter().map(|p| p.salary_estimate).collect();
    let keys: Vec<(String, String, Option<String>)> = postings
        .iter()
        .map(|p| {
            (
                p.company.clone(),
                p.job_title.clone(),
                p.experience_level.clone(),
            )
        })
        .collect();
    let mut imputed = 0usize;
    for idx in 0..postings.len() {
        if matches!(original[idx], Some(amount) if amount > 0.0) {
            continue;
        }
        let (company, job_title, level) = &keys[idx];
        let Some(level) = level.as_deref() else {
            // An unknown level never equals another unknown level, so such
            // rows have no peer group.
            postings[idx].salary_estimate = None;
            continue;
        };
        let peers: Vec<f64> = keys
            .iter()
            .zip(&original)
            .filter_map(|((peer_company, peer_title, peer_level), amount)| {
                let matches_group = peer_company == company
                    && peer_title == job_title
                    && peer_level.as_deref() == Some(level);
                match (matches_group, amount) {
                    (true, Some(a)) if *a > 0.0 => Some(*a),
                    _ => None,
                }
            })
            .collect();
        match median(&peers) {
            Some(value) => {
                postings[idx].salary_estimate = Some(value);
                imputed += 1;
            }
            None => postings[idx].salary_estimate = None,
        }
    }
    imputed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(company: &str, title: &str, level: Option<&str>, salary: Option<f64>) -> JobPosting {
        JobPosting {
            company: company.to_string(),
            job_title: title.to_string(),
            experience_level: level.map(String::from),
            salary_estimate: salary,
            ..JobPosting::default()
        }
    }

    #[test]
    fn parses_yearly_salary_with_currency() {
        let parsed = parse_salary("$50,000/yr");
        assert_eq!(parsed.amount, Some(50000.0));
        assert_eq!(parsed.unit, Some("per year"));
        assert_eq!(parsed.currency, Some("$"));
    }

    #[test]
    fn parses_hourly_salary_without_currency() {
        let parsed = parse_salary("25.50 per hr");
        assert_eq!(parsed.amount, Some(25.5));
        assert_eq!(parsed.unit, Some("per hour"));
        assert_eq!(parsed.currency, None);
    }

    #[test]
    fn missing_or_textual_salary_yields_missing() {
        assert_eq!(parse_salary(""), ParsedSalary::default());
        let parsed = parse_salary("competitive");
        assert_eq!(parsed.amount, None);
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.currency, None);
    }

    #[test]
    fn imputes_peer_median() {
        let mut postings = vec![
            posting("Acme", "Data Engineer", Some("Mid"), None),
            posting("Acme", "Data Engineer", Some("Mid"), Some(40000.0)),
            posting("Acme", "Data Engineer", Some("Mid"), Some(60000.0)),
        ];
        let imputed = impute_salaries(&mut postings);
        assert_eq!(imputed, 1);
        assert_eq!(postings[0].salary_estimate, Some(50000.0));
    }

    #[test]
    fn zero_salary_is_treated_as_missing_and_excluded_as_peer() {
        let mut postings = vec![
            posting("Acme", "Analyst", Some("Entry"), Some(0.0)),
            posting("Acme", "Analyst", Some("Entry"), Some(30000.0)),
        ];
        impute_salaries(&mut postings);
        assert_eq!(postings[0].salary_estimate, Some(30000.0));
    }

    #[test]
    fn no_peer_group_stays_missing() {
        let mut postings = vec![
            posting("Acme", "Analyst", Some("Entry"), None),
            posting("Other Co", "Analyst", Some("Entry"), Some(30000.0)),
        ];
        let imputed = impute_salaries(&mut postings);
        assert_eq!(imputed, 0);
        assert_eq!(postings[0].salary_estimate, None);
    }

    #[test]
    fn unknown_level_never_matches_a_peer() {
        let mut postings = vec![
            posting("Acme", "Analyst", None, None),
            posting("Acme", "Analyst", None, Some(30000.0)),
        ];
        impute_salaries(&mut postings);
        assert_eq!(postings[0].salary_estimate, None);
    }

    #[test]
    fn earlier_imputation_does_not_feed_later_rows() {
        let mut postings = vec![
            posting("Acme", "Analyst", Some("Mid"), None),
            posting("Acme", "Analyst", Some("Mid"), Some(50000.0)),
            posting("Acme", "Analyst", Some("Mid"), None),
        ];
        impute_salaries(&mut postings);
        // Both missing rows see only the single real peer.
        assert_eq!(postings[0].salary_estimate, Some(50000.0));
        assert_eq!(postings[2].salary_estimate, Some(50000.0));
    }
}
