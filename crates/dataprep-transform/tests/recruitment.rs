//! End-to-end recruitment transform behavior across both missing-value
//! policies.

use dataprep_ingest::csv_table::CsvTable;
use dataprep_ingest::polars_utils::any_to_string;
use dataprep_model::MissingValuePolicy;
use dataprep_transform::{recruitment_demographics, recruitment_frame, transform_recruitment};

const HEADERS: &[&str] = &[
    "company",
    "job_title",
    "company_rating",
    "job_description",
    "salary_estimate",
    "company_size",
    "company_type",
    "company_sector",
    "company_industry",
    "company_founded",
    "company_revenue",
    "dates",
];

fn table(rows: Vec<Vec<&str>>) -> CsvTable {
    CsvTable {
        headers: HEADERS.iter().map(|h| (*h).to_string()).collect(),
        rows: rows
            .into_iter()
            .map(|row| row.into_iter().map(String::from).collect())
            .collect(),
    }
}

fn sample_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "Acme Corp 4.5",
            "Data Engineer",
            "4.5",
            "Looking for Python and SQL skills, 5 years experience, remote work available",
            "$50,000/yr",
            "51-200",
            "Private",
            "Tech",
            "Software",
            "1999.0",
            "$10M-$50M",
            "2024-03-15 10:30:00",
        ],
        vec![
            "Acme Corp 4.5",
            "Data Engineer",
            "",
            "Python developer, 5 years experience",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "30+ days ago",
        ],
        vec![
            "4.5",
            "Ghost Posting",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ],
    ]
}

#[test]
fn mines_description_into_categorical_signals() {
    let postings =
        transform_recruitment(&table(sample_rows()), MissingValuePolicy::Preserve).unwrap();
    let first = &postings[0];
    assert_eq!(first.company, "Acme Corp");
    assert_eq!(first.skills.as_deref(), Some("Python, SQL"));
    assert_eq!(first.experience_level.as_deref(), Some("Mid"));
    assert_eq!(first.job_type.as_deref(), Some("Remote"));
    assert_eq!(first.benefits, None);
    assert_eq!(first.salary_estimate, Some(50000.0));
    assert_eq!(first.salary_unit.as_deref(), Some("per year"));
    assert_eq!(first.currency.as_deref(), Some("$"));
    assert_eq!(first.company_founded, Some(1999));
    assert_eq!(first.dates.as_deref(), Some("2024-03-15"));
}

#[test]
fn rows_reduced_to_an_empty_company_name_are_dropped() {
    let postings =
        transform_recruitment(&table(sample_rows()), MissingValuePolicy::Preserve).unwrap();
    assert_eq!(postings.len(), 2);
    assert!(postings.iter().all(|p| p.company == "Acme Corp"));
}

#[test]
fn missing_salary_is_imputed_from_peer_group() {
    // Both rows share company, title, and mined level "Mid"; the second
    // inherits the first's salary.
    let postings =
        transform_recruitment(&table(sample_rows()), MissingValuePolicy::Preserve).unwrap();
    assert_eq!(postings[1].salary_estimate, Some(50000.0));
}

#[test]
fn company_fields_fill_within_the_company_group() {
    let postings =
        transform_recruitment(&table(sample_rows()), MissingValuePolicy::Preserve).unwrap();
    assert_eq!(postings[1].company_size.as_deref(), Some("51-200"));
    assert_eq!(postings[1].company_sector.as_deref(), Some("Tech"));
}

#[test]
fn preserve_policy_leaves_unfillable_gaps_missing() {
    let postings =
        transform_recruitment(&table(sample_rows()), MissingValuePolicy::Preserve).unwrap();
    assert_eq!(postings[1].company_rating, None);
    assert_eq!(postings[1].dates, None);
    // Unit and currency were never parsed for this row.
    assert_eq!(postings[1].salary_unit, None);
}

#[test]
fn sentinel_policy_fills_remaining_gaps() {
    let postings =
        transform_recruitment(&table(sample_rows()), MissingValuePolicy::Sentinel).unwrap();
    let second = &postings[1];
    assert_eq!(second.job_type.as_deref(), Some("Not Specified"));
    assert_eq!(second.benefits.as_deref(), Some("Not Specified"));
    assert_eq!(second.salary_unit.as_deref(), Some("-"));
    assert_eq!(second.currency.as_deref(), Some("-"));
    assert_eq!(second.company_revenue.as_deref(), Some("-"));
    assert_eq!(second.company_rating, Some(0.0));
    assert_eq!(second.company_founded, Some(0));
    // The imputed salary survives untouched.
    assert_eq!(second.salary_estimate, Some(50000.0));
}

#[test]
fn output_frame_has_declared_column_order() {
    let postings =
        transform_recruitment(&table(sample_rows()), MissingValuePolicy::Preserve).unwrap();
    let frame = recruitment_frame(&postings).unwrap();
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "company",
            "job_title",
            "company_rating",
            "salary_estimate",
            "salary_unit",
            "currency",
            "skills",
            "experience_level",
            "job_type",
            "benefits",
            "company_size",
            "company_type",
            "company_sector",
            "company_industry",
            "company_founded",
            "company_revenue",
            "dates",
        ]
    );
    assert_eq!(
        any_to_string(frame.column("company").unwrap().get(0).unwrap()),
        "Acme Corp"
    );
}

#[test]
fn transform_is_idempotent_over_its_own_gaps() {
    // Re-running the policy application changes nothing the second time.
    let first = transform_recruitment(&table(sample_rows()), MissingValuePolicy::Sentinel).unwrap();
    let second = transform_recruitment(&table(sample_rows()), MissingValuePolicy::Sentinel).unwrap();
    assert_eq!(first, second);
}

#[test]
fn demographics_are_a_pure_function_of_the_postings() {
    let postings =
        transform_recruitment(&table(sample_rows()), MissingValuePolicy::Preserve).unwrap();
    let first = recruitment_demographics(&postings).unwrap();
    let second = recruitment_demographics(&postings).unwrap();
    assert_eq!(first.len(), second.len());
    for ((name_a, section_a), (name_b, section_b)) in
        first.sections().iter().zip(second.sections())
    {
        assert_eq!(name_a, name_b);
        assert_eq!(section_a, section_b, "section {name_a} differs");
    }
}

#[test]
fn missing_required_column_is_an_error() {
    let mut t = table(sample_rows());
    t.headers.retain(|h| h != "salary_estimate");
    for row in &mut t.rows {
        row.remove(4);
    }
    assert!(transform_recruitment(&t, MissingValuePolicy::Preserve).is_err());
}
