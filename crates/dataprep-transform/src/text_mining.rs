//! Keyword/regex text mining over job descriptions.
//!
//! All matching is case-insensitive and whole-word. The vocabularies live
//! in static tables of (label, pattern) pairs compiled once, so adding a
//! skill or a benefit category is a data change, not a code change.

use std::sync::LazyLock;

use regex::Regex;

/// Technology/tool vocabulary recognized in the `skills` field.
const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "SQL",
    "Spark",
    "Snowflake",
    "AWS",
    "Java",
    "JavaScript",
    "Scala",
    "Tableau",
    "ETL",
    "Talend",
    "Informatica",
    "BigQuery",
    "PowerBI",
    "Looker",
    "Redshift",
    "DBT",
    "Airflow",
    "HIVE",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Kafka",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Oracle",
    "Cassandra",
    "Redis",
    "Terraform",
    "Jenkins",
    "Git",
    "Linux",
    "Hadoop",
    "Pandas",
    "NumPy",
    "TensorFlow",
    "PyTorch",
    "Scikit-learn",
    "R",
    "SAS",
    "SPSS",
    "Excel",
];

static SKILL_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|skill| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(skill));
            (*skill, Regex::new(&pattern).expect("skill regex"))
        })
        .collect()
});

/// Experience-level categories, checked in order; first match wins.
///
/// The year ranges also match bare counts ("5 years") so descriptions
/// without an explicit range still classify: 0-2 Entry, 3-5 Mid, 6+
/// Senior.
static EXPERIENCE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "Entry",
            Regex::new(
                r"(?i)\b(entry|junior|fresher|under\s+1\s+year|0[-\s]?to[-\s]?2\s+years?|0[-\s]?2\s+years?|[0-2]\s+years?)\b",
            )
            .expect("entry regex"),
        ),
        (
            "Mid",
            Regex::new(
                r"(?i)\b(mid|intermediate|3[-\s]?to[-\s]?5\s+years?|3[-\s]?5\s+years?|[3-5]\s+years?)\b",
            )
            .expect("mid regex"),
        ),
        (
            "Senior",
            Regex::new(
                r"(?i)\b(senior|lead|principal|staff|architect|manager|6\+?\s+years?|8\+?\s+years?|[6-9]\s+years?|\d{2,}\+?\s+years?)\b",
            )
            .expect("senior regex"),
        ),
    ]
});

static JOB_TYPE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("Full-time", Regex::new(r"(?i)\bfull[-\s]?time\b").expect("full-time regex")),
        ("Part-time", Regex::new(r"(?i)\bpart[-\s]?time\b").expect("part-time regex")),
        ("Contract", Regex::new(r"(?i)\bcontract\b").expect("contract regex")),
        ("Internship", Regex::new(r"(?i)\bintern(ship)?\b").expect("internship regex")),
        ("Remote", Regex::new(r"(?i)\bremote\b").expect("remote regex")),
        ("Hybrid", Regex::new(r"(?i)\bhybrid\b").expect("hybrid regex")),
    ]
});

/// Benefit categories with their keyword sets; any keyword flags the
/// category once.
static BENEFIT_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    let categories: &[(&str, &[&str])] = &[
        ("Insurance", &["insurance", "medical", "dental", "vision", "health"]),
        ("Bonus", &["bonus", "incentive", "commission"]),
        ("Retirement", &["retirement", "401k", "pension"]),
        ("Stock", &["stock", "equity", "shares", "rsu"]),
        ("Assistance", &["assistance", "support", "help"]),
        ("Development", &["development", "training", "education", "learning"]),
        ("Vacation", &["vacation", "pto", "paid time off", "leave"]),
        ("Flexible", &["flexible", "work from home", "wfh"]),
    ];
    categories
        .iter()
        .map(|(label, keywords)| {
            let escaped: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
            let pattern = format!(r"(?i)\b({})\b", escaped.join("|"));
            (*label, Regex::new(&pattern).expect("benefit regex"))
        })
        .collect()
});

/// Categorical signals extracted from one job description.
///
/// Multi-valued fields are comma-joined; a field with no matches stays
/// None (sentinel filling, if any, happens later under the policy).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescriptionSignals {
    pub skills: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub benefits: Option<String>,
}

/// Extract skills, experience level, job types, and benefits from a
/// free-text job description.
pub fn parse_description(description: &str) -> DescriptionSignals {
    if description.trim().is_empty() {
        return DescriptionSignals::default();
    }

    let skills: Vec<&str> = SKILL_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(description))
        .map(|(skill, _)| *skill)
        .collect();

    let experience_level = EXPERIENCE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(description))
        .map(|(level, _)| (*level).to_string());

    let job_types: Vec<&str> = JOB_TYPE_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(description))
        .map(|(job_type, _)| *job_type)
        .collect();

    let benefits: Vec<&str> = BENEFIT_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(description))
        .map(|(category, _)| *category)
        .collect();

    DescriptionSignals {
        skills: join_non_empty(&skills),
        experience_level,
        job_type: join_non_empty(&job_types),
        benefits: join_non_empty(&benefits),
    }
}

fn join_non_empty(values: &[&str]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}
