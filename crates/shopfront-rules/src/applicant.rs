//! Applicant evaluation.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::RulesError;

/// States that offer a non-binary gender option.
pub const NONBINARY_STATES: [&str; 5] = ["NJ", "FL", "WA", "KS", "NY"];

/// BMI above which an applicant is declined.
pub const BMI_LIMIT: f64 = 20.0;

/// Applicant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Employee,
    Spouse,
    /// Any other role.
    #[serde(other)]
    Other,
}

impl Role {
    /// Products offered to this role.
    pub fn products(&self) -> &'static [&'static str] {
        match self {
            Role::Employee => &["Alpha", "Beta", "Gamma"],
            Role::Spouse => &["Delta", "Epsilon"],
            Role::Other => &[],
        }
    }

    /// Age above which this role is declined outright.
    pub fn max_age(&self) -> Option<i64> {
        match self {
            Role::Employee => Some(80),
            Role::Spouse => Some(70),
            Role::Other => None,
        }
    }
}

/// Outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Decline,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Decline => "decline",
        }
    }
}

/// Postal address; only the state matters here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    #[serde(default)]
    pub state: Option<String>,
}

/// An applicant as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    #[serde(default)]
    pub role: Option<Role>,
    /// Date of birth, `YYYY-MM-DD`. Takes precedence over `age`.
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Result returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub products_shown: Vec<String>,
    pub decision: Decision,
    pub gender_options: Vec<String>,
    pub age: Option<i64>,
}

/// Evaluate an applicant as of today (UTC).
pub fn evaluate(applicant: &Applicant) -> Result<Evaluation, RulesError> {
    evaluate_on(applicant, Utc::now().date_naive())
}

/// Evaluate an applicant as of the given date.
pub fn evaluate_on(applicant: &Applicant, today: NaiveDate) -> Result<Evaluation, RulesError> {
    let role = applicant.role.unwrap_or(Role::Other);

    let age = match applicant.dob.as_deref() {
        Some(dob) => Some(age_on(parse_dob(dob)?, today)),
        None => applicant.age,
    };

    let too_old = matches!((role.max_age(), age), (Some(max), Some(age)) if age > max);
    let decision = if too_old {
        Decision::Decline
    } else if bmi(applicant.height_cm, applicant.weight_kg)? > BMI_LIMIT {
        Decision::Decline
    } else {
        Decision::Approve
    };

    let state = applicant.address.as_ref().and_then(|a| a.state.as_deref());
    let mut gender_options = vec!["Male".to_string(), "Female".to_string()];
    if state.is_some_and(|s| NONBINARY_STATES.contains(&s)) {
        gender_options.push("Nonbinary".to_string());
    }

    Ok(Evaluation {
        products_shown: role.products().iter().map(|p| p.to_string()).collect(),
        decision,
        gender_options,
        age,
    })
}

fn parse_dob(dob: &str) -> Result<NaiveDate, RulesError> {
    NaiveDate::parse_from_str(dob, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(dob).map(|dt| dt.date_naive()))
        .map_err(|_| RulesError::InvalidDob(dob.to_string()))
}

/// Whole years between `dob` and `today`.
fn age_on(dob: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year() - dob.year());
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

fn bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Result<f64, RulesError> {
    let height = height_cm
        .filter(|h| *h > 0.0)
        .ok_or(RulesError::InvalidMeasurement("heightCm"))?;
    let weight = weight_kg
        .filter(|w| *w > 0.0)
        .ok_or(RulesError::InvalidMeasurement("weightKg"))?;
    let meters = height / 100.0;
    Ok(weight / (meters * meters))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn applicant(role: Role, age: i64) -> Applicant {
        Applicant {
            role: Some(role),
            age: Some(age),
            // BMI ~19.6
            height_cm: Some(180.0),
            weight_kg: Some(63.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_employee_products_and_age_limit() {
        let eval = evaluate_on(&applicant(Role::Employee, 40), today()).unwrap();
        assert_eq!(eval.products_shown, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(eval.decision, Decision::Approve);

        let eval = evaluate_on(&applicant(Role::Employee, 81), today()).unwrap();
        assert_eq!(eval.decision, Decision::Decline);

        let eval = evaluate_on(&applicant(Role::Employee, 80), today()).unwrap();
        assert_eq!(eval.decision, Decision::Approve);
    }

    #[test]
    fn test_spouse_products_and_age_limit() {
        let eval = evaluate_on(&applicant(Role::Spouse, 71), today()).unwrap();
        assert_eq!(eval.products_shown, vec!["Delta", "Epsilon"]);
        assert_eq!(eval.decision, Decision::Decline);

        let eval = evaluate_on(&applicant(Role::Spouse, 70), today()).unwrap();
        assert_eq!(eval.decision, Decision::Approve);
    }

    #[test]
    fn test_bmi_threshold() {
        let mut heavy = applicant(Role::Other, 30);
        heavy.weight_kg = Some(90.0);
        let eval = evaluate_on(&heavy, today()).unwrap();
        assert!(eval.products_shown.is_empty());
        assert_eq!(eval.decision, Decision::Decline);

        let eval = evaluate_on(&applicant(Role::Other, 99), today()).unwrap();
        assert_eq!(eval.decision, Decision::Approve);
    }

    #[test]
    fn test_age_from_dob() {
        let mut a = applicant(Role::Employee, 0);
        a.dob = Some("1943-06-16".to_string());
        let eval = evaluate_on(&a, today()).unwrap();
        assert_eq!(eval.age, Some(80));
        assert_eq!(eval.decision, Decision::Approve);

        a.dob = Some("1943-06-15".to_string());
        let eval = evaluate_on(&a, today()).unwrap();
        assert_eq!(eval.age, Some(81));
        assert_eq!(eval.decision, Decision::Decline);
    }

    #[test]
    fn test_invalid_dob() {
        let mut a = applicant(Role::Employee, 30);
        a.dob = Some("yesterday".to_string());
        assert_eq!(
            evaluate_on(&a, today()),
            Err(RulesError::InvalidDob("yesterday".to_string()))
        );
    }

    #[test]
    fn test_missing_measurements() {
        let mut a = applicant(Role::Other, 30);
        a.height_cm = None;
        assert_eq!(
            evaluate_on(&a, today()),
            Err(RulesError::InvalidMeasurement("heightCm"))
        );

        // Age-based decline does not need measurements.
        let old = Applicant {
            role: Some(Role::Spouse),
            age: Some(75),
            ..Default::default()
        };
        assert_eq!(evaluate_on(&old, today()).unwrap().decision, Decision::Decline);
    }

    #[test]
    fn test_gender_options_by_state() {
        let mut a = applicant(Role::Employee, 30);
        a.address = Some(Address {
            state: Some("NY".to_string()),
        });
        let eval = evaluate_on(&a, today()).unwrap();
        assert_eq!(eval.gender_options, vec!["Male", "Female", "Nonbinary"]);

        a.address = Some(Address {
            state: Some("TX".to_string()),
        });
        let eval = evaluate_on(&a, today()).unwrap();
        assert_eq!(eval.gender_options, vec!["Male", "Female"]);
    }

    #[test]
    fn test_json_contract() {
        let a: Applicant = serde_json::from_str(
            r#"{"role":"Manager","age":30,"heightCm":180,"weightKg":60,"address":{"state":"FL"}}"#,
        )
        .unwrap();
        assert_eq!(a.role, Some(Role::Other));

        let json = serde_json::to_value(evaluate_on(&a, today()).unwrap()).unwrap();
        assert_eq!(json["decision"], "approve");
        assert_eq!(json["productsShown"], serde_json::json!([]));
        assert_eq!(json["genderOptions"][2], "Nonbinary");
        assert_eq!(json["age"], 30);
    }
}
