//! Applicant eligibility rules for Shopfront.
//!
//! A stateless branch table: the applicant's role selects the products on
//! offer and an age ceiling, body-mass index decides the rest, and the
//! state of residence controls the gender options.
//!
//! ```rust
//! use shopfront_rules::{evaluate, Applicant, Decision, Role};
//!
//! let applicant = Applicant {
//!     role: Some(Role::Spouse),
//!     age: Some(75),
//!     ..Default::default()
//! };
//! let eval = evaluate(&applicant)?;
//! assert_eq!(eval.decision, Decision::Decline);
//! # Ok::<(), shopfront_rules::RulesError>(())
//! ```

mod applicant;
mod error;

pub use applicant::{
    evaluate, evaluate_on, Address, Applicant, Decision, Evaluation, Role, BMI_LIMIT,
    NONBINARY_STATES,
};
pub use error::RulesError;
