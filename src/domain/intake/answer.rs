//! Question keys and answer values for the intake questionnaire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed name of an intake question.
///
/// Every question step in the flow collects exactly one key. Keys are
/// stable identifiers: persisted answers and applicability predicates
/// both refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKey {
    HadWages,
    HadUnemploymentIncome,
    HadSocialSecurityIncome,
    InterviewTimingPreference,
    AdditionalInfo,
}

impl QuestionKey {
    /// Returns the stable snake_case key string.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKey::HadWages => "had_wages",
            QuestionKey::HadUnemploymentIncome => "had_unemployment_income",
            QuestionKey::HadSocialSecurityIncome => "had_social_security_income",
            QuestionKey::InterviewTimingPreference => "interview_timing_preference",
            QuestionKey::AdditionalInfo => "additional_info",
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tri-state response to a yes/no question.
///
/// `Unfilled` is the default for questions the client has not reached
/// or has skipped; predicates treat it as neither yes nor no.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    #[default]
    Unfilled,
    Yes,
    No,
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            YesNo::Unfilled => "unfilled",
            YesNo::Yes => "yes",
            YesNo::No => "no",
        };
        write!(f, "{}", s)
    }
}

/// A recorded answer to an intake question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    YesNo(YesNo),
    Text(String),
    Date(NaiveDate),
}

impl AnswerValue {
    /// Convenience constructor for a yes answer.
    pub fn yes() -> Self {
        AnswerValue::YesNo(YesNo::Yes)
    }

    /// Convenience constructor for a no answer.
    pub fn no() -> Self {
        AnswerValue::YesNo(YesNo::No)
    }

    /// Convenience constructor for a text answer.
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    /// Returns true if the answer carries real content.
    ///
    /// An unfilled yes/no or a blank text answer counts as unanswered.
    pub fn is_filled(&self) -> bool {
        match self {
            AnswerValue::YesNo(value) => *value != YesNo::Unfilled,
            AnswerValue::Text(value) => !value.trim().is_empty(),
            AnswerValue::Date(_) => true,
        }
    }

    /// Returns the yes/no value, if this is a yes/no answer.
    pub fn as_yes_no(&self) -> Option<YesNo> {
        match self {
            AnswerValue::YesNo(value) => Some(*value),
            _ => None,
        }
    }
}
