//! Resolution status of a complaint

use crate::{normalize_label, RecordError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where a complaint stands in its resolution lifecycle.
///
/// Every record starts as [`Status::Unanswered`]. [`Status::Completed`] is
/// terminal unless the workflow is configured to allow reopening.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Unanswered")]
    Unanswered,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl Status {
    /// All statuses in lifecycle order
    pub const ALL: [Status; 4] = [
        Status::Unanswered,
        Status::UnderReview,
        Status::InProgress,
        Status::Completed,
    ];

    /// Label written to the spreadsheet
    pub fn label(&self) -> &'static str {
        match self {
            Status::Unanswered => "Unanswered",
            Status::UnderReview => "Under Review",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed)
    }

    fn legacy_labels(&self) -> &'static [&'static str] {
        match self {
            Status::Unanswered => &["Sem Resposta"],
            Status::UnderReview => &["Em Análise", "Em Analise"],
            Status::InProgress => &["Em Andamento"],
            Status::Completed => &["Concluído", "Concluido"],
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Unanswered
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Status::ALL
            .into_iter()
            .find(|st| {
                normalize_label(st.label()) == wanted
                    || st
                        .legacy_labels()
                        .iter()
                        .any(|l| normalize_label(l) == wanted)
            })
            .ok_or_else(|| RecordError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unanswered() {
        assert_eq!(Status::default(), Status::Unanswered);
    }

    #[test]
    fn test_only_completed_is_terminal() {
        let terminal: Vec<_> = Status::ALL.into_iter().filter(Status::is_terminal).collect();
        assert_eq!(terminal, vec![Status::Completed]);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("Under Review".parse::<Status>().unwrap(), Status::UnderReview);
        assert_eq!("UnderReview".parse::<Status>().unwrap(), Status::UnderReview);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("Sem Resposta".parse::<Status>().unwrap(), Status::Unanswered);
        assert_eq!("Concluído".parse::<Status>().unwrap(), Status::Completed);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::InProgress);
    }

    #[test]
    fn test_unknown_status() {
        assert!(matches!(
            "Archived".parse::<Status>(),
            Err(RecordError::UnknownStatus(_))
        ));
    }
}
