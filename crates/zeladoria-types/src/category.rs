//! Complaint categories

use crate::{normalize_label, RecordError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of municipal issue being reported.
///
/// The set is closed: the intake surface only offers these values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Pothole,
    Overgrowth,
    Lighting,
    Sidewalk,
    Sewage,
    /// Irregular dumping and uncollected waste
    Garbage,
    /// Fallen or hazardous trees
    Tree,
    Other,
}

impl Category {
    /// Every category, in the order they are offered at intake
    pub const ALL: [Category; 8] = [
        Category::Pothole,
        Category::Overgrowth,
        Category::Lighting,
        Category::Sidewalk,
        Category::Sewage,
        Category::Garbage,
        Category::Tree,
        Category::Other,
    ];

    /// Label written to the spreadsheet
    pub fn label(&self) -> &'static str {
        match self {
            Category::Pothole => "Pothole",
            Category::Overgrowth => "Overgrowth",
            Category::Lighting => "Lighting",
            Category::Sidewalk => "Sidewalk",
            Category::Sewage => "Sewage",
            Category::Garbage => "Garbage",
            Category::Tree => "Tree",
            Category::Other => "Other",
        }
    }

    /// Labels found in sheets filled by the older Portuguese form
    fn legacy_labels(&self) -> &'static [&'static str] {
        match self {
            Category::Pothole => &["Buraco"],
            Category::Overgrowth => &["Mato Alto"],
            Category::Lighting => &["Iluminação", "Iluminacao"],
            Category::Sidewalk => &["Calçada", "Calcada"],
            Category::Sewage => &["Esgoto"],
            Category::Garbage => &["Lixo", "Entulho"],
            Category::Tree => &["Árvore", "Arvore"],
            Category::Other => &["Outros"],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Category::ALL
            .into_iter()
            .find(|c| {
                normalize_label(c.label()) == wanted
                    || c.legacy_labels()
                        .iter()
                        .any(|l| normalize_label(l) == wanted)
            })
            .ok_or_else(|| RecordError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_parse_is_case_and_space_insensitive() {
        assert_eq!("pothole".parse::<Category>().unwrap(), Category::Pothole);
        assert_eq!(" LIGHTING ".parse::<Category>().unwrap(), Category::Lighting);
    }

    #[test]
    fn test_parse_legacy_labels() {
        assert_eq!("Buraco".parse::<Category>().unwrap(), Category::Pothole);
        assert_eq!("Mato Alto".parse::<Category>().unwrap(), Category::Overgrowth);
        assert_eq!("Iluminação".parse::<Category>().unwrap(), Category::Lighting);
        assert_eq!("Outros".parse::<Category>().unwrap(), Category::Other);
    }

    #[test]
    fn test_unknown_category() {
        let err = "Volcano".parse::<Category>().unwrap_err();
        assert_eq!(err, RecordError::UnknownCategory("Volcano".into()));
    }
}
