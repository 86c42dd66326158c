//! Heuristic era tagging from free-text creation dates.
//!
//! Creation dates in the catalog are prose ("cast in 1791, installed 1802",
//! "circa 1850s"). We only look at the first 4-digit run and derive coarse
//! period tags from it. Tags overlap on purpose: a year in 1760..=1840 is both
//! a century tag and `classicism era`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").expect("year pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Era {
    #[serde(rename = "XVIII century")]
    Eighteenth,
    #[serde(rename = "XIX century")]
    Nineteenth,
    #[serde(rename = "classicism era")]
    Classicism,
}

pub type EraSet = BTreeSet<Era>;

impl Era {
    pub const ALL: [Era; 3] = [Era::Eighteenth, Era::Nineteenth, Era::Classicism];

    pub fn label(&self) -> &'static str {
        match self {
            Era::Eighteenth => "XVIII century",
            Era::Nineteenth => "XIX century",
            Era::Classicism => "classicism era",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Era {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let short = |era: &Era| era.label().split_whitespace().next().unwrap_or_default();
        Era::ALL
            .into_iter()
            .find(|era| {
                era.label().eq_ignore_ascii_case(wanted) || short(era).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                let known: Vec<_> = Era::ALL.iter().map(Era::label).collect();
                format!("Unknown era '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// First 4-digit year embedded in `creation_time`, if any.
pub fn extract_year(creation_time: &str) -> Option<u32> {
    YEAR.find(creation_time)
        .and_then(|m| m.as_str().parse().ok())
}

/// Era tags for a creation date. Absent or year-less input yields no tags.
pub fn classify(creation_time: Option<&str>) -> EraSet {
    let mut eras = EraSet::new();
    let Some(year) = creation_time.and_then(extract_year) else {
        return eras;
    };

    if year < 1800 {
        eras.insert(Era::Eighteenth);
    }
    if (1800..1900).contains(&year) {
        eras.insert(Era::Nineteenth);
    }
    if (1760..=1840).contains(&year) {
        eras.insert(Era::Classicism);
    }
    eras
}
