// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// Heuristic score of an experiment.  There are three independent signals, each worth one point:
// 1. the experiment title names a tissue or life stage;
// 2. the study title contains a keyword suggesting an informative study design;
// 3. the library strategy is transcriptomic.
// Matching is lower-cased substring matching, so "adult" matches "Adults".  Absent fields
// match nothing.

use crate::defs::{EXPERIMENT_TITLE, LIBRARY_STRATEGY, STUDY_TITLE};
use crate::table::Fields;

pub const TISSUE_TERMS: [&str; 7] = [
    "gill",
    "mantle",
    "soft tissue",
    "larva",
    "embryo",
    "juvenile",
    "adult",
];

pub const STUDY_TERMS: [&str; 8] = [
    "china",
    "france",
    "environment",
    "infection",
    "strain",
    "gestinov",
    "vibrio",
    "growth",
];

pub const ASSAY_TERMS: [&str; 2] = ["rna-seq", "transcriptome"];

pub const MAX_SCORE: u8 = 3;

/// The vocabularies used for scoring.  Terms must be lower case.
#[derive(Clone, Copy, Debug)]
pub struct Signals<'a> {
    pub tissue: &'a [&'a str],
    pub study: &'a [&'a str],
    pub assay: &'a [&'a str],
}

pub const DEFAULT_SIGNALS: Signals<'static> = Signals {
    tissue: &TISSUE_TERMS,
    study: &STUDY_TERMS,
    assay: &ASSAY_TERMS,
};

impl Default for Signals<'static> {
    fn default() -> Self {
        DEFAULT_SIGNALS
    }
}

fn mentions(value: Option<&str>, terms: &[&str]) -> bool {
    match value {
        Some(v) => {
            let v = v.to_lowercase();
            terms.iter().any(|t| v.contains(t))
        }
        None => false,
    }
}

impl<'a> Signals<'a> {
    pub fn score<F: Fields + ?Sized>(&self, record: &F) -> u8 {
        let tissue = mentions(record.field(EXPERIMENT_TITLE), self.tissue);
        let study = mentions(record.field(STUDY_TITLE), self.study);
        let assay = mentions(record.field(LIBRARY_STRATEGY), self.assay);
        tissue as u8 + study as u8 + assay as u8
    }
}

/// Score a record using the default vocabularies.
pub fn score<F: Fields + ?Sized>(record: &F) -> u8 {
    DEFAULT_SIGNALS.score(record)
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_trace::*;
    use std::collections::HashMap;

    fn rec<'a>(title: &'a str, study: &'a str, strategy: &'a str) -> HashMap<&'a str, &'a str> {
        let mut r = HashMap::new();
        r.insert(EXPERIMENT_TITLE, title);
        r.insert(STUDY_TITLE, study);
        r.insert(LIBRARY_STRATEGY, strategy);
        r
    }

    #[test]
    fn test_score() {
        PrettyTrace::new().on();
        let examples = vec![
            (rec("Gill tissue, adult", "Infection in France", "RNA-Seq"), 3),
            (rec("unrelated sample", "unrelated", "WGS"), 0),
            (rec("LARVAE day 3", "unrelated", "WGS"), 1),
            (rec("", "Growth of spat", "Transcriptome Analysis"), 2),
            (rec("Mantle", "", ""), 1),
            (rec("x", "Vibrio challenge", "AMPLICON"), 1),
            // substring, not whole word
            (rec("adulterated", "strains", "rna-seq"), 3),
        ];
        for (r, expected) in examples.iter() {
            assert_eq!(score(r), *expected);
        }
    }

    #[test]
    fn test_absent_fields() {
        let empty = HashMap::<String, String>::new();
        assert_eq!(score(&empty), 0);
        let mut only_strategy = HashMap::<String, String>::new();
        only_strategy.insert(LIBRARY_STRATEGY.to_string(), "RNA-Seq".to_string());
        assert_eq!(score(&only_strategy), 1);
    }

    #[test]
    fn test_substituted_vocabulary() {
        let signals = Signals {
            tissue: &["hepatopancreas"],
            study: &[],
            assay: &["wgs"],
        };
        assert_eq!(signals.score(&rec("Hepatopancreas", "France", "WGS")), 2);
        assert_eq!(signals.score(&rec("Gill", "France", "RNA-Seq")), 0);
        let top = rec("Gill", "France", "RNA-Seq");
        assert!(DEFAULT_SIGNALS.score(&top) <= MAX_SCORE);
    }
}
