// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// Column names, fixed paths and control structures shared by both stages.

// Columns of the SRA run selector export that we look at.  Everything else passes through.

pub const EXPERIMENT_TITLE: &str = "Experiment Title";
pub const STUDY_TITLE: &str = "Study Title";
pub const LIBRARY_STRATEGY: &str = "Library Strategy";
pub const EXPERIMENT_ACCESSION: &str = "Experiment Accession";

pub const SCORED_COLUMNS: [&str; 3] = [EXPERIMENT_TITLE, STUDY_TITLE, LIBRARY_STRATEGY];

// Selection defaults.

pub const DEFAULT_TARGET: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

// Stage inputs and outputs, relative to the working directory.

pub const SRA_TABLE: &str = "data/sra_result.csv";
pub const SELECTED_TABLE: &str = "output/01/selected_experiments.csv";
pub const DOWNLOAD_DIR: &str = "output/02";

// Extension of the archive that prefetch leaves in <out>/<accession>/.

pub const ARCHIVE_EXT: &str = "sra";

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

#[derive(Clone, Debug, PartialEq)]
pub struct SelectControl {
    pub input: String,
    pub output: String,
    pub target: usize,
    pub seed: u64,
}

impl Default for SelectControl {
    fn default() -> Self {
        SelectControl {
            input: SRA_TABLE.to_string(),
            output: SELECTED_TABLE.to_string(),
            target: DEFAULT_TARGET,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DownloadControl {
    pub input: String,
    pub out_dir: String,
    pub id_column: String,
    pub toolkit_dir: Option<String>, // if set, the only place we look for the toolkit
    pub logfile: Option<String>,     // per-accession outcome log
}

impl Default for DownloadControl {
    fn default() -> Self {
        DownloadControl {
            input: SELECTED_TABLE.to_string(),
            out_dir: DOWNLOAD_DIR.to_string(),
            id_column: EXPERIMENT_ACCESSION.to_string(),
            toolkit_dir: None,
            logfile: None,
        }
    }
}
