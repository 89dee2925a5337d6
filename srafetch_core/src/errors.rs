// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use std::io;
use thiserror::Error;

/// Errors that abort a whole stage.  Failures of individual downloads are not errors; they are
/// recorded as a DownloadOutcome.
#[derive(Debug, Error)]
pub enum SrafetchError {
    #[error("input file {0} not found")]
    InputMissing(String),
    #[error("error reading input file {path}: {source}")]
    Read { path: String, source: csv::Error },
    #[error("input file {0} has no header line")]
    NoHeader(String),
    #[error("error reading {path}: line {line} has {found} fields, header has {expected}")]
    LongRow {
        path: String,
        line: u64,
        found: usize,
        expected: usize,
    },
    #[error("error writing {path}: {source}")]
    Write { path: String, source: csv::Error },
    #[error("'{0}' column not found in CSV file")]
    MissingColumn(String),
    #[error(
        "SRA Toolkit not found.  Please install SRA Toolkit first.\n\
         You can install it using: conda install -c bioconda sra-tools"
    )]
    ToolkitNotFound,
    #[error("unrecognized or malformed argument {0}")]
    BadArg(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
