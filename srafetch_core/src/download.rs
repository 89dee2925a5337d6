// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// Download the experiments named in a table, one at a time.  For each accession we fetch the
// archive, check that it landed where expected, and convert it to split fastq files.  A failure
// for one accession is reported and we move on; only problems with the input table or the
// absence of the toolkit stop the run.

use crate::defs::DownloadControl;
use crate::errors::SrafetchError;
use crate::logging::{logme, set_logfile};
use crate::table::read_table;
use crate::toolkit::{ToolFailure, Toolkit, FETCH_TOOL};
use io_utils::path_exists;
use log::warn;
use std::fs::create_dir_all;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success,
    NotFound,            // fetch ran but no archive appeared
    Failed(ToolFailure), // fetch or convert failed
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        *self == DownloadOutcome::Success
    }

    pub fn label(&self) -> &'static str {
        match self {
            DownloadOutcome::Success => "success",
            DownloadOutcome::NotFound => "not_found",
            DownloadOutcome::Failed(_) => "failed",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DownloadSummary {
    pub outcomes: Vec<(String, DownloadOutcome)>,
    pub out_dir: PathBuf,
}

impl DownloadSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|x| x.1.is_success()).count()
    }

    // Everything that isn't a success.  This is the number reported as failed.

    pub fn failures(&self) -> usize {
        self.total() - self.successes()
    }

    pub fn not_found(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|x| x.1 == DownloadOutcome::NotFound)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.failures() - self.not_found()
    }

    pub fn print<W: Write>(&self, log: &mut W) -> io::Result<()> {
        writeln!(log, "\n{}", "=".repeat(50))?;
        writeln!(log, "Download Summary:")?;
        writeln!(log, "Total experiments: {}", self.total())?;
        writeln!(log, "Successful downloads: {}", self.successes())?;
        writeln!(log, "Failed downloads: {}", self.failures())?;
        writeln!(log, "Output directory: {}", self.out_dir.display())?;
        if self.failures() > 0 {
            writeln!(
                log,
                "\nNote: {} downloads failed. Check the error messages above.",
                self.failures()
            )?;
        }
        Ok(())
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

pub fn download_one<T: Toolkit + ?Sized, W: Write>(
    tk: &T,
    accession: &str,
    out_dir: &Path,
    log: &mut W,
) -> io::Result<DownloadOutcome> {
    writeln!(log, "Downloading {}...", accession)?;
    let res = if accession.is_empty() {
        Err(ToolFailure {
            command: FETCH_TOOL.to_string(),
            status: None,
            stdout: String::new(),
            stderr: "empty accession".to_string(),
        })
    } else {
        tk.fetch(accession, out_dir)
    };
    if let Err(f) = res {
        writeln!(log, "Error downloading {}: {}", accession, f)?;
        return Ok(DownloadOutcome::Failed(f));
    }
    let archive = tk.archive_path(accession, out_dir);
    if !path_exists(&archive) {
        warn!("expected {} after fetch", archive.display());
        writeln!(log, "Warning: SRA file not found for {}", accession)?;
        return Ok(DownloadOutcome::NotFound);
    }
    if let Err(f) = tk.convert(&archive, out_dir) {
        writeln!(log, "Error downloading {}: {}", accession, f)?;
        return Ok(DownloadOutcome::Failed(f));
    }
    writeln!(log, "Successfully downloaded and converted {}", accession)?;
    Ok(DownloadOutcome::Success)
}

pub fn download_all<T: Toolkit + ?Sized, W: Write>(
    tk: &T,
    accessions: &[String],
    out_dir: &Path,
    log: &mut W,
) -> io::Result<DownloadSummary> {
    let mut outcomes = Vec::<(String, DownloadOutcome)>::new();
    for (i, acc) in accessions.iter().enumerate() {
        writeln!(log, "\nProcessing {}/{}: {}", i + 1, accessions.len(), acc)?;
        let outcome = download_one(tk, acc, out_dir, log)?;
        logme(&format!("{}\t{}", acc, outcome.label()));
        outcomes.push((acc.clone(), outcome));
    }
    Ok(DownloadSummary {
        outcomes,
        out_dir: out_dir.to_path_buf(),
    })
}

// Run the download stage.  The input table is read and checked before the toolkit is looked for,
// and nothing is downloaded unless both succeed.

pub fn run_downloads<T: Toolkit + ?Sized, W: Write>(
    ctl: &DownloadControl,
    tk: &mut T,
    log: &mut W,
) -> Result<DownloadSummary, SrafetchError> {
    let table = read_table(&ctl.input)?;
    let accessions = table.column_values(&ctl.id_column)?;
    let located = tk.check_available().ok_or(SrafetchError::ToolkitNotFound)?;
    writeln!(
        log,
        "SRA Toolkit found at {}: {}",
        located.path, located.version
    )?;
    let out_dir = Path::new(&ctl.out_dir);
    create_dir_all(out_dir)?;
    if let Some(f) = ctl.logfile.as_deref() {
        set_logfile(Some(f));
    }
    writeln!(log, "Found {} experiments to download", accessions.len())?;
    let summary = download_all(&*tk, &accessions, out_dir, log)?;
    summary.print(log)?;
    Ok(summary)
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓
