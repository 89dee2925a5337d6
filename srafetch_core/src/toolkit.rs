// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// Interface to the external tools that fetch and unpack SRA data, and its implementation by
// the NCBI SRA Toolkit (prefetch and fasterq-dump).

use crate::defs::ARCHIVE_EXT;
use itertools::Itertools;
use log::debug;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const FETCH_TOOL: &str = "prefetch";
pub const CONVERT_TOOL: &str = "fasterq-dump";

/// A failed external command, with whatever it printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolFailure {
    pub command: String,
    pub status: Option<i32>, // None if the command could not be run or was killed
    pub stdout: String,
    pub stderr: String,
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "{} returned exit status {}", self.command, code)?,
            None => write!(f, "{} did not run to completion", self.command)?,
        }
        write!(
            f,
            "\nCommand output: {}\nCommand error: {}",
            self.stdout.trim_end(),
            self.stderr.trim_end()
        )
    }
}

/// Where a usable toolkit was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Located {
    pub path: String,
    pub version: String,
}

pub trait Toolkit {
    /// Find a working installation.  Called once, before anything else.
    fn check_available(&mut self) -> Option<Located>;

    /// Fetch the archive for an accession into out_dir/accession.
    fn fetch(&self, accession: &str, out_dir: &Path) -> Result<(), ToolFailure>;

    /// Split an archive into read files in out_dir.
    fn convert(&self, archive: &Path, out_dir: &Path) -> Result<(), ToolFailure>;

    /// Where fetch is expected to leave the archive.
    fn archive_path(&self, accession: &str, out_dir: &Path) -> PathBuf {
        out_dir
            .join(accession)
            .join(format!("{}.{}", accession, ARCHIVE_EXT))
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Run a command to completion, capturing its output.  Returns stdout on success.

pub fn run_tool(program: &str, args: &[&OsStr]) -> Result<String, ToolFailure> {
    let command = format!(
        "{} {}",
        program,
        args.iter().map(|a| a.to_string_lossy()).format(" ")
    );
    debug!("running {}", command);
    match Command::new(program).args(args).output() {
        Err(e) => Err(ToolFailure {
            command,
            status: None,
            stdout: String::new(),
            stderr: e.to_string(),
        }),
        Ok(o) => {
            let stdout = String::from_utf8_lossy(&o.stdout).to_string();
            if o.status.success() {
                Ok(stdout)
            } else {
                Err(ToolFailure {
                    command,
                    status: o.status.code(),
                    stdout,
                    stderr: String::from_utf8_lossy(&o.stderr).to_string(),
                })
            }
        }
    }
}

// Places to look for prefetch, in order.  An explicit install (conda, then a personal miniforge)
// wins over whatever is on PATH, then the usual system locations.

pub fn default_candidates() -> Vec<String> {
    let mut c = Vec::<String>::new();
    if let Ok(prefix) = std::env::var("CONDA_PREFIX") {
        c.push(format!("{}/bin/{}", prefix, FETCH_TOOL));
    }
    if let Ok(home) = std::env::var("HOME") {
        c.push(format!("{}/miniforge3/bin/{}", home, FETCH_TOOL));
    }
    c.push(FETCH_TOOL.to_string());
    c.push(format!("/usr/local/bin/{}", FETCH_TOOL));
    c.push(format!("/usr/bin/{}", FETCH_TOOL));
    c
}

// The converter that goes with a given fetcher: same directory if the fetcher was given by
// path, else found by name.

pub fn paired_converter(fetcher: &str) -> String {
    match Path::new(fetcher).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            dir.join(CONVERT_TOOL).to_string_lossy().to_string()
        }
        _ => CONVERT_TOOL.to_string(),
    }
}

pub struct SraToolkit {
    candidates: Vec<String>,
    prefetch: Option<String>,
    fasterq_dump: Option<String>,
}

impl Default for SraToolkit {
    fn default() -> Self {
        SraToolkit::with_candidates(default_candidates())
    }
}

impl SraToolkit {
    pub fn with_candidates(candidates: Vec<String>) -> SraToolkit {
        SraToolkit {
            candidates,
            prefetch: None,
            fasterq_dump: None,
        }
    }

    /// Look only in the given directory.
    pub fn in_dir(dir: &str) -> SraToolkit {
        let p = Path::new(dir).join(FETCH_TOOL);
        SraToolkit::with_candidates(vec![p.to_string_lossy().to_string()])
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    fn located(&self) -> Result<(&str, &str), ToolFailure> {
        match (&self.prefetch, &self.fasterq_dump) {
            (Some(p), Some(f)) => Ok((p.as_str(), f.as_str())),
            _ => Err(ToolFailure {
                command: FETCH_TOOL.to_string(),
                status: None,
                stdout: String::new(),
                stderr: "SRA Toolkit has not been located".to_string(),
            }),
        }
    }
}

impl Toolkit for SraToolkit {
    fn check_available(&mut self) -> Option<Located> {
        for c in self.candidates.iter() {
            match run_tool(c, &[OsStr::new("--version")]) {
                Ok(version) => {
                    self.prefetch = Some(c.clone());
                    self.fasterq_dump = Some(paired_converter(c));
                    return Some(Located {
                        path: c.clone(),
                        version: version.trim().to_string(),
                    });
                }
                Err(f) => debug!("{} not usable: {}", c, f),
            }
        }
        None
    }

    fn fetch(&self, accession: &str, out_dir: &Path) -> Result<(), ToolFailure> {
        let (prefetch, _) = self.located()?;
        run_tool(
            prefetch,
            &[
                OsStr::new(accession),
                OsStr::new("--output-directory"),
                out_dir.as_os_str(),
            ],
        )?;
        Ok(())
    }

    fn convert(&self, archive: &Path, out_dir: &Path) -> Result<(), ToolFailure> {
        let (_, fasterq_dump) = self.located()?;
        run_tool(
            fasterq_dump,
            &[
                archive.as_os_str(),
                OsStr::new("--outdir"),
                out_dir.as_os_str(),
                OsStr::new("--split-files"),
            ],
        )?;
        Ok(())
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓
