// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// Download the experiments chosen by select_experiments, using the SRA Toolkit.
//
// download_sra [INPUT=...] [OUT=...] [TOOLKIT=dir] [LOG=file]
//
// By default, read output/01/selected_experiments.csv and download into output/02.  Each
// accession is fetched with prefetch and split into fastq files with fasterq-dump.  Failures
// of individual accessions are reported but don't change the exit status; a missing or bad
// input table, or no working toolkit, does.

use pretty_trace::PrettyTrace;
use srafetch_core::args::parse_download_args;
use srafetch_core::download::run_downloads;
use srafetch_core::toolkit::SraToolkit;
use srafetch_core::SrafetchError;
use std::env;
use std::io;

fn run(args: &[String]) -> Result<(), SrafetchError> {
    let ctl = parse_download_args(args)?;
    let mut tk = match ctl.toolkit_dir.as_deref() {
        Some(dir) => SraToolkit::in_dir(dir),
        None => SraToolkit::default(),
    };
    let stdout = io::stdout();
    let mut log = stdout.lock();
    run_downloads(&ctl, &mut tk, &mut log)?;
    Ok(())
}

fn main() {
    PrettyTrace::new().on();
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();
    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("\nError: {}\n", e);
        std::process::exit(1);
    }
}
