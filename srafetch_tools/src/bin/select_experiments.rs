// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// Choose up to 100 informative experiments from an SRA run table.
//
// select_experiments [INPUT=...] [OUTPUT=...] [N=...] [SEED=...]
//
// By default, read data/sra_result.csv and write output/01/selected_experiments.csv.  Rows are
// ranked by a three-point heuristic score; if too few rows score above zero, the rest are drawn
// at random (with fixed seed) from the rows that don't.

use pretty_trace::PrettyTrace;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use srafetch_core::args::parse_select_args;
use srafetch_core::select::select_experiments;
use srafetch_core::SrafetchError;
use std::env;

fn run(args: &[String]) -> Result<(), SrafetchError> {
    let ctl = parse_select_args(args)?;
    let mut randme = ChaCha8Rng::seed_from_u64(ctl.seed);
    let (table, sel) = select_experiments(&ctl, &mut randme)?;
    println!(
        "Selected {} of {} experiments ({} with positive score, {} random), wrote {}",
        sel.rows.len(),
        table.len(),
        sel.positives,
        sel.filled,
        ctl.output
    );
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
