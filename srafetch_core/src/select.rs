// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// Choose up to a target number of rows from a table, preferring high scores.
//
// Rows are stably sorted by decreasing score and the first `target` are taken.  If that leaves
// any zero-score rows in the selection, those are thrown out and replaced by a random sample of
// the zero-score rows of the whole table, drawn after all positive-score rows.  If there are not
// enough zero-score rows to make up the difference, the selection is simply smaller.

use crate::defs::{SelectControl, SCORED_COLUMNS};
use crate::errors::SrafetchError;
use crate::score::{Signals, DEFAULT_SIGNALS};
use crate::table::{read_table, write_rows, Table};
use itertools::Itertools;
use log::{debug, warn};
use rand_chacha::rand_core::RngCore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredRecord {
    pub row: usize,
    pub score: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub rows: Vec<usize>, // input rows, in output order
    pub positives: usize, // number of positive-score rows kept
    pub filled: usize,    // number of zero-score rows supplied by random fill
}

pub fn score_table(table: &Table, signals: &Signals) -> Vec<ScoredRecord> {
    table
        .records()
        .enumerate()
        .map(|(row, r)| ScoredRecord {
            row,
            score: signals.score(&r),
        })
        .collect()
}

// Draw k distinct elements of pool, by a partial Fisher-Yates shuffle.  If k exceeds the pool
// size, the whole pool is returned, shuffled.

pub fn sample<R: RngCore + ?Sized>(pool: &[usize], k: usize, rng: &mut R) -> Vec<usize> {
    let mut x = pool.to_vec();
    let k = k.min(x.len());
    for i in 0..k {
        let j = i + (rng.next_u64() % (x.len() - i) as u64) as usize;
        x.swap(i, j);
    }
    x.truncate(k);
    x
}

pub fn select_rows<R: RngCore + ?Sized>(
    scored: &[ScoredRecord],
    target: usize,
    rng: &mut R,
) -> Selection {
    // Sort by decreasing score.  Vec::sort_by is stable, so ties stay in input order.

    let mut ranked = scored.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    let top = &ranked[0..target.min(ranked.len())];

    // Case where every selected row has positive score.

    if top.last().map_or(true, |r| r.score > 0) {
        return Selection {
            rows: top.iter().map(|r| r.row).collect(),
            positives: top.len(),
            filled: 0,
        };
    }

    // Otherwise keep all the positive rows and fill from the zero rows.

    let mut rows = ranked
        .iter()
        .filter(|r| r.score > 0)
        .map(|r| r.row)
        .collect::<Vec<usize>>();
    let positives = rows.len();
    let pool = ranked
        .iter()
        .filter(|r| r.score == 0)
        .map(|r| r.row)
        .collect::<Vec<usize>>();
    let fill = sample(&pool, target - positives, rng);
    let filled = fill.len();
    rows.extend(fill);
    Selection {
        rows,
        positives,
        filled,
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Run the selection stage: read the input table, choose rows, write them to the output table.
// Nothing is written if the input can't be read.

pub fn select_experiments<R: RngCore + ?Sized>(
    ctl: &SelectControl,
    rng: &mut R,
) -> Result<(Table, Selection), SrafetchError> {
    let table = read_table(&ctl.input)?;
    let missing = SCORED_COLUMNS
        .iter()
        .filter(|c| table.column(c).is_none())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        warn!(
            "{} lacks column(s) {}, treating as empty",
            ctl.input,
            missing.iter().format(", ")
        );
    }
    let scored = score_table(&table, &DEFAULT_SIGNALS);
    let sel = select_rows(&scored, ctl.target, rng);
    debug!(
        "selected {} positive and {} random rows",
        sel.positives, sel.filled
    );
    write_rows(&table, &sel.rows, &ctl.output)?;
    Ok((table, sel))
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓
