// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// Select informative experiments from an SRA run table, and download them using the SRA
// Toolkit.  The two stages are driven by the binaries in srafetch_tools.

pub mod args;
pub mod defs;
pub mod download;
pub mod errors;
pub mod logging;
pub mod score;
pub mod select;
pub mod table;
pub mod toolkit;

pub use errors::SrafetchError;
