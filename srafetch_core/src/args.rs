// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// Parse command-line overrides.  Both stages run with no arguments at all; optionally, any of
// the following KEY=VALUE arguments may be given.
//
// select_experiments: INPUT=, OUTPUT=, N=, SEED=
// download_sra:       INPUT=, OUT=, TOOLKIT=, LOG=
//
// Anything else is an error.

use crate::defs::{DownloadControl, SelectControl};
use crate::errors::SrafetchError;
use std::str::FromStr;
use string_utils::TextUtils;

fn value<'a>(arg: &'a str, key: &str) -> Option<&'a str> {
    if arg.starts_with(key) {
        Some(arg.after(key))
    } else {
        None
    }
}

fn nonempty(arg: &str, v: &str) -> Result<String, SrafetchError> {
    if v.is_empty() {
        return Err(SrafetchError::BadArg(arg.to_string()));
    }
    Ok(v.to_string())
}

fn number<T: FromStr>(arg: &str, v: &str) -> Result<T, SrafetchError> {
    v.parse::<T>()
        .map_err(|_| SrafetchError::BadArg(arg.to_string()))
}

// Arguments are as given by env::args, so the first is the program name and is skipped.

pub fn parse_select_args(args: &[String]) -> Result<SelectControl, SrafetchError> {
    let mut ctl = SelectControl::default();
    for arg in args.iter().skip(1) {
        if let Some(v) = value(arg, "INPUT=") {
            ctl.input = nonempty(arg, v)?;
        } else if let Some(v) = value(arg, "OUTPUT=") {
            ctl.output = nonempty(arg, v)?;
        } else if let Some(v) = value(arg, "N=") {
            ctl.target = number(arg, v)?;
            if ctl.target == 0 {
                return Err(SrafetchError::BadArg(arg.to_string()));
            }
        } else if let Some(v) = value(arg, "SEED=") {
            ctl.seed = number(arg, v)?;
        } else {
            return Err(SrafetchError::BadArg(arg.to_string()));
        }
    }
    Ok(ctl)
}

pub fn parse_download_args(args: &[String]) -> Result<DownloadControl, SrafetchError> {
    let mut ctl = DownloadControl::default();
    for arg in args.iter().skip(1) {
        if let Some(v) = value(arg, "INPUT=") {
            ctl.input = nonempty(arg, v)?;
        } else if let Some(v) = value(arg, "OUT=") {
            ctl.out_dir = nonempty(arg, v)?;
        } else if let Some(v) = value(arg, "TOOLKIT=") {
            ctl.toolkit_dir = Some(nonempty(arg, v)?);
        } else if let Some(v) = value(arg, "LOG=") {
            ctl.logfile = Some(nonempty(arg, v)?);
        } else {
            return Err(SrafetchError::BadArg(arg.to_string()));
        }
    }
    Ok(ctl)
}
