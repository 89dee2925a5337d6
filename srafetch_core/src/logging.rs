// Copyright (c) 2021 10x Genomics, Inc. All rights reserved.
//
// Optional per-accession outcome log.  Once a log file is set, every call to logme appends a
// line to it.  Without a log file, logme does nothing.

use lazy_static::lazy_static;
use log::warn;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

lazy_static! {
    pub static ref OUTCOME_LOGFILE: Mutex<Option<String>> = Mutex::new(None);
}

pub fn set_logfile(path: Option<&str>) {
    if let Ok(mut f) = OUTCOME_LOGFILE.lock() {
        *f = path.map(|p| p.to_string());
    }
}

pub fn logme(s: &str) {
    let path = match OUTCOME_LOGFILE.lock() {
        Ok(f) => f.clone(),
        Err(_) => None,
    };
    if let Some(path) = path {
        let res = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| writeln!(file, "{}", s));
        if let Err(e) = res {
            warn!("could not append to log file {}: {}", path, e);
        }
    }
}
