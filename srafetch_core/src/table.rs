// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// A CSV table held in memory as strings, read once and never modified.  Stages produce new
// tables by choosing rows, so column order and values are carried through exactly.

use crate::errors::SrafetchError;
use csv::{ReaderBuilder, WriterBuilder};
use io_utils::path_exists;
use std::collections::HashMap;
use std::fs::create_dir_all;
use std::path::Path;

/// Read-only access to the named fields of a record.  An empty value is reported as absent,
/// so callers never distinguish a blank cell from a missing column.
pub trait Fields {
    fn field(&self, name: &str) -> Option<&str>;
}

impl Fields for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(|v| v.as_str()).filter(|v| !v.is_empty())
    }
}

impl<'a> Fields for HashMap<&'a str, &'a str> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).copied().filter(|v| !v.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

/// One row of a Table.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    table: &'a Table,
    row: usize,
}

impl<'a> Fields for Record<'a> {
    fn field(&self, name: &str) -> Option<&str> {
        let j = self.table.column(name)?;
        self.table.rows[self.row]
            .get(j)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Table {
        let mut index = HashMap::<String, usize>::new();
        for (j, name) in header.iter().enumerate() {
            index.entry(name.clone()).or_insert(j);
        }
        Table {
            header,
            rows,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column having the given name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn record(&self, row: usize) -> Record<'_> {
        Record { table: self, row }
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        (0..self.rows.len()).map(move |row| self.record(row))
    }

    /// All values of a column, blank cells included, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<String>, SrafetchError> {
        let j = self
            .column(name)
            .ok_or_else(|| SrafetchError::MissingColumn(name.to_string()))?;
        Ok(self
            .rows
            .iter()
            .map(|r| r.get(j).cloned().unwrap_or_default())
            .collect())
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Read a CSV file having a header line.  A file with no header is an error.  Rows shorter than
// the header are padded with empty values; rows longer than the header are an error, as is
// anything else the csv reader rejects.

pub fn read_table(path: &str) -> Result<Table, SrafetchError> {
    if !path_exists(path) {
        return Err(SrafetchError::InputMissing(path.to_string()));
    }
    let err = |source| SrafetchError::Read {
        path: path.to_string(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(err)?;
    let header = reader
        .headers()
        .map_err(err)?
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<String>>();
    if header.iter().all(|x| x.is_empty()) {
        return Err(SrafetchError::NoHeader(path.to_string()));
    }
    let mut rows = Vec::<Vec<String>>::new();
    for record in reader.records() {
        let record = record.map_err(err)?;
        if record.len() > header.len() {
            return Err(SrafetchError::LongRow {
                path: path.to_string(),
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                found: record.len(),
                expected: header.len(),
            });
        }
        let mut row = record
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<String>>();
        row.resize(header.len(), String::new());
        rows.push(row);
    }
    Ok(Table::new(header, rows))
}

// Write the header of a table and then the given rows, in the given order.  Missing parent
// directories are created.

pub fn write_rows(table: &Table, rows: &[usize], path: &str) -> Result<(), SrafetchError> {
    if let Some(dir) = Path::new(path).parent() {
        if !dir.as_os_str().is_empty() {
            create_dir_all(dir)?;
        }
    }
    let err = |source| SrafetchError::Write {
        path: path.to_string(),
        source,
    };
    let mut writer = WriterBuilder::new().from_path(path).map_err(err)?;
    writer.write_record(&table.header).map_err(err)?;
    for &i in rows.iter() {
        writer.write_record(&table.rows[i]).map_err(err)?;
    }
    writer.flush()?;
    Ok(())
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_trace::*;
    use std::fs::{read_to_string, write};

    #[test]
    fn test_read_write_preserves_values() {
        PrettyTrace::new().on();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        write(
            &input,
            "Experiment Accession,Experiment Title,Spots\n\
             SRX1,\"gill, adult\",12\n\
             SRX2,,7\n\
             SRX3,\"say \"\"hi\"\"\",3\n",
        )
        .unwrap();
        let table = read_table(input.to_str().unwrap()).unwrap();
        assert_eq!(
            table.header,
            vec!["Experiment Accession", "Experiment Title", "Spots"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.record(0).field("Experiment Title"),
            Some("gill, adult")
        );
        assert_eq!(table.record(1).field("Experiment Title"), None);
        assert_eq!(
            table.record(2).field("Experiment Title"),
            Some("say \"hi\"")
        );
        assert_eq!(table.record(0).field("No Such Column"), None);

        let output = dir.path().join("sub/out.csv");
        write_rows(&table, &[2, 0], output.to_str().unwrap()).unwrap();
        let back = read_table(output.to_str().unwrap()).unwrap();
        assert_eq!(back.header, table.header);
        let picked = vec![table.rows[2].clone(), table.rows[0].clone()];
        assert_eq!(back.rows, picked);
        let text = read_to_string(&output).unwrap();
        assert!(text.starts_with("Experiment Accession,Experiment Title,Spots"));
    }

    #[test]
    fn test_read_errors() {
        PrettyTrace::new().on();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        match read_table(missing.to_str().unwrap()) {
            Err(SrafetchError::InputMissing(_)) => {}
            x => panic!("expected InputMissing, got {:?}", x),
        }
        let long = dir.path().join("long.csv");
        write(&long, "a,b\n1,2\n3,4,5\n").unwrap();
        match read_table(long.to_str().unwrap()) {
            Err(SrafetchError::LongRow {
                line: 3,
                found: 3,
                expected: 2,
                ..
            }) => {}
            x => panic!("expected LongRow error, got {:?}", x),
        }
    }

    #[test]
    fn test_short_rows_padded() {
        PrettyTrace::new().on();
        let dir = tempfile::tempdir().unwrap();
        let short = dir.path().join("short.csv");
        write(
            &short,
            "Experiment Accession,Experiment Title,Study Title,Library Strategy\n\
             SRX1,gill,Octopus tissues,RNA-Seq\n\
             SRX2,mantle\n",
        )
        .unwrap();
        let table = read_table(short.to_str().unwrap()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["SRX2", "mantle", "", ""]);
        assert_eq!(table.record(1).field("Library Strategy"), None);
        let output = dir.path().join("out.csv");
        write_rows(&table, &[1], output.to_str().unwrap()).unwrap();
        assert_eq!(
            read_to_string(&output).unwrap(),
            "Experiment Accession,Experiment Title,Study Title,Library Strategy\n\
             SRX2,mantle,,\n"
        );
    }

    #[test]
    fn test_empty_file_rejected() {
        PrettyTrace::new().on();
        let dir = tempfile::tempdir().unwrap();
        for (name, text) in [("empty.csv", ""), ("blank.csv", "\n\n")] {
            let f = dir.path().join(name);
            write(&f, text).unwrap();
            match read_table(f.to_str().unwrap()) {
                Err(SrafetchError::NoHeader(_)) => {}
                x => panic!("expected NoHeader for {}, got {:?}", name, x),
            }
        }
    }

    #[test]
    fn test_column_values() {
        let table = Table::new(
            vec!["x".to_string(), "y".to_string()],
            vec![
                vec!["1".to_string(), "a".to_string()],
                vec!["2".to_string(), "".to_string()],
            ],
        );
        assert_eq!(table.column_values("y").unwrap(), vec!["a", ""]);
        assert!(matches!(
            table.column_values("z"),
            Err(SrafetchError::MissingColumn(_))
        ));
    }
}
