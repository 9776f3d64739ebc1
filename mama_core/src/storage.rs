//! Journal persistence with file locking.
//!
//! The whole journal lives in one text file, one storage line per entry.
//! Every save rewrites the file atomically.

use crate::{Entry, EntryList, Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Clone, Debug)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the journal with shared locking
    ///
    /// Returns an empty list if the file doesn't exist. Blank lines are
    /// skipped; any malformed line fails the whole load, so that the next
    /// save cannot silently drop it.
    pub fn load(&self) -> Result<EntryList> {
        if !self.path.exists() {
            tracing::info!("No data file at {:?}, starting empty", self.path);
            return Ok(EntryList::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;
        let entries = read_entries(BufReader::new(&file));
        file.unlock()?;

        let entries = entries?;
        tracing::debug!("Loaded {} entries from {:?}", entries.len(), self.path);
        Ok(EntryList::from_entries(entries))
    }

    /// Save the full journal
    ///
    /// Atomically writes by:
    /// 1. Writing every entry to a temp file next to the target
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    ///
    /// I/O failures are reported as `Error::Persistence` and leave the
    /// previous file untouched.
    pub fn save(&self, list: &EntryList) -> Result<()> {
        self.write_atomically(list).map_err(Error::Persistence)?;
        tracing::debug!("Saved {} entries to {:?}", list.full_size(), self.path);
        Ok(())
    }

    fn write_atomically(&self, list: &EntryList) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let temp = NamedTempFile::new_in(dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            for entry in list.iter() {
                writeln!(writer, "{}", entry.to_storage_string())?;
            }
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn read_entries(reader: impl BufRead) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() {
            tracing::debug!("Skipping blank line {}", line_no);
            continue;
        }

        match Entry::from_storage_str(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::error!("Failed to parse line {}: {}", line_no, e);
                return Err(Error::MalformedLine {
                    line_no,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Milk, Note};
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 28)
            .unwrap()
            .and_hms_opt(1, 14, 0)
            .unwrap()
    }

    fn sample_list() -> EntryList {
        EntryList::from_entries(vec![
            Entry::Milk(Milk {
                volume_ml: 150,
                timestamp: ts(),
            }),
            Entry::Note(Note {
                text: "first day home".into(),
                timestamp: ts(),
            }),
        ])
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(temp_dir.path().join("mama.txt"));

        storage.save(&sample_list()).unwrap();

        let contents = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(
            contents,
            "MILK|150ml|28/10/25 01:14\nNOTE|first day home|28/10/25 01:14\n"
        );

        let loaded = storage.load().unwrap();
        let loaded: Vec<_> = loaded.iter().cloned().collect();
        let expected: Vec<_> = sample_list().iter().cloned().collect();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(temp_dir.path().join("nonexistent.txt"));

        let list = storage.load().unwrap();
        assert_eq!(list.full_size(), 0);
        assert_eq!(list.shown_size(), 0);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mama.txt");
        std::fs::write(
            &path,
            "\nMILK|150ml|28/10/25 01:14\n   \nWEIGHT|60|28/10/25 01:14\n\n",
        )
        .unwrap();

        let list = Storage::new(&path).load().unwrap();
        assert_eq!(list.full_size(), 2);
        assert_eq!(list.total_milk_ml(), 150);
    }

    #[test]
    fn test_malformed_line_fails_load() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mama.txt");
        std::fs::write(
            &path,
            "MILK|150ml|28/10/25 01:14\nMILK|oops|28/10/25 01:15\nWEIGHT|60|28/10/25 01:14\n",
        )
        .unwrap();

        let err = Storage::new(&path).load().unwrap_err();
        match err {
            Error::MalformedLine { line_no, reason } => {
                assert_eq!(line_no, 2);
                assert!(reason.contains("MILK|oops"));
            }
            other => panic!("Expected MalformedLine, got {:?}", other),
        }

        // The file is left exactly as it was
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("MILK|oops"));
    }

    #[test]
    fn test_save_replaces_whole_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(temp_dir.path().join("mama.txt"));

        let mut list = sample_list();
        storage.save(&list).unwrap();
        list.delete_by_shown_index(0).unwrap();
        storage.save(&list).unwrap();

        let contents = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(contents, "NOTE|first day home|28/10/25 01:14\n");
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(temp_dir.path().join("nested").join("mama.txt"));

        storage.save(&sample_list()).unwrap();

        let dir = temp_dir.path().join("nested");
        let extras: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "mama.txt")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only mama.txt, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_save_failure_is_persistence_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        // A directory where the data file should be makes the rename fail
        let path = temp_dir.path().join("mama.txt");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let err = Storage::new(&path).save(&sample_list()).unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
        assert!(path.join("keep").exists());
    }
}
