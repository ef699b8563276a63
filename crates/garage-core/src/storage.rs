use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::get_records_path;
use crate::error::{GarageError, Result};
use crate::lock::with_file_lock;
use crate::types::StoredRecord;

/// Read every record from a JSONL file.
/// Returns an empty vec if the file doesn't exist.
pub fn read_records_file<T: StoredRecord>(file_path: &Path) -> Result<Vec<T>> {
    let content = match fs::read_to_string(file_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        records.push(serde_json::from_str(trimmed)?);
    }
    Ok(records)
}

/// Read all records of one kind from the store under `cwd`.
pub fn read_all<T: StoredRecord>(cwd: &Path) -> Result<Vec<T>> {
    read_records_file(&get_records_path::<T>(cwd))
}

/// Read the records of one kind that belong to `vehicle_id`.
pub fn read_for_vehicle<T: StoredRecord>(cwd: &Path, vehicle_id: u64) -> Result<Vec<T>> {
    let mut records: Vec<T> = read_all(cwd)?;
    records.retain(|r| r.vehicle_id() == Some(vehicle_id));
    Ok(records)
}

pub fn find_by_id<T: StoredRecord>(cwd: &Path, id: u64) -> Result<Option<T>> {
    Ok(read_all::<T>(cwd)?.into_iter().find(|r| r.id() == id))
}

/// Ids are assigned like an auto-increment column: one past the largest seen.
pub fn next_id<T: StoredRecord>(existing: &[T]) -> u64 {
    existing.iter().map(StoredRecord::id).max().unwrap_or(0) + 1
}

/// Validate and append records, assigning fresh ids. Returns the ids given.
pub fn append_records<T: StoredRecord>(cwd: &Path, records: &mut [T]) -> Result<Vec<u64>> {
    for r in records.iter() {
        r.validate()?;
    }

    let file_path = get_records_path::<T>(cwd);
    with_file_lock(&file_path, || {
        let existing: Vec<T> = read_records_file(&file_path)?;
        let mut id = next_id(&existing);

        let mut buf = String::new();
        let mut ids = Vec::with_capacity(records.len());
        for r in records.iter_mut() {
            r.set_id(id);
            ids.push(id);
            id += 1;
            buf.push_str(&serde_json::to_string(r)?);
            buf.push('\n');
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)?;
        file.write_all(buf.as_bytes())?;
        tracing::debug!(file = T::FILE, count = ids.len(), "appended records");
        Ok(ids)
    })
}

pub fn append_record<T: StoredRecord>(cwd: &Path, record: &mut T) -> Result<u64> {
    let ids = append_records(cwd, std::slice::from_mut(record))?;
    ids.first()
        .copied()
        .ok_or_else(|| GarageError::Validation("no record appended".to_string()))
}

/// Atomically replace a JSONL file (temp file + rename). Callers that
/// read-modify-write should go through [`update_records`] to hold the lock.
pub fn write_records_file<T: StoredRecord>(file_path: &Path, records: &[T]) -> Result<()> {
    let dir = file_path.parent().unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    for r in records {
        writeln!(tmp, "{}", serde_json::to_string(r)?)?;
    }
    tmp.flush()?;
    tmp.persist(file_path).map_err(std::io::Error::other)?;
    Ok(())
}

/// Load all records of one kind, let `f` edit them, then rewrite the file,
/// all under the file lock. Edited records are validated before writing.
pub fn update_records<T, R, F>(cwd: &Path, f: F) -> Result<R>
where
    T: StoredRecord,
    F: FnOnce(&mut Vec<T>) -> Result<R>,
{
    let file_path = get_records_path::<T>(cwd);
    with_file_lock(&file_path, || {
        let mut records: Vec<T> = read_records_file(&file_path)?;
        let out = f(&mut records)?;
        for r in &records {
            r.validate()?;
        }
        write_records_file(&file_path, &records)?;
        tracing::debug!(file = T::FILE, count = records.len(), "rewrote records");
        Ok(out)
    })
}

/// Drop every record of one kind that belongs to `vehicle_id`. Returns how
/// many were removed.
pub fn remove_for_vehicle<T: StoredRecord>(cwd: &Path, vehicle_id: u64) -> Result<usize> {
    update_records::<T, _, _>(cwd, |records| {
        let before = records.len();
        records.retain(|r| r.vehicle_id() != Some(vehicle_id));
        Ok(before - records.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::init_garage_dir;
    use crate::types::{OdometerReading, Vehicle};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn reading(vehicle_id: u64, mileage: i64) -> OdometerReading {
        OdometerReading {
            id: 0,
            vehicle_id,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            mileage,
        }
    }

    #[test]
    fn read_nonexistent_returns_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let records: Vec<Vehicle> = read_records_file(&tmp.path().join("nope.jsonl")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let tmp = tempfile::tempdir().unwrap();
        init_garage_dir(tmp.path()).unwrap();

        let first = append_record(tmp.path(), &mut reading(1, 100)).unwrap();
        let mut batch = vec![reading(2, 200), reading(1, 300)];
        let ids = append_records(tmp.path(), &mut batch).unwrap();

        assert_eq!(first, 1);
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(batch[1].id, 3);

        let all: Vec<OdometerReading> = read_all(tmp.path()).unwrap();
        assert_eq!(all.len(), 3);

        let mine: Vec<OdometerReading> = read_for_vehicle(tmp.path(), 1).unwrap();
        let mileages: Vec<i64> = mine.iter().map(|r| r.mileage).collect();
        assert_eq!(mileages, vec![100, 300]);
    }

    #[test]
    fn invalid_records_are_not_written() {
        let tmp = tempfile::tempdir().unwrap();
        init_garage_dir(tmp.path()).unwrap();

        let mut batch = vec![reading(1, 100), reading(1, -1)];
        assert!(append_records(tmp.path(), &mut batch).is_err());
        let all: Vec<OdometerReading> = read_all(tmp.path()).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn update_rewrites_in_place() {
        let tmp = tempfile::tempdir().unwrap();
        init_garage_dir(tmp.path()).unwrap();
        append_records(tmp.path(), &mut [reading(1, 1), reading(1, 2)]).unwrap();

        let removed = update_records::<OdometerReading, _, _>(tmp.path(), |all| {
            let before = all.len();
            all.retain(|r| r.mileage == 2);
            Ok(before - all.len())
        })
        .unwrap();
        assert_eq!(removed, 1);

        let back: Vec<OdometerReading> = read_all(tmp.path()).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(find_by_id::<OdometerReading>(tmp.path(), 2).unwrap(), Some(back[0].clone()));
        assert!(!tmp.path().join(".garage/records/odometer.jsonl.lock").exists());
    }

    #[test]
    fn update_rejects_invalid_edits() {
        let tmp = tempfile::tempdir().unwrap();
        init_garage_dir(tmp.path()).unwrap();
        append_record(tmp.path(), &mut reading(1, 10)).unwrap();

        let result = update_records::<OdometerReading, _, _>(tmp.path(), |all| {
            all[0].mileage = -10;
            Ok(())
        });
        assert!(result.is_err());
        let back: Vec<OdometerReading> = read_all(tmp.path()).unwrap();
        assert_eq!(back[0].mileage, 10);
    }

    #[test]
    fn remove_for_vehicle_keeps_other_vehicles() {
        let tmp = tempfile::tempdir().unwrap();
        init_garage_dir(tmp.path()).unwrap();
        append_records(tmp.path(), &mut [reading(1, 10), reading(2, 20), reading(1, 30)]).unwrap();

        let removed = remove_for_vehicle::<OdometerReading>(tmp.path(), 1).unwrap();
        assert_eq!(removed, 2);
        let left: Vec<OdometerReading> = read_all(tmp.path()).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].vehicle_id, 2);
        assert_eq!(remove_for_vehicle::<OdometerReading>(tmp.path(), 1).unwrap(), 0);
    }
}
