use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{Result, SampleError};

use super::model::Sample;

/// How the sample is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit a leading unlabeled column holding each row's source position.
    /// Downstream consumers expect it, so it is on by default.
    pub write_index: bool,
    /// Write to `<path>.tmp` and rename into place once complete.
    pub atomic: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            write_index: true,
            atomic: false,
        }
    }
}

/// Serialize `sample` as CSV with a header row.
pub fn write_csv(sample: &Sample, path: &Path, options: WriteOptions) -> Result<()> {
    if !options.atomic {
        return write_to(sample, path, options.write_index);
    }

    let tmp = temp_path(path);
    if let Err(e) = write_to(sample, &tmp, options.write_index) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        SampleError::file_access(path, e)
    })?;
    log::debug!("moved {} into place", tmp.display());
    Ok(())
}

fn write_to(sample: &Sample, path: &Path, write_index: bool) -> Result<()> {
    let file = File::create(path).map_err(|e| SampleError::file_access(path, e))?;
    let mut writer = csv::Writer::from_writer(file);
    let io_err = |e: csv::Error| match e.into_kind() {
        csv::ErrorKind::Io(source) => SampleError::file_access(path, source),
        other => SampleError::parse(path, format!("{other:?}")),
    };

    let mut header: Vec<&str> = Vec::with_capacity(sample.columns.len() + 1);
    if write_index {
        header.push("");
    }
    header.extend(sample.columns.iter().map(|c| c.name.as_str()));
    writer.write_record(&header).map_err(io_err)?;

    for row in &sample.rows {
        if write_index {
            let index = row.index.to_string();
            writer
                .write_record(std::iter::once(index.as_str()).chain(row.fields.iter().map(String::as_str)))
                .map_err(io_err)?;
        } else {
            writer.write_record(&row.fields).map_err(io_err)?;
        }
    }

    writer.flush().map_err(|e| SampleError::file_access(path, e))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;
    use tempfile::tempdir;

    fn sample() -> Sample {
        let ds = Dataset::from_records(
            vec!["Source".into(), "BR_RP".into()],
            vec![
                vec!["10".into(), "0.82".into()],
                vec!["11".into(), "".into()],
                vec!["12".into(), "1.9".into()],
            ],
        );
        Sample {
            columns: ds.columns.clone(),
            rows: vec![ds.rows[2].clone(), ds.rows[0].clone()],
        }
    }

    #[test]
    fn writes_leading_index_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&sample(), &path, WriteOptions::default()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, ",Source,BR_RP\n2,12,1.9\n0,10,0.82\n");
    }

    #[test]
    fn index_column_can_be_suppressed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let options = WriteOptions {
            write_index: false,
            ..WriteOptions::default()
        };
        write_csv(&sample(), &path, options).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Source,BR_RP\n12,1.9\n10,0.82\n");
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let options = WriteOptions {
            atomic: true,
            ..WriteOptions::default()
        };
        write_csv(&sample(), &path, options).unwrap();

        assert!(path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn failed_atomic_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();
        let options = WriteOptions {
            atomic: true,
            ..WriteOptions::default()
        };

        let err = write_csv(&sample(), &path, options).unwrap_err();
        assert!(matches!(err, SampleError::FileAccess { .. }));
        assert!(!temp_path(&path).exists());
        assert!(path.join("occupied").exists());
    }

    #[test]
    fn unwritable_destination_is_a_file_access_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        for atomic in [false, true] {
            let options = WriteOptions {
                atomic,
                ..WriteOptions::default()
            };
            let err = write_csv(&sample(), &path, options).unwrap_err();
            assert!(matches!(err, SampleError::FileAccess { .. }));
        }
    }
}
