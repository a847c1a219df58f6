use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a typed view of a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Boolean(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – inferred dtype of a whole column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::Text => "object",
        };
        f.write_str(name)
    }
}

impl ColumnType {
    /// Infer a dtype from every cell of a column.
    ///
    /// Empty cells are missing values: they never decide the type, but an
    /// integer column with gaps becomes `Float` since missing integers are NaN.
    /// A column with no values at all is `Float` (all-NaN).
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut all_int = true;
        let mut all_float = true;
        let mut all_bool = true;
        let mut has_missing = false;

        for cell in cells {
            if cell.is_empty() {
                has_missing = true;
                continue;
            }
            if all_int && cell.parse::<i64>().is_err() {
                all_int = false;
            }
            if all_float && cell.parse::<f64>().is_err() {
                all_float = false;
            }
            if all_bool && cell != "true" && cell != "false" && cell != "True" && cell != "False" {
                all_bool = false;
            }
            if !all_int && !all_float && !all_bool {
                return ColumnType::Text;
            }
        }

        if all_int && !has_missing {
            ColumnType::Integer
        } else if all_int || all_float {
            ColumnType::Float
        } else if all_bool && !has_missing {
            ColumnType::Boolean
        } else {
            ColumnType::Text
        }
    }

    /// Interpret a raw cell according to this dtype.
    pub fn parse(&self, raw: &str) -> CellValue {
        if raw.is_empty() {
            return CellValue::Null;
        }
        match self {
            ColumnType::Integer => raw
                .parse()
                .map(CellValue::Integer)
                .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
            ColumnType::Float => raw
                .parse()
                .map(CellValue::Float)
                .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
            ColumnType::Boolean => CellValue::Boolean(raw.eq_ignore_ascii_case("true")),
            ColumnType::Text => CellValue::Text(raw.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

/// One record of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Zero-based position in the source file; written as the index label.
    pub index: usize,
    /// Source text of every cell, in column order.
    pub fields: Vec<String>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table. Column set and row count are fixed at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from a header and raw records, inferring column dtypes.
    ///
    /// Every record must have `names.len()` fields.
    pub fn from_records(names: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let dtype = ColumnType::infer(records.iter().map(|r| r[i].as_str()));
                Column { name, dtype }
            })
            .collect();
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, fields)| Row { index, fields })
            .collect();
        Dataset { columns, rows }
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sample – the randomly selected subset
// ---------------------------------------------------------------------------

/// Rows drawn from a [`Dataset`] without replacement, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Sample {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows shown before and after the ellipsis when a sample is too long to print.
const DISPLAY_EDGE_ROWS: usize = 5;

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<Option<&Row>> = if self.rows.len() > 2 * DISPLAY_EDGE_ROWS {
            let tail = &self.rows[self.rows.len() - DISPLAY_EDGE_ROWS..];
            self.rows[..DISPLAY_EDGE_ROWS]
                .iter()
                .map(Some)
                .chain(std::iter::once(None))
                .chain(tail.iter().map(Some))
                .collect()
        } else {
            self.rows.iter().map(Some).collect()
        };

        let cells: Vec<Option<Vec<CellValue>>> = shown
            .iter()
            .map(|row| {
                row.map(|r| {
                    r.fields
                        .iter()
                        .zip(&self.columns)
                        .map(|(raw, col)| col.dtype.parse(raw))
                        .collect()
                })
            })
            .collect();
        let rendered: Vec<Option<Vec<(String, bool)>>> = cells
            .into_iter()
            .map(|row| {
                row.map(|values| {
                    values
                        .into_iter()
                        .map(|v| {
                            let right = matches!(
                                v,
                                CellValue::Integer(_) | CellValue::Float(_) | CellValue::Null
                            );
                            (v.to_string(), right)
                        })
                        .collect()
                })
            })
            .collect();

        let index_width = shown
            .iter()
            .flatten()
            .map(|r| r.index.to_string().len())
            .max()
            .unwrap_or(0)
            .max(3);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                rendered
                    .iter()
                    .flatten()
                    .map(|cells| cells[i].0.chars().count())
                    .chain(std::iter::once(col.name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (col, width) in self.columns.iter().zip(widths.iter().copied()) {
            write!(f, "  {:>width$}", col.name)?;
        }
        writeln!(f)?;

        for (row, cells) in shown.iter().zip(&rendered) {
            match (row, cells) {
                (Some(row), Some(cells)) => {
                    write!(f, "{:<index_width$}", row.index)?;
                    for ((text, right), width) in cells.iter().zip(widths.iter().copied()) {
                        if *right {
                            write!(f, "  {text:>width$}")?;
                        } else {
                            write!(f, "  {text:<width$}")?;
                        }
                    }
                }
                _ => {
                    write!(f, "{:<index_width$}", "...")?;
                    for width in widths.iter().copied() {
                        write!(f, "  {:>width$}", "...")?;
                    }
                }
            }
            writeln!(f)?;
        }

        write!(f, "\n[{} rows x {} columns]", self.rows.len(), self.columns.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn infers_column_dtypes() {
        assert_eq!(ColumnType::infer(["1", "2", "-3"]), ColumnType::Integer);
        assert_eq!(ColumnType::infer(["1", "", "3"]), ColumnType::Float);
        assert_eq!(ColumnType::infer(["1.5", "2", "1e3"]), ColumnType::Float);
        assert_eq!(ColumnType::infer(["true", "False"]), ColumnType::Boolean);
        assert_eq!(ColumnType::infer(["G2V", "1.0"]), ColumnType::Text);
        assert_eq!(ColumnType::infer(Vec::<&str>::new()), ColumnType::Float);
    }

    #[test]
    fn typed_view_follows_column_dtype() {
        let ds = Dataset::from_records(
            strings(&["Teff", "SpType-ELS"]),
            vec![strings(&["5772", "G"]), strings(&["", "M"])],
        );
        let teff = ds.columns[0].dtype;
        assert_eq!(teff, ColumnType::Float);
        assert_eq!(teff.parse("5772"), CellValue::Float(5772.0));
        assert_eq!(teff.parse(""), CellValue::Null);
        assert_eq!(ds.columns[1].dtype.parse("M"), CellValue::Text("M".into()));
        assert_eq!(ColumnType::Integer.parse("12"), CellValue::Integer(12));
    }

    #[test]
    fn sample_display_aligns_numbers_right_and_text_left() {
        let ds = Dataset::from_records(
            strings(&["Teff", "SpType"]),
            vec![strings(&["5772", "G2V"]), strings(&["", "M"])],
        );
        let sample = Sample {
            columns: ds.columns.clone(),
            rows: ds.rows.clone(),
        };
        let text = sample.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "     Teff  SpType");
        assert_eq!(lines[1], "0    5772  G2V   ");
        assert_eq!(lines[2], "1     NaN  M     ");
    }

    #[test]
    fn sample_display_pads_non_ascii_by_characters() {
        let ds = Dataset::from_records(
            strings(&["name", "n"]),
            vec![strings(&["Ωmega", "1"]), strings(&["ab", "2"])],
        );
        let sample = Sample {
            columns: ds.columns.clone(),
            rows: ds.rows.clone(),
        };
        let text = sample.to_string();
        let widths: Vec<usize> = text.lines().take(3).map(|l| l.chars().count()).collect();
        assert_eq!(widths, vec![widths[0]; 3]);
    }

    #[test]
    fn rows_keep_source_positions() {
        let ds = Dataset::from_records(
            strings(&["a"]),
            vec![strings(&["x"]), strings(&["y"]), strings(&["z"])],
        );
        let indices: Vec<usize> = ds.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn long_sample_display_is_truncated() {
        let records = (0..12).map(|i| vec![i.to_string()]).collect();
        let ds = Dataset::from_records(strings(&["n"]), records);
        let sample = Sample {
            columns: ds.columns.clone(),
            rows: ds.rows.clone(),
        };
        let text = sample.to_string();
        assert!(text.contains("..."));
        assert!(text.ends_with("[12 rows x 1 columns]"));
        assert!(!text.lines().any(|l| l.starts_with("6 ")));
    }
}
