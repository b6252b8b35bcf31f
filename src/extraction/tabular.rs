//! CSV to table conversion
//!
//! Cells are rendered the way a dataframe prints them once each column has a
//! type: missing values become `nan`, integer columns drop leading zeros and
//! signs, float columns use the shortest round-trip repr (`7.0`, `1e+16`),
//! boolean columns print `True`/`False`, and everything else is kept verbatim.
//! When every column is numeric and any is float, integers print as floats.

use crate::domain::{Column, ExtractionError, Table};
use csv::{ReaderBuilder, StringRecord};

/// Cell values treated as missing
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Rendering of a missing value
pub const MISSING: &str = "nan";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

/// Parse CSV bytes into a table of rendered cells
///
/// The first non-blank line is the header. Blank lines are skipped, short rows
/// are padded with missing values and rows longer than the header are an
/// error.
///
/// ```
/// use granite_regulate::extraction::tabular::parse_table;
///
/// let table = parse_table(b"id,score,email\n007,2.50,a@b.com\n8,,\n").unwrap();
/// assert_eq!(table.cell(0, 0), Some("7"));
/// assert_eq!(table.cell(0, 1), Some("2.5"));
/// assert_eq!(table.cell(1, 1), Some("nan"));
/// assert_eq!(table.cell(1, 2), Some("nan"));
/// ```
pub fn parse_table(bytes: &[u8]) -> Result<Table, ExtractionError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut header: Option<StringRecord> = None;
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| ExtractionError::InvalidCsv(e.to_string()))?;
        if is_blank_line(&record) {
            continue;
        }

        let Some(ref names) = header else {
            header = Some(record);
            continue;
        };

        if record.len() > names.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(ExtractionError::InvalidCsv(format!(
                "Error tokenizing data. Expected {} fields in line {}, saw {}",
                names.len(),
                line,
                record.len()
            )));
        }

        let mut row: Vec<Option<String>> = record.iter().map(cell_value).collect();
        row.resize(names.len(), None);
        rows.push(row);
    }

    let header = header
        .ok_or_else(|| ExtractionError::InvalidCsv("No columns to parse from file".to_string()))?;

    let names = column_names(&header);
    let values: Vec<Vec<Option<&str>>> = (0..names.len())
        .map(|index| rows.iter().map(|row| row[index].as_deref()).collect())
        .collect();
    let kinds = upcast_numeric_rows(values.iter().map(|v| infer_kind(v)).collect());

    let columns = names
        .into_iter()
        .zip(values.iter().zip(kinds))
        .map(|(name, (values, kind))| Column {
            name,
            cells: render_column(values, kind),
        })
        .collect();

    Table::from_columns(columns)
        .ok_or_else(|| ExtractionError::InvalidCsv("Columns have different lengths".to_string()))
}

fn is_blank_line(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(str::is_empty)
}

fn cell_value(raw: &str) -> Option<String> {
    if NA_TOKENS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Header names with `Unnamed: <index>` for blanks and `.N` suffixes for repeats
fn column_names(header: &StringRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());

    for (index, raw) in header.iter().enumerate() {
        let base = if raw.is_empty() {
            format!("Unnamed: {index}")
        } else {
            raw.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while names.contains(&name) {
            suffix += 1;
            name = format!("{base}.{suffix}");
        }
        names.push(name);
    }

    names
}

fn infer_kind(values: &[Option<&str>]) -> ColumnKind {
    let present: Vec<&str> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return ColumnKind::Float;
    }
    let has_missing = present.len() < values.len();

    if !has_missing && present.iter().all(|v| parse_int(v).is_some()) {
        ColumnKind::Integer
    } else if present.iter().all(|v| parse_float(v).is_some()) {
        ColumnKind::Float
    } else if !has_missing && present.iter().all(|v| parse_bool(v).is_some()) {
        ColumnKind::Boolean
    } else {
        ColumnKind::Text
    }
}

/// Rows are read as a single dtype: when every column is numeric and one of
/// them is float, integer cells print as floats too. Any text or boolean
/// column keeps each cell in its own column type.
fn upcast_numeric_rows(kinds: Vec<ColumnKind>) -> Vec<ColumnKind> {
    let all_numeric = kinds
        .iter()
        .all(|k| matches!(k, ColumnKind::Integer | ColumnKind::Float));
    let any_float = kinds.contains(&ColumnKind::Float);

    if !(all_numeric && any_float) {
        return kinds;
    }
    kinds.into_iter().map(|_| ColumnKind::Float).collect()
}

fn render_column(values: &[Option<&str>], kind: ColumnKind) -> Vec<String> {
    values
        .iter()
        .map(|value| match value {
            None => MISSING.to_string(),
            Some(v) => match kind {
                ColumnKind::Integer => parse_int(v).map(|i| i.to_string()),
                ColumnKind::Float => parse_float(v).map(python_float_repr),
                ColumnKind::Boolean => {
                    parse_bool(v).map(|b| if b { "True" } else { "False" }.to_string())
                }
                ColumnKind::Text => None,
            }
            .unwrap_or_else(|| v.to_string()),
        })
        .collect()
}

fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|f| !f.is_nan())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Shortest round-trip float rendering with a `.0` for whole numbers and
/// scientific notation outside `1e-4 <= |x| < 1e16`
///
/// ```
/// use granite_regulate::extraction::tabular::python_float_repr;
///
/// assert_eq!(python_float_repr(7.0), "7.0");
/// assert_eq!(python_float_repr(1e16), "1e+16");
/// assert_eq!(python_float_repr(0.00001), "1e-05");
/// assert_eq!(python_float_repr(1234.5), "1234.5");
/// ```
pub fn python_float_repr(value: f64) -> String {
    if value.is_nan() {
        return MISSING.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "-1.2345e3"
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exponent) {
        if exponent >= 0 {
            let point = exponent as usize + 1;
            if digits.len() > point {
                format!("{sign}{}.{}", &digits[..point], &digits[point..])
            } else {
                format!("{sign}{digits:0<point$}.0")
            }
        } else {
            let zeros = "0".repeat((-exponent - 1) as usize);
            format!("{sign}0.{zeros}{digits}")
        }
    } else {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{sign}{first}e{exp_sign}{:02}", exponent.abs())
        } else {
            format!("{sign}{first}.{rest}e{exp_sign}{:02}", exponent.abs())
        }
    }
}
