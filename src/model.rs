use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{DateTime, NaiveDateTime};
use glob::glob;
use log::{debug, error, info};
use polars::prelude::*;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::aggregation::OutputVarSpecs;
use crate::error::{MaruError, Result};
use crate::municipality::MunicipalityDomains;
use crate::report_schema::{ColumnType, ReportSchema};
use crate::schema::ProcessedColumnLabels;
use crate::version::MaruVersion;

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Reads MarU report workbooks into typed frames for one report version.
///
/// Schema, derived municipality domains and the polars dtypes are built once
/// and reused for every file.
pub struct MaruModel {
    labels: ProcessedColumnLabels,
    schema: ReportSchema,
    municipalities: MunicipalityDomains,
    dtypes: HashMap<String, DataType>,
    municipality_name_dtype: DataType,
    municipality_number_dtype: DataType,
}

impl MaruModel {
    pub fn new(version: MaruVersion) -> Result<Self> {
        let labels = ProcessedColumnLabels::new(version);
        let schema = ReportSchema::new(version);
        let combined = schema
            .domain(labels.municipality_name)
            .ok_or_else(|| MaruError::MissingColumn(labels.municipality_name.to_string()))?;
        let municipalities = MunicipalityDomains::from_domain(combined)?;

        let mut dtypes = HashMap::new();
        for (name, ty) in schema.iter() {
            dtypes.insert(name.to_string(), ty.to_dtype()?);
        }
        let municipality_name_dtype = municipalities.names().to_dtype()?;
        let municipality_number_dtype = municipalities.numbers().to_dtype()?;

        Ok(Self {
            labels,
            schema,
            municipalities,
            dtypes,
            municipality_name_dtype,
            municipality_number_dtype,
        })
    }

    pub fn labels(&self) -> &ProcessedColumnLabels {
        &self.labels
    }

    pub fn schema(&self) -> &ReportSchema {
        &self.schema
    }

    pub fn municipalities(&self) -> &MunicipalityDomains {
        &self.municipalities
    }

    // ── Report loading ──────────────────────────────────────────────────────

    /// Load one report workbook (first worksheet).
    ///
    /// Every schema column except the version-conditional measures must be
    /// present. Declared columns are typed, categorical values are
    /// checked against their domain, `year_month` becomes `month` and the
    /// combined municipality label is split into name and number.
    /// Undeclared columns are kept as strings.
    pub fn load_report(&self, path: &Path) -> Result<DataFrame> {
        info!("Processing file: {}", path.display());
        let (header, rows) = Self::read_first_sheet(path)?;
        let optional = self.labels.optional_measures();
        let required: Vec<&str> = self
            .schema
            .column_names()
            .into_iter()
            .filter(|name| !optional.iter().any(|o| o == name))
            .collect();
        Self::require_columns(path, &header, &required)?;

        let mut columns: Vec<Column> = Vec::with_capacity(header.len() + 1);
        for (idx, name) in header.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            let cells: Vec<&Data> = rows
                .iter()
                .map(|row| row.get(idx).unwrap_or(&Data::Empty))
                .collect();

            if name == self.labels.year_month {
                columns.push(Self::month_column(self.labels.month, &cells)?);
                continue;
            }
            if name == self.labels.municipality_name {
                let labels = self.categorical_series(name, &cells)?;
                let (names, numbers) = self.municipalities.split_series_as(
                    &labels,
                    &self.municipality_name_dtype,
                    &self.municipality_number_dtype,
                )?;
                columns.push(names.into());
                columns.push(numbers.into());
                continue;
            }

            let column = match self.schema.get(name) {
                Some(ColumnType::Float64) => Column::new(
                    name.as_str().into(),
                    Self::parse_cells(name, &cells, cell_to_f64)?,
                ),
                Some(ColumnType::Int16) => Column::new(
                    name.as_str().into(),
                    Self::parse_cells(name, &cells, cell_to_i16)?,
                ),
                Some(ColumnType::TimestampUtc) => {
                    let millis = Series::new(
                        name.as_str().into(),
                        Self::parse_cells(name, &cells, cell_to_millis)?,
                    );
                    millis.cast(&self.dtypes[name.as_str()])?.into()
                }
                Some(ColumnType::Categorical(_)) => self.categorical_series(name, &cells)?.into(),
                Some(ColumnType::String) | None => Column::new(
                    name.as_str().into(),
                    Self::parse_cells(name, &cells, cell_to_string)?,
                ),
            };
            columns.push(column);
        }

        let df = DataFrame::new(columns)?;
        debug!("Loaded {} rows from {}", df.height(), path.display());
        Ok(df)
    }

    /// Load and vertically concatenate every report in `paths`.
    ///
    /// All files must carry the same set of columns; the column order of the
    /// first file is kept.
    pub fn load_reports(&self, paths: &[PathBuf]) -> Result<DataFrame> {
        let (first, rest) = paths
            .split_first()
            .ok_or_else(|| MaruError::NoData("no report files to load".into()))?;
        let mut combined = self.load_report(first)?;
        let names = combined.get_column_names_owned();
        for path in rest {
            let frame = self.load_report(path)?;
            let other = frame.get_column_names_owned();
            let missing: Vec<&str> = names
                .iter()
                .filter(|n| !other.contains(*n))
                .map(|n| n.as_str())
                .collect();
            let extra: Vec<&str> = other
                .iter()
                .filter(|n| !names.contains(*n))
                .map(|n| n.as_str())
                .collect();
            if !missing.is_empty() || !extra.is_empty() {
                return Err(MaruError::InvalidData(format!(
                    "Columns of {} differ from {}: missing {:?}, unexpected {:?}",
                    path.display(),
                    first.display(),
                    missing,
                    extra
                )));
            }
            combined.vstack_mut(&frame.select(names.clone())?)?;
        }
        Ok(combined)
    }

    // ── Output variables ────────────────────────────────────────────────────

    /// Rows of the consolidated data for one municipality name.
    pub fn filter_municipality(&self, df: DataFrame, municipality_name: &str) -> Result<LazyFrame> {
        let df = df
            .lazy()
            .filter(
                col(self.labels.municipality_name)
                    .cast(DataType::String)
                    .eq(lit(municipality_name)),
            )
            .collect()?;
        if df.height() == 0 {
            return Err(MaruError::NoData(format!(
                "No data found for municipality \"{municipality_name}\""
            )));
        }
        Ok(df.lazy())
    }

    /// Run every spec in order and write each result to its worksheet.
    ///
    /// Stops at the first failing variable; the workbook is then not saved.
    pub fn write_variables(
        &self,
        input: LazyFrame,
        specs: &OutputVarSpecs,
        output_value_col: Option<&str>,
        out_file: &Path,
    ) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for spec in specs.iter() {
            info!("Processing variable \"{}\"", spec.name());
            let result = spec
                .process(input.clone(), &self.labels, output_value_col)
                .collect()
                .map_err(MaruError::from)
                .and_then(|df| {
                    let sheet = workbook.add_worksheet();
                    sheet.set_name(spec.sheet_name())?;
                    write_frame(sheet, &df, &header_format)
                });
            if let Err(err) = result {
                error!(
                    "An error occurred while processing the variable \"{}\". Further processing was aborted.",
                    spec.name()
                );
                return Err(err);
            }
        }

        info!("Writing output file {}", out_file.display());
        workbook.save(out_file)?;
        Ok(())
    }

    // ── Private helpers ─────────────────────────────────────────────────────

    fn read_first_sheet(path: &Path) -> Result<(Vec<String>, Vec<Vec<Data>>)> {
        let mut workbook = open_workbook_auto(path)?;
        let sheet_names = workbook.sheet_names();
        let first = sheet_names
            .first()
            .ok_or_else(|| MaruError::NoData(format!("{} has no worksheets", path.display())))?;
        let range = workbook.worksheet_range(first)?;

        let mut rows = range.rows();
        let header: Vec<String> = rows
            .next()
            .ok_or_else(|| MaruError::NoData(format!("{} has no header row", path.display())))?
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();
        let body: Vec<Vec<Data>> = rows.map(|row| row.to_vec()).collect();
        Ok((header, body))
    }

    fn require_columns(path: &Path, header: &[String], required: &[&str]) -> Result<()> {
        for &col_name in required {
            if !header.iter().any(|h| h == col_name) {
                return Err(MaruError::MissingColumn(format!(
                    "'{col_name}' in {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    fn parse_cells<T>(
        column: &str,
        cells: &[&Data],
        parse: fn(&Data) -> Option<Option<T>>,
    ) -> Result<Vec<Option<T>>> {
        cells
            .iter()
            .map(|cell| {
                parse(cell).ok_or_else(|| {
                    MaruError::InvalidData(format!("Unparsable value '{cell}' in column '{column}'"))
                })
            })
            .collect()
    }

    /// Strings checked against the column's domain, cast to its enum dtype.
    fn categorical_series(&self, column: &str, cells: &[&Data]) -> Result<Series> {
        let values = Self::parse_cells(column, cells, cell_to_string)?;
        if let Some(domain) = self.schema.domain(column) {
            if let Some(bad) = values.iter().flatten().find(|v| !domain.contains(v)) {
                return Err(MaruError::SchemaTypeMismatch {
                    column: column.to_string(),
                    value: bad.clone(),
                });
            }
        }
        let series = Series::new(column.into(), values);
        if column == self.labels.municipality_name {
            return Ok(series);
        }
        Ok(series.strict_cast(&self.dtypes[column])?)
    }

    /// `"YYYY-MM"` → month number, as Int8.
    fn month_column(name: &str, cells: &[&Data]) -> Result<Column> {
        let months = cells
            .iter()
            .map(|cell| match cell_to_string(cell).flatten() {
                None => Ok(None),
                Some(value) => {
                    let trimmed = value.trim();
                    let start = trimmed.char_indices().rev().nth(1).map_or(0, |(i, _)| i);
                    trimmed[start..].parse::<i8>().map(Some).map_err(|_| {
                        MaruError::InvalidData(format!(
                            "Invalid year_month value '{value}', expected YYYY-MM"
                        ))
                    })
                }
            })
            .collect::<Result<Vec<Option<i8>>>>()?;
        Ok(Column::new(name.into(), months))
    }

    #[cfg(test)]
    fn municipality_dtypes(&self) -> (&DataType, &DataType) {
        (&self.municipality_name_dtype, &self.municipality_number_dtype)
    }
}

// ── Cell conversion ─────────────────────────────────────────────────────────
//
// Outer `None` means the cell could not be parsed; inner `None` is an empty
// cell.

fn cell_to_f64(cell: &Data) -> Option<Option<f64>> {
    match cell {
        Data::Empty => Some(None),
        Data::Float(f) => Some(Some(*f)),
        Data::Int(i) => Some(Some(*i as f64)),
        Data::String(s) if s.trim().is_empty() => Some(None),
        Data::String(s) => s.trim().parse().ok().map(Some),
        _ => None,
    }
}

fn cell_to_i16(cell: &Data) -> Option<Option<i16>> {
    match cell {
        Data::Empty => Some(None),
        Data::Int(i) => i16::try_from(*i).ok().map(Some),
        Data::Float(f) if f.fract() == 0.0 && f.abs() <= i16::MAX as f64 => Some(Some(*f as i16)),
        Data::String(s) if s.trim().is_empty() => Some(None),
        Data::String(s) => s.trim().parse().ok().map(Some),
        _ => None,
    }
}

fn cell_to_string(cell: &Data) -> Option<Option<String>> {
    match cell {
        Data::Empty => Some(None),
        Data::String(s) | Data::DateTimeIso(s) => Some(Some(s.clone())),
        Data::Error(_) => None,
        other => Some(Some(other.to_string())),
    }
}

fn cell_to_millis(cell: &Data) -> Option<Option<i64>> {
    match cell {
        Data::Empty => Some(None),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|naive| Some(naive.and_utc().timestamp_millis())),
        Data::String(s) | Data::DateTimeIso(s) if s.trim().is_empty() => Some(None),
        Data::String(s) | Data::DateTimeIso(s) => parse_timestamp_millis(s.trim()).map(Some),
        _ => None,
    }
}

fn parse_timestamp_millis(value: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc().timestamp_millis())
}

// ── Files ───────────────────────────────────────────────────────────────────

/// Every `.xlsx` file below `search_dir`, sorted by path.
pub fn find_report_files(search_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = search_dir.join("**").join("*.xlsx");
    let mut files = Vec::new();
    for entry in glob(&pattern.to_string_lossy())? {
        files.push(entry.map_err(|e| MaruError::Io(e.into()))?);
    }
    files.sort();
    Ok(files)
}

pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    ParquetWriter::new(file).finish(df)?;
    Ok(())
}

pub fn read_parquet(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(MaruError::NotFound(format!(
            "Input file \"{}\" does not exist",
            path.display()
        )));
    }
    let file = File::open(path)?;
    Ok(ParquetReader::new(file).finish()?)
}

/// Write a result frame as a plain table with a bold header row.
fn write_frame(sheet: &mut Worksheet, df: &DataFrame, header_format: &Format) -> Result<()> {
    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col_idx = u16::try_from(col_idx)
            .map_err(|_| MaruError::InvalidData("too many columns for a worksheet".into()))?;
        sheet.write_string_with_format(0, col_idx, column.name().as_str(), header_format)?;

        if column.dtype().is_primitive_numeric() {
            let values = column.cast(&DataType::Float64)?;
            for (row, value) in values.f64()?.into_iter().enumerate() {
                if let Some(value) = value {
                    sheet.write_number(row as u32 + 1, col_idx, value)?;
                }
            }
        } else {
            let values = column.cast(&DataType::String)?;
            for (row, value) in values.str()?.into_iter().enumerate() {
                if let Some(value) = value {
                    sheet.write_string(row as u32 + 1, col_idx, value)?;
                }
            }
        }
    }
    sheet.autofit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{derived, report};
    use calamine::CellErrorType;

    #[test]
    fn numeric_cells() {
        assert_eq!(cell_to_f64(&Data::Float(1.5)), Some(Some(1.5)));
        assert_eq!(cell_to_f64(&Data::Int(3)), Some(Some(3.0)));
        assert_eq!(cell_to_f64(&Data::Empty), Some(None));
        assert_eq!(cell_to_f64(&Data::String(" 2.25 ".into())), Some(Some(2.25)));
        assert_eq!(cell_to_f64(&Data::String("abc".into())), None);
        assert_eq!(cell_to_i16(&Data::Float(2024.0)), Some(Some(2024)));
        assert_eq!(cell_to_i16(&Data::Float(2024.5)), None);
        assert_eq!(cell_to_i16(&Data::Int(40_000)), None);
    }

    #[test]
    fn string_cells() {
        assert_eq!(cell_to_string(&Data::String("Cruise".into())), Some(Some("Cruise".into())));
        assert_eq!(cell_to_string(&Data::Empty), Some(None));
        assert_eq!(cell_to_string(&Data::Error(CellErrorType::NA)), None);
    }

    #[test]
    fn timestamp_strings() {
        assert_eq!(parse_timestamp_millis("1970-01-01 00:00:01"), Some(1000));
        assert_eq!(parse_timestamp_millis("1970-01-01T00:00:00.5Z"), Some(500));
        assert_eq!(parse_timestamp_millis("yesterday"), None);
    }

    #[test]
    fn month_from_year_month() {
        let cells = [
            Data::String("2024-03".into()),
            Data::Empty,
            Data::String("2023-12".into()),
        ];
        let refs: Vec<&Data> = cells.iter().collect();
        let month = MaruModel::month_column("month", &refs).unwrap();
        assert_eq!(month.dtype(), &DataType::Int8);
        let month = month.i8().unwrap();
        assert_eq!(month.get(0), Some(3));
        assert_eq!(month.get(1), None);
        assert_eq!(month.get(2), Some(12));
    }

    #[test]
    fn bad_year_month_is_rejected() {
        let cells = [Data::String("2024-XX".into())];
        let refs: Vec<&Data> = cells.iter().collect();
        assert!(MaruModel::month_column("month", &refs).is_err());
    }

    #[test]
    fn model_builds_municipality_dtypes() {
        let model = MaruModel::new(MaruVersion::V20241128).unwrap();
        let (names, numbers) = model.municipality_dtypes();
        assert!(matches!(names, DataType::Enum(..)));
        assert!(matches!(numbers, DataType::Enum(..)));
        assert!(model.municipalities().names().contains("Herøy (1818)"));
    }

    #[test]
    fn unknown_category_is_a_type_mismatch() {
        let model = MaruModel::new(MaruVersion::V20241128).unwrap();
        let cells = [Data::String("Fishing".into())];
        let refs: Vec<&Data> = cells.iter().collect();
        let err = model.categorical_series(report::PHASE, &refs).unwrap_err();
        assert!(matches!(err, MaruError::SchemaTypeMismatch { .. }));

        let model = MaruModel::new(MaruVersion::V20250304).unwrap();
        assert!(model.categorical_series(report::PHASE, &refs).is_ok());
    }

    #[test]
    fn missing_column_names_the_file() {
        let header = vec!["year".to_string(), "sum_kwh".to_string()];
        let err = MaruModel::require_columns(
            Path::new("reports/jan.xlsx"),
            &header,
            &["year", report::PHASE],
        )
        .unwrap_err();
        match err {
            MaruError::MissingColumn(message) => {
                assert!(message.contains("phase"));
                assert!(message.contains("jan.xlsx"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn derived_column_names() {
        let model = MaruModel::new(MaruVersion::V20250304).unwrap();
        assert_eq!(model.labels().month, derived::MONTH);
        assert_eq!(model.labels().municipality_number, derived::MUNICIPALITY_NUMBER);
    }
}
