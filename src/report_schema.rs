//! Typed schema of raw MarU report files.
//!
//! Categorical columns carry a closed, ordered [`CategoricalDomain`]. The
//! schema for each [`MaruVersion`] is built from the base category lists in
//! [`crate::categories`] plus that version's append-only deltas.

use polars::prelude::*;

use crate::categories;
use crate::error::Result;
use crate::schema::{measure, report, ColumnLabels};
use crate::version::MaruVersion;

/// Named, ordered, closed set of permissible values for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalDomain {
    name: String,
    values: Vec<String>,
}

impl CategoricalDomain {
    pub fn new<I, S>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// New domain with `additions` appended after the existing values.
    pub fn extended<I, S>(&self, additions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = self.values.clone();
        values.extend(additions.into_iter().map(Into::into));
        Self {
            name: self.name.clone(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.position(value).is_some()
    }

    /// Category ordinal of `value`.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// True if every value of `self` appears in `later` at the same index.
    pub fn is_prefix_of(&self, later: &CategoricalDomain) -> bool {
        later.values.len() >= self.values.len()
            && self.values.iter().zip(&later.values).all(|(a, b)| a == b)
    }

    /// Polars `Enum` dtype with this domain's categories, in order.
    pub fn to_dtype(&self) -> Result<DataType> {
        let frozen = FrozenCategories::new(self.values.iter().map(String::as_str))?;
        Ok(DataType::from_frozen_categories(frozen))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Categorical(CategoricalDomain),
    Int16,
    Float64,
    String,
    /// Millisecond timestamp in UTC.
    TimestampUtc,
}

impl ColumnType {
    pub fn to_dtype(&self) -> Result<DataType> {
        Ok(match self {
            Self::Categorical(domain) => domain.to_dtype()?,
            Self::Int16 => DataType::Int16,
            Self::Float64 => DataType::Float64,
            Self::String => DataType::String,
            Self::TimestampUtc => DataType::Datetime(TimeUnit::Milliseconds, Some(TimeZone::UTC)),
        })
    }

    pub fn domain(&self) -> Option<&CategoricalDomain> {
        match self {
            Self::Categorical(domain) => Some(domain),
            _ => None,
        }
    }
}

/// Ordered column → type mapping for one report version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSchema {
    version: MaruVersion,
    columns: Vec<(String, ColumnType)>,
}

impl ReportSchema {
    pub fn new(version: MaruVersion) -> Self {
        build_report_schema(version)
    }

    pub fn for_tag(tag: &str) -> Result<Self> {
        Ok(build_report_schema(tag.parse()?))
    }

    pub fn version(&self) -> MaruVersion {
        self.version
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnType)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, column: &str) -> Option<&ColumnType> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, ty)| ty)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn domain(&self, column: &str) -> Option<&CategoricalDomain> {
        self.get(column).and_then(ColumnType::domain)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Insert or replace a column. Replacing keeps the original position.
    fn set(&mut self, column: &str, ty: ColumnType) {
        match self.columns.iter_mut().find(|(name, _)| name == column) {
            Some(slot) => slot.1 = ty,
            None => self.columns.push((column.to_string(), ty)),
        }
    }

    fn extend_domain(&mut self, column: &str, additions: &[&str]) {
        if let Some(domain) = self.domain(column) {
            let extended = domain.extended(additions.iter().copied());
            self.set(column, ColumnType::Categorical(extended));
        }
    }

    pub fn to_polars_schema(&self) -> Result<Schema> {
        let mut schema = Schema::with_capacity(self.columns.len());
        for (name, ty) in &self.columns {
            schema.with_column(name.as_str().into(), ty.to_dtype()?);
        }
        Ok(schema)
    }
}

fn categorical(column: &str, values: impl IntoIterator<Item = &'static str>) -> (String, ColumnType) {
    (
        column.to_string(),
        ColumnType::Categorical(CategoricalDomain::new(column, values)),
    )
}

fn base_schema(version: MaruVersion) -> ReportSchema {
    let mut columns = vec![
        categorical(report::GT_GROUP, categories::GT_GROUPS),
        categorical(report::VESSEL_TYPE, categories::VESSEL_TYPES),
        categorical(report::PHASE, categories::PHASES),
        categorical(report::VOYAGE_TYPE, categories::VOYAGE_TYPES),
        categorical(report::EZ_AREA_NAME, categories::EZ_AREAS),
        categorical(report::MGMT_PLAN_AREA_NAME, categories::MGMT_PLAN_AREAS),
        categorical(
            report::MUNICIPALITY_NAME,
            categories::MUNICIPALITIES_ORIGINAL
                .into_iter()
                .chain(categories::MUNICIPALITIES_ADDED),
        ),
        categorical(report::COUNTY_NAME, categories::COUNTIES),
        categorical(report::MUNICIPALITY_VOYAGE_TYPE, categories::MUNICIPALITY_VOYAGE_TYPES),
        categorical(report::VERSION, categories::FORMAT_VERSIONS),
        (report::TIMESTAMP.to_string(), ColumnType::TimestampUtc),
        (report::YEAR.to_string(), ColumnType::Int16),
        (report::YEAR_MONTH.to_string(), ColumnType::String),
    ];
    columns.extend(
        measure::ALL
            .iter()
            .map(|name| (name.to_string(), ColumnType::Float64)),
    );
    ReportSchema { version, columns }
}

/// Build the raw-column schema for `version`.
pub fn build_report_schema(version: MaruVersion) -> ReportSchema {
    let mut schema = base_schema(version);
    match version {
        MaruVersion::V20241128 => {}
        MaruVersion::V20250304 => {
            for column in ColumnLabels::new(version).optional_measures() {
                schema.set(column, ColumnType::Float64);
            }
            schema.extend_domain(report::VERSION, &categories::FORMAT_VERSIONS_ADDED_20250304);
            schema.extend_domain(report::PHASE, &categories::PHASES_ADDED_20250304);
            schema.extend_domain(
                report::MUNICIPALITY_NAME,
                &categories::MUNICIPALITIES_ADDED_20250304,
            );
            schema.extend_domain(report::VOYAGE_TYPE, &categories::VOYAGE_TYPES_ADDED_20250304);
        }
    }
    schema
}

/// Derive a sorted category domain for every string or categorical column
/// of `df`.
///
/// Maintenance helper: load a sample report and use the result to update
/// the lists in [`crate::categories`].
pub fn enum_schema_from_strings(df: &DataFrame) -> Result<Vec<CategoricalDomain>> {
    let mut domains = Vec::new();
    for column in df.get_columns() {
        let strings = match column.dtype() {
            DataType::String => column.clone(),
            DataType::Categorical(..) | DataType::Enum(..) => column.cast(&DataType::String)?,
            _ => continue,
        };
        let mut values: Vec<String> = strings
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        values.sort();
        values.dedup();
        domains.push(CategoricalDomain::new(column.name().as_str(), values));
    }
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaruError;

    #[test]
    fn building_is_deterministic() {
        for version in MaruVersion::ALL {
            assert_eq!(build_report_schema(version), build_report_schema(version));
        }
    }

    #[test]
    fn domains_are_append_only_across_versions() {
        let early = build_report_schema(MaruVersion::V20241128);
        let late = build_report_schema(MaruVersion::V20250304);
        for (name, ty) in early.iter() {
            if let Some(domain) = ty.domain() {
                let later = late.domain(name).expect("categorical column dropped");
                assert!(domain.is_prefix_of(later), "domain {name} was reordered");
            } else {
                assert_eq!(Some(ty), late.get(name));
            }
        }
    }

    #[test]
    fn later_version_deltas() {
        let late = build_report_schema(MaruVersion::V20250304);
        let phase = late.domain(report::PHASE).unwrap();
        assert_eq!(phase.values().last().map(String::as_str), Some("Fishing"));
        assert_eq!(phase.len(), 8);

        let municipality = late.domain(report::MUNICIPALITY_NAME).unwrap();
        assert!(municipality.contains("Våler (3419)"));
        assert!(municipality.contains("Våler (3114)"));
        assert!(late.domain(report::VOYAGE_TYPE).unwrap().contains("NCS_Facility_Proximate"));
        assert_eq!(late.domain(report::VERSION).unwrap().len(), 3);
    }

    #[test]
    fn base_domain_sizes() {
        let early = build_report_schema(MaruVersion::V20241128);
        assert_eq!(early.domain(report::VESSEL_TYPE).unwrap().len(), 14);
        assert_eq!(early.domain(report::PHASE).unwrap().len(), 7);
        assert_eq!(early.domain(report::VOYAGE_TYPE).unwrap().len(), 5);
        assert_eq!(early.domain(report::EZ_AREA_NAME).unwrap().len(), 4);
        assert_eq!(early.domain(report::MGMT_PLAN_AREA_NAME).unwrap().len(), 6);
        assert_eq!(early.domain(report::COUNTY_NAME).unwrap().len(), 16);
        assert_eq!(early.domain(report::MUNICIPALITY_VOYAGE_TYPE).unwrap().len(), 4);

        let municipality = early.domain(report::MUNICIPALITY_NAME).unwrap();
        assert_eq!(municipality.values()[0], "Alstahaug (1820)");
        assert_eq!(
            municipality.position("Elverum (3420)"),
            Some(categories::MUNICIPALITIES_ORIGINAL.len())
        );
    }

    #[test]
    fn battery_and_shore_power_only_in_later_version() {
        let early = ReportSchema::for_tag("20241128").unwrap();
        assert!(!early.contains(measure::KWH_BATTERY));
        assert!(!early.contains(measure::KWH_SHORE_POWER));

        let late = ReportSchema::for_tag("20250304").unwrap();
        assert_eq!(late.get(measure::KWH_BATTERY), Some(&ColumnType::Float64));
        assert_eq!(late.get(measure::KWH_SHORE_POWER), Some(&ColumnType::Float64));
    }

    #[test]
    fn numeric_kinds_are_fixed() {
        let late = build_report_schema(MaruVersion::V20250304);
        assert_eq!(late.get(report::YEAR), Some(&ColumnType::Int16));
        assert_eq!(late.get(report::TIMESTAMP), Some(&ColumnType::TimestampUtc));
        assert_eq!(late.get(measure::CO2), Some(&ColumnType::Float64));
    }

    #[test]
    fn unknown_tag_does_not_default() {
        let err = ReportSchema::for_tag("latest").unwrap_err();
        assert!(matches!(err, MaruError::UnsupportedVersion { .. }));
    }

    #[test]
    fn polars_schema_has_enum_columns() {
        let schema = build_report_schema(MaruVersion::V20241128)
            .to_polars_schema()
            .unwrap();
        assert!(matches!(schema.get(report::PHASE), Some(DataType::Enum(..))));
        assert_eq!(schema.get(report::YEAR), Some(&DataType::Int16));
    }

    #[test]
    fn string_columns_become_sorted_domains() {
        let df = df!(
            "phase" => ["Maneuver", "Anchor", "Maneuver"],
            "sum_kwh" => [1.0, 2.0, 3.0],
        )
        .unwrap();
        let domains = enum_schema_from_strings(&df).unwrap();
        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].name(), "phase");
        assert_eq!(domains[0].values(), ["Anchor", "Maneuver"]);
    }

    #[test]
    fn enum_columns_become_domains_too() {
        let phases = CategoricalDomain::new("phase", ["Node", "Anchor", "Maneuver"]);
        let phase = Series::new("phase".into(), ["Maneuver", "Anchor"])
            .strict_cast(&phases.to_dtype().unwrap())
            .unwrap();
        let df = DataFrame::new(vec![
            phase.into(),
            Column::new("vessel_type".into(), ["Cruise", "Cruise"]),
        ])
        .unwrap();
        let domains = enum_schema_from_strings(&df).unwrap();
        assert_eq!(domains.len(), 2);
        assert_eq!(domains[0].name(), "phase");
        assert_eq!(domains[0].values(), ["Anchor", "Maneuver"]);
        assert_eq!(domains[1].values(), ["Cruise"]);
    }
}
