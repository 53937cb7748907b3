//! Column-name constants for MarU report files and processed data.
//! Single source of truth for every literal column name.

use crate::error::Result;
use crate::version::MaruVersion;

// ── Raw report columns ──────────────────────────────────────────────────────
pub mod report {
    pub const YEAR: &str = "year";
    pub const YEAR_MONTH: &str = "year_month";
    pub const GT_GROUP: &str = "gt_group";
    pub const VESSEL_TYPE: &str = "vessel_type";
    pub const PHASE: &str = "phase";
    pub const VOYAGE_TYPE: &str = "voyage_type";
    pub const EZ_AREA_NAME: &str = "maritime_borders_norwegian_economic_zone_area_name";
    pub const MGMT_PLAN_AREA_NAME: &str = "management_plan_marine_areas_area_name_norwegian";
    pub const MUNICIPALITY_NAME: &str = "municipality_name";
    pub const COUNTY_NAME: &str = "county_name";
    pub const MUNICIPALITY_VOYAGE_TYPE: &str = "municipality_voyage_type";
    pub const VERSION: &str = "version";
    pub const TIMESTAMP: &str = "timestamp_utc_generated";
}

// ── Measure columns (all Float64) ───────────────────────────────────────────
pub mod measure {
    pub const TIME_SEC: &str = "sum_seconds";
    pub const ENERGY_KWH: &str = "sum_kwh";
    pub const FUEL: &str = "sum_fuel";
    pub const CO2: &str = "sum_co2";
    pub const NMVOC: &str = "sum_nmvoc";
    pub const CO: &str = "sum_co";
    pub const CH4: &str = "sum_ch4";
    pub const N2O: &str = "sum_n2o";
    pub const SOX: &str = "sum_sox";
    pub const PM10: &str = "sum_pm10";
    pub const PM2_5: &str = "sum_pm2_5";
    pub const NOX: &str = "sum_nox";
    pub const BC: &str = "sum_bc";
    pub const CO2E: &str = "sum_co2e";
    pub const DISTANCE_KM: &str = "distance_kilometers";

    // Only reported from 20250304 onwards.
    pub const KWH_BATTERY: &str = "sum_kwh_battery";
    pub const KWH_SHORE_POWER: &str = "sum_kwh_shore_power";

    pub const ALL: [&str; 15] = [
        TIME_SEC, ENERGY_KWH, FUEL, CO2, NMVOC, CO, CH4, N2O, SOX, PM10, PM2_5, NOX, BC, CO2E,
        DISTANCE_KM,
    ];
}

// ── Columns synthesized during ingestion ────────────────────────────────────
pub mod derived {
    pub const MUNICIPALITY_NUMBER: &str = "municipality_number";
    pub const MONTH: &str = "month";
}

/// A column that exists only in some report versions.
///
/// `NotApplicable` means the version never reports the column, which is
/// different from a column that is present but empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionedColumn {
    NotApplicable,
    Present(&'static str),
}

impl VersionedColumn {
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::NotApplicable => None,
            Self::Present(name) => Some(name),
        }
    }
}

/// Column names of the raw report files for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabels {
    pub year: &'static str,
    pub year_month: &'static str,
    pub gt_group: &'static str,
    pub vessel_type: &'static str,
    pub phase: &'static str,
    pub voyage_type: &'static str,
    pub ez_area_name: &'static str,
    pub mgmt_plan_area_name: &'static str,
    pub municipality_name: &'static str,
    pub county_name: &'static str,
    pub municipality_voyage_type: &'static str,
    pub time_sec: &'static str,
    pub energy_kwh: &'static str,
    pub kwh_battery: VersionedColumn,
    pub kwh_shore_power: VersionedColumn,
    pub fuel: &'static str,
    pub co2: &'static str,
    pub nmvoc: &'static str,
    pub co: &'static str,
    pub ch4: &'static str,
    pub n2o: &'static str,
    pub sox: &'static str,
    pub pm10: &'static str,
    pub pm2_5: &'static str,
    pub nox: &'static str,
    pub bc: &'static str,
    pub co2e: &'static str,
    pub distance_km: &'static str,
    pub version: &'static str,
    pub timestamp: &'static str,
}

impl ColumnLabels {
    pub fn new(version: MaruVersion) -> Self {
        let (kwh_battery, kwh_shore_power) = match version {
            MaruVersion::V20241128 => (VersionedColumn::NotApplicable, VersionedColumn::NotApplicable),
            MaruVersion::V20250304 => (
                VersionedColumn::Present(measure::KWH_BATTERY),
                VersionedColumn::Present(measure::KWH_SHORE_POWER),
            ),
        };
        Self {
            year: report::YEAR,
            year_month: report::YEAR_MONTH,
            gt_group: report::GT_GROUP,
            vessel_type: report::VESSEL_TYPE,
            phase: report::PHASE,
            voyage_type: report::VOYAGE_TYPE,
            ez_area_name: report::EZ_AREA_NAME,
            mgmt_plan_area_name: report::MGMT_PLAN_AREA_NAME,
            municipality_name: report::MUNICIPALITY_NAME,
            county_name: report::COUNTY_NAME,
            municipality_voyage_type: report::MUNICIPALITY_VOYAGE_TYPE,
            time_sec: measure::TIME_SEC,
            energy_kwh: measure::ENERGY_KWH,
            kwh_battery,
            kwh_shore_power,
            fuel: measure::FUEL,
            co2: measure::CO2,
            nmvoc: measure::NMVOC,
            co: measure::CO,
            ch4: measure::CH4,
            n2o: measure::N2O,
            sox: measure::SOX,
            pm10: measure::PM10,
            pm2_5: measure::PM2_5,
            nox: measure::NOX,
            bc: measure::BC,
            co2e: measure::CO2E,
            distance_km: measure::DISTANCE_KM,
            version: report::VERSION,
            timestamp: report::TIMESTAMP,
        }
    }

    /// Resolve labels from a raw version tag.
    pub fn for_tag(tag: &str) -> Result<Self> {
        Ok(Self::new(tag.parse()?))
    }

    /// Version-conditional measure columns that this version reports.
    pub fn optional_measures(&self) -> Vec<&'static str> {
        [self.kwh_battery, self.kwh_shore_power]
            .iter()
            .filter_map(VersionedColumn::name)
            .collect()
    }
}

/// Column names of processed (ingested) data: the raw labels plus the
/// columns that only exist after ingestion has derived them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedColumnLabels {
    pub raw: ColumnLabels,
    pub municipality_number: &'static str,
    pub month: &'static str,
}

impl ProcessedColumnLabels {
    pub fn new(version: MaruVersion) -> Self {
        Self {
            raw: ColumnLabels::new(version),
            municipality_number: derived::MUNICIPALITY_NUMBER,
            month: derived::MONTH,
        }
    }

    pub fn for_tag(tag: &str) -> Result<Self> {
        Ok(Self::new(tag.parse()?))
    }
}

impl std::ops::Deref for ProcessedColumnLabels {
    type Target = ColumnLabels;

    fn deref(&self) -> &ColumnLabels {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaruError;

    #[test]
    fn early_version_has_no_battery_or_shore_power() {
        let labels = ColumnLabels::new(MaruVersion::V20241128);
        assert_eq!(labels.kwh_battery, VersionedColumn::NotApplicable);
        assert_eq!(labels.kwh_shore_power, VersionedColumn::NotApplicable);
        assert!(labels.optional_measures().is_empty());
    }

    #[test]
    fn later_version_has_battery_and_shore_power() {
        let labels = ColumnLabels::new(MaruVersion::V20250304);
        assert_eq!(labels.kwh_battery.name(), Some("sum_kwh_battery"));
        assert_eq!(labels.kwh_shore_power.name(), Some("sum_kwh_shore_power"));
    }

    #[test]
    fn shared_fields_resolve_for_every_version() {
        let early = ColumnLabels::new(MaruVersion::V20241128);
        let late = ColumnLabels::new(MaruVersion::V20250304);
        assert_eq!(early.energy_kwh, late.energy_kwh);
        assert_eq!(early.municipality_name, "municipality_name");
        assert_eq!(late.timestamp, "timestamp_utc_generated");
    }

    #[test]
    fn bad_tag_is_unsupported_version() {
        let err = ColumnLabels::for_tag("2024").unwrap_err();
        assert!(matches!(err, MaruError::UnsupportedVersion { .. }));
    }

    #[test]
    fn processed_labels_add_derived_columns() {
        let labels = ProcessedColumnLabels::new(MaruVersion::V20250304);
        assert_eq!(labels.month, "month");
        assert_eq!(labels.municipality_number, "municipality_number");
        assert_eq!(labels.co2, "sum_co2");
    }
}
