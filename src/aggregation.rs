use std::fmt;
use std::str::FromStr;

use log::debug;
use polars::prelude::*;

use crate::error::{MaruError, Result};
use crate::schema::ProcessedColumnLabels;

/// Longest worksheet name a workbook accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Greenhouse-gas species with a summable mass column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ghg {
    Co2,
    Ch4,
    N2o,
}

impl Ghg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Co2 => "co2",
            Self::Ch4 => "ch4",
            Self::N2o => "n2o",
        }
    }

    pub fn value_column(&self, labels: &ProcessedColumnLabels) -> &'static str {
        match self {
            Self::Co2 => labels.co2,
            Self::Ch4 => labels.ch4,
            Self::N2o => labels.n2o,
        }
    }
}

impl fmt::Display for Ghg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ghg {
    type Err = MaruError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "co2" => Ok(Self::Co2),
            "ch4" => Ok(Self::Ch4),
            "n2o" => Ok(Self::N2o),
            _ => Err(MaruError::UnreachableSelector(format!(
                "Invalid GHG value '{s}'. Must be one of 'co2', 'ch4', 'n2o'"
            ))),
        }
    }
}

/// The numeric column a transform sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    EnergyKwh,
    Fuel,
    Ghg(Ghg),
}

impl Measure {
    pub fn source_column(&self, labels: &ProcessedColumnLabels) -> &'static str {
        match self {
            Self::EnergyKwh => labels.energy_kwh,
            Self::Fuel => labels.fuel,
            Self::Ghg(ghg) => ghg.value_column(labels),
        }
    }
}

/// Grouping keys of a transform.
///
/// Every grouping uses municipality name, vessel type, municipality voyage
/// type and year, plus at most one extra key. `PerVoyageType` is the
/// exception: it replaces municipality voyage type with voyage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Common,
    PerGtGroup,
    PerPhase,
    PerVoyageType,
}

impl Grouping {
    pub fn keys(&self, labels: &ProcessedColumnLabels) -> Vec<&'static str> {
        let mut keys = vec![
            labels.municipality_name,
            labels.vessel_type,
            labels.municipality_voyage_type,
            labels.year,
        ];
        match self {
            Self::Common => {}
            Self::PerGtGroup => keys.push(labels.gt_group),
            Self::PerPhase => keys.push(labels.phase),
            Self::PerVoyageType => {
                keys.retain(|k| *k != labels.municipality_voyage_type);
                keys.push(labels.voyage_type);
            }
        }
        keys
    }
}

/// Group-by, sum and sort of one measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub measure: Measure,
    pub grouping: Grouping,
}

impl Transform {
    pub fn new(measure: Measure, grouping: Grouping) -> Self {
        Self { measure, grouping }
    }

    /// Sum the measure per group into `output_value_col` (defaults to the
    /// source column name), sorted ascending by every key column.
    pub fn apply(
        &self,
        df: LazyFrame,
        labels: &ProcessedColumnLabels,
        output_value_col: Option<&str>,
    ) -> LazyFrame {
        let source = self.measure.source_column(labels);
        let output = output_value_col.unwrap_or(source);
        let keys = self.grouping.keys(labels);
        let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();

        df.group_by(key_exprs.clone())
            .agg([col(source).sum().alias(output)])
            .sort_by_exprs(
                key_exprs,
                SortMultipleOptions::default().with_maintain_order(true),
            )
    }

    pub fn output_columns(
        &self,
        labels: &ProcessedColumnLabels,
        output_value_col: Option<&str>,
    ) -> Vec<String> {
        let mut columns: Vec<String> = self
            .grouping
            .keys(labels)
            .into_iter()
            .map(str::to_string)
            .collect();
        columns.push(
            output_value_col
                .unwrap_or(self.measure.source_column(labels))
                .to_string(),
        );
        columns
    }
}

/// Specification of one output variable and its destination worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputVarSpec {
    name: String,
    sheet_name: String,
    output_value_col: Option<String>,
    transform: Transform,
}

impl OutputVarSpec {
    /// Fails with `SheetNameTooLong` if `sheet_name` exceeds 31 characters.
    pub fn new(name: &str, sheet_name: &str, transform: Transform) -> Result<Self> {
        let len = sheet_name.chars().count();
        if len > MAX_SHEET_NAME_LEN {
            return Err(MaruError::SheetNameTooLong {
                name: sheet_name.to_string(),
                len,
            });
        }
        Ok(Self {
            name: name.to_string(),
            sheet_name: sheet_name.to_string(),
            output_value_col: None,
            transform,
        })
    }

    pub fn with_output_value_col(mut self, column: &str) -> Self {
        self.output_value_col = Some(column.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn output_value_col(&self) -> Option<&str> {
        self.output_value_col.as_deref()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Run the transform. `output_override` takes precedence over the
    /// spec's own output column.
    pub fn process(
        &self,
        df: LazyFrame,
        labels: &ProcessedColumnLabels,
        output_override: Option<&str>,
    ) -> LazyFrame {
        let output = output_override.or(self.output_value_col());
        debug!(
            "Variable {}: {:?} grouped by {:?}",
            self.name, self.transform.measure, self.transform.grouping
        );
        self.transform.apply(df, labels, output)
    }
}

/// Output variable specs keyed by variable id, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputVarSpecs {
    specs: Vec<OutputVarSpec>,
}

impl OutputVarSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a spec. Variable ids must be unique.
    pub fn insert(&mut self, spec: OutputVarSpec) -> Result<()> {
        if self.get(spec.name()).is_some() {
            return Err(MaruError::InvalidData(format!(
                "Duplicate output variable '{}'",
                spec.name()
            )));
        }
        self.specs.push(spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&OutputVarSpec> {
        self.specs.iter().find(|s| s.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputVarSpec> {
        self.specs.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(OutputVarSpec::name).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

// ── Stavanger variable set ──────────────────────────────────────────────────
pub mod stavanger {
    pub const ENERGY_SUM_KWH: &str = "maru_energibehov_sum_kwh";
    pub const ENERGY_PER_PHASE_KWH: &str = "maru_energibehov_per_fase_kwh";
    pub const ENERGY_PER_GT_KWH: &str = "maru_energibehov_per_gt_kwh";
    pub const ENERGY_PER_VOYAGE_TYPE_KWH: &str = "maru_energibehov_per_voyage_type_kwh";
    pub const FUEL_SUM_TONN: &str = "maru_fuel_sum_tonn";
    pub const FUEL_PER_GT_TONN: &str = "maru_fuel_per_gt_tonn";
    pub const CO2_SUM_TONN: &str = "maru_co2_sum_tonn";
    pub const CO2_PER_PHASE_TONN: &str = "maru_co2_per_fase_tonn";
    pub const CO2_PER_GT_TONN: &str = "maru_co2_per_gt_tonn";
    pub const CH4_SUM_TONN: &str = "maru_ch4_sum_tonn";
    pub const CH4_PER_PHASE_TONN: &str = "maru_ch4_per_fase_tonn";
    pub const CH4_PER_GT_TONN: &str = "maru_ch4_per_gt_tonn";
    pub const N2O_SUM_TONN: &str = "maru_n2o_sum_tonn";
    pub const N2O_PER_PHASE_TONN: &str = "maru_n2o_per_fase_tonn";
    pub const N2O_PER_GT_TONN: &str = "maru_n2o_per_gt_tonn";

    // The variable id is longer than a worksheet name may be.
    pub const ENERGY_PER_VOYAGE_TYPE_SHEET: &str = "maru_energ_per_voyage_type_kwh";
}

/// The Stavanger variable set, as delivered in August 2025.
pub fn stavanger_output_specs_202508() -> Result<OutputVarSpecs> {
    use stavanger::*;
    use Grouping::*;

    let energy = Measure::EnergyKwh;
    let fuel = Measure::Fuel;
    let co2 = Measure::Ghg(Ghg::Co2);
    let ch4 = Measure::Ghg(Ghg::Ch4);
    let n2o = Measure::Ghg(Ghg::N2o);

    let table: [(&str, &str, Measure, Grouping); 15] = [
        (ENERGY_SUM_KWH, ENERGY_SUM_KWH, energy, Common),
        (ENERGY_PER_PHASE_KWH, ENERGY_PER_PHASE_KWH, energy, PerPhase),
        (ENERGY_PER_GT_KWH, ENERGY_PER_GT_KWH, energy, PerGtGroup),
        (ENERGY_PER_VOYAGE_TYPE_KWH, ENERGY_PER_VOYAGE_TYPE_SHEET, energy, PerVoyageType),
        (FUEL_SUM_TONN, FUEL_SUM_TONN, fuel, Common),
        (FUEL_PER_GT_TONN, FUEL_PER_GT_TONN, fuel, PerGtGroup),
        (CO2_SUM_TONN, CO2_SUM_TONN, co2, Common),
        (CO2_PER_PHASE_TONN, CO2_PER_PHASE_TONN, co2, PerPhase),
        (CO2_PER_GT_TONN, CO2_PER_GT_TONN, co2, PerGtGroup),
        (CH4_SUM_TONN, CH4_SUM_TONN, ch4, Common),
        (CH4_PER_PHASE_TONN, CH4_PER_PHASE_TONN, ch4, PerPhase),
        (CH4_PER_GT_TONN, CH4_PER_GT_TONN, ch4, PerGtGroup),
        (N2O_SUM_TONN, N2O_SUM_TONN, n2o, Common),
        (N2O_PER_PHASE_TONN, N2O_PER_PHASE_TONN, n2o, PerPhase),
        (N2O_PER_GT_TONN, N2O_PER_GT_TONN, n2o, PerGtGroup),
    ];

    let mut specs = OutputVarSpecs::new();
    for (name, sheet, measure, grouping) in table {
        specs.insert(OutputVarSpec::new(name, sheet, Transform::new(measure, grouping))?)?;
    }
    Ok(specs)
}
