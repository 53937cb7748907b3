//! Conversion of MarU maritime-emissions report workbooks into a typed,
//! consolidated dataset, and derivation of aggregate output variables.

pub mod aggregation;
pub mod categories;
pub mod config;
pub mod error;
pub mod model;
pub mod municipality;
pub mod report_schema;
pub mod schema;
pub mod version;

pub use aggregation::{
    stavanger_output_specs_202508, Ghg, Grouping, Measure, OutputVarSpec, OutputVarSpecs,
    Transform,
};
pub use config::{ConvertConfig, VariablesConfig};
pub use error::{MaruError, Result};
pub use model::MaruModel;
pub use municipality::{MunicipalityDomains, MunicipalityEntry};
pub use report_schema::{build_report_schema, CategoricalDomain, ColumnType, ReportSchema};
pub use schema::{ColumnLabels, ProcessedColumnLabels, VersionedColumn};
pub use version::MaruVersion;
