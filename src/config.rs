use std::path::PathBuf;

use crate::error::{MaruError, Result};
use crate::version::MaruVersion;

/// Settings for consolidating report workbooks into one parquet file.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub search_dir: PathBuf,
    pub out_file: PathBuf,
    pub version: MaruVersion,
}

impl ConvertConfig {
    /// Pre-flight checks: the search directory exists and the output file
    /// does not.
    pub fn validate(&self) -> Result<()> {
        if !self.search_dir.is_dir() {
            return Err(MaruError::NotFound(format!(
                "The search directory \"{}\" does not exist",
                self.search_dir.display()
            )));
        }
        ensure_absent(&self.out_file)
    }
}

/// Settings for deriving output variables from the consolidated parquet file.
#[derive(Debug, Clone)]
pub struct VariablesConfig {
    pub in_file: PathBuf,
    pub out_file: PathBuf,
    pub version: MaruVersion,
    /// Municipality name without number, e.g. `Stavanger`.
    pub municipality_name: String,
    /// Overrides the value column name of every variable.
    pub output_value_col: Option<String>,
}

impl VariablesConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.in_file.is_file() {
            return Err(MaruError::NotFound(format!(
                "Input file \"{}\" does not exist",
                self.in_file.display()
            )));
        }
        ensure_absent(&self.out_file)
    }
}

fn ensure_absent(path: &std::path::Path) -> Result<()> {
    if path.exists() {
        return Err(MaruError::FileExists(path.display().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn convert_requires_search_dir() {
        let temp = tempdir().unwrap();
        let config = ConvertConfig {
            search_dir: temp.path().join("missing"),
            out_file: temp.path().join("out.parquet"),
            version: MaruVersion::V20250304,
        };
        assert!(matches!(config.validate(), Err(MaruError::NotFound(_))));
    }

    #[test]
    fn convert_refuses_existing_output() {
        let temp = tempdir().unwrap();
        let out_file = temp.path().join("out.parquet");
        fs::write(&out_file, b"").unwrap();
        let config = ConvertConfig {
            search_dir: temp.path().to_path_buf(),
            out_file,
            version: MaruVersion::V20241128,
        };
        assert!(matches!(config.validate(), Err(MaruError::FileExists(_))));
    }

    #[test]
    fn variables_checks_input_and_output() {
        let temp = tempdir().unwrap();
        let in_file = temp.path().join("maru.parquet");
        let mut config = VariablesConfig {
            in_file: in_file.clone(),
            out_file: temp.path().join("vars.xlsx"),
            version: MaruVersion::V20250304,
            municipality_name: "Stavanger".into(),
            output_value_col: None,
        };
        assert!(matches!(config.validate(), Err(MaruError::NotFound(_))));

        fs::write(&in_file, b"").unwrap();
        assert!(config.validate().is_ok());

        config.out_file = in_file;
        assert!(matches!(config.validate(), Err(MaruError::FileExists(_))));
    }
}
