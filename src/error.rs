use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaruError {
    #[error("Unsupported MarU version '{given}'. Valid values are: {valid}")]
    UnsupportedVersion { given: String, valid: String },

    #[error("Sheet name \"{name}\" is too long ({len} characters). It must be 31 characters or less.")]
    SheetNameTooLong { name: String, len: usize },

    #[error("Value '{value}' in column '{column}' is not in the declared category set")]
    SchemaTypeMismatch { column: String, value: String },

    #[error("Unreachable selector: {0}")]
    UnreachableSelector(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Output file \"{0}\" already exists")]
    FileExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook read error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, MaruError>;
