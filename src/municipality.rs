//! Splitting of combined municipality labels such as `"Oslo (0301)"` into a
//! name and a 4-digit municipality number.
//!
//! The same parser and disambiguation rules are used for the schema's
//! category list and for every ingested row, so that the derived columns
//! always cast cleanly into the derived domains.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use log::debug;
use polars::prelude::*;
use regex::Regex;

use crate::error::{MaruError, Result};
use crate::report_schema::CategoricalDomain;
use crate::schema::{derived, report};

// The number group is optional: Svalbard has no municipality number.
const LABEL_PATTERN: &str = r"^(?P<name>[^(]*)(?: \((?P<number>\d{4})\))?$";

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LABEL_PATTERN).expect("municipality pattern is valid"))
}

/// Split a combined label into (name, number). A missing number is `""`.
pub fn parse_label(label: &str) -> Result<(String, String)> {
    let caps = label_regex()
        .captures(label)
        .ok_or_else(|| MaruError::SchemaTypeMismatch {
            column: report::MUNICIPALITY_NAME.to_string(),
            value: label.to_string(),
        })?;
    let name = caps.name("name").map_or("", |m| m.as_str());
    let number = caps.name("number").map_or("", |m| m.as_str());
    Ok((name.to_string(), number.to_string()))
}

fn disambiguated(name: String, number: &str, ambiguous: &HashSet<String>) -> String {
    if ambiguous.contains(&name) {
        format!("{name} ({number})")
    } else {
        name
    }
}

/// One category of the municipality domain after splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityEntry {
    pub label: String,
    pub name: String,
    pub number: String,
}

/// Municipality entries plus the derived name and number domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityDomains {
    entries: Vec<MunicipalityEntry>,
    names: CategoricalDomain,
    numbers: CategoricalDomain,
    ambiguous: Vec<String>,
}

impl MunicipalityDomains {
    /// Split every label of the combined municipality domain.
    ///
    /// Names shared by more than one label get the number appended, so that
    /// `"Herøy (1515)"` and `"Herøy (1818)"` stay distinct names. Both
    /// derived domains keep first-occurrence order.
    pub fn from_domain(domain: &CategoricalDomain) -> Result<Self> {
        let parsed = domain
            .values()
            .iter()
            .map(|label| parse_label(label).map(|(name, number)| (label, name, number)))
            .collect::<Result<Vec<_>>>()?;

        let mut labels_per_name: HashMap<&str, usize> = HashMap::new();
        for (_, name, _) in &parsed {
            *labels_per_name.entry(name.as_str()).or_default() += 1;
        }
        let mut ambiguous: Vec<String> = Vec::new();
        for (_, name, _) in &parsed {
            if labels_per_name[name.as_str()] > 1 && !ambiguous.contains(name) {
                ambiguous.push(name.clone());
            }
        }
        let ambiguous_set: HashSet<String> = ambiguous.iter().cloned().collect();
        if !ambiguous.is_empty() {
            debug!("Disambiguating municipality names: {ambiguous:?}");
        }

        let entries: Vec<MunicipalityEntry> = parsed
            .into_iter()
            .map(|(label, name, number)| MunicipalityEntry {
                label: label.clone(),
                name: disambiguated(name, &number, &ambiguous_set),
                number,
            })
            .collect();

        let names = CategoricalDomain::new(
            report::MUNICIPALITY_NAME,
            unique_in_order(entries.iter().map(|e| e.name.as_str())),
        );
        let numbers = CategoricalDomain::new(
            derived::MUNICIPALITY_NUMBER,
            unique_in_order(entries.iter().map(|e| e.number.as_str())),
        );

        Ok(Self {
            entries,
            names,
            numbers,
            ambiguous,
        })
    }

    pub fn entries(&self) -> &[MunicipalityEntry] {
        &self.entries
    }

    pub fn names(&self) -> &CategoricalDomain {
        &self.names
    }

    pub fn numbers(&self) -> &CategoricalDomain {
        &self.numbers
    }

    /// Names that required the number appended.
    pub fn ambiguous_names(&self) -> &[String] {
        &self.ambiguous
    }

    /// Split one data value with the same rules used for the domain.
    pub fn split(&self, label: &str) -> Result<(String, String)> {
        let (name, number) = parse_label(label)?;
        let name = if self.ambiguous.contains(&name) {
            format!("{name} ({number})")
        } else {
            name
        };
        if !self.names.contains(&name) {
            return Err(MaruError::SchemaTypeMismatch {
                column: report::MUNICIPALITY_NAME.to_string(),
                value: label.to_string(),
            });
        }
        if !self.numbers.contains(&number) {
            return Err(MaruError::SchemaTypeMismatch {
                column: derived::MUNICIPALITY_NUMBER.to_string(),
                value: label.to_string(),
            });
        }
        Ok((name, number))
    }

    /// Split a column of combined labels into name and number columns,
    /// typed with the derived enum domains.
    pub fn split_series(&self, labels: &Series) -> Result<(Series, Series)> {
        let name_dtype = self.names.to_dtype()?;
        let number_dtype = self.numbers.to_dtype()?;
        self.split_series_as(labels, &name_dtype, &number_dtype)
    }

    /// Like [`Self::split_series`], with prebuilt enum dtypes so that frames
    /// from several files share one dtype instance.
    pub fn split_series_as(
        &self,
        labels: &Series,
        name_dtype: &DataType,
        number_dtype: &DataType,
    ) -> Result<(Series, Series)> {
        let labels = labels.cast(&DataType::String)?;
        let labels = labels.str()?;

        let mut cache: HashMap<&str, (String, String)> = HashMap::new();
        let mut names: Vec<Option<String>> = Vec::with_capacity(labels.len());
        let mut numbers: Vec<Option<String>> = Vec::with_capacity(labels.len());
        for label in labels.into_iter() {
            match label {
                Some(label) => {
                    if !cache.contains_key(label) {
                        cache.insert(label, self.split(label)?);
                    }
                    let (name, number) = &cache[label];
                    names.push(Some(name.clone()));
                    numbers.push(Some(number.clone()));
                }
                None => {
                    names.push(None);
                    numbers.push(None);
                }
            }
        }

        let names =
            Series::new(report::MUNICIPALITY_NAME.into(), names).strict_cast(name_dtype)?;
        let numbers =
            Series::new(derived::MUNICIPALITY_NUMBER.into(), numbers).strict_cast(number_dtype)?;
        Ok((names, numbers))
    }

    /// One row per domain value: label, name, number.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let labels: Vec<&str> = self.entries.iter().map(|e| e.label.as_str()).collect();
        let names: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
        let numbers: Vec<&str> = self.entries.iter().map(|e| e.number.as_str()).collect();
        let df = DataFrame::new(vec![
            Column::new("municipality_label".into(), labels),
            Column::new(report::MUNICIPALITY_NAME.into(), names),
            Column::new(derived::MUNICIPALITY_NUMBER.into(), numbers),
        ])?;
        Ok(df)
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
