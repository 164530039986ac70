//! Route extracted values to the form they belong to.
//!
//! A form is picked by a keyword entry in the [`MatchMap`] and receives a
//! fixed set of columns copied out of it. Rows are returned to the caller;
//! storing or displaying them is left to the application.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::match_map::MatchMap;

/// Format of the generated timestamp column.
pub const DATETIME_FORMAT: &str = "%y/%m/%d %H:%M:%S";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("no form matches the extracted keyword")]
    NoMatchingForm,
    #[error("form '{form}' needs column '{column}' which was not extracted")]
    MissingColumn { form: String, column: String },
}

/// The match entry that selects a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordAttribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub name: String,
    pub keyword: KeywordAttribute,
    pub columns: Vec<String>,
    /// Column that receives the time the row was made, if any.
    #[serde(default)]
    pub datetime_field: Option<String>,
}

impl Form {
    /// All columns of a row, timestamp first.
    pub fn all_columns(&self) -> Vec<&str> {
        self.datetime_field
            .iter()
            .chain(&self.columns)
            .map(String::as_str)
            .collect()
    }
}

/// One row for a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub form: String,
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormCatalog {
    forms: Vec<Form>,
}

impl FormCatalog {
    pub fn new(forms: Vec<Form>) -> Self {
        Self { forms }
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    /// The first form whose keyword entry is present with exactly its value.
    pub fn route(&self, matches: &MatchMap) -> Option<&Form> {
        self.forms
            .iter()
            .find(|form| matches.get(&form.keyword.key) == Some(form.keyword.value.as_str()))
    }

    /// Build the row for whichever form `matches` routes to, stamped with `now`.
    pub fn record<Tz>(&self, matches: &MatchMap, now: &DateTime<Tz>) -> Result<FormRecord, FormError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let form = self.route(matches).ok_or(FormError::NoMatchingForm)?;
        let mut values = form
            .columns
            .iter()
            .map(|column| {
                let value = matches.get(column).ok_or_else(|| FormError::MissingColumn {
                    form: form.name.clone(),
                    column: column.clone(),
                })?;
                Ok((column.clone(), value.to_owned()))
            })
            .collect::<Result<BTreeMap<_, _>, FormError>>()?;
        if let Some(field) = &form.datetime_field {
            values.insert(field.clone(), now.format(DATETIME_FORMAT).to_string());
        }
        Ok(FormRecord {
            form: form.name.clone(),
            values,
        })
    }
}
