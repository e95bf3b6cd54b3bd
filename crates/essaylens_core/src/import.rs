//! Raw import bundle decoding.
//!
//! # Responsibility
//! - Decode the JSON document teachers import (knowledge list, student
//!   works, model works).
//! - Tolerate missing keys and `null` strings the way hand-edited exports
//!   need.
//!
//! # Invariants
//! - Decoding never parses essay or feedback text; that happens lazily in
//!   [`crate::workspace::WorkCache`].
//! - Absent or `null` text decodes as an empty string.

use log::info;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Import error for file access and JSON decoding.
#[derive(Debug)]
pub enum ImportError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidJson(serde_json::Error),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read import file `{}`: {source}", path.display())
            }
            Self::InvalidJson(err) => write!(f, "invalid import document: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidJson(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

/// One student's submission: essay text plus raw rubric feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentWork {
    #[serde(deserialize_with = "nullable_string")]
    pub essay: String,
    #[serde(deserialize_with = "nullable_string")]
    pub feedbacks: String,
}

impl StudentWork {
    pub fn new(essay: impl Into<String>, feedbacks: impl Into<String>) -> Self {
        Self {
            essay: essay.into(),
            feedbacks: feedbacks.into(),
        }
    }
}

/// Exemplary essay used as a structural reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelWork {
    #[serde(deserialize_with = "nullable_string")]
    pub essay: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportBundle {
    /// Checklist criteria, in C1..Cn order.
    #[serde(deserialize_with = "nullable_strings")]
    pub knowledge_list: Vec<String>,
    pub student_works: Vec<StudentWork>,
    pub model_works: Vec<ModelWork>,
}

impl ImportBundle {
    pub fn from_json_str(input: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Reads and decodes an import file.
pub fn load_import_file(path: impl AsRef<Path>) -> Result<ImportBundle, ImportError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bundle = ImportBundle::from_json_str(&raw)?;
    info!(
        "event=import_loaded module=import status=ok works={} checklist_items={} model_works={}",
        bundle.student_works.len(),
        bundle.knowledge_list.len(),
        bundle.model_works.len()
    );
    Ok(bundle)
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values.into_iter().map(Option::unwrap_or_default).collect())
}

#[cfg(test)]
mod tests {
    use super::{ImportBundle, ImportError};

    #[test]
    fn decodes_camel_case_bundle_with_nulls() {
        let bundle = ImportBundle::from_json_str(
            r#"{
                "knowledgeList": ["Defines externality", null],
                "studentWorks": [{"essay": "One. Two.", "feedbacks": null}, {}],
                "modelWorks": [{"essay": "Model."}]
            }"#,
        )
        .expect("bundle should decode");

        assert_eq!(bundle.knowledge_list, vec!["Defines externality", ""]);
        assert_eq!(bundle.student_works.len(), 2);
        assert_eq!(bundle.student_works[0].feedbacks, "");
        assert_eq!(bundle.student_works[1].essay, "");
        assert_eq!(bundle.model_works[0].essay, "Model.");
    }

    #[test]
    fn empty_object_is_an_empty_bundle() {
        let bundle = ImportBundle::from_json_str("{}").expect("empty bundle should decode");
        assert_eq!(bundle, ImportBundle::default());
    }

    #[test]
    fn rejects_non_object_documents() {
        let err = ImportBundle::from_json_str(r#""just text""#)
            .expect_err("string is not a bundle");
        assert!(matches!(err, ImportError::InvalidJson(_)));
    }
}
