use anyhow::{bail, Error};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use std::{
    fs,
    io::{self, ErrorKind},
    ops::Deref,
    path::Path,
};
use tracing::debug;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "Vec<T>", into = "Vec<T>")]
pub struct NonEmptyVec<T: Clone>(Vec<T>);

impl<T: Clone> NonEmptyVec<T> {
    pub fn new(t: T) -> Self {
        Self(vec![t])
    }

    pub fn maybe_new(v: Vec<T>) -> Option<Self> {
        Self::try_from(v).ok()
    }

    pub fn push(&mut self, t: T) {
        self.0.push(t)
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: Clone> TryFrom<Vec<T>> for NonEmptyVec<T> {
    type Error = Error;

    fn try_from(v: Vec<T>) -> Result<NonEmptyVec<T>, Error> {
        if v.is_empty() {
            bail!("cannot create a NonEmptyVec from an empty Vec")
        }
        Ok(NonEmptyVec(v))
    }
}

impl<T: Clone> From<NonEmptyVec<T>> for Vec<T> {
    fn from(NonEmptyVec(v): NonEmptyVec<T>) -> Vec<T> {
        v
    }
}

impl<T: Clone> AsRef<[T]> for NonEmptyVec<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T: Clone> Deref for NonEmptyVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

/// String utilities for parsing and displaying humanly readable values.
pub fn to_human_readable_string(value: impl Into<String>) -> String {
    value
        .into()
        .chars()
        .fold(String::new(), |mut acc, c| {
            // Convert camelCase to space-separated words with capitalized first letter.
            if c.is_uppercase() {
                acc.push(' ');
            }

            // Check if the field is snake_case and convert to
            // space-separated words with capitalized first letter.
            if c == '_' {
                acc.push(' ');
                return acc;
            }

            acc.push(c);
            acc
        })
        // Split the path based on empty spaces and uppercase the first letter of each word.
        .split(' ')
        .fold(String::new(), |desc, word| {
            let word = word
                .chars()
                .enumerate()
                .fold(String::new(), |mut acc, (i, c)| {
                    // Capitalize the first letter of the word.
                    if i == 0 {
                        if let Some(c) = c.to_uppercase().next() {
                            acc.push(c);
                            return acc;
                        }
                    }
                    acc.push(c);
                    acc
                });

            format!("{desc} {}", word.trim_end())
        })
        .trim()
        .to_string()
}

/// Errors raised while loading a JSON document from disk.
#[derive(Debug, thiserror::Error)]
pub enum JsonParseError {
    #[error("file not found: {filename}")]
    FileNotFound { filename: String },
    #[error("unable to read file: {0}")]
    DataInitialisation(#[source] io::Error),
    #[error("unable to deserialize JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),
    #[error("unable to map {value} to a JSON object")]
    MappingFail { value: Json },
}

/// Load a JSON object from the file at `path`.
pub fn json_object_from_file(path: impl AsRef<Path>) -> Result<Map<String, Json>, JsonParseError> {
    let path = path.as_ref();
    debug!("loading JSON object from {}", path.display());

    let data = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => JsonParseError::FileNotFound {
            filename: path.display().to_string(),
        },
        _ => JsonParseError::DataInitialisation(e),
    })?;

    match serde_json::from_slice(&data)? {
        Json::Object(object) => Ok(object),
        value => Err(JsonParseError::MappingFail { value }),
    }
}

/// Load the JSON object named `name` from `dir`, with the `.json` extension appended.
///
/// e.g., `json_object_from_local_file("tests/fixtures", "basic_example")` reads
/// `tests/fixtures/basic_example.json`.
pub fn json_object_from_local_file(
    dir: impl AsRef<Path>,
    name: &str,
) -> Result<Map<String, Json>, JsonParseError> {
    let path = dir.as_ref().join(format!("{name}.json"));
    if !path.is_file() {
        return Err(JsonParseError::FileNotFound {
            filename: name.to_owned(),
        });
    }
    json_object_from_file(path)
}
