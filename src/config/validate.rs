//! Shape-level validation of untrusted config candidates.
//!
//! The gate is shallow: it checks that the aggregate, its settings and every slide
//! carry the required keys. Whether `content` matches the declared `type`, or whether colors are
//! well-formed, is not checked here; generation renders such gaps as omitted content.

use std::fmt;

use serde_json::Value;

use crate::config::edit::Project;
use crate::config::model::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One step of a JSON path.
pub enum SchemaPathElem {
    /// Object key.
    Field(&'static str),
    /// Array position.
    Index(usize),
}

#[derive(Debug, Clone)]
/// A single shape violation.
pub struct SchemaError {
    /// Location of the violation, from the root.
    pub path: Vec<SchemaPathElem>,
    /// What is wrong at `path`.
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
/// Every violation found in one candidate, in document order.
pub struct SchemaErrors {
    /// Collected violations.
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

const GENERAL_REQUIRED: [&str; 3] = ["theme", "timing", "fonts"];
const SLIDE_REQUIRED: [&str; 5] = ["id", "type", "content", "timing", "background"];

/// Return `true` iff `candidate` has the shape of a config.
pub fn validate(candidate: &Value) -> bool {
    validate_report(candidate).is_ok()
}

/// Like [`validate`], but report every violation with its path.
pub fn validate_report(candidate: &Value) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();

    let Some(root) = candidate.as_object() else {
        errors.push(SchemaError::at(&[], "config must be an object"));
        return Err(SchemaErrors { errors });
    };

    match root.get("general").filter(|v| is_present(v)) {
        None => errors.push(SchemaError::at(
            &[SchemaPathElem::Field("general")],
            "missing required field",
        )),
        Some(general) => {
            let path = [SchemaPathElem::Field("general")];
            for key in GENERAL_REQUIRED {
                if !general.get(key).is_some_and(is_present) {
                    errors.push(SchemaError::at(
                        &[path[0].clone(), SchemaPathElem::Field(key)],
                        "missing required field",
                    ));
                }
            }
        }
    }

    match root.get("slides") {
        None | Some(Value::Null) => errors.push(SchemaError::at(
            &[SchemaPathElem::Field("slides")],
            "missing required field",
        )),
        Some(Value::Array(slides)) => {
            for (i, slide) in slides.iter().enumerate() {
                let path = [SchemaPathElem::Field("slides"), SchemaPathElem::Index(i)];
                if !slide.is_object() {
                    errors.push(SchemaError::at(&path, "slide must be an object"));
                    continue;
                }
                for key in SLIDE_REQUIRED {
                    if !slide.get(key).is_some_and(is_present) {
                        errors.push(SchemaError::at(
                            &[path[0].clone(), path[1].clone(), SchemaPathElem::Field(key)],
                            "missing required field",
                        ));
                    }
                }
            }
        }
        Some(_) => errors.push(SchemaError::at(
            &[SchemaPathElem::Field("slides")],
            "slides must be an array",
        )),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

// null, false, 0 and "" count as absent; empty arrays and objects count as present.
fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Turn an untrusted candidate into a config, or reset to the empty project's config.
///
/// A candidate that fails the shape gate yields [`Project::empty`]'s config, as does one with an
/// unknown slide `type`. Fields of the wrong JSON type inside a well-shaped candidate decode as
/// their defaults and render as omitted content.
pub fn load_config(candidate: &Value) -> Config {
    if let Err(errors) = validate_report(candidate) {
        tracing::warn!(
            violations = errors.errors.len(),
            first = %errors.errors[0],
            "config failed shape validation; resetting to empty project"
        );
        return Project::empty().reels_config;
    }
    match Config::deserialize_value(candidate) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "config did not decode; resetting to empty project");
            Project::empty().reels_config
        }
    }
}

/// [`load_config`] wrapped into a project with an empty asset table.
pub fn load_project(candidate: &Value) -> Project {
    Project::from_config(load_config(candidate))
}

impl Config {
    fn deserialize_value(v: &Value) -> serde_json::Result<Self> {
        serde::Deserialize::deserialize(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/validate.rs"]
mod tests;
