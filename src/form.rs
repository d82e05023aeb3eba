//! Container and sink resolution.
//!
//! A [`Form`] is a small in-memory document: named containers holding an
//! ordered list of fields, plus named single-value sink fields. Groups
//! resolve their cells and sink against it by locator (`"#otp"` or `"otp"`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{OtpError, Result};
use crate::field::{FieldKind, InputField};
use crate::sink::SinkField;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub id: String,
    #[serde(default)]
    pub fields: Vec<FieldKind>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSpec {
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
    #[serde(default)]
    pub sinks: Vec<String>,
}

pub struct Form {
    containers: Vec<ContainerSpec>,
    sinks: HashMap<String, SinkField>,
}

fn locator_id(locator: &str) -> &str {
    locator.strip_prefix('#').unwrap_or(locator)
}

impl Form {
    pub fn new(spec: FormSpec) -> Self {
        let sinks = spec
            .sinks
            .into_iter()
            .map(|name| (name, SinkField::new()))
            .collect();
        Self {
            containers: spec.containers,
            sinks,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let spec: FormSpec =
            serde_json::from_str(json).map_err(|e| OtpError::Form(e.to_string()))?;
        Ok(Self::new(spec))
    }

    /// A form with one container of `cells` identical fields and an
    /// optional sink.
    pub fn single(id: &str, kind: FieldKind, cells: usize, sink: Option<&str>) -> Self {
        Self::new(FormSpec {
            containers: vec![ContainerSpec {
                id: id.to_string(),
                fields: vec![kind; cells],
            }],
            sinks: sink.map(|s| vec![s.to_string()]).unwrap_or_default(),
        })
    }

    /// Cell-like fields of the container, in document order. `None` when
    /// no container matches.
    pub fn resolve_cells(&self, locator: &str) -> Option<Vec<InputField>> {
        let id = locator_id(locator);
        let container = self.containers.iter().find(|c| c.id == id)?;
        Some(
            container
                .fields
                .iter()
                .copied()
                .filter(|kind| kind.is_cell())
                .map(InputField::new)
                .collect(),
        )
    }

    pub fn resolve_sink(&self, locator: &str) -> Option<SinkField> {
        self.sinks.get(locator_id(locator)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_cells_in_order_skipping_hidden() {
        let json = r#"{
            "containers": [
                {"id": "otp", "fields": ["text", "hidden", "number", "password"]}
            ],
            "sinks": ["code"]
        }"#;
        let form = Form::from_json(json).unwrap();
        let cells = form.resolve_cells("#otp").unwrap();
        let kinds: Vec<FieldKind> = cells.iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![FieldKind::Text, FieldKind::Number, FieldKind::Password]
        );
    }

    #[test]
    fn unknown_container_is_none() {
        let form = Form::single("otp", FieldKind::Text, 4, None);
        assert!(form.resolve_cells("#missing").is_none());
        assert!(form.resolve_sink("code").is_none());
    }

    #[test]
    fn sink_handles_share_value() {
        use crate::sink::Sink;

        let form = Form::single("otp", FieldKind::Text, 4, Some("code"));
        let mut handle = form.resolve_sink("#code").unwrap();
        handle.write("12  ");
        assert_eq!(form.resolve_sink("code").unwrap().value(), "12  ");
    }

    #[test]
    fn bad_json_is_form_error() {
        assert!(matches!(Form::from_json("{"), Err(OtpError::Form(_))));
    }
}
