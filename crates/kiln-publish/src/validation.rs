//! Pre-publish validation
//!
//! Provides [`Validator`], which runs a list of [`Rule`]s over a
//! [`PageState`] and groups the findings per failing rule.

use indexmap::IndexMap;
use kiln_reference::{component_label, Reference};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PublishError;

/// Page being published, with the data of every component on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    page: Reference,
    #[serde(default)]
    components: IndexMap<Reference, Value>,
}

impl PageState {
    /// State for a page with no components yet
    #[inline]
    #[must_use]
    pub fn new(page: Reference) -> Self {
        Self {
            page,
            components: IndexMap::new(),
        }
    }

    /// Add a component's data
    #[inline]
    #[must_use]
    pub fn with_component(mut self, reference: Reference, data: Value) -> Self {
        self.components.insert(reference, data);
        self
    }

    /// Parse an untyped payload `{ "page": ..., "components": { ref: data } }`
    ///
    /// # Errors
    /// Returns [`PublishError::Reference`] if `page` is not a string, or
    /// [`PublishError::InvalidState`] if the payload is not an object.
    pub fn from_value(value: &Value) -> Result<Self, PublishError> {
        let Value::Object(map) = value else {
            return Err(PublishError::InvalidState(format!(
                "expected an object, not {}",
                kiln_reference::json_type_name(value)
            )));
        };

        let page = Reference::from_value(map.get("page").unwrap_or(&Value::Null))?;
        let components = match map.get("components") {
            None | Some(Value::Null) => IndexMap::new(),
            Some(Value::Object(components)) => components
                .iter()
                .map(|(r, data)| (Reference::new(r.as_str()), data.clone()))
                .collect(),
            Some(other) => {
                return Err(PublishError::InvalidState(format!(
                    "components must be an object, not {}",
                    kiln_reference::json_type_name(other)
                )))
            }
        };

        Ok(Self { page, components })
    }

    /// Page reference
    #[inline]
    #[must_use]
    pub fn page(&self) -> &Reference {
        &self.page
    }

    /// Component references and data, in insertion order
    #[inline]
    pub fn components(&self) -> impl Iterator<Item = (&Reference, &Value)> {
        self.components.iter()
    }

    /// Data for one component
    #[inline]
    #[must_use]
    pub fn component(&self, reference: &Reference) -> Option<&Value> {
        self.components.get(reference)
    }

    /// Number of components
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the page has no components
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// A single problem found by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Component the problem was found in
    pub reference: Reference,
    /// Offending field, if the problem is field-specific
    pub field: Option<String>,
    /// Human-facing location, e.g. `Paragraph Text`
    pub location: String,
}

impl Finding {
    /// Finding located by the component's label
    #[must_use]
    pub fn new(reference: Reference, field: Option<String>) -> Self {
        let location = component_label(reference.as_str()).unwrap_or_else(|| reference.to_string());
        Self {
            reference,
            field,
            location,
        }
    }
}

/// All findings of one failing rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleViolation {
    /// Rule label
    pub label: String,
    /// Rule description
    pub description: String,
    /// Problems found
    pub findings: Vec<Finding>,
}

/// Validation rule run before publishing
pub trait Rule: Send + Sync {
    /// Short label shown as the error heading
    fn label(&self) -> &str;

    /// Longer explanation
    fn description(&self) -> &str;

    /// Problems found in the page state; empty when the rule passes
    fn validate(&self, state: &PageState) -> Vec<Finding>;
}

/// Runs rules in order and collects violations
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn Rule>>,
}

impl Validator {
    /// Validator with no rules
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule
    #[inline]
    #[must_use]
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// One violation per failing rule, in rule order
    #[must_use]
    pub fn validate(&self, state: &PageState) -> Vec<RuleViolation> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let findings = rule.validate(state);
                if findings.is_empty() {
                    return None;
                }
                tracing::debug!("rule '{}' found {} problem(s)", rule.label(), findings.len());
                Some(RuleViolation {
                    label: rule.label().to_string(),
                    description: rule.description().to_string(),
                    findings,
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules.iter().map(|r| r.label()).collect::<Vec<_>>())
            .finish()
    }
}

/// Requires fields to be filled in on given component types
///
/// A field is missing when it is absent, `null`, or an empty/blank string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredFields {
    fields: IndexMap<String, Vec<String>>,
}

impl RequiredFields {
    /// Rule with no requirements
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `fields` on every instance of component `name`
    #[must_use]
    pub fn require<I, S>(mut self, name: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .entry(name.to_string())
            .or_default()
            .extend(fields.into_iter().map(Into::into));
        self
    }

    fn is_missing(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }
}

impl Rule for RequiredFields {
    fn label(&self) -> &str {
        "Required Fields"
    }

    fn description(&self) -> &str {
        "Fill in required fields before publishing"
    }

    fn validate(&self, state: &PageState) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (reference, data) in state.components() {
            let Some(required) = reference.component_name().and_then(|name| self.fields.get(name))
            else {
                continue;
            };

            for field in required {
                if Self::is_missing(data.get(field)) {
                    findings.push(Finding::new(reference.clone(), Some(field.clone())));
                }
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn state() -> PageState {
        PageState::new(Reference::page("d.com", "p"))
            .with_component(
                Reference::instance("d.com", "paragraph", "a"),
                json!({ "text": "hello" }),
            )
            .with_component(
                Reference::instance("d.com", "paragraph", "b"),
                json!({ "text": "  " }),
            )
            .with_component(
                Reference::instance("d.com", "image-gallery", "c"),
                json!({ "caption": null }),
            )
    }

    #[test]
    fn required_fields_flags_blank_and_null() {
        let rule = RequiredFields::new()
            .require("paragraph", ["text"])
            .require("image-gallery", ["caption", "images"]);

        let findings = rule.validate(&state());

        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].reference.as_str(), "d.com/components/paragraph/instances/b");
        assert_eq!(findings[0].location, "Paragraph");
        assert_eq!(findings[1].field.as_deref(), Some("caption"));
        assert_eq!(findings[1].location, "Image Gallery");
        assert_eq!(findings[2].field.as_deref(), Some("images"));
    }

    #[test]
    fn validator_skips_passing_rules() {
        let validator = Validator::new()
            .with_rule(RequiredFields::new().require("paragraph", ["text"]))
            .with_rule(RequiredFields::new().require("video", ["url"]));

        let violations = validator.validate(&state());

        assert_eq!(validator.len(), 2);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].label, "Required Fields");
        assert_eq!(violations[0].findings.len(), 1);
    }

    #[test]
    fn empty_validator_passes() {
        assert!(Validator::new().validate(&state()).is_empty());
    }

    #[test]
    fn state_from_value() {
        let state = PageState::from_value(&json!({
            "page": "d.com/pages/p",
            "components": { "d.com/components/a/instances/1": { "x": 1 } }
        }))
        .unwrap();

        assert_eq!(state.page().as_str(), "d.com/pages/p");
        assert_eq!(state.len(), 1);
        assert_eq!(
            state.component(&Reference::new("d.com/components/a/instances/1")),
            Some(&json!({ "x": 1 }))
        );
    }

    #[test]
    fn state_from_value_rejects_non_string_page() {
        let err = PageState::from_value(&json!({ "page": 7 })).unwrap_err();
        assert!(err.to_string().ends_with("not number"), "{err}");

        let err = PageState::from_value(&json!({})).unwrap_err();
        assert!(err.to_string().ends_with("not null"), "{err}");

        let err = PageState::from_value(&json!([])).unwrap_err();
        assert!(matches!(err, PublishError::InvalidState(_)));
    }

    #[test]
    fn state_deserializes_through_reference_boundary() {
        let err = serde_json::from_value::<PageState>(json!({ "page": false })).unwrap_err();
        assert!(err.to_string().contains("not boolean"), "{err}");
    }
}
