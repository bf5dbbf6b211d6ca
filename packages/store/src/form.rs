//! # Form controller: field state, validation and submission
//!
//! A [`FormController`] owns the text values of one entity form, the set of
//! touched fields, the current error messages and the optional editing
//! target. Validation is driven by a [`Schema`] of [`FieldRule`]s:
//!
//! | Rule | Failure message comes from |
//! |------|----------------------------|
//! | required (trimmed value non-empty) | [`FieldRule::required`] |
//! | [`Format::Email`] | [`FieldRule::format`] |
//!
//! When validation re-runs is governed by [`ValidationMode`]. After the first
//! submit attempt every change re-validates its field regardless of mode, so
//! inline errors clear as soon as the user fixes them.
//!
//! [`FormController::submit`] never touches a store: it only yields a
//! [`Submission`] (target id + draft) or the map of field errors. Callers hand
//! the submission to the mutator.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// Field name → raw text value.
pub type FieldValues = BTreeMap<String, String>;

/// Field name → human-readable error message.
pub type FieldErrors = BTreeMap<String, String>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// String shape constraints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
}

impl Format {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Format::Email => EMAIL_RE.is_match(value),
        }
    }
}

/// Validation rule for a single field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    /// Placeholder / label shown next to the input.
    pub label: &'static str,
    pub required: Option<&'static str>,
    pub format: Option<(Format, &'static str)>,
}

impl FieldRule {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: None,
            format: None,
        }
    }

    pub fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    pub fn format(mut self, format: Format, message: &'static str) -> Self {
        self.format = Some((format, message));
        self
    }

    /// First failing constraint's message, if any.
    pub fn check(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return self.required.map(str::to_string);
        }
        match self.format {
            Some((format, message)) if !format.accepts(value) => Some(message.to_string()),
            _ => None,
        }
    }
}

/// Ordered set of field rules; order is the form's display order.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self { fields }
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|r| r.name == name)
    }

    /// Validate a single field. Unknown fields are always valid.
    pub fn validate_field(&self, name: &str, value: &str) -> Option<String> {
        self.rule(name)?.check(value)
    }

    /// Validate every field of the schema against `values`.
    pub fn validate(&self, values: &FieldValues) -> Result<(), FieldErrors> {
        let errors: FieldErrors = self
            .fields
            .iter()
            .filter_map(|rule| {
                let value = values.get(rule.name).map(String::as_str).unwrap_or("");
                rule.check(value).map(|msg| (rule.name.to_string(), msg))
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Empty value for every field.
    pub fn blank(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|r| (r.name.to_string(), String::new()))
            .collect()
    }
}

/// When field validation re-runs before the first submit attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    #[default]
    OnChange,
    OnBlur,
}

/// A validated form, ready for the mutator.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission<E: Entity> {
    /// `Some` when editing an existing entity, `None` in create mode.
    pub target: Option<EntityId>,
    pub draft: E::Draft,
}

/// State of one entity form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormController<E: Entity> {
    schema: Schema,
    mode: ValidationMode,
    values: FieldValues,
    touched: BTreeSet<String>,
    errors: FieldErrors,
    editing: Option<E>,
    submitted: bool,
}

impl<E: Entity> FormController<E> {
    pub fn new(mode: ValidationMode) -> Self {
        let schema = E::schema();
        Self {
            values: schema.blank(),
            schema,
            mode,
            touched: BTreeSet::new(),
            errors: FieldErrors::new(),
            editing: None,
            submitted: false,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Reset to an empty create form.
    pub fn open_create(&mut self) {
        self.reset_with(self.schema.blank());
        self.editing = None;
    }

    /// Pre-fill from `entity` and make it the editing target.
    pub fn open_edit(&mut self, entity: &E) {
        let mut values = self.schema.blank();
        values.extend(entity.to_fields());
        self.reset_with(values);
        self.editing = Some(entity.clone());
    }

    /// Drop the editing target and clear all field state.
    pub fn cancel(&mut self) {
        self.open_create();
    }

    fn reset_with(&mut self, values: FieldValues) {
        self.values = values;
        self.touched.clear();
        self.errors.clear();
        self.submitted = false;
    }

    pub fn editing(&self) -> Option<&E> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Record a change to `name`, re-validating it when the mode asks for it.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
        let revalidate = self.submitted
            || match self.mode {
                ValidationMode::OnChange => true,
                ValidationMode::OnBlur => self.touched.contains(name),
            };
        if revalidate {
            self.revalidate(name);
        }
    }

    /// Mark `name` touched and validate it.
    pub fn blur(&mut self, name: &str) {
        self.touched.insert(name.to_string());
        self.revalidate(name);
    }

    fn revalidate(&mut self, name: &str) {
        match self.schema.validate_field(name, self.value(name)) {
            Some(msg) => {
                self.errors.insert(name.to_string(), msg);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    /// Validate everything. On success returns the draft and the editing
    /// target; on failure the errors are kept for inline display.
    pub fn submit(&mut self) -> Result<Submission<E>, FieldErrors> {
        self.submitted = true;
        match self.schema.validate(&self.values) {
            Ok(()) => {
                self.errors.clear();
                let trimmed: FieldValues = self
                    .values
                    .iter()
                    .map(|(k, v)| (k.clone(), v.trim().to_string()))
                    .collect();
                Ok(Submission {
                    target: self.editing.as_ref().map(|e| e.id().clone()),
                    draft: E::draft_from_fields(&trimmed),
                })
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
