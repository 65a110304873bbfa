//! Validation rules for dinosaur payloads.
//!
//! Create and update payloads arrive as untyped JSON. The validators here
//! turn them into typed values ([`NewDinosaur`], [`DinosaurUpdate`]) or fail
//! with [`CoreError::Validation`] describing the first violated constraint,
//! checked in field order `id`, `name`, `image`, `power`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::types::DbId;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const IMAGE_MAX_LEN: usize = 50;
pub const POWER_MIN_LEN: usize = 4;
pub const POWER_MAX_LEN: usize = 50;

/// Largest id an update payload may target.
pub const MAX_UPDATE_ID: DbId = 100;

/// Schemes accepted for `image`; the URL must also carry a host.
const IMAGE_URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Message returned for a malformed `:id` path parameter.
pub const INVALID_ID_PARAM: &str = "Invalid param type";

// ---------------------------------------------------------------------------
// Column allow-list
// ---------------------------------------------------------------------------

/// The mutable columns of the `dinosaur` table.
///
/// Update statements only ever name columns through this enum, so client
/// keys can never reach SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DinosaurColumn {
    Name,
    Image,
    Power,
}

impl DinosaurColumn {
    pub const ALL: [DinosaurColumn; 3] = [Self::Name, Self::Image, Self::Power];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Image => "image",
            Self::Power => "power",
        }
    }

    /// Look up a column by its JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }

    fn min_len(self) -> Option<usize> {
        match self {
            Self::Name => Some(NAME_MIN_LEN),
            Self::Image => None,
            Self::Power => Some(POWER_MIN_LEN),
        }
    }

    fn max_len(self) -> usize {
        match self {
            Self::Name => NAME_MAX_LEN,
            Self::Image => IMAGE_MAX_LEN,
            Self::Power => POWER_MAX_LEN,
        }
    }

    /// Human-readable text for a failed `validator` rule on this column.
    fn describe(self, code: &str, value: &str) -> String {
        let key = self.as_str();
        match code {
            "url" => format!("{key} must be a valid URL"),
            "length" => match self.min_len() {
                Some(min) if value.chars().count() < min => {
                    format!("{key} must be at least {min} characters")
                }
                _ => format!("{key} must be at most {} characters", self.max_len()),
            },
            _ => format!("{key} is invalid"),
        }
    }
}

// ---------------------------------------------------------------------------
// Validated payloads
// ---------------------------------------------------------------------------

/// A dinosaur ready to insert; `id` is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDinosaur {
    pub name: String,
    pub image: String,
    pub power: String,
}

/// A partial update of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DinosaurUpdate {
    pub id: DbId,
    /// Never empty once produced by [`validate_update`].
    pub changes: BTreeMap<DinosaurColumn, String>,
}

/// Field rules shared by create and update. Absent fields are skipped.
#[derive(Debug, Validate)]
struct DinosaurFields {
    #[validate(range(max = 100))]
    id: Option<DbId>,
    #[validate(length(min = 3, max = 100))]
    name: Option<String>,
    #[validate(custom(function = "validate_image_url"), length(max = 50))]
    image: Option<String>,
    #[validate(length(min = 4, max = 50))]
    power: Option<String>,
}

impl DinosaurFields {
    fn read(object: &Map<String, Value>) -> Result<Self, CoreError> {
        Ok(Self {
            id: None,
            name: read_string(object, DinosaurColumn::Name)?.map(|s| s.trim().to_string()),
            image: read_string(object, DinosaurColumn::Image)?,
            power: read_string(object, DinosaurColumn::Power)?,
        })
    }

    fn get(&self, column: DinosaurColumn) -> Option<&str> {
        match column {
            DinosaurColumn::Name => self.name.as_deref(),
            DinosaurColumn::Image => self.image.as_deref(),
            DinosaurColumn::Power => self.power.as_deref(),
        }
    }

    fn take(&mut self, column: DinosaurColumn) -> Option<String> {
        match column {
            DinosaurColumn::Name => self.name.take(),
            DinosaurColumn::Image => self.image.take(),
            DinosaurColumn::Power => self.power.take(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate a create payload.
///
/// `name`, `image` and `power` are required; keys outside those three are
/// ignored. The returned `name` is trimmed.
pub fn validate_create(payload: &Value) -> Result<NewDinosaur, CoreError> {
    let object = as_object(payload)?;
    let mut fields = DinosaurFields::read(object)?;
    let errors = fields.validate().err();

    for column in DinosaurColumn::ALL {
        check_column(column, &fields, errors.as_ref(), true)?;
    }

    let mut required = |column: DinosaurColumn| {
        fields
            .take(column)
            .ok_or_else(|| required_error(column.as_str()))
    };

    Ok(NewDinosaur {
        name: required(DinosaurColumn::Name)?,
        image: required(DinosaurColumn::Image)?,
        power: required(DinosaurColumn::Power)?,
    })
}

/// Validate an update payload.
///
/// `id` is required and must not exceed [`MAX_UPDATE_ID`]. Every other key
/// must name a mutable column, and each present column must satisfy the
/// same rules as on create. At least one column must be present.
pub fn validate_update(payload: &Value) -> Result<DinosaurUpdate, CoreError> {
    let object = as_object(payload)?;

    if let Some(key) = object
        .keys()
        .find(|k| k.as_str() != "id" && DinosaurColumn::from_key(k).is_none())
    {
        return Err(CoreError::Validation(format!(
            "{key} is not an updatable field"
        )));
    }

    let mut fields = DinosaurFields::read(object)?;
    let id = read_id(object)?.ok_or_else(|| required_error("id"))?;
    fields.id = Some(id);

    let errors = fields.validate().err();
    if let Some(errors) = &errors {
        if errors.field_errors().contains_key("id") {
            return Err(CoreError::Validation(format!(
                "id must be less than or equal to {MAX_UPDATE_ID}"
            )));
        }
    }

    for column in DinosaurColumn::ALL {
        check_column(column, &fields, errors.as_ref(), false)?;
    }

    let changes: BTreeMap<_, _> = DinosaurColumn::ALL
        .into_iter()
        .filter_map(|column| fields.take(column).map(|value| (column, value)))
        .collect();

    if changes.is_empty() {
        return Err(CoreError::Validation("No fields to update".to_string()));
    }

    Ok(DinosaurUpdate { id, changes })
}

/// Parse the `:id` path segment.
///
/// Only a non-empty run of ASCII digits that fits in a [`DbId`] is accepted.
pub fn parse_id_param(raw: &str) -> Result<DbId, CoreError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::MalformedRequest(INVALID_ID_PARAM.to_string()));
    }
    raw.parse::<DbId>()
        .map_err(|_| CoreError::MalformedRequest(INVALID_ID_PARAM.to_string()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn as_object(payload: &Value) -> Result<&Map<String, Value>, CoreError> {
    payload
        .as_object()
        .ok_or_else(|| CoreError::Validation("Payload must be a JSON object".to_string()))
}

fn required_error(key: &str) -> CoreError {
    CoreError::Validation(format!("{key} is a required field"))
}

/// Read a string column; JSON `null` counts as absent.
fn read_string(
    object: &Map<String, Value>,
    column: DinosaurColumn,
) -> Result<Option<String>, CoreError> {
    match object.get(column.as_str()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(CoreError::Validation(format!(
            "{} must be a string",
            column.as_str()
        ))),
    }
}

/// Read `id`, accepting an integer or a numeric string.
fn read_id(object: &Map<String, Value>) -> Result<Option<DbId>, CoreError> {
    match object.get("id") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| CoreError::Validation("id must be an integer".to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse::<DbId>()
            .map(Some)
            .map_err(|_| CoreError::Validation("id must be a number".to_string())),
        Some(_) => Err(CoreError::Validation("id must be a number".to_string())),
    }
}

/// `image` must be an absolute http(s) or ftp URL with a host.
fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    match url::Url::parse(value) {
        Ok(parsed)
            if IMAGE_URL_SCHEMES.contains(&parsed.scheme())
                && parsed.host_str().is_some_and(|h| !h.is_empty()) =>
        {
            Ok(())
        }
        _ => Err(ValidationError::new("url")),
    }
}

fn check_column(
    column: DinosaurColumn,
    fields: &DinosaurFields,
    errors: Option<&ValidationErrors>,
    required: bool,
) -> Result<(), CoreError> {
    let value = match fields.get(column) {
        Some(v) if !(required && v.is_empty()) => v,
        _ if required => return Err(required_error(column.as_str())),
        _ => return Ok(()),
    };

    let Some(errors) = errors else {
        return Ok(());
    };
    let field_errors = errors.field_errors();
    match field_errors.get(column.as_str()).and_then(|errs| errs.first()) {
        Some(first) => Err(CoreError::Validation(
            column.describe(&first.code, value),
        )),
        None => Ok(()),
    }
}
