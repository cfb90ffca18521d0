use crate::{DescriptorError, ObjectType, Result, TypeDescriptor};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const ZERO_GUID: &str = "00000000-0000-0000-0000-000000000000";
pub const DEFAULT_DATE_TIME: &str = "2024-01-01T00:00:00";
pub const DEFAULT_DATE: &str = "2024-01-01";
pub const STRING_PLACEHOLDER: &str = "stringValue";
pub const ENUM_PLACEHOLDER: &str = "EnumValue";

/// Deepest composite level generated before the recursion sentinel
pub const MAX_BODY_DEPTH: usize = 5;

/// How member names are rendered in generated bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberNaming {
    /// First letter lower-cased (`FirstName` → `firstName`)
    #[default]
    CamelCase,
    AsDeclared,
}

impl MemberNaming {
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            MemberNaming::AsDeclared => name.to_string(),
            MemberNaming::CamelCase => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

fn named_override(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "page" => Some("1"),
        "pagesize" => Some("25"),
        "sortcolumn" => Some("Id"),
        "sortorder" => Some("Descending"),
        _ => None,
    }
}

/// Literal placeholder for a scalar type
pub fn scalar_text(ty: &TypeDescriptor) -> Result<String> {
    let text = match ty {
        TypeDescriptor::Guid => ZERO_GUID,
        TypeDescriptor::String => STRING_PLACEHOLDER,
        TypeDescriptor::Bool => "false",
        TypeDescriptor::Enum { members } => {
            return Ok(members
                .first()
                .cloned()
                .unwrap_or_else(|| ENUM_PLACEHOLDER.to_string()))
        }
        TypeDescriptor::DateTime => DEFAULT_DATE_TIME,
        TypeDescriptor::Date => DEFAULT_DATE,
        TypeDescriptor::Integer | TypeDescriptor::Float | TypeDescriptor::Decimal => "0",
        TypeDescriptor::Array { .. } => return Err(DescriptorError::UnmappableType("array".into())),
        TypeDescriptor::Object { name } | TypeDescriptor::Other { name } => {
            return Err(DescriptorError::UnmappableType(name.clone()))
        }
    };
    Ok(text.to_string())
}

/// Placeholder for a query parameter. Well-known names win over the type.
#[must_use]
pub fn query_value(name: &str, ty: &TypeDescriptor) -> String {
    if let Some(value) = named_override(name) {
        return value.to_string();
    }
    scalar_text(ty).unwrap_or_else(|err| {
        log::warn!("Query parameter `{name}`: {err}; using \"{STRING_PLACEHOLDER}\"");
        STRING_PLACEHOLDER.to_string()
    })
}

/// Builds placeholder JSON documents for body parameters
pub struct BodyGenerator<'a> {
    types: &'a IndexMap<String, ObjectType>,
    naming: MemberNaming,
}

impl<'a> BodyGenerator<'a> {
    #[must_use]
    pub fn new(types: &'a IndexMap<String, ObjectType>, naming: MemberNaming) -> Self {
        Self { types, naming }
    }

    #[must_use]
    pub fn generate(&self, ty: &TypeDescriptor) -> Value {
        self.value_at(ty, 0)
    }

    /// Pretty-printed body text, newline-terminated
    #[must_use]
    pub fn generate_text(&self, ty: &TypeDescriptor) -> String {
        let value = self.generate(ty);
        let mut text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
        text.push('\n');
        text
    }

    fn value_at(&self, ty: &TypeDescriptor, depth: usize) -> Value {
        match ty {
            TypeDescriptor::Bool => Value::Bool(false),
            TypeDescriptor::Integer | TypeDescriptor::Float | TypeDescriptor::Decimal => json!(0),
            TypeDescriptor::Array { items } => {
                if depth > MAX_BODY_DEPTH {
                    return recursion_sentinel();
                }
                Value::Array(vec![self.value_at(items, depth + 1)])
            }
            TypeDescriptor::Object { name } => {
                if depth > MAX_BODY_DEPTH {
                    return recursion_sentinel();
                }
                match self.types.get(name) {
                    Some(object) => self.object_value(object, depth),
                    None => unmappable(&DescriptorError::UnmappableType(name.clone())),
                }
            }
            scalar => match scalar_text(scalar) {
                Ok(text) => Value::String(text),
                Err(err) => unmappable(&err),
            },
        }
    }

    fn object_value(&self, object: &ObjectType, depth: usize) -> Value {
        let mut fields = Map::new();
        for member in &object.members {
            fields.insert(
                self.naming.apply(&member.name),
                self.value_at(&member.ty, depth + 1),
            );
        }
        Value::Object(fields)
    }
}

fn recursion_sentinel() -> Value {
    json!({ "_recursiveLimit": true })
}

fn unmappable(err: &DescriptorError) -> Value {
    log::warn!("{err}; using \"{STRING_PLACEHOLDER}\"");
    Value::String(STRING_PLACEHOLDER.to_string())
}
