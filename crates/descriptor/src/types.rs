use httpgen_snippet::HttpMethod;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const CONTROLLER_SUFFIX: &str = "Controller";

/// Everything a host reports about its API surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiManifest {
    #[serde(default)]
    pub controllers: Vec<ControllerDescriptor>,

    /// Composite types referenced by `object` type descriptors
    #[serde(default)]
    pub types: IndexMap<String, ObjectType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerDescriptor {
    /// Declared name, e.g. `CustomerController` or ``Repository`1``
    pub name: String,

    /// Route template, may contain `[controller]`
    #[serde(default)]
    pub route: Option<String>,

    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
}

impl ControllerDescriptor {
    /// Name without a generic arity suffix (`` Repository`1 `` → `Repository`)
    #[must_use]
    pub fn clean_name(&self) -> &str {
        match self.name.find('`') {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }

    /// Clean name without the trailing `Controller` convention suffix
    #[must_use]
    pub fn short_name(&self) -> &str {
        let name = self.clean_name();
        let cut = name.len().saturating_sub(CONTROLLER_SUFFIX.len());
        match name.get(cut..) {
            Some(suffix) if cut > 0 && suffix.eq_ignore_ascii_case(CONTROLLER_SUFFIX) => {
                &name[..cut]
            }
            _ => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub method: HttpMethod,

    /// Action route template appended to the controller route
    #[serde(default)]
    pub route: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,

    /// Explicit binding source. Inferred from the route and verb when absent.
    #[serde(default)]
    pub binding: Option<Binding>,

    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    Path,
    Body,
    Query,
}

/// Semantic type of a parameter or member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    #[serde(alias = "uuid")]
    Guid,
    String,
    Bool,
    Integer,
    #[serde(alias = "number")]
    Float,
    Decimal,
    DateTime,
    Date,
    Enum {
        #[serde(default)]
        members: Vec<String>,
    },
    Array {
        items: Box<TypeDescriptor>,
    },
    /// Reference into [`ApiManifest::types`]
    Object {
        name: String,
    },
    /// A host type with no placeholder rule
    Other {
        name: String,
    },
}

impl TypeDescriptor {
    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        Self::Object { name: name.into() }
    }

    #[must_use]
    pub fn array(items: TypeDescriptor) -> Self {
        Self::Array {
            items: Box::new(items),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}
