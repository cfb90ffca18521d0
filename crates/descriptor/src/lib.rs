//! # httpgen Descriptor
//!
//! Host-neutral description of an API surface and the rules that turn it into
//! request templates with placeholder values.
//!
//! ## Pipeline
//!
//! ```text
//! EndpointProvider (manifest file, in-memory, ...)
//!     │
//!     └──> ApiManifest
//!            ├─ ControllerDescriptor → route template
//!            ├─ ActionDescriptor     → method + action route
//!            └─ ParameterDescriptor  → path / query / body binding
//!                   │
//!                   └──> SnippetBuilder → SnippetGroup per file
//! ```

mod builder;
mod error;
mod placeholder;
mod provider;
mod route;
mod types;

pub use builder::{
    default_headers, resolve_binding, BuildOptions, SnippetBuilder, SnippetGroup,
    DEFAULT_HOST_VARIABLE,
};
pub use error::{DescriptorError, Result};
pub use placeholder::{
    query_value, scalar_text, BodyGenerator, MemberNaming, DEFAULT_DATE, DEFAULT_DATE_TIME,
    ENUM_PLACEHOLDER, MAX_BODY_DEPTH, STRING_PLACEHOLDER, ZERO_GUID,
};
pub use provider::{EndpointProvider, ManifestFormat, ManifestProvider, StaticProvider};
pub use route::{combine_routes, controller_route, route_binds_parameter};
pub use types::{
    ActionDescriptor, ApiManifest, Binding, ControllerDescriptor, MemberDescriptor, ObjectType,
    ParameterDescriptor, TypeDescriptor,
};
