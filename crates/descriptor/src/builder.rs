use crate::placeholder::{query_value, BodyGenerator, MemberNaming};
use crate::route::{combine_routes, controller_route, route_binds_parameter};
use crate::{ActionDescriptor, ApiManifest, Binding, ControllerDescriptor, ParameterDescriptor};
use httpgen_snippet::{HttpMethod, Snippet};
use indexmap::IndexMap;

pub const DEFAULT_HOST_VARIABLE: &str = "Api_HostAddress";

/// Knobs for turning descriptors into snippets
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Environment variable interpolated as `{{name}}` in front of every path
    pub host_variable: String,
    pub headers: IndexMap<String, String>,
    pub member_naming: MemberNaming,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            host_variable: DEFAULT_HOST_VARIABLE.to_string(),
            headers: default_headers(),
            member_naming: MemberNaming::default(),
        }
    }
}

#[must_use]
pub fn default_headers() -> IndexMap<String, String> {
    IndexMap::from([
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Authorization".to_string(), "bearer {{value}}".to_string()),
    ])
}

/// Fresh snippets for one persisted file
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetGroup {
    /// File stem: controller name without generic arity or `Controller` suffix
    pub name: String,
    pub snippets: Vec<Snippet>,
}

impl SnippetGroup {
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.http", self.name)
    }
}

pub struct SnippetBuilder<'a> {
    manifest: &'a ApiManifest,
    options: &'a BuildOptions,
    bodies: BodyGenerator<'a>,
}

impl<'a> SnippetBuilder<'a> {
    #[must_use]
    pub fn new(manifest: &'a ApiManifest, options: &'a BuildOptions) -> Self {
        Self {
            manifest,
            options,
            bodies: BodyGenerator::new(&manifest.types, options.member_naming),
        }
    }

    /// One group per file stem, in first-seen controller order.
    ///
    /// Controllers sharing a stem are concatenated.
    #[must_use]
    pub fn build_groups(&self) -> Vec<SnippetGroup> {
        let mut groups: IndexMap<String, Vec<Snippet>> = IndexMap::new();
        for controller in &self.manifest.controllers {
            let snippets = self.build_controller(controller);
            groups
                .entry(controller.short_name().to_string())
                .or_default()
                .extend(snippets);
        }
        groups
            .into_iter()
            .map(|(name, snippets)| SnippetGroup { name, snippets })
            .collect()
    }

    #[must_use]
    pub fn build_controller(&self, controller: &ControllerDescriptor) -> Vec<Snippet> {
        let base = controller_route(controller);
        controller
            .actions
            .iter()
            .map(|action| self.build_action(&base, action))
            .collect()
    }

    #[must_use]
    pub fn build_action(&self, base_route: &str, action: &ActionDescriptor) -> Snippet {
        let route = combine_routes(base_route, action.route.as_deref());
        let mut snippet = Snippet::new(
            action.method,
            format!("{{{{{}}}}}/{route}", self.options.host_variable),
        );
        snippet.headers = self.options.headers.clone();

        for parameter in &action.parameters {
            if resolve_binding(parameter, action.method, &route) == Some(Binding::Query) {
                snippet
                    .query
                    .insert(parameter.name.clone(), query_value(&parameter.name, &parameter.ty));
            }
        }

        if let Some(body) = action
            .parameters
            .iter()
            .find(|parameter| parameter.binding == Some(Binding::Body))
        {
            snippet.body = self.bodies.generate_text(&body.ty);
        }

        snippet
    }
}

/// Binding of a parameter, inferring one when the descriptor has none.
///
/// Route placeholders bind to the path; remaining GET and DELETE parameters
/// bind to the query string. Anything else is left unbound.
#[must_use]
pub fn resolve_binding(
    parameter: &ParameterDescriptor,
    method: HttpMethod,
    route: &str,
) -> Option<Binding> {
    if let Some(binding) = parameter.binding {
        return Some(binding);
    }
    if route_binds_parameter(route, &parameter.name) {
        return Some(Binding::Path);
    }
    matches!(method, HttpMethod::Get | HttpMethod::Delete).then_some(Binding::Query)
}
