use crate::ControllerDescriptor;
use once_cell::sync::Lazy;
use regex::Regex;

static CONTROLLER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[controller\]").expect("controller token regex"));

static OPTIONAL_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}?]+)\?\}").expect("optional segment regex"));

static ROUTE_PARAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\*{0,2}([A-Za-z_][A-Za-z0-9_]*)[^{}]*\}").expect("route parameter regex")
});

/// Controller route with `[controller]` substituted.
///
/// Without a template the route is the lower-cased short name.
#[must_use]
pub fn controller_route(controller: &ControllerDescriptor) -> String {
    let short = controller.short_name().to_lowercase();
    match controller
        .route
        .as_deref()
        .map(str::trim)
        .filter(|route| !route.is_empty())
    {
        Some(template) => CONTROLLER_TOKEN
            .replace_all(template.trim_start_matches('/'), short.as_str())
            .into_owned(),
        None => short,
    }
}

/// Append an action route to a controller route
#[must_use]
pub fn combine_routes(base: &str, action: Option<&str>) -> String {
    let action = action.map(|route| route.trim_matches('/')).unwrap_or("");
    let combined = match (base.is_empty(), action.is_empty()) {
        (_, true) => base.to_string(),
        (true, false) => action.to_string(),
        (false, false) if base.ends_with('/') => format!("{base}{action}"),
        (false, false) => format!("{base}/{action}"),
    };
    // `{id?}` would otherwise be read back as a query string.
    OPTIONAL_SEGMENT.replace_all(&combined, "{$1}").into_owned()
}

/// Whether a route template binds a parameter with this name
#[must_use]
pub fn route_binds_parameter(route: &str, name: &str) -> bool {
    ROUTE_PARAMETER
        .captures_iter(route)
        .any(|caps| caps[1].eq_ignore_ascii_case(name))
}
