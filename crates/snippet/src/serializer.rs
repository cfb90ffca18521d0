use crate::parser::SNIPPET_MARKER;
use crate::Snippet;

/// Render snippets in `.http` format, one `###` block per snippet
#[must_use]
pub fn serialize(snippets: &[Snippet]) -> String {
    let mut out = String::new();
    for snippet in snippets {
        out.push_str(SNIPPET_MARKER);
        out.push('\n');
        out.push_str(&format!("{} {}\n", snippet.method, snippet.full_path()));

        for (name, value) in &snippet.headers {
            out.push_str(&format!("{name}: {value}\n"));
        }

        out.push('\n');
        if snippet.has_body() {
            out.push_str(&snippet.body);
            if !snippet.body.ends_with('\n') {
                out.push('\n');
            }
        }
        out.push('\n');
    }
    out
}
