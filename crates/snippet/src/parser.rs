use crate::{HttpMethod, Result, Snippet};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::ErrorKind;
use std::path::Path;

/// Line prefix that opens a new request block
pub const SNIPPET_MARKER: &str = "###";

static REQUEST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(GET|POST|PUT|DELETE|PATCH)\s+(\S.*?)(?:\s+HTTP/\d+(?:\.\d+)?)?\s*$")
        .expect("request line regex")
});

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Headers,
    Body,
}

struct OpenSnippet {
    snippet: Snippet,
    mode: Mode,
    body_lines: Vec<String>,
}

impl OpenSnippet {
    fn finish(mut self) -> Snippet {
        while self
            .body_lines
            .last()
            .is_some_and(|line| line.trim().is_empty())
        {
            self.body_lines.pop();
        }
        let mut body = String::new();
        for line in &self.body_lines {
            body.push_str(line);
            body.push('\n');
        }
        self.snippet.body = body;
        self.snippet
    }
}

/// Parse `.http` text into snippets, in file order.
///
/// Parsing never fails: lines outside a request block and header lines
/// without a usable colon are skipped.
#[must_use]
pub fn parse(text: &str) -> Vec<Snippet> {
    let mut snippets = Vec::new();
    let mut current: Option<OpenSnippet> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim_end_matches('\r');

        // Markers sit at column 0; indented `###` belongs to the body.
        if line.starts_with(SNIPPET_MARKER) {
            if let Some(open) = current.take() {
                snippets.push(open.finish());
            }
            continue;
        }

        let Some(open) = current.as_mut() else {
            current = parse_request_line(line).map(|snippet| OpenSnippet {
                snippet,
                mode: Mode::Headers,
                body_lines: Vec::new(),
            });
            continue;
        };

        match open.mode {
            Mode::Headers if line.trim().is_empty() => open.mode = Mode::Body,
            Mode::Headers => {
                if let Some((name, value)) = line.split_once(':') {
                    let name = name.trim();
                    if !name.is_empty() {
                        open.snippet
                            .headers
                            .insert(name.to_string(), value.trim().to_string());
                        continue;
                    }
                }
                log::debug!("Skipping malformed header line: {line}");
            }
            Mode::Body => open.body_lines.push(line.to_string()),
        }
    }

    if let Some(open) = current {
        snippets.push(open.finish());
    }

    snippets
}

fn parse_request_line(line: &str) -> Option<Snippet> {
    let captures = REQUEST_LINE.captures(line)?;
    let method: HttpMethod = captures[1].parse().ok()?;
    Some(Snippet::new(method, &captures[2]))
}

/// Read and parse a snippet file.
///
/// A missing file means there is no prior state and yields an empty list, as
/// does a file that is not valid UTF-8.
pub fn parse_file(path: &Path) -> Result<Vec<Snippet>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    match String::from_utf8(bytes) {
        Ok(text) => Ok(parse(&text)),
        Err(err) => {
            log::warn!("Ignoring unreadable snippet file {}: {err}", path.display());
            Ok(Vec::new())
        }
    }
}
