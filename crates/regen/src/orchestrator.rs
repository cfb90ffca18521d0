use crate::{Outcome, Result, RunReport, ScaffoldTemplates, SnippetStore};
use httpgen_descriptor::{BuildOptions, EndpointProvider, SnippetBuilder, SnippetGroup};
use httpgen_reconcile::merge_bodies;
use httpgen_snippet::{parse, serialize, RouteKey, Snippet};
use std::collections::HashMap;

/// Carry user edits from `old` into freshly generated snippets.
///
/// Output order and structure follow `fresh`. Snippets are matched by route
/// key; when `old` repeats a key, its last occurrence is used.
#[must_use]
pub fn reconcile(fresh: Vec<Snippet>, old: &[Snippet]) -> Vec<Snippet> {
    let previous: HashMap<RouteKey, &Snippet> = old
        .iter()
        .map(|snippet| (snippet.route_key(), snippet))
        .collect();

    fresh
        .into_iter()
        .map(|mut snippet| {
            if let Some(prev) = previous.get(&snippet.route_key()) {
                carry_over(&mut snippet, prev);
            }
            snippet
        })
        .collect()
}

fn carry_over(snippet: &mut Snippet, prev: &Snippet) {
    for (name, value) in snippet.query.iter_mut() {
        if let Some(stored) = prev.query.get(name) {
            value.clone_from(stored);
        }
    }

    if snippet.method.carries_body() && prev.has_body() {
        snippet.body = merge_bodies(&snippet.body, &prev.body);
    }
}

/// Drives one regeneration run against a store
pub struct Regenerator<S> {
    store: S,
    scaffold: Option<ScaffoldTemplates>,
    dry_run: bool,
}

impl<S: SnippetStore> Regenerator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            scaffold: None,
            dry_run: false,
        }
    }

    /// Environment files to create before the snippet files
    #[must_use]
    pub fn with_scaffold(mut self, templates: ScaffoldTemplates) -> Self {
        self.scaffold = Some(templates);
        self
    }

    /// Compute outcomes without writing anything
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Pull descriptors from a provider and regenerate every group.
    ///
    /// Only a provider failure aborts the run; per-file problems land in the
    /// report.
    pub fn regenerate(
        &mut self,
        provider: &dyn EndpointProvider,
        options: &BuildOptions,
    ) -> Result<RunReport> {
        let manifest = provider.manifest()?;
        let groups = SnippetBuilder::new(&manifest, options).build_groups();
        Ok(self.run(&groups))
    }

    pub fn run(&mut self, groups: &[SnippetGroup]) -> RunReport {
        let mut report = RunReport::new(self.dry_run);

        if let Some(templates) = self.scaffold.take() {
            for (file_name, content) in templates.files() {
                let outcome = self
                    .ensure_file(file_name, content)
                    .unwrap_or_else(|err| Outcome::Failed {
                        reason: err.to_string(),
                    });
                report.record(file_name, outcome);
            }
            self.scaffold = Some(templates);
        }

        for group in groups {
            let outcome = self
                .regenerate_group(group)
                .unwrap_or_else(|err| Outcome::Failed {
                    reason: err.to_string(),
                });
            report.record(group.file_name(), outcome);
        }

        report
    }

    /// Regenerate one file, merging the stored version when present
    pub fn regenerate_group(&mut self, group: &SnippetGroup) -> Result<Outcome> {
        if group.snippets.is_empty() {
            log::debug!("{} has no endpoints; not writing a file", group.name);
            return Ok(Outcome::Skipped);
        }

        let file_name = group.file_name();
        let existing = self.store.load(&file_name)?;
        let old = match existing.as_deref().map(std::str::from_utf8) {
            None => Vec::new(),
            Some(Ok(text)) => parse(text),
            Some(Err(err)) => {
                log::warn!("{file_name} is not valid UTF-8 ({err}); regenerating from scratch");
                Vec::new()
            }
        };
        log::debug!(
            "{file_name}: {} fresh snippets, {} stored",
            group.snippets.len(),
            old.len()
        );

        let text = serialize(&reconcile(group.snippets.clone(), &old));

        let outcome = match existing {
            None => Outcome::Created,
            Some(bytes) if self.dry_run && bytes == text.as_bytes() => Outcome::Unchanged,
            Some(_) => Outcome::Updated,
        };

        if !self.dry_run {
            self.store.write(&file_name, &text)?;
        }
        Ok(outcome)
    }

    fn ensure_file(&mut self, file_name: &str, content: &str) -> Result<Outcome> {
        if self.store.exists(file_name)? {
            return Ok(Outcome::Skipped);
        }
        if !self.dry_run {
            self.store.write(file_name, content)?;
        }
        Ok(Outcome::Created)
    }
}
