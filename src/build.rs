//! A minimal local host for the extension.
//!
//! Runs the builder-inited hooks, then expands every registered directive
//! fence in the generated Markdown into rendered Markdown:
//!
//! ````text
//! ```{autodatamodel} geo.RockSample
//! ```
//! ````
//!
//! Fences naming unregistered directives (e.g. `toctree`) are copied through
//! untouched for the downstream site generator.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::directive::Directive;
use crate::error::DocsError;
use crate::extension::{BuilderInitedHook, HostApp, Rebuild};
use crate::writer::to_markdown;

/// Heading level of a directive's top section; listing pages own level 1.
const DIRECTIVE_HEADING_LEVEL: usize = 2;

const FENCE: &str = "```";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub documents: usize,
    pub directives: usize,
}

#[derive(Default)]
pub struct Builder {
    output_subdir: String,
    config_values: BTreeMap<String, (serde_json::Value, Rebuild)>,
    directives: HashMap<String, Arc<dyn Directive>>,
    hooks: Vec<BuilderInitedHook>,
}

impl Builder {
    pub fn new(output_subdir: impl Into<String>) -> Self {
        Self {
            output_subdir: output_subdir.into(),
            ..Default::default()
        }
    }

    pub fn config_value(&self, name: &str) -> Option<&serde_json::Value> {
        self.config_values.get(name).map(|(value, _)| value)
    }

    /// What a change to the named config value invalidates.
    pub fn config_rebuild(&self, name: &str) -> Option<Rebuild> {
        self.config_values.get(name).map(|(_, rebuild)| *rebuild)
    }

    pub fn directive(&self, name: &str) -> Option<&Arc<dyn Directive>> {
        self.directives.get(name)
    }

    /// Run every builder-inited hook against `srcdir`, in registration order.
    pub fn init(&self, srcdir: &Path) -> Result<(), DocsError> {
        for hook in &self.hooks {
            hook(srcdir)?;
        }
        Ok(())
    }

    /// Initialise, then expand the generated pages under `srcdir` into `outdir`.
    pub fn build(&self, srcdir: &Path, outdir: &Path) -> Result<BuildStats, DocsError> {
        self.init(srcdir)?;

        let source_dir = srcdir.join(&self.output_subdir);
        let target_dir = outdir.join(&self.output_subdir);
        fs::create_dir_all(&target_dir).map_err(|e| DocsError::io(&target_dir, e))?;

        let mut stats = BuildStats::default();
        for source in markdown_files(&source_dir)? {
            let content = fs::read_to_string(&source).map_err(|e| DocsError::io(&source, e))?;
            let (expanded, count) = self.expand(&content)?;

            let target = match source.file_name() {
                Some(name) => target_dir.join(name),
                None => continue,
            };
            fs::write(&target, expanded).map_err(|e| DocsError::io(&target, e))?;

            stats.documents += 1;
            stats.directives += count;
        }

        tracing::info!(
            "Built {} documents ({} directives) into {}",
            stats.documents,
            stats.directives,
            target_dir.display()
        );
        Ok(stats)
    }

    /// Replace registered directive fences in `content` with their rendered
    /// output. Returns the new text and the number of directives expanded.
    pub fn expand(&self, content: &str) -> Result<(String, usize), DocsError> {
        let mut output = String::with_capacity(content.len());
        let mut expanded = 0;
        let mut lines = content.lines();

        while let Some(line) = lines.next() {
            let Some((name, argument)) = parse_fence_open(line) else {
                output.push_str(line);
                output.push('\n');
                continue;
            };

            // Collect the fence body through its closing line.
            let mut block = vec![line];
            for body in lines.by_ref() {
                block.push(body);
                if body.trim() == FENCE {
                    break;
                }
            }

            let arguments: Vec<String> = argument.split_whitespace().map(String::from).collect();
            match self.directives.get(name) {
                Some(directive) if arguments.len() == directive.required_arguments() => {
                    let nodes = directive.run(&arguments)?;
                    output.push_str(&to_markdown(&nodes, DIRECTIVE_HEADING_LEVEL));
                    expanded += 1;
                }
                Some(directive) => {
                    tracing::warn!(
                        "Directive '{}' expects {} argument(s), got {}: leaving block as is",
                        name,
                        directive.required_arguments(),
                        arguments.len()
                    );
                    push_block(&mut output, &block);
                }
                None => {
                    tracing::debug!("No directive '{}' registered, copying block", name);
                    push_block(&mut output, &block);
                }
            }
        }

        Ok((output, expanded))
    }
}

impl HostApp for Builder {
    fn add_config_value(&mut self, name: &str, default: serde_json::Value, rebuild: Rebuild) {
        self.config_values
            .insert(name.to_string(), (default, rebuild));
    }

    fn add_directive(&mut self, name: &str, directive: Arc<dyn Directive>) {
        if self.directives.insert(name.to_string(), directive).is_some() {
            tracing::warn!("Directive '{}' registered twice, keeping the last", name);
        }
    }

    fn connect_builder_inited(&mut self, hook: BuilderInitedHook) {
        self.hooks.push(hook);
    }
}

/// Parse an opening fence of the form ```` ```{name} argument ````.
fn parse_fence_open(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix(FENCE)?.strip_prefix('{')?;
    let (name, argument) = rest.split_once('}')?;
    if name.is_empty() {
        return None;
    }
    Some((name.trim(), argument.trim()))
}

fn push_block(output: &mut String, block: &[&str]) {
    for line in block {
        output.push_str(line);
        output.push('\n');
    }
}

/// `*.md` files directly under `dir`, sorted by path.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, DocsError> {
    let entries = fs::read_dir(dir).map_err(|e| DocsError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DocsError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fence_open() {
        assert_eq!(
            parse_fence_open("```{autodatamodel} geo.RockSample"),
            Some(("autodatamodel", "geo.RockSample"))
        );
        assert_eq!(parse_fence_open("```{toctree}"), Some(("toctree", "")));
        assert_eq!(parse_fence_open("```rust"), None);
        assert_eq!(parse_fence_open("```{}"), None);
        assert_eq!(parse_fence_open("plain text"), None);
    }

    #[test]
    fn test_unregistered_fences_are_copied() {
        let builder = Builder::new("data_models");
        let content = "# Data Models\n\n```{toctree}\n:maxdepth: 2\n\nsamples\n```\n";
        let (expanded, count) = builder.expand(content).unwrap();
        assert_eq!(expanded, content);
        assert_eq!(count, 0);
    }
}
