//! The `autodatamodel` directive: renders one model's declared fields.

use std::sync::Arc;

use crate::config::FieldLayout;
use crate::doctree::{Inline, Node, Table};
use crate::error::{DocsError, PathError};
use crate::models::*;
use crate::ordering::ordered_fields;
use crate::text::{make_id, title_case};

/// Name the directive is registered and invoked under.
pub const DIRECTIVE_NAME: &str = "autodatamodel";

const FIELDS_TITLE: &str = "Declared Fields";
const FIELDS_INTRO: &str = "The following fields are declared in this data model.";

/// A block directive the host build tool can invoke.
pub trait Directive: Send + Sync {
    fn required_arguments(&self) -> usize {
        1
    }

    fn run(&self, arguments: &[String]) -> Result<Vec<Node>, DocsError>;
}

/// Renders a model's metadata and declared fields.
///
/// Each invocation is independent: it reads the shared registry and lookup
/// and builds a fresh node tree.
#[derive(Clone)]
pub struct ModelFieldsDirective {
    registry: Arc<Registry>,
    lookup: Arc<dyn ModelLookup>,
    layout: FieldLayout,
}

impl ModelFieldsDirective {
    pub fn new(registry: Arc<Registry>, lookup: Arc<dyn ModelLookup>) -> Self {
        Self {
            registry,
            lookup,
            layout: FieldLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: FieldLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Render the model named by `model_path` (`"<app_label>.<model_name>"`).
    ///
    /// A malformed path or an unknown model yields a single error paragraph
    /// instead of failing. A model missing from the registry, or without a
    /// config, is an error.
    pub fn render(&self, model_path: &str) -> Result<Vec<Node>, DocsError> {
        let model = match self.resolve(model_path) {
            Ok(model) => model,
            Err(e) => {
                tracing::warn!("{}: {}", DIRECTIVE_NAME, e);
                return Ok(vec![Node::text_paragraph(e.to_string())]);
            }
        };
        tracing::debug!("Rendering fields of {}", model.full_name());

        let metadata = self
            .registry
            .get_model(model)
            .ok_or_else(|| DocsError::MissingRecord(model.full_name()))?;

        let mut section = build_metadata_section(metadata);
        let fields = ordered_fields(model)?;
        section.push(self.build_fields(&fields));

        Ok(vec![section])
    }

    fn resolve(&self, model_path: &str) -> Result<&dyn ModelDefinition, PathError> {
        let parts: Vec<&str> = model_path.split('.').collect();
        let (app_label, model_name) = match parts.as_slice() {
            [app_label, model_name] => (*app_label, *model_name),
            _ => return Err(PathError::InvalidPath(model_path.to_string())),
        };

        self.lookup
            .get_model(app_label, model_name)
            .ok_or_else(|| PathError::ModelNotFound(model_path.to_string()))
    }

    fn build_fields(&self, fields: &[&dyn FieldDescriptor]) -> Node {
        let mut section = Node::section(vec![make_id("fields")]);
        section.push(Node::title(FIELDS_TITLE));
        section.push(Node::text_paragraph(FIELDS_INTRO));

        match self.layout {
            FieldLayout::Descriptions => {
                for field in fields {
                    if let Some(display) = field.display() {
                        section.push(build_field_description(*field, display));
                    }
                }
            }
            FieldLayout::Table => section.push(build_field_table(fields)),
        }
        section
    }
}

impl Directive for ModelFieldsDirective {
    fn run(&self, arguments: &[String]) -> Result<Vec<Node>, DocsError> {
        match arguments {
            [model_path] => self.render(model_path),
            _ => Err(DocsError::Config(format!(
                "{} takes exactly {} argument, got {}",
                DIRECTIVE_NAME,
                self.required_arguments(),
                arguments.len()
            ))),
        }
    }
}

/// Heading, description and keywords of a model.
fn build_metadata_section(metadata: &MetadataRecord) -> Node {
    let mut section = Node::section(vec![make_id(&metadata.verbose_name)]);
    section.push(Node::title(&metadata.verbose_name));

    if let Some(description) = metadata.display_description() {
        section.push(Node::text_paragraph(description));
    }

    let keywords = metadata.display_keywords();
    if !keywords.is_empty() {
        section.push(Node::paragraph(vec![Inline::Raw {
            format: "html".to_string(),
            content: format!("<strong>Keywords</strong>: {}", keywords.join(", ")),
        }]));
    }

    section
}

fn build_field_description(field: &dyn FieldDescriptor, display: &dyn DisplayField) -> Node {
    let mut content = Vec::new();

    if let Some(units) = display.base_units().filter(|u| !u.is_empty()) {
        content.push(Node::paragraph(vec![
            Inline::Strong("Units: ".to_string()),
            Inline::Text(units.to_string()),
        ]));
    }

    let help_text = display.help_text();
    if !help_text.is_empty() {
        content.push(Node::text_paragraph(help_text));
    }

    Node::Desc {
        domain: "py".to_string(),
        objtype: "attribute".to_string(),
        signature: format!(
            "{} ({}): {}",
            field.name(),
            title_case(display.verbose_name()),
            field.type_name()
        ),
        content,
    }
}

fn build_field_table(fields: &[&dyn FieldDescriptor]) -> Node {
    let rows = fields
        .iter()
        .map(|f| {
            let help_text = f.display().map(|d| d.help_text()).unwrap_or_default();
            vec![f.name().to_string(), help_text.to_string()]
        })
        .collect();

    Node::Table(Table {
        header: vec!["field".to_string(), "description".to_string()],
        rows,
    })
}
