//! Serialization of document trees to Markdown and JSON.

use clap::ValueEnum;

use crate::doctree::{Inline, Node, Table};

/// Output format for rendered directives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

pub fn render(
    nodes: &[Node],
    format: OutputFormat,
    base_level: usize,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Markdown => Ok(to_markdown(nodes, base_level)),
        OutputFormat::Json => to_json(nodes),
    }
}

pub fn to_json(nodes: &[Node]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(nodes)
}

/// Render nodes as CommonMark with inline HTML.
///
/// The outermost section heading gets `base_level` hashes and each nested
/// section one more, capped at six. Section ids become `<a id>` anchors ahead
/// of the heading.
///
/// Example output for a model section at level 2:
/// ```text
/// <a id="rock-sample"></a>
/// ## Rock Sample
///
/// <a id="fields"></a>
/// ### Declared Fields
///
/// - `depth (Depth): FloatField`
///
///   **Units:** m
/// ```
pub fn to_markdown(nodes: &[Node], base_level: usize) -> String {
    let mut output = String::new();
    for node in nodes {
        render_node(&mut output, node, base_level.max(1));
    }
    output
}

fn render_node(output: &mut String, node: &Node, level: usize) {
    match node {
        Node::Section { ids, children } => {
            for id in ids.iter().filter(|id| !id.is_empty()) {
                output.push_str(&format!("<a id=\"{}\"></a>\n", escape_html(id)));
            }
            for child in children {
                // Titles take this section's level, nested sections the next.
                let child_level = match child {
                    Node::Section { .. } => level + 1,
                    _ => level,
                };
                render_node(output, child, child_level);
            }
        }
        Node::Title { text } => {
            output.push_str(&"#".repeat(level.min(6)));
            output.push(' ');
            output.push_str(&escape_text(text));
            output.push_str("\n\n");
        }
        Node::Paragraph { inlines } => {
            output.push_str(&escape_block_starts(&render_inlines(inlines)));
            output.push_str("\n\n");
        }
        Node::Desc {
            signature, content, ..
        } => {
            output.push_str("- ");
            output.push_str(&code_span(signature));
            output.push_str("\n\n");
            for child in content {
                let mut block = String::new();
                render_node(&mut block, child, level + 1);
                for line in block.trim_end().lines() {
                    if !line.is_empty() {
                        output.push_str("  ");
                        output.push_str(line);
                    }
                    output.push('\n');
                }
                output.push('\n');
            }
        }
        Node::Table(table) => render_table(output, table),
    }
}

fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape_text(text)),
            Inline::Strong(text) => {
                // Emphasis can't close after whitespace; move it outside.
                let trimmed = text.trim_end();
                out.push_str("**");
                out.push_str(&escape_text(trimmed));
                out.push_str("**");
                out.push_str(&text[trimmed.len()..]);
            }
            Inline::Raw { format, content } if format == "html" => out.push_str(content),
            Inline::Raw { format, .. } => {
                tracing::debug!("Dropping raw content in unsupported format '{}'", format);
            }
        }
    }
    out
}

fn render_table(output: &mut String, table: &Table) {
    output.push_str(&table_row(&table.header));
    let rule = vec!["---".to_string(); table.header.len()];
    output.push_str(&format!("|{}|\n", rule.join("|")));
    for cells in &table.rows {
        output.push_str(&table_row(cells));
    }
    output.push('\n');
}

fn table_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
    format!("| {} |\n", cells.join(" | "))
}

fn code_span(text: &str) -> String {
    if text.contains('`') {
        format!("`` {} ``", text)
    } else {
        format!("`{}`", text)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape HTML entities plus the Markdown emphasis, code and link characters.
///
/// Block markers are only special at the start of a line; paragraphs also go
/// through [`escape_block_starts`].
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '*' | '_' | '`' | '[' | ']' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a marker at the start of each line that would otherwise open a
/// heading, list item or setext underline.
///
/// `>` needs nothing here since text already renders it as `&gt;`.
fn escape_block_starts(text: &str) -> String {
    let lines: Vec<String> = text.split('\n').map(escape_line_start).collect();
    lines.join("\n")
}

fn escape_line_start(line: &str) -> String {
    let body = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - body.len()];

    if body.starts_with(['#', '-', '+', '=']) {
        return format!("{}\\{}", indent, body);
    }

    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && body[digits..].starts_with(['.', ')']) {
        return format!("{}{}\\{}", indent, &body[..digits], &body[digits..]);
    }

    line.to_string()
}

fn escape_cell(text: &str) -> String {
    escape_text(text).replace('|', "\\|").replace('\n', " ")
}
