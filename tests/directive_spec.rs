//! Model field directive tests.
//!
//! Tests are organized into three sections:
//! - Placeholders: malformed paths and unknown models
//! - Metadata: heading, description and keywords
//! - Fields: ordering and per-field blocks

use std::sync::Arc;

use datamodel_docs::catalog::{Catalog, CatalogField, CatalogModel};
use datamodel_docs::config::FieldLayout;
use datamodel_docs::directive::{Directive, ModelFieldsDirective};
use datamodel_docs::doctree::{Inline, Node};
use datamodel_docs::models::*;
use datamodel_docs::DocsError;

fn record(full_name: &str, verbose_name: &str, config: ModelConfig) -> MetadataRecord {
    MetadataRecord {
        full_name: full_name.to_string(),
        verbose_name: verbose_name.to_string(),
        description: None,
        keywords: vec![],
        config: Some(config),
    }
}

fn model(app_label: &str, model_name: &str, fields: Vec<CatalogField>) -> CatalogModel {
    CatalogModel {
        app_label: app_label.to_string(),
        model_name: model_name.to_string(),
        fields,
        config: None,
    }
}

/// Helper to build a directive over a small geology catalog.
fn setup(layout: FieldLayout) -> ModelFieldsDirective {
    let mut registry = Registry::new();
    registry.register(
        Category::Samples,
        record(
            "geo.RockSample",
            "Rock Sample",
            ModelConfig {
                description: Some("A hand specimen collected in the field.".to_string()),
                keywords: vec!["rock".to_string(), "outcrop".to_string()],
                fields: vec![],
            },
        ),
    );
    registry.register(
        Category::Measurements,
        record(
            "geo.HeliumAge",
            "Helium Age",
            ModelConfig {
                fields: vec!["b".into(), "a".into(), "missing".into()],
                ..Default::default()
            },
        ),
    );

    registry.register(
        Category::Measurements,
        record("geo.Porosity", "Porosity", ModelConfig::default()),
    );

    let models = vec![
        model(
            "geo",
            "RockSample",
            vec![
                CatalogField::new("z", "CharField", "zone"),
                CatalogField::new("a", "CharField", "area"),
                CatalogField::new("m", "FloatField", "mass")
                    .with_units("kg")
                    .with_help_text("Dry mass of the specimen"),
                CatalogField::relation("site", "ForeignKey"),
            ],
        ),
        model(
            "geo",
            "HeliumAge",
            vec![
                CatalogField::new("a", "FloatField", "raw age"),
                CatalogField::new("b", "FloatField", "corrected age"),
            ],
        ),
        model(
            "geo",
            "Porosity",
            vec![CatalogField::new("phi", "FloatField", "porosity")
                .with_units("")
                .with_help_text("Pore volume over bulk volume")],
        ),
        model("geo", "Orphan", vec![]),
    ];

    let catalog = Catalog::from_parts(registry, models);
    let registry = Arc::new(catalog.registry().clone());
    let lookup: Arc<dyn ModelLookup> = Arc::new(catalog);
    ModelFieldsDirective::new(registry, lookup).with_layout(layout)
}

fn only_paragraph_text(nodes: &[Node]) -> String {
    assert_eq!(nodes.len(), 1);
    match &nodes[0] {
        Node::Paragraph { .. } => nodes[0].text(),
        other => panic!("expected a paragraph, got {:?}", other),
    }
}

/// The "Declared Fields" subsection of a rendered model.
fn fields_section(nodes: &[Node]) -> &Node {
    nodes[0]
        .children()
        .iter()
        .find(|n| matches!(n, Node::Section { ids, .. } if ids == &["fields".to_string()]))
        .expect("no fields section")
}

fn signatures(nodes: &[Node]) -> Vec<String> {
    fields_section(nodes)
        .children()
        .iter()
        .filter_map(|n| match n {
            Node::Desc { signature, .. } => Some(signature.clone()),
            _ => None,
        })
        .collect()
}

// ============================================================
// Placeholders
// ============================================================

mod placeholders {
    use super::*;

    #[test]
    fn path_without_separator_is_invalid() {
        let directive = setup(FieldLayout::Descriptions);
        let nodes = directive.render("invalid").expect("render failed");
        assert_eq!(only_paragraph_text(&nodes), "Invalid model path: 'invalid'");
    }

    #[test]
    fn path_with_two_separators_is_invalid() {
        let directive = setup(FieldLayout::Descriptions);
        let nodes = directive.render("a.b.c").expect("render failed");
        assert_eq!(only_paragraph_text(&nodes), "Invalid model path: 'a.b.c'");
    }

    #[test]
    fn unknown_model_cannot_be_loaded() {
        let directive = setup(FieldLayout::Descriptions);
        let nodes = directive.render("geo.Basalt").expect("render failed");
        assert_eq!(only_paragraph_text(&nodes), "Could not load model: 'geo.Basalt'");
    }

    #[test]
    fn empty_label_cannot_be_loaded() {
        let directive = setup(FieldLayout::Descriptions);
        let nodes = directive.render(".RockSample").expect("render failed");
        assert!(only_paragraph_text(&nodes).contains("'.RockSample'"));
    }

    #[test]
    fn model_missing_from_registry_is_fatal() {
        let directive = setup(FieldLayout::Descriptions);
        let result = directive.render("geo.Orphan");
        assert!(matches!(result, Err(DocsError::MissingRecord(name)) if name == "geo.Orphan"));
    }

    #[test]
    fn run_requires_exactly_one_argument() {
        let directive = setup(FieldLayout::Descriptions);
        assert!(directive.run(&[]).is_err());
        assert!(directive
            .run(&["geo.RockSample".to_string()])
            .is_ok());
    }
}

// ============================================================
// Metadata
// ============================================================

mod metadata {
    use super::*;

    #[test]
    fn section_is_titled_and_anchored_by_verbose_name() {
        let nodes = setup(FieldLayout::Descriptions)
            .render("geo.RockSample")
            .expect("render failed");

        let Node::Section { ids, children } = &nodes[0] else {
            panic!("expected a section");
        };
        assert_eq!(ids, &vec!["rock-sample".to_string()]);
        assert_eq!(children[0], Node::title("Rock Sample"));
    }

    #[test]
    fn description_and_keywords_follow_the_title() {
        let nodes = setup(FieldLayout::Descriptions)
            .render("geo.RockSample")
            .expect("render failed");
        let children = nodes[0].children();

        assert_eq!(
            children[1],
            Node::text_paragraph("A hand specimen collected in the field.")
        );
        assert_eq!(
            children[2],
            Node::paragraph(vec![Inline::Raw {
                format: "html".to_string(),
                content: "<strong>Keywords</strong>: rock, outcrop".to_string(),
            }])
        );
    }

    #[test]
    fn empty_description_and_keywords_are_omitted() {
        let nodes = setup(FieldLayout::Descriptions)
            .render("geo.HeliumAge")
            .expect("render failed");
        let children = nodes[0].children();

        assert_eq!(children.len(), 2);
        assert!(matches!(children[1], Node::Section { .. }));
    }
}

// ============================================================
// Fields
// ============================================================

mod fields {
    use super::*;

    #[test]
    fn explicit_list_order_is_kept_and_unknown_names_dropped() {
        let nodes = setup(FieldLayout::Descriptions)
            .render("geo.HeliumAge")
            .expect("render failed");
        assert_eq!(
            signatures(&nodes),
            vec![
                "b (Corrected Age): FloatField".to_string(),
                "a (Raw Age): FloatField".to_string(),
            ]
        );
    }

    #[test]
    fn fields_are_sorted_by_name_without_explicit_list() {
        let nodes = setup(FieldLayout::Descriptions)
            .render("geo.RockSample")
            .expect("render failed");
        assert_eq!(
            signatures(&nodes),
            vec![
                "a (Area): CharField".to_string(),
                "m (Mass): FloatField".to_string(),
                "z (Zone): CharField".to_string(),
            ]
        );
    }

    #[test]
    fn fields_section_has_title_and_intro() {
        let nodes = setup(FieldLayout::Descriptions)
            .render("geo.RockSample")
            .expect("render failed");
        let section = fields_section(&nodes).children();

        assert_eq!(section[0], Node::title("Declared Fields"));
        assert_eq!(
            section[1],
            Node::text_paragraph("The following fields are declared in this data model.")
        );
    }

    #[test]
    fn units_and_help_text_are_rendered_when_present() {
        let nodes = setup(FieldLayout::Descriptions)
            .render("geo.RockSample")
            .expect("render failed");
        let mass = fields_section(&nodes)
            .children()
            .iter()
            .find(|n| matches!(n, Node::Desc { signature, .. } if signature.starts_with("m ")))
            .expect("no mass field");

        let Node::Desc {
            domain,
            objtype,
            content,
            ..
        } = mass
        else {
            unreachable!();
        };
        assert_eq!(domain, "py");
        assert_eq!(objtype, "attribute");
        assert_eq!(
            content,
            &vec![
                Node::paragraph(vec![
                    Inline::Strong("Units: ".to_string()),
                    Inline::Text("kg".to_string()),
                ]),
                Node::text_paragraph("Dry mass of the specimen"),
            ]
        );
    }

    #[test]
    fn fields_without_units_or_help_have_empty_content() {
        let nodes = setup(FieldLayout::Descriptions)
            .render("geo.RockSample")
            .expect("render failed");
        let area = fields_section(&nodes)
            .children()
            .iter()
            .find(|n| matches!(n, Node::Desc { signature, .. } if signature.starts_with("a ")))
            .expect("no area field");
        assert!(area.children().is_empty());
    }

    #[test]
    fn empty_units_are_not_rendered() {
        let nodes = setup(FieldLayout::Descriptions)
            .render("geo.Porosity")
            .expect("render failed");
        let phi = fields_section(&nodes)
            .children()
            .iter()
            .find(|n| matches!(n, Node::Desc { .. }))
            .expect("no porosity field");

        assert_eq!(
            phi.children(),
            &[Node::text_paragraph("Pore volume over bulk volume")]
        );
    }

    #[test]
    fn table_layout_lists_name_and_help_text() {
        let nodes = setup(FieldLayout::Table)
            .render("geo.RockSample")
            .expect("render failed");
        let table = fields_section(&nodes)
            .children()
            .iter()
            .find_map(|n| match n {
                Node::Table(table) => Some(table),
                _ => None,
            })
            .expect("no table");

        assert_eq!(table.header, vec!["field", "description"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["a".to_string(), String::new()],
                vec!["m".to_string(), "Dry mass of the specimen".to_string()],
                vec!["z".to_string(), String::new()],
            ]
        );
    }
}
