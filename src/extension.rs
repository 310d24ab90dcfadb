//! Registration with a documentation build tool.
//!
//! [`setup`] declares the config setting, the `autodatamodel` directive and the
//! builder-inited hook that writes the listing pages. Any host implementing
//! [`HostApp`] can drive it; [`crate::build::Builder`] is the bundled one.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::config::DocsConfig;
use crate::directive::{Directive, ModelFieldsDirective, DIRECTIVE_NAME};
use crate::error::DocsError;
use crate::listing::write_listings;
use crate::models::{ModelLookup, Registry};

pub const EXTENSION_VERSION: &str = "0.1";

/// Config setting naming the apps to document.
pub const MODEL_APPS_SETTING: &str = "autodatamodel_apps";

/// Hook run once when the builder starts, given the documentation source root.
pub type BuilderInitedHook = Box<dyn Fn(&Path) -> Result<(), DocsError> + Send + Sync>;

/// What invalidates a config value when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rebuild {
    /// Re-read every document.
    Env,
}

/// Extension facts reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionMetadata {
    pub version: &'static str,
    pub parallel_read_safe: bool,
    pub parallel_write_safe: bool,
}

/// The registration surface of a documentation build tool.
pub trait HostApp {
    fn add_config_value(&mut self, name: &str, default: serde_json::Value, rebuild: Rebuild);

    fn add_directive(&mut self, name: &str, directive: Arc<dyn Directive>);

    fn connect_builder_inited(&mut self, hook: BuilderInitedHook);
}

/// Register the extension with `app`.
///
/// The registry and lookup are shared by the listing hook and every
/// directive invocation; neither is mutated after this call.
pub fn setup(
    app: &mut dyn HostApp,
    registry: Arc<Registry>,
    lookup: Arc<dyn ModelLookup>,
    config: &DocsConfig,
) -> ExtensionMetadata {
    app.add_config_value(
        MODEL_APPS_SETTING,
        serde_json::json!(config.model_apps),
        Rebuild::Env,
    );

    let directive =
        ModelFieldsDirective::new(Arc::clone(&registry), lookup).with_layout(config.field_layout);
    app.add_directive(DIRECTIVE_NAME, Arc::new(directive));

    let subdir = config.output_subdir.clone();
    app.connect_builder_inited(Box::new(move |srcdir: &Path| {
        write_listings(&srcdir.join(&subdir), &registry).map(|_| ())
    }));

    tracing::debug!("Registered {} extension v{}", DIRECTIVE_NAME, EXTENSION_VERSION);

    ExtensionMetadata {
        version: EXTENSION_VERSION,
        parallel_read_safe: true,
        parallel_write_safe: true,
    }
}
