/// A field that carries a human-readable display name.
pub trait HasVerboseName {
    fn verbose_name(&self) -> &str;
}

/// A field that carries help text. Empty means none.
pub trait HasHelpText {
    fn help_text(&self) -> &str;
}

/// A field that may declare measurement units.
pub trait HasUnits {
    fn base_units(&self) -> Option<&str> {
        None
    }
}

/// Display metadata a field needs to appear in generated documentation.
pub trait DisplayField: HasVerboseName + HasHelpText + HasUnits {}

impl<T: HasVerboseName + HasHelpText + HasUnits> DisplayField for T {}

/// One declared attribute of a model.
///
/// Relation-only and internal fields have no display metadata and return
/// `None` from [`display`](Self::display); they are never documented.
pub trait FieldDescriptor: Send + Sync {
    fn name(&self) -> &str;

    /// Label of the field's declared type, e.g. `CharField`.
    fn type_name(&self) -> &str;

    fn display(&self) -> Option<&dyn DisplayField>;
}
