//! Configuration for snippet formatting.

/// Helper function wrapped around code snippets.
pub const DEFAULT_HELPER: &str = "defineQuery";

/// Module the helper is imported from.
pub const DEFAULT_IMPORT_SOURCE: &str = "sanity";

/// Configuration for code snippets (`ts` and `js` formats).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Name of the query helper, imported and called around the query
    pub(crate) helper: String,
    /// Module specifier in the import statement
    pub(crate) import_source: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            helper: DEFAULT_HELPER.to_string(),
            import_source: DEFAULT_IMPORT_SOURCE.to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the helper wrapped around each query.
    pub fn helper(mut self, name: impl Into<String>) -> Self {
        self.helper = name.into();
        self
    }

    /// Set the module the helper is imported from.
    pub fn import_source(mut self, source: impl Into<String>) -> Self {
        self.import_source = source.into();
        self
    }

    pub fn helper_name(&self) -> &str {
        &self.helper
    }

    pub fn import_source_name(&self) -> &str {
        &self.import_source
    }
}
