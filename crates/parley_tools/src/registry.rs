//! Append-only tool registry.

use crate::{ParameterSpec, ToolDescriptor, ToolDoc};
use parley_error::{RegistryError, RegistryErrorKind, RegistryResult};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};

/// Ordered collection of tool descriptors.
///
/// Filled once at startup, then shared read-only (by reference or `Arc`).
/// Registration order is schema emission order.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

/// One `[[tools]]` entry of a manifest.
#[derive(Debug, Deserialize)]
struct ManifestTool {
    name: String,
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    tools: Vec<ManifestTool>,
}

impl From<ManifestTool> for ToolDescriptor {
    fn from(entry: ManifestTool) -> Self {
        let doc = ToolDoc::parse(entry.doc.as_deref().unwrap_or_default());
        let mut descriptor = entry
            .parameters
            .into_iter()
            .fold(ToolDescriptor::new(entry.name), ToolDescriptor::with_parameter)
            .with_doc(&doc);
        if !entry.summary.is_empty() {
            descriptor = descriptor.with_summary(entry.summary);
        }
        if !entry.description.is_empty() {
            descriptor = descriptor.with_description(entry.description);
        }
        descriptor
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryErrorKind::DuplicateName`] if the name is taken.
    #[instrument(skip(self, descriptor), fields(tool = %descriptor.name()))]
    pub fn register(&mut self, descriptor: ToolDescriptor) -> RegistryResult<()> {
        if self.tools.iter().any(|t| t.name() == descriptor.name()) {
            return Err(RegistryError::new(RegistryErrorKind::DuplicateName(
                descriptor.name().clone(),
            )));
        }
        debug!(parameters = descriptor.parameters().len(), "Registered tool");
        self.tools.push(descriptor);
        Ok(())
    }

    /// All descriptors in registration order.
    pub fn all(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Looks up a descriptor by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryErrorKind::NotFound`] for unknown names.
    pub fn by_name(&self, name: &str) -> RegistryResult<&ToolDescriptor> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| RegistryError::new(RegistryErrorKind::NotFound(name.to_string())))
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true when no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name().as_str())
    }

    /// Builds a registry from a TOML manifest of `[[tools]]` entries.
    ///
    /// An entry's `doc` string is parsed with [`ToolDoc::parse`]; explicit
    /// `summary` and `description` keys take precedence over it.
    ///
    /// # Examples
    ///
    /// ```
    /// use parley_tools::ToolRegistry;
    ///
    /// let registry = ToolRegistry::from_manifest_str(r#"
    /// [[tools]]
    /// name = "add"
    /// doc = """
    /// Add two numbers.
    ///
    /// :param first: First addend
    /// """
    ///
    /// [[tools.parameters]]
    /// name = "first"
    /// type = "float"
    /// "#).unwrap();
    ///
    /// let add = registry.by_name("add").unwrap();
    /// assert_eq!(add.summary(), "Add two numbers.");
    /// assert_eq!(add.parameters()[0].description().as_deref(), Some("First addend"));
    /// ```
    #[instrument(skip_all)]
    pub fn from_manifest_str(manifest: &str) -> RegistryResult<Self> {
        let manifest: Manifest = toml::from_str(manifest).map_err(|e| {
            RegistryError::new(RegistryErrorKind::Manifest(e.to_string()))
        })?;
        let mut registry = Self::new();
        for entry in manifest.tools {
            registry.register(entry.into())?;
        }
        debug!(tool_count = registry.len(), "Loaded tool manifest");
        Ok(registry)
    }

    /// Reads and parses a TOML manifest file.
    pub fn from_manifest_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::new(RegistryErrorKind::Manifest(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        })?;
        Self::from_manifest_str(&contents)
    }
}
