//! Extension registry

use crate::plugin::lua::Lua;
use crate::plugin::traits::{BuilderExtension, ExtensionInfo, ScannerExtension};
use std::collections::HashMap;
use std::sync::Arc;

/// Extension registry, keyed by directive name
#[derive(Clone)]
pub struct ExtensionRegistry {
    scanners: HashMap<String, Arc<dyn ScannerExtension>>,
    builders: HashMap<String, Arc<dyn BuilderExtension>>,
}

impl ExtensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            scanners: HashMap::new(),
            builders: HashMap::new(),
        }
    }

    /// Create a registry with the bundled extensions (Lua)
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let lua = Arc::new(Lua);
        registry.register_scanner(lua.clone());
        registry.register_builder(lua);
        registry
    }

    /// Register a scanner extension for all of its directives
    pub fn register_scanner(&mut self, extension: Arc<dyn ScannerExtension>) {
        let info = extension.info();
        tracing::debug!("Registering scanner extension: {}", info.name);
        for name in extension.directives() {
            self.scanners.insert(name.to_string(), extension.clone());
        }
    }

    /// Register a builder extension for all of its directives
    pub fn register_builder(&mut self, extension: Arc<dyn BuilderExtension>) {
        let info = extension.info();
        tracing::debug!("Registering builder extension: {}", info.name);
        for name in extension.directives() {
            self.builders.insert(name.to_string(), extension.clone());
        }
    }

    /// Scanner extension for a directive name
    pub fn scanner(&self, directive: &str) -> Option<Arc<dyn ScannerExtension>> {
        self.scanners.get(directive).cloned()
    }

    /// Builder extension for a directive name
    pub fn builder(&self, directive: &str) -> Option<Arc<dyn BuilderExtension>> {
        self.builders.get(directive).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty() && self.builders.is_empty()
    }

    /// List all registered extensions
    pub fn list(&self) -> Vec<ExtensionInfo> {
        let mut infos: Vec<ExtensionInfo> = self
            .scanners
            .values()
            .map(|e| e.info())
            .chain(self.builders.values().map(|e| e.info()))
            .collect();
        infos.sort_by_key(|info| info.name);
        infos.dedup();
        infos
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registers_lua() {
        let registry = ExtensionRegistry::builtin();
        assert!(registry.scanner("content_by_lua_block").is_some());
        assert!(registry.builder("set_by_lua_block").is_some());
        assert!(registry.scanner("content_by_lua_file").is_none());
        assert_eq!(registry.list().len(), 1);
        assert_eq!(registry.list()[0].name, "lua");
    }

    #[test]
    fn test_empty_registry() {
        let registry = ExtensionRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.scanner("content_by_lua_block").is_none());
    }
}
