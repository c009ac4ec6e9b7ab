//! Tool type tag to shape constructor table.

use std::collections::HashMap;

use bevy::log::debug;

use super::shape::ToolShape;
use super::shapes::BuiltinToolType;

type ShapeConstructor = Box<dyn Fn() -> Box<dyn ToolShape> + Send + Sync>;

/// Maps tool type names to the shapes that implement them.
pub struct ToolRegistry {
    constructors: HashMap<String, ShapeConstructor>,
}

impl Default for ToolRegistry {
    /// Registry with every built-in shape
    fn default() -> Self {
        let mut registry = Self::empty();
        for tool_type in BuiltinToolType::all().iter().copied() {
            registry.register(tool_type.name(), move || tool_type.create());
        }
        registry
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register (or replace) the constructor behind a type name.
    pub fn register<F>(&mut self, tool_type: &str, constructor: F)
    where
        F: Fn() -> Box<dyn ToolShape> + Send + Sync + 'static,
    {
        if self
            .constructors
            .insert(tool_type.to_string(), Box::new(constructor))
            .is_some()
        {
            debug!("Replaced line tool constructor for '{}'", tool_type);
        }
    }

    pub fn contains(&self, tool_type: &str) -> bool {
        self.constructors.contains_key(tool_type)
    }

    pub fn create(&self, tool_type: &str) -> Option<Box<dyn ToolShape>> {
        self.constructors.get(tool_type).map(|constructor| constructor())
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
