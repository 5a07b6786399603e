//! The `kind → leaf generator` registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::generators::{
    BooleanGenerator, DateWindowGenerator, EnumGenerator, LeafGenerator, NumberGenerator,
    StringGenerator, TimeWindowGenerator,
};
use crate::schema::SchemaKind;

/// Immutable map from schema kind to leaf generator.
///
/// Built once through [`RegistryBuilder`]; share it by reference.
pub struct GeneratorRegistry {
    generators: HashMap<SchemaKind, Box<dyn LeafGenerator>>,
}

impl GeneratorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry with every built-in leaf generator.
    pub fn standard() -> Self {
        Self::builder()
            .register(SchemaKind::String, StringGenerator)
            .register(SchemaKind::Number, NumberGenerator)
            .register(SchemaKind::Boolean, BooleanGenerator)
            .register(SchemaKind::Enum, EnumGenerator)
            .register(SchemaKind::DateWindow, DateWindowGenerator)
            .register(SchemaKind::TimeWindow, TimeWindowGenerator)
            .build()
    }

    pub fn get(&self, kind: SchemaKind) -> Option<&dyn LeafGenerator> {
        self.generators.get(&kind).map(Box::as_ref)
    }

    pub fn contains(&self, kind: SchemaKind) -> bool {
        self.generators.contains_key(&kind)
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.generators.keys().map(|k| k.name()).collect();
        kinds.sort_unstable();
        f.debug_struct("GeneratorRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

/// Collects generators before freezing them into a [`GeneratorRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    generators: HashMap<SchemaKind, Box<dyn LeafGenerator>>,
}

impl RegistryBuilder {
    /// Register `generator` for `kind`, replacing any earlier registration.
    pub fn register(mut self, kind: SchemaKind, generator: impl LeafGenerator + 'static) -> Self {
        self.generators.insert(kind, Box::new(generator));
        self
    }

    pub fn build(self) -> GeneratorRegistry {
        GeneratorRegistry {
            generators: self.generators,
        }
    }
}

static DEFAULT_REGISTRY: LazyLock<GeneratorRegistry> = LazyLock::new(GeneratorRegistry::standard);

/// The shared standard registry, built on first use.
pub fn default_registry() -> &'static GeneratorRegistry {
    &DEFAULT_REGISTRY
}
