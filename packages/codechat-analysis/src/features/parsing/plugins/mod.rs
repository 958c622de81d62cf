//! Language plugins
//!
//! Each language has its own plugin implementing the LanguagePlugin trait.

pub mod java;
pub mod kotlin;

pub use java::JavaPlugin;
pub use kotlin::KotlinPlugin;

use crate::features::parsing::ports::LanguageRegistry;

/// Create a registry with all language plugins registered
pub fn create_full_registry() -> LanguageRegistry {
    let mut registry = LanguageRegistry::new();
    registry.register(Box::new(JavaPlugin::new()));
    registry.register(Box::new(KotlinPlugin::new()));
    registry
}
