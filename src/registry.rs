//! Name → model lookup
//!
//! Built once at startup and handed to the driver engine; read-only afterwards.
//!
//! ```
//! use epd_models::prelude::*;
//! use epd_models::registry::Registry;
//!
//! let registry = Registry::builtin()?;
//! let model = registry.get("inkplate2")?;
//! assert_eq!(model.panel(), Panel::Inkplate2);
//! assert!(registry.get("unknown").is_err());
//! # Ok::<(), epd_models::error::RegistryError>(())
//! ```

use heapless::Vec;
use log::{debug, warn};

use crate::error::RegistryError;
use crate::model::{Model, Panel};

/// Maximum number of models a registry holds
pub const MAX_MODELS: usize = 16;

/// Immutable-after-startup mapping from model name to [`Model`]
#[derive(Clone, Debug, Default)]
pub struct Registry {
    models: Vec<Model, MAX_MODELS>,
}

impl Registry {
    /// An empty registry
    pub const fn new() -> Self {
        Registry { models: Vec::new() }
    }

    /// A registry holding the stock model of every [`Panel`]
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Registry::new();
        for panel in Panel::ALL {
            registry.register(Model::from(panel))?;
        }
        Ok(registry)
    }

    /// Add `model`, rejecting a name that is already taken
    pub fn register(&mut self, model: Model) -> Result<(), RegistryError> {
        if self.models.iter().any(|m| m.name() == model.name()) {
            warn!("model `{}` is already registered", model.name());
            return Err(RegistryError::Duplicate(model.name()));
        }
        self.models.push(model).map_err(|model| {
            warn!("no room for model `{}`", model.name());
            RegistryError::Full {
                capacity: MAX_MODELS,
            }
        })?;
        debug!("registered model `{}`", model.name());
        Ok(())
    }

    /// Model registered under `name`
    pub fn get(&self, name: &str) -> Result<&Model, RegistryError> {
        match self.models.iter().find(|model| model.name() == name) {
            Some(model) => {
                debug!("selected model `{}` ({:?})", name, model.panel());
                Ok(model)
            }
            None => {
                warn!("unknown model `{}`", name);
                Err(RegistryError::NotFound)
            }
        }
    }

    /// All models, in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model is registered
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
