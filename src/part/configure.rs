//! Configure operations
//!
//! A configure operation runs once per resolved part and decides what the
//! part contributes to the [`PartManager`]. Parts pick an operation through
//! a configure declaration in their manifest; the declaration names an
//! operation token that is looked up in an [`OperationRegistry`].

use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::part::manager::{ApplicationPart, PartManager};
use crate::part::model::PartRef;
use crate::part::registry::manifest::DEFAULT_SLOT;
use crate::part::traits::PartError;

/// Token of the operation used when a part declares no override
pub const DEFAULT_OPERATION: &str = "default";
/// Token of the operation that registers nothing
pub const NULL_OPERATION: &str = "null";
/// Token of the operation that registers a part and its direct additional parts
pub const INCLUDE_ADDITIONAL_OPERATION: &str = "include-additional";

/// Step that mutates the part manager for one part
pub trait ConfigureOperation: Send + Sync {
    fn configure(&self, manager: &mut PartManager, part: PartRef<'_>) -> Result<(), PartError>;
}

/// Registers the part's own application part
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfigureOperation;

impl ConfigureOperation for DefaultConfigureOperation {
    fn configure(&self, manager: &mut PartManager, part: PartRef<'_>) -> Result<(), PartError> {
        manager.add(part.to_application_part());
        Ok(())
    }
}

/// Registers nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConfigureOperation;

impl ConfigureOperation for NullConfigureOperation {
    fn configure(&self, _manager: &mut PartManager, _part: PartRef<'_>) -> Result<(), PartError> {
        Ok(())
    }
}

/// Registers the part as a component, then each direct additional part
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAdditionalOperation;

impl ConfigureOperation for IncludeAdditionalOperation {
    fn configure(&self, manager: &mut PartManager, part: PartRef<'_>) -> Result<(), PartError> {
        manager.add(ApplicationPart::component(part.component().clone()));
        for additional in part.additional_parts() {
            manager.add(additional.to_application_part());
        }
        Ok(())
    }
}

type OperationFactory = Box<dyn Fn() -> Box<dyn ConfigureOperation> + Send + Sync>;

/// Operation factories keyed by token
pub struct OperationRegistry {
    factories: HashMap<String, OperationFactory>,
}

impl OperationRegistry {
    /// Registry without any operation
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the builtin operations
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(DEFAULT_OPERATION, || Box::new(DefaultConfigureOperation));
        registry.register(NULL_OPERATION, || Box::new(NullConfigureOperation));
        registry.register(INCLUDE_ADDITIONAL_OPERATION, || {
            Box::new(IncludeAdditionalOperation)
        });
        registry
    }

    /// Register a factory under `token`, replacing any previous one
    pub fn register<F>(&mut self, token: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn ConfigureOperation> + Send + Sync + 'static,
    {
        self.factories.insert(token.into(), Box::new(factory));
    }

    pub fn contains(&self, token: &str) -> bool {
        self.factories.contains_key(token)
    }

    /// Operation for `part` in the default slot
    pub fn operation_for(&self, part: PartRef<'_>) -> Result<Box<dyn ConfigureOperation>, PartError> {
        self.operation_for_slot(part, DEFAULT_SLOT)
    }

    /// Operation for `part` in `slot`
    ///
    /// The first declaration for the slot is used. Without a declaration the
    /// default operation applies. A declared token that is not registered is
    /// a configuration error.
    pub fn operation_for_slot(
        &self,
        part: PartRef<'_>,
        slot: &str,
    ) -> Result<Box<dyn ConfigureOperation>, PartError> {
        let Some(declaration) = part.component().manifest().configure_for_slot(slot) else {
            return Ok(Box::new(DefaultConfigureOperation));
        };

        let factory = self.factories.get(&declaration.operation).ok_or_else(|| {
            PartError::ConfigurationType {
                part: part.name().to_string(),
                slot: slot.to_string(),
                operation: declaration.operation.clone(),
            }
        })?;

        debug!(
            "Part {} uses operation {} for slot {}",
            part.name(),
            declaration.operation,
            slot
        );
        Ok(factory())
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<_> = self.factories.keys().collect();
        tokens.sort();
        f.debug_struct("OperationRegistry")
            .field("operations", &tokens)
            .finish()
    }
}
