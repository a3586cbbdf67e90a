//! Lookup table from `(type, typeGroup)` to the variant's handler

use std::collections::HashMap;
use std::sync::Arc;

use super::handlers::{self, TransactionHandler};
use super::types::InternalTransactionType;
use super::TransactionError;

#[derive(Clone)]
pub struct TransactionRegistry {
    handlers: HashMap<InternalTransactionType, Arc<dyn TransactionHandler>>,
}

impl TransactionRegistry {
    /// Empty registry, for callers that only want custom variants
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with every Core and Solar variant
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for handler in handlers::builtin() {
            let transaction_type = handler.transaction_type();
            registry.handlers.insert(transaction_type, handler);
        }
        registry
    }

    pub fn register(&mut self, handler: Arc<dyn TransactionHandler>) -> Result<(), TransactionError> {
        let transaction_type = handler.transaction_type();

        if let Some(registered) = self.handlers.get(&transaction_type) {
            if registered.key() == handler.key() {
                return Err(TransactionError::AlreadyRegistered(handler.key()));
            }
            return Err(TransactionError::KeyAlreadyRegistered(registered.key()));
        }
        if let Some(registered) = self.handlers.values().find(|h| h.key() == handler.key()) {
            return Err(TransactionError::KeyAlreadyRegistered(registered.key()));
        }

        log::debug!("Registered {} transaction as {}", handler.key(), transaction_type);
        self.handlers.insert(transaction_type, handler);
        Ok(())
    }

    pub fn deregister(&mut self, transaction_type: InternalTransactionType) -> Result<(), TransactionError> {
        match self.handlers.remove(&transaction_type) {
            Some(handler) => {
                log::debug!("Deregistered {} transaction", handler.key());
                Ok(())
            }
            None => Err(TransactionError::UnknownType(transaction_type)),
        }
    }

    pub fn get(
        &self,
        transaction_type: InternalTransactionType,
    ) -> Result<&Arc<dyn TransactionHandler>, TransactionError> {
        self.handlers
            .get(&transaction_type)
            .ok_or(TransactionError::UnknownType(transaction_type))
    }

    pub fn contains(&self, transaction_type: InternalTransactionType) -> bool {
        self.handlers.contains_key(&transaction_type)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for TransactionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
