//! In-memory registry for tests.
//!
//! Holds the registry text in memory and records every published change, so
//! use cases can be exercised without touching the file system.

use std::cell::RefCell;

use dockmaster_core::ChangeDescription;

use super::{RegistryError, RegistrySource};

/// A [`RegistrySource`] that keeps the text in memory.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    text: RefCell<String>,
    published: RefCell<Vec<ChangeDescription>>,
}

impl InMemoryRegistry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(text.into()),
            published: RefCell::new(Vec::new()),
        }
    }

    /// Current registry text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Every change published so far, oldest first.
    pub fn published(&self) -> Vec<ChangeDescription> {
        self.published.borrow().clone()
    }
}

impl RegistrySource for InMemoryRegistry {
    fn fetch(&self) -> Result<String, RegistryError> {
        Ok(self.text())
    }

    fn publish(&self, text: &str, change: &ChangeDescription) -> Result<(), RegistryError> {
        *self.text.borrow_mut() = text.to_string();
        self.published.borrow_mut().push(change.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_registry_records_publications() {
        // Arrange
        let registry = InMemoryRegistry::new("before\n");
        let change = ChangeDescription {
            branch_name: "b".to_string(),
            commit_message: "c".to_string(),
            title: "t".to_string(),
            body: String::new(),
        };

        // Act
        registry.publish("after\n", &change).expect("publish");

        // Assert
        assert_eq!(registry.fetch().expect("fetch"), "after\n");
        assert_eq!(registry.published(), vec![change]);
    }
}
