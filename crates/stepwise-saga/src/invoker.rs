use std::collections::HashMap;

use crate::error::{BoxError, RegistryError};

/// Looks up and runs migration methods by name.
///
/// This is the only seam between the [`crate::Migrator`] and whatever the
/// methods actually do.
pub trait MethodInvoker {
    /// Whether a method with this name exists.
    ///
    /// Must be free of side effects; it is called once per listed method
    /// before anything runs, and again for each compensating method during
    /// rollback.
    fn is_valid(&self, method: &str) -> bool;

    /// Run the named method.
    ///
    /// # Errors
    ///
    /// Returns whatever error the method reports. The migrator does not
    /// interpret it beyond propagating it.
    fn invoke(&self, method: &str) -> Result<(), BoxError>;
}

impl<T: MethodInvoker + ?Sized> MethodInvoker for &T {
    fn is_valid(&self, method: &str) -> bool {
        (**self).is_valid(method)
    }

    fn invoke(&self, method: &str) -> Result<(), BoxError> {
        (**self).invoke(method)
    }
}

/// A single named migration method.
pub trait MigrationMethod {
    /// # Errors
    ///
    /// Returns an error if the method fails.
    fn run(&self) -> Result<(), BoxError>;
}

impl<F> MigrationMethod for F
where
    F: Fn() -> Result<(), BoxError>,
{
    fn run(&self) -> Result<(), BoxError> {
        self()
    }
}

/// In-memory [`MethodInvoker`] mapping names to [`MigrationMethod`]s.
#[derive(Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Box<dyn MigrationMethod>>,
}

impl MethodRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateMethod` if the name is taken.
    pub fn register<M>(&mut self, name: impl Into<String>, method: M) -> Result<(), RegistryError>
    where
        M: MigrationMethod + 'static,
    {
        let name = name.into();
        if self.methods.contains_key(&name) {
            return Err(RegistryError::DuplicateMethod(name));
        }
        self.methods.insert(name, Box::new(method));
        Ok(())
    }

    /// Register a closure under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateMethod` if the name is taken.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, method: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Result<(), BoxError> + 'static,
    {
        self.register(name, method)
    }

    /// Builder form of [`Self::register`].
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateMethod` if the name is taken.
    pub fn with_method<M>(mut self, name: impl Into<String>, method: M) -> Result<Self, RegistryError>
    where
        M: MigrationMethod + 'static,
    {
        self.register(name, method)?;
        Ok(self)
    }

    /// Builder form of [`Self::register_fn`].
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateMethod` if the name is taken.
    pub fn with_fn<F>(self, name: impl Into<String>, method: F) -> Result<Self, RegistryError>
    where
        F: Fn() -> Result<(), BoxError> + 'static,
    {
        self.with_method(name, method)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl MethodInvoker for MethodRegistry {
    fn is_valid(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    fn invoke(&self, method: &str) -> Result<(), BoxError> {
        match self.methods.get(method) {
            Some(m) => m.run(),
            None => Err(format!("method '{method}' is not registered").into()),
        }
    }
}
