//! Test registry - ordered mapping of test name to test procedure

use std::fmt;

/// Outcome of a test procedure. Any error converts with `?`.
pub type TestResult = anyhow::Result<()>;

/// A zero-argument test procedure
pub type TestProcedure = Box<dyn FnOnce() -> TestResult>;

/// A named test procedure
pub struct TestCase {
    name: String,
    procedure: TestProcedure,
}

impl TestCase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, TestProcedure) {
        (self.name, self.procedure)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}

/// Ordered collection of uniquely named tests.
///
/// Tests run in insertion order. Inserting a name that is already present
/// replaces its procedure and keeps its original position.
#[derive(Default)]
pub struct TestRegistry {
    tests: Vec<TestCase>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a test, builder style
    pub fn with_test<F>(mut self, name: impl Into<String>, procedure: F) -> Self
    where
        F: FnOnce() -> TestResult + 'static,
    {
        self.insert(name, procedure);
        self
    }

    /// Add a test, or replace the procedure of an existing one in place
    pub fn insert<F>(&mut self, name: impl Into<String>, procedure: F)
    where
        F: FnOnce() -> TestResult + 'static,
    {
        let name = name.into();
        let procedure: TestProcedure = Box::new(procedure);

        match self.tests.iter_mut().find(|test| test.name == name) {
            Some(existing) => existing.procedure = procedure,
            None => self.tests.push(TestCase { name, procedure }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tests.iter().any(|test| test.name == name)
    }

    /// Test names in execution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(TestCase::name)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl IntoIterator for TestRegistry {
    type Item = TestCase;
    type IntoIter = std::vec::IntoIter<TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.tests.into_iter()
    }
}

impl fmt::Debug for TestRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Build a [`TestRegistry`] from `name => procedure` pairs.
///
/// ```
/// use tinytest::prelude::*;
///
/// let registry = registry! {
///     "adds" => || Ok(eq(4, 2 + 2)?),
///     "is truthy" => || Ok(assert("x", "non-empty string")?),
/// };
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["adds", "is truthy"]);
/// ```
#[macro_export]
macro_rules! registry {
    () => {
        $crate::TestRegistry::new()
    };
    ($($name:expr => $procedure:expr),+ $(,)?) => {{
        let mut registry = $crate::TestRegistry::new();
        $(registry.insert($name, $procedure);)+
        registry
    }};
}
