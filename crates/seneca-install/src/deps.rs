//! The dependency set handed to the package manager.

/// Dependencies every new service gets, in install order.
pub const BASE_DEPENDENCIES: [&str; 6] = [
    // Base
    "seneca",
    "seneca-balance-client",
    // Testing
    "code",
    "lab",
    // Logging
    "pino",
    "seneca-pino-adapter",
];

/// Dependencies whose exact installed versions are relaxed to caret ranges.
pub const RUNTIME_DEPENDENCIES: [&str; 4] =
    ["seneca", "seneca-balance-client", "pino", "seneca-pino-adapter"];

/// An insertion-ordered set of install arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: Vec<String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The base dependencies followed by `package`.
    pub fn with_base(package: impl Into<String>) -> Self {
        let mut set = Self::new();
        for dep in BASE_DEPENDENCIES {
            set.insert(dep);
        }
        set.insert(package);
        set
    }

    /// Append a dependency. Returns `false` if it was already present.
    pub fn insert(&mut self, dep: impl Into<String>) -> bool {
        let dep = dep.into();
        if self.entries.contains(&dep) {
            return false;
        }
        self.entries.push(dep);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
