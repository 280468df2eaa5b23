use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Ordered lookup roots used to resolve named resources.
///
/// The standalone analog of a classpath: `resolve` walks the roots in order
/// and returns the first entry that exists. Names are accepted with or without
/// a single leading separator; absence is `None`, never an error.
#[derive(Clone, Debug, Default)]
pub struct ResourceScope {
    roots: Arc<Vec<PathBuf>>,
}

impl ResourceScope {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: Arc::new(roots.into_iter().map(Into::into).collect()),
        }
    }

    fn normalize(name: &str) -> &str {
        name.strip_prefix('/').unwrap_or(name)
    }

    /// Locate a named resource under the lookup roots.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let name = Self::normalize(name);
        self.roots
            .iter()
            .map(|root| root.join(name))
            .find(|candidate| candidate.exists())
    }

    /// Open a named resource for reading.
    pub fn open(&self, name: &str) -> Option<File> {
        self.resolve(name).and_then(|path| File::open(path).ok())
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn contains_root(&self, root: &Path) -> bool {
        self.roots.iter().any(|candidate| candidate == root)
    }
}

/// Slot naming the scope that resource lookups should use while a lifecycle
/// transition is in flight.
///
/// Owned by the runtime context rather than hidden in thread state; entering
/// swaps the slot and hands back a guard that restores the previous scope.
#[derive(Clone, Default)]
pub struct ScopeSlot {
    current: Arc<RwLock<Option<ResourceScope>>>,
}

impl ScopeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap `scope` in, returning a guard that restores the prior scope on
    /// drop — on every exit path, including failures during the guarded call.
    pub fn enter(&self, scope: ResourceScope) -> ScopeGuard {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(scope);
        ScopeGuard {
            slot: Arc::clone(&self.current),
            previous,
        }
    }

    pub fn current(&self) -> Option<ResourceScope> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Restores the scope slot it was created from when dropped.
#[must_use = "dropping the guard restores the previous scope immediately"]
pub struct ScopeGuard {
    slot: Arc<RwLock<Option<ResourceScope>>>,
    previous: Option<ResourceScope>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = self.previous.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("solistra-scope-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_resolves_with_and_without_leading_separator() {
        let dir = scratch_dir();
        fs::write(dir.join("application.conf"), "db.default.driver=h2").unwrap();

        let scope = ResourceScope::new([dir.clone()]);
        let bare = scope.resolve("application.conf");
        let slashed = scope.resolve("/application.conf");

        assert_eq!(bare, slashed);
        assert_eq!(bare, Some(dir.join("application.conf")));
        assert_eq!(scope.resolve("missing.conf"), None);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_roots_are_searched_in_order() {
        let first = scratch_dir();
        let second = scratch_dir();
        fs::write(first.join("shared.conf"), "first").unwrap();
        fs::write(second.join("shared.conf"), "second").unwrap();
        fs::write(second.join("only-second.conf"), "second").unwrap();

        let scope = ResourceScope::new([first.clone(), second.clone()]);
        assert_eq!(scope.resolve("shared.conf"), Some(first.join("shared.conf")));
        assert_eq!(
            scope.resolve("only-second.conf"),
            Some(second.join("only-second.conf"))
        );

        let _ = fs::remove_dir_all(first);
        let _ = fs::remove_dir_all(second);
    }

    #[test]
    fn test_open_reads_resource_bytes() {
        use std::io::Read;

        let dir = scratch_dir();
        fs::write(dir.join("data.txt"), "payload").unwrap();

        let scope = ResourceScope::new([dir.clone()]);
        let mut stream = scope.open("/data.txt").unwrap();
        let mut contents = String::new();
        stream.read_to_string(&mut contents).unwrap();

        assert_eq!(contents, "payload");
        assert!(scope.open("nope.txt").is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_guard_restores_previous_scope() {
        let slot = ScopeSlot::new();
        let outer = ResourceScope::new(["/outer"]);
        let inner = ResourceScope::new(["/inner"]);

        let outer_guard = slot.enter(outer);
        assert!(slot.current().unwrap().contains_root(Path::new("/outer")));

        {
            let _inner_guard = slot.enter(inner);
            assert!(slot.current().unwrap().contains_root(Path::new("/inner")));
        }

        assert!(slot.current().unwrap().contains_root(Path::new("/outer")));
        drop(outer_guard);
        assert!(slot.current().is_none());
    }
}
