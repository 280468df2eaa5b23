use super::resources::ResourceScope;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

/// Environment tag attached to an application at construction.
///
/// Immutable for that instance's life; affects only logging in the runtime
/// context.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dev,
    #[default]
    Test,
    Prod,
}

/// Composes the filesystem root, resource-resolution scope, and mode of one
/// application instance.
#[derive(Clone, Debug)]
pub struct Environment {
    root_path: PathBuf,
    scope: ResourceScope,
    mode: Mode,
}

impl Environment {
    pub fn new(root_path: impl Into<PathBuf>, scope: ResourceScope, mode: Mode) -> Self {
        Self {
            root_path: root_path.into(),
            scope,
            mode,
        }
    }

    /// Environment rooted at `root` whose resource scope resolves against the
    /// same root.
    pub fn simple(root: impl Into<PathBuf>, mode: Mode) -> Self {
        let root = root.into();
        Self {
            scope: ResourceScope::new([root.clone()]),
            root_path: root,
            mode,
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn scope(&self) -> &ResourceScope {
        &self.scope
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mode_parses_case_insensitively() {
        assert_eq!(Mode::from_str("prod").unwrap(), Mode::Prod);
        assert_eq!(Mode::from_str("Dev").unwrap(), Mode::Dev);
        assert!(Mode::from_str("staging").is_err());
    }

    #[test]
    fn test_mode_displays_variant_name() {
        assert_eq!(Mode::Prod.to_string(), "Prod");
        assert_eq!(Mode::Test.to_string(), "Test");
    }

    #[test]
    fn test_simple_environment_scopes_to_root() {
        let environment = Environment::simple("/srv/app", Mode::Dev);
        assert_eq!(environment.root_path(), Path::new("/srv/app"));
        assert_eq!(environment.scope().roots(), [PathBuf::from("/srv/app")]);
        assert_eq!(environment.mode(), Mode::Dev);
    }
}
