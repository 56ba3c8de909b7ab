/// Route table for the application shell
///
/// A single screen is mounted today; the table exists so the shell has
/// one place to grow when more screens arrive.

/// Screens the shell can mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// The achievement form
    #[default]
    Home,
}

impl Route {
    /// Resolve a path to a route; unmatched paths resolve to nothing and
    /// the shell falls back to the default screen
    pub fn parse(path: &str) -> Option<Route> {
        match path {
            "/" => Some(Route::Home),
            _ => None,
        }
    }

    /// Canonical path for this route
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_mounts_home() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
    }

    #[test]
    fn test_unknown_paths_do_not_resolve() {
        assert_eq!(Route::parse("/achievements"), None);
        assert_eq!(Route::parse(""), None);
    }

    #[test]
    fn test_paths_round_trip() {
        assert_eq!(Route::parse(Route::Home.path()), Some(Route::Home));
    }
}
