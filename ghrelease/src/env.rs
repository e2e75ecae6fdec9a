use std::collections::HashMap;

/// Read access to environment variables.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;

    /// Boolean options are true only for the literal value `"true"`.
    fn flag(&self, key: &str) -> bool {
        self.var(key).as_deref() == Some("true")
    }

    /// Value of `key`, with an empty string for unset variables.
    fn string(&self, key: &str) -> String {
        self.var(key).unwrap_or_default()
    }
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
