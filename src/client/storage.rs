use std::collections::HashMap;

/// Key under which the bearer token is kept.
pub const TOKEN_KEY: &str = "token";

/// String key/value storage scoped to one client session.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String);
    fn remove_item(&mut self, key: &str);

    /// The stored token, if it is present and non-empty.
    fn token(&self) -> Option<String> {
        self.get_item(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    fn set_token(&mut self, token: String) {
        self.set_item(TOKEN_KEY, token);
    }

    fn clear_token(&mut self) {
        self.remove_item(TOKEN_KEY);
    }

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Storage that lives exactly as long as the value does.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStorage {
    items: HashMap<String, String>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}
