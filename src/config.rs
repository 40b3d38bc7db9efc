use std::borrow::Cow;

/// Flask's default `SESSION_COOKIE_NAME`.
pub const DEFAULT_COOKIE_NAME: &str = "session";

#[derive(Debug, Clone)]
pub struct FlaskSessionConfig {
    pub(crate) name: Cow<'static, str>,
    pub(crate) secret_keys: Vec<Vec<u8>>,
    pub(crate) clear_on_reject: bool,
    pub(crate) max_cookie_bytes: usize,
}

impl Default for FlaskSessionConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.into(),
            secret_keys: Vec::new(),
            clear_on_reject: false,
            max_cookie_bytes: 4096,
        }
    }
}

impl FlaskSessionConfig {
    #[must_use]
    pub fn with_name<N: Into<Cow<'static, str>>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    /// Append a candidate secret. Secrets are tried in the order they were added.
    #[must_use]
    pub fn with_secret_key<K: Into<Vec<u8>>>(mut self, key: K) -> Self {
        self.secret_keys.push(key.into());
        self
    }

    #[must_use]
    pub fn with_secret_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Vec<u8>>,
    {
        self.secret_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_clear_on_reject(mut self, clear_on_reject: bool) -> Self {
        self.clear_on_reject = clear_on_reject;
        self
    }

    #[must_use]
    pub fn with_max_cookie_bytes(mut self, max_cookie_bytes: usize) -> Self {
        self.max_cookie_bytes = max_cookie_bytes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret_keys(&self) -> &[Vec<u8>] {
        &self.secret_keys
    }

    /// Index of the first configured secret that verifies `cookie`.
    pub fn matching_key(&self, cookie: &crate::FlaskCookie) -> Option<usize> {
        self.secret_keys
            .iter()
            .position(|key| cookie.verify(key))
    }
}
