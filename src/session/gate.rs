use super::user::{SessionUser, SESSION_USER_KEY};
use super::visibility::{self, PageDocument};

pub const DEFAULT_LOGIN_PATH: &str = "./login.html";
pub const DEFAULT_FORBIDDEN_PATH: &str = "./index.html";

/// Persistent key/value storage the session user is cached in.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn remove_item(&self, key: &str);
}

/// Moves the browsing context elsewhere.
pub trait Navigator {
    fn redirect(&self, location: &str);
}

impl<T: SessionStorage + ?Sized> SessionStorage for &T {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn redirect(&self, location: &str) {
        (**self).redirect(location)
    }
}

/// Redirect targets used by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOptions {
    pub login_path: String,
    pub forbidden_path: String,
}

impl Default for GateOptions {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            forbidden_path: DEFAULT_FORBIDDEN_PATH.to_string(),
        }
    }
}

/// Roles a page accepts: a single role or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedRoles(Vec<String>);

impl AllowedRoles {
    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|allowed| allowed == role)
    }
}

impl From<&str> for AllowedRoles {
    fn from(role: &str) -> Self {
        Self(vec![role.to_string()])
    }
}

impl From<String> for AllowedRoles {
    fn from(role: String) -> Self {
        Self(vec![role])
    }
}

impl From<Vec<String>> for AllowedRoles {
    fn from(roles: Vec<String>) -> Self {
        Self(roles)
    }
}

impl From<&[&str]> for AllowedRoles {
    fn from(roles: &[&str]) -> Self {
        Self(roles.iter().map(|r| r.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AllowedRoles {
    fn from(roles: [&str; N]) -> Self {
        Self(roles.iter().map(|r| r.to_string()).collect())
    }
}

/// Page-side auth helpers over the cached session user. Stateless: every
/// call re-reads storage. After any call that redirects, the caller is
/// expected to stop its own page logic.
#[derive(Debug, Clone)]
pub struct SessionGate<S, N> {
    storage: S,
    navigator: N,
    options: GateOptions,
}

impl<S: SessionStorage, N: Navigator> SessionGate<S, N> {
    pub fn new(storage: S, navigator: N) -> Self {
        Self {
            storage,
            navigator,
            options: GateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &GateOptions {
        &self.options
    }

    /// The stored user, or `None` when the key is missing or empty, the
    /// content is malformed, or no identity field is set. Never fails.
    pub fn current_user(&self) -> Option<SessionUser> {
        let raw = self.storage.get_item(SESSION_USER_KEY)?;
        if raw.is_empty() {
            return None;
        }

        match SessionUser::parse(&raw) {
            Ok(user) => user,
            Err(e) => {
                report_parse_failure(&e);
                None
            }
        }
    }

    /// The stored user, or redirect to the login page and return `None`.
    pub fn require_login(&self) -> Option<SessionUser> {
        match self.current_user() {
            Some(user) => Some(user),
            None => {
                tracing::debug!("No session user, redirecting to {}", self.options.login_path);
                self.navigator.redirect(&self.options.login_path);
                None
            }
        }
    }

    /// The stored user if their role (default `"user"`) is allowed.
    /// Redirects to login when there is no user and to the forbidden page
    /// when the role does not match.
    pub fn require_role(&self, allowed: impl Into<AllowedRoles>) -> Option<SessionUser> {
        let user = self.require_login()?;
        let allowed = allowed.into();

        if !user.effective_role().is_some_and(|role| allowed.contains(role)) {
            tracing::debug!(
                role = ?user.effective_role(),
                "Role not allowed, redirecting to {}",
                self.options.forbidden_path
            );
            self.navigator.redirect(&self.options.forbidden_path);
            return None;
        }

        Some(user)
    }

    /// Forget the cached user and go to the login page.
    pub fn logout(&self) {
        self.storage.remove_item(SESSION_USER_KEY);
        self.navigator.redirect(&self.options.login_path);
    }

    /// Hide role-marked elements the current user may not see. Returns the
    /// number of elements hidden.
    pub fn apply_role_visibility<D: PageDocument>(&self, document: &mut D) -> usize {
        visibility::apply_role_visibility(self.current_user().as_ref(), document)
    }
}

fn report_parse_failure(error: &serde_json::Error) {
    tracing::error!("Failed to parse user from local storage: {}", error);

    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&format!("Failed to parse user from localStorage: {error}").into());
}
