//! Simulated login session.
//!
//! Two independent flags are persisted next to the collections: the comment
//! author ("logged in with GitHub") and the admin flag guarding post editing.
//! Neither is real authentication. Callers load a [`Session`] once and pass
//! it to whatever needs it.

use lumina_kv::{KvStore, KvStoreExt};
use tracing::info;

use crate::error::StoreError;
use crate::model::User;

/// Key holding the logged-in comment author.
pub const CURRENT_USER_KEY: &str = "lumina_current_user";
/// Key holding the admin flag.
pub const ADMIN_KEY: &str = "lumina_is_admin";

/// Session context for the current reader/author.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Logged-in comment author, if any.
    pub user: Option<User>,
    /// Whether the admin area is unlocked.
    pub admin: bool,
}

impl Session {
    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the admin area is unlocked.
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

/// The mock account every guest login produces.
#[must_use]
pub fn guest_user() -> User {
    User {
        name: "Guest User".to_owned(),
        username: "guest_dev".to_owned(),
        avatar: "https://ui-avatars.com/api/?name=Guest+User&background=0D1117&color=fff"
            .to_owned(),
    }
}

/// Persists the [`Session`] in a [`KvStore`].
pub struct SessionStore<S> {
    store: S,
}

impl<S: KvStore> SessionStore<S> {
    /// Create a session store over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the current session.
    pub fn load(&self) -> Result<Session, StoreError> {
        Ok(Session {
            user: self.store.get_json(CURRENT_USER_KEY)?,
            admin: self.store.get_json(ADMIN_KEY)?.unwrap_or(false),
        })
    }

    /// Log in as `user`, replacing any previous user.
    pub fn login(&self, user: &User) -> Result<(), StoreError> {
        self.store.set_json(CURRENT_USER_KEY, user)?;
        info!(username = %user.username, "logged in");
        Ok(())
    }

    /// Log in as the mock guest account and return it.
    pub fn login_guest(&self) -> Result<User, StoreError> {
        let user = guest_user();
        self.login(&user)?;
        Ok(user)
    }

    /// Log the comment author out.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(CURRENT_USER_KEY)?;
        info!("logged out");
        Ok(())
    }

    /// Unlock the admin area if `password` equals `expected`.
    ///
    /// Returns whether the admin flag is now set. A wrong password leaves the
    /// stored flag untouched.
    pub fn login_admin(&self, password: &str, expected: &str) -> Result<bool, StoreError> {
        if password != expected {
            return Ok(false);
        }
        self.store.set_json(ADMIN_KEY, &true)?;
        info!("admin logged in");
        Ok(true)
    }

    /// Lock the admin area.
    pub fn logout_admin(&self) -> Result<(), StoreError> {
        self.store.remove(ADMIN_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_kv::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_session() {
        let sessions = SessionStore::new(MemoryStore::new());
        assert_eq!(sessions.load().unwrap(), Session::default());
    }

    #[test]
    fn test_guest_login_and_logout() {
        let sessions = SessionStore::new(MemoryStore::new());
        let user = sessions.login_guest().unwrap();
        assert_eq!(user.username, "guest_dev");
        assert_eq!(sessions.load().unwrap().user(), Some(&user));

        sessions.logout().unwrap();
        assert_eq!(sessions.load().unwrap().user(), None);
    }

    #[test]
    fn test_admin_login_requires_matching_password() {
        let sessions = SessionStore::new(MemoryStore::new());
        assert!(!sessions.login_admin("wrong", "admin").unwrap());
        assert!(!sessions.load().unwrap().is_admin());

        assert!(sessions.login_admin("admin", "admin").unwrap());
        assert!(sessions.load().unwrap().is_admin());

        sessions.logout_admin().unwrap();
        assert!(!sessions.load().unwrap().is_admin());
    }

    #[test]
    fn test_user_and_admin_are_independent() {
        let sessions = SessionStore::new(MemoryStore::new());
        sessions.login_guest().unwrap();
        sessions.login_admin("pw", "pw").unwrap();
        sessions.logout().unwrap();

        let session = sessions.load().unwrap();
        assert!(session.user().is_none());
        assert!(session.is_admin());
    }
}
