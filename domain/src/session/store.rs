//! In-memory session store.
//!
//! [`SessionStore`] keeps every session of the running UI in creation order
//! together with the *active* pointer. It is owned by a single controller and
//! mutated through `&mut self`, so no locking is involved.
//!
//! # Invariant
//!
//! If the active pointer is set, it names a session present in the store.
//! Deleting the active session clears the pointer; [`SessionStore::ensure_active`]
//! repairs that state by creating a fresh session.

use super::entities::Session;
use super::id::SessionId;
use super::title::sidebar_label;
use crate::core::error::DomainError;

/// One row of the session list as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    /// 1-based position in the list (newest first)
    pub position: usize,
    pub id: SessionId,
    /// Title shortened for display
    pub label: String,
    pub is_active: bool,
}

/// Every session of the UI plus the active pointer
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    active: Option<SessionId>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the default title and make it active.
    pub fn create_session(&mut self) -> SessionId {
        let id = SessionId::generate();
        self.sessions.push(Session::new(id.clone()));
        self.active = Some(id.clone());
        id
    }

    /// Point the active pointer at `id`.
    pub fn select_session(&mut self, id: &SessionId) -> Result<(), DomainError> {
        if self.index_of(id).is_none() {
            return Err(DomainError::SessionNotFound(id.clone()));
        }
        self.active = Some(id.clone());
        Ok(())
    }

    /// Remove a session. Returns `true` if it was the active one, in which
    /// case the active pointer is now cleared.
    pub fn delete_session(&mut self, id: &SessionId) -> Result<bool, DomainError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| DomainError::SessionNotFound(id.clone()))?;
        self.sessions.remove(index);

        let was_active = self.active.as_ref() == Some(id);
        if was_active {
            self.active = None;
        }
        Ok(was_active)
    }

    /// Recreate an active session when the pointer is cleared.
    ///
    /// Returns the id of the session created, if one was needed.
    pub fn ensure_active(&mut self) -> Option<SessionId> {
        if self.active.is_some() {
            return None;
        }
        Some(self.create_session())
    }

    /// Title the session after its first user prompt (no-op afterwards).
    pub fn rename_on_first_turn(&mut self, id: &SessionId, prompt: &str) -> Result<(), DomainError> {
        self.get_mut(id)?.rename_on_first_turn(prompt);
        Ok(())
    }

    pub fn append_user_turn(
        &mut self,
        id: &SessionId,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.get_mut(id)?.add_user_turn(content);
        Ok(())
    }

    pub fn append_assistant_turn(
        &mut self,
        id: &SessionId,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.get_mut(id)?.add_assistant_turn(content)
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn active_id(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    /// The session list: newest first, sessions without turns hidden.
    pub fn sidebar(&self) -> Vec<SidebarEntry> {
        self.sessions
            .iter()
            .rev()
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(i, s)| SidebarEntry {
                position: i + 1,
                id: s.id().clone(),
                label: sidebar_label(s.title()),
                is_active: self.active.as_ref() == Some(s.id()),
            })
            .collect()
    }

    /// Resolve user input to a session id.
    ///
    /// Accepts a 1-based sidebar position, a full id, or an unambiguous id
    /// prefix.
    pub fn resolve(&self, selector: &str) -> Option<SessionId> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }

        // Positions win; an all-digit selector may still be an id prefix.
        if let Ok(position) = selector.parse::<usize>()
            && let Some(entry) = self
                .sidebar()
                .into_iter()
                .find(|entry| entry.position == position)
        {
            return Some(entry.id);
        }

        let id = SessionId::from(selector);
        if self.get(&id).is_some() {
            return Some(id);
        }

        let mut matches = self
            .sessions
            .iter()
            .filter(|s| s.id().as_str().starts_with(selector));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.id().clone()),
            _ => None,
        }
    }

    fn index_of(&self, id: &SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| s.id() == id)
    }

    fn get_mut(&mut self, id: &SessionId) -> Result<&mut Session, DomainError> {
        self.sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| DomainError::SessionNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_pointer_valid(store: &SessionStore) {
        if let Some(id) = store.active_id() {
            assert!(store.get(id).is_some(), "active pointer dangles: {}", id);
        }
    }

    #[test]
    fn create_makes_session_active() {
        let mut store = SessionStore::new();
        assert!(store.active().is_none());

        let id = store.create_session();
        assert_eq!(store.active_id(), Some(&id));
        assert_eq!(store.active().unwrap().title(), "New Chat");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn select_unknown_id_is_rejected() {
        let mut store = SessionStore::new();
        let id = store.create_session();
        let err = store.select_session(&SessionId::from("nope")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.active_id(), Some(&id));
    }

    #[test]
    fn delete_active_clears_pointer_then_ensure_recreates() {
        let mut store = SessionStore::new();
        let only = store.create_session();

        assert!(store.delete_session(&only).unwrap());
        assert!(store.active_id().is_none());
        assert!(store.is_empty());

        let fresh = store.ensure_active().expect("a session is recreated");
        assert_ne!(fresh, only);
        assert_eq!(store.active_id(), Some(&fresh));
        assert!(store.active().unwrap().is_empty());
        assert_eq!(store.ensure_active(), None);
    }

    #[test]
    fn delete_inactive_keeps_pointer() {
        let mut store = SessionStore::new();
        let first = store.create_session();
        let second = store.create_session();

        assert!(!store.delete_session(&first).unwrap());
        assert_eq!(store.active_id(), Some(&second));
        assert!(store.delete_session(&first).is_err());
    }

    #[test]
    fn pointer_stays_valid_for_any_action_sequence() {
        let mut store = SessionStore::new();
        store.create_session();

        // Deterministic pseudo-random walk over create/select/delete
        let mut seed: u64 = 0x5eed;
        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let ids: Vec<SessionId> = store.iter().map(|s| s.id().clone()).collect();
            let pick = if ids.is_empty() {
                None
            } else {
                Some(ids[(seed >> 33) as usize % ids.len()].clone())
            };

            match (seed >> 61) % 3 {
                0 => {
                    store.create_session();
                }
                1 => {
                    if let Some(id) = pick {
                        store.select_session(&id).unwrap();
                    }
                }
                _ => {
                    if let Some(id) = pick {
                        store.delete_session(&id).unwrap();
                        if store.is_empty() {
                            store.ensure_active();
                            assert_eq!(store.len(), 1);
                        }
                    }
                }
            }
            assert_pointer_valid(&store);
        }
    }

    #[test]
    fn sidebar_is_newest_first_and_hides_empty_sessions() {
        let mut store = SessionStore::new();
        let a = store.create_session();
        store.rename_on_first_turn(&a, "First conversation").unwrap();
        store.append_user_turn(&a, "First conversation").unwrap();

        let b = store.create_session();
        store
            .rename_on_first_turn(&b, "A much longer second conversation title")
            .unwrap();
        store
            .append_user_turn(&b, "A much longer second conversation title")
            .unwrap();

        let _empty = store.create_session();

        let sidebar = store.sidebar();
        assert_eq!(sidebar.len(), 2);
        assert_eq!(sidebar[0].id, b);
        assert_eq!(sidebar[0].position, 1);
        assert_eq!(sidebar[0].label, "A much longer sec...");
        assert_eq!(sidebar[1].id, a);
        assert_eq!(sidebar[1].label, "First conversation");
        assert!(sidebar.iter().all(|e| !e.is_active));
    }

    #[test]
    fn resolve_accepts_position_id_and_prefix() {
        let mut store = SessionStore::new();
        let a = store.create_session();
        store.append_user_turn(&a, "hi").unwrap();

        assert_eq!(store.resolve("1"), Some(a.clone()));
        assert_eq!(store.resolve("123456789"), None);
        assert_eq!(store.resolve(a.as_str()), Some(a.clone()));
        assert_eq!(store.resolve(&a.as_str()[..8]), Some(a.clone()));
        assert_eq!(store.resolve(""), None);
        assert_eq!(store.resolve("zzzz-not-an-id"), None);
    }

    #[test]
    fn resolve_falls_back_to_numeric_id_prefix() {
        let mut store = SessionStore::new();
        let id = SessionId::from("12345678-9abc-4def-8123-456789abcdef");
        store.sessions.push(Session::new(id.clone()));
        store.append_user_turn(&id, "hi").unwrap();

        assert_eq!(store.resolve("1"), Some(id.clone()));
        assert_eq!(store.resolve("12345678"), Some(id.clone()));
        assert_eq!(store.resolve("9"), None);
    }

    #[test]
    fn turn_mutations_reject_unknown_session() {
        let mut store = SessionStore::new();
        let ghost = SessionId::from("ghost");
        assert!(store.append_user_turn(&ghost, "x").is_err());
        assert!(store.append_assistant_turn(&ghost, "x").is_err());
        assert!(store.rename_on_first_turn(&ghost, "x").is_err());
    }
}
