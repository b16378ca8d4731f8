//! Session registry: the live, insertion-ordered set of participants.
//!
//! The registry is plain data. Exclusive access is provided by the hub that
//! owns it, which keeps registration, iteration and delivery in one critical
//! section.

use super::{entity::Participant, value_object::SessionId};

/// A registered participant together with its outbound side
#[derive(Debug)]
pub struct RegistryEntry<P> {
    pub participant: Participant,
    pub outlet: P,
}

/// Insertion-ordered registry keyed by [`SessionId`]
#[derive(Debug)]
pub struct SessionRegistry<P> {
    entries: Vec<RegistryEntry<P>>,
}

impl<P> Default for SessionRegistry<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P> SessionRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a participant. Returns `false` (and drops `outlet`) if the id is
    /// already registered.
    pub fn register(&mut self, participant: Participant, outlet: P) -> bool {
        if self.contains(participant.id) {
            return false;
        }
        self.entries.push(RegistryEntry {
            participant,
            outlet,
        });
        true
    }

    /// Remove the entry with `id`. Absent ids are a no-op.
    pub fn deregister(&mut self, id: SessionId) -> Option<RegistryEntry<P>> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.participant.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.entries.iter().any(|entry| entry.participant.id == id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut RegistryEntry<P>> {
        self.entries
            .iter_mut()
            .find(|entry| entry.participant.id == id)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RegistryEntry<P>> {
        self.entries.iter_mut()
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.entries
            .iter()
            .map(|entry| entry.participant.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Timestamp};
    use irori_shared::time::get_local_timestamp;

    fn participant(id: u64, name: &str) -> Participant {
        Participant::new(
            SessionId::new(id),
            DisplayName::from(name),
            Timestamp::new(get_local_timestamp()),
        )
    }

    fn names(registry: &SessionRegistry<()>) -> Vec<String> {
        registry
            .participants()
            .into_iter()
            .map(|p| p.name.into_string())
            .collect()
    }

    #[test]
    fn test_register_keeps_insertion_order() {
        // テスト項目: 登録順が保持される
        // given (前提条件):
        let mut registry = SessionRegistry::new();

        // when (操作):
        registry.register(participant(3, "charlie"), ());
        registry.register(participant(1, "alice"), ());
        registry.register(participant(2, "bob"), ());

        // then (期待する結果):
        assert_eq!(names(&registry), vec!["charlie", "alice", "bob"]);
    }

    #[test]
    fn test_register_same_session_twice_is_rejected() {
        // テスト項目: 同じセッション ID は二重登録されない
        // given (前提条件):
        let mut registry = SessionRegistry::new();
        assert!(registry.register(participant(1, "alice"), ()));

        // when (操作):
        let result = registry.register(participant(1, "alice"), ());

        // then (期待する結果):
        assert!(!result);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_name_different_sessions_are_distinct() {
        // テスト項目: 名前が同じでもセッション ID が異なれば別の参加者として扱われる
        // given (前提条件):
        let mut registry = SessionRegistry::new();
        registry.register(participant(1, "alice"), ());
        registry.register(participant(2, "alice"), ());

        // when (操作):
        let removed = registry.deregister(SessionId::new(1));

        // then (期待する結果):
        assert_eq!(removed.map(|e| e.participant.id), Some(SessionId::new(1)));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(SessionId::new(2)));
    }

    #[test]
    fn test_deregister_preserves_order_of_remaining() {
        // テスト項目: 途中の参加者を削除しても残りの順序は変わらない
        // given (前提条件):
        let mut registry = SessionRegistry::new();
        registry.register(participant(1, "alice"), ());
        registry.register(participant(2, "bob"), ());
        registry.register(participant(3, "charlie"), ());

        // when (操作):
        registry.deregister(SessionId::new(2));

        // then (期待する結果):
        assert_eq!(names(&registry), vec!["alice", "charlie"]);
    }

    #[test]
    fn test_deregister_absent_session_is_noop() {
        // テスト項目: 存在しないセッションの削除はエラーにならず何も起きない（冪等性）
        // given (前提条件):
        let mut registry = SessionRegistry::new();
        registry.register(participant(1, "alice"), ());
        registry.deregister(SessionId::new(1));

        // when (操作):
        let second = registry.deregister(SessionId::new(1));

        // then (期待する結果):
        assert!(second.is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_mut_returns_outlet() {
        // テスト項目: セッション ID で送信側を取得して書き換えられる
        // given (前提条件):
        let mut registry: SessionRegistry<Vec<String>> = SessionRegistry::new();
        registry.register(participant(1, "alice"), Vec::new());

        // when (操作):
        if let Some(entry) = registry.get_mut(SessionId::new(1)) {
            entry.outlet.push("hello\n".to_string());
        }

        // then (期待する結果):
        let outlets: Vec<Vec<String>> = registry
            .iter_mut()
            .map(|entry| entry.outlet.clone())
            .collect();
        assert_eq!(outlets, vec![vec!["hello\n".to_string()]]);
        assert!(registry.get_mut(SessionId::new(9)).is_none());
    }
}
