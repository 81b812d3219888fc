use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::Rng;
use uuid::Uuid;

use crate::{
    dictionary::WordList,
    game::{GameError, Round},
    models::{Placement, RoundSnapshot, TargetRow, Tile},
};

/// Who keeps a session alive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOwner {
    /// Created over HTTP; removed by `DELETE` or the idle sweeper
    Api,
    /// Owned by an open WebSocket; removed when the socket closes
    Connection,
}

/// A player's session: at most one round in progress
#[derive(Debug)]
pub struct GameSession {
    pub session_id: Uuid,
    pub owner: SessionOwner,
    pub round: Option<Round>,
    pub last_active: Instant,
}

impl GameSession {
    pub fn new(owner: SessionOwner) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            owner,
            round: None,
            last_active: Instant::now(),
        }
    }

    /// Replace the current round (and its placement history) with a new one
    pub fn start_round(
        &mut self,
        words: &WordList,
        rng: &mut impl Rng,
    ) -> Result<&Round, GameError> {
        let round = Round::deal(words, rng)?;
        tracing::info!("Session {} started a new round", self.session_id);
        Ok(self.round.insert(round))
    }

    pub fn place(&mut self, row: TargetRow) -> Result<Tile, GameError> {
        self.round_mut()?.place(row)
    }

    /// `Ok(None)` when there is nothing to undo
    pub fn undo(&mut self) -> Result<Option<Placement>, GameError> {
        Ok(self.round_mut()?.undo())
    }

    pub fn snapshot(&self) -> Result<RoundSnapshot, GameError> {
        self.round
            .as_ref()
            .map(|round| round.snapshot(self.session_id))
            .ok_or(GameError::NoRoundInProgress)
    }

    pub fn round(&self) -> Result<&Round, GameError> {
        self.round.as_ref().ok_or(GameError::NoRoundInProgress)
    }

    fn round_mut(&mut self) -> Result<&mut Round, GameError> {
        self.round.as_mut().ok_or(GameError::NoRoundInProgress)
    }

    /// Only API sessions expire; connection sessions live as long as their socket
    pub fn is_idle_for(&self, max_idle: Duration) -> bool {
        self.owner == SessionOwner::Api && self.last_active.elapsed() >= max_idle
    }
}

/// All live sessions keyed by session id
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, GameSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new empty session and return its id
    pub fn create(&self, owner: SessionOwner) -> Uuid {
        let session = GameSession::new(owner);
        let session_id = session.session_id;
        self.sessions.insert(session_id, session);
        tracing::debug!("Created {:?} session {}", owner, session_id);
        session_id
    }

    /// Run `f` against a session, marking it active.
    ///
    /// The map entry stays locked while `f` runs, so `f` must not await.
    pub fn with_session<T>(
        &self,
        session_id: Uuid,
        f: impl FnOnce(&mut GameSession) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mut session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(GameError::SessionNotFound(session_id))?;
        session.last_active = Instant::now();
        f(session.value_mut())
    }

    pub fn remove(&self, session_id: Uuid) -> bool {
        self.sessions.remove(&session_id).is_some()
    }

    pub fn contains(&self, session_id: Uuid) -> bool {
        self.sessions.contains_key(&session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop API sessions idle for at least `max_idle`, returning their ids
    pub fn evict_idle(&self, max_idle: Duration) -> Vec<Uuid> {
        let mut evicted = Vec::new();
        self.sessions.retain(|session_id, session| {
            if session.is_idle_for(max_idle) {
                evicted.push(*session_id);
                false
            } else {
                true
            }
        });
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sample_words() -> WordList {
        WordList::from_text("about\ntiger\nlemon\n", 5)
    }

    #[test]
    fn test_new_session_has_no_round() {
        let mut session = GameSession::new(SessionOwner::Api);
        assert_eq!(session.snapshot().unwrap_err(), GameError::NoRoundInProgress);
        assert_eq!(
            session.place(TargetRow::Word1),
            Err(GameError::NoRoundInProgress)
        );
        assert_eq!(session.undo(), Err(GameError::NoRoundInProgress));
    }

    #[test]
    fn test_start_round_resets_history() {
        let words = sample_words();
        let mut rng = StdRng::seed_from_u64(21);
        let mut session = GameSession::new(SessionOwner::Api);

        session.start_round(&words, &mut rng).unwrap();
        session.place(TargetRow::Word1).unwrap();
        session.place(TargetRow::Word2).unwrap();
        assert!(session.snapshot().unwrap().can_undo);

        session.start_round(&words, &mut rng).unwrap();
        let snapshot = session.snapshot().unwrap();
        assert!(!snapshot.can_undo);
        assert_eq!(snapshot.remaining, 10);
        assert_eq!(session.undo(), Ok(None));
    }

    #[test]
    fn test_start_round_without_words_keeps_session_usable() {
        let mut session = GameSession::new(SessionOwner::Api);
        let result = session.start_round(&WordList::empty(5), &mut StdRng::seed_from_u64(1));
        assert!(matches!(
            result,
            Err(GameError::NotEnoughWords { available: 0 })
        ));
        assert!(session.round().is_err());
    }

    #[test]
    fn test_place_all_then_undo_once() {
        let words = sample_words();
        let mut session = GameSession::new(SessionOwner::Api);
        session
            .start_round(&words, &mut StdRng::seed_from_u64(4))
            .unwrap();

        for i in 0..10 {
            let row = if i % 2 == 0 {
                TargetRow::Word1
            } else {
                TargetRow::Word2
            };
            session.place(row).unwrap();
        }
        let before = session.snapshot().unwrap();
        assert!(before.complete);
        assert!(before.solution.is_some());

        let undone = session.undo().unwrap().unwrap();
        assert_eq!(undone.row, TargetRow::Word2);

        let after = session.snapshot().unwrap();
        assert_eq!(after.remaining, 1);
        assert_eq!(after.word1_row.len(), 5);
        assert_eq!(after.word2_row.len(), 4);
        assert_eq!(after.top_letter, Some(undone.tile.letter));
    }

    #[test]
    fn test_store_create_and_remove() {
        let store = SessionStore::new();
        let session_id = store.create(SessionOwner::Api);
        assert!(store.contains(session_id));
        assert_eq!(store.len(), 1);

        assert!(store.remove(session_id));
        assert!(!store.remove(session_id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_unknown_session() {
        let store = SessionStore::new();
        let missing = Uuid::new_v4();
        let result = store.with_session(missing, |session| session.snapshot());
        assert_eq!(result.unwrap_err(), GameError::SessionNotFound(missing));
    }

    #[test]
    fn test_store_runs_closure_on_session() {
        let store = SessionStore::new();
        let words = sample_words();
        let session_id = store.create(SessionOwner::Api);

        let snapshot = store
            .with_session(session_id, |session| {
                session.start_round(&words, &mut StdRng::seed_from_u64(2))?;
                session.snapshot()
            })
            .unwrap();
        assert_eq!(snapshot.session_id, session_id);
        assert_eq!(snapshot.remaining, 10);
    }

    #[test]
    fn test_evict_idle_sessions() {
        let store = SessionStore::new();
        let first = store.create(SessionOwner::Api);
        let second = store.create(SessionOwner::Api);

        assert!(store.evict_idle(Duration::from_secs(3600)).is_empty());
        assert_eq!(store.len(), 2);

        let mut evicted = store.evict_idle(Duration::ZERO);
        evicted.sort();
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(evicted, expected);
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict_idle_keeps_connection_sessions() {
        let store = SessionStore::new();
        let words = sample_words();
        let api = store.create(SessionOwner::Api);
        let connection = store.create(SessionOwner::Connection);

        let evicted = store.evict_idle(Duration::ZERO);
        assert_eq!(evicted, vec![api]);
        assert!(store.contains(connection));

        let snapshot = store
            .with_session(connection, |session| {
                session.start_round(&words, &mut StdRng::seed_from_u64(6))?;
                session.snapshot()
            })
            .unwrap();
        assert_eq!(snapshot.session_id, connection);
    }
}
