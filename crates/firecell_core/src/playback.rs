//! Stepping through stored states at simulation speed

use std::sync::Arc;

use firecell_model::State;
use firecell_storage::StateProvider;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayingMode {
    #[default]
    Forward,
    Paused,
    Backward,
}

/// Replays states from a [`StateProvider`], one per `step_time` seconds
///
/// The next index only moves once the provider has actually returned the
/// state for it, so a playback that catches up with a running engine simply
/// waits for the next state to appear.
pub struct Playback {
    provider: Arc<dyn StateProvider>,
    step_time: f64,
    mode: PlayingMode,
    next_index: u64,
    since_update: f64,
    current: Option<(u64, State)>,
}

impl Playback {
    pub fn new(provider: Arc<dyn StateProvider>, step_time: f64) -> Self {
        Self {
            provider,
            step_time,
            mode: PlayingMode::Forward,
            next_index: 0,
            since_update: 0.0,
            current: None,
        }
    }

    pub fn mode(&self) -> PlayingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PlayingMode) {
        if mode != self.mode {
            log::info!("Playing mode set to {:?}", mode);
        }
        self.mode = mode;
    }

    /// Index of the state that will be requested next
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Jump so the next update requests `index`
    pub fn seek(&mut self, index: u64) {
        self.next_index = index;
        self.since_update = self.step_time;
    }

    /// Last state received, with its index
    pub fn current(&self) -> Option<(u64, &State)> {
        self.current.as_ref().map(|(index, state)| (*index, state))
    }

    /// Advance the clock by `delta` seconds
    ///
    /// Returns true when a new state was received.
    pub fn update(&mut self, delta: f64) -> bool {
        self.since_update += delta;
        if self.since_update < self.step_time {
            return false;
        }
        self.since_update = 0.0;

        log::debug!("Requesting state {}", self.next_index);
        let Some(state) = self.provider.get_state(self.next_index) else {
            return false;
        };
        self.current = Some((self.next_index, state));

        match self.mode {
            PlayingMode::Forward => self.next_index += 1,
            PlayingMode::Backward => self.next_index = self.next_index.saturating_sub(1),
            PlayingMode::Paused => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firecell_math::IVec3;
    use firecell_storage::{InMemoryStorage, StateConsumer};

    fn storage_with(count: u64) -> Arc<InMemoryStorage> {
        let storage = Arc::new(InMemoryStorage::new());
        for index in 0..count {
            let size = IVec3::new(1, 1, index as i32 + 1);
            storage.put_state(State::empty(size).unwrap(), index).unwrap();
        }
        storage
    }

    fn shown(playback: &Playback) -> Option<u64> {
        playback.current().map(|(index, _)| index)
    }

    #[test]
    fn test_waits_for_step_time() {
        let mut playback = Playback::new(storage_with(3), 0.5);
        assert!(!playback.update(0.25));
        assert!(shown(&playback).is_none());
        assert!(playback.update(0.25));
        assert_eq!(shown(&playback), Some(0));
        assert_eq!(playback.next_index(), 1);
    }

    #[test]
    fn test_forward_stops_at_missing_state() {
        let mut playback = Playback::new(storage_with(2), 0.1);
        assert!(playback.update(0.1));
        assert!(playback.update(0.1));
        assert!(!playback.update(0.1));
        assert_eq!(shown(&playback), Some(1));
        assert_eq!(playback.next_index(), 2);
    }

    #[test]
    fn test_backward_never_below_zero() {
        let mut playback = Playback::new(storage_with(3), 0.1);
        playback.seek(1);
        playback.set_mode(PlayingMode::Backward);
        assert!(playback.update(0.0));
        assert_eq!(shown(&playback), Some(1));
        assert!(playback.update(0.1));
        assert_eq!(shown(&playback), Some(0));
        assert!(playback.update(0.1));
        assert_eq!(playback.next_index(), 0);
        assert_eq!(shown(&playback), Some(0));
    }

    #[test]
    fn test_paused_keeps_index() {
        let mut playback = Playback::new(storage_with(3), 0.1);
        playback.set_mode(PlayingMode::Paused);
        assert!(playback.update(0.1));
        assert!(playback.update(0.1));
        assert_eq!(playback.next_index(), 0);
        assert_eq!(shown(&playback), Some(0));
    }

    #[test]
    fn test_picks_up_states_that_arrive_later() {
        let storage = storage_with(1);
        let mut playback = Playback::new(storage.clone(), 0.1);
        assert!(playback.update(0.1));
        assert!(!playback.update(0.1));

        storage.put_state(State::empty(IVec3::ONE).unwrap(), 1).unwrap();
        assert!(playback.update(0.1));
        assert_eq!(shown(&playback), Some(1));
    }
}
