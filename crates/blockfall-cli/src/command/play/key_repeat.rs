use std::time::{Duration, Instant};

use blockfall_engine::Intent;
use crossterm::event::KeyCode;

/// Repeat intervals for held keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RepeatConfig {
    pub(crate) horizontal_interval: Duration,
    pub(crate) soft_drop_interval: Duration,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            horizontal_interval: Duration::from_millis(125),
            soft_drop_interval: Duration::from_millis(50),
        }
    }
}

/// Keys that keep firing while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RepeatKey {
    Left,
    Right,
    Down,
}

impl RepeatKey {
    const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Down];

    pub(crate) fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Down => Some(Self::Down),
            _ => None,
        }
    }

    pub(crate) fn intent(self) -> Intent {
        match self {
            Self::Left => Intent::MoveLeft,
            Self::Right => Intent::MoveRight,
            Self::Down => Intent::SoftDrop,
        }
    }

    fn interval(self, config: &RepeatConfig) -> Duration {
        match self {
            Self::Left | Self::Right => config.horizontal_interval,
            Self::Down => config.soft_drop_interval,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held-key state for the movement keys.
///
/// A press fires once. While the key stays held, it fires again every time
/// its interval has passed since the last accepted firing. A sideways move
/// that fails keeps the old timestamp, so it is retried on the next poll; a
/// soft drop always restarts the interval.
#[derive(Debug, Clone)]
pub(crate) struct KeyRepeat {
    config: RepeatConfig,
    last_fired: [Option<Instant>; 3],
}

impl KeyRepeat {
    pub(crate) fn new(config: RepeatConfig) -> Self {
        Self {
            config,
            last_fired: [None; 3],
        }
    }

    /// Fires `key` once and starts tracking it as held.
    ///
    /// `apply` performs the intent and reports whether it succeeded.
    pub(crate) fn press<F>(&mut self, key: RepeatKey, now: Instant, apply: F)
    where
        F: FnOnce(Intent) -> bool,
    {
        apply(key.intent());
        self.last_fired[key.index()] = Some(now);
    }

    pub(crate) fn release(&mut self, key: RepeatKey) {
        self.last_fired[key.index()] = None;
    }

    pub(crate) fn release_all(&mut self) {
        self.last_fired = [None; 3];
    }

    /// Fires every held key whose interval has passed.
    pub(crate) fn poll<F>(&mut self, now: Instant, mut apply: F)
    where
        F: FnMut(Intent) -> bool,
    {
        for key in RepeatKey::ALL {
            let slot = &mut self.last_fired[key.index()];
            let Some(last) = *slot else {
                continue;
            };
            if now.saturating_duration_since(last) < key.interval(&self.config) {
                continue;
            }
            let succeeded = apply(key.intent());
            if succeeded || key == RepeatKey::Down {
                *slot = Some(now);
            }
        }
    }
}
