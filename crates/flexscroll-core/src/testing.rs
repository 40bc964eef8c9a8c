//! Test doubles shared by unit tests

use std::sync::Mutex;
use std::time::Duration;

use crate::pagination::{LoadCallback, LoadDispatcher, LoadingFlag};
use crate::types::Direction;

/// Runs loads inline and keeps cooldowns until fired by hand
#[derive(Default)]
pub struct ManualDispatcher {
    pub loads: Mutex<Vec<Direction>>,
    pub clears: Mutex<Vec<(LoadingFlag, u64, Duration)>>,
}

impl ManualDispatcher {
    pub fn loads(&self) -> Vec<Direction> {
        self.loads.lock().unwrap().clone()
    }

    pub fn pending_clears(&self) -> usize {
        self.clears.lock().unwrap().len()
    }

    pub fn fire_clears(&self) {
        for (flag, episode, _) in self.clears.lock().unwrap().drain(..) {
            flag.finish(episode);
        }
    }
}

impl LoadDispatcher for ManualDispatcher {
    fn dispatch(&self, direction: Direction, load: LoadCallback) {
        self.loads.lock().unwrap().push(direction);
        load(direction);
    }

    fn clear_after(&self, flag: LoadingFlag, episode: u64, delay: Duration) {
        self.clears.lock().unwrap().push((flag, episode, delay));
    }
}

