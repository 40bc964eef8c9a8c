//! Simulated page source for the demo
//!
//! Items are consecutive integers. A load sleeps for the configured latency
//! (it runs on a blocking thread) and then grows the list.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use flexscroll_core::config::{DemoConfig, Growth};
use flexscroll_core::Direction;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PageLoader {
    items: Arc<Mutex<VecDeque<i64>>>,
    page_size: usize,
    growth: Growth,
    latency: Duration,
}

impl PageLoader {
    pub fn new(config: &DemoConfig) -> Self {
        let items = (0..config.initial_items as i64).collect();
        Self {
            items: Arc::new(Mutex::new(items)),
            page_size: config.page_size,
            growth: config.growth,
            latency: Duration::from_millis(config.load_latency_ms),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<i64>> {
        // A panicking load leaves the list itself intact
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Copy of the current items
    pub fn snapshot(&self) -> Vec<i64> {
        self.lock().iter().copied().collect()
    }

    /// Load one page for `direction`, blocking for the simulated latency
    pub fn load(&self, direction: Direction) {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        self.grow(direction);
    }

    fn grow(&self, direction: Direction) {
        let mut items = self.lock();
        match self.growth {
            Growth::End => append(&mut items, self.page_size),
            Growth::Both => {
                prepend(&mut items, self.page_size);
                append(&mut items, self.page_size);
            }
        }
        info!(%direction, count = items.len(), "Page loaded");
    }
}

fn append(items: &mut VecDeque<i64>, count: usize) {
    let next = items.back().map_or(0, |last| last + 1);
    items.extend((0..count as i64).map(|i| next + i));
}

fn prepend(items: &mut VecDeque<i64>, count: usize) {
    let first = items.front().copied().unwrap_or(0);
    for i in 1..=count as i64 {
        items.push_front(first - i);
    }
}
