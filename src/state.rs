use std::time::{Duration, Instant};

use dashmap::DashMap;
use teloxide_core::types::UserId;

#[derive(Debug, Clone, Copy)]
struct UserMode {
    screaming: bool,
    last_seen: Instant,
}

/// Per-user screaming flag. Users without an entry are whispering.
///
/// Every accessor touches a single map entry, so concurrent handlers never
/// observe a torn update. Two updates from the same user may still be applied
/// in either order.
#[derive(Debug, Default)]
pub struct ScreamModes {
    users: DashMap<UserId, UserMode>,
}

impl ScreamModes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_screaming(&self, user_id: UserId, screaming: bool) {
        let now = Instant::now();
        self.users
            .entry(user_id)
            .and_modify(|mode| {
                mode.screaming = screaming;
                mode.last_seen = now;
            })
            .or_insert(UserMode {
                screaming,
                last_seen: now,
            });
    }

    pub fn is_screaming(&self, user_id: UserId) -> bool {
        match self.users.get_mut(&user_id) {
            Some(mut mode) => {
                mode.last_seen = Instant::now();
                mode.screaming
            }
            None => false,
        }
    }

    /// Drops users not seen since `cutoff`. Returns how many were dropped.
    pub fn evict_inactive_since(&self, cutoff: Instant) -> usize {
        let before = self.users.len();
        self.users.retain(|_, mode| mode.last_seen >= cutoff);
        before.saturating_sub(self.users.len())
    }

    pub fn evict_idle(&self, idle_timeout: Duration) -> usize {
        match Instant::now().checked_sub(idle_timeout) {
            Some(cutoff) => self.evict_inactive_since(cutoff),
            None => 0,
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

/// Periodically evicts idle users. Runs until the runtime shuts down.
pub async fn evict_idle_users(modes: &ScreamModes, idle_timeout: Duration) {
    let period = (idle_timeout / 2).max(Duration::from_secs(1));
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        let evicted = modes.evict_idle(idle_timeout);
        if evicted > 0 {
            log::debug!("evicted {evicted} idle users, {} remain", modes.user_count());
        }
    }
}
