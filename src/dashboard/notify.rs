//! Transient notifications
//!
//! [`Notifier`] is a single slot: posting replaces whatever is showing and
//! reschedules the clear. [`CopiedMarks`] tracks the short-lived "copied"
//! flag per application, independently of the slot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::client::models::AppId;

/// How long a notification stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// How long an application shows as "copied"
pub const COPIED_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

#[derive(Default)]
struct Slot {
    current: Option<Notification>,
    generation: u64,
    clear_task: Option<JoinHandle<()>>,
}

/// Single-slot notification channel with automatic expiry.
///
/// Each post bumps a generation and aborts the previous clear task, and a
/// clear task only empties the slot if its generation is still current, so
/// an older timer can never remove a newer message.
#[derive(Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
        }
    }

    pub async fn success(&self, message: impl Into<String>) -> Notification {
        self.post(message.into(), NotificationKind::Success).await
    }

    pub async fn error(&self, message: impl Into<String>) -> Notification {
        self.post(message.into(), NotificationKind::Error).await
    }

    async fn post(&self, message: String, kind: NotificationKind) -> Notification {
        let mut slot = self.slot.lock().await;

        slot.generation += 1;
        if let Some(previous) = slot.clear_task.take() {
            previous.abort();
        }

        let notification = Notification {
            message,
            kind,
            expires_at: Instant::now() + self.ttl,
        };
        debug!("Notification ({:?}): {}", kind, notification.message);
        slot.current = Some(notification.clone());

        let generation = slot.generation;
        let deadline = notification.expires_at;
        let shared = Arc::clone(&self.slot);
        slot.clear_task = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut slot = shared.lock().await;
            if slot.generation == generation {
                slot.current = None;
                slot.clear_task = None;
            }
        }));

        notification
    }

    /// The notification currently showing, if it has not expired.
    pub async fn current(&self) -> Option<Notification> {
        let slot = self.slot.lock().await;
        slot.current
            .as_ref()
            .filter(|n| n.expires_at > Instant::now())
            .cloned()
    }

    /// Remove the current notification immediately.
    #[allow(dead_code)]
    pub async fn dismiss(&self) {
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        slot.current = None;
        if let Some(task) = slot.clear_task.take() {
            task.abort();
        }
    }
}

#[derive(Default)]
struct Marks {
    next_generation: u64,
    active: HashMap<AppId, (u64, JoinHandle<()>)>,
}

/// Per-application "copied" flags, each with its own timer.
#[derive(Clone)]
pub struct CopiedMarks {
    marks: Arc<Mutex<Marks>>,
    ttl: Duration,
}

impl Default for CopiedMarks {
    fn default() -> Self {
        Self::with_ttl(COPIED_TTL)
    }
}

impl CopiedMarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            marks: Arc::new(Mutex::new(Marks::default())),
            ttl,
        }
    }

    /// Flag `id` as copied, restarting its timer if it already was.
    pub async fn mark(&self, id: &AppId) {
        let mut marks = self.marks.lock().await;
        marks.next_generation += 1;
        let generation = marks.next_generation;

        let shared = Arc::clone(&self.marks);
        let key = id.clone();
        let ttl = self.ttl;
        let task = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut marks = shared.lock().await;
            if marks.active.get(&key).is_some_and(|(g, _)| *g == generation) {
                marks.active.remove(&key);
            }
        });

        if let Some((_, previous)) = marks.active.insert(id.clone(), (generation, task)) {
            previous.abort();
        }
    }

    #[allow(dead_code)]
    pub async fn is_marked(&self, id: &AppId) -> bool {
        self.marks.lock().await.active.contains_key(id)
    }
}
