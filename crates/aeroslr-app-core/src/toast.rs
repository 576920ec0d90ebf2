// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Toast queue with TTL + dedupe, plus a bounded history the Console panel
//! reads after toasts have faded.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational note.
    Info,
    /// Warning that may need attention.
    Warn,
    /// Error requiring user awareness.
    Error,
}

impl ToastKind {
    /// Short uppercase tag used in console lines.
    pub fn tag(self) -> &'static str {
        match self {
            ToastKind::Info => "INFO",
            ToastKind::Warn => "WARN",
            ToastKind::Error => "ERROR",
        }
    }
}

/// Identifier for a toast entry.
pub type ToastId = u64;

/// Toast data stored in the service.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Stable identifier.
    pub id: ToastId,
    /// Severity.
    pub kind: ToastKind,
    /// Short title line.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// Time-to-live duration.
    pub ttl: Duration,
    /// Creation time (refreshed when a duplicate is pushed).
    pub created: Instant,
}

/// Rendering-friendly view of a live toast.
#[derive(Debug, Clone)]
pub struct ToastRender {
    /// Stable identifier.
    pub id: ToastId,
    /// Severity.
    pub kind: ToastKind,
    /// Short title line.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// 1.0 -> just created, 0.0 -> expired.
    pub progress: f32,
}

/// In-memory toast queue with TTL, dedupe window and history.
pub struct ToastService {
    queue: VecDeque<Toast>,
    history: VecDeque<Toast>,
    max: usize,
    history_max: usize,
    dedupe_window: Duration,
    next_id: ToastId,
}

impl ToastService {
    /// Create a queue holding at most `max` live toasts and `history_max`
    /// past ones.
    pub fn new(max: usize, history_max: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            history: VecDeque::new(),
            max: max.max(1),
            history_max,
            dedupe_window: Duration::from_millis(500),
            next_id: 1,
        }
    }

    /// Push a toast, deduping identical recent entries (same kind/title/body
    /// within the dedupe window). A deduped push refreshes the existing
    /// toast's TTL and is not added to the history again.
    pub fn push<S, B>(
        &mut self,
        kind: ToastKind,
        title: S,
        body: B,
        ttl: Duration,
        now: Instant,
    ) -> ToastId
    where
        S: Into<String>,
        B: Into<Option<String>>,
    {
        let title = title.into();
        let body = body.into();

        if let Some(existing) = self.queue.iter_mut().find(|t| {
            t.kind == kind
                && t.title == title
                && t.body == body
                && now.saturating_duration_since(t.created) <= self.dedupe_window
        }) {
            existing.created = now;
            existing.ttl = ttl;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        let toast = Toast {
            id,
            kind,
            title,
            body,
            ttl,
            created: now,
        };
        if self.history_max > 0 {
            if self.history.len() == self.history_max {
                self.history.pop_front();
            }
            self.history.push_back(toast.clone());
        }
        if self.queue.len() == self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(toast);
        id
    }

    /// Drop expired toasts (call once per frame).
    pub fn retain_visible(&mut self, now: Instant) {
        self.queue
            .retain(|t| now.saturating_duration_since(t.created) < t.ttl);
    }

    /// Return render-ready live toasts with progress ratios.
    pub fn visible(&self, now: Instant) -> Vec<ToastRender> {
        self.queue
            .iter()
            .filter(|t| now.saturating_duration_since(t.created) < t.ttl)
            .map(|t| {
                let age = now.saturating_duration_since(t.created).as_secs_f32();
                let ttl = t.ttl.as_secs_f32().max(f32::EPSILON);
                ToastRender {
                    id: t.id,
                    kind: t.kind,
                    title: t.title.clone(),
                    body: t.body.clone(),
                    progress: (1.0 - age / ttl).clamp(0.0, 1.0),
                }
            })
            .collect()
    }

    /// Every toast pushed so far, oldest first, bounded by `history_max`.
    pub fn history(&self) -> impl Iterator<Item = &Toast> {
        self.history.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn duplicate_within_window_refreshes_instead_of_adding() {
        let t0 = Instant::now();
        let mut svc = ToastService::new(8, 8);
        let a = svc.push(ToastKind::Warn, "font", None, secs(4), t0);
        let b = svc.push(
            ToastKind::Warn,
            "font",
            None,
            secs(4),
            t0 + Duration::from_millis(100),
        );
        assert_eq!(a, b);
        assert_eq!(svc.visible(t0).len(), 1);
        assert_eq!(svc.history().count(), 1);
    }

    #[test]
    fn expired_toasts_leave_queue_but_stay_in_history() {
        let t0 = Instant::now();
        let mut svc = ToastService::new(8, 8);
        svc.push(ToastKind::Info, "saved", None, secs(1), t0);
        svc.retain_visible(t0 + secs(2));
        assert!(svc.visible(t0 + secs(2)).is_empty());
        assert_eq!(svc.history().count(), 1);
    }

    #[test]
    fn queue_and_history_are_bounded() {
        let t0 = Instant::now();
        let mut svc = ToastService::new(2, 3);
        for i in 0..5 {
            svc.push(ToastKind::Info, format!("t{i}"), None, secs(10), t0);
        }
        let live: Vec<_> = svc.visible(t0).into_iter().map(|t| t.title).collect();
        assert_eq!(live, vec!["t3", "t4"]);
        let past: Vec<_> = svc.history().map(|t| t.title.as_str()).collect();
        assert_eq!(past, vec!["t2", "t3", "t4"]);
    }

    #[test]
    fn progress_runs_from_one_to_zero() {
        let t0 = Instant::now();
        let mut svc = ToastService::new(4, 0);
        svc.push(ToastKind::Error, "boom", None, secs(4), t0);
        let fresh = svc.visible(t0);
        approx::assert_relative_eq!(fresh[0].progress, 1.0);
        let half = svc.visible(t0 + secs(2));
        approx::assert_relative_eq!(half[0].progress, 0.5, epsilon = 1e-4);
    }
}
