//! Sequential episode ingestion.
//!
//! Episodes within one group must be persisted in arrival order so later
//! episodes can reference entities produced by earlier ones. Each group
//! gets an unbounded queue drained by a single worker task; `add_memory`
//! returns as soon as the episode is enqueued.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::{watch, Mutex};
use tracing::{error, info};

use crate::graph::{Episode, GraphStore};

struct GroupQueue {
    tx: UnboundedSender<Episode>,
    depth: Arc<watch::Sender<usize>>,
}

/// Per-group episode queues with one worker task each.
#[derive(Default)]
pub struct IngestQueue {
    groups: Mutex<HashMap<String, GroupQueue>>,
}

impl IngestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an episode for its group, spawning the group worker on first
    /// use. Returns the queue depth including this episode.
    pub async fn enqueue(&self, store: Arc<dyn GraphStore>, episode: Episode) -> usize {
        let group_id = episode.group_id.clone();
        let mut groups = self.groups.lock().await;

        let queue = groups.entry(group_id.clone()).or_insert_with(|| {
            let (tx, mut rx) = mpsc::unbounded_channel::<Episode>();
            let depth = Arc::new(watch::Sender::new(0usize));

            let worker_depth = Arc::clone(&depth);
            tokio::spawn(async move {
                info!("episode worker started for group {group_id}");
                while let Some(episode) = rx.recv().await {
                    let name = episode.name.clone();
                    if let Err(e) = store.add_episode(&episode).await {
                        error!("failed to persist episode {name:?}: {e}");
                    } else {
                        info!("episode {name:?} persisted");
                    }
                    worker_depth.send_modify(|d| *d = d.saturating_sub(1));
                }
            });

            GroupQueue { tx, depth }
        });

        queue.depth.send_modify(|d| *d += 1);
        // Send only fails if the worker task has gone away.
        if queue.tx.send(episode).is_err() {
            queue.depth.send_modify(|d| *d = d.saturating_sub(1));
            return 0;
        }
        let position = *queue.depth.borrow();
        position
    }

    /// Episodes still queued for a group.
    pub async fn pending(&self, group_id: &str) -> usize {
        let groups = self.groups.lock().await;
        groups
            .get(group_id)
            .map(|q| *q.depth.borrow())
            .unwrap_or(0)
    }

    /// Wait until a group's queue is empty.
    pub async fn join(&self, group_id: &str) {
        let depth = {
            let groups = self.groups.lock().await;
            match groups.get(group_id) {
                Some(q) => Arc::clone(&q.depth),
                None => return,
            }
        };
        let mut rx = depth.subscribe();
        // wait_for checks the current value before waiting, so a queue that
        // drained between subscribe and here is seen immediately.
        let _ = rx.wait_for(|d| *d == 0).await;
    }

    /// Wait until every group's queue is empty. Used at shutdown so queued
    /// episodes are not lost on stdin EOF.
    pub async fn join_all(&self) {
        let group_ids: Vec<String> = {
            let groups = self.groups.lock().await;
            groups.keys().cloned().collect()
        };
        for group_id in group_ids {
            self.join(&group_id).await;
        }
    }
}
