use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};

use crate::command::CommandParser;
use crate::config::Config;
use crate::embedding::Vectorizer;
use crate::filter::{Filter, FilterMeta, FilterStore};
use crate::scoring::AttentionScorer;

use super::batcher::Batcher;
use super::error::EngineError;
use super::pass;
use super::session::SessionState;
use super::types::{Candidate, CommandOutcome, Decision, PassReport};

enum Message {
    Ingest(Vec<Candidate>),
    Command {
        line: String,
        reply: oneshot::Sender<Result<CommandOutcome, EngineError>>,
    },
    RemoveFilter {
        index: usize,
        reply: oneshot::Sender<Result<PassReport, EngineError>>,
    },
    ClearFilters {
        reply: oneshot::Sender<Result<PassReport, EngineError>>,
    },
    Filters {
        reply: oneshot::Sender<Vec<FilterMeta>>,
    },
    Flush {
        reply: oneshot::Sender<PassReport>,
    },
    Shutdown,
}

/// Single-writer actor owning all mutable feed state.
///
/// The actor task holds the session, the batch buffer, and the active filter
/// list; every mutation and query arrives through its mailbox. Sequential
/// message handling makes "at most one pass in flight" and "drain atomic with
/// trigger" structural facts: posts arriving during a pass wait in the mailbox
/// and join the next buffer, and a filter mutation (parse, persist, commit,
/// re-score) completes before the next command is read.
pub struct FeedCoordinator {
    session: SessionState,
    batcher: Batcher,
    filters: Vec<Filter>,
    parser: CommandParser,
    scorer: AttentionScorer,
    store: Arc<dyn FilterStore>,
    decisions: mpsc::UnboundedSender<Decision>,
    reports: watch::Sender<PassReport>,
    pass_seq: u64,
}

impl FeedCoordinator {
    /// Spawns the coordinator task, restoring any persisted filters.
    ///
    /// Query vectors are rebuilt from the saved query text; a failing load is
    /// logged and degrades to an empty filter list. Returns the clonable handle
    /// and the decision stream (one element per known post per pass).
    pub async fn spawn(
        config: Config,
        store: Arc<dyn FilterStore>,
    ) -> (FeedHandle, UnboundedReceiverStream<Decision>) {
        let vectorizer = Vectorizer::new();
        let parser = CommandParser::new(
            vectorizer.clone(),
            config.hide_threshold,
            config.show_top_k,
        );
        let scorer = AttentionScorer::new(vectorizer.clone());

        let filters: Vec<Filter> = match store.load().await {
            Ok(metas) => {
                let filters: Vec<Filter> = metas
                    .into_iter()
                    .map(|meta| Filter::from_meta(meta, &vectorizer))
                    .collect();
                if !filters.is_empty() {
                    info!(count = filters.len(), "Restored persisted filters");
                }
                filters
            }
            Err(e) => {
                warn!(error = %e, "Failed to load filter snapshot, starting empty");
                Vec::new()
            }
        };

        let (mailbox_tx, mailbox_rx) = mpsc::channel(config.channel_capacity);
        let (decisions_tx, decisions_rx) = mpsc::unbounded_channel();
        let (reports_tx, reports_rx) = watch::channel(PassReport::default());

        let coordinator = Self {
            session: SessionState::new(),
            batcher: Batcher::new(config.batch_size, config.debounce()),
            filters,
            parser,
            scorer,
            store,
            decisions: decisions_tx,
            reports: reports_tx,
            pass_seq: 0,
        };

        tokio::spawn(coordinator.run(mailbox_rx));

        (
            FeedHandle {
                mailbox: mailbox_tx,
                reports: reports_rx,
            },
            UnboundedReceiverStream::new(decisions_rx),
        )
    }

    async fn run(mut self, mut mailbox: mpsc::Receiver<Message>) {
        loop {
            let received = match self.batcher.deadline() {
                Some(deadline) => {
                    tokio::select! {
                        message = mailbox.recv() => message,
                        _ = time::sleep_until(deadline) => {
                            debug!(pending = self.batcher.len(), "Idle debounce elapsed");
                            self.drain_and_pass();
                            continue;
                        }
                    }
                }
                None => mailbox.recv().await,
            };

            match received {
                Some(Message::Shutdown) | None => break,
                Some(message) => self.handle(message).await,
            }
        }
        debug!("Feed coordinator stopped");
    }

    async fn handle(&mut self, message: Message) {
        match message {
            Message::Ingest(candidates) => self.ingest(candidates),
            Message::Command { line, reply } => {
                let _ = reply.send(self.apply_command(&line).await);
            }
            Message::RemoveFilter { index, reply } => {
                let _ = reply.send(self.remove_filter(index).await);
            }
            Message::ClearFilters { reply } => {
                let _ = reply.send(self.clear_filters().await);
            }
            Message::Filters { reply } => {
                let _ = reply.send(self.filters.iter().map(Filter::meta).collect());
            }
            Message::Flush { reply } => {
                let _ = reply.send(self.drain_and_pass());
            }
            Message::Shutdown => unreachable!("handled by the run loop"),
        }
    }

    fn ingest(&mut self, candidates: Vec<Candidate>) {
        let mut added = 0usize;
        for candidate in candidates {
            // Arrival-time dedup: duplicates within one ingest are dropped too.
            if !self.session.mark_seen(&candidate.id) {
                continue;
            }
            self.batcher.push(candidate.into());
            added += 1;

            if self.batcher.is_full() {
                debug!(pending = self.batcher.len(), "Batch size reached");
                self.drain_and_pass();
            }
        }

        if added > 0 && !self.batcher.is_empty() {
            debug!(added, pending = self.batcher.len(), "Buffered new posts");
        }
    }

    async fn apply_command(&mut self, line: &str) -> Result<CommandOutcome, EngineError> {
        let Some(filter) = self.parser.parse(line)? else {
            return Ok(CommandOutcome::Ignored);
        };

        let meta = filter.meta();
        // Persist-then-commit: a store failure must not leave a half-constructed
        // filter in the active list.
        let mut metas: Vec<FilterMeta> = self.filters.iter().map(Filter::meta).collect();
        metas.push(meta.clone());
        self.store.save(&metas).await?;
        self.filters.push(filter);

        info!(query = %meta.query, mode = ?meta.mode, "Filter added");
        let report = self.drain_and_pass();
        Ok(CommandOutcome::Applied { filter: meta, report })
    }

    async fn remove_filter(&mut self, index: usize) -> Result<PassReport, EngineError> {
        if index >= self.filters.len() {
            return Err(EngineError::UnknownFilter { index });
        }

        let mut metas: Vec<FilterMeta> = self.filters.iter().map(Filter::meta).collect();
        metas.remove(index);
        self.store.save(&metas).await?;
        let removed = self.filters.remove(index);

        info!(query = %removed.query, index, "Filter removed");
        Ok(self.drain_and_pass())
    }

    async fn clear_filters(&mut self) -> Result<PassReport, EngineError> {
        self.store.save(&[]).await?;
        let cleared = self.filters.len();
        self.filters.clear();

        info!(cleared, "All filters cleared");
        Ok(self.drain_and_pass())
    }

    /// Absorbs any buffered posts and re-evaluates all filters over all posts.
    fn drain_and_pass(&mut self) -> PassReport {
        let batch = self.batcher.drain();
        if !batch.is_empty() {
            self.session.absorb(batch);
        }

        self.pass_seq += 1;
        let (decisions, report) =
            pass::run_pass(&mut self.session, &self.filters, &self.scorer, self.pass_seq);

        // Fire-and-forget: a dropped consumer never blocks or aborts a pass.
        for decision in decisions {
            if self.decisions.send(decision).is_err() {
                debug!("Decision consumer dropped, discarding pass decisions");
                break;
            }
        }
        let _ = self.reports.send(report.clone());

        info!(
            seq = report.seq,
            total = report.total,
            hidden = report.hidden,
            filters = self.filters.len(),
            "Filtering pass complete"
        );
        report
    }
}

/// Clonable handle to a running [`FeedCoordinator`].
#[derive(Clone)]
pub struct FeedHandle {
    mailbox: mpsc::Sender<Message>,
    reports: watch::Receiver<PassReport>,
}

impl FeedHandle {
    /// Submits candidate posts for dedup, buffering, and eventual scoring.
    pub async fn ingest(&self, candidates: Vec<Candidate>) -> Result<(), EngineError> {
        self.mailbox
            .send(Message::Ingest(candidates))
            .await
            .map_err(|_| EngineError::Closed)
    }

    /// Applies a free-text filter command.
    pub async fn command(&self, line: &str) -> Result<CommandOutcome, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.mailbox
            .send(Message::Command {
                line: line.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| EngineError::Closed)?;
        reply_rx.await.map_err(|_| EngineError::Closed)?
    }

    /// Removes the filter at the given insertion index.
    pub async fn remove_filter(&self, index: usize) -> Result<PassReport, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.mailbox
            .send(Message::RemoveFilter {
                index,
                reply: reply_tx,
            })
            .await
            .map_err(|_| EngineError::Closed)?;
        reply_rx.await.map_err(|_| EngineError::Closed)?
    }

    /// Removes every active filter (next pass resets all posts to shown).
    pub async fn clear_filters(&self) -> Result<PassReport, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.mailbox
            .send(Message::ClearFilters { reply: reply_tx })
            .await
            .map_err(|_| EngineError::Closed)?;
        reply_rx.await.map_err(|_| EngineError::Closed)?
    }

    /// Returns the active filters as vector-free metadata, in insertion order.
    pub async fn filters(&self) -> Result<Vec<FilterMeta>, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.mailbox
            .send(Message::Filters { reply: reply_tx })
            .await
            .map_err(|_| EngineError::Closed)?;
        reply_rx.await.map_err(|_| EngineError::Closed)
    }

    /// Forces an immediate drain and pass without waiting out the debounce.
    pub async fn flush(&self) -> Result<PassReport, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.mailbox
            .send(Message::Flush { reply: reply_tx })
            .await
            .map_err(|_| EngineError::Closed)?;
        reply_rx.await.map_err(|_| EngineError::Closed)
    }

    /// Stops the coordinator task. Later calls on any handle return
    /// [`EngineError::Closed`].
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.mailbox
            .send(Message::Shutdown)
            .await
            .map_err(|_| EngineError::Closed)
    }

    /// Watch channel carrying the latest [`PassReport`].
    pub fn reports(&self) -> watch::Receiver<PassReport> {
        self.reports.clone()
    }
}

impl std::fmt::Debug for FeedHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedHandle")
            .field("last_report", &*self.reports.borrow())
            .finish()
    }
}
