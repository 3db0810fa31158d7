use std::sync::Arc;

use chrono::NaiveDate;
use tokio::spawn;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::actors::errors::ViewError;
use crate::engine::{build_report, Report, ReportQuery};
use crate::models::Transaction;
use crate::storage::{StoreError, TransactionStore};
use crate::types::{OwnerId, TransactionId};

enum Command {
    Refresh,
    SetQuery(ReportQuery),
    Upsert(Transaction),
    Remove(TransactionId),
    Report(oneshot::Sender<Report>),
    Snapshot(oneshot::Sender<Vec<Transaction>>),
    Settled(oneshot::Sender<()>)
}

type Fetched = (u64, Result<Vec<Transaction>, StoreError>);

/// A live report over one owner's transactions.
///
/// The view task owns the collection and the active query. At most one fetch
/// is outstanding: starting a new refresh aborts the fetch still in flight.
pub struct ReportView {
    sender: mpsc::UnboundedSender<Command>,
    handle: JoinHandle<()>
}

impl ReportView {
    /// Spawns the view task. The collection starts empty until [`ReportView::refresh`] is called.
    pub fn spawn<S: TransactionStore>(store: Arc<S>, owner_id: OwnerId, today: NaiveDate) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Command>();
        let (fetch_sender, mut fetch_receiver) = mpsc::unbounded_channel::<Fetched>();

        let handle = spawn(async move {
            let mut state = ViewState {
                store,
                owner_id,
                today,
                fetch_sender,
                query: ReportQuery::default(),
                transactions: Vec::new(),
                generation: 0,
                completed: 0,
                fetch: None,
                waiters: Vec::new()
            };

            loop {
                tokio::select! {
                    command = receiver.recv() => match command {
                        Some(command) => state.handle(command),
                        None => break
                    },
                    Some((generation, result)) = fetch_receiver.recv() => state.apply_fetch(generation, result)
                }
            }

            state.cancel_fetch();
            debug!("Report view for owner [{}] stopped", state.owner_id);
        });

        Self { sender, handle }
    }

    /// Starts a fresh fetch from the store, superseding any pending one.
    pub fn refresh(&self) -> Result<(), ViewError> {
        self.send(Command::Refresh)
    }

    pub fn set_query(&self, query: ReportQuery) -> Result<(), ViewError> {
        self.send(Command::SetQuery(query))
    }

    /// Inserts or replaces a transaction after the store confirmed the mutation.
    pub fn upsert(&self, transaction: Transaction) -> Result<(), ViewError> {
        self.send(Command::Upsert(transaction))
    }

    pub fn remove(&self, id: impl Into<TransactionId>) -> Result<(), ViewError> {
        self.send(Command::Remove(id.into()))
    }

    /// Recomputes the report over the current collection and query.
    pub async fn report(&self) -> Result<Report, ViewError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Report(reply))?;
        response.await.map_err(|_| ViewError::Closed)
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>, ViewError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        response.await.map_err(|_| ViewError::Closed)
    }

    /// Resolves once the most recent refresh has landed (or failed).
    pub async fn settled(&self) -> Result<(), ViewError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Settled(reply))?;
        response.await.map_err(|_| ViewError::Closed)
    }

    /// Stops the view task and waits for it to finish.
    pub async fn shutdown(self) -> Result<(), ViewError> {
        drop(self.sender);
        self.handle.await?;
        Ok(())
    }

    fn send(&self, command: Command) -> Result<(), ViewError> {
        self.sender.send(command).map_err(|_| ViewError::Closed)
    }
}

struct ViewState<S> {
    store: Arc<S>,
    owner_id: OwnerId,
    today: NaiveDate,
    fetch_sender: mpsc::UnboundedSender<Fetched>,
    query: ReportQuery,
    transactions: Vec<Transaction>,
    /// Generation of the latest requested fetch.
    generation: u64,
    /// Generation of the latest fetch that landed.
    completed: u64,
    fetch: Option<JoinHandle<()>>,
    waiters: Vec<oneshot::Sender<()>>
}

impl<S: TransactionStore> ViewState<S> {
    fn handle(&mut self, command: Command) {
        match command {
            Command::Refresh => self.start_fetch(),
            Command::SetQuery(query) => self.query = query,
            Command::Upsert(transaction) => {
                match self.transactions.iter_mut().find(|existing| existing.id == transaction.id) {
                    Some(existing) => *existing = transaction,
                    None => self.transactions.push(transaction)
                }
            }
            Command::Remove(id) => self.transactions.retain(|transaction| transaction.id != id),
            Command::Report(reply) => {
                let _ = reply.send(build_report(&self.transactions, &self.query, self.today));
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.transactions.clone());
            }
            Command::Settled(reply) => {
                if self.completed == self.generation {
                    let _ = reply.send(());
                } else {
                    self.waiters.push(reply);
                }
            }
        }
    }

    fn start_fetch(&mut self) {
        self.cancel_fetch();
        self.generation += 1;

        let generation = self.generation;
        let store = self.store.clone();
        let owner_id = self.owner_id.clone();
        let fetch_sender = self.fetch_sender.clone();

        self.fetch = Some(spawn(async move {
            let result = store.list(&owner_id).await;
            let _ = fetch_sender.send((generation, result));
        }));
    }

    fn cancel_fetch(&mut self) {
        if let Some(fetch) = self.fetch.take() {
            if !fetch.is_finished() {
                debug!("Aborting fetch {} for owner [{}]", self.generation, self.owner_id);
            }

            fetch.abort();
        }
    }

    fn apply_fetch(&mut self, generation: u64, result: Result<Vec<Transaction>, StoreError>) {
        if generation != self.generation {
            debug!("Discarding superseded fetch {generation} for owner [{}] (current {})", self.owner_id, self.generation);
            return;
        }

        match result {
            Ok(transactions) => {
                debug!("Fetched {} transactions for owner [{}]", transactions.len(), self.owner_id);
                self.transactions = transactions;
            }
            Err(error) => warn!("Fetching transactions for owner [{}] failed: {error}", self.owner_id)
        }

        self.completed = generation;

        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(());
        }
    }
}
