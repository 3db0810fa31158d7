use crate::models::{CsvRecord, Transaction, TransactionRecord};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, warn};

type Row = Result<TransactionRecord, String>;

/// Transactions recovered from a file, plus how many rows had to be dropped.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    pub transactions: Vec<Transaction>,
    pub skipped: usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    /// A JSON array of transaction records.
    Json
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv
        }
    }
}

/// Streams transaction records from disk into validated [`Transaction`]s.
pub struct TransactionLoader {
    backpressure: usize
}

impl TransactionLoader {
    pub fn new() -> Self {
        Self {
            backpressure: 256
        }
    }

    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Reads every record in `path`. Bad rows are logged and counted, never fatal;
    /// an unreadable file or a JSON document that is not an array is.
    pub async fn load(&self, path: impl AsRef<Path>) -> anyhow::Result<IngestOutcome> {
        let path = path.as_ref().to_path_buf();
        let format = InputFormat::from_path(&path);
        let (sender, receiver) = mpsc::channel::<Row>(self.backpressure);

        let reader_handle = spawn_reader(path.clone(), format, sender);
        let outcome = collect_transactions(receiver).await;

        reader_handle.await
            .context("Transaction reader task failed")?
            .with_context(|| format!("Could not read transactions from {}", path.display()))?;

        debug!("Loaded {} transactions from {} ({} skipped)", outcome.transactions.len(), path.display(), outcome.skipped);

        Ok(outcome)
    }
}

impl Default for TransactionLoader {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn load_transactions(path: impl AsRef<Path>) -> anyhow::Result<IngestOutcome> {
    TransactionLoader::new().load(path).await
}

fn spawn_reader(path: PathBuf, format: InputFormat, sender: mpsc::Sender<Row>) -> JoinHandle<anyhow::Result<()>> {
    spawn_blocking(move || {
        let file = File::open(&path)
            .with_context(|| format!("Error opening transactions at path: {}", path.display()))?;
        let reader = BufReader::new(file);

        match format {
            InputFormat::Csv => read_csv(reader, &sender),
            InputFormat::Json => read_json(reader, &sender)
        }
    })
}

fn read_csv(reader: BufReader<File>, sender: &mpsc::Sender<Row>) -> anyhow::Result<()> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    for result in reader.deserialize::<CsvRecord>() {
        let row = result
            .map(TransactionRecord::from)
            .map_err(|error| format!("CSV deserialization error: {error}"));

        if sender.blocking_send(row).is_err() {
            break;
        }
    }

    Ok(())
}

fn read_json(reader: BufReader<File>, sender: &mpsc::Sender<Row>) -> anyhow::Result<()> {
    let document: serde_json::Value = serde_json::from_reader(reader)?;

    let serde_json::Value::Array(values) = document else {
        bail!("Expected a JSON array of transactions");
    };

    for (position, value) in values.into_iter().enumerate() {
        let row = serde_json::from_value::<TransactionRecord>(value)
            .map_err(|error| format!("JSON deserialization error at element {position}: {error}"));

        if sender.blocking_send(row).is_err() {
            break;
        }
    }

    Ok(())
}

async fn collect_transactions(mut receiver: mpsc::Receiver<Row>) -> IngestOutcome {
    let mut outcome = IngestOutcome::default();
    let mut seen_ids = HashSet::new();

    while let Some(row) = receiver.recv().await {
        let record = match row {
            Ok(record) => record,
            Err(error) => {
                error!("{error}");
                outcome.skipped += 1;
                continue;
            }
        };

        match Transaction::try_from(record) {
            Ok(transaction) => {
                if !seen_ids.insert(transaction.id.clone()) {
                    warn!("Transaction id [{}] appears more than once", transaction.id);
                }

                outcome.transactions.push(transaction);
            }
            Err(error) => {
                warn!("Skipping record: {error}");
                outcome.skipped += 1;
            }
        }
    }

    outcome
}
