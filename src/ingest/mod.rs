mod reader;

pub use reader::{load_transactions, IngestOutcome, InputFormat, TransactionLoader};
