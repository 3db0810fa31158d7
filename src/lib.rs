//! Personal finance reporting: turns a user's income and expense records into
//! category breakdowns, monthly series and headline totals.

pub mod actors;
pub mod engine;
pub mod ingest;
pub mod models;
pub mod session;
pub mod storage;
pub mod types;
