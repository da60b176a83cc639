//! Deterministic credit-link allocation engine.
//!
//! `link-ledger` keeps categories of consumable links, each worth a fixed
//! number of points (halved for news categories), and builds reports: the
//! smallest set of unused links whose weighted value meets a target, with
//! the news share held between 40% and 60% when possible. Committing a
//! report marks its links used so they are never selected again.
//!
//! Selection is deterministic: the same registry and target always yield the
//! same links, in the same order.

pub mod ingest;
pub mod registry;
pub mod selection;
pub mod stats;
pub mod store;
pub mod types;
