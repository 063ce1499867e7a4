/// Single account: balance, credential and transaction log.
/// Balance changes are validated into events first, then applied.
pub mod account;

/// Salted one-way credential digests.
pub mod credential;

/// Registry that owns every account, keyed by account number.
pub mod ledger;

/// Amount parsing and the two display formats used at the boundary.
pub mod money;

/// Two-account transfers, all or nothing.
///
/// NOTE: the trait has a single in-memory implementation on [`ledger::Ledger`],
/// it is kept as the seam for a ledger that needs per-account locking.
pub mod transfer;

/// User and admin authentication plus dispatch to the ledger.
pub mod session;

/// Bulk load/save of the whole ledger.
pub mod persistence;

/// Command line configuration.
pub mod config;

/// Interactive menu driving a session. Lives in the library so the
/// integration tests can run it against scripted input.
pub mod bin_utils;
