use std::io::Write;

use serde::Serialize;

use crate::{ledger::AccountSummary, money};

const HEADER: [&str; 3] = ["Account Holder Name ", " Account Number ", " Balance"];

/// Cells carry their own padding so the single-byte delimiter renders as ` | `.
#[derive(Debug, Serialize)]
struct Row {
    holder_name: String,
    account_number: String,
    balance: String,
}

impl Row {
    fn new(acc: &AccountSummary) -> Self {
        Self {
            holder_name: format!("{} ", acc.holder_name),
            account_number: format!(" {} ", acc.account_number),
            balance: format!(" {}", money::display_balance(acc.balance)),
        }
    }
}

/// Writes the admin account listing as a ` | ` separated table with a header.
pub fn print_accounts<W>(output: &mut W, accounts: &[AccountSummary]) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .from_writer(output);
    if let Err(err) = writer.write_record(HEADER) {
        anyhow::bail!("Failed to write account table header: {err}")
    }
    for acc in accounts {
        if let Err(err) = writer.serialize(Row::new(acc)) {
            anyhow::bail!("Failed to write account table: {err}")
        }
    }
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush account table: {err}")
    }
    Ok(())
}
