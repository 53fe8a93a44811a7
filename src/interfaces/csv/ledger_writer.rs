use crate::domain::owner::Owner;
use crate::domain::ports::Transfer;
use crate::domain::user::User;
use crate::error::Result;
use std::io::Write;

/// Writes the ledger state as CSV.
///
/// Owners, users and transfers are written as separate tables, each with its
/// own header and separated by a blank line. Owners and users are sorted by
/// account so the output does not depend on registry iteration order.
pub struct LedgerWriter<W: Write> {
    writer: W,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_report(
        &mut self,
        owners: Vec<Owner>,
        users: Vec<User>,
        transfers: &[Transfer],
    ) -> Result<()> {
        self.write_owners(owners)?;
        writeln!(self.writer)?;
        self.write_users(users)?;
        writeln!(self.writer)?;
        self.write_transfers(transfers)
    }

    pub fn write_owners(&mut self, mut owners: Vec<Owner>) -> Result<()> {
        owners.sort_by(|a, b| a.account.cmp(&b.account));
        let mut wtr = table_writer(&mut self.writer);
        wtr.write_record(["id", "account", "name", "description", "available", "price"])?;
        for owner in owners {
            wtr.serialize(owner)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_users(&mut self, mut users: Vec<User>) -> Result<()> {
        users.sort_by(|a, b| a.account.cmp(&b.account));
        let mut wtr = table_writer(&mut self.writer);
        wtr.write_record(["id", "account", "name", "has_rented"])?;
        for user in users {
            wtr.serialize(user)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Transfers keep journal order. Amounts are in yocto.
    pub fn write_transfers(&mut self, transfers: &[Transfer]) -> Result<()> {
        let mut wtr = table_writer(&mut self.writer);
        wtr.write_record(["receiver", "amount"])?;
        for transfer in transfers {
            wtr.write_record([transfer.receiver.as_str(), &transfer.amount.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

// Headers are written by hand so empty tables still get one.
fn table_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer)
}
