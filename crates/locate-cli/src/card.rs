//! Ticket rendering shared by `show`, `list`, and the mutating commands.

use crate::output::{Renderable, pretty_kv, pretty_rule};
use locate_core::Record;
use std::io::{self, Write};

impl Renderable for Record {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  [{}]  {} priority",
            self.id,
            self.status.as_str(),
            self.priority.as_str()
        )?;
        pretty_rule(w)?;
        pretty_kv(w, "Location", &self.location)?;
        pretty_kv(w, "Description", &self.description)?;
        pretty_kv(w, "Utility", or_dash(&self.utility))?;
        pretty_kv(w, "Owner", or_dash(&self.owner))?;
        pretty_kv(w, "Requested by", or_dash(&self.requested_by))?;
        pretty_kv(w, "Due", &self.due)?;
        if let Some(notes) = &self.notes {
            pretty_kv(w, "Notes", notes)?;
        }
        writeln!(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            self.id,
            self.status.as_str(),
            self.priority.as_str(),
            self.due,
            self.location
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "STATUS", "PRIORITY", "DUE", "LOCATION"]
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
