//! Inspect command for examining CSV schema and sample rows.

use std::io::{self, Write};

use anyhow::{Result, anyhow};

use crate::{InspectArgs, inspection::CsvInspector};

pub fn run(args: InspectArgs) -> Result<()> {
    let mut out = io::stdout();
    let json = args.format.resolves_to_json();

    for (idx, path) in args.files.iter().enumerate() {
        let inspector = CsvInspector::open(path, args.sample_rows)
            .map_err(|e| anyhow!("Failed to inspect {}: {}", path, e))?;

        if json {
            inspector.render_to_json(&mut out, args.head)?;
        } else {
            if idx > 0 {
                writeln!(out)?;
            }
            inspector.render_default(&mut out)?;
            inspector.render_rows(&mut out, args.head)?;
        }
    }

    out.flush()?;
    Ok(())
}
