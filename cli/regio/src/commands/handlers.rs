//! `regio handlers` — render the interrupt vector-table setup file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regio_emit::render_handlers;

/// Render the handlers file for a device to a file or stdout.
pub fn run(svd: &Path, output: Option<&Path>) -> Result<()> {
    let device =
        regio_svd::load_device(svd).with_context(|| format!("loading {}", svd.display()))?;

    let text = render_handlers(&device)?;

    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
            println!("generated {}", path.display());
        }
        None => print!("{text}"),
    }

    Ok(())
}
