//! `regio generate` — render one peripheral definition header.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use regio_emit::render_peripheral;

/// Render the header for one peripheral to a file or stdout.
pub fn run(svd: &Path, peripheral_name: &str, output: Option<&Path>) -> Result<()> {
    let device =
        regio_svd::load_device(svd).with_context(|| format!("loading {}", svd.display()))?;

    let Some(peripheral) = device.peripheral(peripheral_name) else {
        bail!(
            "peripheral '{peripheral_name}' not found in {}. Run 'regio list' to see what the device provides.",
            device.name
        );
    };

    let rendered = render_peripheral(peripheral)?;
    for warning in &rendered.warnings {
        eprintln!("warning: {warning}");
    }

    match output {
        Some(path) => {
            fs::write(path, &rendered.text)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("generated {}", path.display());
        }
        None => print!("{}", rendered.text),
    }

    Ok(())
}
