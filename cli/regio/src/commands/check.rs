//! `regio check` — validate a device description.

use std::path::Path;

use anyhow::{bail, Context, Result};
use regio_model::{validate_device, Severity};

/// Validate a device and print every finding.
///
/// Exits non-zero when any error-severity issue exists; warnings alone do
/// not fail the check.
pub fn run(svd: &Path) -> Result<()> {
    let device =
        regio_svd::load_device(svd).with_context(|| format!("loading {}", svd.display()))?;

    match validate_device(&device) {
        Ok(()) => {
            println!(
                "{}: OK ({} peripherals)",
                device.name,
                device.peripherals.len()
            );
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                println!("{}: {}", issue.severity, issue.message);
            }
            let errors = issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count();
            if errors > 0 {
                bail!("{errors} error(s) in {}", device.name);
            }
            Ok(())
        }
    }
}
