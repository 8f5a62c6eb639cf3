//! `regio list` — peripheral inventory of a device.

use std::path::Path;

use anyhow::{Context, Result};

/// Print the peripherals of a device, one per line, or as JSON.
pub fn run(svd: &Path, format: Option<&str>) -> Result<()> {
    let device =
        regio_svd::load_device(svd).with_context(|| format!("loading {}", svd.display()))?;

    match format {
        Some("json") => {
            let json: Vec<_> = device
                .peripherals
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "name": p.name,
                        "base_address": p.base_address,
                        "description": p.description,
                        "registers": p.registers.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            for peripheral in &device.peripherals {
                println!("0x{:08x} : {}", peripheral.base_address, peripheral.name);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVD: &str = r#"
<device>
  <name>CHIP</name>
  <peripherals>
    <peripheral>
      <name>GPIOA</name>
      <baseAddress>0x48000000</baseAddress>
    </peripheral>
  </peripherals>
</device>
"#;

    #[test]
    fn lists_peripherals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chip.svd");
        std::fs::write(&path, SVD).unwrap();

        run(&path, None).unwrap();
        run(&path, Some("json")).unwrap();
    }

    #[test]
    fn missing_file_fails() {
        assert!(run(Path::new("/nonexistent/chip.svd"), None).is_err());
    }
}
