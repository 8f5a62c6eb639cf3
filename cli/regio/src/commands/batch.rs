//! `regio batch` — generate every output listed in a manifest.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use regio_emit::{render_handlers, render_peripheral};

use crate::manifest::RegioManifest;

/// Run every generation the manifest asks for.
///
/// A failing peripheral does not stop its siblings; the run fails at the
/// end if any output could not be produced.
pub fn run(manifest_path: Option<&Path>) -> Result<()> {
    let manifest_path = manifest_path.unwrap_or_else(|| Path::new("regio.toml"));
    let manifest = RegioManifest::load(manifest_path)?;

    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let svd_path = base.join(&manifest.project.svd);
    let device = regio_svd::load_device(&svd_path)
        .with_context(|| format!("loading {}", svd_path.display()))?;

    let out_dir = base.join(&manifest.output.directory);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut failed = 0usize;

    for entry in &manifest.peripherals {
        let out_path = out_dir.join(entry.file_name());
        match generate_one(&device, &entry.name, &out_path) {
            Ok(()) => println!("generated {}", out_path.display()),
            Err(e) => {
                eprintln!("error: {}: {e:#}", entry.name);
                failed += 1;
            }
        }
    }

    if let Some(handlers) = &manifest.handlers {
        let out_path = out_dir.join(&handlers.file);
        match render_handlers(&device) {
            Ok(text) => {
                fs::write(&out_path, text)
                    .with_context(|| format!("writing {}", out_path.display()))?;
                println!("generated {}", out_path.display());
            }
            Err(e) => {
                eprintln!("error: handlers: {e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} output(s) failed");
    }
    Ok(())
}

fn generate_one(device: &regio_model::Device, name: &str, out_path: &Path) -> Result<()> {
    let Some(peripheral) = device.peripheral(name) else {
        bail!("peripheral not found in {}", device.name);
    };

    let rendered = render_peripheral(peripheral)?;
    for warning in &rendered.warnings {
        eprintln!("warning: {warning}");
    }

    fs::write(out_path, &rendered.text)
        .with_context(|| format!("writing {}", out_path.display()))?;
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
      <registers>
        <register><name>MODER</name><addressOffset>0x0</addressOffset></register>
      </registers>
    </peripheral>
    <peripheral>
      <name>TIM2</name>
      <baseAddress>0x40000000</baseAddress>
      <interrupt><name>TIM2</name><value>28</value></interrupt>
      <registers>
        <register><name>CR1</name><addressOffset>0x0</addressOffset></register>
      </registers>
    </peripheral>
  </peripherals>
</device>
"#;

    fn write_project(manifest_body: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chip.svd"), SVD).unwrap();
        std::fs::write(dir.path().join("regio.toml"), manifest_body).unwrap();
        dir
    }

    #[test]
    fn generates_all_outputs() {
        let dir = write_project(
            r#"
[project]
name = "board"
svd = "chip.svd"

[output]
directory = "io"

[[peripherals]]
name = "GPIOA"

[[peripherals]]
name = "TIM2"

[handlers]
"#,
        );

        run(Some(&dir.path().join("regio.toml"))).unwrap();

        let io = dir.path().join("io");
        assert!(io.join("gpioa.hpp").is_file());
        assert!(io.join("tim2.hpp").is_file());
        let handlers = std::fs::read_to_string(io.join("handlers.cpp")).unwrap();
        assert!(handlers.contains("TIM2_handler"));
    }

    #[test]
    fn unknown_peripheral_fails_run_but_not_siblings() {
        let dir = write_project(
            r#"
[project]
name = "board"
svd = "chip.svd"

[[peripherals]]
name = "NOPE"

[[peripherals]]
name = "GPIOA"
"#,
        );

        let err = run(Some(&dir.path().join("regio.toml"))).unwrap_err();
        assert!(err.to_string().contains("1 output(s) failed"));
        assert!(dir.path().join("io/gpioa.hpp").is_file());
    }

    #[test]
    fn missing_manifest_fails() {
        assert!(run(Some(Path::new("/nonexistent/regio.toml"))).is_err());
    }
}
