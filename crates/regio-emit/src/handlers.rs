//! Interrupt vector-table setup file.
//!
//! Renders the handler declarations and the vector array the startup code
//! links against: every interrupt gets a weak handler aliased to a stop
//! trampoline, and vector numbers nothing claims are filled with the dummy
//! handler so the table stays position-correct.

use regio_model::Device;

use crate::error::EmitError;

/// Render the handlers setup file for a device.
///
/// Interrupts are emitted in ascending vector order. Two interrupts with
/// different names on one vector make the table ambiguous and fail with
/// [`EmitError::VectorConflict`].
pub fn render_handlers(device: &Device) -> Result<String, EmitError> {
    let interrupts = device.interrupts();
    for pair in interrupts.windows(2) {
        if pair[0].vector == pair[1].vector {
            return Err(EmitError::VectorConflict {
                vector: pair[0].vector,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }
    }

    let mut out = String::new();
    out.push_str("/**\n");
    out.push_str(" * Handlers Setup File\n");
    out.push_str(" */\n");
    out.push_str("#include \"io/lib/io_def.hpp\"\n\n");

    out.push_str("// Undefined handler is pointing to this function, this stop MCU.\n");
    out.push_str("// This function name must by not mangled, so must be C,\n");
    out.push_str("// because alias(\"..\") is working only with C code\n");
    out.push_str("extern \"C\" void __stop_mcu() { while (true); }\n\n");

    out.push_str("// These handler are with attribute \"weak\" and can be overwritten\n");
    out.push_str("// by non-week function, default is __stop_mcu() function\n");
    for interrupt in &interrupts {
        out.push_str(&format!(
            "__attribute__((weak, alias(\"__stop_mcu\"))) void {}_handler();\n",
            interrupt.name
        ));
    }
    out.push('\n');

    out.push_str("// Dummy handler (for unused vectors)\n");
    out.push_str("extern void DUMMY_handler();\n\n");

    out.push_str(
        "__attribute__((section(\".vectors_mcu\"), used)) ptr_func_t __isr_vectors_mcu[] = {\n",
    );
    let mut next_vector = 0;
    for interrupt in &interrupts {
        while next_vector < interrupt.vector {
            out.push_str("    DUMMY_handler,\n");
            next_vector += 1;
        }
        out.push_str(&format!(
            "    {}_handler,  // {}\n",
            interrupt.name, interrupt.vector
        ));
        next_vector = interrupt.vector + 1;
    }
    out.push_str("};\n");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regio_model::{Interrupt, Peripheral};

    fn device(interrupts: Vec<(&str, u32)>) -> Device {
        Device {
            name: "CHIP".into(),
            description: String::new(),
            peripherals: interrupts
                .into_iter()
                .map(|(name, vector)| Peripheral {
                    name: name.into(),
                    description: String::new(),
                    base_address: 0x4000_0000,
                    registers: Vec::new(),
                    interrupts: vec![Interrupt {
                        name: name.into(),
                        description: String::new(),
                        vector,
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn renders_weak_aliases_and_table() {
        let text = render_handlers(&device(vec![("WWDG", 0), ("RTC", 2)])).unwrap();
        assert!(text.contains(
            "__attribute__((weak, alias(\"__stop_mcu\"))) void WWDG_handler();"
        ));
        assert!(text.contains("extern void DUMMY_handler();"));
        assert!(text.contains("    WWDG_handler,  // 0\n"));
        assert!(text.contains("    RTC_handler,  // 2\n"));
    }

    #[test]
    fn unassigned_vectors_get_dummy_entries() {
        let text = render_handlers(&device(vec![("A", 1), ("B", 4)])).unwrap();
        let table = text.split("__isr_vectors_mcu[] = {").nth(1).unwrap();
        let entries: Vec<&str> = table
            .lines()
            .filter(|l| l.trim_end().ends_with(',') || l.contains("_handler"))
            .map(str::trim)
            .collect();
        assert_eq!(
            entries,
            vec![
                "DUMMY_handler,",
                "A_handler,  // 1",
                "DUMMY_handler,",
                "DUMMY_handler,",
                "B_handler,  // 4",
            ]
        );
    }

    #[test]
    fn shared_lines_collapse_to_one_entry() {
        let mut d = device(vec![("DMA1_CH1", 9)]);
        d.peripherals.push(d.peripherals[0].clone());
        let text = render_handlers(&d).unwrap();
        assert_eq!(text.matches("DMA1_CH1_handler,").count(), 1);
    }

    #[test]
    fn conflicting_vectors_fail() {
        let err = render_handlers(&device(vec![("IRQ_A", 5), ("IRQ_B", 5)])).unwrap_err();
        assert!(matches!(
            err,
            EmitError::VectorConflict { vector: 5, .. }
        ));
    }

    #[test]
    fn empty_device_renders_empty_table() {
        let text = render_handlers(&device(Vec::new())).unwrap();
        assert!(text.contains("__isr_vectors_mcu[] = {\n};\n"));
    }
}
