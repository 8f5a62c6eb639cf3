//! Memory-mapped peripheral definition headers.
//!
//! Renders one C++ header per peripheral: a nested struct per register with
//! a packed `Bits` view and a raw-word union, then the peripheral struct
//! body laid out from the resolved slot sequence, and finally the base
//! address constant and the reference used for direct hardware access.

use regio_layout::{resolve_peripheral, union_naming, BitSegment, Slot};
use regio_model::{Field, Peripheral, Register};

use crate::error::EmitError;

/// A rendered header plus any rendering-quality warnings.
///
/// Warnings do not prevent output; they mark spots needing manual follow-up,
/// such as an aliased register group with no shared name prefix.
#[derive(Debug, Clone)]
pub struct RenderedHeader {
    /// The complete header text.
    pub text: String,
    /// Human-readable warnings, empty for clean renders.
    pub warnings: Vec<String>,
}

/// Render the definition header for one peripheral.
///
/// Fails without output if layout resolution fails; a peripheral is rendered
/// whole or not at all.
pub fn render_peripheral(peripheral: &Peripheral) -> Result<RenderedHeader, EmitError> {
    let layout = resolve_peripheral(peripheral).map_err(|source| EmitError::Layout {
        peripheral: peripheral.name.clone(),
        source,
    })?;

    let mut out = String::new();
    let mut warnings = Vec::new();
    let class_name = type_name(&peripheral.name);

    out.push_str("/**\n");
    out.push_str(" * Peripheral Definition File\n");
    out.push_str(" *\n");
    out.push_str(&format!(
        " * {} - {}\n",
        peripheral.name, peripheral.description
    ));
    out.push_str(" */\n\n");
    out.push_str("#pragma once\n\n");
    out.push_str("#include <cstdint>\n");
    out.push_str("#include <cstddef>\n\n");
    out.push_str("namespace io {\n\n");

    out.push_str(&format!("/** {}\n", peripheral.description));
    out.push_str(" */\n");
    out.push_str(&format!("struct {class_name} {{\n"));

    for register_layout in &layout.registers {
        render_register_struct(&mut out, register_layout.register, &register_layout.segments);
    }

    render_members(&mut out, &layout.slots, &mut warnings);

    out.push_str("};\n\n");
    out.push_str("namespace base {\n\n");
    out.push_str(&format!(
        "static const size_t {} = 0x{:08x};\n\n",
        peripheral.name, peripheral.base_address
    ));
    out.push_str("}\n\n");
    out.push_str(&format!(
        "static {class_name} &{} = *reinterpret_cast<{class_name} *>(base::{});\n\n",
        peripheral.name, peripheral.name
    ));
    out.push_str("}\n");

    Ok(RenderedHeader {
        text: out,
        warnings,
    })
}

/// Render one register's nested struct: constructor, packed `Bits`, and the
/// raw/bits union.
fn render_register_struct(out: &mut String, register: &Register, segments: &[BitSegment<'_>]) {
    let class_name = type_name(&register.name);

    out.push_str(&format!("    /** {}\n", register.description));
    out.push_str("     */\n");
    out.push_str(&format!("    struct {class_name} {{\n"));
    out.push_str(&format!(
        "        {class_name}(const uint32_t raw=0) {{ r = raw; }}\n\n"
    ));

    out.push_str("        struct Bits {\n");
    for segment in segments {
        match segment {
            BitSegment::Pad { width } => {
                out.push_str(&format!("            uint32_t : {width};\n"));
            }
            BitSegment::Field(field) => render_bits_field(out, field),
        }
    }
    out.push_str("        };\n\n");

    out.push_str("        union {\n");
    out.push_str("            uint32_t r;\n");
    out.push_str("            Bits b;\n");
    out.push_str("        };\n");
    out.push_str("    };\n\n");
}

fn render_bits_field(out: &mut String, field: &Field) {
    let qualifier = if field.is_read_only() { "const " } else { "" };
    out.push_str(&format!(
        "            {qualifier}uint32_t {} : {};",
        field.name, field.width
    ));
    if !field.description.is_empty() {
        out.push_str(&format!("  // {}", field.description));
    }
    out.push('\n');
    for value in &field.enumerated_values {
        out.push_str(&format!("            // {} = {}", value.name, value.value));
        if let Some(description) = &value.description {
            out.push_str(&format!("  {description}"));
        }
        out.push('\n');
    }
}

/// Render the peripheral struct body from the resolved slot sequence.
fn render_members(out: &mut String, slots: &[Slot<'_>], warnings: &mut Vec<String>) {
    let mut reserved_index = 0;
    let mut unnamed_index = 0;

    for slot in slots {
        match slot {
            Slot::Reserved(1) => {
                out.push_str(&format!("    uint32_t _res{reserved_index:02};\n"));
                reserved_index += 1;
            }
            Slot::Reserved(count) => {
                out.push_str(&format!("    uint32_t _res{reserved_index:02}[{count}];\n"));
                reserved_index += 1;
            }
            Slot::Occupied(register) => {
                render_member(out, register, &register.name);
            }
            Slot::Union(members) => {
                let naming = union_naming(members);
                out.push_str("    union {\n");
                for (register, member_name) in members.iter().zip(&naming.members) {
                    out.push_str("    ");
                    render_member(out, register, member_name);
                }
                let group_name = match naming.group {
                    // Trailing underscores separate the prefix from the
                    // member suffixes; they are not part of the group name.
                    Some(prefix) => prefix.trim_end_matches('_').to_string(),
                    None => {
                        let placeholder = format!("_union{unnamed_index:02}");
                        unnamed_index += 1;
                        let names: Vec<&str> =
                            members.iter().map(|r| r.name.as_str()).collect();
                        warnings.push(format!(
                            "aliased registers {} share no name prefix; group emitted as '{placeholder}'",
                            names.join(", ")
                        ));
                        placeholder
                    }
                };
                out.push_str(&format!("    }} {group_name};\n"));
            }
        }
    }
}

fn render_member(out: &mut String, register: &Register, member_name: &str) {
    out.push_str(&format!(
        "    volatile {} {member_name};",
        type_name(&register.name)
    ));
    if !register.description.is_empty() {
        out.push_str(&format!("  // {}", register.description));
    }
    out.push('\n');
}

/// C++ type name for an entity: first character upper-cased, the rest
/// lower-cased (`CTRL_A` becomes `Ctrl_a`).
fn type_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regio_model::EnumeratedValue;

    fn field(name: &str, offset: u32, width: u32, read_only: bool) -> Field {
        Field {
            name: name.into(),
            description: format!("{name} field"),
            offset,
            width,
            allow_read: true,
            allow_write: !read_only,
            enumerated_values: Vec::new(),
        }
    }

    fn register(name: &str, offset: u32, fields: Vec<Field>) -> Register {
        Register {
            name: name.into(),
            description: format!("{name} register"),
            offset,
            fields,
        }
    }

    fn peripheral(registers: Vec<Register>) -> Peripheral {
        Peripheral {
            name: "TIM1".into(),
            description: "Advanced timer".into(),
            base_address: 0x4001_2c00,
            registers,
            interrupts: Vec::new(),
        }
    }

    #[test]
    fn renders_banner_base_and_reference() {
        let p = peripheral(vec![register("CR", 0x0, vec![field("EN", 0, 1, false)])]);
        let rendered = render_peripheral(&p).unwrap();
        assert!(rendered.text.contains("* TIM1 - Advanced timer"));
        assert!(rendered.text.contains("#pragma once"));
        assert!(rendered.text.contains("struct Tim1 {"));
        assert!(rendered
            .text
            .contains("static const size_t TIM1 = 0x40012c00;"));
        assert!(rendered
            .text
            .contains("static Tim1 &TIM1 = *reinterpret_cast<Tim1 *>(base::TIM1);"));
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn renders_packed_bits_with_padding() {
        let p = peripheral(vec![register(
            "SR",
            0x0,
            vec![field("BUSY", 2, 1, true), field("CNT", 8, 4, false)],
        )]);
        let text = render_peripheral(&p).unwrap().text;
        assert!(text.contains("            uint32_t : 2;"));
        assert!(text.contains("            const uint32_t BUSY : 1;  // BUSY field"));
        assert!(text.contains("            uint32_t : 5;"));
        assert!(text.contains("            uint32_t CNT : 4;  // CNT field"));
        assert!(text.contains("            uint32_t : 20;"));
    }

    #[test]
    fn renders_enumerated_values_as_comments() {
        let mut f = field("MODE", 0, 2, false);
        f.enumerated_values = vec![
            EnumeratedValue {
                name: "IDLE".into(),
                value: 0,
                description: Some("No transfer".into()),
            },
            EnumeratedValue {
                name: "TX".into(),
                value: 1,
                description: None,
            },
        ];
        let p = peripheral(vec![register("CR", 0x0, vec![f])]);
        let text = render_peripheral(&p).unwrap().text;
        assert!(text.contains("            // IDLE = 0  No transfer"));
        assert!(text.contains("            // TX = 1"));
    }

    #[test]
    fn renders_reserved_scalars_and_arrays() {
        let p = peripheral(vec![
            register("A", 0x0, Vec::new()),
            register("B", 0x8, Vec::new()),
            register("C", 0x18, Vec::new()),
        ]);
        let text = render_peripheral(&p).unwrap().text;
        assert!(text.contains("    uint32_t _res00;\n"));
        assert!(text.contains("    uint32_t _res01[3];\n"));
        assert!(text.contains("    volatile A A;"));
    }

    #[test]
    fn renders_union_group_with_stripped_names() {
        let p = peripheral(vec![
            register("CTRL_A", 0x0, Vec::new()),
            register("CTRL_B", 0x0, Vec::new()),
        ]);
        let rendered = render_peripheral(&p).unwrap();
        assert!(rendered.text.contains("    union {\n"));
        assert!(rendered.text.contains("        volatile Ctrl_a A;"));
        assert!(rendered.text.contains("        volatile Ctrl_b B;"));
        assert!(rendered.text.contains("    } CTRL;\n"));
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn prefixless_union_gets_placeholder_and_warning() {
        let p = peripheral(vec![
            register("TDR", 0x0, Vec::new()),
            register("RDR", 0x0, Vec::new()),
        ]);
        let rendered = render_peripheral(&p).unwrap();
        assert!(rendered.text.contains("    } _union00;\n"));
        assert_eq!(rendered.warnings.len(), 1);
        assert!(rendered.warnings[0].contains("TDR, RDR"));
    }

    #[test]
    fn layout_failure_yields_no_output() {
        let p = peripheral(vec![register(
            "BAD",
            0x0,
            vec![field("A", 0, 20, false), field("B", 20, 20, false)],
        )]);
        let err = render_peripheral(&p).unwrap_err();
        assert!(matches!(err, EmitError::Layout { .. }));
        assert!(err.to_string().contains("TIM1"));
        assert!(err.to_string().contains("BAD"));
    }

    #[test]
    fn type_names_are_capitalized() {
        assert_eq!(type_name("CTRL_A"), "Ctrl_a");
        assert_eq!(type_name("cr"), "Cr");
        assert_eq!(type_name(""), "");
    }
}
