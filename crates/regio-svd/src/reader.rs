//! SVD document walking and entity construction.

use std::fs;
use std::path::Path;

use regio_model::{Device, EnumeratedValue, Field, Interrupt, Peripheral, Register};
use xmltree::{Element, XMLNode};

use crate::error::SvdError;

/// Read and parse an SVD file from disk.
pub fn load_device(path: &Path) -> Result<Device, SvdError> {
    let text = fs::read_to_string(path).map_err(|source| SvdError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_device(&text)
}

/// Parse an SVD document from a string.
pub fn parse_device(xml: &str) -> Result<Device, SvdError> {
    let root = Element::parse(xml.as_bytes())?;
    let name = require_text(&root, "device", "name")?;
    let description = child_text(&root, "description").unwrap_or_default();

    let mut peripherals: Vec<Peripheral> = Vec::new();
    if let Some(list) = root.get_child("peripherals") {
        for element in child_elements(list, "peripheral") {
            let peripheral = parse_peripheral(element, &peripherals)?;
            peripherals.push(peripheral);
        }
    }

    Ok(Device {
        name,
        description,
        peripherals,
    })
}

/// Parse one `<peripheral>`.
///
/// `derivedFrom` copies the registers (and, unless overridden, the
/// description) of a peripheral defined earlier in the document — the usual
/// GPIOA/GPIOB pattern. Interrupt lines are never inherited: each peripheral
/// owns its own vectors.
fn parse_peripheral(
    element: &Element,
    earlier: &[Peripheral],
) -> Result<Peripheral, SvdError> {
    let name = require_text(element, "peripheral", "name")?;
    let base_address = require_number(element, "peripheral", "baseAddress")?;

    let base = match element.attributes.get("derivedFrom") {
        Some(base_name) => Some(
            earlier
                .iter()
                .find(|p| &p.name == base_name)
                .ok_or_else(|| SvdError::UnknownBase {
                    name: name.clone(),
                    base: base_name.clone(),
                })?,
        ),
        None => None,
    };

    let description = child_text(element, "description")
        .or_else(|| base.map(|b| b.description.clone()))
        .unwrap_or_default();

    let mut registers = match element.get_child("registers") {
        Some(list) => child_elements(list, "register")
            .map(parse_register)
            .collect::<Result<Vec<_>, _>>()?,
        None => base.map(|b| b.registers.clone()).unwrap_or_default(),
    };
    // Stable sort: aliased registers at one offset keep document order.
    registers.sort_by_key(|r| r.offset);

    let interrupts = child_elements(element, "interrupt")
        .map(parse_interrupt)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Peripheral {
        name,
        description,
        base_address,
        registers,
        interrupts,
    })
}

fn parse_register(element: &Element) -> Result<Register, SvdError> {
    let name = require_text(element, "register", "name")?;
    let offset = require_number_u32(element, "register", "addressOffset")?;
    let description = child_text(element, "description").unwrap_or_default();

    // A register-level <access> is the default for fields without their own.
    let default_access = child_text(element, "access")
        .map(|text| parse_access(&text))
        .unwrap_or((true, true));

    let mut fields = match element.get_child("fields") {
        Some(list) => child_elements(list, "field")
            .map(|e| parse_field(e, default_access))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    fields.sort_by_key(|f| f.offset);

    Ok(Register {
        name,
        description,
        offset,
        fields,
    })
}

fn parse_field(element: &Element, default_access: (bool, bool)) -> Result<Field, SvdError> {
    let name = require_text(element, "field", "name")?;
    let description = child_text(element, "description").unwrap_or_default();
    let (offset, width) = parse_bit_position(element, &name)?;

    let (allow_read, allow_write) = child_text(element, "access")
        .map(|text| parse_access(&text))
        .unwrap_or(default_access);

    let mut enumerated_values = Vec::new();
    for values in child_elements(element, "enumeratedValues") {
        for value in child_elements(values, "enumeratedValue") {
            // Entries without a <value> (e.g. isDefault catch-alls) carry no
            // constant to document.
            let Some(text) = child_text(value, "value") else {
                continue;
            };
            enumerated_values.push(EnumeratedValue {
                name: require_text(value, "enumeratedValue", "name")?,
                value: parse_number("value", &text)?,
                description: child_text(value, "description"),
            });
        }
    }

    Ok(Field {
        name,
        description,
        offset,
        width,
        allow_read,
        allow_write,
        enumerated_values,
    })
}

/// Resolve a field's bit position from any of the three SVD notations:
/// `bitOffset`/`bitWidth`, `lsb`/`msb`, or `bitRange` (`[msb:lsb]`).
fn parse_bit_position(element: &Element, field: &str) -> Result<(u32, u32), SvdError> {
    if element.get_child("bitOffset").is_some() {
        let offset = require_number_u32(element, "field", "bitOffset")?;
        let width = match child_text(element, "bitWidth") {
            Some(text) => number_u32("bitWidth", &text)?,
            None => 1,
        };
        return Ok((offset, width));
    }

    if element.get_child("lsb").is_some() || element.get_child("msb").is_some() {
        let lsb = require_number_u32(element, "field", "lsb")?;
        let msb = require_number_u32(element, "field", "msb")?;
        if msb < lsb {
            return Err(SvdError::InvalidBitRange {
                field: field.to_string(),
                text: format!("msb {msb} < lsb {lsb}"),
            });
        }
        return Ok((lsb, msb - lsb + 1));
    }

    if let Some(text) = child_text(element, "bitRange") {
        let inner = text
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .and_then(|t| t.split_once(':'))
            .ok_or_else(|| SvdError::InvalidBitRange {
                field: field.to_string(),
                text: text.clone(),
            })?;
        let msb = number_u32("bitRange", inner.0.trim())?;
        let lsb = number_u32("bitRange", inner.1.trim())?;
        if msb < lsb {
            return Err(SvdError::InvalidBitRange {
                field: field.to_string(),
                text,
            });
        }
        return Ok((lsb, msb - lsb + 1));
    }

    Err(SvdError::MissingBitRange {
        field: field.to_string(),
    })
}

fn parse_interrupt(element: &Element) -> Result<Interrupt, SvdError> {
    Ok(Interrupt {
        name: require_text(element, "interrupt", "name")?,
        description: child_text(element, "description").unwrap_or_default(),
        vector: require_number_u32(element, "interrupt", "value")?,
    })
}

/// Map an SVD access string to (allow_read, allow_write).
///
/// Unknown access strings fall back to read-write, the SVD default.
fn parse_access(text: &str) -> (bool, bool) {
    match text {
        "read-only" => (true, false),
        "write-only" | "writeOnce" => (false, true),
        _ => (true, true),
    }
}

/// Parse an SVD scaled non-negative integer: decimal, `0x`/`0X` hex, or
/// `0b`/`#` binary.
fn parse_number(element: &str, text: &str) -> Result<u64, SvdError> {
    let text = text.trim();
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = text
        .strip_prefix("0b")
        .or_else(|| text.strip_prefix("0B"))
        .or_else(|| text.strip_prefix('#'))
    {
        u64::from_str_radix(bin, 2)
    } else {
        text.parse()
    };
    parsed.map_err(|_| SvdError::InvalidNumber {
        element: element.to_string(),
        text: text.to_string(),
    })
}

fn number_u32(element: &str, text: &str) -> Result<u32, SvdError> {
    let value = parse_number(element, text)?;
    u32::try_from(value).map_err(|_| SvdError::InvalidNumber {
        element: element.to_string(),
        text: text.to_string(),
    })
}

fn require_number(element: &Element, parent: &str, name: &str) -> Result<u64, SvdError> {
    let text = require_text(element, parent, name)?;
    parse_number(name, &text)
}

fn require_number_u32(element: &Element, parent: &str, name: &str) -> Result<u32, SvdError> {
    let text = require_text(element, parent, name)?;
    number_u32(name, &text)
}

fn require_text(element: &Element, parent: &str, name: &str) -> Result<String, SvdError> {
    child_text(element, name).ok_or_else(|| SvdError::MissingElement {
        parent: parent.to_string(),
        element: name.to_string(),
    })
}

fn child_text(element: &Element, name: &str) -> Option<String> {
    element
        .get_child(name)
        .and_then(|child| child.get_text())
        .map(|text| text.trim().to_string())
}

fn child_elements<'a>(parent: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    parent
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(move |element| element.name == name)
}
