//! Naming of aliased register groups.
//!
//! A union of registers sharing one offset is rendered under the longest
//! name prefix its members share, with each member keeping only the suffix
//! that distinguishes it (`CTRL_A`/`CTRL_B` become `A` and `B` inside a
//! `CTRL_` group). When the members share nothing the group is reported as
//! unnamed so the renderer can flag it for manual follow-up instead of
//! guessing.

use regio_model::Register;

/// Computed naming for one union group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionNaming {
    /// Longest common name prefix of every member, or `None` when the
    /// members share no prefix at all.
    pub group: Option<String>,
    /// Member names with the shared prefix stripped. A member whose stripped
    /// name would be empty keeps its full name.
    pub members: Vec<String>,
}

/// Length in bytes of the longest prefix shared by every name.
///
/// Comparison is case-sensitive. The returned length always falls on a
/// character boundary of every input.
pub fn common_prefix_len(names: &[&str]) -> usize {
    let Some(first) = names.first() else {
        return 0;
    };
    let mut len = names
        .iter()
        .skip(1)
        .fold(first.len(), |len, name| {
            first
                .bytes()
                .zip(name.bytes())
                .take(len)
                .take_while(|(a, b)| a == b)
                .count()
        });
    // Register names are ASCII identifiers in practice, but never split a
    // multi-byte character if one slips through.
    while !first.is_char_boundary(len) {
        len -= 1;
    }
    len
}

/// Compute the rendered names for a union group's members.
pub fn union_naming(registers: &[&Register]) -> UnionNaming {
    let names: Vec<&str> = registers.iter().map(|r| r.name.as_str()).collect();
    let prefix_len = common_prefix_len(&names);

    let members = names
        .iter()
        .map(|name| {
            let stripped = &name[prefix_len..];
            if stripped.is_empty() {
                (*name).to_string()
            } else {
                stripped.to_string()
            }
        })
        .collect();

    let group = if prefix_len == 0 {
        None
    } else {
        names.first().map(|name| name[..prefix_len].to_string())
    };

    UnionNaming { group, members }
}
