//! Build script for generating identifier enums at compile time.
//!
//! This script reads `spec/registry.jsonc` and generates `generated_ids.rs`,
//! which holds the `FunctionId`, `RefPageId`, and `FieldId` enums together
//! with their name, C-string, and raw-value lookups.

use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use vkloc_jsonc_strip::strip_jsonc;

const RESERVED: &[&str] = &[
    "Empty", "Self", "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
    "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

struct Section {
    key: &'static str,
    type_name: &'static str,
    doc: &'static str,
}

const SECTIONS: &[Section] = &[
    Section {
        key: "functions",
        type_name: "FunctionId",
        doc: "API entry point whose parameters are being validated.",
    },
    Section {
        key: "refPages",
        type_name: "RefPageId",
        doc: "Reference page a location refers to: a structure or, for parameters, a command.",
    },
    Section {
        key: "fields",
        type_name: "FieldId",
        doc: "Named structure member or function parameter.",
    },
];

fn main() {
    let spec_path = Path::new("spec/registry.jsonc");
    println!("cargo:rerun-if-changed={}", spec_path.display());

    let raw = fs::read_to_string(spec_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", spec_path.display()));

    let stripped = strip_jsonc(&raw);

    let spec: serde_json::Value =
        serde_json::from_str(&stripped).expect("failed to parse registry.jsonc as JSON");

    let mut out =
        String::from("// Auto-generated from spec/registry.jsonc - DO NOT EDIT.\n\n");

    for section in SECTIONS {
        let entries = spec[section.key]
            .as_array()
            .unwrap_or_else(|| panic!("registry.jsonc: expected `{}` array", section.key));
        let names = collect_names(section.key, entries);
        emit_enum(&mut out, section, &names);
    }

    let out_dir = env::var("OUT_DIR").unwrap();
    fs::write(Path::new(&out_dir).join("generated_ids.rs"), &out)
        .expect("failed to write generated_ids.rs");
}

fn collect_names(key: &str, entries: &[serde_json::Value]) -> Vec<(String, String)> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let name = entry["name"]
            .as_str()
            .unwrap_or_else(|| panic!("{key}[{i}] missing `name`"));
        let summary = entry["summary"]
            .as_str()
            .unwrap_or_else(|| panic!("{key}[{i}] (name={name}) missing `summary`"));

        assert!(
            is_identifier(name),
            "{key}[{i}]: name '{name}' is not a valid identifier"
        );
        assert!(
            !RESERVED.contains(&name),
            "{key}[{i}]: name '{name}' is reserved"
        );
        assert!(seen.insert(name), "{key}[{i}]: duplicate name '{name}'");

        names.push((name.to_string(), summary.to_string()));
    }
    names
}

fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn emit_enum(out: &mut String, section: &Section, names: &[(String, String)]) {
    let ty = section.type_name;
    let count = names.len() + 1;

    writeln!(out, "/// {}", section.doc).unwrap();
    out.push_str("#[allow(non_camel_case_types)]\n");
    out.push_str(
        "#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]\n",
    );
    out.push_str("#[repr(u32)]\n");
    writeln!(out, "pub enum {ty} {{").unwrap();
    out.push_str("    /// Unset sentinel.\n    #[default]\n    Empty = 0,\n");
    for (raw, (name, summary)) in (1u32..).zip(names) {
        let summary = escape_doc(summary);
        writeln!(out, "    /// {summary}\n    {name} = {raw},").unwrap();
    }
    out.push_str("}\n\n");

    writeln!(out, "impl {ty} {{").unwrap();

    out.push_str("    /// Number of identifiers, `Empty` included.\n");
    writeln!(out, "    pub const COUNT: usize = {count};").unwrap();

    out.push_str("\n    /// Every identifier in raw-value order, `Empty` first.\n");
    writeln!(out, "    pub const ALL: [Self; {count}] = [").unwrap();
    out.push_str("        Self::Empty,\n");
    for (name, _) in names {
        writeln!(out, "        Self::{name},").unwrap();
    }
    out.push_str("    ];\n");

    out.push_str("\n    /// API name of this identifier.\n");
    out.push_str("    pub const fn as_str(self) -> &'static str {\n        match self {\n");
    out.push_str("            Self::Empty => \"Empty\",\n");
    for (name, _) in names {
        writeln!(out, "            Self::{name} => \"{name}\",").unwrap();
    }
    out.push_str("        }\n    }\n");

    out.push_str("\n    /// API name as a NUL-terminated string.\n");
    out.push_str(
        "    pub const fn as_c_str(self) -> &'static ::core::ffi::CStr {\n        match self {\n",
    );
    out.push_str("            Self::Empty => c\"Empty\",\n");
    for (name, _) in names {
        writeln!(out, "            Self::{name} => c\"{name}\",").unwrap();
    }
    out.push_str("        }\n    }\n");

    out.push_str("\n    /// Look up an identifier by its API name.\n");
    out.push_str(
        "    pub fn from_name(name: &str) -> Option<Self> {\n        match name {\n",
    );
    out.push_str("            \"Empty\" => Some(Self::Empty),\n");
    for (name, _) in names {
        writeln!(out, "            \"{name}\" => Some(Self::{name}),").unwrap();
    }
    out.push_str("            _ => None,\n        }\n    }\n");

    out.push_str("\n    /// Look up an identifier by its raw value.\n");
    out.push_str(
        "    pub const fn from_raw(raw: u32) -> Option<Self> {\n        match raw {\n",
    );
    out.push_str("            0 => Some(Self::Empty),\n");
    for (raw, (name, _)) in (1u32..).zip(names) {
        writeln!(out, "            {raw} => Some(Self::{name}),").unwrap();
    }
    out.push_str("            _ => None,\n        }\n    }\n");

    out.push_str("\n    /// Raw value of this identifier.\n");
    out.push_str("    pub const fn as_raw(self) -> u32 {\n        self as u32\n    }\n");

    out.push_str("}\n\n");
}

fn escape_doc(value: &str) -> String {
    value.replace('\n', " ")
}
