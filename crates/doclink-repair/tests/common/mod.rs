//! Shared fixture for repair integration tests.
#![allow(dead_code)]

use doclink_common::MemoryMapFileReader;
use doclink_model::{
    ProjectReflection, ReferenceType, ReflectionId, ReflectionKind, SomeType, SymbolId, SymbolTable,
};
use doclink_repair::{RepairContext, RepairOptions, RepairSummary, repair_project, repair_references};
use std::path::Path;

/// A project, its symbol table and in-memory companion map files.
pub struct Fixture {
    pub project: ProjectReflection,
    pub program: SymbolTable,
    pub maps: MemoryMapFileReader,
    pub options: RepairOptions,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            project: ProjectReflection::new("fixture"),
            program: SymbolTable::new(),
            maps: MemoryMapFileReader::new(),
            options: RepairOptions::default(),
        }
    }

    /// A symbol declared in an analyzed file and documented by a reflection
    /// there.
    pub fn documented(&mut self, name: &str, kind: ReflectionKind, file: &str) -> (SymbolId, ReflectionId) {
        let symbol = self.program.alloc(name);
        self.program.add_declaration(symbol, file);
        let reflection = self
            .project
            .create_reflection(name, kind, Some(symbol), Some(Path::new(file)));
        (symbol, reflection)
    }

    /// A symbol with no reflection, declared in `files` in that order.
    pub fn undocumented(&mut self, name: &str, files: &[&str]) -> SymbolId {
        let symbol = self.program.alloc(name);
        for file in files {
            self.program.add_declaration(symbol, *file);
        }
        symbol
    }

    pub fn file_text(&mut self, file: &str, text: &str) {
        self.program.set_source_text(file, text);
    }

    pub fn map_file(&mut self, file: &str, json: &str) {
        self.maps.insert(file, json);
    }

    /// A typed reflection whose type is `ty`.
    pub fn typed(&mut self, name: &str, kind: ReflectionKind, ty: SomeType) -> ReflectionId {
        let id = self.project.create_reflection(name, kind, None, None);
        if let Some(reflection) = self.project.reflection_mut(id) {
            reflection.type_ = Some(ty);
        }
        id
    }

    pub fn type_of(&self, id: ReflectionId) -> &SomeType {
        self.project
            .reflection(id)
            .and_then(|reflection| reflection.type_.as_ref())
            .expect("reflection has a type")
    }

    pub fn repair(&mut self, id: ReflectionId) -> usize {
        let context = RepairContext::new(&self.program)
            .with_map_reader(&self.maps)
            .with_options(self.options);
        repair_references(&mut self.project, id, context)
    }

    pub fn repair_all(&mut self) -> RepairSummary {
        let context = RepairContext::new(&self.program)
            .with_map_reader(&self.maps)
            .with_options(self.options);
        repair_project(&mut self.project, context)
    }
}

pub fn reference_to(name: &str, symbol: SymbolId) -> SomeType {
    SomeType::reference(ReferenceType::new(name).with_symbol(symbol))
}

/// Generated file text whose inline map lists `sources`, base64 encoded.
pub fn with_inline_map(sources: &[&str]) -> String {
    format!(
        "export {{}};\n//# sourceMappingURL=data:application/json;charset=utf-8;base64,{}\n",
        base64_encode(map_json(sources).as_bytes())
    )
}

/// Generated file text pointing at a companion map file.
pub fn with_map_file(url: &str) -> String {
    format!("export {{}};\n//# sourceMappingURL={url}\n")
}

pub fn map_json(sources: &[&str]) -> String {
    let listed: Vec<String> = sources.iter().map(|source| format!("\"{source}\"")).collect();
    format!(
        "{{\"version\":3,\"sources\":[{}],\"names\":[],\"mappings\":\"\"}}",
        listed.join(",")
    )
}

pub fn base64_encode(data: &[u8]) -> String {
    const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let b0 = u32::from(chunk[0]);
        let b1 = chunk.get(1).copied().map_or(0, u32::from);
        let b2 = chunk.get(2).copied().map_or(0, u32::from);
        let triple = (b0 << 16) | (b1 << 8) | b2;

        out.push(ALPHABET[(triple >> 18) as usize & 0x3F] as char);
        out.push(ALPHABET[(triple >> 12) as usize & 0x3F] as char);
        if chunk.len() > 1 {
            out.push(ALPHABET[(triple >> 6) as usize & 0x3F] as char);
        } else {
            out.push('=');
        }
        if chunk.len() > 2 {
            out.push(ALPHABET[triple as usize & 0x3F] as char);
        } else {
            out.push('=');
        }
    }
    out
}
