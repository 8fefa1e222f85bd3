// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Binary persistence for frequency tries.
//!
//! # File layout (v1, little endian)
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ HEADER (22 bytes)                            │
//! │   magic: [u8; 4] = "MPCT"                    │
//! │   version: u8 = 1                            │
//! │   alphabet: u8 (0 unicode, 1 printable)      │
//! │   entry_count: u64                           │
//! │   node_count: u64                            │
//! ├──────────────────────────────────────────────┤
//! │ NODES (pre-order, children sorted by char)   │
//! │   flags: u8 (bit 0 = terminal)               │
//! │   frequency: varint (terminal nodes only)    │
//! │   child_count: varint                        │
//! │   per child: varint(char) + child node       │
//! ├──────────────────────────────────────────────┤
//! │ FOOTER (8 bytes)                             │
//! │   crc32: u32 (over header + nodes)           │
//! │   magic: [u8; 4] = "TCPM"                    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The layout stores the trie shape rather than a flat key list, but the
//! only thing a round trip guarantees is the set of `(key, frequency)`
//! pairs and the alphabet.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crc32fast::Hasher as Crc32Hasher;
use tempfile::NamedTempFile;

use super::node::TrieNode;
use super::{Alphabet, FrequencyTrie, IndexError, IndexResult};

/// Header magic
pub const MAGIC: [u8; 4] = *b"MPCT";

/// Footer magic, marks a complete file
pub const FOOTER_MAGIC: [u8; 4] = *b"TCPM";

/// Current format version
pub const VERSION: u8 = 1;

const HEADER_SIZE: usize = 22;
const FOOTER_SIZE: usize = 8;
const FLAG_TERMINAL: u8 = 0x01;
const MAX_VARINT_BYTES: usize = 10;

/// Writes `trie` to `path`.
///
/// The bytes go to a temporary file next to `path`, which is synced and
/// then renamed over the destination, so readers never see a partial file.
///
/// # Errors
///
/// Returns [`IndexError::Io`] if any step of the write fails.
pub fn save<P: AsRef<Path>>(trie: &FrequencyTrie, path: P) -> IndexResult<()> {
    let path = path.as_ref();
    let bytes = encode(trie);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| IndexError::io(dir, e))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| IndexError::io(dir, e))?;
    file.write_all(&bytes)
        .map_err(|e| IndexError::io(file.path(), e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| IndexError::io(file.path(), e))?;
    file.persist(path)
        .map_err(|e| IndexError::io(path, e.error))?;

    tracing::info!(
        path = %path.display(),
        entries = trie.len(),
        bytes = bytes.len(),
        "Saved frequency trie"
    );
    Ok(())
}

/// Reads a trie previously written by [`save`].
///
/// # Errors
///
/// * [`IndexError::FileNotFound`] - `path` does not exist.
/// * [`IndexError::Io`] - The file exists but could not be read.
/// * [`IndexError::CorruptFile`] - The contents are not a valid index.
pub fn load<P: AsRef<Path>>(path: P) -> IndexResult<FrequencyTrie> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IndexError::FileNotFound(path.to_path_buf()),
        _ => IndexError::io(path, e),
    })?;

    let trie = decode(&bytes)?;
    tracing::info!(
        path = %path.display(),
        entries = trie.len(),
        alphabet = %trie.alphabet(),
        "Loaded frequency trie"
    );
    Ok(trie)
}

/// Serializes `trie` into the v1 byte layout.
pub fn encode(trie: &FrequencyTrie) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + FOOTER_SIZE + trie.node_count() * 4);

    buf.extend_from_slice(&MAGIC);
    buf.push(VERSION);
    buf.push(trie.alphabet().code());
    buf.extend_from_slice(&(trie.len() as u64).to_le_bytes());
    buf.extend_from_slice(&(trie.node_count() as u64).to_le_bytes());

    let root = trie.root();
    encode_node(root, &mut buf);
    let mut stack = vec![root.sorted_children().into_iter()];
    while let Some(children) = stack.last_mut() {
        let Some((ch, child)) = children.next() else {
            stack.pop();
            continue;
        };
        encode_varint(u64::from(u32::from(ch)), &mut buf);
        encode_node(child, &mut buf);
        stack.push(child.sorted_children().into_iter());
    }

    let crc32 = compute_crc32(&buf);
    buf.extend_from_slice(&crc32.to_le_bytes());
    buf.extend_from_slice(&FOOTER_MAGIC);
    buf
}

/// Deserializes a trie from the v1 byte layout.
///
/// # Errors
///
/// Returns [`IndexError::CorruptFile`] describing the first problem found.
pub fn decode(bytes: &[u8]) -> IndexResult<FrequencyTrie> {
    if bytes.len() < HEADER_SIZE + FOOTER_SIZE {
        return Err(IndexError::corrupt(format!(
            "file too small: {} bytes (minimum {})",
            bytes.len(),
            HEADER_SIZE + FOOTER_SIZE
        )));
    }

    let (content, footer) = bytes.split_at(bytes.len() - FOOTER_SIZE);
    if footer[4..] != FOOTER_MAGIC {
        return Err(IndexError::corrupt("invalid footer magic (truncated file?)"));
    }
    let stored_crc32 = u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]);
    let computed_crc32 = compute_crc32(content);
    if stored_crc32 != computed_crc32 {
        return Err(IndexError::corrupt(format!(
            "CRC32 mismatch: expected {stored_crc32:#010x}, got {computed_crc32:#010x}"
        )));
    }

    let (header, body) = content.split_at(HEADER_SIZE);
    if header[0..4] != MAGIC {
        return Err(IndexError::corrupt(format!(
            "invalid magic: expected {:?}, got {:?}",
            MAGIC,
            &header[0..4]
        )));
    }
    if header[4] != VERSION {
        return Err(IndexError::corrupt(format!(
            "unsupported format version {} (expected {VERSION})",
            header[4]
        )));
    }
    let alphabet = Alphabet::from_code(header[5])
        .ok_or_else(|| IndexError::corrupt(format!("unknown alphabet code {}", header[5])))?;
    let entry_count = read_u64(&header[6..14]);
    let node_count = read_u64(&header[14..22]);

    let mut reader = Reader::new(body);
    let mut trie = FrequencyTrie::with_alphabet(alphabet);
    let mut nodes_read: u64 = 1;

    let root = reader.read_node()?;
    if root.frequency.is_some() {
        return Err(IndexError::corrupt("root node carries a frequency"));
    }

    // Remaining children of every open node on the current path.
    let mut pending = vec![root.child_count];
    let mut path = String::new();
    while let Some(remaining) = pending.last_mut() {
        if *remaining == 0 {
            pending.pop();
            path.pop();
            continue;
        }
        *remaining -= 1;

        let ch = reader.read_char()?;
        if !alphabet.allows(ch) {
            return Err(IndexError::corrupt(format!(
                "character {ch:?} outside the {alphabet} alphabet"
            )));
        }
        path.push(ch);

        let node = reader.read_node()?;
        nodes_read += 1;
        if nodes_read > node_count {
            return Err(IndexError::corrupt(format!(
                "more nodes than the {node_count} declared"
            )));
        }
        match node.frequency {
            Some(frequency) => {
                if trie.insert(&path, frequency)?.is_some() {
                    return Err(IndexError::corrupt(format!("duplicate key {path:?}")));
                }
            }
            None if node.child_count == 0 => {
                return Err(IndexError::corrupt(format!(
                    "leaf node {path:?} carries no frequency"
                )));
            }
            None => {}
        }
        pending.push(node.child_count);
    }

    if !reader.is_exhausted() {
        return Err(IndexError::corrupt(format!(
            "{} trailing bytes after node data",
            reader.remaining()
        )));
    }
    if nodes_read != node_count || trie.node_count() as u64 != node_count {
        return Err(IndexError::corrupt(format!(
            "node count mismatch: header says {node_count}, found {nodes_read}"
        )));
    }
    if trie.len() as u64 != entry_count {
        return Err(IndexError::corrupt(format!(
            "entry count mismatch: header says {entry_count}, found {}",
            trie.len()
        )));
    }

    Ok(trie)
}

fn encode_node(node: &TrieNode, buf: &mut Vec<u8>) {
    match node.frequency {
        Some(frequency) => {
            buf.push(FLAG_TERMINAL);
            encode_varint(frequency, buf);
        }
        None => buf.push(0),
    }
    encode_varint(node.children.len() as u64, buf);
}

/// Encode a u64 as LEB128
fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

fn compute_crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    u64::from_le_bytes(raw)
}

/// A node record as read from the file.
struct NodeRecord {
    frequency: Option<u64>,
    child_count: u64,
}

/// Cursor over the node section that turns every short read into a
/// corruption error.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn read_u8(&mut self) -> IndexResult<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| IndexError::corrupt("unexpected end of node data"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_varint(&mut self) -> IndexResult<u64> {
        let mut result: u64 = 0;
        for i in 0..MAX_VARINT_BYTES {
            let byte = self.read_u8()?;
            let bits = u64::from(byte & 0x7F);
            if i == MAX_VARINT_BYTES - 1 && bits > 1 {
                return Err(IndexError::corrupt("varint overflows u64"));
            }
            result |= bits << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(IndexError::corrupt("varint too long"))
    }

    fn read_char(&mut self) -> IndexResult<char> {
        let raw = self.read_varint()?;
        u32::try_from(raw)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| IndexError::corrupt(format!("invalid character code {raw:#x}")))
    }

    fn read_node(&mut self) -> IndexResult<NodeRecord> {
        let flags = self.read_u8()?;
        if flags & !FLAG_TERMINAL != 0 {
            return Err(IndexError::corrupt(format!("unknown node flags {flags:#04x}")));
        }
        let frequency = if flags & FLAG_TERMINAL != 0 {
            Some(self.read_varint()?)
        } else {
            None
        };
        let child_count = self.read_varint()?;
        // Every child needs at least two bytes (char + flags).
        if child_count > (self.remaining() / 2) as u64 {
            return Err(IndexError::corrupt(format!(
                "child count {child_count} exceeds remaining data"
            )));
        }
        Ok(NodeRecord {
            frequency,
            child_count,
        })
    }
}
