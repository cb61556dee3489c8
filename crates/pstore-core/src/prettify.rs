// crates/pstore-core/src/prettify.rs
// ============================================================================
// Module: Pretty Printer
// Description: Indented text rendering for nested response structures.
// Purpose: Display any serializable response in a stable, readable form.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`prettify`] walks any [`Serialize`] value through a private serializer,
//! builds a small node tree, and renders it as indented text:
//!
//! - structures render one `Field: value` line per field in declaration
//!   order; fields that serialize as `None` or unit are omitted;
//! - sequences render inline up to three elements and one per line beyond;
//! - byte buffers render as `<binary> len N` rather than their contents;
//! - [`crate::core::Timestamp`] values render as plain RFC 3339 text;
//! - strings and enum variants render quoted, numbers and booleans bare.
//!
//! ```
//! use pstore_core::prettify::prettify;
//!
//! #[derive(serde::Serialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Output {
//!     name: String,
//!     version: i64,
//!     selector: Option<String>,
//! }
//!
//! let text = prettify(&Output { name: "/app/db".to_string(), version: 3, selector: None });
//! assert_eq!(text, "{\n  Name: \"/app/db\",\n  Version: 3\n}");
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;
use std::fmt::Write as _;

use serde::Serialize;
use serde::ser;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Newtype name that marks a value as a timestamp rendered in text form.
pub(crate) const TIMESTAMP_TOKEN: &str = "$pstore::Timestamp";
/// Sequences longer than this render one element per line.
const INLINE_SEQ_LIMIT: usize = 3;
/// Indent added per nesting level.
const INDENT_STEP: usize = 2;
/// Placeholder for values with no renderable content.
const INVALID_VALUE: &str = "<invalid value>";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while walking a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrettifyError {
    /// A `Serialize` implementation reported an error.
    #[error("prettify failed: {0}")]
    Custom(String),
    /// A map key did not serialize to a scalar.
    #[error("map keys must be strings, numbers, or booleans")]
    UnsupportedKey,
}

impl ser::Error for PrettifyError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Renders a value as indented text.
///
/// Serialization failures render as `<invalid value: ...>` instead of
/// propagating; use [`try_prettify`] to observe them.
#[must_use]
pub fn prettify<T>(value: &T) -> String
where
    T: Serialize + ?Sized,
{
    try_prettify(value).unwrap_or_else(|err| format!("<invalid value: {err}>"))
}

/// Renders a value as indented text, reporting serialization failures.
///
/// # Errors
///
/// Returns [`PrettifyError`] when the value's `Serialize` implementation
/// fails or a map key is not a scalar.
pub fn try_prettify<T>(value: &T) -> Result<String, PrettifyError>
where
    T: Serialize + ?Sized,
{
    let node = value.serialize(NodeSerializer)?;
    let mut buf = String::new();
    render(&node, 0, &mut buf);
    Ok(buf)
}

// ============================================================================
// SECTION: Node Tree
// ============================================================================

/// Intermediate rendering tree.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    /// Structure, struct variant, or map entries in serialization order.
    Record(Vec<(String, Node)>),
    /// Sequence or tuple elements.
    Seq(Vec<Node>),
    /// Text rendered quoted.
    Text(String),
    /// Text rendered verbatim.
    Plain(String),
    /// Single byte; runs of bytes collapse into [`Node::Binary`].
    Byte(u8),
    /// Byte buffer of the given length.
    Binary(usize),
    /// `None` or unit.
    Absent,
}

/// Renders a node at the given indent.
fn render(node: &Node, indent: usize, buf: &mut String) {
    match node {
        Node::Record(fields) => render_record(fields, indent, buf),
        Node::Seq(items) => render_seq(items, indent, buf),
        Node::Text(text) => push_quoted(buf, text),
        Node::Plain(text) => buf.push_str(text),
        Node::Byte(byte) => {
            let _ = write!(buf, "{byte}");
        }
        Node::Binary(len) => {
            let _ = write!(buf, "<binary> len {len}");
        }
        Node::Absent => buf.push_str(INVALID_VALUE),
    }
}

/// Renders `{ Name: value, ... }` with one field per line.
fn render_record(fields: &[(String, Node)], indent: usize, buf: &mut String) {
    if fields.is_empty() {
        buf.push_str("{}");
        return;
    }
    buf.push_str("{\n");
    for (index, (name, value)) in fields.iter().enumerate() {
        push_indent(buf, indent + INDENT_STEP);
        buf.push_str(name);
        buf.push_str(": ");
        render(value, indent + INDENT_STEP, buf);
        if index + 1 < fields.len() {
            buf.push_str(",\n");
        }
    }
    buf.push('\n');
    push_indent(buf, indent);
    buf.push('}');
}

/// Renders `[a,b]` inline or one element per line for longer sequences.
fn render_seq(items: &[Node], indent: usize, buf: &mut String) {
    let multiline = items.len() > INLINE_SEQ_LIMIT;
    buf.push('[');
    if multiline {
        buf.push('\n');
    }
    for (index, item) in items.iter().enumerate() {
        if multiline {
            push_indent(buf, indent + INDENT_STEP);
        }
        render(item, indent + INDENT_STEP, buf);
        if index + 1 < items.len() {
            buf.push(',');
            if multiline {
                buf.push('\n');
            }
        }
    }
    if multiline {
        buf.push('\n');
        push_indent(buf, indent);
    }
    buf.push(']');
}

/// Appends `width` spaces.
fn push_indent(buf: &mut String, width: usize) {
    buf.extend(std::iter::repeat_n(' ', width));
}

/// Appends a double-quoted, escaped string.
fn push_quoted(buf: &mut String, value: &str) {
    buf.push('"');
    for ch in value.chars() {
        match ch {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            ch if ch.is_control() => {
                let _ = write!(buf, "\\u{{{:04x}}}", u32::from(ch));
            }
            ch => buf.push(ch),
        }
    }
    buf.push('"');
}

// ============================================================================
// SECTION: Serializer
// ============================================================================

/// Serializer producing a [`Node`] tree.
struct NodeSerializer;

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = PrettifyError;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = VariantBuilder<SeqBuilder>;
    type SerializeMap = MapBuilder;
    type SerializeStruct = StructBuilder;
    type SerializeStructVariant = VariantBuilder<StructBuilder>;

    fn serialize_bool(self, v: bool) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_i16(self, v: i16) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_i32(self, v: i32) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_i64(self, v: i64) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_i128(self, v: i128) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Node, PrettifyError> {
        Ok(Node::Byte(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_u32(self, v: u32) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_u64(self, v: u64) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_u128(self, v: u128) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_f64(self, v: f64) -> Result<Node, PrettifyError> {
        Ok(Node::Plain(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<Node, PrettifyError> {
        Ok(Node::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Node, PrettifyError> {
        Ok(Node::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node, PrettifyError> {
        Ok(Node::Binary(v.len()))
    }

    fn serialize_none(self) -> Result<Node, PrettifyError> {
        Ok(Node::Absent)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Node, PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node, PrettifyError> {
        Ok(Node::Absent)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Node, PrettifyError> {
        Ok(Node::Record(Vec::new()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node, PrettifyError> {
        Ok(Node::Text(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Node, PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        match value.serialize(self)? {
            Node::Text(text) if name == TIMESTAMP_TOKEN => Ok(Node::Plain(text)),
            node => Ok(node),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node, PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        let node = value.serialize(NodeSerializer)?;
        Ok(Node::Record(vec![(variant.to_string(), node)]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, PrettifyError> {
        Ok(SeqBuilder::new(len.unwrap_or(0), true))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, PrettifyError> {
        Ok(SeqBuilder::new(len, false))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, PrettifyError> {
        Ok(SeqBuilder::new(len, false))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantBuilder<SeqBuilder>, PrettifyError> {
        Ok(VariantBuilder {
            variant,
            inner: SeqBuilder::new(len, false),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder, PrettifyError> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<StructBuilder, PrettifyError> {
        Ok(StructBuilder {
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantBuilder<StructBuilder>, PrettifyError> {
        Ok(VariantBuilder {
            variant,
            inner: StructBuilder {
                fields: Vec::with_capacity(len),
            },
        })
    }
}

// ============================================================================
// SECTION: Compound Builders
// ============================================================================

/// Collects sequence and tuple elements.
struct SeqBuilder {
    /// Elements collected so far.
    items: Vec<Node>,
    /// Collapse a non-empty run of bytes into a binary placeholder.
    collapse_bytes: bool,
}

impl SeqBuilder {
    /// Creates a builder with the given capacity hint.
    fn new(capacity: usize, collapse_bytes: bool) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            collapse_bytes,
        }
    }

    /// Pushes one serialized element.
    fn push<T>(&mut self, value: &T) -> Result<(), PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        self.items.push(value.serialize(NodeSerializer)?);
        Ok(())
    }

    /// Finishes the sequence.
    fn finish(self) -> Node {
        let all_bytes = self.items.iter().all(|item| matches!(item, Node::Byte(_)));
        if self.collapse_bytes && all_bytes && !self.items.is_empty() {
            return Node::Binary(self.items.len());
        }
        Node::Seq(self.items)
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Node;
    type Error = PrettifyError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node, PrettifyError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Node;
    type Error = PrettifyError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node, PrettifyError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Node;
    type Error = PrettifyError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node, PrettifyError> {
        Ok(self.finish())
    }
}

/// Collects structure fields, dropping absent values.
struct StructBuilder {
    /// Fields collected so far.
    fields: Vec<(String, Node)>,
}

impl ser::SerializeStruct for StructBuilder {
    type Ok = Node;
    type Error = PrettifyError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        let node = value.serialize(NodeSerializer)?;
        if node != Node::Absent {
            self.fields.push((key.to_string(), node));
        }
        Ok(())
    }

    fn end(self) -> Result<Node, PrettifyError> {
        Ok(Node::Record(self.fields))
    }
}

/// Collects map entries in serialization order.
struct MapBuilder {
    /// Entries collected so far.
    entries: Vec<(String, Node)>,
    /// Key awaiting its value.
    pending_key: Option<String>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Node;
    type Error = PrettifyError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        let key = match key.serialize(NodeSerializer)? {
            Node::Text(text) | Node::Plain(text) => text,
            Node::Byte(byte) => byte.to_string(),
            _ => return Err(PrettifyError::UnsupportedKey),
        };
        self.pending_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| PrettifyError::Custom("map value without key".to_string()))?;
        self.entries.push((key, value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Node, PrettifyError> {
        Ok(Node::Record(self.entries))
    }
}

/// Wraps a compound builder under its enum variant name.
struct VariantBuilder<B> {
    /// Variant name.
    variant: &'static str,
    /// Builder for the variant body.
    inner: B,
}

impl ser::SerializeTupleVariant for VariantBuilder<SeqBuilder> {
    type Ok = Node;
    type Error = PrettifyError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        self.inner.push(value)
    }

    fn end(self) -> Result<Node, PrettifyError> {
        Ok(Node::Record(vec![(self.variant.to_string(), self.inner.finish())]))
    }
}

impl ser::SerializeStructVariant for VariantBuilder<StructBuilder> {
    type Ok = Node;
    type Error = PrettifyError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), PrettifyError>
    where
        T: Serialize + ?Sized,
    {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Node, PrettifyError> {
        let body = ser::SerializeStruct::end(self.inner)?;
        Ok(Node::Record(vec![(self.variant.to_string(), body)]))
    }
}

#[cfg(test)]
mod tests;
