//! Incremental assembly of the document tree.
//!
//! Tables stay open while the document is parsed: a later header or dotted
//! key may add to a table opened earlier. Each open table remembers how it
//! was introduced, and [`reconcile`] decides whether a new reference to it
//! is legal.

#[cfg(test)]
#[path = "./builder_tests.rs"]
mod tests;

use crate::error::{Error, ErrorKind};
use crate::value::{Key, Value};
use crate::table::{INDEXED_TABLE_THRESHOLD, KeyIndex};
use crate::{Array, Span, Table};

/// How an open table was introduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Provenance {
    /// Sealed inline table.
    Inline,
    /// Walked through by a table header on the way to a deeper table.
    HeaderImplicit,
    /// Named by the last segment of a `[table]` header, or an element of an
    /// array of tables.
    HeaderExplicit,
    /// Prefix of a dotted key on a key/value line.
    DottedImplicit,
    /// Prefix of a dotted key inside an inline table.
    DottedExplicit,
}

/// Decides whether a table tagged `existing` may be referenced again in the
/// way described by `requested`, returning the table's new tag.
pub(crate) fn reconcile(existing: Provenance, requested: Provenance) -> Option<Provenance> {
    use Provenance::*;
    match (existing, requested) {
        (Inline, _) => None,
        (HeaderExplicit, HeaderImplicit) => Some(HeaderExplicit),
        (HeaderExplicit, _) => None,
        (HeaderImplicit, HeaderImplicit | HeaderExplicit) => Some(requested),
        (HeaderImplicit, _) => None,
        (DottedExplicit, DottedExplicit | DottedImplicit) => Some(DottedExplicit),
        (DottedExplicit, _) => None,
        (DottedImplicit, HeaderExplicit) => None,
        (DottedImplicit, _) => Some(requested),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

enum Slot {
    /// A completed value: scalar, static array or sealed inline table.
    Value(Value),
    /// An open table.
    Table(NodeId),
    /// Tables appended by `[[header]]`, in order.
    ArrayOfTables { span: Span, tables: Vec<NodeId> },
}

struct Node {
    span: Span,
    provenance: Provenance,
    entries: Vec<(Key, Slot)>,
    index: Option<KeyIndex>,
}

pub(crate) struct DocumentBuilder {
    nodes: Vec<Node>,
}

fn duplicate(key: &Key, first: Span) -> Error {
    (
        ErrorKind::DuplicateKey {
            key: key.name.clone(),
            first,
        },
        key.span,
    )
        .into()
}

impl DocumentBuilder {
    /// Creates a builder whose root table is tagged `provenance`.
    pub fn new(provenance: Provenance) -> DocumentBuilder {
        DocumentBuilder {
            nodes: vec![Node {
                span: Span::default(),
                provenance,
                entries: Vec::new(),
                index: None,
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn new_node(&mut self, span: Span, provenance: Provenance) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            span,
            provenance,
            entries: Vec::new(),
            index: None,
        });
        id
    }

    /// Entry position of `name` in `node`, using the hash index for large tables.
    fn find(&self, node: NodeId, name: &str) -> Option<usize> {
        let node = &self.nodes[node.0];
        match &node.index {
            Some(index) => index.get(name).copied(),
            None => node.entries.iter().position(|(key, _)| key.name == name),
        }
    }

    fn push_entry(&mut self, node: NodeId, key: Key, slot: Slot) {
        let node = &mut self.nodes[node.0];
        let position = node.entries.len();
        if let Some(index) = &mut node.index {
            index.insert(key.name.clone(), position);
        }
        node.entries.push((key, slot));
        if node.index.is_none() && node.entries.len() >= INDEXED_TABLE_THRESHOLD {
            node.index = Some(
                node.entries
                    .iter()
                    .enumerate()
                    .map(|(i, (key, _))| (key.name.clone(), i))
                    .collect(),
            );
        }
    }

    /// Returns the child table of `parent` named by `key`, creating it with
    /// tag `requested` if absent.
    ///
    /// `span` becomes the table's span when it is created, or when an
    /// implicitly created table is later defined by its own header.
    pub fn get_or_create_sub_table(
        &mut self,
        parent: NodeId,
        key: &Key,
        requested: Provenance,
        span: Span,
    ) -> Result<NodeId, Error> {
        let Some(index) = self.find(parent, &key.name) else {
            let id = self.new_node(span, requested);
            self.push_entry(parent, key.clone(), Slot::Table(id));
            return Ok(id);
        };

        let (first, slot) = &self.nodes[parent.0].entries[index];
        let first = first.span;
        let target = match slot {
            Slot::Table(child) => *child,
            // `[a.b]` after `[[a]]` extends the most recent element
            Slot::ArrayOfTables { tables, .. } => match tables.last() {
                Some(last) => *last,
                None => return Err(duplicate(key, first)),
            },
            Slot::Value(Value::Table(_)) => return Err(duplicate(key, first)),
            Slot::Value(_) if requested == Provenance::HeaderExplicit => {
                return Err(duplicate(key, first));
            }
            Slot::Value(_) => {
                return Err((
                    ErrorKind::CannotDefineSubKeyOfNonTable {
                        key: key.name.clone(),
                    },
                    key.span,
                )
                    .into());
            }
        };

        let node = &mut self.nodes[target.0];
        let Some(provenance) = reconcile(node.provenance, requested) else {
            return Err(duplicate(key, first));
        };
        if provenance == Provenance::HeaderExplicit && node.provenance != provenance {
            node.span = span;
        }
        node.provenance = provenance;
        Ok(target)
    }

    /// Appends a new table to the array of tables at `key`, creating the
    /// array if absent. `span` is the span of the `[[header]]`.
    pub fn create_array_sub_table(
        &mut self,
        parent: NodeId,
        key: &Key,
        span: Span,
    ) -> Result<NodeId, Error> {
        match self.find(parent, &key.name) {
            None => {
                let element = self.new_node(span, Provenance::HeaderExplicit);
                let slot = Slot::ArrayOfTables {
                    span,
                    tables: vec![element],
                };
                self.push_entry(parent, key.clone(), slot);
                Ok(element)
            }
            Some(index) => {
                let first = self.nodes[parent.0].entries[index].0.span;
                if !matches!(
                    self.nodes[parent.0].entries[index].1,
                    Slot::ArrayOfTables { .. }
                ) {
                    return Err(duplicate(key, first));
                }
                let element = self.new_node(span, Provenance::HeaderExplicit);
                if let Slot::ArrayOfTables { tables, .. } =
                    &mut self.nodes[parent.0].entries[index].1
                {
                    tables.push(element);
                }
                Ok(element)
            }
        }
    }

    /// Adds a completed value under `key`.
    pub fn add(&mut self, node: NodeId, key: Key, value: Value) -> Result<(), Error> {
        if let Some(index) = self.find(node, &key.name) {
            let first = self.nodes[node.0].entries[index].0.span;
            return Err(duplicate(&key, first));
        }
        self.push_entry(node, key, Slot::Value(value));
        Ok(())
    }

    /// Walks `prefix` from `node`, tagging new tables with `provenance`, then
    /// adds `value` under `last`.
    pub fn insert_dotted(
        &mut self,
        node: NodeId,
        prefix: &[Key],
        last: Key,
        value: Value,
        provenance: Provenance,
    ) -> Result<(), Error> {
        let mut table = node;
        for key in prefix {
            table = self.get_or_create_sub_table(table, key, provenance, key.span)?;
        }
        self.add(table, last, value)
    }

    /// Closes every table and returns the root, spanning `span`.
    pub fn finish(mut self, span: Span) -> Table {
        self.nodes[0].span = span;
        self.build(NodeId(0))
    }

    fn build(&mut self, id: NodeId) -> Table {
        let span = self.nodes[id.0].span;
        let entries = std::mem::take(&mut self.nodes[id.0].entries);
        let index = self.nodes[id.0].index.take();
        let entries = entries
            .into_iter()
            .map(|(key, slot)| {
                let value = match slot {
                    Slot::Value(value) => value,
                    Slot::Table(child) => Value::Table(self.build(child)),
                    Slot::ArrayOfTables { span, tables } => {
                        let values = tables
                            .into_iter()
                            .map(|child| Value::Table(self.build(child)))
                            .collect();
                        Value::Array(Array::from_values(span, values))
                    }
                };
                (key, value)
            })
            .collect();
        Table::from_indexed_entries(span, entries, index)
    }
}
