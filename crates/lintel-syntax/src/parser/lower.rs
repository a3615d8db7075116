//! Lowering from the Tree-sitter Ruby grammar into the arena tree.
//!
//! Anonymous tokens and comments are dropped. Keyword arguments written
//! without braces are grouped into one synthetic `hash` node so that
//! `enum status: {...}, _prefix: true` and `enum({status: {...}})` have the
//! same shape.

use crate::error::SyntaxError;
use crate::tree::{NodeId, NodeKind, Tree, TreeBuilder};

pub(super) fn lower(root: tree_sitter::Node<'_>, source: &str) -> Result<Tree, SyntaxError> {
    let mut lowering = Lowering {
        builder: TreeBuilder::new(source),
        source,
    };
    let Some(id) = lowering.lower(root)? else {
        return Err(SyntaxError::invalid_tree("root node was dropped during lowering"));
    };
    lowering.builder.finish(id)
}

type Lowered = Result<Option<NodeId>, SyntaxError>;

struct Lowering<'s> {
    builder: TreeBuilder,
    source: &'s str,
}

impl Lowering<'_> {
    fn text(&self, node: tree_sitter::Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    fn lower(&mut self, node: tree_sitter::Node<'_>) -> Lowered {
        let range = node.byte_range();
        let id = match node.kind() {
            "comment" => return Ok(None),
            "program" => {
                let slots = self.named_children(node)?;
                self.builder.node(NodeKind::Program, range, slots)?
            }
            "body_statement" | "block_body" | "parenthesized_statements" => {
                let slots = self.named_children(node)?;
                self.builder.node(NodeKind::Begin, range, slots)?
            }
            "class" => {
                let name = self.field(node, "name")?;
                let superclass = match node.child_by_field_name("superclass") {
                    Some(clause) => self.first_named(clause)?,
                    None => None,
                };
                let body = self.body(node, &["name", "superclass"])?;
                self.builder
                    .node(NodeKind::Class, range, vec![name, superclass, body])?
            }
            "module" => {
                let name = self.field(node, "name")?;
                let body = self.body(node, &["name"])?;
                self.builder.node(NodeKind::Module, range, vec![name, body])?
            }
            "method" => {
                let name = self.name(node.child_by_field_name("name"))?;
                let params = self.field(node, "parameters")?;
                let body = self.body(node, &["name", "parameters"])?;
                self.builder
                    .node(NodeKind::Def, range, vec![name, params, body])?
            }
            "singleton_method" => {
                let receiver = self.field(node, "object")?;
                let name = self.name(node.child_by_field_name("name"))?;
                let params = self.field(node, "parameters")?;
                let body = self.body(node, &["object", "name", "parameters"])?;
                self.builder
                    .node(NodeKind::Defs, range, vec![receiver, name, params, body])?
            }
            "call" => {
                let mut slots = vec![
                    self.field(node, "receiver")?,
                    self.name(node.child_by_field_name("method"))?,
                ];
                if let Some(arguments) = node.child_by_field_name("arguments") {
                    slots.extend(self.arguments(arguments)?);
                }
                if let Some(block) = self.field(node, "block")? {
                    slots.push(Some(block));
                }
                self.builder.node(NodeKind::Call, range, slots)?
            }
            "block" | "do_block" => {
                let params = self.field(node, "parameters")?;
                let body = self.body(node, &["parameters"])?;
                self.builder.node(NodeKind::Block, range, vec![params, body])?
            }
            "method_parameters" | "block_parameters" | "lambda_parameters" => {
                let slots = self.named_children(node)?;
                self.builder.node(NodeKind::Params, range, slots)?
            }
            "pair" => {
                let key = match node.child_by_field_name("key") {
                    Some(label) if self.is_quoted_label(label) => {
                        let value = self.plain_content(label);
                        let label_range = label.byte_range();
                        Some(self.builder.push(NodeKind::Sym, label_range, value, Vec::new())?)
                    }
                    Some(other) => self.lower(other)?,
                    None => None,
                };
                let value = self.field(node, "value")?;
                self.builder.node(NodeKind::Pair, range, vec![key, value])?
            }
            "hash" => {
                let slots = self.named_children(node)?;
                self.builder.node(NodeKind::Hash, range, slots)?
            }
            "array" => {
                let slots = self.named_children(node)?;
                self.builder.node(NodeKind::Array, range, slots)?
            }
            "simple_symbol" => {
                let text = self.text(node);
                let name = text.strip_prefix(':').unwrap_or(text).to_owned();
                self.builder.leaf(NodeKind::Sym, range, name)?
            }
            "hash_key_symbol" => {
                let name = self.text(node).to_owned();
                self.builder.leaf(NodeKind::Sym, range, name)?
            }
            "delimited_symbol" => {
                let value = self.plain_content(node);
                self.builder.push(NodeKind::Sym, range, value, Vec::new())?
            }
            "string" => {
                let value = self.plain_content(node);
                self.builder.push(NodeKind::Str, range, value, Vec::new())?
            }
            "integer" => self.leaf(NodeKind::Int, node)?,
            "float" => self.leaf(NodeKind::Float, node)?,
            "identifier" => self.leaf(NodeKind::Ident, node)?,
            "constant" => self.leaf(NodeKind::Const, node)?,
            "scope_resolution" => {
                let text = self.text(node);
                let name = text.strip_prefix("::").unwrap_or(text).to_owned();
                self.builder.leaf(NodeKind::Const, range, name)?
            }
            "instance_variable" => self.leaf(NodeKind::Ivar, node)?,
            "true" => self.builder.node(NodeKind::True, range, Vec::new())?,
            "false" => self.builder.node(NodeKind::False, range, Vec::new())?,
            "nil" => self.builder.node(NodeKind::Nil, range, Vec::new())?,
            "self" => self.builder.node(NodeKind::SelfRef, range, Vec::new())?,
            "hash_splat_argument" => {
                let slots = self.named_children(node)?;
                self.builder.node(NodeKind::KwSplat, range, slots)?
            }
            "splat_argument" => {
                let slots = self.named_children(node)?;
                self.builder.node(NodeKind::Splat, range, slots)?
            }
            "block_argument" => {
                let slots = self.named_children(node)?;
                self.builder.node(NodeKind::BlockPass, range, slots)?
            }
            _ => {
                let slots = self.named_children(node)?;
                self.builder.node(NodeKind::Other, range, slots)?
            }
        };
        Ok(Some(id))
    }

    fn leaf(&mut self, kind: NodeKind, node: tree_sitter::Node<'_>) -> Result<NodeId, SyntaxError> {
        let value = self.text(node).to_owned();
        self.builder.leaf(kind, node.byte_range(), value)
    }

    /// Lowers a method name of any token kind (identifier, constant, setter,
    /// operator) into an `ident` leaf.
    fn name(&mut self, node: Option<tree_sitter::Node<'_>>) -> Lowered {
        node.map(|name| self.leaf(NodeKind::Ident, name)).transpose()
    }

    fn field(&mut self, node: tree_sitter::Node<'_>, name: &str) -> Lowered {
        match node.child_by_field_name(name) {
            Some(child) => self.lower(child),
            None => Ok(None),
        }
    }

    fn first_named(&mut self, node: tree_sitter::Node<'_>) -> Lowered {
        let mut cursor = node.walk();
        let first = node
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment");
        match first {
            Some(child) => self.lower(child),
            None => Ok(None),
        }
    }

    fn named_children(
        &mut self,
        node: tree_sitter::Node<'_>,
    ) -> Result<Vec<Option<NodeId>>, SyntaxError> {
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        let mut slots = Vec::with_capacity(children.len());
        for child in children {
            if let Some(id) = self.lower(child)? {
                slots.push(Some(id));
            }
        }
        Ok(slots)
    }

    /// Lowers the body of a definition.
    ///
    /// Uses the `body` field when the grammar provides one; otherwise the
    /// named children outside `exclude` are wrapped in a synthetic `begin`.
    fn body(&mut self, node: tree_sitter::Node<'_>, exclude: &[&str]) -> Lowered {
        if let Some(body) = node.child_by_field_name("body") {
            return self.lower(body);
        }

        let excluded: Vec<usize> = exclude
            .iter()
            .filter_map(|field| node.child_by_field_name(field))
            .map(|child| child.id())
            .collect();
        let mut cursor = node.walk();
        let statements: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|child| !excluded.contains(&child.id()) && child.kind() != "comment")
            .collect();
        let (Some(first), Some(last)) = (statements.first(), statements.last()) else {
            return Ok(None);
        };
        let range = first.start_byte()..last.end_byte();

        let mut slots = Vec::with_capacity(statements.len());
        for statement in &statements {
            slots.push(self.lower(*statement)?);
        }
        Ok(Some(self.builder.node(NodeKind::Begin, range, slots)?))
    }

    /// Lowers an `argument_list`, grouping each run of bare `key: value` and
    /// `**splat` arguments into a synthetic `hash`.
    fn arguments(
        &mut self,
        list: tree_sitter::Node<'_>,
    ) -> Result<Vec<Option<NodeId>>, SyntaxError> {
        let mut cursor = list.walk();
        let children: Vec<_> = list
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect();

        let mut slots = Vec::with_capacity(children.len());
        let mut keywords = Vec::new();
        for child in children {
            if matches!(child.kind(), "pair" | "hash_splat_argument") {
                keywords.push(child);
                continue;
            }
            self.flush_keywords(&mut keywords, &mut slots)?;
            slots.push(self.lower(child)?);
        }
        self.flush_keywords(&mut keywords, &mut slots)?;
        Ok(slots)
    }

    fn flush_keywords(
        &mut self,
        keywords: &mut Vec<tree_sitter::Node<'_>>,
        slots: &mut Vec<Option<NodeId>>,
    ) -> Result<(), SyntaxError> {
        let (Some(first), Some(last)) = (keywords.first(), keywords.last()) else {
            return Ok(());
        };
        let range = first.start_byte()..last.end_byte();

        let mut pairs = Vec::with_capacity(keywords.len());
        for keyword in keywords.drain(..) {
            pairs.push(self.lower(keyword)?);
        }
        slots.push(Some(self.builder.node(NodeKind::Hash, range, pairs)?));
        Ok(())
    }

    /// A quoted pair key written as a label (`"order status": ...`) is a
    /// symbol, unlike the same string before `=>`.
    fn is_quoted_label(&self, key: tree_sitter::Node<'_>) -> bool {
        key.kind() == "string"
            && self
                .source
                .get(key.end_byte()..)
                .is_some_and(|rest| rest.starts_with(':'))
    }

    /// Returns the literal content of a string or quoted symbol when it
    /// consists of plain text only, without interpolation or escapes.
    fn plain_content(&self, node: tree_sitter::Node<'_>) -> Option<String> {
        let mut cursor = node.walk();
        let mut content = String::new();
        for child in node.named_children(&mut cursor) {
            if child.kind() != "string_content" {
                return None;
            }
            content.push_str(self.text(child));
        }
        Some(content)
    }
}
