use anyhow::{Context, Result};
use tree_sitter::{Node, Parser};

use crate::error::PubdeclError;
use crate::parser::types::*;

/// Source of declaration trees. The file driver only talks to this trait.
pub trait DeclarationParser {
    fn parse(&mut self, source: &str) -> Result<DeclarationTree>;
}

// Grammar node kinds that carry a declaration name.
const IDENTIFIER_KINDS: &[&str] = &["simple_identifier", "identifier", "type_identifier"];

/// Tree-sitter backed parser for Kotlin sources
pub struct KotlinParser {
    parser: Parser,
    strict: bool,
}

impl KotlinParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_kotlin_ng::LANGUAGE.into())
            .map_err(|e| PubdeclError::Language(e.to_string()))?;
        Ok(Self {
            parser,
            strict: false,
        })
    }

    /// Reject sources whose syntax tree contains error or missing nodes.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl DeclarationParser for KotlinParser {
    fn parse(&mut self, source: &str) -> Result<DeclarationTree> {
        let tree = self
            .parser
            .parse(source, None)
            .context("Kotlin parser produced no syntax tree")?;
        let root = tree.root_node();

        if root.has_error() {
            let error = syntax_error(root);
            if self.strict {
                return Err(error.into());
            }
            tracing::warn!(%error, "recovered from syntax errors, declarations may be missing");
        }

        let mut lowering = Lowering {
            source,
            tree: DeclarationTree::new(),
        };
        lowering.lower_members(root, None);

        tracing::trace!(declarations = lowering.tree.len(), "lowered syntax tree");
        Ok(lowering.tree)
    }
}

fn syntax_error(root: Node) -> PubdeclError {
    let mut errors = Vec::new();
    collect_errors(root, &mut errors);

    let (line, column) = errors
        .first()
        .map(|node| {
            let pos = node.start_position();
            (pos.row + 1, pos.column + 1)
        })
        .unwrap_or((1, 1));

    PubdeclError::Syntax {
        line,
        column,
        count: errors.len().max(1),
    }
}

fn collect_errors<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    if node.is_error() || node.is_missing() {
        out.push(node);
        return;
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, out);
    }
}

/// Converts the concrete syntax tree into a [`DeclarationTree`].
struct Lowering<'s> {
    source: &'s str,
    tree: DeclarationTree,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node) -> &'s str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    fn insert(&mut self, parent: Option<NodeId>, node: DeclarationNode) -> NodeId {
        match parent {
            Some(parent) => self.tree.add_child(parent, node),
            None => self.tree.add_root(node),
        }
    }

    fn lower_members(&mut self, container: Node, parent: Option<NodeId>) {
        let mut cursor = container.walk();
        for child in container.named_children(&mut cursor) {
            match child.kind() {
                "class_declaration" => self.lower_class(child, parent),
                "object_declaration" => self.lower_object(child, parent, false),
                "companion_object" => self.lower_object(child, parent, true),
                "enum_entry" => self.lower_enum_entry(child, parent),
                "function_declaration" => self.lower_function(child, parent),
                "property_declaration" => self.lower_property(child, parent),
                "secondary_constructor" => self.lower_constructor(child, parent),
                _ => {}
            }
        }
    }

    fn lower_class(&mut self, node: Node, parent: Option<NodeId>) {
        let mut modifiers = self.modifiers(node);
        let is_enum = has_token(node, "enum") || modifiers.contains(Modifiers::ENUM);
        if is_enum {
            modifiers |= Modifiers::ENUM;
        }

        let decl = ClassDecl {
            flags: ClassFlags {
                is_interface: has_token(node, "interface"),
                is_enum,
                is_data: modifiers.contains(Modifiers::DATA),
            },
            type_parameters: self.type_parameters(node),
        };
        let declaration =
            DeclarationNode::new(DeclarationKind::Class(decl), self.name_of(node)).with_modifiers(modifiers);
        let id = self.insert(parent, declaration);
        self.lower_body(node, id);
    }

    fn lower_enum_entry(&mut self, node: Node, parent: Option<NodeId>) {
        let declaration = DeclarationNode::new(DeclarationKind::Class(ClassDecl::default()), self.name_of(node))
            .with_modifiers(self.modifiers(node));
        let id = self.insert(parent, declaration);
        self.lower_body(node, id);
    }

    fn lower_object(&mut self, node: Node, parent: Option<NodeId>, companion: bool) {
        let mut name = self.name_of(node);
        if companion && name.is_none() {
            name = Some("Companion".to_string());
        }

        let declaration =
            DeclarationNode::new(DeclarationKind::Object, name).with_modifiers(self.modifiers(node));
        let id = self.insert(parent, declaration);
        self.lower_body(node, id);
    }

    fn lower_body(&mut self, node: Node, id: NodeId) {
        if let Some(body) = named_child(node, &["class_body", "enum_class_body"]) {
            self.tree.open_body(id);
            self.lower_members(body, Some(id));
        }
    }

    fn lower_function(&mut self, node: Node, parent: Option<NodeId>) {
        let params = named_child(node, &["function_value_parameters"]);
        let name_node = node.child_by_field_name("name").or_else(|| {
            // The name is the last identifier before the parameter list; anything
            // typed in front of it is the receiver.
            let mut cursor = node.walk();
            let last = node
                .named_children(&mut cursor)
                .take_while(|child| Some(*child) != params)
                .filter(|child| IDENTIFIER_KINDS.contains(&child.kind()))
                .last();
            last
        });

        let decl = FunctionDecl {
            receiver: self.receiver(node, name_node),
            type_parameters: self.type_parameters(node),
            parameters: params.map(|p| self.parameters(p)).unwrap_or_default(),
        };
        let name = name_node.map(|n| self.text(n).to_string());
        let declaration =
            DeclarationNode::new(DeclarationKind::Function(decl), name).with_modifiers(self.modifiers(node));
        self.insert(parent, declaration);
    }

    fn receiver(&self, node: Node, name_node: Option<Node>) -> Option<String> {
        if let Some(receiver) = node.child_by_field_name("receiver") {
            return Some(self.text(receiver).trim_end_matches('.').trim().to_string());
        }
        let name_node = name_node?;
        let mut cursor = node.walk();
        let receiver = node
            .named_children(&mut cursor)
            .take_while(|child| *child != name_node)
            .filter(|child| !matches!(child.kind(), "modifiers" | "type_parameters") && !is_comment(*child))
            .last()?;
        Some(self.text(receiver).trim().to_string())
    }

    fn lower_property(&mut self, node: Node, parent: Option<NodeId>) {
        let is_var = has_token(node, "var")
            || named_child(node, &["binding_pattern_kind"]).is_some_and(|kind| self.text(kind) == "var");

        let (name, type_text) = if let Some(variable) = named_child(node, &["variable_declaration"]) {
            (self.name_of(variable), self.type_after_colon(variable))
        } else if named_child(node, &["multi_variable_declaration"]).is_some() {
            (None, None)
        } else {
            (self.name_of(node), self.type_after_colon(node))
        };

        let decl = PropertyDecl { is_var, type_text };
        let declaration =
            DeclarationNode::new(DeclarationKind::Property(decl), name).with_modifiers(self.modifiers(node));
        self.insert(parent, declaration);
    }

    fn lower_constructor(&mut self, node: Node, parent: Option<NodeId>) {
        let parameters = named_child(node, &["function_value_parameters"])
            .map(|p| self.parameters(p))
            .unwrap_or_default();
        let declaration = DeclarationNode::new(DeclarationKind::Constructor(ConstructorDecl { parameters }), None)
            .with_modifiers(self.modifiers(node));
        self.insert(parent, declaration);
    }

    fn name_of(&self, node: Node) -> Option<String> {
        node.child_by_field_name("name")
            .or_else(|| named_child(node, IDENTIFIER_KINDS))
            .map(|name| self.text(name).to_string())
    }

    /// Collects keyword modifiers. Annotations are skipped.
    fn modifiers(&self, node: Node) -> Modifiers {
        let Some(list) = named_child(node, &["modifiers"]) else {
            return Modifiers::empty();
        };

        let mut modifiers = Modifiers::empty();
        let mut cursor = list.walk();
        for child in list.children(&mut cursor) {
            if child.kind() == "annotation" || is_comment(child) {
                continue;
            }
            for word in self.text(child).split_whitespace() {
                if let Some(flag) = Modifiers::from_keyword(word) {
                    modifiers |= flag;
                }
            }
        }
        modifiers
    }

    fn type_parameters(&self, node: Node) -> Vec<TypeParameter> {
        let Some(list) = named_child(node, &["type_parameters"]) else {
            return Vec::new();
        };

        let mut cursor = list.walk();
        let params = list
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "type_parameter")
            .filter_map(|param| {
                let name = self.name_of(param)?;
                Some(TypeParameter {
                    name,
                    bound: self.type_after_colon(param),
                })
            })
            .collect();
        params
    }

    fn parameters(&self, list: Node) -> Vec<Parameter> {
        let mut parameters: Vec<Parameter> = Vec::new();
        let mut default_pending = false;

        let mut cursor = list.walk();
        for child in list.children(&mut cursor) {
            if is_comment(child) {
                continue;
            }
            match child.kind() {
                "parameter" => {
                    parameters.push(self.parameter(child));
                    default_pending = false;
                }
                "=" => default_pending = true,
                _ if default_pending && child.is_named() => {
                    if let Some(last) = parameters.last_mut() {
                        last.default_value = Some(self.text(child).to_string());
                    }
                    default_pending = false;
                }
                _ => {}
            }
        }
        parameters
    }

    fn parameter(&self, node: Node) -> Parameter {
        let name = self.name_of(node);
        let type_text = self.type_after_colon(node);
        let default_value = node
            .child_by_field_name("default_value")
            .or_else(|| named_after_token(node, "="))
            .map(|value| self.text(value).to_string());

        Parameter {
            name,
            type_text,
            default_value,
        }
    }

    fn type_after_colon(&self, node: Node) -> Option<String> {
        node.child_by_field_name("type")
            .or_else(|| named_after_token(node, ":"))
            .map(|ty| self.text(ty).to_string())
    }
}

fn is_comment(node: Node) -> bool {
    node.kind().ends_with("comment")
}

fn named_child<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| kinds.contains(&child.kind()));
    found
}

/// Direct child token such as the `interface` or `enum` keyword.
fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// First named child following the anonymous `token` child.
fn named_after_token<'t>(node: Node<'t>, token: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .skip_while(|child| child.is_named() || child.kind() != token)
        .skip(1)
        .find(|child| child.is_named() && !is_comment(*child));
    found
}
