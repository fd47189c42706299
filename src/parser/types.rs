use bitflags::bitflags;

/// Index of a node inside a [`DeclarationTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

bitflags! {
    /// Keyword modifiers attached to a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const INTERNAL = 1 << 2;
        const PROTECTED = 1 << 3;
        const ABSTRACT = 1 << 4;
        const OPEN = 1 << 5;
        const FINAL = 1 << 6;
        const SEALED = 1 << 7;
        const DATA = 1 << 8;
        const ENUM = 1 << 9;
        const INNER = 1 << 10;
        const VALUE = 1 << 11;
        const ANNOTATION = 1 << 12;
        const OVERRIDE = 1 << 13;
        const LATEINIT = 1 << 14;
        const CONST = 1 << 15;
        const SUSPEND = 1 << 16;
        const INLINE = 1 << 17;
        const INFIX = 1 << 18;
        const OPERATOR = 1 << 19;
        const TAILREC = 1 << 20;
        const EXTERNAL = 1 << 21;
        const EXPECT = 1 << 22;
        const ACTUAL = 1 << 23;

        /// Modifiers that hide a declaration from the public surface.
        const RESTRICTED = Self::PRIVATE.bits() | Self::INTERNAL.bits() | Self::PROTECTED.bits();
    }
}

impl Modifiers {
    /// Map a single modifier keyword to its flag.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let flag = match keyword {
            "public" => Self::PUBLIC,
            "private" => Self::PRIVATE,
            "internal" => Self::INTERNAL,
            "protected" => Self::PROTECTED,
            "abstract" => Self::ABSTRACT,
            "open" => Self::OPEN,
            "final" => Self::FINAL,
            "sealed" => Self::SEALED,
            "data" => Self::DATA,
            "enum" => Self::ENUM,
            "inner" => Self::INNER,
            "value" => Self::VALUE,
            "annotation" => Self::ANNOTATION,
            "override" => Self::OVERRIDE,
            "lateinit" => Self::LATEINIT,
            "const" => Self::CONST,
            "suspend" => Self::SUSPEND,
            "inline" => Self::INLINE,
            "infix" => Self::INFIX,
            "operator" => Self::OPERATOR,
            "tailrec" => Self::TAILREC,
            "external" => Self::EXTERNAL,
            "expect" => Self::EXPECT,
            "actual" => Self::ACTUAL,
            _ => return None,
        };
        Some(flag)
    }

    pub fn is_restricted(&self) -> bool {
        self.intersects(Self::RESTRICTED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub bound: Option<String>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound: None,
        }
    }

    pub fn bounded(name: impl Into<String>, bound: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound: Some(bound.into()),
        }
    }
}

/// A value parameter. `name` is absent for anonymous parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: Option<String>,
    pub type_text: Option<String>,
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn named(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_text: Some(type_text.into()),
            default_value: None,
        }
    }

    pub fn anonymous(type_text: impl Into<String>) -> Self {
        Self {
            name: None,
            type_text: Some(type_text.into()),
            default_value: None,
        }
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionDecl {
    pub receiver: Option<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassFlags {
    pub is_interface: bool,
    pub is_enum: bool,
    pub is_data: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDecl {
    pub flags: ClassFlags,
    pub type_parameters: Vec<TypeParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDecl {
    pub is_var: bool,
    pub type_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub parameters: Vec<Parameter>,
}

/// The closed set of declaration kinds that get rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationKind {
    Function(FunctionDecl),
    Class(ClassDecl),
    Property(PropertyDecl),
    Object,
    Constructor(ConstructorDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationNode {
    pub kind: DeclarationKind,
    pub name: Option<String>,
    pub modifiers: Modifiers,
    /// Member declarations in source order; `None` when the declaration has no body.
    pub body: Option<Vec<NodeId>>,
    /// Enclosing declaration. Only used for ancestor lookups.
    pub parent: Option<NodeId>,
}

impl DeclarationNode {
    pub fn new(kind: DeclarationKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            modifiers: Modifiers::empty(),
            body: None,
            parent: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        self.body.as_deref().unwrap_or(&[])
    }
}

/// All declarations of one source file, stored in an arena.
///
/// Nodes are only ever appended, so a child always has a larger id than its
/// parent and the parent chain cannot form a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationTree {
    nodes: Vec<DeclarationNode>,
    roots: Vec<NodeId>,
}

impl DeclarationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level declaration.
    pub fn add_root(&mut self, node: DeclarationNode) -> NodeId {
        let id = self.push(node, None);
        self.roots.push(id);
        id
    }

    /// Append a member declaration to `parent`'s body, creating the body if needed.
    pub fn add_child(&mut self, parent: NodeId, node: DeclarationNode) -> NodeId {
        let id = self.push(node, Some(parent));
        self.nodes[parent.0].body.get_or_insert_with(Vec::new).push(id);
        id
    }

    /// Mark `id` as having a (possibly empty) body.
    pub fn open_body(&mut self, id: NodeId) {
        self.nodes[id.0].body.get_or_insert_with(Vec::new);
    }

    fn push(&mut self, mut node: DeclarationNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        self.nodes.push(node);
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &DeclarationNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&DeclarationNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.node(id).parent,
        }
    }

    /// Closest enclosing class of `id`, if any. Objects do not count.
    pub fn nearest_class(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .find(|ancestor| matches!(self.node(*ancestor).kind, DeclarationKind::Class(_)))
    }
}

pub struct Ancestors<'a> {
    tree: &'a DeclarationTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
