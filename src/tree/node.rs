//! The declaration tree and its nodes.

use std::fmt;
use std::sync::OnceLock;

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::sym::{Modifiers, SymbolEntry, TypeKind, TypeRef};

/// Index of a node within its [`DeclTree`].
///
/// Only meaningful together with the tree that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// The syntactic kind of a declaration node.
///
/// Only declarations are modeled; statements and expressions are not part
/// of this boundary. An anonymous class body is a `TypeDecl` with no name.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// The root of every tree. The package name lives on the tree itself.
    CompilationUnit,
    TypeDecl {
        kind: TypeKind,
        /// `None` for anonymous class bodies.
        name: Option<SmolStr>,
        modifiers: Modifiers,
        type_params: Vec<SmolStr>,
    },
    Method {
        name: SmolStr,
        modifiers: Modifiers,
        varargs: bool,
        type_params: Vec<SmolStr>,
    },
    Constructor {
        modifiers: Modifiers,
        varargs: bool,
    },
    Field {
        modifiers: Modifiers,
        type_ref: TypeRef,
    },
    EnumConstant,
    FormalParameter {
        type_ref: TypeRef,
    },
    LocalVarDecl {
        type_ref: TypeRef,
    },
    /// The name-bearing node of a field, enum constant, formal parameter
    /// or local variable. This is where their symbols are attached.
    VariableDeclaratorId {
        name: SmolStr,
    },
}

impl NodeKind {
    pub fn is_type_decl(&self) -> bool {
        matches!(self, NodeKind::TypeDecl { .. })
    }

    pub fn is_executable(&self) -> bool {
        matches!(self, NodeKind::Method { .. } | NodeKind::Constructor { .. })
    }
}

pub(crate) struct DeclNode {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) range: TextRange,
    pub(crate) symbol: OnceLock<SymbolEntry>,
}

/// A compilation unit's declaration tree, as handed over by the parsing
/// layer.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Each declaration
/// node has a single-assignment symbol slot, filled exactly once by the
/// naming pass; attaching twice is an invariant violation and panics.
///
/// The tree is immutable after construction apart from those slots, so a
/// shared `&DeclTree` can be handed to a traversal on another thread.
pub struct DeclTree {
    file: FileId,
    package: SmolStr,
    nodes: Vec<DeclNode>,
}

impl DeclTree {
    pub(crate) fn new(file: FileId, package: SmolStr, nodes: Vec<DeclNode>) -> Self {
        Self {
            file,
            package,
            nodes,
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// Package of this compilation unit, empty for the default package.
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// The root `CompilationUnit` node.
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all node ids, in creation (document) order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId::new)
    }

    fn node(&self, id: NodeId) -> &DeclNode {
        &self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.node(id).range
    }

    /// A named type declaration directly inside a method or constructor
    /// body is a local class.
    pub fn is_local_type(&self, id: NodeId) -> bool {
        match self.kind(id) {
            NodeKind::TypeDecl { name: Some(_), .. } => self
                .parent(id)
                .is_some_and(|p| self.kind(p).is_executable()),
            _ => false,
        }
    }

    pub fn is_anonymous_type(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::TypeDecl { name: None, .. })
    }

    /// The symbol attached to this node, if the naming pass has run.
    pub fn symbol(&self, id: NodeId) -> Option<&SymbolEntry> {
        self.node(id).symbol.get()
    }

    /// Convenience accessor for class symbols.
    pub fn class_symbol(&self, id: NodeId) -> Option<crate::sym::ClassRef> {
        self.symbol(id)?.as_class().cloned()
    }

    pub(crate) fn attach(&self, id: NodeId, entry: SymbolEntry) {
        let slot = &self.node(id).symbol;
        assert!(
            slot.set(entry).is_ok(),
            "node {id:?} already has a symbol attached"
        );
    }
}

impl fmt::Debug for DeclTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclTree")
            .field("file", &self.file)
            .field("package", &self.package)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sym::meta::UnresolvedClassSym;
    use crate::sym::ClassRef;
    use crate::tree::TreeBuilder;

    fn small_tree() -> DeclTree {
        let mut b = TreeBuilder::new(FileId::new(0), "pack");
        b.push_type(TypeKind::Class, "Foo", Modifiers::PUBLIC);
        b.pop();
        b.finish()
    }

    #[test]
    fn test_root_and_children() {
        let tree = small_tree();

        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.children(tree.root()).len(), 1);

        let class = tree.children(tree.root())[0];
        assert!(tree.kind(class).is_type_decl());
        assert_eq!(tree.parent(class), Some(tree.root()));
    }

    #[test]
    fn test_symbol_slot_single_assignment() {
        let tree = small_tree();
        let class = tree.children(tree.root())[0];

        assert!(tree.symbol(class).is_none());
        let sym = ClassRef::new(UnresolvedClassSym::new("pack.Foo"));
        tree.attach(class, SymbolEntry::Class(sym));
        assert!(tree.symbol(class).is_some());
    }

    #[test]
    #[should_panic(expected = "already has a symbol")]
    fn test_reattachment_panics() {
        let tree = small_tree();
        let class = tree.children(tree.root())[0];

        let sym = ClassRef::new(UnresolvedClassSym::new("pack.Foo"));
        tree.attach(class, SymbolEntry::Class(sym.clone()));
        tree.attach(class, SymbolEntry::Class(sym));
    }
}
