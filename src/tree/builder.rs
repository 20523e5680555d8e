//! Construction of declaration trees.

use std::sync::OnceLock;

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::sym::{Modifiers, TypeKind, TypeRef};

use super::node::{DeclNode, DeclTree, NodeId, NodeKind};

/// Builds a [`DeclTree`] one declaration at a time.
///
/// This is the contract the parsing layer fulfills: scope-introducing
/// declarations are `push_*`ed, populated, then `pop`ped; leaf declarations
/// (fields, parameters, local variables) are added in place and implicitly
/// create their name-bearing declarator node.
///
/// Anonymous class bodies declared in field initializers are attached
/// directly under the enclosing type declaration; the bodies of methods and
/// constructors attach theirs under the executable node.
///
/// Identifiers are validated eagerly; handing over a non-identifier is a
/// caller bug and panics.
pub struct TreeBuilder {
    file: FileId,
    package: SmolStr,
    nodes: Vec<DeclNode>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    /// Start a tree for one compilation unit. `package` is dotted or empty.
    pub fn new(file: FileId, package: &str) -> Self {
        assert_valid_package(package);
        let root = DeclNode {
            kind: NodeKind::CompilationUnit,
            parent: None,
            children: Vec::new(),
            range: TextRange::default(),
            symbol: OnceLock::new(),
        };
        Self {
            file,
            package: SmolStr::new(package),
            nodes: vec![root],
            stack: vec![NodeId::new(0)],
        }
    }

    fn current(&self) -> NodeId {
        match self.stack.last() {
            Some(&id) => id,
            None => NodeId::new(0),
        }
    }

    fn current_kind(&self) -> &NodeKind {
        &self.nodes[self.current().index() as usize].kind
    }

    fn add(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let parent = self.current();
        self.nodes.push(DeclNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            range: TextRange::default(),
            symbol: OnceLock::new(),
        });
        self.nodes[parent.index() as usize].children.push(id);
        id
    }

    fn add_declarator(&mut self, under: NodeId, name: &str) -> NodeId {
        assert_valid_identifier(name);
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(DeclNode {
            kind: NodeKind::VariableDeclaratorId {
                name: SmolStr::new(name),
            },
            parent: Some(under),
            children: Vec::new(),
            range: TextRange::default(),
            symbol: OnceLock::new(),
        });
        self.nodes[under.index() as usize].children.push(id);
        id
    }

    /// Open a named type declaration and make it the current scope.
    pub fn push_type(&mut self, kind: TypeKind, name: &str, modifiers: Modifiers) -> NodeId {
        assert_valid_identifier(name);
        assert!(
            matches!(
                self.current_kind(),
                NodeKind::CompilationUnit
                    | NodeKind::TypeDecl { .. }
                    | NodeKind::Method { .. }
                    | NodeKind::Constructor { .. }
            ),
            "type declarations belong in a compilation unit, a type body or an executable body"
        );
        let id = self.add(NodeKind::TypeDecl {
            kind,
            name: Some(SmolStr::new(name)),
            modifiers,
            type_params: Vec::new(),
        });
        self.stack.push(id);
        id
    }

    /// Open an anonymous class body and make it the current scope.
    pub fn push_anonymous(&mut self) -> NodeId {
        assert!(
            matches!(
                self.current_kind(),
                NodeKind::TypeDecl { .. } | NodeKind::Method { .. } | NodeKind::Constructor { .. }
            ),
            "anonymous class bodies belong in a type or executable body"
        );
        let id = self.add(NodeKind::TypeDecl {
            kind: TypeKind::Class,
            name: None,
            modifiers: Modifiers::empty(),
            type_params: Vec::new(),
        });
        self.stack.push(id);
        id
    }

    /// Open a method declaration and make it the current scope.
    pub fn push_method(&mut self, name: &str, modifiers: Modifiers, varargs: bool) -> NodeId {
        assert_valid_identifier(name);
        assert!(
            self.current_kind().is_type_decl(),
            "methods belong in a type body"
        );
        let id = self.add(NodeKind::Method {
            name: SmolStr::new(name),
            modifiers,
            varargs,
            type_params: Vec::new(),
        });
        self.stack.push(id);
        id
    }

    /// Open a constructor declaration and make it the current scope.
    pub fn push_constructor(&mut self, modifiers: Modifiers, varargs: bool) -> NodeId {
        assert!(
            self.current_kind().is_type_decl(),
            "constructors belong in a type body"
        );
        let id = self.add(NodeKind::Constructor { modifiers, varargs });
        self.stack.push(id);
        id
    }

    /// Declare type parameters on the current type or method.
    pub fn type_params(&mut self, names: &[&str]) {
        for name in names {
            assert_valid_identifier(name);
        }
        let current = self.current().index() as usize;
        match &mut self.nodes[current].kind {
            NodeKind::TypeDecl { type_params, .. } | NodeKind::Method { type_params, .. } => {
                type_params.extend(names.iter().map(|n| SmolStr::new(n)));
            }
            _ => panic!("type parameters belong on a type or method declaration"),
        }
    }

    /// Add a formal parameter to the current executable. Returns the
    /// declarator node that will carry the parameter's symbol.
    pub fn param(&mut self, name: &str, type_ref: TypeRef) -> NodeId {
        assert!(
            self.current_kind().is_executable(),
            "formal parameters belong in an executable declaration"
        );
        let wrapper = self.add(NodeKind::FormalParameter { type_ref });
        self.add_declarator(wrapper, name)
    }

    /// Add a field to the current type. Returns the declarator node that
    /// will carry the field's symbol.
    pub fn field(&mut self, name: &str, type_ref: TypeRef, modifiers: Modifiers) -> NodeId {
        assert!(
            self.current_kind().is_type_decl(),
            "fields belong in a type body"
        );
        let wrapper = self.add(NodeKind::Field {
            modifiers,
            type_ref,
        });
        self.add_declarator(wrapper, name)
    }

    /// Add an enum constant to the current enum declaration. Returns the
    /// declarator node that will carry the constant's symbol.
    pub fn enum_constant(&mut self, name: &str) -> NodeId {
        assert!(
            matches!(
                self.current_kind(),
                NodeKind::TypeDecl {
                    kind: TypeKind::Enum,
                    ..
                }
            ),
            "enum constants belong in an enum body"
        );
        let wrapper = self.add(NodeKind::EnumConstant);
        self.add_declarator(wrapper, name)
    }

    /// Add a local variable to the current executable's body. Returns the
    /// declarator node that will carry the variable's symbol.
    pub fn local_var(&mut self, name: &str, type_ref: TypeRef) -> NodeId {
        assert!(
            self.current_kind().is_executable(),
            "local variables belong in an executable body"
        );
        let wrapper = self.add(NodeKind::LocalVarDecl { type_ref });
        self.add_declarator(wrapper, name)
    }

    /// Record the source range of a node.
    pub fn set_range(&mut self, id: NodeId, range: TextRange) {
        self.nodes[id.index() as usize].range = range;
    }

    /// Close the current scope.
    pub fn pop(&mut self) {
        assert!(self.stack.len() > 1, "cannot pop the compilation unit");
        self.stack.pop();
    }

    /// Finish the tree. All pushed scopes must have been popped.
    pub fn finish(self) -> DeclTree {
        assert_eq!(
            self.stack.len(),
            1,
            "unbalanced push/pop: {} scopes still open",
            self.stack.len() - 1
        );
        DeclTree::new(self.file, self.package, self.nodes)
    }
}

fn assert_valid_identifier(name: &str) {
    let mut chars = name.chars();
    let valid = matches!(
        chars.next(),
        Some(c) if unicode_ident::is_xid_start(c) || c == '_' || c == '$'
    ) && chars.all(|c| unicode_ident::is_xid_continue(c) || c == '$');
    assert!(valid, "invalid identifier: {name:?}");
}

fn assert_valid_package(package: &str) {
    if package.is_empty() {
        return;
    }
    for segment in package.split('.') {
        assert_valid_identifier(segment);
    }
}
