//! The naming pass: attaches symbols to declaration nodes.
//!
//! One traversal per compilation unit. Type declarations get their binary
//! and canonical names computed on the way down, with scope-correct
//! numbering of local and anonymous classes; member tables are sealed on
//! the way back up. Cannot be reused across trees: all scope-tracking
//! state lives in stacks owned by the traversal.

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::sym::ast::class::{ClassMembers, ExecRow, FieldRow, TreeClassSym};
use crate::sym::ast::exec::TreeExecSym;
use crate::sym::ast::field::TreeFieldSym;
use crate::sym::{
    ClassRef, DeclCoord, EnclosingId, ExecId, ExecKind, ExecRef, FormalParamSym, LocalVarSym,
    Modifiers, SymbolEntry, TypeRef, CTOR_NAME,
};
use crate::tree::{DeclTree, NodeId, NodeKind};

/// Run the naming pass over one tree, attaching exactly one symbol to
/// every symbol-bearing declaration node.
pub fn attach_symbols(tree: &DeclTree) {
    let mut maker = SymbolMaker::new(tree);
    maker.visit(tree.root());
    debug!(file = %tree.file(), nodes = tree.len(), "naming pass complete");
}

enum EnclosingSym {
    Class(ClassRef),
    Exec(ExecRef),
}

struct SymbolMaker<'t> {
    tree: &'t DeclTree,
    // simple name -> count of local classes with that name, per enclosing
    // type declaration
    local_indices: Vec<FxHashMap<SmolStr, u32>>,
    // counts of anonymous classes, per enclosing type declaration
    anon_counters: Vec<u32>,
    // binary names, e.g. pack.Foo, pack.Foo$Nested, pack.Foo$Nested$1Local
    enclosing_binary: Vec<SmolStr>,
    // canonical names; None entries mean the enclosing declaration has no
    // canonical name (distinct from the stack being empty at top level)
    enclosing_canonical: Vec<Option<SmolStr>>,
    // enclosing symbols; not 1-to-1 with the name stacks because this one
    // also carries method/constructor symbols
    enclosing: Vec<EnclosingSym>,
}

impl<'t> SymbolMaker<'t> {
    fn new(tree: &'t DeclTree) -> Self {
        Self {
            tree,
            local_indices: Vec::new(),
            anon_counters: Vec::new(),
            enclosing_binary: Vec::new(),
            enclosing_canonical: Vec::new(),
            enclosing: Vec::new(),
        }
    }

    fn visit(&mut self, id: NodeId) {
        match self.tree.kind(id) {
            NodeKind::TypeDecl { .. } => self.visit_type_decl(id),
            NodeKind::Method { .. } | NodeKind::Constructor { .. } => self.visit_exec(id),
            NodeKind::VariableDeclaratorId { .. } => self.visit_declarator(id),
            NodeKind::CompilationUnit
            | NodeKind::Field { .. }
            | NodeKind::EnumConstant
            | NodeKind::FormalParameter { .. }
            | NodeKind::LocalVarDecl { .. } => self.visit_children(id),
        }
    }

    fn visit_children(&mut self, id: NodeId) {
        for &child in self.tree.children(id) {
            self.visit(child);
        }
    }

    fn visit_type_decl(&mut self, id: NodeId) {
        let NodeKind::TypeDecl {
            kind,
            name,
            modifiers,
            type_params,
        } = self.tree.kind(id)
        else {
            unreachable!("visit_type_decl called on a non-type node");
        };
        let (kind, modifiers) = (*kind, *modifiers);
        let name = name.clone();
        let type_params = type_params.clone();

        let local = self.tree.is_local_type(id);
        let anonymous = name.is_none();
        let simple = name.unwrap_or_default();

        let binary = self.make_binary_name(&simple, local, anonymous);
        let canonical = self.make_canonical_name(&simple, local, anonymous, &binary);
        trace!(binary = %binary, canonical = ?canonical, "type declaration named");

        let enclosing = self.enclosing.last().map(|e| match e {
            EnclosingSym::Class(c) => EnclosingId::Class(SmolStr::new(c.binary_name())),
            EnclosingSym::Exec(e) => EnclosingId::Exec(e.id()),
        });

        let cls = Arc::new(TreeClassSym {
            simple: simple.clone(),
            binary: binary.clone(),
            canonical: canonical.clone(),
            package: SmolStr::new(self.tree.package_name()),
            kind,
            modifiers,
            local,
            anonymous,
            type_params,
            enclosing,
            decl: self.coord(id),
            members: OnceLock::new(),
        });
        let class_ref = ClassRef::from_arc(cls.clone());
        self.tree.attach(id, SymbolEntry::Class(class_ref.clone()));

        // Field and enum-constant declarators are symbol-bearing before the
        // traversal descends to them.
        self.attach_field_symbols(id, &class_ref, &simple);

        self.enclosing_binary.push(binary);
        self.enclosing_canonical.push(canonical);
        self.enclosing.push(EnclosingSym::Class(class_ref));
        self.anon_counters.push(0);
        self.local_indices.push(FxHashMap::default());

        self.visit_children(id);

        self.local_indices.pop();
        self.anon_counters.pop();
        self.enclosing.pop();
        self.enclosing_canonical.pop();
        self.enclosing_binary.pop();

        cls.seal(self.collect_members(id));
    }

    fn make_binary_name(&mut self, simple: &str, local: bool, anonymous: bool) -> SmolStr {
        let mangled: SmolStr = if local {
            let histogram = match self.local_indices.last_mut() {
                Some(h) => h,
                None => unreachable!("local class outside any type declaration"),
            };
            let n = next_index_from_histogram(histogram, simple, 1);
            SmolStr::new(format!("{n}{simple}"))
        } else if anonymous {
            let counter = match self.anon_counters.last_mut() {
                Some(c) => c,
                None => unreachable!("anonymous class outside any type declaration"),
            };
            *counter += 1;
            SmolStr::new(counter.to_string())
        } else {
            SmolStr::new(simple)
        };

        match self.enclosing_binary.last() {
            Some(enclosing) => SmolStr::new(format!("{enclosing}${mangled}")),
            None => {
                let package = self.tree.package_name();
                if package.is_empty() {
                    mangled
                } else {
                    SmolStr::new(format!("{package}.{mangled}"))
                }
            }
        }
    }

    fn make_canonical_name(
        &self,
        simple: &str,
        local: bool,
        anonymous: bool,
        binary: &SmolStr,
    ) -> Option<SmolStr> {
        if anonymous || local {
            return None;
        }

        match self.enclosing_canonical.last() {
            // toplevel
            None => Some(binary.clone()),
            // the enclosing declaration has no canonical name, so this one
            // doesn't either; note the unmangled simple name otherwise
            Some(None) => None,
            Some(Some(enclosing)) => Some(SmolStr::new(format!("{enclosing}.{simple}"))),
        }
    }

    fn attach_field_symbols(&self, class_node: NodeId, owner: &ClassRef, class_simple: &str) {
        for &child in self.tree.children(class_node) {
            match self.tree.kind(child) {
                NodeKind::Field {
                    modifiers,
                    type_ref,
                } => {
                    for &declarator in self.tree.children(child) {
                        if let NodeKind::VariableDeclaratorId { name } = self.tree.kind(declarator)
                        {
                            let field = TreeFieldSym {
                                owner: owner.clone(),
                                name: name.clone(),
                                modifiers: *modifiers,
                                type_ref: type_ref.clone(),
                                enum_constant: false,
                                decl: self.coord(declarator),
                            };
                            self.tree
                                .attach(declarator, SymbolEntry::Field(crate::sym::FieldRef::new(field)));
                        }
                    }
                }
                NodeKind::EnumConstant => {
                    for &declarator in self.tree.children(child) {
                        if let NodeKind::VariableDeclaratorId { name } = self.tree.kind(declarator)
                        {
                            let field = TreeFieldSym {
                                owner: owner.clone(),
                                name: name.clone(),
                                modifiers: Modifiers::PUBLIC
                                    | Modifiers::STATIC
                                    | Modifiers::FINAL
                                    | Modifiers::ENUM,
                                type_ref: TypeRef::named(class_simple),
                                enum_constant: true,
                                decl: self.coord(declarator),
                            };
                            self.tree
                                .attach(declarator, SymbolEntry::Field(crate::sym::FieldRef::new(field)));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_exec(&mut self, id: NodeId) {
        let owner = match self.enclosing.last() {
            Some(EnclosingSym::Class(c)) => c.clone(),
            _ => unreachable!("executables are declared directly in a type body"),
        };

        let (kind, name, modifiers, varargs, type_params) = match self.tree.kind(id) {
            NodeKind::Method {
                name,
                modifiers,
                varargs,
                type_params,
            } => (
                ExecKind::Method,
                name.clone(),
                *modifiers,
                *varargs,
                type_params.clone(),
            ),
            NodeKind::Constructor { modifiers, varargs } => (
                ExecKind::Constructor,
                SmolStr::new(CTOR_NAME),
                *modifiers,
                *varargs,
                Vec::new(),
            ),
            _ => unreachable!("visit_exec called on a non-executable node"),
        };

        // Parameter declarators, in declaration order.
        let mut declarators = Vec::new();
        for &child in self.tree.children(id) {
            if let NodeKind::FormalParameter { type_ref } = self.tree.kind(child) {
                for &declarator in self.tree.children(child) {
                    if let NodeKind::VariableDeclaratorId { name } = self.tree.kind(declarator) {
                        declarators.push((declarator, name.clone(), type_ref.clone()));
                    }
                }
            }
        }

        let exec_id = ExecId {
            owner: SmolStr::new(owner.binary_name()),
            kind,
            name: name.clone(),
            arity: declarators.len(),
        };

        let params: Vec<FormalParamSym> = declarators
            .iter()
            .enumerate()
            .map(|(index, (_, pname, type_ref))| FormalParamSym {
                owner: exec_id.clone(),
                index: index as u32,
                name: Some(pname.clone()),
                type_ref: type_ref.clone(),
            })
            .collect();
        let params: Arc<[FormalParamSym]> = params.into();

        let exec = ExecRef::new(TreeExecSym {
            owner,
            kind,
            name,
            modifiers,
            varargs,
            type_params,
            params: params.clone(),
            decl: self.coord(id),
        });
        self.tree.attach(id, SymbolEntry::Exec(exec.clone()));

        // Parameter declarators are symbol-bearing before the traversal
        // descends to them.
        for (param, (declarator, _, _)) in params.iter().zip(&declarators) {
            self.tree
                .attach(*declarator, SymbolEntry::FormalParam(param.clone()));
        }

        // Executables push only the enclosing-symbol stack: type-name
        // mangling stays keyed to the nearest enclosing type declaration.
        self.enclosing.push(EnclosingSym::Exec(exec));
        self.visit_children(id);
        self.enclosing.pop();
    }

    fn visit_declarator(&mut self, id: NodeId) {
        if self.is_true_local_var(id) {
            let owner = match self.enclosing.last() {
                Some(EnclosingSym::Exec(e)) => e.id(),
                _ => unreachable!("local variables are declared in executable bodies"),
            };
            let (name, type_ref) = match (self.tree.kind(id), self.tree.parent(id)) {
                (NodeKind::VariableDeclaratorId { name }, Some(parent)) => {
                    match self.tree.kind(parent) {
                        NodeKind::LocalVarDecl { type_ref } => (name.clone(), type_ref.clone()),
                        _ => unreachable!("true local declarator outside a local variable declaration"),
                    }
                }
                _ => unreachable!("visit_declarator called on a non-declarator node"),
            };
            self.tree.attach(
                id,
                SymbolEntry::LocalVar(LocalVarSym {
                    name,
                    owner,
                    type_ref,
                    decl: self.coord(id),
                }),
            );
        } else {
            // building the field/param/enum-constant symbols already set it
            assert!(
                self.tree.symbol(id).is_some(),
                "declarator {id:?} reached the naming pass without a symbol"
            );
        }
    }

    fn is_true_local_var(&self, id: NodeId) -> bool {
        match self.tree.parent(id) {
            Some(parent) => !matches!(
                self.tree.kind(parent),
                NodeKind::Field { .. } | NodeKind::EnumConstant | NodeKind::FormalParameter { .. }
            ),
            None => false,
        }
    }

    fn collect_members(&self, class_node: NodeId) -> ClassMembers {
        let mut members = ClassMembers::default();
        for &child in self.tree.children(class_node) {
            match self.tree.kind(child) {
                NodeKind::Method { .. } | NodeKind::Constructor { .. } => {
                    if let Some(SymbolEntry::Exec(exec)) = self.tree.symbol(child) {
                        let row = ExecRow {
                            kind: exec.kind(),
                            name: SmolStr::new(exec.simple_name()),
                            modifiers: exec.modifiers(),
                            varargs: exec.is_varargs(),
                            type_params: exec
                                .type_parameters()
                                .into_iter()
                                .map(|tp| tp.name)
                                .collect(),
                            params: exec.formal_parameters(),
                            decl: self.coord(child),
                        };
                        match exec.kind() {
                            ExecKind::Method => members.methods.push(row),
                            ExecKind::Constructor => members.ctors.push(row),
                        }
                    }
                }
                NodeKind::Field { .. } | NodeKind::EnumConstant => {
                    for &declarator in self.tree.children(child) {
                        if let Some(SymbolEntry::Field(field)) = self.tree.symbol(declarator) {
                            members.fields.push(FieldRow {
                                name: SmolStr::new(field.simple_name()),
                                modifiers: field.modifiers(),
                                type_ref: field.type_ref(),
                                enum_constant: field.is_enum_constant(),
                                decl: self.coord(declarator),
                            });
                        }
                    }
                }
                NodeKind::TypeDecl { .. } => {
                    if let Some(nested) = self.tree.class_symbol(child) {
                        members.nested.push(nested);
                    }
                }
                _ => {}
            }
        }
        members
    }

    fn coord(&self, node: NodeId) -> DeclCoord {
        DeclCoord {
            file: self.tree.file(),
            node,
        }
    }
}

/// Gets the next available index based on a key and a histogram (map of
/// keys to counters). If the key doesn't exist, a new entry is added with
/// `start_index`.
fn next_index_from_histogram(
    histogram: &mut FxHashMap<SmolStr, u32>,
    key: &str,
    start_index: u32,
) -> u32 {
    match histogram.get_mut(key) {
        None => {
            histogram.insert(SmolStr::new(key), start_index);
            start_index
        }
        Some(count) => {
            *count += 1;
            *count
        }
    }
}
