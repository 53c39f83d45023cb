//! The mutation engine: a single scope-aware rewrite pass that turns the
//! Java semantics of a program tree into AS3 semantics, driven by a
//! [`RuleSet`].
//!
//! The pass is uniformly functional: every node is consumed and its
//! replacement returned, so no rewritten node is ever aliased. Frames are
//! pushed on type-declaration entry and on each block entry, mirroring
//! lexical nesting; container category bindings recorded at declaration
//! sites drive the call rewrites (`put`/`add`/`get`/`remove`/`size`)
//! encountered later in the same or an inner scope.
//!
//! Every rewrite is local and best-effort. Constructs no rule matches
//! pass through untouched; questionable call sites get a warn diagnostic
//! and are left alone.

pub mod scope;


use tracing::info;

use crate::ast::*;
use crate::diagnostics::DiagnosticSink;
use crate::rules::{Category, CategoryFlags, RuleSet};
use scope::ScopeStack;

pub struct MutationEngine<'a> {
    rules: &'a RuleSet,
    diags: DiagnosticSink,
    scope: ScopeStack,
}

impl<'a> MutationEngine<'a> {
    pub fn new(rules: &'a RuleSet, diags: DiagnosticSink) -> Self {
        MutationEngine {
            rules,
            diags,
            scope: ScopeStack::new(),
        }
    }

    /// Rewrite one compilation unit. The engine is per-unit; its scope
    /// stack dies with it.
    pub fn rewrite(mut self, unit: CompilationUnit) -> CompilationUnit {
        let package = unit.package.map(|p| self.rewrite_package(p));
        let imports = self.rewrite_imports(unit.imports);
        let types = unit
            .types
            .into_iter()
            .map(|t| self.rewrite_type_decl(t))
            .collect();
        CompilationUnit {
            package,
            imports,
            types,
        }
    }

    fn rewrite_package(&mut self, decl: PackageDecl) -> PackageDecl {
        match self.rules.rename_package(&decl.name) {
            Some(to) => {
                info!(from = %decl.name, to, "renaming package");
                PackageDecl {
                    name: to.to_string(),
                }
            }
            None => decl,
        }
    }

    /// The import pipeline: drop ignored entries, queue rename targets and
    /// forced entries, then append the queue deduplicated by final name.
    fn rewrite_imports(&mut self, imports: Vec<ImportDecl>) -> Vec<ImportDecl> {
        let mut queued: Vec<String> = self.rules.forced_imports().to_vec();
        if self.rules.force_sprite() {
            queued.push("flash.display.Sprite".to_string());
        }
        if self.rules.force_movie_clip() {
            queued.push("flash.display.MovieClip".to_string());
        }

        let mut kept = Vec::new();
        for import in imports {
            for target in self.rules.import_rename_targets(&import.name) {
                info!(from = %import.name, to = target, "rewriting import");
                queued.push(target.to_string());
            }
            if self.rules.import_ignored(&import.name) {
                info!(import = %import.name, "removing import");
                continue;
            }
            kept.push(import);
        }

        let mut seen: Vec<String> = Vec::new();
        for name in queued {
            if !seen.contains(&name) {
                info!(import = %name, "adding import");
                seen.push(name.clone());
                kept.push(ImportDecl::plain(name));
            }
        }
        kept
    }

    fn rewrite_type_decl(&mut self, decl: TypeDecl) -> TypeDecl {
        match decl {
            TypeDecl::Class(c) => TypeDecl::Class(self.rewrite_class(c)),
            // No destination form; the generator reports these.
            other @ (TypeDecl::Enum(_) | TypeDecl::Annotation(_) | TypeDecl::Empty { .. }) => other,
        }
    }

    fn rewrite_class(&mut self, decl: ClassDecl) -> ClassDecl {
        self.scope.push();

        let ClassDecl {
            name,
            is_interface,
            modifiers,
            annotations,
            javadoc,
            type_params,
            mut extends,
            implements,
            members,
        } = decl;

        if extends.is_empty() && (self.rules.force_sprite() || self.rules.force_movie_clip()) {
            let base = if self.rules.force_sprite() {
                "Sprite"
            } else {
                "MovieClip"
            };
            info!(class = %name, base, "injecting forced supertype");
            extends.push(ClassType::simple(base));
        }

        let extends = extends
            .into_iter()
            .map(|t| self.rewrite_class_type(t))
            .collect();
        let implements = implements
            .into_iter()
            .map(|t| self.rewrite_class_type(t))
            .collect();
        let members = members
            .into_iter()
            .map(|m| self.rewrite_member(m))
            .collect();

        self.scope.pop();

        ClassDecl {
            name,
            is_interface,
            modifiers,
            annotations,
            javadoc,
            type_params,
            extends,
            implements,
            members,
        }
    }

    fn rewrite_member(&mut self, member: Member) -> Member {
        match member {
            Member::Field(mut f) => {
                f.ty = self.rewrite_type(f.ty);
                f.vars = f
                    .vars
                    .into_iter()
                    .map(|mut v| {
                        v.init = v.init.map(|e| self.rewrite_expr(e));
                        v
                    })
                    .collect();
                Member::Field(f)
            }
            Member::Constructor(mut c) => {
                c.params = c.params.into_iter().map(|p| self.rewrite_param(p)).collect();
                c.body = self.rewrite_block(c.body);
                Member::Constructor(c)
            }
            Member::Method(mut m) => {
                m.return_type = self.rewrite_type(m.return_type);
                m.params = m.params.into_iter().map(|p| self.rewrite_param(p)).collect();
                m.body = m.body.map(|b| self.rewrite_block(b));
                Member::Method(m)
            }
            Member::Initializer {
                is_static,
                javadoc,
                body,
            } => Member::Initializer {
                is_static,
                javadoc,
                body: self.rewrite_block(body),
            },
            Member::Nested(t) => Member::Nested(self.rewrite_type_decl(t)),
            empty @ Member::Empty { .. } => empty,
        }
    }

    /// Register the parameter's binding in the current frame, then
    /// rewrite its type. Parameters land in the enclosing frame (the type
    /// frame for method parameters, the outer frame for catch clauses);
    /// the body block that follows pushes its own.
    fn rewrite_param(&mut self, mut param: Param) -> Param {
        if let Some(ct) = class_type_of(&param.ty) {
            let flags = self.rules.categorize(&ct.name);
            let declared = self.rules.apply_type_renames(&ct.name);
            self.scope.declare(&param.name, &declared, flags);
        }
        param.ty = self.rewrite_type(param.ty);
        param
    }

    fn rewrite_block(&mut self, block: Block) -> Block {
        self.scope.push();
        let stmts = block
            .stmts
            .into_iter()
            .map(|s| self.rewrite_stmt(s))
            .collect();
        self.scope.pop();
        Block { stmts }
    }

    fn rewrite_stmt(&mut self, stmt: Stmt) -> Stmt {
        match stmt {
            Stmt::Block(b) => Stmt::Block(self.rewrite_block(b)),
            Stmt::Expr(e) => Stmt::Expr(self.rewrite_expr(e)),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => Stmt::If {
                condition: self.rewrite_expr(condition),
                then_branch: Box::new(self.rewrite_stmt(*then_branch)),
                else_branch: else_branch.map(|s| Box::new(self.rewrite_stmt(*s))),
            },
            Stmt::While { condition, body } => Stmt::While {
                condition: self.rewrite_expr(condition),
                body: Box::new(self.rewrite_stmt(*body)),
            },
            Stmt::DoWhile { body, condition } => Stmt::DoWhile {
                body: Box::new(self.rewrite_stmt(*body)),
                condition: self.rewrite_expr(condition),
            },
            Stmt::For {
                init,
                condition,
                update,
                body,
            } => Stmt::For {
                init: init.into_iter().map(|e| self.rewrite_expr(e)).collect(),
                condition: condition.map(|e| self.rewrite_expr(e)),
                update: update.into_iter().map(|e| self.rewrite_expr(e)).collect(),
                body: Box::new(self.rewrite_stmt(*body)),
            },
            Stmt::ForEach {
                var,
                iterable,
                body,
            } => Stmt::ForEach {
                var: self.rewrite_var_decl(var),
                iterable: self.rewrite_expr(iterable),
                body: Box::new(self.rewrite_stmt(*body)),
            },
            Stmt::Switch { selector, entries } => Stmt::Switch {
                selector: self.rewrite_expr(selector),
                entries: entries
                    .into_iter()
                    .map(|e| SwitchEntry {
                        label: e.label.map(|l| self.rewrite_expr(l)),
                        stmts: e.stmts.into_iter().map(|s| self.rewrite_stmt(s)).collect(),
                    })
                    .collect(),
            },
            Stmt::Return { value } => Stmt::Return {
                value: value.map(|e| self.rewrite_expr(e)),
            },
            Stmt::Throw { value } => Stmt::Throw {
                value: self.rewrite_expr(value),
            },
            Stmt::Try {
                body,
                catches,
                finally,
            } => Stmt::Try {
                body: self.rewrite_block(body),
                catches: catches
                    .into_iter()
                    .map(|c| CatchClause {
                        param: self.rewrite_param(c.param),
                        body: self.rewrite_block(c.body),
                    })
                    .collect(),
                finally: finally.map(|b| self.rewrite_block(b)),
            },
            Stmt::Synchronized { target, body } => Stmt::Synchronized {
                target: self.rewrite_expr(target),
                body: self.rewrite_block(body),
            },
            Stmt::Labeled { label, body } => Stmt::Labeled {
                label,
                body: Box::new(self.rewrite_stmt(*body)),
            },
            Stmt::Assert { check, message } => Stmt::Assert {
                check: self.rewrite_expr(check),
                message: message.map(|e| self.rewrite_expr(e)),
            },
            Stmt::ConstructorCall { is_super, args } => Stmt::ConstructorCall {
                is_super,
                args: args.into_iter().map(|e| self.rewrite_expr(e)).collect(),
            },
            Stmt::LocalType(t) => Stmt::LocalType(self.rewrite_type_decl(t)),
            s @ (Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Empty) => s,
        }
    }

    fn rewrite_expr(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::MethodCall {
                target,
                type_args,
                name,
                args,
            } => {
                let target = target.map(|t| Box::new(self.rewrite_expr(*t)));
                let type_args =
                    type_args.map(|ts| ts.into_iter().map(|t| self.rewrite_type(t)).collect());
                let args: Vec<Expr> = args.into_iter().map(|a| self.rewrite_expr(a)).collect();
                self.rewrite_call(target, type_args, name, args)
            }
            Expr::New {
                ty,
                type_args,
                args,
                body,
            } => Expr::New {
                ty: self.rewrite_class_type(ty),
                type_args: type_args
                    .map(|ts| ts.into_iter().map(|t| self.rewrite_type(t)).collect()),
                args: args.into_iter().map(|a| self.rewrite_expr(a)).collect(),
                body: body.map(|members| {
                    members
                        .into_iter()
                        .map(|m| self.rewrite_member(m))
                        .collect()
                }),
            },
            Expr::VarDecl(vd) => Expr::VarDecl(self.rewrite_var_decl(vd)),
            Expr::FieldAccess { target, field } => Expr::FieldAccess {
                target: Box::new(self.rewrite_expr(*target)),
                field,
            },
            Expr::ArrayAccess { target, index } => Expr::ArrayAccess {
                target: Box::new(self.rewrite_expr(*target)),
                index: Box::new(self.rewrite_expr(*index)),
            },
            Expr::NewArray { elem, dims, init } => Expr::NewArray {
                elem: Box::new(self.rewrite_type(*elem)),
                dims: dims.into_iter().map(|e| self.rewrite_expr(e)).collect(),
                init: init.map(|e| Box::new(self.rewrite_expr(*e))),
            },
            Expr::ArrayInit { values } => Expr::ArrayInit {
                values: values.into_iter().map(|e| self.rewrite_expr(e)).collect(),
            },
            Expr::Assign { target, op, value } => Expr::Assign {
                target: Box::new(self.rewrite_expr(*target)),
                op,
                value: Box::new(self.rewrite_expr(*value)),
            },
            Expr::Binary { left, op, right } => Expr::Binary {
                left: Box::new(self.rewrite_expr(*left)),
                op,
                right: Box::new(self.rewrite_expr(*right)),
            },
            Expr::Unary { op, operand } => Expr::Unary {
                op,
                operand: Box::new(self.rewrite_expr(*operand)),
            },
            Expr::Cast { ty, expr } => Expr::Cast {
                ty: self.rewrite_type(ty),
                expr: Box::new(self.rewrite_expr(*expr)),
            },
            Expr::Conditional {
                condition,
                then_expr,
                else_expr,
            } => Expr::Conditional {
                condition: Box::new(self.rewrite_expr(*condition)),
                then_expr: Box::new(self.rewrite_expr(*then_expr)),
                else_expr: Box::new(self.rewrite_expr(*else_expr)),
            },
            Expr::InstanceOf { expr, ty } => Expr::InstanceOf {
                expr: Box::new(self.rewrite_expr(*expr)),
                ty: self.rewrite_type(ty),
            },
            Expr::Paren(inner) => Expr::Paren(Box::new(self.rewrite_expr(*inner))),
            Expr::ClassLiteral { ty } => Expr::ClassLiteral {
                ty: self.rewrite_type(ty),
            },
            Expr::Delete(inner) => Expr::Delete(Box::new(self.rewrite_expr(*inner))),
            leaf => leaf,
        }
    }

    /// Call-site rewriting for container-bound and string-bound receivers.
    /// Receiver and arguments are already rewritten.
    fn rewrite_call(
        &mut self,
        target: Option<Box<Expr>>,
        type_args: Option<Vec<Type>>,
        name: String,
        mut args: Vec<Expr>,
    ) -> Expr {
        let receiver = match target.as_deref() {
            Some(Expr::Name(n)) => Some(n.clone()),
            _ => None,
        };

        let rebuilt = |target, type_args, name, args| Expr::MethodCall {
            target,
            type_args,
            name,
            args,
        };

        let recv = match receiver {
            Some(r) => r,
            None => return rebuilt(target, type_args, name, args),
        };

        let binding = match self.scope.lookup(&recv) {
            Some(b) => (b.declared_type.clone(), b.flags),
            None => {
                if name == "equals" {
                    self.diags.warn(format!(
                        "potentially unhandled `equals` call on `{recv}`; \
                         this might not be what you want"
                    ));
                }
                return rebuilt(target, type_args, name, args);
            }
        };
        let (declared_type, flags) = binding;

        // String.equals(x) becomes structural equality.
        if declared_type == "String" && name == "equals" && args.len() == 1 {
            info!(receiver = %recv, "rewriting String equals to ==");
            let target = target.expect("receiver is present");
            return Expr::Binary {
                left: target,
                op: BinaryOp::Equals,
                right: Box::new(args.remove(0)),
            };
        }

        if !flags.any() {
            // equals on anything but a String receiver has no obvious
            // AS3 meaning
            if name == "equals" {
                self.diags.warn(format!(
                    "potentially unhandled `equals` call on `{recv}`; \
                     this might not be what you want"
                ));
            }
            return rebuilt(target, type_args, name, args);
        }

        info!(receiver = %recv, method = %name, "rewriting container call");
        match name.as_str() {
            "put" if args.len() >= 2 => {
                let target = target.expect("receiver is present");
                let value = args.remove(1);
                let key = args.remove(0);
                Expr::Assign {
                    target: Box::new(Expr::ArrayAccess {
                        target,
                        index: Box::new(key),
                    }),
                    op: AssignOp::Assign,
                    value: Box::new(value),
                }
            }
            "add" => rebuilt(target, type_args, "push".to_string(), args),
            "get" if !args.is_empty() => {
                let target = target.expect("receiver is present");
                Expr::ArrayAccess {
                    target,
                    index: Box::new(args.remove(0)),
                }
            }
            "remove" if !args.is_empty() => {
                if flags.has(Category::Array) || flags.has(Category::Vector) {
                    // remove(i) becomes splice(i, 1)
                    args.push(Expr::IntLit("1".to_string()));
                    rebuilt(target, type_args, "splice".to_string(), args)
                } else {
                    let target = target.expect("receiver is present");
                    Expr::Delete(Box::new(Expr::ArrayAccess {
                        target,
                        index: Box::new(args.remove(0)),
                    }))
                }
            }
            "size" => {
                let target = target.expect("receiver is present");
                Expr::FieldAccess {
                    target,
                    field: "length".to_string(),
                }
            }
            _ => {
                self.diags.warn(format!(
                    "unhandled method `{name}` on container variable `{recv}`; \
                     call left as-is"
                ));
                rebuilt(target, type_args, name, args)
            }
        }
    }

    /// Declaration-site rewriting. Category-matched declarations take the
    /// dedicated conversion path; everything else descends normally and
    /// still registers a binding so later `equals` rewrites can see the
    /// declared type text.
    fn rewrite_var_decl(&mut self, decl: VarDecl) -> VarDecl {
        match decl.ty {
            Type::Class(ct) => {
                let flags = self.rules.categorize(&ct.name);
                if flags.any() {
                    self.convert_categorized_decl(decl.modifiers, decl.annotations, ct, decl.vars, flags)
                } else {
                    let ct = self.rewrite_class_type(ct);
                    let vars = decl
                        .vars
                        .into_iter()
                        .map(|mut v| {
                            self.scope.declare(&v.name, &ct.name, CategoryFlags::none());
                            v.init = v.init.map(|e| self.rewrite_expr(e));
                            v
                        })
                        .collect();
                    VarDecl {
                        modifiers: decl.modifiers,
                        annotations: decl.annotations,
                        ty: Type::Class(ct),
                        vars,
                    }
                }
            }
            Type::Array { elem, dims } => {
                // Native array declarations register under the element
                // type name; the type itself just descends.
                let elem = self.rewrite_type(*elem);
                let elem_name = match &elem {
                    Type::Class(ct) => Some(ct.name.clone()),
                    _ => None,
                };
                let vars = decl
                    .vars
                    .into_iter()
                    .map(|mut v| {
                        if let Some(n) = &elem_name {
                            self.scope.declare(&v.name, n, CategoryFlags::none());
                        }
                        v.init = v.init.map(|e| self.rewrite_expr(e));
                        v
                    })
                    .collect();
                VarDecl {
                    modifiers: decl.modifiers,
                    annotations: decl.annotations,
                    ty: Type::Array {
                        elem: Box::new(elem),
                        dims,
                    },
                    vars,
                }
            }
            other => {
                let ty = self.rewrite_type(other);
                let vars = decl
                    .vars
                    .into_iter()
                    .map(|mut v| {
                        v.init = v.init.map(|e| self.rewrite_expr(e));
                        v
                    })
                    .collect();
                VarDecl {
                    modifiers: decl.modifiers,
                    annotations: decl.annotations,
                    ty,
                    vars,
                }
            }
        }
    }

    /// Convert a declaration whose type matched at least one category
    /// list. All matched flags go on the binding; the declared type is
    /// converted per the last-tested matching category (array, then
    /// dictionary, then vector), so vector wins ties.
    fn convert_categorized_decl(
        &mut self,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
        ct: ClassType,
        vars: Vec<VarDeclarator>,
        flags: CategoryFlags,
    ) -> VarDecl {
        let final_category = if flags.has(Category::Vector) {
            Category::Vector
        } else if flags.has(Category::Dictionary) {
            Category::Dictionary
        } else {
            Category::Array
        };

        let (ty, binding_type) = match final_category {
            Category::Array => {
                // The single generic argument, if any, becomes the
                // declared element-type hint.
                let elem = match ct.type_args.and_then(|args| args.into_iter().next()) {
                    Some(Type::Class(arg)) => arg,
                    Some(other) => ClassType::simple(other.text()),
                    None => ClassType::simple(self.rules.array_class()),
                };
                info!(elem = %elem.name, "converting declaration to Array with element hint");
                let binding_type = elem.name.clone();
                (
                    Type::Array {
                        elem: Box::new(Type::Class(elem)),
                        dims: 1,
                    },
                    binding_type,
                )
            }
            Category::Dictionary => {
                info!(from = %ct.name, to = self.rules.dictionary_class(),
                      "converting declaration to untyped Dictionary");
                let dict = ClassType::simple(self.rules.dictionary_class());
                let binding_type = dict.name.clone();
                (Type::Class(dict), binding_type)
            }
            Category::Vector => {
                info!(from = %ct.name, to = self.rules.vector_class(),
                      "converting declaration to typed Vector");
                let vect = ClassType {
                    scope: None,
                    name: self.rules.vector_class().to_string(),
                    type_args: ct.type_args,
                };
                let binding_type = vect.name.clone();
                (Type::Class(vect), binding_type)
            }
        };

        let vars = vars
            .into_iter()
            .map(|mut v| {
                self.scope.declare(&v.name, &binding_type, flags);
                v.init = v.init.map(|init| match final_category {
                    // Whatever the initializer was, it becomes a native
                    // array constructor call of the declared shape.
                    Category::Array => Expr::NewArray {
                        elem: match &ty {
                            Type::Array { elem, .. } => elem.clone(),
                            _ => unreachable!("array conversion yields an array type"),
                        },
                        dims: Vec::new(),
                        init: None,
                    },
                    Category::Dictionary => match init {
                        Expr::New { args, body, .. } => Expr::New {
                            ty: ClassType::simple(self.rules.dictionary_class()),
                            type_args: None,
                            args,
                            body,
                        },
                        other => other,
                    },
                    Category::Vector => match init {
                        Expr::New { args, body, .. } => Expr::New {
                            ty: match &ty {
                                Type::Class(vect) => vect.clone(),
                                _ => unreachable!("vector conversion yields a class type"),
                            },
                            type_args: None,
                            args,
                            body,
                        },
                        other => other,
                    },
                });
                v
            })
            .collect();

        VarDecl {
            modifiers,
            annotations,
            ty,
            vars,
        }
    }

    fn rewrite_type(&mut self, ty: Type) -> Type {
        match ty {
            Type::Class(ct) => Type::Class(self.rewrite_class_type(ct)),
            Type::Array { elem, dims } => Type::Array {
                elem: Box::new(self.rewrite_type(*elem)),
                dims,
            },
            Type::Wildcard {
                extends_bound,
                super_bound,
            } => Type::Wildcard {
                extends_bound: extends_bound.map(|t| Box::new(self.rewrite_type(*t))),
                super_bound: super_bound.map(|t| Box::new(self.rewrite_type(*t))),
            },
            t @ (Type::Primitive(_) | Type::Void) => t,
        }
    }

    /// Textual rewrite of a single class-type reference: the rename table
    /// first, then the category lists swap in the destination container
    /// names, last one tested winning. Generic arguments descend.
    fn rewrite_class_type(&mut self, ct: ClassType) -> ClassType {
        let flags = self.rules.categorize(&ct.name);
        let mut name = self.rules.apply_type_renames(&ct.name);
        if name != ct.name {
            info!(from = %ct.name, to = %name, "renaming type reference");
        }
        if flags.has(Category::Array) {
            name = self.rules.array_class().to_string();
        }
        if flags.has(Category::Dictionary) {
            name = self.rules.dictionary_class().to_string();
        }
        if flags.has(Category::Vector) {
            name = self.rules.vector_class().to_string();
        }
        if flags.any() {
            info!(from = %ct.name, to = %name, "rewriting container type reference");
        }

        ClassType {
            scope: ct.scope.map(|s| Box::new(self.rewrite_class_type(*s))),
            name,
            type_args: ct
                .type_args
                .map(|args| args.into_iter().map(|t| self.rewrite_type(t)).collect()),
        }
    }
}

/// The class type underneath a declaration type, if any: either the type
/// itself or the element type of an array.
fn class_type_of(ty: &Type) -> Option<&ClassType> {
    match ty {
        Type::Class(ct) => Some(ct),
        Type::Array { elem, .. } => class_type_of(elem),
        _ => None,
    }
}
