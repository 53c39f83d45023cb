//! Syntax-directed AS3 code generation.
//!
//! A single pass over the (already mutated) tree, one fixed template per
//! node kind. Indentation is handled by [`printer::IndentedPrinter`],
//! emitted lazily before the first token of each line.
//!
//! Constructs with no AS3 form (enums, annotation declarations, asserts)
//! produce an error diagnostic and are omitted; representable-but-risky
//! constructs (starred imports, labels, for-each loops, synchronized
//! blocks) produce a warning alongside a best-effort rendering. The
//! generator always finishes the unit, so one run surfaces every
//! incompatibility.

pub mod printer;

#[cfg(test)]
mod tests;

use crate::ast::*;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use printer::IndentedPrinter;

pub struct As3Generator {
    printer: IndentedPrinter,
    diags: DiagnosticSink,
    /// The one destination container type whose generic arguments render
    /// executably (`Vector.<T>`); every other argument list becomes a
    /// comment.
    vector_class: String,
    /// Enclosing `Type.member` path for diagnostic locations.
    path: Vec<String>,
}

impl As3Generator {
    pub fn new(diags: DiagnosticSink, vector_class: impl Into<String>) -> Self {
        As3Generator {
            printer: IndentedPrinter::new(),
            diags,
            vector_class: vector_class.into(),
            path: Vec::new(),
        }
    }

    pub fn generate(mut self, unit: &CompilationUnit) -> String {
        self.emit_unit(unit);
        self.printer.finish()
    }

    fn report(&self, severity: Severity, message: impl Into<String>) {
        let mut diag = Diagnostic::new(severity, message);
        if !self.path.is_empty() {
            diag = diag.with_location(self.path.join("."));
        }
        self.diags.push(diag);
    }

    fn emit_unit(&mut self, unit: &CompilationUnit) {
        match &unit.package {
            Some(p) => {
                self.printer.print("package ");
                self.printer.println(&p.name);
            }
            None => self.printer.println("package"),
        }
        self.printer.println("{");
        self.printer.indent();

        if !unit.imports.is_empty() {
            for import in &unit.imports {
                self.emit_import(import);
            }
            self.printer.newline();
        }

        for (i, decl) in unit.types.iter().enumerate() {
            self.emit_type_decl(decl);
            self.printer.newline();
            if i + 1 < unit.types.len() {
                self.printer.newline();
            }
        }

        self.printer.unindent();
        self.printer.println("}");
    }

    fn emit_import(&mut self, import: &ImportDecl) {
        self.printer.print("import ");
        if import.is_static {
            self.printer.print("static ");
        }
        self.printer.print(&import.name);
        if import.is_wildcard {
            self.report(
                Severity::Warn,
                format!("starred import `{}.*` pulls in an unknown set of names", import.name),
            );
            self.printer.print(".*");
        }
        self.printer.println(";");
    }

    fn emit_type_decl(&mut self, decl: &TypeDecl) {
        match decl {
            TypeDecl::Class(c) => self.emit_class(c),
            TypeDecl::Enum(e) => {
                self.report(
                    Severity::Error,
                    format!("enum `{}` has no AS3 equivalent; declaration dropped", e.name),
                );
            }
            TypeDecl::Annotation(a) => {
                self.report(
                    Severity::Error,
                    format!(
                        "annotation type `{}` has no AS3 equivalent; declaration dropped",
                        a.name
                    ),
                );
            }
            TypeDecl::Empty { javadoc } => {
                self.emit_javadoc(javadoc);
                self.printer.print(";");
            }
        }
    }

    fn emit_class(&mut self, decl: &ClassDecl) {
        self.path.push(decl.name.clone());

        self.emit_javadoc(&decl.javadoc);
        self.emit_member_annotations(&decl.annotations);
        self.emit_modifiers(&decl.modifiers, false);

        if decl.is_interface {
            self.printer.print("interface ");
        } else {
            self.printer.print("class ");
        }
        self.printer.print(&decl.name);
        if !decl.type_params.is_empty() {
            self.printer
                .print(&format!("/*<{}>*/", decl.type_params.join(", ")));
        }

        if !decl.extends.is_empty() {
            self.printer.print(" extends ");
            for (i, t) in decl.extends.iter().enumerate() {
                if i > 0 {
                    self.printer.print(", ");
                }
                self.emit_class_type(t);
            }
        }
        if !decl.implements.is_empty() {
            self.printer.print(" implements ");
            for (i, t) in decl.implements.iter().enumerate() {
                if i > 0 {
                    self.printer.print(", ");
                }
                self.emit_class_type(t);
            }
        }
        self.printer.newline();
        self.printer.println("{");
        self.printer.indent();
        for member in &decl.members {
            self.printer.newline();
            self.emit_member(member);
            self.printer.newline();
        }
        self.printer.unindent();
        self.printer.print("}");

        self.path.pop();
    }

    fn emit_member(&mut self, member: &Member) {
        match member {
            Member::Field(f) => self.emit_field(f),
            Member::Constructor(c) => self.emit_constructor(c),
            Member::Method(m) => self.emit_method(m),
            Member::Initializer {
                is_static, javadoc, body,
            } => {
                self.emit_javadoc(javadoc);
                if *is_static {
                    self.printer.print("static ");
                }
                self.emit_block(body);
            }
            Member::Nested(decl) => self.emit_type_decl(decl),
            Member::Empty { javadoc } => {
                self.emit_javadoc(javadoc);
                self.printer.print(";");
            }
        }
    }

    fn emit_field(&mut self, field: &FieldDecl) {
        self.emit_javadoc(&field.javadoc);
        self.emit_member_annotations(&field.annotations);
        self.emit_modifiers(&field.modifiers, true);

        // `const` already declares; otherwise the field needs `var`.
        if !field.modifiers.is_final {
            self.printer.print("var ");
        }

        for (i, var) in field.vars.iter().enumerate() {
            if i > 0 {
                self.printer.print(", ");
            }
            self.printer.print(&var.name);
            self.printer.print(":");
            if var.array_dims > 0 {
                self.printer.print("Array");
            } else {
                self.emit_type(&field.ty);
            }
            if let Some(init) = &var.init {
                self.printer.print(" = ");
                self.emit_expr(init);
            }
        }
        self.printer.print(";");
    }

    fn emit_constructor(&mut self, ctor: &ConstructorDecl) {
        self.path.push(ctor.name.clone());

        self.emit_javadoc(&ctor.javadoc);
        self.emit_member_annotations(&ctor.annotations);
        self.emit_modifiers(&ctor.modifiers, false);
        self.printer.print("function ");
        self.printer.print(&ctor.name);
        self.emit_params(&ctor.params);
        self.emit_throws(&ctor.throws);
        self.printer.newline();
        self.emit_block(&ctor.body);

        self.path.pop();
    }

    fn emit_method(&mut self, method: &MethodDecl) {
        self.path.push(method.name.clone());

        self.emit_javadoc(&method.javadoc);
        self.emit_member_annotations(&method.annotations);
        self.emit_modifiers(&method.modifiers, false);
        if !method.type_params.is_empty() {
            self.printer
                .print(&format!("/*<{}>*/ ", method.type_params.join(", ")));
        }
        self.printer.print("function ");
        self.printer.print(&method.name);
        self.emit_params(&method.params);
        self.printer.print(":");
        self.emit_type(&method.return_type);
        self.emit_throws(&method.throws);
        match &method.body {
            Some(body) => {
                self.printer.newline();
                self.emit_block(body);
            }
            None => self.printer.print(";"),
        }

        self.path.pop();
    }

    fn emit_params(&mut self, params: &[Param]) {
        self.printer.print("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.printer.print(", ");
            }
            self.emit_param(param);
        }
        self.printer.print(")");
    }

    fn emit_param(&mut self, param: &Param) {
        self.emit_annotations(&param.annotations);
        self.emit_modifiers(&param.modifiers, false);
        if param.is_varargs {
            self.printer.print("...");
        }
        self.printer.print(&param.name);
        self.printer.print(":");
        self.emit_type(&param.ty);
    }

    /// AS3 has no `throws` clause; the list survives as a comment.
    fn emit_throws(&mut self, throws: &[String]) {
        if !throws.is_empty() {
            self.printer
                .print(&format!(" /*throws {}*/", throws.join(", ")));
        }
    }

    /// Fixed modifier ordering: visibility, abstract, static, then the
    /// final/const split. A final field becomes `const`; a final local or
    /// parameter keeps the `final` keyword in front of the ordinary
    /// declaration. Modifiers with no AS3 meaning are dropped with a
    /// warning.
    fn emit_modifiers(&mut self, modifiers: &Modifiers, field: bool) {
        match modifiers.visibility {
            Some(Visibility::Private) => self.printer.print("private "),
            Some(Visibility::Protected) => self.printer.print("protected "),
            Some(Visibility::Public) => self.printer.print("public "),
            None => {}
        }
        if modifiers.is_abstract {
            self.printer.print("abstract ");
        }
        if modifiers.is_static {
            self.printer.print("static ");
        }
        if modifiers.is_final {
            if field {
                self.printer.print("const ");
            } else {
                self.printer.print("final ");
            }
        }
        for (set, name) in [
            (modifiers.is_native, "native"),
            (modifiers.is_strictfp, "strictfp"),
            (modifiers.is_synchronized, "synchronized"),
            (modifiers.is_transient, "transient"),
            (modifiers.is_volatile, "volatile"),
        ] {
            if set {
                self.report(
                    Severity::Warn,
                    format!("ignoring modifier `{name}`: no AS3 equivalent"),
                );
            }
        }
    }

    fn emit_annotations(&mut self, annotations: &[Annotation]) {
        for a in annotations {
            self.emit_annotation(a);
            self.printer.print(" ");
        }
    }

    fn emit_member_annotations(&mut self, annotations: &[Annotation]) {
        for a in annotations {
            self.emit_annotation(a);
            self.printer.newline();
        }
    }

    /// Annotations render as AS3 bracketed metadata.
    fn emit_annotation(&mut self, annotation: &Annotation) {
        match annotation {
            Annotation::Marker { name } => {
                self.printer.print(&format!("[{name}]"));
            }
            Annotation::SingleValue { name, value } => {
                self.printer.print(&format!("[{name}("));
                self.emit_expr(value);
                self.printer.print(")]");
            }
            Annotation::Normal { name, pairs } => {
                self.printer.print(&format!("[{name}("));
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        self.printer.print(", ");
                    }
                    self.printer.print(key);
                    self.printer.print(" = ");
                    self.emit_expr(value);
                }
                self.printer.print(")]");
            }
        }
    }

    fn emit_javadoc(&mut self, javadoc: &Option<String>) {
        if let Some(content) = javadoc {
            self.printer.print("/**");
            self.printer.print(content);
            self.printer.println("*/");
        }
    }

    fn emit_type(&mut self, ty: &Type) {
        match ty {
            Type::Primitive(p) => self.emit_primitive(*p),
            Type::Class(ct) => self.emit_class_type(ct),
            // Dimensions are gone in AS3; every native array is `Array`.
            Type::Array { .. } => self.printer.print("Array"),
            Type::Wildcard { .. } => self.printer.print("*"),
            Type::Void => self.printer.print("void"),
        }
    }

    /// Fixed primitive mapping. Kinds that change representation get a
    /// warning so the caller knows precision or semantics moved.
    fn emit_primitive(&mut self, kind: PrimitiveKind) {
        let (name, warn) = match kind {
            PrimitiveKind::Boolean => ("Boolean", false),
            PrimitiveKind::Int => ("int", false),
            PrimitiveKind::Byte => ("uint", true),
            PrimitiveKind::Short => ("int", true),
            PrimitiveKind::Char => ("String", true),
            PrimitiveKind::Long | PrimitiveKind::Float | PrimitiveKind::Double => ("Number", true),
        };
        if warn {
            self.report(
                Severity::Warn,
                format!("replacing `{}` with `{}` for primitive type", kind.java_name(), name),
            );
        }
        self.printer.print(name);
    }

    fn emit_class_type(&mut self, ct: &ClassType) {
        if let Some(scope) = &ct.scope {
            self.emit_class_type(scope);
            self.printer.print(".");
        }
        self.printer.print(&ct.name);
        if let Some(args) = &ct.type_args {
            self.emit_type_args(&ct.name, args);
        }
    }

    /// Only the configured vector type is genuinely generic in AS3; its
    /// arguments render as the `.<T>` suffix. Everything else keeps its
    /// arguments as a comment.
    fn emit_type_args(&mut self, owner: &str, args: &[Type]) {
        if args.is_empty() {
            return;
        }
        let executable = owner == self.vector_class;
        self.printer.print(if executable { ".<" } else { "/*<" });
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.printer.print(", ");
            }
            self.emit_type(arg);
        }
        self.printer.print(if executable { ">" } else { ">*/" });
    }

    fn emit_block(&mut self, block: &Block) {
        self.printer.println("{");
        if !block.stmts.is_empty() {
            self.printer.indent();
            for stmt in &block.stmts {
                self.emit_stmt(stmt);
                self.printer.newline();
            }
            self.printer.unindent();
        }
        self.printer.print("}");
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(b) => self.emit_block(b),
            Stmt::Expr(e) => {
                self.emit_expr(e);
                self.printer.print(";");
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.printer.print("if (");
                self.emit_expr(condition);
                self.printer.println(") ");
                self.emit_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.printer.println(" else ");
                    self.emit_stmt(else_branch);
                }
            }
            Stmt::While { condition, body } => {
                self.printer.print("while (");
                self.emit_expr(condition);
                self.printer.println(") ");
                self.emit_stmt(body);
            }
            Stmt::DoWhile { body, condition } => {
                self.printer.println("do ");
                self.emit_stmt(body);
                self.printer.print(" while (");
                self.emit_expr(condition);
                self.printer.print(");");
            }
            Stmt::For {
                init,
                condition,
                update,
                body,
            } => {
                self.printer.print("for (");
                for (i, e) in init.iter().enumerate() {
                    if i > 0 {
                        self.printer.print(", ");
                    }
                    self.emit_expr(e);
                }
                self.printer.print("; ");
                if let Some(cond) = condition {
                    self.emit_expr(cond);
                }
                self.printer.print("; ");
                for (i, e) in update.iter().enumerate() {
                    if i > 0 {
                        self.printer.print(", ");
                    }
                    self.emit_expr(e);
                }
                self.printer.println(") ");
                self.emit_stmt(body);
            }
            Stmt::ForEach {
                var,
                iterable,
                body,
            } => {
                self.report(
                    Severity::Warn,
                    "for-each loop: AS3 for..in iterates keys, not values; \
                     verify the converted loop",
                );
                self.printer.print("for (");
                self.emit_var_decl(var);
                self.printer.print(" in ");
                self.emit_expr(iterable);
                self.printer.print(") ");
                self.emit_stmt(body);
            }
            Stmt::Switch { selector, entries } => {
                self.printer.print("switch(");
                self.emit_expr(selector);
                self.printer.println(") {");
                self.printer.indent();
                for entry in entries {
                    self.emit_switch_entry(entry);
                }
                self.printer.unindent();
                self.printer.print("}");
            }
            Stmt::Break { label } => {
                self.printer.print("break");
                if let Some(label) = label {
                    self.printer.print(" ");
                    self.printer.print(label);
                }
                self.printer.print(";");
            }
            Stmt::Continue { label } => {
                self.printer.print("continue");
                if let Some(label) = label {
                    self.printer.print(" ");
                    self.printer.print(label);
                }
                self.printer.print(";");
            }
            Stmt::Return { value } => {
                self.printer.print("return");
                if let Some(value) = value {
                    self.printer.print(" ");
                    self.emit_expr(value);
                }
                self.printer.print(";");
            }
            Stmt::Throw { value } => {
                self.printer.print("throw ");
                self.emit_expr(value);
                self.printer.print(";");
            }
            Stmt::Try {
                body,
                catches,
                finally,
            } => {
                self.printer.print("try ");
                self.emit_block(body);
                for clause in catches {
                    self.printer.print(" catch (");
                    self.emit_param(&clause.param);
                    self.printer.println(") ");
                    self.emit_block(&clause.body);
                }
                if let Some(finally) = finally {
                    self.printer.print(" finally ");
                    self.emit_block(finally);
                }
            }
            Stmt::Synchronized { target, body } => {
                self.report(
                    Severity::Warn,
                    "synchronized block has no AS3 equivalent; \
                     emitting the body with the target as a comment",
                );
                self.printer.print("/*synchronized (");
                self.emit_expr(target);
                self.printer.print(")*/ ");
                self.emit_block(body);
            }
            Stmt::Labeled { label, body } => {
                self.report(Severity::Warn, format!("label `{label}` is rarely portable"));
                self.printer.print(label);
                self.printer.print(": ");
                self.emit_stmt(body);
            }
            Stmt::Assert { .. } => {
                self.report(
                    Severity::Error,
                    "assert statement has no AS3 equivalent; statement dropped",
                );
            }
            Stmt::ConstructorCall { is_super, args } => {
                self.printer.print(if *is_super { "super" } else { "this" });
                self.emit_arguments(args);
                self.printer.print(";");
            }
            Stmt::LocalType(decl) => self.emit_type_decl(decl),
            Stmt::Empty => self.printer.print(";"),
        }
    }

    fn emit_switch_entry(&mut self, entry: &SwitchEntry) {
        match &entry.label {
            Some(label) => {
                self.printer.print("case ");
                self.emit_expr(label);
                self.printer.print(":");
            }
            None => self.printer.print("default:"),
        }
        self.printer.newline();
        self.printer.indent();
        for stmt in &entry.stmts {
            self.emit_stmt(stmt);
            self.printer.newline();
        }
        self.printer.unindent();
    }

    /// Local declaration. An array-typed variable carries its element
    /// type as a compile-time metadata hint for the Flex compiler.
    fn emit_var_decl(&mut self, decl: &VarDecl) {
        if let Type::Array { elem, dims } = &decl.ty {
            if *dims > 0 {
                self.printer
                    .println(&format!("[ArrayElementType(\"{}\")]", elem.text()));
            }
        }
        self.emit_annotations(&decl.annotations);
        self.emit_modifiers(&decl.modifiers, false);
        self.printer.print("var ");
        for (i, var) in decl.vars.iter().enumerate() {
            if i > 0 {
                self.printer.print(", ");
            }
            self.printer.print(&var.name);
            self.printer.print(":");
            self.emit_type(&decl.ty);
            if let Some(init) = &var.init {
                self.printer.print(" = ");
                self.emit_expr(init);
            }
        }
    }

    fn emit_arguments(&mut self, args: &[Expr]) {
        self.printer.print("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.printer.print(", ");
            }
            self.emit_expr(arg);
        }
        self.printer.print(")");
    }

    /// Numeric literal with any Java type-suffix characters stripped.
    fn emit_numeric(&mut self, value: &str) {
        self.printer
            .print(value.trim_end_matches(['d', 'D', 'f', 'F', 'l', 'L']));
    }

    fn emit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::IntLit(v) => self.printer.print(v),
            Expr::LongLit(v) | Expr::DoubleLit(v) => self.emit_numeric(v),
            // AS3 has no character literals, only strings.
            Expr::CharLit(v) | Expr::StringLit(v) => {
                self.printer.print("\"");
                self.printer.print(v);
                self.printer.print("\"");
            }
            Expr::BoolLit(v) => self.printer.print(if *v { "true" } else { "false" }),
            Expr::NullLit => self.printer.print("null"),
            Expr::Name(n) => self.printer.print(n),
            Expr::FieldAccess { target, field } => {
                self.emit_expr(target);
                self.printer.print(".");
                self.printer.print(field);
            }
            Expr::MethodCall {
                target,
                type_args,
                name,
                args,
            } => {
                if let Some(target) = target {
                    self.emit_expr(target);
                    self.printer.print(".");
                }
                if let Some(type_args) = type_args {
                    self.emit_type_args(name, type_args);
                }
                self.printer.print(name);
                self.emit_arguments(args);
            }
            Expr::New {
                ty,
                type_args,
                args,
                body,
            } => {
                self.printer.print("new ");
                self.emit_class_type(ty);
                if let Some(type_args) = type_args {
                    self.emit_type_args(&ty.name, type_args);
                }
                self.emit_arguments(args);
                if let Some(members) = body {
                    self.printer.println(" {");
                    self.printer.indent();
                    for member in members {
                        self.printer.newline();
                        self.emit_member(member);
                        self.printer.newline();
                    }
                    self.printer.unindent();
                    self.printer.print("}");
                }
            }
            Expr::ArrayAccess { target, index } => {
                self.emit_expr(target);
                self.printer.print("[");
                self.emit_expr(index);
                self.printer.print("]");
            }
            Expr::NewArray { dims, init, .. } => {
                self.printer.print("new Array(");
                if let Some(init) = init {
                    self.emit_expr(init);
                } else {
                    for (i, dim) in dims.iter().enumerate() {
                        if i > 0 {
                            self.printer.print(", ");
                        }
                        self.emit_expr(dim);
                    }
                }
                self.printer.print(")");
            }
            Expr::ArrayInit { values } => {
                self.printer.print("[");
                if !values.is_empty() {
                    self.printer.print(" ");
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            self.printer.print(", ");
                        }
                        self.emit_expr(value);
                    }
                    self.printer.print(" ");
                }
                self.printer.print("]");
            }
            Expr::Assign { target, op, value } => {
                self.emit_expr(target);
                self.printer.print(" ");
                self.printer.print(assign_op_str(*op));
                self.printer.print(" ");
                self.emit_expr(value);
            }
            Expr::Binary { left, op, right } => {
                self.emit_expr(left);
                self.printer.print(" ");
                self.printer.print(binary_op_str(*op));
                self.printer.print(" ");
                self.emit_expr(right);
            }
            Expr::Unary { op, operand } => {
                let prefix = match op {
                    UnaryOp::Positive => Some("+"),
                    UnaryOp::Negative => Some("-"),
                    UnaryOp::BitNot => Some("~"),
                    UnaryOp::Not => Some("!"),
                    UnaryOp::PreIncrement => Some("++"),
                    UnaryOp::PreDecrement => Some("--"),
                    _ => None,
                };
                if let Some(prefix) = prefix {
                    self.printer.print(prefix);
                }
                self.emit_expr(operand);
                match op {
                    UnaryOp::PostIncrement => self.printer.print("++"),
                    UnaryOp::PostDecrement => self.printer.print("--"),
                    _ => {}
                }
            }
            Expr::Cast { ty, expr } => {
                self.emit_type(ty);
                self.printer.print("(");
                self.emit_expr(expr);
                self.printer.print(")");
            }
            Expr::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                self.emit_expr(condition);
                self.printer.print(" ? ");
                self.emit_expr(then_expr);
                self.printer.print(" : ");
                self.emit_expr(else_expr);
            }
            Expr::InstanceOf { expr, ty } => {
                self.emit_expr(expr);
                self.printer.print(" is ");
                self.emit_type(ty);
            }
            Expr::Paren(inner) => {
                self.printer.print("(");
                self.emit_expr(inner);
                self.printer.print(")");
            }
            Expr::This => self.printer.print("this"),
            Expr::Super => self.printer.print("super"),
            Expr::ClassLiteral { ty } => {
                self.printer.print("Class(");
                self.emit_type(ty);
                self.printer.print(")");
            }
            Expr::VarDecl(decl) => self.emit_var_decl(decl),
            Expr::Delete(inner) => {
                self.printer.print("delete ");
                self.emit_expr(inner);
            }
        }
    }
}

fn assign_op_str(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::Add => "+=",
        AssignOp::Subtract => "-=",
        AssignOp::Multiply => "*=",
        AssignOp::Divide => "/=",
        AssignOp::Remainder => "%=",
        AssignOp::And => "&=",
        AssignOp::Or => "|=",
        AssignOp::Xor => "^=",
        AssignOp::ShiftLeft => "<<=",
        AssignOp::ShiftRight => ">>=",
        AssignOp::UnsignedShiftRight => ">>>=",
    }
}

fn binary_op_str(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Or => "||",
        BinaryOp::And => "&&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitAnd => "&",
        BinaryOp::Xor => "^",
        BinaryOp::Equals => "==",
        BinaryOp::NotEquals => "!=",
        BinaryOp::Less => "<",
        BinaryOp::Greater => ">",
        BinaryOp::LessEquals => "<=",
        BinaryOp::GreaterEquals => ">=",
        BinaryOp::ShiftLeft => "<<",
        BinaryOp::ShiftRight => ">>",
        BinaryOp::UnsignedShiftRight => ">>>",
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        BinaryOp::Remainder => "%",
    }
}
