// Program tree for one Java compilation unit.
// This is the interchange contract with the external parsing front-end:
// trees arrive serialized, get mutated in place of the Java semantics,
// and are rendered to AS3 text by the code generator.

use serde::{Deserialize, Serialize};

/// One parsed compilation unit: package, imports, top-level types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDecl {
    /// Dotted package path, e.g. `com.example.app`.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// Dotted import path, without any trailing `.*`.
    pub name: String,
    pub is_static: bool,
    pub is_wildcard: bool,
}

impl ImportDecl {
    /// A non-static import. A trailing `.*` marks the import as starred.
    pub fn plain(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_suffix(".*") {
            Some(stripped) => ImportDecl {
                name: stripped.to_string(),
                is_static: false,
                is_wildcard: true,
            },
            None => ImportDecl {
                name,
                is_static: false,
                is_wildcard: false,
            },
        }
    }
}

/// Top-level (or nested) type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDecl {
    Class(ClassDecl),
    /// No AS3 equivalent; the generator reports these and emits nothing.
    Enum(EnumDecl),
    /// No AS3 equivalent; the generator reports these and emits nothing.
    Annotation(AnnotationDecl),
    Empty { javadoc: Option<String> },
}

/// A `class` or `interface` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub is_interface: bool,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub javadoc: Option<String>,
    pub type_params: Vec<String>,
    pub extends: Vec<ClassType>,
    pub implements: Vec<ClassType>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub javadoc: Option<String>,
    pub constants: Vec<EnumConstant>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDecl {
    pub name: String,
    pub modifiers: Modifiers,
    pub javadoc: Option<String>,
    pub members: Vec<AnnotationMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationMember {
    pub name: String,
    pub ty: Type,
    pub default: Option<Expr>,
}

/// Body member of a class or interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Field(FieldDecl),
    Constructor(ConstructorDecl),
    Method(MethodDecl),
    Initializer {
        is_static: bool,
        javadoc: Option<String>,
        body: Block,
    },
    Nested(TypeDecl),
    Empty { javadoc: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub javadoc: Option<String>,
    pub ty: Type,
    pub vars: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub javadoc: Option<String>,
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<Param>,
    pub throws: Vec<String>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub javadoc: Option<String>,
    pub name: String,
    pub type_params: Vec<String>,
    pub return_type: Type,
    pub params: Vec<Param>,
    pub throws: Vec<String>,
    /// `None` for abstract/interface methods.
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: Type,
    pub name: String,
    pub is_varargs: bool,
}

/// Declaration modifiers. Visibility plus the Java keyword flags; the
/// generator decides which of these survive in AS3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub visibility: Option<Visibility>,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_final: bool,
    pub is_native: bool,
    pub is_strictfp: bool,
    pub is_synchronized: bool,
    pub is_transient: bool,
    pub is_volatile: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Modifiers {
            visibility: Some(Visibility::Public),
            ..Default::default()
        }
    }

    pub fn private() -> Self {
        Modifiers {
            visibility: Some(Visibility::Private),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// Annotation usage, e.g. `@Override` or `@SuppressWarnings("x")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Annotation {
    Marker { name: String },
    SingleValue { name: String, value: Expr },
    Normal { name: String, pairs: Vec<(String, Expr)> },
}

/// A class or interface type reference, possibly qualified and possibly
/// carrying generic arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassType {
    pub scope: Option<Box<ClassType>>,
    pub name: String,
    pub type_args: Option<Vec<Type>>,
}

impl ClassType {
    /// An unqualified, non-generic type reference.
    pub fn simple(name: impl Into<String>) -> Self {
        ClassType {
            scope: None,
            name: name.into(),
            type_args: None,
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<Type>) -> Self {
        ClassType {
            scope: None,
            name: name.into(),
            type_args: Some(args),
        }
    }

    /// Plain-text rendering, `Outer.Name<A,B>` style.
    pub fn text(&self) -> String {
        let mut out = String::new();
        if let Some(scope) = &self.scope {
            out.push_str(&scope.text());
            out.push('.');
        }
        out.push_str(&self.name);
        if let Some(args) = &self.type_args {
            out.push('<');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&arg.text());
            }
            out.push('>');
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveKind),
    Class(ClassType),
    /// Array type: element type plus dimension count.
    Array { elem: Box<Type>, dims: usize },
    Wildcard {
        extends_bound: Option<Box<Type>>,
        super_bound: Option<Box<Type>>,
    },
    Void,
}

impl Type {
    pub fn class(name: impl Into<String>) -> Self {
        Type::Class(ClassType::simple(name))
    }

    pub fn int() -> Self {
        Type::Primitive(PrimitiveKind::Int)
    }

    /// Plain-text rendering of the type, used for bindings and the
    /// array-element-type annotation.
    pub fn text(&self) -> String {
        match self {
            Type::Primitive(p) => p.java_name().to_string(),
            Type::Class(ct) => ct.text(),
            Type::Array { elem, dims } => {
                let mut out = elem.text();
                for _ in 0..*dims {
                    out.push_str("[]");
                }
                out
            }
            Type::Wildcard { .. } => "?".to_string(),
            Type::Void => "void".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub fn java_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn empty() -> Self {
        Block { stmts: Vec::new() }
    }

    pub fn of(stmts: Vec<Stmt>) -> Self {
        Block { stmts }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Block(Block),
    Expr(Expr),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
    },
    For {
        init: Vec<Expr>,
        condition: Option<Expr>,
        update: Vec<Expr>,
        body: Box<Stmt>,
    },
    /// Java enhanced-for. AS3 `for..in` iterates keys, not values, so the
    /// generator flags every one of these.
    ForEach {
        var: VarDecl,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Switch {
        selector: Expr,
        entries: Vec<SwitchEntry>,
    },
    Break { label: Option<String> },
    Continue { label: Option<String> },
    Return { value: Option<Expr> },
    Throw { value: Expr },
    Try {
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },
    Synchronized {
        target: Expr,
        body: Block,
    },
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    /// No AS3 equivalent; reported and omitted.
    Assert {
        check: Expr,
        message: Option<Expr>,
    },
    /// Explicit `this(...)` / `super(...)` constructor invocation.
    ConstructorCall {
        is_super: bool,
        args: Vec<Expr>,
    },
    LocalType(TypeDecl),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchEntry {
    /// `None` for the `default:` entry.
    pub label: Option<Expr>,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub param: Param,
    pub body: Block,
}

/// A local variable declaration. Appears as an expression (Java allows it
/// in `for` initializers and expression statements) and in enhanced-for
/// headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: Type,
    pub vars: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDeclarator {
    pub name: String,
    /// Extra array dimensions declared on the name (`String args[]`).
    pub array_dims: usize,
    pub init: Option<Expr>,
}

impl VarDeclarator {
    pub fn plain(name: impl Into<String>) -> Self {
        VarDeclarator {
            name: name.into(),
            array_dims: 0,
            init: None,
        }
    }

    pub fn with_init(name: impl Into<String>, init: Expr) -> Self {
        VarDeclarator {
            name: name.into(),
            array_dims: 0,
            init: Some(init),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    // Literals keep their source text so the generator controls rendering
    // (suffix stripping, radix preservation).
    IntLit(String),
    LongLit(String),
    DoubleLit(String),
    CharLit(String),
    StringLit(String),
    BoolLit(bool),
    NullLit,

    /// A bare name reference.
    Name(String),
    FieldAccess {
        target: Box<Expr>,
        field: String,
    },
    MethodCall {
        target: Option<Box<Expr>>,
        type_args: Option<Vec<Type>>,
        name: String,
        args: Vec<Expr>,
    },
    /// `new T(...)`, optionally with an anonymous class body.
    New {
        ty: ClassType,
        type_args: Option<Vec<Type>>,
        args: Vec<Expr>,
        body: Option<Vec<Member>>,
    },
    ArrayAccess {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    /// `new T[dims]` or `new T[] { ... }`.
    NewArray {
        elem: Box<Type>,
        dims: Vec<Expr>,
        init: Option<Box<Expr>>,
    },
    ArrayInit { values: Vec<Expr> },
    Assign {
        target: Box<Expr>,
        op: AssignOp,
        value: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Cast {
        ty: Type,
        expr: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    InstanceOf {
        expr: Box<Expr>,
        ty: Type,
    },
    Paren(Box<Expr>),
    This,
    Super,
    /// `T.class`.
    ClassLiteral { ty: Type },
    VarDecl(VarDecl),
    /// The AS3 `delete` operator. Never produced by the front-end; the
    /// mutation engine introduces it when rewriting dictionary removals.
    Delete(Box<Expr>),
}

impl Expr {
    pub fn name(n: impl Into<String>) -> Self {
        Expr::Name(n.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::StringLit(s.into())
    }

    pub fn int(v: impl Into<String>) -> Self {
        Expr::IntLit(v.into())
    }

    /// `recv.method(args...)` with a plain name receiver.
    pub fn call_on(recv: impl Into<String>, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            target: Some(Box::new(Expr::Name(recv.into()))),
            type_args: None,
            name: method.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitAnd,
    Xor,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Positive,
    Negative,
    BitNot,
    Not,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}
