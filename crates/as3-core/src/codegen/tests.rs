// Generator-level tests: render small (pre-mutated) trees and check the
// emitted AS3 text and diagnostics.

use crate::ast::*;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use crate::codegen::As3Generator;

fn generate(unit: &CompilationUnit) -> (String, Vec<Diagnostic>) {
    let diags = DiagnosticSink::new();
    let source = As3Generator::new(diags.clone(), "Vector").generate(unit);
    (source, diags.take())
}

fn class_with_members(members: Vec<Member>) -> CompilationUnit {
    CompilationUnit {
        package: Some(PackageDecl {
            name: "com.example".to_string(),
        }),
        imports: Vec::new(),
        types: vec![TypeDecl::Class(ClassDecl {
            name: "Sample".to_string(),
            is_interface: false,
            modifiers: Modifiers::public(),
            annotations: Vec::new(),
            javadoc: None,
            type_params: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            members,
        })],
    }
}

fn void_method(name: &str, stmts: Vec<Stmt>) -> Member {
    Member::Method(MethodDecl {
        modifiers: Modifiers::public(),
        annotations: Vec::new(),
        javadoc: None,
        name: name.to_string(),
        type_params: Vec::new(),
        return_type: Type::Void,
        params: Vec::new(),
        throws: Vec::new(),
        body: Some(Block::of(stmts)),
    })
}

#[test]
fn unit_renders_package_block() {
    let (source, diags) = generate(&class_with_members(Vec::new()));
    assert!(source.starts_with("package com.example\n{\n"));
    assert!(source.contains("public class Sample\n"));
    assert!(source.trim_end().ends_with('}'));
    assert!(diags.is_empty());
}

#[test]
fn final_field_renders_const_without_var() {
    let field = Member::Field(FieldDecl {
        modifiers: Modifiers {
            visibility: Some(Visibility::Public),
            is_static: true,
            is_final: true,
            ..Default::default()
        },
        annotations: Vec::new(),
        javadoc: None,
        ty: Type::class("String"),
        vars: vec![VarDeclarator::with_init(
            "FINAL_STRING",
            Expr::string("my final string"),
        )],
    });
    let (source, _) = generate(&class_with_members(vec![field]));
    assert!(source.contains("public static const FINAL_STRING:String = \"my final string\";"));
}

#[test]
fn plain_field_renders_var() {
    let field = Member::Field(FieldDecl {
        modifiers: Modifiers::private(),
        annotations: Vec::new(),
        javadoc: None,
        ty: Type::int(),
        vars: vec![VarDeclarator::with_init("hiddenInt", Expr::int("12354"))],
    });
    let (source, _) = generate(&class_with_members(vec![field]));
    assert!(source.contains("private var hiddenInt:int = 12354;"));
}

#[test]
fn final_local_keeps_var_with_final_modifier() {
    let decl = Stmt::Expr(Expr::VarDecl(VarDecl {
        modifiers: Modifiers {
            is_final: true,
            ..Default::default()
        },
        annotations: Vec::new(),
        ty: Type::int(),
        vars: vec![VarDeclarator::with_init("x", Expr::int("1"))],
    }));
    let (source, _) = generate(&class_with_members(vec![void_method("run", vec![decl])]));
    assert!(source.contains("final var x:int = 1;"));
}

#[test]
fn method_signature_has_trailing_return_type() {
    let method = Member::Method(MethodDecl {
        modifiers: Modifiers::public(),
        annotations: Vec::new(),
        javadoc: None,
        name: "testMethod".to_string(),
        type_params: Vec::new(),
        return_type: Type::Primitive(PrimitiveKind::Boolean),
        params: vec![Param {
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            ty: Type::class("Object"),
            name: "a".to_string(),
            is_varargs: false,
        }],
        throws: vec!["Error".to_string()],
        body: Some(Block::empty()),
    });
    let (source, _) = generate(&class_with_members(vec![method]));
    assert!(source.contains("public function testMethod(a:Object):Boolean /*throws Error*/"));
}

#[test]
fn primitive_mapping_warns_on_lossy_kinds() {
    let decls = [
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Double,
        PrimitiveKind::Long,
    ]
    .iter()
    .enumerate()
    .map(|(i, kind)| {
        Stmt::Expr(Expr::VarDecl(VarDecl {
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            ty: Type::Primitive(*kind),
            vars: vec![VarDeclarator::plain(format!("v{i}"))],
        }))
    })
    .collect();
    let (source, diags) = generate(&class_with_members(vec![void_method("run", decls)]));

    assert!(source.contains("var v0:uint;"));
    assert!(source.contains("var v1:String;"));
    assert!(source.contains("var v2:Number;"));
    assert!(source.contains("var v3:Number;"));
    assert_eq!(diags.len(), 4);
    assert!(diags.iter().all(|d| d.severity == Severity::Warn));
    // locations point into the member being rendered
    assert_eq!(diags[0].location.as_deref(), Some("Sample.run"));
}

#[test]
fn boolean_and_int_pass_through_silently() {
    let decls = vec![
        Stmt::Expr(Expr::VarDecl(VarDecl {
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            ty: Type::Primitive(PrimitiveKind::Boolean),
            vars: vec![VarDeclarator::plain("b")],
        })),
        Stmt::Expr(Expr::VarDecl(VarDecl {
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            ty: Type::int(),
            vars: vec![VarDeclarator::plain("i")],
        })),
    ];
    let (source, diags) = generate(&class_with_members(vec![void_method("run", decls)]));
    assert!(source.contains("var b:Boolean;"));
    assert!(source.contains("var i:int;"));
    assert!(diags.is_empty());
}

#[test]
fn numeric_suffixes_are_stripped() {
    let stmts = vec![
        Stmt::Expr(Expr::DoubleLit("1235D".to_string())),
        Stmt::Expr(Expr::DoubleLit("12E3D".to_string())),
        Stmt::Expr(Expr::DoubleLit("123.5123F".to_string())),
        Stmt::Expr(Expr::LongLit("42L".to_string())),
    ];
    let (source, _) = generate(&class_with_members(vec![void_method("run", stmts)]));
    assert!(source.contains("1235;"));
    assert!(source.contains("12E3;"));
    assert!(source.contains("123.5123;"));
    assert!(source.contains("42;"));
    assert!(!source.contains("1235D"));
    assert!(!source.contains("42L"));
}

#[test]
fn vector_generics_render_as_suffix_others_as_comment() {
    let stmts = vec![
        Stmt::Expr(Expr::VarDecl(VarDecl {
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            ty: Type::Class(ClassType::generic("Vector", vec![Type::class("String")])),
            vars: vec![VarDeclarator::plain("v")],
        })),
        Stmt::Expr(Expr::VarDecl(VarDecl {
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            ty: Type::Class(ClassType::generic(
                "HashMap",
                vec![Type::class("String"), Type::class("String")],
            )),
            vars: vec![VarDeclarator::plain("m")],
        })),
    ];
    let (source, _) = generate(&class_with_members(vec![void_method("run", stmts)]));
    assert!(source.contains("var v:Vector.<String>;"));
    assert!(source.contains("var m:HashMap/*<String, String>*/;"));
}

#[test]
fn array_variable_gets_element_type_metadata() {
    let decl = Stmt::Expr(Expr::VarDecl(VarDecl {
        modifiers: Modifiers::default(),
        annotations: Vec::new(),
        ty: Type::Array {
            elem: Box::new(Type::class("String")),
            dims: 1,
        },
        vars: vec![VarDeclarator::with_init(
            "myArray",
            Expr::NewArray {
                elem: Box::new(Type::class("String")),
                dims: vec![Expr::int("2")],
                init: None,
            },
        )],
    }));
    let (source, _) = generate(&class_with_members(vec![void_method("run", vec![decl])]));
    assert!(source.contains("[ArrayElementType(\"String\")]"));
    assert!(source.contains("var myArray:Array = new Array(2);"));
}

#[test]
fn delete_expression_renders_the_operator() {
    let stmt = Stmt::Expr(Expr::Delete(Box::new(Expr::ArrayAccess {
        target: Box::new(Expr::name("m")),
        index: Box::new(Expr::string("a")),
    })));
    let (source, _) = generate(&class_with_members(vec![void_method("run", vec![stmt])]));
    assert!(source.contains("delete m[\"a\"];"));
}

#[test]
fn enum_is_dropped_with_error_but_rest_survives() {
    let mut unit = class_with_members(vec![void_method("run", Vec::new())]);
    unit.types.push(TypeDecl::Enum(EnumDecl {
        name: "Color".to_string(),
        modifiers: Modifiers::public(),
        annotations: Vec::new(),
        javadoc: None,
        constants: vec![EnumConstant {
            name: "RED".to_string(),
            args: Vec::new(),
        }],
        members: Vec::new(),
    }));
    let (source, diags) = generate(&unit);

    assert!(source.contains("public class Sample"));
    assert!(source.contains("public function run():void"));
    assert!(!source.contains("Color"));
    let errors: Vec<_> = diags
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Color"));
}

#[test]
fn assert_statement_is_dropped_with_error() {
    let stmts = vec![
        Stmt::Assert {
            check: Expr::BoolLit(true),
            message: None,
        },
        Stmt::Return { value: None },
    ];
    let (source, diags) = generate(&class_with_members(vec![void_method("run", stmts)]));
    assert!(!source.contains("assert"));
    assert!(source.contains("return;"));
    assert!(diags.iter().any(|d| d.severity == Severity::Error));
}

#[test]
fn synchronized_block_keeps_body_and_warns() {
    let stmt = Stmt::Synchronized {
        target: Expr::This,
        body: Block::of(vec![Stmt::Expr(Expr::call_on("m", "clear", Vec::new()))]),
    };
    let (source, diags) = generate(&class_with_members(vec![void_method("run", vec![stmt])]));
    assert!(source.contains("/*synchronized (this)*/ {"));
    assert!(source.contains("m.clear();"));
    assert!(diags.iter().any(|d| d.severity == Severity::Warn));
}

#[test]
fn starred_import_and_label_and_foreach_warn() {
    let mut unit = class_with_members(vec![void_method(
        "run",
        vec![
            Stmt::Labeled {
                label: "outer".to_string(),
                body: Box::new(Stmt::Empty),
            },
            Stmt::ForEach {
                var: VarDecl {
                    modifiers: Modifiers::default(),
                    annotations: Vec::new(),
                    ty: Type::class("String"),
                    vars: vec![VarDeclarator::plain("s")],
                },
                iterable: Expr::name("items"),
                body: Box::new(Stmt::Block(Block::empty())),
            },
        ],
    )]);
    unit.imports.push(ImportDecl::plain("flash.events.*"));
    let (source, diags) = generate(&unit);

    assert!(source.contains("import flash.events.*;"));
    assert!(source.contains("outer: ;"));
    assert!(source.contains("for (var s:String in items)"));
    assert_eq!(
        diags
            .iter()
            .filter(|d| d.severity == Severity::Warn)
            .count(),
        3
    );
}

#[test]
fn annotations_render_as_bracketed_metadata() {
    let method = Member::Method(MethodDecl {
        modifiers: Modifiers::public(),
        annotations: vec![Annotation::Normal {
            name: "SuppressWarnings".to_string(),
            pairs: vec![("value".to_string(), Expr::string(""))],
        }],
        javadoc: None,
        name: "annotated".to_string(),
        type_params: Vec::new(),
        return_type: Type::Void,
        params: Vec::new(),
        throws: Vec::new(),
        body: Some(Block::empty()),
    });
    let (source, _) = generate(&class_with_members(vec![method]));
    assert!(source.contains("[SuppressWarnings(value = \"\")]\n"));
}

#[test]
fn cast_instanceof_and_class_literal_templates() {
    let stmts = vec![
        Stmt::Expr(Expr::Cast {
            ty: Type::Primitive(PrimitiveKind::Double),
            expr: Box::new(Expr::name("myFloat")),
        }),
        Stmt::Expr(Expr::InstanceOf {
            expr: Box::new(Expr::name("myString")),
            ty: Type::class("String"),
        }),
        Stmt::Expr(Expr::Assign {
            target: Box::new(Expr::name("b")),
            op: AssignOp::Assign,
            value: Box::new(Expr::ClassLiteral {
                ty: Type::class("String"),
            }),
        }),
    ];
    let (source, _) = generate(&class_with_members(vec![void_method("run", stmts)]));
    assert!(source.contains("Number(myFloat);"));
    assert!(source.contains("myString is String;"));
    assert!(source.contains("b = Class(String);"));
}

#[test]
fn interface_and_supertypes_render() {
    let unit = CompilationUnit {
        package: None,
        imports: Vec::new(),
        types: vec![TypeDecl::Class(ClassDecl {
            name: "Worker".to_string(),
            is_interface: true,
            modifiers: Modifiers::public(),
            annotations: Vec::new(),
            javadoc: None,
            type_params: Vec::new(),
            extends: vec![ClassType::simple("Runnable")],
            implements: Vec::new(),
            members: vec![Member::Method(MethodDecl {
                modifiers: Modifiers::default(),
                annotations: Vec::new(),
                javadoc: None,
                name: "work".to_string(),
                type_params: Vec::new(),
                return_type: Type::Void,
                params: Vec::new(),
                throws: Vec::new(),
                body: None,
            })],
        })],
    };
    let (source, _) = generate(&unit);
    assert!(source.starts_with("package\n{\n"));
    assert!(source.contains("public interface Worker extends Runnable"));
    assert!(source.contains("function work():void;"));
}

#[test]
fn switch_and_loops_render() {
    let stmts = vec![
        Stmt::Switch {
            selector: Expr::name("x"),
            entries: vec![
                SwitchEntry {
                    label: Some(Expr::int("1")),
                    stmts: vec![Stmt::Break { label: None }],
                },
                SwitchEntry {
                    label: None,
                    stmts: vec![Stmt::Break { label: None }],
                },
            ],
        },
        Stmt::For {
            init: vec![Expr::VarDecl(VarDecl {
                modifiers: Modifiers::default(),
                annotations: Vec::new(),
                ty: Type::int(),
                vars: vec![VarDeclarator::with_init("i", Expr::int("0"))],
            })],
            condition: Some(Expr::Binary {
                left: Box::new(Expr::name("i")),
                op: BinaryOp::Less,
                right: Box::new(Expr::int("10")),
            }),
            update: vec![Expr::Unary {
                op: UnaryOp::PostIncrement,
                operand: Box::new(Expr::name("i")),
            }],
            body: Box::new(Stmt::Block(Block::empty())),
        },
        Stmt::DoWhile {
            body: Box::new(Stmt::Block(Block::empty())),
            condition: Expr::BoolLit(false),
        },
    ];
    let (source, _) = generate(&class_with_members(vec![void_method("run", stmts)]));
    assert!(source.contains("switch(x) {"));
    assert!(source.contains("case 1:"));
    assert!(source.contains("default:"));
    assert!(source.contains("for (var i:int = 0; i < 10; i++)"));
    assert!(source.contains("do \n"));
    assert!(source.contains("} while (false);"));
}
