// End-to-end translation tests: program tree in, AS3 text plus
// diagnostics out.

use pretty_assertions::assert_eq;

use as3_core::ast::*;
use as3_core::{As3Error, RuleSet, Severity, Translator};

fn unit_with_stmts(stmts: Vec<Stmt>) -> CompilationUnit {
    CompilationUnit {
        package: Some(PackageDecl {
            name: "com.example".to_string(),
        }),
        imports: Vec::new(),
        types: vec![TypeDecl::Class(ClassDecl {
            name: "Scenario".to_string(),
            is_interface: false,
            modifiers: Modifiers::public(),
            annotations: Vec::new(),
            javadoc: None,
            type_params: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            members: vec![Member::Method(MethodDecl {
                modifiers: Modifiers::public(),
                annotations: Vec::new(),
                javadoc: None,
                name: "run".to_string(),
                type_params: Vec::new(),
                return_type: Type::Void,
                params: Vec::new(),
                throws: Vec::new(),
                body: Some(Block::of(stmts)),
            })],
        })],
    }
}

fn decl(ty: Type, name: &str, init: Option<Expr>) -> Stmt {
    Stmt::Expr(Expr::VarDecl(VarDecl {
        modifiers: Modifiers::default(),
        annotations: Vec::new(),
        ty,
        vars: vec![VarDeclarator {
            name: name.to_string(),
            array_dims: 0,
            init,
        }],
    }))
}

fn new_of(ty: ClassType) -> Expr {
    Expr::New {
        ty,
        type_args: None,
        args: Vec::new(),
        body: None,
    }
}

fn call(recv: &str, method: &str, args: Vec<Expr>) -> Stmt {
    Stmt::Expr(Expr::call_on(recv, method, args))
}

fn string_string() -> Vec<Type> {
    vec![Type::class("String"), Type::class("String")]
}

fn map_script() -> CompilationUnit {
    unit_with_stmts(vec![
        decl(
            Type::Class(ClassType::generic("Map", string_string())),
            "m",
            Some(new_of(ClassType::generic("HashMap", string_string()))),
        ),
        call("m", "put", vec![Expr::string("a"), Expr::string("b")]),
        call("m", "get", vec![Expr::string("a")]),
        call("m", "remove", vec![Expr::string("a")]),
        call("m", "size", Vec::new()),
    ])
}

#[test]
fn dictionary_script_rewrites_declaration_and_calls() {
    let output = Translator::with_defaults().translate(map_script());

    assert!(output.source.contains("var m:Dictionary = new Dictionary();"));
    assert!(output.source.contains("m[\"a\"] = \"b\";"));
    assert!(output.source.contains("m[\"a\"];"));
    assert!(output.source.contains("delete m[\"a\"];"));
    assert!(output.source.contains("m.length;"));
    assert!(!output.source.contains("put"));
    assert!(!output.source.contains("HashMap"));
}

#[test]
fn vector_script_rewrites_declaration_and_calls() {
    let unit = unit_with_stmts(vec![
        decl(
            Type::Class(ClassType::generic("List", vec![Type::class("String")])),
            "x",
            Some(new_of(ClassType::generic(
                "ArrayList",
                vec![Type::class("String")],
            ))),
        ),
        call("x", "add", vec![Expr::string("asdf")]),
        call("x", "size", Vec::new()),
        call("x", "get", vec![Expr::int("0")]),
        call("x", "remove", vec![Expr::int("0")]),
    ]);
    let output = Translator::with_defaults().translate(unit);

    assert!(output
        .source
        .contains("var x:Vector.<String> = new Vector.<String>();"));
    assert!(output.source.contains("x.push(\"asdf\");"));
    assert!(output.source.contains("x.length;"));
    assert!(output.source.contains("x[0];"));
    assert!(output.source.contains("x.splice(0, 1);"));
}

#[test]
fn vector_remove_literal_count_is_one() {
    let unit = unit_with_stmts(vec![
        decl(
            Type::Class(ClassType::generic("List", vec![Type::class("String")])),
            "x",
            None,
        ),
        call("x", "remove", vec![Expr::int("2")]),
    ]);
    let output = Translator::with_defaults().translate(unit);
    assert!(output.source.contains("x.splice(2, 1);"));
}

#[test]
fn import_pipeline_produces_exactly_one_forced_import() {
    let rules = RuleSet::builder()
        .ignore_import(r"java\..*")
        .rename_import(r"java\.util\..*Map", "flash.utils.Dictionary")
        .force_import("flash.utils.Dictionary")
        .build()
        .unwrap();
    let mut unit = unit_with_stmts(Vec::new());
    unit.imports = vec![
        ImportDecl::plain("java.util.HashMap"),
        ImportDecl::plain("java.util.List"),
    ];
    let output = Translator::new(rules).translate(unit);

    assert_eq!(output.source.matches("import ").count(), 1);
    assert!(output.source.contains("import flash.utils.Dictionary;"));
    assert!(!output.source.contains("java.util"));
}

#[test]
fn nested_block_binding_is_invisible_outside() {
    let unit = unit_with_stmts(vec![
        Stmt::Block(Block::of(vec![decl(
            Type::Class(ClassType::generic("Map", string_string())),
            "m",
            None,
        )])),
        call("m", "put", vec![Expr::string("a"), Expr::string("b")]),
    ]);
    let output = Translator::with_defaults().translate(unit);

    // outside the block, m has no binding, so the call is untouched
    assert!(output.source.contains("m.put(\"a\", \"b\");"));
}

#[test]
fn enclosing_binding_stays_flagged_in_nested_block() {
    let unit = unit_with_stmts(vec![
        decl(
            Type::Class(ClassType::generic("Map", string_string())),
            "m",
            None,
        ),
        Stmt::Block(Block::of(vec![call("m", "size", Vec::new())])),
    ]);
    let output = Translator::with_defaults().translate(unit);
    assert!(output.source.contains("m.length;"));
}

#[test]
fn overlapping_rules_resolve_to_vector_end_to_end() {
    let rules = RuleSet::builder()
        .with_defaults()
        .vector_type("ConcurrentNavigableMap")
        .build()
        .unwrap();
    let unit = unit_with_stmts(vec![decl(
        Type::Class(ClassType::generic("ConcurrentNavigableMap", string_string())),
        "m",
        None,
    )]);
    let output = Translator::new(rules).translate(unit);

    assert!(output.source.contains("var m:Vector.<String, String>;"));
    assert!(!output.source.contains("var m:Dictionary"));
}

#[test]
fn enum_among_members_fails_soft() {
    let mut unit = unit_with_stmts(vec![Stmt::Return { value: None }]);
    unit.types.push(TypeDecl::Enum(EnumDecl {
        name: "Direction".to_string(),
        modifiers: Modifiers::public(),
        annotations: Vec::new(),
        javadoc: None,
        constants: vec![
            EnumConstant {
                name: "NORTH".to_string(),
                args: Vec::new(),
            },
            EnumConstant {
                name: "SOUTH".to_string(),
                args: Vec::new(),
            },
        ],
        members: Vec::new(),
    }));
    let output = Translator::with_defaults().translate(unit);

    // every other member still renders
    assert!(output.source.contains("public class Scenario"));
    assert!(output.source.contains("return;"));
    // and the enum is reported at error severity
    assert!(output
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Error && d.message.contains("Direction")));
}

#[test]
fn exception_types_become_error_end_to_end() {
    let unit = unit_with_stmts(vec![Stmt::Try {
        body: Block::of(vec![Stmt::Throw {
            value: Expr::New {
                ty: ClassType::simple("Exception"),
                type_args: None,
                args: vec![Expr::string("this should turn into an Error")],
                body: None,
            },
        }]),
        catches: vec![CatchClause {
            param: Param {
                modifiers: Modifiers::default(),
                annotations: Vec::new(),
                ty: Type::class("Exception"),
                name: "e".to_string(),
                is_varargs: false,
            },
            body: Block::empty(),
        }],
        finally: None,
    }]);
    let output = Translator::with_defaults().translate(unit);

    assert!(output
        .source
        .contains("throw new Error(\"this should turn into an Error\");"));
    assert!(output.source.contains("catch (e:Error)"));
    assert!(!output.source.contains("Exception"));
}

#[test]
fn string_equals_rewrites_to_operator_equality() {
    let unit = unit_with_stmts(vec![
        decl(Type::class("String"), "myString", Some(Expr::string("asdf"))),
        Stmt::If {
            condition: Expr::call_on("myString", "equals", vec![Expr::string("abc")]),
            then_branch: Box::new(Stmt::Return { value: None }),
            else_branch: None,
        },
    ]);
    let output = Translator::with_defaults().translate(unit);
    assert!(output.source.contains("if (myString == \"abc\")"));
}

#[test]
fn identical_inputs_yield_identical_outputs() {
    let translator = Translator::with_defaults();
    let first = translator.translate(map_script());
    let second = translator.translate(map_script());

    assert_eq!(first.source, second.source);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn json_round_trip_matches_direct_translation() {
    let translator = Translator::with_defaults();
    let json = serde_json::to_string(&map_script()).unwrap();

    let direct = translator.translate(map_script());
    let via_json = translator.translate_json(&json).unwrap();
    assert_eq!(via_json.source, direct.source);
}

#[test]
fn unknown_node_kind_is_a_typed_tree_error() {
    let translator = Translator::with_defaults();
    let json = r#"{"package":null,"imports":[],"types":[{"Widget":{}}]}"#;

    match translator.translate_json(json) {
        Err(As3Error::Tree(e)) => {
            assert!(e.to_string().contains("Widget"));
        }
        other => panic!("expected a tree error, got {other:?}"),
    }
}

#[test]
fn translation_always_returns_text_with_diagnostics() {
    // a unit full of trouble still produces output for everything else
    let unit = unit_with_stmts(vec![
        Stmt::Assert {
            check: Expr::BoolLit(true),
            message: None,
        },
        Stmt::Labeled {
            label: "loop".to_string(),
            body: Box::new(Stmt::Empty),
        },
        Stmt::Return { value: None },
    ]);
    let output = Translator::with_defaults().translate(unit);

    assert!(output.source.contains("return;"));
    assert!(output.diagnostics.iter().any(|d| d.severity == Severity::Error));
    assert!(output.diagnostics.iter().any(|d| d.severity == Severity::Warn));
}
