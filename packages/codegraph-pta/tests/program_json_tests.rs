//! Programs loaded from JSON

mod common;

use codegraph_pta::config::PTAConfig;
use codegraph_pta::features::points_to::PointerAnalysis;
use codegraph_pta::shared::models::{Program, Stmt};
use codegraph_pta::PtaError;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_json_roundtrip_gives_same_result() {
    let s = containers();
    let json = s.program.to_json().unwrap();
    let loaded = Program::from_json(&json).unwrap();

    let config = PTAConfig::default();
    let original = PointerAnalysis::new(config.clone()).analyze(&s.program).unwrap();
    let reloaded = PointerAnalysis::new(config).analyze(&loaded).unwrap();
    assert_eq!(cs_snapshot(&original), cs_snapshot(&reloaded));
    assert_eq!(
        original.summary(&s.program).var_points_to,
        reloaded.summary(&loaded).var_points_to
    );
}

#[test]
fn test_hand_written_json() {
    let json = r#"{
        "classes": [
            { "id": 0, "name": "Main", "superclass": null, "interfaces": [],
              "is_interface": false, "is_abstract": false,
              "declared_methods": { "void main()": 0 } }
        ],
        "fields": [ { "id": 0, "name": "g", "declaring_class": 0, "is_static": true } ],
        "methods": [
            { "id": 0, "declaring_class": 0, "subsignature": "void main()",
              "is_static": true, "is_abstract": false, "this": null,
              "params": [], "return_vars": [],
              "stmts": [
                  { "op": "new", "lhs": 0, "ty": { "Class": 0 } },
                  { "op": "store_static", "field": 0, "rhs": 0 },
                  { "op": "load_static", "lhs": 1, "field": 0 }
              ] }
        ],
        "vars": [
            { "id": 0, "name": "x", "method": 0 },
            { "id": 1, "name": "y", "method": 0 }
        ],
        "entry": 0,
        "root_class": null
    }"#;
    let program = Program::from_json(json).unwrap();
    let result = PointerAnalysis::new(PTAConfig::insensitive())
        .analyze(&program)
        .unwrap();
    assert!(result.may_alias(0, 1));
    assert_eq!(result.static_field_points_to(0).len(), 1);
}

#[test]
fn test_dangling_reference_in_json() {
    let json = r#"{
        "classes": [],
        "fields": [],
        "methods": [],
        "vars": [],
        "entry": 3,
        "root_class": null
    }"#;
    assert!(matches!(
        Program::from_json(json),
        Err(PtaError::DanglingMethod(_))
    ));
}

/// Two classes plus a static `main` in class 0, with `vars` and `stmts`
/// spliced in
fn two_class_program(classes: &str, vars: &str, stmts: &str) -> String {
    format!(
        r#"{{
        "classes": {classes},
        "fields": [],
        "methods": [
            {{ "id": 0, "declaring_class": 0, "subsignature": "void main()",
              "is_static": true, "stmts": {stmts} }}
        ],
        "vars": {vars},
        "entry": 0
    }}"#
    )
}

#[test]
fn test_cyclic_hierarchy_rejected() {
    let json = two_class_program(
        r#"[
            { "id": 0, "name": "A", "superclass": 1, "declared_methods": { "void main()": 0 } },
            { "id": 1, "name": "B", "superclass": 0 }
        ]"#,
        r#"[ { "id": 0, "name": "x", "method": 0 } ]"#,
        r#"[
            { "op": "new", "lhs": 0, "ty": { "Class": 0 } },
            { "op": "invoke", "kind": "Virtual",
              "method_ref": { "class": 0, "subsignature": "void nope()" }, "receiver": 0 }
        ]"#,
    );
    let err = Program::from_json(&json).unwrap_err();
    assert!(matches!(err, PtaError::InvalidProgram(_)));
    assert!(err.to_string().contains("cyclic"));

    // the derived Deserialize goes through the same checks
    assert!(serde_json::from_str::<Program>(&json).is_err());
}

#[test]
fn test_self_implementing_interface_rejected() {
    let json = two_class_program(
        r#"[
            { "id": 0, "name": "Main", "declared_methods": { "void main()": 0 } },
            { "id": 1, "name": "I", "is_interface": true, "interfaces": [1] }
        ]"#,
        "[]",
        "[]",
    );
    assert!(matches!(
        Program::from_json(&json),
        Err(PtaError::InvalidProgram(_))
    ));
}

#[test]
fn test_declared_method_must_match_its_entry() {
    let json = two_class_program(
        r#"[
            { "id": 0, "name": "Main", "declared_methods": { "void start()": 0 } },
            { "id": 1, "name": "Other" }
        ]"#,
        "[]",
        "[]",
    );
    let err = Program::from_json(&json).unwrap_err();
    assert!(err.to_string().contains("void start()"));

    let json = two_class_program(
        r#"[
            { "id": 0, "name": "Main" },
            { "id": 1, "name": "Other", "declared_methods": { "void main()": 0 } }
        ]"#,
        "[]",
        "[]",
    );
    assert!(matches!(
        Program::from_json(&json),
        Err(PtaError::InvalidProgram(_))
    ));
}

#[test]
fn test_variables_belong_to_their_method() {
    let mut s = soundness();
    let foreign = s.this_of_m;
    s.program.methods[s.main as usize]
        .stmts
        .push(Stmt::Copy { lhs: s.a, rhs: foreign });
    let err = s.program.validate().unwrap_err();
    assert!(matches!(err, PtaError::InvalidProgram(_)));
    assert!(err.to_string().contains("uses variable 'this'"));
}

#[test]
fn test_duplicate_variable_names_rejected() {
    let json = two_class_program(
        r#"[
            { "id": 0, "name": "Main", "declared_methods": { "void main()": 0 } },
            { "id": 1, "name": "Other" }
        ]"#,
        r#"[
            { "id": 0, "name": "x", "method": 0 },
            { "id": 1, "name": "x", "method": 0 }
        ]"#,
        "[]",
    );
    let err = Program::from_json(&json).unwrap_err();
    assert!(err.to_string().contains("duplicate variable 'x'"));
}

#[test]
fn test_summary_names_are_unambiguous() {
    let json = two_class_program(
        r#"[
            { "id": 0, "name": "Main", "declared_methods": { "void main()": 0 } },
            { "id": 1, "name": "Main" }
        ]"#,
        "[]",
        "[]",
    );
    let err = Program::from_json(&json).unwrap_err();
    assert!(err.to_string().contains("duplicate class 'Main'"));

    // a second `void main()` in class 0 that the class does not list
    let mut s = soundness();
    let mut twin = s.program.methods[s.main as usize].clone();
    twin.id = s.program.methods.len() as u32;
    twin.stmts.clear();
    s.program.methods.push(twin);
    assert!(matches!(
        s.program.validate(),
        Err(PtaError::InvalidProgram(_))
    ));
}

#[test]
fn test_serde_loaded_program_is_indexed() {
    let s = soundness();
    let json = s.program.to_json().unwrap();
    let loaded: Program = serde_json::from_str(&json).unwrap();

    let result = PointerAnalysis::new(PTAConfig::default())
        .analyze(&loaded)
        .unwrap();
    assert!(result.is_reachable(s.a_m));
    assert_eq!(result.callees_of(s.call), vec![s.a_m]);
}

#[test]
fn test_edited_program_needs_reindex() {
    let mut s = soundness();
    s.program.methods[s.main as usize]
        .stmts
        .push(Stmt::Copy { lhs: s.a, rhs: s.b });

    assert!(matches!(
        PointerAnalysis::default().analyze(&s.program),
        Err(PtaError::InvalidProgram(_))
    ));

    s.program.reindex();
    let result = PointerAnalysis::default().analyze(&s.program).unwrap();
    assert!(result.is_reachable(s.a_m));
}
