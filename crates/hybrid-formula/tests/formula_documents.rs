//! Tests for tree documents and saved records

use hybrid_formula::prelude::*;
use hybrid_formula::{generate_json, tree_to_json_pretty, Error};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_document_shape() {
    let tree = parse("IF(A1>10,[15401]*2,\"Low\")");
    let value = serde_json::to_value(&tree).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "if",
            "condition": {
                "operator": ">",
                "left": {"type": "cellValue", "value": "A1"},
                "right": {"type": "number", "value": 10.0}
            },
            "trueValue": {
                "type": "operator",
                "operators": ["*"],
                "args": [
                    {"type": "cellValue", "value": "[15401]"},
                    {"type": "number", "value": 2.0}
                ]
            },
            "falseValue": {"type": "textbox", "value": "Low"}
        })
    );
}

#[test]
fn test_legacy_shared_operator_document() {
    let document = json!({
        "type": "operator",
        "operator": "-",
        "args": [
            {"type": "cellValue", "value": "GROSS"},
            {"type": "cellValue", "value": "TAX"},
            {"type": "cellValue", "value": "FEES"}
        ]
    });

    assert_eq!(generate_json(&document), "(GROSS-TAX-FEES)");

    let tree: FormulaNode = serde_json::from_value(document.clone()).unwrap();
    // Re-encoding keeps the shared shape.
    assert_eq!(serde_json::to_value(&tree).unwrap(), document);
}

#[test]
fn test_malformed_documents_are_rejected() {
    let documents = [
        json!({"type": "cellValue", "value": ""}),
        json!({"type": "operator", "operators": ["+"], "args": [
            {"type": "number", "value": 1.0}
        ]}),
        json!({"type": "operator", "operators": ["+", "+"], "args": [
            {"type": "number", "value": 1.0},
            {"type": "number", "value": 2.0}
        ]}),
        json!({"type": "operator", "operators": ["%"], "args": [
            {"type": "number", "value": 1.0},
            {"type": "number", "value": 2.0}
        ]}),
        json!({"type": "if", "condition": {
            "operator": "=<",
            "left": {"type": "number", "value": 1.0},
            "right": {"type": "number", "value": 2.0}
        }, "trueValue": {"type": "number", "value": 1.0},
           "falseValue": {"type": "number", "value": 0.0}}),
        json!({"type": "sum", "args": []}),
    ];

    for document in documents {
        let text = document.to_string();
        let err = tree_from_json(&text).unwrap_err();
        assert!(matches!(err, Error::Json(_)), "{text}: {err}");
        assert_eq!(generate_json(&document), "", "{text}");
    }
}

#[test]
fn test_double_equals_in_documents() {
    let tree = tree_from_json(
        r#"{"type":"if","condition":{"operator":"==",
            "left":{"type":"cellValue","value":"A1"},
            "right":{"type":"number","value":0}},
            "trueValue":{"type":"textbox","value":"zero"},
            "falseValue":{"type":"cellValue","value":"A1"}}"#,
    )
    .unwrap();

    assert_eq!(generate(&tree), "IF(A1=0,\"zero\",A1)");
    let pretty = tree_to_json_pretty(&tree).unwrap();
    assert!(pretty.contains("\"operator\": \"=\""));
}

#[test]
fn test_unknown_function_generates_nothing() {
    let document = json!({
        "type": "operator",
        "operators": ["+"],
        "args": [
            {"type": "cellValue", "value": "A1"},
            {"type": "function", "name": "sum", "args": [
                {"type": "cellValue", "value": "B1"}
            ]}
        ]
    });
    assert_eq!(generate_json(&document), "(A1+)");

    let tree: FormulaNode = serde_json::from_value(document).unwrap();
    assert_eq!(collect_cell_references(&tree), vec!["A1", "B1"]);
    assert_eq!(complexity_score(&tree), 3);
}

#[test]
fn test_record_serialization() {
    let record = FormulaRecord::from_formula(
        "bonus",
        "Bonus on structured hours",
        "=1.5*LOOKUP(STRUC_HRS,[1000],[1001])",
        &ParseOptions::default(),
    )
    .unwrap();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["name"], "bonus");
    assert_eq!(
        value["generatedText"],
        "(1.5*LOOKUP(STRUC_HRS,[1000],[1001]))"
    );
    assert_eq!(value["rootType"], "operator");
    assert_eq!(value["complexityScore"], 3);
    assert_eq!(value["hasLookup"], true);
    assert_eq!(value["hasConditional"], false);
    assert_eq!(
        value["referencedCells"],
        json!(["STRUC_HRS", "[1000]", "[1001]"])
    );
    assert_eq!(value["tree"]["type"], "operator");

    let decoded: FormulaRecord = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn test_record_metadata_follows_tree() {
    let mut record = FormulaRecord::from_formula(
        "threshold",
        "",
        "IF(LOOKUP(A1,B1,C1)>1,1,0)",
        &ParseOptions::default(),
    )
    .unwrap();
    assert!(record.metadata.has_conditional);
    // Condition operands are not searched.
    assert!(!record.metadata.has_lookup);
    assert_eq!(record.metadata.referenced_cells, vec!["A1", "B1", "C1"]);

    record.update_tree(parse("[99999]")).unwrap();
    assert_eq!(record.metadata.root_type, "cellValue");
    assert!(!record.metadata.has_conditional);
    assert_eq!(record.metadata.referenced_cells, vec!["[99999]"]);

    assert!(record.update_tree(FormulaNode::number(f64::NAN)).is_err());
    assert_eq!(record.metadata.generated_text, "[99999]");
}
