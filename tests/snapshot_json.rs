use holdem_rs::agents::ScriptedMoves;
use holdem_rs::config::TableConfig;
use holdem_rs::dealer::Dealer;
use holdem_rs::snapshot::TableSnapshot;
use serde_json::{json, Value};

#[test]
fn snapshot_serializes_without_hole_cards() {
    let config = TableConfig { seed: Some(21), ..TableConfig::default() };
    let mut dealer = Dealer::new(config, ["ann", "bo"]).unwrap();
    let mut snapshots: Vec<TableSnapshot> = Vec::new();
    // ann raises on the button, bo folds
    let mut moves = ScriptedMoves::new([Some(60), Some(-1)]);
    dealer.play_hand(&mut moves, &mut snapshots).unwrap();

    let opening: Value = serde_json::to_value(&snapshots[0]).unwrap();
    assert_eq!(opening["hand_number"], json!(1));
    assert_eq!(opening["street"], json!("PreFlop"));
    assert_eq!(opening["board"], json!([]));
    assert_eq!(opening["players"][0]["position"], json!("Btn"));
    assert_eq!(opening["players"][1]["current_bet"], json!(20));
    assert_eq!(opening["players"][0]["moves"][0], json!({ "Call": 10 }));
    assert!(!opening.to_string().contains("hole"));

    let closing: Value = serde_json::to_value(snapshots.last().unwrap()).unwrap();
    assert_eq!(closing["street"], Value::Null);
    assert_eq!(closing["players"][0]["money"], json!(1020));
    assert_eq!(closing["players"][1]["folded"], json!(true));
    assert_eq!(closing["players"][1]["moves"][0], json!("Fold"));
    assert_eq!(closing["pot_total"], json!(0));
}

#[test]
fn hand_outcome_serializes() {
    let config = TableConfig { seed: Some(8), ..TableConfig::default() };
    let mut dealer = Dealer::new(config, ["x", "y"]).unwrap();
    let mut moves = ScriptedMoves::new([Some(-1)]);
    let outcome = dealer.play_hand(&mut moves, &mut ()).unwrap();
    let v = serde_json::to_value(&outcome).unwrap();
    assert_eq!(v["winners"], json!(["y"]));
    assert_eq!(v["awards"][0]["amount"], json!(30));
    assert_eq!(v["showdown"], json!([]));
}
