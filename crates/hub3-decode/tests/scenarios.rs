//! Literal end-to-end decode scenarios, exercised through `decode_tx` rather
//! than the individual message decoders.

use chrono::Utc;
use hub3_decode::{decode_tx, Batch, DecodeError};
use hub3_types::{make_id, ChainAttribute, ChainEvent, ChainLog, ChainMsg, ChainTx, Coin, DENOM};
use rust_decimal::Decimal;
use serde_json::json;

fn base_tx(hash: &str, height: u64, logs: Vec<ChainLog>) -> ChainTx {
    ChainTx {
        hash: hash.to_string(),
        height,
        timestamp: Utc::now(),
        gas_used: 10,
        gas_wanted: 20,
        logs,
        events: vec![],
        fee: vec![Coin { denom: DENOM.to_string(), amount: Decimal::from(5_000u64) }],
        messages: vec![],
    }
}

#[test]
fn single_send_at_height_100() {
    let mut tx = base_tx("H", 100, vec![ChainLog { success: true }]);
    tx.messages.push(ChainMsg {
        msg_type: "cosmos-sdk/MsgSend".to_string(),
        payload: json!({"from_address": "A", "to_address": "B", "amount": []}),
    });

    let mut batch = Batch::new();
    decode_tx(&tx, &mut batch).unwrap();

    assert_eq!(batch.transactions.len(), 1);
    let transaction = &batch.transactions[0];
    assert!(transaction.status);
    assert_eq!(transaction.fee, Decimal::new(5, 3));

    assert_eq!(batch.transfers.len(), 1);
    let transfer = &batch.transfers[0];
    assert_eq!(transfer.id, make_id("H", 0, ""));
    assert_eq!(transfer.from, "A");
    assert_eq!(transfer.to, "B");
    assert_eq!(transfer.amount, Decimal::new(5, 3));
}

#[test]
fn multisend_with_two_inputs_three_outputs_at_height_200() {
    let mut tx = base_tx("H", 200, vec![ChainLog { success: true }]);
    tx.messages.push(ChainMsg {
        msg_type: "cosmos-sdk/MsgMultiSend".to_string(),
        payload: json!({
            "inputs": [
                {"address": "A", "coins": [{"denom": "uatom", "amount": "1000000"}]},
                {"address": "B", "coins": [{"denom": "uatom", "amount": "2000000"}]},
            ],
            "outputs": [
                {"address": "C", "coins": [{"denom": "uatom", "amount": "1000000"}]},
                {"address": "D", "coins": [{"denom": "uatom", "amount": "1000000"}]},
                {"address": "E", "coins": [{"denom": "uatom", "amount": "1000000"}]},
            ],
        }),
    });

    let mut batch = Batch::new();
    decode_tx(&tx, &mut batch).unwrap();

    assert_eq!(batch.transactions.len(), 1);
    assert_eq!(batch.transfers.len(), 5);
    let ids: Vec<_> = batch.transfers.iter().map(|t| t.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            make_id("H", 0, ".i.0"),
            make_id("H", 0, ".i.1"),
            make_id("H", 0, ".o.0"),
            make_id("H", 0, ".o.1"),
            make_id("H", 0, ".o.2"),
        ]
    );
}

#[test]
fn failed_tx_at_height_300_emits_no_downstream_rows() {
    let mut tx = base_tx("H", 300, vec![ChainLog { success: false }]);
    tx.messages.push(ChainMsg {
        msg_type: "cosmos-sdk/MsgSend".to_string(),
        payload: json!({"from_address": "A", "to_address": "B", "amount": []}),
    });

    let mut batch = Batch::new();
    decode_tx(&tx, &mut batch).unwrap();

    assert_eq!(batch.transactions.len(), 1);
    assert!(!batch.transactions[0].status);
    assert!(batch.transfers.is_empty());
}

#[test]
fn begin_redelegate_at_height_400() {
    let mut tx = base_tx("H", 400, vec![ChainLog { success: true }]);
    tx.messages.push(ChainMsg {
        msg_type: "cosmos-sdk/MsgBeginRedelegate".to_string(),
        payload: json!({
            "delegator_address": "D",
            "validator_src_address": "SRC",
            "validator_dst_address": "DST",
            "amount": {"denom": "uatom", "amount": "10000000"},
        }),
    });

    let mut batch = Batch::new();
    decode_tx(&tx, &mut batch).unwrap();

    assert_eq!(batch.delegations.len(), 2);
    assert_eq!(batch.delegations[0].amount, -Decimal::from(10u64));
    assert_eq!(batch.delegations[1].amount, Decimal::from(10u64));
    assert_eq!(batch.delegations[0].amount + batch.delegations[1].amount, Decimal::ZERO);
    assert_eq!(batch.delegations[0].id, make_id("H", 0, ".s"));
    assert_eq!(batch.delegations[1].id, make_id("H", 0, ".d"));
}

#[test]
fn withdraw_delegation_reward_at_height_500_matches_by_validator() {
    let mut tx = base_tx("H", 500, vec![ChainLog { success: true }]);
    tx.events.push(ChainEvent {
        kind: "withdraw_rewards".to_string(),
        attributes: vec![
            ChainAttribute { key: "amount".to_string(), value: "7000000uatom".to_string() },
            ChainAttribute { key: "validator".to_string(), value: "V1".to_string() },
            ChainAttribute { key: "amount".to_string(), value: "11000000uatom".to_string() },
            ChainAttribute { key: "validator".to_string(), value: "V2".to_string() },
        ],
    });
    tx.messages.push(ChainMsg {
        msg_type: "cosmos-sdk/MsgWithdrawDelegationReward".to_string(),
        payload: json!({"delegator_address": "D", "validator_address": "V2"}),
    });

    let mut batch = Batch::new();
    decode_tx(&tx, &mut batch).unwrap();

    assert_eq!(batch.delegator_rewards.len(), 1);
    assert_eq!(batch.delegator_rewards[0].amount, Decimal::new(11, 0));
}

#[test]
fn withdraw_delegation_reward_fatal_when_validator_absent() {
    let mut tx = base_tx("H", 500, vec![ChainLog { success: true }]);
    tx.events.push(ChainEvent {
        kind: "withdraw_rewards".to_string(),
        attributes: vec![
            ChainAttribute { key: "amount".to_string(), value: "7000000uatom".to_string() },
            ChainAttribute { key: "validator".to_string(), value: "V1".to_string() },
        ],
    });
    tx.messages.push(ChainMsg {
        msg_type: "cosmos-sdk/MsgWithdrawDelegationReward".to_string(),
        payload: json!({"delegator_address": "D", "validator_address": "V2"}),
    });

    let mut batch = Batch::new();
    let result = decode_tx(&tx, &mut batch);
    assert_eq!(
        result,
        Err(DecodeError::InMessage {
            msg_type: "cosmos-sdk/MsgWithdrawDelegationReward".to_string(),
            source: Box::new(DecodeError::MissingValidatorInEvents { validator: "V2".to_string() }),
        })
    );
}

#[test]
fn unknown_denomination_is_a_fatal_decode_error() {
    let mut tx = base_tx("H", 1, vec![ChainLog { success: true }]);
    tx.messages.push(ChainMsg {
        msg_type: "cosmos-sdk/MsgDelegate".to_string(),
        payload: json!({
            "delegator_address": "D",
            "validator_address": "V",
            "amount": {"denom": "foo", "amount": "1"},
        }),
    });

    let mut batch = Batch::new();
    let result = decode_tx(&tx, &mut batch);
    assert_eq!(
        result,
        Err(DecodeError::InMessage {
            msg_type: "cosmos-sdk/MsgDelegate".to_string(),
            source: Box::new(DecodeError::UnknownDenom("foo".to_string())),
        })
    );
}

#[test]
fn withdraw_delegation_rewards_all_is_a_recognized_no_op() {
    let mut tx = base_tx("H", 1, vec![ChainLog { success: true }]);
    tx.messages.push(ChainMsg {
        msg_type: "cosmos-sdk/MsgWithdrawDelegationRewardsAll".to_string(),
        payload: json!({"delegator_address": "D"}),
    });

    let mut batch = Batch::new();
    decode_tx(&tx, &mut batch).unwrap();
    assert!(batch.delegator_rewards.is_empty());
}
