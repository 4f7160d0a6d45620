//! Full request flow through the driver against an in-memory rollup.

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tictactoe_core::{MatchStateMachine, Phase, Status};
use tictactoe_rollup::{
    Dapp, Driver, RollupClient, RollupError, RollupRequest, RollupRequestType, WireNotice,
    hex_to_string, string_to_hex,
};

/// Rollup server double that replays queued requests and records output.
#[derive(Debug, Default)]
struct FakeRollup {
    pending: Mutex<VecDeque<RollupRequest>>,
    statuses: Mutex<Vec<Status>>,
    notices: Mutex<Vec<String>>,
    reports: Mutex<Vec<String>>,
    fail_notices: bool,
}

impl FakeRollup {
    fn push_advance(&self, sender: &str, payload: serde_json::Value) {
        self.pending.lock().unwrap().push_back(RollupRequest {
            request_type: RollupRequestType::AdvanceState,
            data: json!({
                "metadata": {"msg_sender": sender, "epoch_index": 0, "input_index": 0},
                "payload": string_to_hex(&payload.to_string()),
            }),
        });
    }

    fn push_inspect(&self) {
        self.pending.lock().unwrap().push_back(RollupRequest {
            request_type: RollupRequestType::InspectState,
            data: json!({"payload": string_to_hex("status")}),
        });
    }

    fn notices(&self) -> Vec<WireNotice> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|hex| serde_json::from_str(&hex_to_string(hex).unwrap()).unwrap())
            .collect()
    }
}

#[async_trait]
impl RollupClient for FakeRollup {
    async fn finish(&self, status: Status) -> Result<Option<RollupRequest>, RollupError> {
        self.statuses.lock().unwrap().push(status);
        Ok(self.pending.lock().unwrap().pop_front())
    }

    async fn add_notice(&self, payload: &str) -> Result<(), RollupError> {
        if self.fail_notices {
            return Err(RollupError::UnexpectedStatus {
                endpoint: "notice",
                status: 500,
            });
        }
        self.notices.lock().unwrap().push(payload.to_string());
        Ok(())
    }

    async fn add_report(&self, payload: &str) -> Result<(), RollupError> {
        self.reports.lock().unwrap().push(payload.to_string());
        Ok(())
    }
}

fn driver(client: FakeRollup) -> Driver<FakeRollup> {
    let machine = MatchStateMachine::seeded(3, 5).unwrap();
    Driver::new(client, Dapp::new(machine), Duration::from_millis(1))
}

async fn drain(driver: &mut Driver<FakeRollup>) -> usize {
    let mut processed = 0;
    while driver.step().await.unwrap() {
        processed += 1;
    }
    processed
}

fn game_id(driver: &Driver<FakeRollup>) -> u32 {
    *driver.dapp().machine().current().unwrap().id()
}

#[tokio::test]
async fn test_empty_queue_reports_nothing_pending() {
    let mut driver = driver(FakeRollup::default());
    assert!(!driver.step().await.unwrap());
    assert_eq!(driver.status(), Status::Accept);
}

#[tokio::test]
async fn test_new_game_posts_notice() {
    let rollup = FakeRollup::default();
    rollup.push_advance("0xp1", json!({"request": "new"}));
    let mut driver = driver(rollup);

    assert_eq!(drain(&mut driver).await, 1);
    assert_eq!(driver.status(), Status::Accept);

    let id = game_id(&driver);
    let notices = driver_client(&driver).notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].id, Some(1));
    assert_eq!(notices[0].notice, "new_game_created");
    assert_eq!(notices[0].gameid, Some(id.to_string()));
}

#[tokio::test]
async fn test_full_game_to_win() {
    let mut driver = driver(FakeRollup::default());
    driver_client(&driver).push_advance("0xp1", json!({"request": "new"}));
    drain(&mut driver).await;
    let id = game_id(&driver);

    let client = driver_client(&driver);
    client.push_advance("0xp2", json!({"request": "join", "id": id}));
    let moves = [
        ("0xp1", [["X", "-", "-"], ["-", "-", "-"], ["-", "-", "-"]]),
        ("0xp2", [["X", "-", "-"], ["O", "-", "-"], ["-", "-", "-"]]),
        ("0xp1", [["X", "X", "-"], ["O", "-", "-"], ["-", "-", "-"]]),
        ("0xp2", [["X", "X", "-"], ["O", "O", "-"], ["-", "-", "-"]]),
        ("0xp1", [["X", "X", "X"], ["O", "O", "-"], ["-", "-", "-"]]),
    ];
    for (sender, board) in moves {
        client.push_advance(sender, json!({"request": "update", "move": board, "size": 3}));
    }
    assert_eq!(drain(&mut driver).await, 6);

    let notices = driver_client(&driver).notices();
    let names: Vec<&str> = notices.iter().map(|n| n.notice.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "new_game_created",
            "opponent_joined",
            "board_updated",
            "board_updated",
            "board_updated",
            "board_updated",
            "board_updated",
            "game_ended",
        ]
    );
    assert_eq!(notices[2].next.as_deref(), Some("O"));
    assert_eq!(notices[7].winner.as_deref(), Some("X"));
    assert_eq!(
        *driver.dapp().machine().current().unwrap().phase(),
        Phase::Ended
    );
}

#[tokio::test]
async fn test_rejections_are_reported_on_next_finish() {
    let rollup = FakeRollup::default();
    rollup.push_advance("0xp1", json!({"request": "new"}));
    rollup.push_advance("0xp1", json!({"request": "join", "id": 1}));
    rollup.push_advance("0xp1", json!({"request": "resign"}));
    rollup.push_advance("0xp1", json!({"request": "new"}));
    let mut driver = driver(rollup);

    drain(&mut driver).await;

    let statuses = driver_client(&driver).statuses.lock().unwrap().clone();
    // First finish reports the initial accept; each later finish reports
    // the previous request's outcome.
    assert_eq!(
        statuses,
        vec![
            Status::Accept,
            Status::Accept,
            Status::Reject,
            Status::Reject,
            Status::Accept,
        ]
    );
}

#[tokio::test]
async fn test_garbage_payload_rejected_without_state_change() {
    let rollup = FakeRollup::default();
    rollup.pending.lock().unwrap().push_back(RollupRequest {
        request_type: RollupRequestType::AdvanceState,
        data: json!({"metadata": {"msg_sender": "0xp1"}, "payload": "0xnothex"}),
    });
    let mut driver = driver(rollup);

    drain(&mut driver).await;
    assert_eq!(driver.status(), Status::Reject);
    assert!(driver.dapp().machine().current().is_none());
    assert!(driver_client(&driver).notices().is_empty());
}

#[tokio::test]
async fn test_notice_failure_is_not_fatal() {
    let rollup = FakeRollup {
        fail_notices: true,
        ..Default::default()
    };
    rollup.push_advance("0xp1", json!({"request": "new"}));
    let mut driver = driver(rollup);

    assert_eq!(drain(&mut driver).await, 1);
    assert_eq!(driver.status(), Status::Accept);
    assert!(driver.dapp().machine().current().is_some());
}

#[tokio::test]
async fn test_inspect_reports_snapshot() {
    let rollup = FakeRollup::default();
    rollup.push_advance("0xp1", json!({"request": "new"}));
    rollup.push_inspect();
    let mut driver = driver(rollup);

    drain(&mut driver).await;
    assert_eq!(driver.status(), Status::Accept);

    let reports = driver_client(&driver).reports.lock().unwrap().clone();
    assert_eq!(reports.len(), 1);
    let snapshot: serde_json::Value =
        serde_json::from_str(&hex_to_string(&reports[0]).unwrap()).unwrap();
    assert_eq!(snapshot["phase"], "AwaitingJoin");
    assert_eq!(snapshot["player_x"], "0xp1");
    assert_eq!(snapshot["turn"], "X");
}

#[tokio::test]
async fn test_unknown_request_type_rejected() {
    let rollup = FakeRollup::default();
    rollup.pending.lock().unwrap().push_back(RollupRequest {
        request_type: RollupRequestType::Unknown,
        data: json!({}),
    });
    let mut driver = driver(rollup);

    drain(&mut driver).await;
    assert_eq!(driver.status(), Status::Reject);
}

fn driver_client(driver: &Driver<FakeRollup>) -> &FakeRollup {
    driver.client()
}
