//! End-to-end match scenarios driven through the state machine.

use tictactoe_core::{
    Board, Cell, Coord, GameEnd, JoinError, Mark, MatchStateMachine, MoveError, Notice, Phase,
    RejectReason, Request, RequestError, Status, TerminalOutcome, terminal_outcome,
};

fn rows(lines: &[&str]) -> Vec<Vec<String>> {
    lines
        .iter()
        .map(|l| l.chars().map(|c| c.to_string()).collect())
        .collect()
}

fn created() -> (MatchStateMachine, u32) {
    let mut machine = MatchStateMachine::seeded(3, 2024).unwrap();
    let verdict = machine.handle(&Request::new_game("P1"));
    let id = match verdict.notices.as_slice() {
        [Notice::NewGameCreated { game_id }] => *game_id,
        other => panic!("Expected new_game_created, got {:?}", other),
    };
    (machine, id)
}

fn joined() -> (MatchStateMachine, u32) {
    let (mut machine, id) = created();
    assert!(machine.handle(&Request::join("P2", id)).is_accepted());
    (machine, id)
}

#[test]
fn test_new_game_creates_empty_board_with_x_to_move() {
    let (machine, id) = created();
    assert!((100..=999).contains(&id));
    assert_eq!(id.to_string().len(), 3);

    let game = machine.current().unwrap();
    assert_eq!(game.board(), &Board::init_empty(3).unwrap());
    assert_eq!(*game.turn(), Mark::X);
    assert_eq!(*game.phase(), Phase::AwaitingJoin);
}

#[test]
fn test_join_with_correct_id_notifies() {
    let (mut machine, id) = created();
    let verdict = machine.handle(&Request::join("P2", id));
    assert_eq!(verdict.status, Status::Accept);
    assert_eq!(verdict.notices, vec![Notice::OpponentJoined { game_id: id }]);
    assert_eq!(*machine.current().unwrap().phase(), Phase::InProgress);
}

#[test]
fn test_creator_cannot_join_own_game() {
    let (mut machine, id) = created();
    let before = machine.current().unwrap().clone();

    assert_eq!(
        machine.apply(&Request::join("P1", id)),
        Err(RequestError::InvalidJoin(JoinError::CreatorCannotJoin))
    );
    let verdict = machine.handle(&Request::join("P1", id));
    assert_eq!(verdict.status, Status::Reject);
    assert!(verdict.notices.is_empty());
    assert_eq!(machine.current().unwrap(), &before);
}

#[test]
fn test_join_with_wrong_id_always_rejected() {
    let (mut machine, id) = created();
    let wrong = if id == 999 { 100 } else { id + 1 };
    for player in ["P1", "P2", "P3"] {
        let verdict = machine.handle(&Request::join(player, wrong));
        assert_eq!(verdict.status, Status::Reject);
    }
    assert_eq!(*machine.current().unwrap().phase(), Phase::AwaitingJoin);
}

#[test]
fn test_first_move_flips_turn() {
    let (mut machine, _) = joined();
    let verdict = machine.handle(&Request::submit_move("P1", rows(&["X--", "---", "---"])));

    assert!(verdict.is_accepted());
    match verdict.notices.as_slice() {
        [Notice::BoardUpdated { state, next }] => {
            assert_eq!(*next, Mark::O);
            assert_eq!(state.get(Coord::new(0, 0)), Some(Cell::Marked(Mark::X)));
        }
        other => panic!("Expected board_updated, got {:?}", other),
    }
    assert_eq!(*machine.current().unwrap().turn(), Mark::O);
}

#[test]
fn test_second_consecutive_move_is_wrong_turn() {
    let (mut machine, _) = joined();
    machine.handle(&Request::submit_move("P1", rows(&["X--", "---", "---"])));

    let result = machine.apply(&Request::submit_move("P1", rows(&["XX-", "---", "---"])));
    assert_eq!(
        result,
        Err(RequestError::InvalidMove(MoveError::Rejected(RejectReason::WrongTurn(Mark::X))))
    );
}

#[test]
fn test_resubmitting_accepted_board_is_rejected() {
    let (mut machine, _) = joined();
    let board = rows(&["X--", "---", "---"]);
    assert!(machine.handle(&Request::submit_move("P1", board.clone())).is_accepted());

    let result = machine.apply(&Request::submit_move("P2", board));
    assert_eq!(
        result,
        Err(RequestError::InvalidMove(MoveError::Rejected(RejectReason::NotASingleMove)))
    );
}

#[test]
fn test_impostor_rejected_as_wrong_player() {
    let (mut machine, _) = joined();
    let result = machine.apply(&Request::submit_move("P3", rows(&["X--", "---", "---"])));
    assert_eq!(
        result,
        Err(RequestError::InvalidMove(MoveError::Rejected(RejectReason::WrongPlayer(Mark::X))))
    );
}

#[test]
fn test_top_row_win_ends_game() {
    let board = Board::from_rows(&rows(&["XXX", "OO-", "---"])).unwrap();
    assert_eq!(terminal_outcome(&board), TerminalOutcome::Winner(Mark::X));

    let (mut machine, _) = joined();
    for (player, lines) in [
        ("P1", ["X--", "---", "---"]),
        ("P2", ["X--", "O--", "---"]),
        ("P1", ["XX-", "O--", "---"]),
        ("P2", ["XX-", "OO-", "---"]),
    ] {
        assert!(machine.handle(&Request::submit_move(player, rows(&lines))).is_accepted());
    }

    let verdict = machine.handle(&Request::submit_move("P1", rows(&["XXX", "OO-", "---"])));
    assert_eq!(
        verdict.notices.last(),
        Some(&Notice::GameEnded(GameEnd::Winner(Mark::X)))
    );
    assert_eq!(*machine.current().unwrap().phase(), Phase::Ended);
}

#[test]
fn test_full_board_without_line_is_draw() {
    // Final board:
    // X O X
    // X O O
    // O X X
    let (mut machine, _) = joined();
    let script = [
        ("P1", ["X--", "---", "---"]),
        ("P2", ["XO-", "---", "---"]),
        ("P1", ["XOX", "---", "---"]),
        ("P2", ["XOX", "-O-", "---"]),
        ("P1", ["XOX", "-O-", "-X-"]),
        ("P2", ["XOX", "-OO", "-X-"]),
        ("P1", ["XOX", "XOO", "-X-"]),
        ("P2", ["XOX", "XOO", "OX-"]),
    ];
    for (player, lines) in script {
        let verdict = machine.handle(&Request::submit_move(player, rows(&lines)));
        assert_eq!(verdict.notices.len(), 1, "Game ended early at {:?}", lines);
    }

    let verdict = machine.handle(&Request::submit_move("P1", rows(&["XOX", "XOO", "OXX"])));
    assert_eq!(verdict.notices.len(), 2);
    assert_eq!(verdict.notices[1], Notice::GameEnded(GameEnd::Draw));
    assert_eq!(*machine.current().unwrap().phase(), Phase::Ended);
}
