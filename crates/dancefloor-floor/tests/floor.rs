//! Integration tests for the floor actor: fan-out, replay, and leave.
//!
//! The floor handles commands strictly in order, so awaiting
//! `snapshot()` after a `publish` guarantees the fan-out already
//! happened. That lets these tests drain receivers with `try_recv`
//! instead of sleeping.

use dancefloor_floor::{
    DancerState, FloorConfig, FloorError, FloorHandle, spawn_floor,
};
use dancefloor_protocol::{DancerId, Frame, Message, Mood, Position};
use tokio::sync::mpsc;

// =========================================================================
// Helpers
// =========================================================================

type Inbox = mpsc::UnboundedReceiver<Frame>;

fn did(n: u64) -> DancerId {
    DancerId(n)
}

fn pos(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

fn mood(v: u8) -> Mood {
    Mood::new(v).unwrap()
}

/// Joins `id` to the floor and returns the inbox its frames land in.
///
/// The newcomer's own `join` frame is consumed here, so what is left in
/// the inbox starts with the replay.
async fn join(floor: &FloorHandle, id: u64) -> Inbox {
    let (tx, mut rx) = mpsc::unbounded_channel();
    floor.join(did(id), tx).await.expect("join should succeed");
    assert_eq!(
        rx.try_recv().ok(),
        Some(Frame::new(did(id), Message::Join)),
        "newcomer should first hear its own join"
    );
    rx
}

/// Waits for every queued floor command to be handled.
async fn settle(floor: &FloorHandle) {
    floor.snapshot().await.expect("floor should respond");
}

/// Drains everything currently sitting in an inbox.
fn drain(inbox: &mut Inbox) -> Vec<Frame> {
    let mut frames = Vec::new();
    while let Ok(frame) = inbox.try_recv() {
        frames.push(frame);
    }
    frames
}

// =========================================================================
// Broadcast
// =========================================================================

#[tokio::test]
async fn test_publish_reaches_peers_but_not_sender() {
    let floor = spawn_floor(&FloorConfig::default());
    let mut a = join(&floor, 1).await;
    let mut b = join(&floor, 2).await;
    let mut c = join(&floor, 3).await;
    settle(&floor).await;
    drain(&mut a);
    drain(&mut b);
    drain(&mut c);

    floor.publish(did(1), Message::Spin).await.unwrap();
    settle(&floor).await;

    let expected = vec![Frame::new(did(1), Message::Spin)];
    assert_eq!(drain(&mut b), expected);
    assert_eq!(drain(&mut c), expected);
    assert!(drain(&mut a).is_empty(), "sender must not hear itself");
}

#[tokio::test]
async fn test_publish_preserves_sender_order_per_peer() {
    let floor = spawn_floor(&FloorConfig::default());
    let _a = join(&floor, 1).await;
    let mut b = join(&floor, 2).await;
    settle(&floor).await;
    drain(&mut b);

    for i in 0..50 {
        let x = f64::from(i) / 50.0;
        floor.publish(did(1), Message::Move(pos(x, 0.0))).await.unwrap();
    }
    settle(&floor).await;

    let xs: Vec<f64> = drain(&mut b)
        .into_iter()
        .map(|frame| match frame.message {
            Message::Move(p) => p.x,
            other => panic!("expected move, got {other:?}"),
        })
        .collect();
    let expected: Vec<f64> = (0..50).map(|i| f64::from(i) / 50.0).collect();
    assert_eq!(xs, expected);
}

#[tokio::test]
async fn test_publish_from_unregistered_dancer_is_dropped() {
    let floor = spawn_floor(&FloorConfig::default());
    let mut a = join(&floor, 1).await;
    settle(&floor).await;
    drain(&mut a);

    floor.publish(did(99), Message::Bounce).await.unwrap();
    settle(&floor).await;

    assert!(drain(&mut a).is_empty());
    assert!(!floor.snapshot().await.unwrap().contains(did(99)));
}

#[tokio::test]
async fn test_publish_to_closed_sink_does_not_disturb_others() {
    let floor = spawn_floor(&FloorConfig::default());
    let _a = join(&floor, 1).await;
    let b = join(&floor, 2).await;
    let mut c = join(&floor, 3).await;
    settle(&floor).await;
    drain(&mut c);
    drop(b);

    floor.publish(did(1), Message::Bounce).await.unwrap();
    settle(&floor).await;

    assert_eq!(drain(&mut c), vec![Frame::new(did(1), Message::Bounce)]);
}

#[tokio::test]
async fn test_stalled_peer_backlog_does_not_block_floor() {
    let floor = spawn_floor(&FloorConfig { command_buffer: 1 });
    let _a = join(&floor, 1).await;
    let mut stalled = join(&floor, 2).await;
    settle(&floor).await;

    let publishes = async {
        for _ in 0..1_000 {
            floor.publish(did(1), Message::Bounce).await.unwrap();
        }
        settle(&floor).await;
    };
    tokio::time::timeout(std::time::Duration::from_secs(2), publishes)
        .await
        .expect("floor should not wait on an undrained inbox");

    assert_eq!(drain(&mut stalled).len(), 1_000);
}

// =========================================================================
// Join and replay
// =========================================================================

#[tokio::test]
async fn test_join_tells_newcomer_its_own_id_on_empty_floor() {
    let floor = spawn_floor(&FloorConfig::default());
    let (tx, mut rx) = mpsc::unbounded_channel();

    floor.join(did(0), tx).await.unwrap();

    assert_eq!(drain(&mut rx), vec![Frame::new(did(0), Message::Join)]);
}

#[tokio::test]
async fn test_join_own_id_frame_precedes_replay() {
    let floor = spawn_floor(&FloorConfig::default());
    let _a = join(&floor, 1).await;
    floor.publish(did(1), Message::Mood(mood(5))).await.unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    floor.join(did(2), tx).await.unwrap();

    assert_eq!(
        drain(&mut rx),
        vec![
            Frame::new(did(2), Message::Join),
            Frame::new(did(1), Message::Move(Position::DEFAULT)),
            Frame::new(did(1), Message::Mood(mood(5))),
        ]
    );
}

#[tokio::test]
async fn test_join_announces_newcomer_to_peers() {
    let floor = spawn_floor(&FloorConfig::default());
    let mut a = join(&floor, 1).await;
    let _b = join(&floor, 2).await;
    settle(&floor).await;

    assert_eq!(drain(&mut a), vec![Frame::new(did(2), Message::Join)]);
}

#[tokio::test]
async fn test_join_replays_peer_state_but_not_own() {
    let floor = spawn_floor(&FloorConfig::default());
    let _a = join(&floor, 1).await;
    let _b = join(&floor, 2).await;
    floor.publish(did(1), Message::Move(pos(0.2, 0.3))).await.unwrap();
    floor.publish(did(1), Message::Mood(mood(4))).await.unwrap();

    let mut d = join(&floor, 4).await;
    let replay = drain(&mut d);

    assert_eq!(
        replay,
        vec![
            Frame::new(did(1), Message::Move(pos(0.2, 0.3))),
            Frame::new(did(1), Message::Mood(mood(4))),
            Frame::new(did(2), Message::Move(Position::DEFAULT)),
            Frame::new(did(2), Message::Mood(Mood::DEFAULT)),
        ]
    );
    assert!(replay.iter().all(|frame| frame.dancer != did(4)));
}

#[tokio::test]
async fn test_join_replay_arrives_before_live_broadcasts() {
    let floor = spawn_floor(&FloorConfig::default());
    let _a = join(&floor, 1).await;
    let mut d = join(&floor, 2).await;
    floor.publish(did(1), Message::Bounce).await.unwrap();
    settle(&floor).await;

    let frames = drain(&mut d);
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].message.command(), dancefloor_protocol::Command::Move);
    assert_eq!(frames[1].message.command(), dancefloor_protocol::Command::Mood);
    assert_eq!(frames[2], Frame::new(did(1), Message::Bounce));
}

#[tokio::test]
async fn test_join_twice_is_rejected() {
    let floor = spawn_floor(&FloorConfig::default());
    let _a = join(&floor, 1).await;

    let (tx, _rx) = mpsc::unbounded_channel();
    let result = floor.join(did(1), tx).await;

    assert_eq!(result, Err(FloorError::AlreadyJoined(did(1))));
}

#[tokio::test]
async fn test_last_known_state_updates_replay() {
    let floor = spawn_floor(&FloorConfig::default());
    let _a = join(&floor, 1).await;
    floor.publish(did(1), Message::Move(pos(0.1, 0.1))).await.unwrap();
    floor.publish(did(1), Message::Move(pos(0.7, 0.1))).await.unwrap();
    floor.publish(did(1), Message::Fire(pos(0.9, 0.9))).await.unwrap();

    let mut d = join(&floor, 2).await;

    assert_eq!(
        drain(&mut d)[0],
        Frame::new(did(1), Message::Move(pos(0.7, 0.1)))
    );
    let snapshot = floor.snapshot().await.unwrap();
    assert_eq!(
        snapshot.get(did(1)),
        Some(&DancerState {
            last_move: pos(0.7, 0.1),
            last_mood: Mood::DEFAULT,
        })
    );
}

// =========================================================================
// Leave
// =========================================================================

#[tokio::test]
async fn test_leave_notifies_each_peer_once_and_unregisters() {
    let floor = spawn_floor(&FloorConfig::default());
    let mut a = join(&floor, 1).await;
    let mut b = join(&floor, 2).await;
    let mut c = join(&floor, 3).await;
    settle(&floor).await;
    drain(&mut a);
    drain(&mut b);
    drain(&mut c);

    floor.leave(did(1)).await.unwrap();
    floor.publish(did(2), Message::Spin).await.unwrap();
    settle(&floor).await;

    let leave = Frame::new(did(1), Message::Leave);
    let spin = Frame::new(did(2), Message::Spin);
    assert_eq!(drain(&mut b), vec![leave]);
    assert_eq!(drain(&mut c), vec![leave, spin]);
    assert!(drain(&mut a).is_empty(), "departed dancer gets nothing");
    assert!(!floor.snapshot().await.unwrap().contains(did(1)));
}

#[tokio::test]
async fn test_leave_closes_delivery_channel() {
    let floor = spawn_floor(&FloorConfig::default());
    let mut a = join(&floor, 1).await;

    floor.leave(did(1)).await.unwrap();

    // The floor dropped its sender, so the inbox reports closed.
    assert_eq!(a.recv().await, None);
}

#[tokio::test]
async fn test_leave_unknown_dancer_is_error() {
    let floor = spawn_floor(&FloorConfig::default());
    assert_eq!(
        floor.leave(did(5)).await,
        Err(FloorError::NotJoined(did(5)))
    );
}

#[tokio::test]
async fn test_departed_dancer_missing_from_later_replay() {
    let floor = spawn_floor(&FloorConfig::default());
    let _a = join(&floor, 1).await;
    let _b = join(&floor, 2).await;
    floor.leave(did(1)).await.unwrap();

    let mut d = join(&floor, 3).await;
    let replay = drain(&mut d);

    assert_eq!(replay.len(), 2);
    assert!(replay.iter().all(|frame| frame.dancer == did(2)));
}

// =========================================================================
// Lifecycle
// =========================================================================

#[tokio::test]
async fn test_shutdown_makes_floor_unavailable() {
    let floor = spawn_floor(&FloorConfig::default());
    floor.shutdown().await.unwrap();

    // Give the actor a chance to exit and drop its receiver.
    tokio::task::yield_now().await;
    let result = floor.snapshot().await;

    assert_eq!(result, Err(FloorError::Unavailable));
}

#[tokio::test]
async fn test_zero_command_buffer_is_clamped() {
    let floor = spawn_floor(&FloorConfig { command_buffer: 0 });
    let _a = join(&floor, 1).await;
    assert_eq!(floor.snapshot().await.unwrap().len(), 1);
}
