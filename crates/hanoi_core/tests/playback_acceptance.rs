use hanoi_core::{MoveSequence, PlaybackController, RodState};
use shared::{
    domain::{EndReason, SessionState},
    protocol::SessionEvent,
};

#[tokio::test(start_paused = true)]
async fn subscriber_mirror_tracks_the_controller_rods_move_for_move() {
    let controller = PlaybackController::new();
    let mut events = controller.subscribe_events();

    let handle = controller.start(7, 20).await.expect("start");
    let mut mirror = RodState::new();
    let mut applied_moves = Vec::new();

    loop {
        match events.recv().await.expect("event stream open") {
            SessionEvent::SessionStarted { disk_count, .. } => {
                mirror.reset(disk_count).expect("mirror reset");
            }
            SessionEvent::MoveApplied { applied, .. } => {
                let disk = mirror
                    .apply_move(applied.from, applied.to)
                    .expect("mirror move");
                assert_eq!(disk.rank(), applied.disk_rank);
                mirror.verify().expect("mirror stays valid");
                applied_moves.push(applied.as_move());
            }
            SessionEvent::SessionEnded { reason, .. } => {
                assert_eq!(reason, EndReason::Completed);
                break;
            }
            SessionEvent::SessionFaulted { detail, .. } => panic!("session faulted: {detail}"),
        }
    }

    assert_eq!(handle.finished().await, SessionState::Completed);
    assert_eq!(applied_moves, MoveSequence::standard(7).collect::<Vec<_>>());
    assert_eq!(mirror.snapshot(), controller.rods().await);
}

#[tokio::test(start_paused = true)]
async fn rapid_restarts_never_interleave_sessions() {
    let controller = PlaybackController::new();
    let mut events = controller.subscribe_events();

    let mut handles = Vec::new();
    for disk_count in [4, 5, 6] {
        handles.push(controller.start(disk_count, 30).await.expect("start"));
    }
    let last = handles.last().expect("handles").clone();
    assert_eq!(last.finished().await, SessionState::Completed);

    let mut seen_sessions = Vec::new();
    while let Ok(event) = events.try_recv() {
        let session = event.session();
        if seen_sessions.last() != Some(&session) {
            assert!(
                !seen_sessions.contains(&session),
                "session {session} resumed after another session emitted"
            );
            seen_sessions.push(session);
        }
    }
    assert_eq!(
        seen_sessions,
        handles.iter().map(|handle| handle.id()).collect::<Vec<_>>()
    );
    for handle in &handles[..2] {
        assert_eq!(handle.state(), SessionState::Cancelled);
    }
}
