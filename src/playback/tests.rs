use super::*;
use crate::audio::fake::{Call, RecordingBackend};
use crate::error::Error;
use crate::library::Track;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn t(name: &str) -> Track {
    Track {
        name: name.into(),
        path: PathBuf::from("/music").join(name),
        size: 0,
    }
}

fn controller() -> (PlaybackController, RecordingBackend) {
    let backend = RecordingBackend::new();
    let ctl = PlaybackController::new(Box::new(backend.clone()), 0.7);
    (ctl, backend)
}

#[test]
fn idle_play_pause_resume_stop_cycle() {
    let (ctl, backend) = controller();
    assert_eq!(ctl.state(), PlaybackState::Idle);
    assert!(ctl.current().is_none());

    ctl.play(t("a.mp3")).unwrap();
    assert_eq!(ctl.current(), Some((t("a.mp3"), PlaybackState::Playing)));

    ctl.pause().unwrap();
    assert_eq!(ctl.state(), PlaybackState::Paused);

    ctl.resume().unwrap();
    assert_eq!(ctl.state(), PlaybackState::Playing);

    assert_eq!(ctl.stop(), Some(t("a.mp3")));
    assert_eq!(ctl.state(), PlaybackState::Idle);
    assert!(ctl.current().is_none());

    assert_eq!(
        backend.calls(),
        vec![
            Call::Start(PathBuf::from("/music/a.mp3")),
            Call::Pause,
            Call::Resume,
            Call::Stop,
        ]
    );
}

#[test]
fn invalid_transitions_report_invalid_state() {
    let (ctl, backend) = controller();

    assert!(matches!(
        ctl.pause(),
        Err(Error::InvalidState {
            action: "pause",
            state: PlaybackState::Idle
        })
    ));
    assert!(matches!(
        ctl.resume(),
        Err(Error::InvalidState {
            action: "resume",
            state: PlaybackState::Idle
        })
    ));

    ctl.play(t("a.mp3")).unwrap();
    assert!(matches!(
        ctl.resume(),
        Err(Error::InvalidState {
            state: PlaybackState::Playing,
            ..
        })
    ));

    ctl.pause().unwrap();
    assert!(matches!(
        ctl.pause(),
        Err(Error::InvalidState {
            state: PlaybackState::Paused,
            ..
        })
    ));

    // Only the valid transitions reached the output.
    assert_eq!(
        backend.calls(),
        vec![Call::Start(PathBuf::from("/music/a.mp3")), Call::Pause]
    );
}

#[test]
fn stop_is_idempotent() {
    let (ctl, backend) = controller();
    assert_eq!(ctl.stop(), None);

    ctl.play(t("a.mp3")).unwrap();
    assert!(ctl.stop().is_some());
    assert_eq!(ctl.stop(), None);
    assert_eq!(ctl.state(), PlaybackState::Idle);

    let stops = backend.calls().iter().filter(|c| **c == Call::Stop).count();
    assert_eq!(stops, 1);
}

#[test]
fn play_replaces_current_track_with_stop_then_start() {
    let (ctl, backend) = controller();

    ctl.play(t("a.mp3")).unwrap();
    ctl.play(t("b.mp3")).unwrap();

    assert_eq!(ctl.current(), Some((t("b.mp3"), PlaybackState::Playing)));
    assert_eq!(
        backend.calls(),
        vec![
            Call::Start(PathBuf::from("/music/a.mp3")),
            Call::Stop,
            Call::Start(PathBuf::from("/music/b.mp3")),
        ]
    );
}

#[test]
fn play_while_paused_also_replaces() {
    let (ctl, backend) = controller();
    ctl.play(t("a.mp3")).unwrap();
    ctl.pause().unwrap();
    ctl.play(t("b.mp3")).unwrap();

    assert_eq!(ctl.current(), Some((t("b.mp3"), PlaybackState::Playing)));
    assert_eq!(backend.calls()[2], Call::Stop);
}

#[test]
fn failed_start_leaves_session_idle() {
    let backend = RecordingBackend::new().failing_start();
    let ctl = PlaybackController::new(Box::new(backend.clone()), 0.7);

    assert!(matches!(ctl.play(t("bad.mp3")), Err(Error::PlaybackFailed(_))));
    assert_eq!(ctl.state(), PlaybackState::Idle);
    assert!(ctl.current().is_none());
}

#[test]
fn pause_without_capability_is_unsupported() {
    let backend = RecordingBackend::new().without_pause();
    let ctl = PlaybackController::new(Box::new(backend), 0.7);

    ctl.play(t("a.mp3")).unwrap();
    assert!(matches!(ctl.pause(), Err(Error::UnsupportedOperation("pause"))));
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[test]
fn play_or_resume_follows_session_state() {
    let (ctl, backend) = controller();

    let outcome = ctl.play_or_resume(|| Ok(t("first.mp3"))).unwrap();
    assert_eq!(outcome, PlayOutcome::Started(t("first.mp3")));

    let outcome = ctl
        .play_or_resume(|| panic!("must not pick while playing"))
        .unwrap();
    assert_eq!(outcome, PlayOutcome::AlreadyPlaying(t("first.mp3")));

    ctl.pause().unwrap();
    let outcome = ctl
        .play_or_resume(|| panic!("must not pick while paused"))
        .unwrap();
    assert_eq!(outcome, PlayOutcome::Resumed(t("first.mp3")));
    assert_eq!(ctl.state(), PlaybackState::Playing);

    // Resuming never restarts the file.
    let starts = backend
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::Start(_)))
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn play_or_resume_picks_without_holding_the_session() {
    let (ctl, _backend) = controller();
    let outcome = ctl
        .play_or_resume(|| {
            // Other commands stay served while the store is scanned.
            assert_eq!(ctl.state(), PlaybackState::Idle);
            Ok(t("a.mp3"))
        })
        .unwrap();
    assert_eq!(outcome, PlayOutcome::Started(t("a.mp3")));
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[test]
fn play_or_resume_propagates_pick_errors() {
    let (ctl, _backend) = controller();
    assert!(matches!(
        ctl.play_or_resume(|| Err(Error::NoTracks)),
        Err(Error::NoTracks)
    ));
    assert_eq!(ctl.state(), PlaybackState::Idle);
}

#[test]
fn volume_is_clamped_and_forwarded() {
    let (ctl, backend) = controller();
    assert!((ctl.volume() - 0.7).abs() < f32::EPSILON);

    assert_eq!(ctl.set_volume(1.7).unwrap(), 1.0);
    assert_eq!(ctl.set_volume(-0.2).unwrap(), 0.0);
    assert_eq!(ctl.volume(), 0.0);
    assert_eq!(
        backend.calls(),
        vec![Call::SetVolume(1.0), Call::SetVolume(0.0)]
    );
}

#[test]
fn elapsed_is_only_reported_for_a_loaded_track() {
    let (ctl, _backend) = controller();
    assert_eq!(ctl.elapsed(), None);
    ctl.play(t("a.mp3")).unwrap();
    assert_eq!(ctl.elapsed(), Some(Duration::from_secs(42)));
}

#[test]
fn shutdown_hands_the_loaded_track_to_the_output() {
    let (ctl, backend) = controller();
    ctl.play(t("a.mp3")).unwrap();
    ctl.shutdown();

    assert_eq!(ctl.state(), PlaybackState::Idle);
    assert!(ctl.current().is_none());
    // No Stop first: the output fades out the sink it still holds.
    assert_eq!(&backend.calls()[1..], &[Call::Shutdown]);
}

#[test]
fn concurrent_stops_stop_exactly_once() {
    for _ in 0..50 {
        let (ctl, backend) = controller();
        let ctl = Arc::new(ctl);
        ctl.play(t("a.mp3")).unwrap();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let ctl = Arc::clone(&ctl);
                thread::spawn(move || ctl.stop())
            })
            .collect();
        let stopped: Vec<Option<Track>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(stopped.iter().filter(|s| s.is_some()).count(), 1);
        assert_eq!(ctl.state(), PlaybackState::Idle);
        let stops = backend.calls().iter().filter(|c| **c == Call::Stop).count();
        assert_eq!(stops, 1);
    }
}

#[test]
fn concurrent_play_and_stop_end_in_a_consistent_state() {
    for _ in 0..50 {
        let (ctl, _backend) = controller();
        let ctl = Arc::new(ctl);

        let player = {
            let ctl = Arc::clone(&ctl);
            thread::spawn(move || ctl.play(t("a.mp3")).map(|_| ()))
        };
        let stopper = {
            let ctl = Arc::clone(&ctl);
            thread::spawn(move || ctl.stop())
        };
        player.join().unwrap().unwrap();
        stopper.join().unwrap();

        match ctl.current() {
            Some((track, PlaybackState::Playing)) => assert_eq!(track, t("a.mp3")),
            None => assert_eq!(ctl.state(), PlaybackState::Idle),
            other => panic!("unexpected session {other:?}"),
        }
    }
}
