//! End-to-end playback over fixture sessions

use recsync::{
    Config, Playback, PlayerEvent, PlayerHandle, Session, SessionError, SimulatedPlayer, Slot,
    SyncState,
};

use crate::helpers::{fixtures_dir, load_fixture};

fn sample_playback() -> (Playback<SimulatedPlayer>, SimulatedPlayer, SimulatedPlayer) {
    let session = Session::from_json(&load_fixture("sample_session.json")).unwrap();
    let master = SimulatedPlayer::new(0.0);
    let secondary = SimulatedPlayer::new(0.0);
    let mut playback = Playback::new(session, Config::default());
    playback.register(Slot::Master, master.clone());
    playback.register(Slot::Secondary, secondary.clone());
    (playback, master, secondary)
}

#[test]
fn loads_fixture_from_disk() {
    let session = Session::load(fixtures_dir().join("sample_session.json")).unwrap();
    assert_eq!(session.title(), "Weekly sync - 2020-09-13");
    assert_eq!(session.chat.len(), 3);
    assert_eq!(session.slides.len(), 3);
    assert_eq!(session.duration(), 60.0);
    assert!(session.has_screenshare());
}

#[test]
fn broken_fixtures_are_rejected_with_the_timeline_name() {
    let err = Session::load(fixtures_dir().join("unsorted_chat.json")).unwrap_err();
    assert!(matches!(err, SessionError::Integrity(ref e) if e.timeline() == "chat"));

    let err = Session::load(fixtures_dir().join("inverted_window.json")).unwrap_err();
    assert!(matches!(err, SessionError::Integrity(ref e) if e.timeline() == "screenshare"));
}

#[test]
fn missing_file_is_reported() {
    let err = Session::load(fixtures_dir().join("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, SessionError::FileNotFound { .. }));
}

#[test]
fn main_view_follows_screenshare_windows() {
    let (mut playback, master, secondary) = sample_playback();
    master.play().unwrap();
    playback.handle_event(PlayerEvent::Play);

    let mut switches = Vec::new();
    for _ in 0..240 {
        master.advance(0.25);
        secondary.advance(0.25);
        let frame = playback.handle_event(PlayerEvent::TimeUpdate).unwrap();
        if frame.main_changed {
            switches.push((frame.time, frame.main.name()));
        }
    }

    assert_eq!(
        switches,
        vec![
            (15.0, "screenshare"),
            (20.0, "presentation"),
            (45.0, "screenshare"),
        ]
    );
    assert_eq!(playback.sync_state(), SyncState::Syncing);
}

#[test]
fn slides_and_chat_advance_with_playback() {
    let (mut playback, master, _secondary) = sample_playback();

    master.set_position(11.0);
    let frame = playback.handle_event(PlayerEvent::TimeUpdate).unwrap();
    assert_eq!(frame.chat_index, Some(1));
    assert_eq!(playback.current_slide().map(|s| s.id.as_str()), Some("slide-2"));
    assert!(playback.is_chat_spoken(1));
    assert!(!playback.is_chat_spoken(2));

    master.set_position(50.0);
    playback.handle_event(PlayerEvent::TimeUpdate).unwrap();
    assert_eq!(playback.current_slide().map(|s| s.id.as_str()), Some("slide-3"));
    assert_eq!(playback.current_chat().map(|m| m.message.as_str()), Some("C"));
}

#[test]
fn cursor_hidden_between_samples() {
    let (mut playback, master, _secondary) = sample_playback();

    master.set_position(2.0);
    playback.handle_event(PlayerEvent::TimeUpdate);
    assert!(playback.current_cursor().is_some());

    master.set_position(10.0);
    playback.handle_event(PlayerEvent::TimeUpdate);
    assert!(playback.current_cursor().is_none());
    assert_eq!(playback.frame().and_then(|f| f.cursor_index), Some(1));
}

#[test]
fn seeking_to_chat_moves_both_players() {
    let (mut playback, master, secondary) = sample_playback();

    assert!(playback.seek_to_chat(2));
    assert_eq!(master.position(), 12.0);
    assert_eq!(secondary.position(), 12.0);
    assert_eq!(playback.frame().and_then(|f| f.chat_index), Some(2));
    assert!(!playback.seek_to_chat(7));
}

#[test]
fn secondary_outage_does_not_stop_the_clock() {
    let (mut playback, master, secondary) = sample_playback();
    master.play().unwrap();
    playback.handle_event(PlayerEvent::Play);

    secondary.set_available(false);
    for _ in 0..4 {
        master.advance(1.0);
        assert!(playback.handle_event(PlayerEvent::TimeUpdate).is_some());
    }
    assert_eq!(playback.sync_stats().unavailable_updates, 4);

    secondary.set_available(true);
    master.advance(1.0);
    playback.handle_event(PlayerEvent::TimeUpdate);
    assert!((secondary.position() - master.position()).abs() <= 0.5);
}

#[test]
fn master_outage_produces_no_frame() {
    let (mut playback, master, _secondary) = sample_playback();
    master.set_available(false);
    assert!(playback.handle_event(PlayerEvent::TimeUpdate).is_none());
}

#[test]
fn session_without_screenshare_runs_master_only() {
    let session = Session::from_json(&load_fixture("no_screenshare.json")).unwrap();
    let master = SimulatedPlayer::new(9.5);
    let mut playback = Playback::new(session, Config::default());
    playback.register(Slot::Master, master);

    let frame = playback.handle_event(PlayerEvent::TimeUpdate).unwrap();
    assert_eq!(playback.sync_state(), SyncState::PassThrough);
    assert_eq!(frame.chat_index, Some(1));
    assert_eq!(frame.display_second, 10);
    assert_eq!(frame.main.name(), "presentation");
}
