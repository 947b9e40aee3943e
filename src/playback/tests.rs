use super::*;
use crate::archive::ArchiveSource;
use std::time::Duration;

fn t(title: &str) -> Track {
    Track::new(title, "Artist", "Album", Duration::from_secs(100))
}

fn loaded(titles: &[&str]) -> (PlaybackStateMachine, Vec<Track>) {
    let tracks: Vec<Track> = titles.iter().map(|s| t(s)).collect();
    let mut machine = PlaybackStateMachine::new();
    machine.load_queue(tracks.clone());
    (machine, tracks)
}

#[test]
fn queue_reset_points_at_first_track_or_nothing() {
    let mut q = QueueState::new();
    assert_eq!(q.current_index(), None);
    assert!(!q.is_at_start());
    assert!(!q.is_at_end());

    q.reset(vec![t("One"), t("Two")]);
    assert_eq!(q.current_index(), Some(0));
    assert_eq!(q.current_track().map(|t| t.title.as_str()), Some("One"));
    assert!(q.is_at_start());
    assert!(!q.is_at_end());

    q.reset(Vec::new());
    assert_eq!(q.current_index(), None);
    assert!(q.current_track().is_none());
}

#[test]
fn queue_advance_and_retreat_stay_in_range() {
    let mut q = QueueState::new();
    assert!(!q.advance());
    assert!(!q.retreat());

    q.reset(vec![t("One"), t("Two")]);
    assert!(!q.retreat());
    assert_eq!(q.current_index(), Some(0));

    assert!(q.advance());
    assert!(q.is_at_end());
    assert!(!q.advance());
    assert_eq!(q.current_index(), Some(1));

    assert!(q.retreat());
    assert_eq!(q.current_index(), Some(0));
}

#[test]
fn load_queue_resets_index_and_clears_current_track() {
    let (mut machine, first) = loaded(&["Intro", "Main"]);
    machine.play();
    assert_eq!(machine.state().current_track.as_ref(), Some(&first[0]));

    machine.load_queue(vec![t("Next")]);

    assert_eq!(machine.queue().current_index(), Some(0));
    assert_eq!(machine.state().current_track, None);
    assert_eq!(machine.state().status, PlaybackStatus::Idle);
    assert_eq!(machine.state().position, 0.0);
}

#[test]
fn load_empty_queue_leaves_nothing_to_play() {
    let mut machine = PlaybackStateMachine::new();
    machine.load_queue(Vec::new());

    assert_eq!(machine.queue().current_index(), None);
    assert_eq!(machine.state().current_track, None);
    assert_eq!(machine.state().status, PlaybackStatus::Idle);

    assert_eq!(machine.play(), None);
    assert_eq!(machine.state().status, PlaybackStatus::Idle);
}

#[test]
fn play_starts_first_track_when_none_active() {
    let (mut machine, tracks) = loaded(&["One", "Two"]);

    let started = machine.play();

    assert_eq!(started.as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().current_track.as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().status, PlaybackStatus::Playing);
}

#[test]
fn second_play_returns_same_track_without_changing_state() {
    let (mut machine, tracks) = loaded(&["One", "Two"]);
    machine.play();
    machine.seek(12.5);
    let before = machine.clone();

    assert_eq!(machine.play().as_ref(), Some(&tracks[0]));
    assert_eq!(machine, before);
}

#[test]
fn adopt_queue_track_only_fills_an_empty_slot() {
    let (mut machine, tracks) = loaded(&["One", "Two"]);

    machine.adopt_queue_track();
    assert_eq!(machine.state().current_track.as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().status, PlaybackStatus::Idle);

    machine.next();
    machine.adopt_queue_track();
    assert_eq!(machine.state().current_track.as_ref(), Some(&tracks[1]));
}

#[test]
fn pause_only_when_playing() {
    let (mut machine, tracks) = loaded(&["One"]);

    assert_eq!(machine.pause(), None);
    assert_eq!(machine.state().status, PlaybackStatus::Idle);

    machine.play();
    machine.seek(33.25);
    assert_eq!(machine.pause().as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().status, PlaybackStatus::Paused);
    assert_eq!(machine.state().position, 33.25);

    assert_eq!(machine.pause(), None);
    assert_eq!(machine.state().status, PlaybackStatus::Paused);

    machine.stop();
    assert_eq!(machine.pause(), None);
    assert_eq!(machine.state().status, PlaybackStatus::Stopped);
}

#[test]
fn resume_after_pause_keeps_position() {
    let (mut machine, tracks) = loaded(&["One"]);
    machine.play();
    machine.seek(40.0);
    machine.pause();

    assert_eq!(machine.play().as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().status, PlaybackStatus::Playing);
    assert_eq!(machine.state().position, 40.0);
}

#[test]
fn stop_is_noop_while_idle() {
    let (mut machine, _) = loaded(&["One"]);
    assert_eq!(machine.stop(), None);
    assert_eq!(machine.state().status, PlaybackStatus::Idle);
}

#[test]
fn stop_keeps_current_track_and_position() {
    let (mut machine, tracks) = loaded(&["One", "Two"]);
    machine.play();
    machine.seek(21.0);

    assert_eq!(machine.stop().as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().status, PlaybackStatus::Stopped);
    assert_eq!(machine.state().current_track.as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().position, 21.0);

    // A stopped session can be revived.
    assert_eq!(machine.play().as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().status, PlaybackStatus::Playing);
}

#[test]
fn seek_clamps_negative_positions() {
    let (mut machine, _) = loaded(&["One"]);
    machine.play();
    machine.seek(-5.0);
    assert_eq!(machine.state().position, 0.0);

    machine.seek(f64::NAN);
    assert_eq!(machine.state().position, 0.0);
}

#[test]
fn seek_without_track_is_noop() {
    let (mut machine, _) = loaded(&["One"]);
    machine.seek(30.0);
    assert_eq!(machine.state().position, 0.0);
    assert_eq!(machine.state().current_track, None);
}

#[test]
fn next_advances_and_restarts_position() {
    let (mut machine, tracks) = loaded(&["One", "Two"]);
    machine.play();
    machine.seek(50.0);

    assert_eq!(machine.next(), NextOutcome::Advanced(tracks[1].clone()));
    assert_eq!(machine.state().status, PlaybackStatus::Playing);
    assert_eq!(machine.state().position, 0.0);
    assert_eq!(machine.queue().current_index(), Some(1));
}

#[test]
fn next_at_end_stops_playback_and_clears_current_track() {
    let (mut machine, _) = loaded(&["Solo"]);
    machine.play();
    machine.seek(10.0);

    assert_eq!(machine.next(), NextOutcome::QueueEnded);
    assert_eq!(machine.state().status, PlaybackStatus::Stopped);
    assert_eq!(machine.state().current_track, None);
    assert_eq!(machine.state().position, 0.0);
}

#[test]
fn next_on_empty_queue_reports_queue_ended() {
    let mut machine = PlaybackStateMachine::new();
    assert_eq!(machine.next(), NextOutcome::QueueEnded);
    assert_eq!(machine.state().status, PlaybackStatus::Stopped);
}

// stop() keeps the current track, but once next() has ended the queue there
// is no track left to stop.
#[test]
fn stop_after_queue_ended_returns_nothing() {
    let (mut machine, _) = loaded(&["Solo"]);
    machine.play();
    assert_eq!(machine.next(), NextOutcome::QueueEnded);

    assert_eq!(machine.stop(), None);
    assert_eq!(machine.state().status, PlaybackStatus::Stopped);
    assert_eq!(machine.state().current_track, None);
}

// After the queue ends the cursor is left on the last track, so play()
// re-adopts that track instead of returning nothing.
#[test]
fn play_after_queue_ended_reanchors_on_last_queue_track() {
    let (mut machine, tracks) = loaded(&["Solo"]);
    machine.play();
    assert_eq!(machine.next(), NextOutcome::QueueEnded);
    assert_eq!(machine.queue().current_index(), Some(0));

    assert_eq!(machine.play().as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().status, PlaybackStatus::Playing);
    assert_eq!(machine.state().position, 0.0);
}

#[test]
fn previous_at_start_restarts_current_track() {
    let (mut machine, tracks) = loaded(&["One", "Two"]);
    machine.play();
    machine.seek(42.0);

    assert_eq!(machine.previous(), PreviousOutcome::Restarted(tracks[0].clone()));
    assert_eq!(machine.state().current_track.as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().status, PlaybackStatus::Playing);
    assert_eq!(machine.state().position, 0.0);
    assert_eq!(machine.queue().current_index(), Some(0));
}

#[test]
fn previous_after_next_moves_back() {
    let (mut machine, tracks) = loaded(&["One", "Two", "Three"]);
    machine.play();
    machine.next();
    machine.seek(9.0);

    assert_eq!(machine.previous(), PreviousOutcome::Advanced(tracks[0].clone()));
    assert_eq!(machine.queue().current_index(), Some(0));
    assert_eq!(machine.state().position, 0.0);
    assert_eq!(machine.state().status, PlaybackStatus::Playing);
}

#[test]
fn previous_on_empty_queue_reports_no_track() {
    let mut machine = PlaybackStateMachine::new();
    let before = machine.clone();
    assert_eq!(machine.previous(), PreviousOutcome::NoTrack);
    assert_eq!(machine, before);
}

#[test]
fn three_track_walk_ends_stopped() {
    let (mut machine, tracks) = loaded(&["A", "B", "C"]);

    assert_eq!(machine.play().as_ref(), Some(&tracks[0]));
    assert_eq!(machine.state().position, 0.0);
    assert_eq!(machine.next(), NextOutcome::Advanced(tracks[1].clone()));
    assert_eq!(machine.next(), NextOutcome::Advanced(tracks[2].clone()));
    assert_eq!(machine.state().status, PlaybackStatus::Playing);
    assert_eq!(machine.next(), NextOutcome::QueueEnded);
    assert_eq!(machine.state().status, PlaybackStatus::Stopped);
}

#[test]
fn archive_tracks_share_identity_across_loads() {
    let link = ArchiveLink {
        cartridge_id: "BS1926-001".into(),
        source: ArchiveSource::Bundled,
        relative_path: "audio/01 - Open.m4a".into(),
        track_number: 1,
    };
    let a = Track::from_archive("Open", "Smith", "Giants", Duration::ZERO, link.clone());
    let b = Track::from_archive("Open (remaster)", "Smith", "Giants", Duration::ZERO, link);

    assert!(a.same_identity(&b));
    assert_ne!(a, b);

    let other = Track::from_archive(
        "Open",
        "Smith",
        "Giants",
        Duration::ZERO,
        ArchiveLink {
            cartridge_id: "BS1926-001".into(),
            source: ArchiveSource::Local,
            relative_path: "audio/01 - Open.m4a".into(),
            track_number: 1,
        },
    );
    assert!(!a.same_identity(&other));
}

#[test]
fn free_standing_tracks_get_distinct_ids() {
    let a = t("Same");
    let b = t("Same");
    assert!(!a.same_identity(&b));
    assert_eq!(a.byline(), "Artist • Album");
}
