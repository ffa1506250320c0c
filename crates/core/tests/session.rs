//! Session context tests.

use carehub_core::Session;

#[test]
fn seeded_session_content() {
    let session = Session::seeded();
    assert!(!session.id.is_empty());
    assert_eq!(session.feed.len(), 7);
    assert_eq!(session.transcript.len(), 1);
    assert_eq!(session.resources.list().len(), 3);
    assert_eq!(session.created_at, session.last_active);
}

#[test]
fn empty_session_content() {
    let session = Session::new();
    assert!(session.feed.is_empty());
    assert!(session.transcript.is_empty());
    assert!(session.resources.list().is_empty());
}

#[test]
fn sessions_do_not_share_state() {
    let mut a = Session::seeded();
    let b = Session::seeded();
    assert_ne!(a.id, b.id);
    a.feed.create_post("You", "x", "only in a").unwrap();
    assert_eq!(a.feed.len(), 8);
    assert_eq!(b.feed.len(), 7);
}

#[test]
fn touch_moves_last_active_forward() {
    let mut session = Session::new();
    let before = session.last_active;
    session.touch();
    assert!(session.last_active >= before);
}
