mod common;

use common::make_test_engine;
use ime_core::session::{key, transition, SessionState};
use ime_core::{Candidate, CompositionSession, HostCall, ImeEngine, KeyEvent, Modifiers};

fn type_str(session: &mut CompositionSession, host: &mut Vec<HostCall>, text: &str) {
    for c in text.chars() {
        assert!(session.on_key_down(&KeyEvent::char(c), host));
    }
}

fn commits(calls: &[HostCall]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            HostCall::SetCommitString(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn headwords(state: &SessionState) -> Vec<&str> {
    state.candidates.iter().map(|c| c.headword.as_str()).collect()
}

fn showing(words: &[&str], cursor: usize) -> SessionState {
    SessionState {
        composition: "ca".to_string(),
        candidates: words.iter().map(|w| Candidate::plain(*w)).collect(),
        cursor,
        show_candidates: true,
    }
}

#[test]
fn typing_builds_composition_and_candidates() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();

    type_str(&mut session, &mut host, "Ca");
    let state = session.state();
    assert_eq!(state.composition, "Ca");
    assert!(state.show_candidates);
    assert_eq!(state.cursor, 0);
    assert_eq!(headwords(state)[..3], ["Ca", "Car", "Cat"]);
    assert_eq!(
        host[host.len() - 5..],
        [
            HostCall::SetCompositionString("Ca".to_string()),
            HostCall::SetCompositionCursor(2),
            HostCall::SetCandidateList(vec![
                "Ca".to_string(),
                "Car".to_string(),
                "Cat".to_string(),
                "Call".to_string(),
                "Care".to_string(),
                "Catalog".to_string(),
            ]),
            HostCall::SetCandidateCursor(0),
            HostCall::SetShowCandidates(true),
        ]
    );
}

#[test]
fn backspace_shrinks_then_clears() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    type_str(&mut session, &mut host, "test");

    for expected in ["tes", "te", "t"] {
        host.clear();
        assert!(session.on_key_down(&KeyEvent::key(key::BACK), &mut host));
        assert_eq!(session.state().composition, expected);
        assert_eq!(session.state().candidates[0].headword, expected);
        assert!(host.iter().any(|c| matches!(c, HostCall::SetCandidateList(l) if l[0] == expected)));
    }

    host.clear();
    assert!(session.on_key_down(&KeyEvent::key(key::BACK), &mut host));
    assert!(!session.is_composing());
    assert_eq!(session.state(), &SessionState::default());
    assert_eq!(commits(&host), vec![""]);
}

#[test]
fn digit_selects_candidate() {
    let engine = make_test_engine();
    let t = transition(&engine, &showing(&["cat", "care", "call"], 0), &KeyEvent::char('2'));
    assert!(t.handled);
    assert_eq!(commits(&t.effects), vec!["care"]);
    assert_eq!(t.next, SessionState::default());
    assert!(!t.next.show_candidates);
}

#[test]
fn shifted_or_out_of_range_digit_commits_the_digit() {
    let engine = make_test_engine();
    let state = showing(&["cat", "care", "call"], 0);

    let t = transition(&engine, &state, &KeyEvent::char('7'));
    assert_eq!(commits(&t.effects), vec!["7"]);

    let shifted = KeyEvent::char('2').with_modifiers(Modifiers::SHIFT);
    let t = transition(&engine, &state, &shifted);
    assert_eq!(commits(&t.effects), vec!["2"]);
}

#[test]
fn annotated_selection_commits_headword() {
    let engine = make_test_engine();
    let mut state = showing(&[], 0);
    state.candidates = vec![Candidate::parse("hello[h-eh-l-oh]")];
    let t = transition(&engine, &state, &KeyEvent::char('1'));
    assert_eq!(commits(&t.effects), vec!["hello"]);
}

#[test]
fn arrows_stop_at_list_bounds() {
    let engine = make_test_engine();
    let words = ["cat", "care", "call"];

    for k in [key::LEFT, key::UP] {
        let t = transition(&engine, &showing(&words, 0), &KeyEvent::key(k));
        assert!(t.handled);
        assert_eq!(t.next.cursor, 0);
        assert!(t.effects.is_empty());
    }
    for k in [key::RIGHT, key::DOWN] {
        let t = transition(&engine, &showing(&words, 2), &KeyEvent::key(k));
        assert!(t.handled);
        assert_eq!(t.next.cursor, 2);
        assert!(t.effects.is_empty());
    }

    let t = transition(&engine, &showing(&words, 1), &KeyEvent::key(key::DOWN));
    assert_eq!(t.next.cursor, 2);
    assert_eq!(t.effects, vec![HostCall::SetCandidateCursor(2)]);
}

#[test]
fn space_commits_selected_candidate_with_space() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    type_str(&mut session, &mut host, "the");
    session.on_key_down(&KeyEvent::key(key::RIGHT), &mut host);
    assert_eq!(session.state().cursor, 1);

    host.clear();
    assert!(session.on_key_down(&KeyEvent::key(key::SPACE), &mut host));
    assert_eq!(commits(&host), vec!["they "]);
    assert!(!session.is_composing());
}

#[test]
fn punctuation_commits_with_the_typed_mark() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    type_str(&mut session, &mut host, "the");
    host.clear();
    assert!(session.on_key_down(&KeyEvent::char('.'), &mut host));
    assert_eq!(commits(&host), vec!["the."]);
}

#[test]
fn enter_commits_substitution_when_selected() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    type_str(&mut session, &mut host, "teh");
    assert_eq!(headwords(session.state())[..2], ["the", "teh"]);

    host.clear();
    assert!(session.on_key_down(&KeyEvent::key(key::RETURN), &mut host));
    assert_eq!(commits(&host), vec!["the"]);
}

#[test]
fn escape_commits_raw_buffer() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    type_str(&mut session, &mut host, "Teh");
    host.clear();
    assert!(session.on_key_down(&KeyEvent::key(key::ESCAPE), &mut host));
    assert_eq!(commits(&host), vec!["Teh"]);
    assert!(!session.is_composing());
}

#[test]
fn control_commits_and_forwards() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    type_str(&mut session, &mut host, "ca");
    host.clear();
    let ctrl_c = KeyEvent::char('c').with_modifiers(Modifiers::CONTROL);
    assert!(!session.on_key_down(&ctrl_c, &mut host));
    assert_eq!(commits(&host), vec!["ca"]);
    assert!(!session.is_composing());
}

#[test]
fn idle_enter_and_backspace_are_forwarded() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    assert!(!session.on_key_down(&KeyEvent::key(key::RETURN), &mut host));
    assert!(!session.on_key_down(&KeyEvent::key(key::BACK), &mut host));
    assert!(host.is_empty());
}

#[test]
fn idle_digit_commits_itself() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    assert!(session.on_key_down(&KeyEvent::char('4'), &mut host));
    assert_eq!(commits(&host), vec!["4"]);
}

#[test]
fn unknown_keys_are_forwarded() {
    let engine = make_test_engine();
    let t = transition(&engine, &showing(&["cat"], 0), &KeyEvent::key(0x70)); // F1
    assert!(!t.handled);
    assert_eq!(t.next, showing(&["cat"], 0));
}

#[test]
fn filter_in_idle_and_composing() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);

    assert!(session.filter_key_down(&KeyEvent::char('a')));
    assert!(session.filter_key_down(&KeyEvent::char('!')));
    assert!(session.filter_key_down(&KeyEvent::char('5')));
    assert!(!session.filter_key_down(&KeyEvent::key(key::SPACE)));
    assert!(!session.filter_key_down(&KeyEvent::key(key::RETURN)));
    assert!(!session.filter_key_down(&KeyEvent::key(key::LEFT)));
    assert!(!session.filter_key_down(&KeyEvent::char('a').with_modifiers(Modifiers::CONTROL)));
    assert!(!session.filter_key_down(&KeyEvent::char('a').with_modifiers(Modifiers::ALT)));

    let mut host = Vec::new();
    session.on_key_down(&KeyEvent::char('a'), &mut host);
    assert!(session.filter_key_down(&KeyEvent::key(key::SPACE)));
    assert!(session.filter_key_down(&KeyEvent::char('a').with_modifiers(Modifiers::CONTROL)));
}

#[test]
fn non_ascii_symbol_is_filtered_then_forwarded() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    let euro = KeyEvent::char('€');

    assert!(session.filter_key_down(&euro));
    assert!(!session.on_key_down(&euro, &mut host));
    assert!(host.is_empty());
    assert!(!session.is_composing());
}

#[test]
fn deactivate_flushes_composition_then_clears() {
    let engine = make_test_engine();
    let mut session = CompositionSession::new(&engine);
    let mut host = Vec::new();
    type_str(&mut session, &mut host, "te");

    host.clear();
    session.on_deactivate(&mut host);
    assert_eq!(host[0], HostCall::SetCompositionString("te".to_string()));
    assert_eq!(
        host[1..],
        [
            HostCall::SetCandidateList(vec![]),
            HostCall::SetCandidateCursor(0),
            HostCall::SetShowCandidates(false),
            HostCall::SetCompositionString(String::new()),
            HostCall::SetCompositionCursor(0),
        ]
    );
    assert!(!session.is_composing());
    assert!(commits(&host).is_empty());
}

#[test]
fn sessions_share_one_engine() {
    let engine: ImeEngine = make_test_engine();
    let mut first = CompositionSession::new(&engine);
    let mut second = CompositionSession::new(&engine);
    let mut host = Vec::new();

    type_str(&mut first, &mut host, "ca");
    type_str(&mut second, &mut host, "the");
    assert_eq!(first.state().composition, "ca");
    assert_eq!(second.state().composition, "the");

    second.on_activate();
    assert!(!second.is_composing());
    assert!(first.is_composing());
}
