//! Tests for the suggest component.

use super::*;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct StubSource {
    terms: Mutex<Vec<String>>,
    reply: Result<Vec<Suggestion>, String>,
}

impl StubSource {
    fn ok(items: Vec<Suggestion>) -> Arc<Self> {
        Arc::new(Self {
            terms: Mutex::new(Vec::new()),
            reply: Ok(items),
        })
    }

    fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            terms: Mutex::new(Vec::new()),
            reply: Err(reason.to_string()),
        })
    }

    fn terms(&self) -> Vec<String> {
        self.terms.lock().unwrap().clone()
    }
}

impl SuggestionSource for StubSource {
    fn fetch(&self, term: String) -> SourceFuture {
        self.terms.lock().unwrap().push(term);
        let reply = self.reply.clone().map_err(FetchError::Source);
        Box::pin(async move { reply })
    }
}

fn fruit() -> Vec<Suggestion> {
    vec![
        Suggestion::new("1", "apple").with_label("Apple"),
        Suggestion::new("2", "banana").with_label("Banana"),
        Suggestion::new("3", "cherry"),
    ]
}

fn widget(source: Arc<StubSource>) -> Model {
    let mut m = new(Config::new("http://localhost/suggest").with_name("fruit")).with_source(source);
    m.focus();
    m
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

/// Types `text` and returns how many keystrokes scheduled a timer.
fn type_text(m: &mut Model, text: &str) -> usize {
    text.chars()
        .filter_map(|c| m.update(key(KeyCode::Char(c))))
        .count()
}

fn fire_debounce(m: &mut Model) -> Option<Cmd> {
    let msg = DebounceMsg {
        id: m.id,
        tag: m.debounce_tag,
    };
    m.update(Box::new(msg))
}

async fn run(m: &mut Model, cmd: Cmd) {
    if let Some(msg) = cmd.await {
        m.update(msg);
    }
}

#[tokio::test]
async fn test_type_fetch_navigate_select_scenario() {
    let source = StubSource::ok(vec![Suggestion::new("1", "apple").with_label("Apple")]);
    let mut m = widget(source.clone());

    assert_eq!(type_text(&mut m, "ab"), 1);
    assert_eq!(m.phase(), Phase::Typing);

    let cmd = fire_debounce(&mut m).expect("fetch command");
    assert_eq!(m.phase(), Phase::Fetching);
    run(&mut m, cmd).await;

    assert_eq!(source.terms(), vec!["ab".to_string()]);
    assert!(m.list_visible());
    assert_eq!(m.phase(), Phase::Listing);
    assert_eq!(m.list_lines().len(), 1);
    assert!(m.list_lines()[0].contains("Apple"));

    m.update(key(KeyCode::Down));
    assert_eq!(m.active_index(), Some(0));

    m.update(key(KeyCode::Enter));
    assert_eq!(m.display_value(), "Apple");
    assert_eq!(m.committed_value(), "1");
    assert_eq!(m.form_field(), ("fruit", "1"));
    assert!(!m.list_visible());
    assert_eq!(m.phase(), Phase::Idle);
}

#[test]
fn test_up_arrow_wraps_to_last() {
    let mut m = widget(StubSource::ok(vec![]));
    m.render(fruit());
    assert_eq!(m.active_index(), Some(0));

    m.update(key(KeyCode::Up));
    assert_eq!(m.active_index(), Some(2));
    m.update(key(KeyCode::Down));
    assert_eq!(m.active_index(), Some(0));
}

#[test]
fn test_navigation_keeps_committed_value() {
    let mut m = widget(StubSource::ok(vec![]));
    m.render(fruit());
    for _ in 0..5 {
        m.update(key(KeyCode::Down));
    }
    assert_eq!(m.committed_value(), "");
    assert_eq!(m.display_value(), "");
}

#[test]
fn test_short_text_schedules_nothing() {
    let source = StubSource::ok(fruit());
    let mut m = new(Config::new("http://localhost/s").with_min_length(3)).with_source(source.clone());
    m.focus();

    assert_eq!(type_text(&mut m, "ab"), 0);
    for _ in 0..10 {
        assert!(m.update(key(KeyCode::Backspace)).is_none());
        assert!(m.update(key(KeyCode::Char('x'))).is_none());
    }
    assert!(!m.timer_pending);
    assert_eq!(m.phase(), Phase::Idle);
    assert!(source.terms().is_empty());
}

#[tokio::test]
async fn test_burst_of_keys_fetches_once_with_final_text() {
    let source = StubSource::ok(fruit());
    let mut m = widget(source.clone());

    assert_eq!(type_text(&mut m, "apple"), 4);
    let final_tag = m.debounce_tag;

    for tag in 1..final_tag {
        let stale = DebounceMsg { id: m.id, tag };
        assert!(m.update(Box::new(stale)).is_none());
    }

    let cmd = fire_debounce(&mut m).expect("latest timer fetches");
    run(&mut m, cmd).await;

    // A repeated delivery of the same tag does not fetch again.
    assert!(fire_debounce(&mut m).is_none());
    assert_eq!(source.terms(), vec!["apple".to_string()]);
}

#[tokio::test]
async fn test_only_latest_tick_fetches() {
    let source = StubSource::ok(fruit());
    let mut m = new(Config::new("http://localhost/s").with_debounce(Duration::from_millis(10)))
        .with_source(source.clone());
    m.focus();

    let ticks: Vec<Cmd> = "abc"
        .chars()
        .filter_map(|c| m.update(key(KeyCode::Char(c))))
        .collect();
    assert_eq!(ticks.len(), 2);

    let mut fetches = Vec::new();
    for tick in ticks {
        let msg = tick.await.expect("tick delivers a message");
        assert!(msg.downcast_ref::<DebounceMsg>().is_some());
        fetches.extend(m.update(msg));
    }
    assert_eq!(fetches.len(), 1);

    for fetch in fetches {
        run(&mut m, fetch).await;
    }
    assert_eq!(source.terms(), vec!["abc".to_string()]);
    assert!(m.list_visible());
}

#[tokio::test]
async fn test_pending_timer_uses_text_at_expiry() {
    let source = StubSource::ok(fruit());
    let mut m = widget(source.clone());

    type_text(&mut m, "abc");
    // Dropping below the minimum does not cancel the pending timer.
    m.update(key(KeyCode::Backspace));
    m.update(key(KeyCode::Backspace));
    assert_eq!(m.phase(), Phase::Typing);

    let cmd = fire_debounce(&mut m).expect("timer still live");
    run(&mut m, cmd).await;
    assert_eq!(source.terms(), vec!["a".to_string()]);
}

#[tokio::test]
async fn test_non_editing_keys_reschedule() {
    let mut m = widget(StubSource::ok(fruit()));
    type_text(&mut m, "ab");
    let tag = m.debounce_tag;
    assert!(m.update(key(KeyCode::Left)).is_some());
    assert_eq!(m.debounce_tag, tag + 1);
}

#[test]
fn test_click_selects_row() {
    let mut m = widget(StubSource::ok(vec![]));
    m.render(fruit());

    assert!(m.click_row(1));
    assert_eq!(m.display_value(), "Banana");
    assert_eq!(m.committed_value(), "2");
    assert!(!m.list_visible());
    assert!(m.suggestions().is_empty());
}

#[test]
fn test_selection_without_label_uses_value() {
    let mut m = widget(StubSource::ok(vec![]));
    m.render(fruit());
    assert!(m.click_row(2));
    assert_eq!(m.display_value(), "cherry");
    assert_eq!(m.committed_value(), "3");
}

#[test]
fn test_click_outside_rows_is_ignored() {
    let mut m = widget(StubSource::ok(vec![]));
    m.render(fruit());

    assert!(!m.click_row(3));
    assert!(m.list_visible());
    assert_eq!(m.committed_value(), "");

    m.dismiss();
    assert!(!m.click_row(0));
}

#[test]
fn test_hover_moves_highlight() {
    let mut m = widget(StubSource::ok(vec![]));
    m.render(fruit());
    assert!(m.hover_row(2));
    assert_eq!(m.active_index(), Some(2));
    assert!(!m.hover_row(9));
    assert_eq!(m.active_index(), Some(2));
}

#[test]
fn test_confirm_on_empty_text_clears() {
    let mut m = new(
        Config::new("http://localhost/s")
            .with_name("fruit")
            .with_value("9"),
    )
    .with_source(StubSource::ok(vec![]));
    m.focus();
    m.render(fruit());
    assert!(m.list_visible());

    m.update(key(KeyCode::Enter));
    assert_eq!(m.display_value(), "");
    assert_eq!(m.committed_value(), "");
    assert!(!m.list_visible());
}

#[test]
fn test_confirm_without_list_changes_nothing() {
    let mut m = new(
        Config::new("http://localhost/s")
            .with_value("9")
            .with_display_value("Plum"),
    )
    .with_source(StubSource::ok(vec![]));
    m.focus();

    m.update(key(KeyCode::Enter));
    assert_eq!(m.display_value(), "Plum");
    assert_eq!(m.committed_value(), "9");
}

#[test]
fn test_tab_and_insert_confirm() {
    for code in [KeyCode::Tab, KeyCode::Insert] {
        let mut m = new(Config::new("http://localhost/s").with_display_value("ba"))
            .with_source(StubSource::ok(vec![]));
        m.focus();
        m.render(fruit());
        m.update(key(KeyCode::Down));
        m.update(key(code));
        assert_eq!(m.committed_value(), "2", "{code:?}");
        assert_eq!(m.display_value(), "Banana");
    }
}

#[test]
fn test_escape_dismisses_list() {
    let mut m = new(Config::new("http://localhost/s").with_display_value("ap"))
        .with_source(StubSource::ok(vec![]));
    m.focus();
    m.render(fruit());

    m.update(key(KeyCode::Esc));
    assert!(!m.list_visible());
    assert_eq!(m.display_value(), "ap");
    assert_eq!(m.phase(), Phase::Idle);
}

#[test]
fn test_empty_response_keeps_list_hidden() {
    let mut m = widget(StubSource::ok(vec![]));
    m.render(Vec::new());
    assert!(!m.list_visible());
    assert_eq!(m.active_index(), None);

    m.update(key(KeyCode::Down));
    m.update(key(KeyCode::Up));
    assert_eq!(m.active_index(), None);
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let mut m = widget(StubSource::ok(vec![]));
    type_text(&mut m, "ap");
    let first = fire_debounce(&mut m);
    type_text(&mut m, "p");
    let second = fire_debounce(&mut m);
    assert!(first.is_some() && second.is_some());
    assert_eq!(m.fetch_seq, 2);

    let newer = SuggestionsMsg {
        id: m.id,
        seq: 2,
        term: "app".into(),
        suggestions: vec![Suggestion::new("1", "apple")],
    };
    let older = SuggestionsMsg {
        id: m.id,
        seq: 1,
        term: "ap".into(),
        suggestions: vec![Suggestion::new("7", "apricot")],
    };
    m.update(Box::new(newer));
    m.update(Box::new(older));

    assert_eq!(m.suggestions(), &[Suggestion::new("1", "apple")]);
}

#[tokio::test]
async fn test_stale_failure_is_discarded() {
    let mut m = widget(StubSource::ok(vec![]));
    type_text(&mut m, "ap");
    fire_debounce(&mut m).expect("first fetch");
    type_text(&mut m, "p");
    fire_debounce(&mut m).expect("second fetch");

    m.update(Box::new(SuggestionsMsg {
        id: m.id,
        seq: 2,
        term: "app".into(),
        suggestions: vec![Suggestion::new("1", "apple")],
    }));
    m.update(Box::new(FetchErrMsg {
        id: m.id,
        seq: 1,
        term: "ap".into(),
        error: Arc::new(FetchError::Source("old".into())),
    }));

    assert!(m.last_error().is_none());
    assert!(m.list_visible());
    assert_eq!(m.phase(), Phase::Listing);
}

#[tokio::test]
async fn test_last_arrival_wins_when_stale_kept() {
    let mut m = new(Config::new("http://localhost/s").with_discard_stale(false))
        .with_source(StubSource::ok(vec![]));
    m.focus();
    type_text(&mut m, "ap");
    fire_debounce(&mut m);
    type_text(&mut m, "p");
    fire_debounce(&mut m);

    m.update(Box::new(SuggestionsMsg {
        id: m.id,
        seq: 2,
        term: "app".into(),
        suggestions: vec![Suggestion::new("1", "apple")],
    }));
    assert_eq!(m.phase(), Phase::Listing);
    m.update(Box::new(SuggestionsMsg {
        id: m.id,
        seq: 1,
        term: "ap".into(),
        suggestions: vec![Suggestion::new("7", "apricot")],
    }));

    assert_eq!(m.suggestions(), &[Suggestion::new("7", "apricot")]);
}

#[tokio::test]
async fn test_fetch_failure_is_recorded_and_surfaced() {
    let source = StubSource::failing("backend down");
    let mut m = widget(source);
    type_text(&mut m, "ab");
    let cmd = fire_debounce(&mut m).expect("fetch command");

    let msg = cmd.await.expect("fetch reports back");
    let failure = msg.downcast_ref::<FetchErrMsg>().expect("failure message");
    assert_eq!(failure.term, "ab");
    assert_eq!(failure.error.to_string(), "backend down");

    m.update(msg);
    assert!(matches!(m.last_error(), Some(FetchError::Source(_))));
    assert!(!m.list_visible());
    assert_eq!(m.phase(), Phase::Idle);

    m.update(Box::new(SuggestionsMsg {
        id: m.id,
        seq: m.fetch_seq,
        term: "ab".into(),
        suggestions: fruit(),
    }));
    // A later success clears the recorded failure.
    assert!(m.last_error().is_none());
    assert!(m.list_visible());
}

#[tokio::test]
async fn test_selection_cancels_pending_work() {
    let mut m = widget(StubSource::ok(fruit()));
    m.render(fruit());
    type_text(&mut m, "ch");
    let cmd = fire_debounce(&mut m).expect("fetch command");

    m.update(key(KeyCode::Enter));
    assert_eq!(m.committed_value(), "1");

    // The answer to the cancelled request does not reopen the list.
    run(&mut m, cmd).await;
    assert!(!m.list_visible());
    assert_eq!(m.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_teardown_cancels_timer() {
    let source = StubSource::ok(fruit());
    let mut m = widget(source.clone());
    type_text(&mut m, "ab");
    let tag = m.debounce_tag;

    m.teardown();
    let msg = DebounceMsg { id: m.id, tag };
    assert!(m.update(Box::new(msg)).is_none());
    assert!(m.update(key(KeyCode::Char('c'))).is_none());
    assert!(source.terms().is_empty());
    assert!(m.is_inert());
}

#[test]
fn test_teardown_ignores_direct_calls() {
    let mut m = new(Config::new("http://localhost/s").with_value("9").with_display_value("Plum"))
        .with_source(StubSource::ok(vec![]));
    m.render(fruit());
    m.teardown();
    assert!(!m.list_visible());

    m.render(fruit());
    assert!(!m.list_visible());
    assert!(m.suggestions().is_empty());
    assert!(!m.select_item(0));
    m.next_item();
    m.previous_item();
    m.clear();

    assert_eq!(m.display_value(), "Plum");
    assert_eq!(m.committed_value(), "9");
}

#[test]
fn test_missing_url_makes_widget_inert() {
    let mut m = new(Config::default());
    m.focus();

    assert_eq!(m.config_error(), Some(&ConfigError::MissingUrl));
    assert!(m.is_inert());
    assert_eq!(type_text(&mut m, "apple"), 0);
    assert_eq!(m.display_value(), "");

    // A custom source does not revive it.
    let m = m.with_source(StubSource::ok(fruit()));
    assert!(m.is_inert());

    assert!(matches!(try_new(Config::default()), Err(ConfigError::MissingUrl)));
}

#[test]
fn test_blurred_widget_ignores_keys() {
    let mut m = widget(StubSource::ok(vec![]));
    m.blur();
    assert!(m.update(key(KeyCode::Char('a'))).is_none());
    assert_eq!(m.display_value(), "");
}

#[test]
fn test_messages_for_other_widgets_are_ignored() {
    let mut a = widget(StubSource::ok(vec![]));
    let b = widget(StubSource::ok(vec![]));
    assert_ne!(a.id(), b.id());

    a.update(Box::new(SuggestionsMsg {
        id: b.id(),
        seq: 1,
        term: "ab".into(),
        suggestions: fruit(),
    }));
    assert!(!a.list_visible());
}

#[test]
fn test_initial_values() {
    let m = new(
        Config::new("http://localhost/s")
            .with_name("fruit_id")
            .with_value("3")
            .with_display_value("Cherry")
            .with_style_class("fruit-list"),
    );
    assert_eq!(m.display_value(), "Cherry");
    assert_eq!(m.form_field(), ("fruit_id", "3"));
    assert_eq!(m.list_class(), "fruit-list");
    assert!(!m.focused());
}

#[test]
fn test_view_lists_rows_below_input() {
    let mut m = widget(StubSource::ok(vec![]));
    m.render(fruit());
    m.update(key(KeyCode::Down));

    let lines = m.list_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains(style::ACTIVE_MARKER));
    assert!(lines[1].contains("Banana"));
    assert!(!lines[0].contains(style::ACTIVE_MARKER));
    assert!(lines[2].contains("cherry"));

    let view = m.view();
    assert_eq!(view.lines().count(), 4);

    m.dismiss();
    assert_eq!(m.view().lines().count(), 1);
}

#[test]
fn test_view_respects_width() {
    let mut m = widget(StubSource::ok(vec![]));
    m.set_width(6);
    m.render(vec![Suggestion::new("1", "watermelon")]);
    assert!(m.list_lines()[0].contains("wat…"));
}

#[test]
fn test_config_from_attributes() {
    let config = Config::from_attributes([
        ("URL", "https://example.com/s"),
        ("name", "city"),
        ("value", "42"),
        ("display-value", "Oslo"),
        ("minlength", "1"),
        ("autocomplete-style", "cities"),
        ("debounce-ms", "250"),
        ("data-unknown", "x"),
    ])
    .unwrap();

    assert_eq!(config.url.as_deref(), Some("https://example.com/s"));
    assert_eq!(config.name, "city");
    assert_eq!(config.initial_value, "42");
    assert_eq!(config.initial_display, "Oslo");
    assert_eq!(config.min_length, 1);
    assert_eq!(config.list_class(), "cities");
    assert_eq!(config.debounce, Duration::from_millis(250));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_defaults_and_errors() {
    let config = Config::from_attributes([("url", "https://example.com/s")]).unwrap();
    assert_eq!(config.min_length, DEFAULT_MIN_LENGTH);
    assert_eq!(config.debounce, DEFAULT_DEBOUNCE);
    assert_eq!(config.list_class(), DEFAULT_STYLE_CLASS);

    assert_eq!(
        Config::from_attributes([("minlength", "two")]),
        Err(ConfigError::InvalidMinLength("two".into()))
    );
    assert_eq!(
        Config::from_attributes([("debounce-ms", "-5")]),
        Err(ConfigError::InvalidDebounce("-5".into()))
    );
    assert_eq!(Config::new("  ").validate(), Err(ConfigError::MissingUrl));
    assert!(matches!(
        Config::new("ftp://example.com").validate(),
        Err(ConfigError::InvalidUrl { .. })
    ));
    assert!(matches!(
        Config::new("not a url").validate(),
        Err(ConfigError::InvalidUrl { .. })
    ));
}

#[test]
fn test_parse_suggestions() {
    let body = br#"[
        {"id": 1, "value": "apple", "label": "Apple"},
        {"id": "b2", "value": "banana", "label": null},
        {"id": 3, "value": 30, "extra": true}
    ]"#;
    let parsed = parse_suggestions(body).unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[0].id, "1");
    assert_eq!(parsed[0].display(), "Apple");
    assert_eq!(parsed[1].display(), "banana");
    assert_eq!(parsed[2].value, "30");

    assert!(matches!(
        parse_suggestions(br#"{"id": 1}"#),
        Err(FetchError::Decode(_))
    ));
    assert!(matches!(
        parse_suggestions(br#"[{"id": [1], "value": "x"}]"#),
        Err(FetchError::Decode(_))
    ));
}

#[test]
fn test_empty_label_falls_back_to_value() {
    let s = Suggestion::new("1", "apple").with_label("");
    assert_eq!(s.display(), "apple");
}
