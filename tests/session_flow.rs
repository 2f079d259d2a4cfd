use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use codedrill::app::App;
use codedrill::config::Config;
use codedrill::generator::{self, Concept, Language, SnippetConfig};
use codedrill::session::Phase;
use codedrill::session::diff::CharStatus;
use codedrill::session::input::{KeyAction, KeyInput};
use codedrill::session::layout::WindowConfig;
use codedrill::session::state::Session;
use codedrill::store::json_store::JsonStore;
use codedrill::store::schema::RunHistoryData;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Types a target the way a player would: characters one by one, Tab over
/// indentation, Enter for newline runs.
fn play_perfectly(session: &mut Session, start: DateTime<Utc>) -> usize {
    let target: Vec<char> = session.target().to_vec();
    let mut now = start;
    let mut events = 0;
    while !session.is_done() {
        let pos = session.typed().len();
        let input = match target[pos] {
            '\n' => KeyInput::Enter,
            ' ' if pos == 0 || target[pos - 1] == '\n' => KeyInput::Tab,
            ch => {
                let mut next = session.typed().to_vec();
                next.push(ch);
                KeyInput::Replace(next)
            }
        };
        let action = session.apply(&input, true, now);
        assert_ne!(action, KeyAction::Ignored, "stuck at {pos}");
        now += Duration::milliseconds(150);
        events += 1;
        assert!(events <= target.len(), "no progress");
    }
    events
}

#[test]
fn test_perfect_run_over_every_supported_pair() {
    for language in Language::ALL {
        for concept in generator::supported_concepts(language) {
            let config = SnippetConfig::new(language, concept, 3);
            let mut rng = SmallRng::seed_from_u64(99);
            let text = generator::generate(&config, &mut rng);
            let mut session = Session::new(&text);
            let events = play_perfectly(&mut session, t0());

            assert_eq!(session.phase(), Phase::Done);
            assert!(events < text.chars().count() || !text.contains("\n    "));
            let stats = session.stats(t0() + Duration::hours(1));
            assert_eq!(stats.accuracy, 100, "{language:?}/{concept:?}");
            assert_eq!(stats.progress, 100);
            assert!(stats.wpm > 0);
            assert!(stats.wpm <= stats.raw_wpm);
            let review = session.review_cells().unwrap();
            assert!(review.iter().all(|c| c.status == CharStatus::Correct));
        }
    }
}

#[test]
fn test_phase_never_regresses_under_backspace() {
    let mut session = Session::new("def f():\n    return 1");
    let mut typed: Vec<char> = Vec::new();
    let mut seen_running = false;
    for (i, ch) in "def f".chars().enumerate() {
        typed.push(ch);
        session.apply(&KeyInput::Replace(typed.clone()), true, t0());
        seen_running |= session.phase() == Phase::Running;
        if i == 2 {
            session.apply(&KeyInput::Replace(Vec::new()), true, t0());
            typed.clear();
            assert_eq!(session.phase(), Phase::Running);
        }
    }
    assert!(seen_running);
    assert_eq!(session.started_at(), Some(t0()));
}

#[test]
fn test_window_tracks_cursor_through_long_snippet() {
    let config = SnippetConfig::new(Language::Python, Concept::Classes, 6);
    let mut rng = SmallRng::seed_from_u64(5);
    let text = generator::generate(&config, &mut rng);
    let mut session = Session::new(&text);
    let window_config = WindowConfig::default();

    let target = session.target().to_vec();
    let total_lines = session.line_starts().len();
    for len in (0..=target.len()).step_by(7) {
        session.apply(&KeyInput::Replace(target[..len].to_vec()), true, t0());
        if session.is_done() {
            break;
        }
        let window = session.window(window_config);
        assert!(window.end_line - window.start_line <= window_config.size);
        assert!(window.current_line >= window.start_line);
        assert!(window.current_line < window.end_line);
        assert!(window.end_line <= total_lines);
        let cells = session.visible_cells(window_config);
        assert_eq!(cells.len(), window.end_char - window.start_char);
    }
}

#[test]
fn test_app_records_into_json_store() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut app = App::with_recorder(
        Config {
            language: Language::Go,
            concept: Concept::Loops,
            block_count: 1,
            ..Config::default()
        },
        Some(11),
        Some(Box::new(store)),
        RunHistoryData::default(),
    );

    for round in 0..3 {
        let target = app.session.target().to_vec();
        let start = t0() + Duration::minutes(round);
        app.apply_input(KeyInput::Replace(target[..1].to_vec()), start);
        app.apply_input(KeyInput::Replace(target), start + Duration::seconds(15));
        assert!(app.session.is_done());
        app.apply_input(KeyInput::Restart, start + Duration::seconds(20));
    }

    let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let history = reopened.load_history();
    assert_eq!(history.runs.len(), 3);
    assert!(history.runs.iter().all(|r| r.language == Language::Go));
    assert!(history.runs.iter().all(|r| r.duration_ms == 15_000));
    assert_eq!(app.history.runs.len(), 3);
}

#[test]
fn test_wrapped_targets_are_playable() {
    let mut config = Config {
        language: Language::Python,
        concept: Concept::Regex,
        block_count: 4,
        wrap_width: 30,
        ..Config::default()
    };
    config.normalize();
    let mut rng = SmallRng::seed_from_u64(21);
    let text = codedrill::app::build_target(&config, &mut rng);
    assert!(text.lines().all(|l| l.chars().count() <= 30));

    let mut session = Session::new(&text);
    play_perfectly(&mut session, t0());
    assert!(session.is_done());
}
