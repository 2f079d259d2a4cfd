use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::generator::{self, Concept, Language, MAX_BLOCKS, MIN_BLOCKS};
use crate::generator::wrap::wrap_text;
use crate::session::input::{KeyAction, KeyInput};
use crate::session::result::RunRecord;
use crate::session::state::Session;
use crate::store::RunRecorder;
use crate::store::json_store::JsonStore;
use crate::store::schema::RunHistoryData;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Drill,
    Settings,
}

pub const SETTINGS_ROWS: usize = 7;

const WRAP_WIDTHS: [usize; 6] = [0, 60, 72, 80, 100, 120];

/// Generates a fresh target for the current settings, wrapped to the
/// configured width.
pub fn build_target(config: &Config, rng: &mut SmallRng) -> String {
    let text = generator::generate(&config.snippet_config(), rng);
    wrap_text(&text, config.wrap_width)
}

pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let idx = items.iter().position(|&i| i == current);
    let next = match (idx, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % items.len(),
        (Some(0), false) => items.len() - 1,
        (Some(i), false) => i - 1,
    };
    Some(items[next])
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: Theme,
    pub session: Session,
    pub history: RunHistoryData,
    pub last_record: Option<RunRecord>,
    pub settings_selected: usize,
    pub review_scroll: u16,
    pub should_quit: bool,
    recorder: Option<Box<dyn RunRecorder>>,
    last_target: Option<String>,
    rng: SmallRng,
}

impl App {
    /// App backed by the on-disk run history (when `record_history` is on).
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let store = if config.record_history {
            match JsonStore::new() {
                Ok(store) => Some(store),
                Err(e) => {
                    log::error!("run history disabled: {e:#}");
                    None
                }
            }
        } else {
            None
        };
        let history = store
            .as_ref()
            .map(JsonStore::load_history)
            .unwrap_or_default();
        let recorder = store.map(|s| Box::new(s) as Box<dyn RunRecorder>);
        Self::with_recorder(config, seed, recorder, history)
    }

    pub fn with_recorder(
        mut config: Config,
        seed: Option<u64>,
        recorder: Option<Box<dyn RunRecorder>>,
        history: RunHistoryData,
    ) -> Self {
        config.normalize();
        let mut rng = seeded_rng(seed);
        let target = build_target(&config, &mut rng);
        let theme = Theme::load_or_default(&config.theme);
        Self {
            screen: AppScreen::Drill,
            config,
            theme,
            session: Session::new(&target),
            history,
            last_record: None,
            settings_selected: 0,
            review_scroll: 0,
            should_quit: false,
            recorder,
            last_target: Some(target),
            rng,
        }
    }

    /// New session. Keeps the previous target when `repeat_same_test` is on.
    pub fn restart(&mut self) {
        match (&self.last_target, self.config.repeat_same_test) {
            (Some(previous), true) if !previous.is_empty() => {
                let target = previous.clone();
                self.start_session(&target);
            }
            _ => self.regenerate(),
        }
    }

    /// New session on a freshly generated target, regardless of
    /// `repeat_same_test`. Used when the snippet settings change.
    pub fn regenerate(&mut self) {
        let fresh = build_target(&self.config, &mut self.rng);
        self.last_target = Some(fresh.clone());
        self.start_session(&fresh);
    }

    fn start_session(&mut self, target: &str) {
        log::debug!(
            "restart: {} / {}, {} chars",
            self.config.language.key(),
            self.config.concept.key(),
            target.chars().count()
        );
        self.session.restart(target);
        self.review_scroll = 0;
    }

    pub fn switch_language(&mut self, language: Language) {
        self.config.set_language(language);
        self.regenerate();
    }

    pub fn switch_concept(&mut self, concept: Concept) {
        if !generator::is_supported(self.config.language, concept) {
            return;
        }
        self.config.concept = concept;
        self.regenerate();
    }

    pub fn set_block_count(&mut self, blocks: usize) {
        self.config.block_count = blocks.clamp(MIN_BLOCKS, MAX_BLOCKS);
        self.regenerate();
    }

    pub fn apply_input(&mut self, input: KeyInput, now: DateTime<Utc>) {
        match self.session.apply(&input, self.config.auto_indent, now) {
            KeyAction::Restart => self.restart(),
            KeyAction::Replace(_) => self.report_completion(),
            KeyAction::Ignored => {}
        }
    }

    fn report_completion(&mut self) {
        let Some(completion) = self.session.take_completion() else {
            return;
        };
        let record = RunRecord::from_completion(
            &completion,
            self.config.language,
            self.config.concept,
            self.session.target().len(),
        );
        if let Some(recorder) = self.recorder.as_mut() {
            if let Err(e) = recorder.record(&record) {
                log::error!("failed to save run: {e:#}");
            }
        }
        self.history.push(record.clone());
        self.last_record = Some(record);
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn go_to_drill(&mut self) {
        self.screen = AppScreen::Drill;
    }

    pub fn settings_cycle_forward(&mut self) {
        self.settings_cycle(true);
    }

    pub fn settings_cycle_backward(&mut self) {
        self.settings_cycle(false);
    }

    fn settings_cycle(&mut self, forward: bool) {
        match self.settings_selected {
            0 => {
                if let Some(next) = cycle(&Language::ALL, self.config.language, forward) {
                    self.switch_language(next);
                }
            }
            1 => {
                let concepts = generator::supported_concepts(self.config.language);
                if let Some(next) = cycle(&concepts, self.config.concept, forward) {
                    self.switch_concept(next);
                }
            }
            2 => {
                let blocks = if forward {
                    self.config.block_count + 1
                } else {
                    self.config.block_count.saturating_sub(1)
                };
                self.set_block_count(blocks);
            }
            3 => self.config.auto_indent = !self.config.auto_indent,
            4 => self.config.repeat_same_test = !self.config.repeat_same_test,
            5 => {
                if let Some(next) = cycle(&WRAP_WIDTHS, self.config.wrap_width, forward) {
                    self.config.wrap_width = next;
                    self.regenerate();
                }
            }
            6 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = if forward {
                        (idx + 1) % themes.len()
                    } else if idx == 0 {
                        themes.len() - 1
                    } else {
                        idx - 1
                    };
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                self.theme = Theme::load_or_default(&self.config.theme);
            }
            _ => {}
        }
    }

    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            log::error!("failed to save config: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use anyhow::bail;
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::session::state::Phase;

    struct CountingRecorder(Rc<Cell<usize>>);

    impl RunRecorder for CountingRecorder {
        fn record(&mut self, _record: &RunRecord) -> anyhow::Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct FailingRecorder;

    impl RunRecorder for FailingRecorder {
        fn record(&mut self, _record: &RunRecord) -> anyhow::Result<()> {
            bail!("disk full")
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn test_app(config: Config) -> (App, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let recorder: Box<dyn RunRecorder> = Box::new(CountingRecorder(Rc::clone(&count)));
        let app = App::with_recorder(config, Some(7), Some(recorder), RunHistoryData::default());
        (app, count)
    }

    fn finish(app: &mut App, now: DateTime<Utc>) {
        let target = app.session.target().to_vec();
        app.apply_input(KeyInput::Replace(target[..1].to_vec()), now);
        app.apply_input(KeyInput::Replace(target), now + Duration::seconds(20));
    }

    #[test]
    fn test_completion_recorded_once() {
        let (mut app, count) = test_app(Config::default());
        finish(&mut app, t0());
        assert_eq!(app.session.phase(), Phase::Done);
        assert_eq!(count.get(), 1);
        assert_eq!(app.history.runs.len(), 1);

        // Further keys while done don't record again.
        app.apply_input(KeyInput::Tab, t0() + Duration::seconds(30));
        app.apply_input(KeyInput::Replace(Vec::new()), t0() + Duration::seconds(31));
        assert_eq!(count.get(), 1);

        let record = app.last_record.as_ref().unwrap();
        assert_eq!(record.language, Language::Python);
        assert_eq!(record.accuracy, 100);
        assert_eq!(record.duration_ms, 20_000);
    }

    #[test]
    fn test_recorder_failure_is_not_fatal() {
        let mut app = App::with_recorder(
            Config::default(),
            Some(1),
            Some(Box::new(FailingRecorder)),
            RunHistoryData::default(),
        );
        finish(&mut app, t0());
        assert!(app.last_record.is_some());
        assert_eq!(app.history.runs.len(), 1);
    }

    #[test]
    fn test_restart_input_generates_new_target() {
        let (mut app, _) = test_app(Config {
            block_count: 5,
            ..Config::default()
        });
        let first = app.session.target_string();
        app.apply_input(KeyInput::Replace(vec!['x']), t0());
        app.apply_input(KeyInput::Restart, t0());
        assert_eq!(app.session.phase(), Phase::Idle);
        assert!(app.session.typed().is_empty());
        assert_ne!(app.session.target_string(), first);
    }

    #[test]
    fn test_repeat_same_test_reuses_target() {
        let (mut app, _) = test_app(Config {
            repeat_same_test: true,
            ..Config::default()
        });
        let first = app.session.target_string();
        finish(&mut app, t0());
        app.apply_input(KeyInput::Restart, t0());
        assert_eq!(app.session.target_string(), first);
        assert!(app.session.started_at().is_none());
    }

    #[test]
    fn test_repeat_same_test_regenerates_on_language_switch() {
        let (mut app, _) = test_app(Config {
            repeat_same_test: true,
            ..Config::default()
        });
        let first = app.session.target_string();
        app.switch_language(Language::JavaScript);
        assert_ne!(app.session.target_string(), first);

        // The new target is the one repeated from now on.
        let js = app.session.target_string();
        app.restart();
        assert_eq!(app.session.target_string(), js);
    }

    #[test]
    fn test_repeat_same_test_honors_new_wrap_width() {
        let (mut app, _) = test_app(Config {
            repeat_same_test: true,
            block_count: 6,
            ..Config::default()
        });
        app.settings_selected = 5;
        while app.config.wrap_width != 60 {
            app.settings_cycle_forward();
        }
        let target = app.session.target_string();
        assert!(target.lines().all(|l| l.chars().count() <= 60));
        app.restart();
        assert_eq!(app.session.target_string(), target);
    }

    #[test]
    fn test_same_seed_same_first_target() {
        let (a, _) = test_app(Config::default());
        let (b, _) = test_app(Config::default());
        assert_eq!(a.session.target_string(), b.session.target_string());
    }

    #[test]
    fn test_language_switch_falls_back() {
        let (mut app, _) = test_app(Config {
            concept: Concept::Comprehensions,
            ..Config::default()
        });
        app.switch_language(Language::Rust);
        assert_eq!(app.config.language, Language::Rust);
        assert!(generator::is_supported(Language::Rust, app.config.concept));
        assert_eq!(app.config.concept, Concept::Loops);
        assert!(!app.session.target().is_empty());
    }

    #[test]
    fn test_unsupported_concept_switch_ignored() {
        let (mut app, _) = test_app(Config {
            language: Language::Go,
            ..Config::default()
        });
        app.switch_concept(Concept::Decorators);
        assert_eq!(app.config.concept, Concept::Loops);
    }

    #[test]
    fn test_settings_cycle_concepts_stay_supported() {
        let (mut app, _) = test_app(Config {
            language: Language::JavaScript,
            ..Config::default()
        });
        app.settings_selected = 1;
        for _ in 0..20 {
            app.settings_cycle_forward();
            assert!(generator::is_supported(Language::JavaScript, app.config.concept));
        }
        for _ in 0..20 {
            app.settings_cycle_backward();
            assert!(generator::is_supported(Language::JavaScript, app.config.concept));
        }
    }

    #[test]
    fn test_settings_block_count_clamped() {
        let (mut app, _) = test_app(Config {
            block_count: 1,
            ..Config::default()
        });
        app.settings_selected = 2;
        app.settings_cycle_backward();
        assert_eq!(app.config.block_count, MIN_BLOCKS);
        for _ in 0..20 {
            app.settings_cycle_forward();
        }
        assert_eq!(app.config.block_count, MAX_BLOCKS);
    }

    #[test]
    fn test_settings_toggles() {
        let (mut app, _) = test_app(Config::default());
        app.settings_selected = 3;
        app.settings_cycle_forward();
        assert!(!app.config.auto_indent);
        app.settings_selected = 4;
        app.settings_cycle_forward();
        assert!(app.config.repeat_same_test);
    }

    #[test]
    fn test_cycle_helper() {
        assert_eq!(cycle(&[1, 2, 3], 3, true), Some(1));
        assert_eq!(cycle(&[1, 2, 3], 1, false), Some(3));
        assert_eq!(cycle(&[1, 2, 3], 9, true), Some(1));
        assert_eq!(cycle::<u8>(&[], 0, true), None);
    }
}
