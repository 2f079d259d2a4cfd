use chrono::{DateTime, Utc};

use crate::session::diff::{self, CharCell};
use crate::session::input::{self, KeyAction, KeyInput};
use crate::session::layout::{self, Window, WindowConfig};
use crate::session::stats::{self, SessionStats};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Done,
}

/// Final result of a finished run, handed out once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub stats: SessionStats,
}

pub struct Session {
    target: Vec<char>,
    typed: Vec<char>,
    line_starts: Vec<usize>,
    phase: Phase,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    final_stats: Option<SessionStats>,
    reported: bool,
}

impl Session {
    pub fn new(target: &str) -> Self {
        let target: Vec<char> = target.chars().collect();
        let line_starts = layout::line_starts(&target);
        Self {
            target,
            typed: Vec::new(),
            line_starts,
            phase: Phase::Idle,
            started_at: None,
            ended_at: None,
            final_stats: None,
            reported: false,
        }
    }

    /// Start over on `target`, dropping typed text, timestamps and the
    /// reported flag.
    pub fn restart(&mut self, target: &str) {
        *self = Self::new(target);
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn target_string(&self) -> String {
        self.target.iter().collect()
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    /// Interprets `input` and applies the result. Everything but `Restart` is
    /// ignored once the run is done; `Restart` is returned to the caller, who
    /// owns target generation.
    pub fn apply(&mut self, input: &KeyInput, auto_indent: bool, now: DateTime<Utc>) -> KeyAction {
        if self.is_done() && *input != KeyInput::Restart {
            return KeyAction::Ignored;
        }
        let action = input::interpret(input, &self.target, &self.typed, auto_indent);
        if let KeyAction::Replace(next) = &action {
            self.replace_typed(next.clone(), now);
        }
        action
    }

    /// Stores a new typed buffer and advances the phase in one step.
    pub fn replace_typed(&mut self, mut next: Vec<char>, now: DateTime<Utc>) {
        if self.is_done() {
            return;
        }
        next.truncate(self.target.len());
        self.typed = next;

        if self.target.is_empty() {
            return;
        }
        if self.phase == Phase::Idle && !self.typed.is_empty() {
            self.phase = Phase::Running;
            self.started_at = Some(now);
            log::debug!("run started, {} chars", self.target.len());
        }
        if self.phase == Phase::Running && self.typed.len() == self.target.len() {
            self.phase = Phase::Done;
            self.ended_at = Some(now);
            let snapshot = self.compute_stats(now);
            self.final_stats = Some(snapshot);
            log::info!(
                "run finished: {} wpm, {} raw, {}% accuracy",
                snapshot.wpm,
                snapshot.raw_wpm,
                snapshot.accuracy
            );
        }
    }

    fn compute_stats(&self, now: DateTime<Utc>) -> SessionStats {
        stats::compute(
            &self.target,
            &self.typed,
            self.started_at,
            self.ended_at,
            now,
            self.is_done(),
        )
    }

    /// Live stats while typing; the frozen result once done.
    pub fn stats(&self, now: DateTime<Utc>) -> SessionStats {
        match self.final_stats {
            Some(snapshot) => snapshot,
            None => self.compute_stats(now),
        }
    }

    pub fn take_completion(&mut self) -> Option<Completion> {
        if self.reported {
            return None;
        }
        let (Some(started_at), Some(ended_at), Some(stats)) =
            (self.started_at, self.ended_at, self.final_stats)
        else {
            return None;
        };
        self.reported = true;
        Some(Completion {
            started_at,
            ended_at,
            stats,
        })
    }

    pub fn window(&self, config: WindowConfig) -> Window {
        Window::for_cursor(&self.target, &self.line_starts, self.typed.len(), config)
    }

    pub fn visible_cells(&self, config: WindowConfig) -> Vec<CharCell> {
        let window = self.window(config);
        diff::classify_range(
            &self.target,
            &self.typed,
            window.start_char..window.end_char,
        )
    }

    pub fn review_cells(&self) -> Option<Vec<CharCell>> {
        self.is_done()
            .then(|| diff::classify(&self.target, &self.typed))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::session::diff::CharStatus;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn type_str(session: &mut Session, s: &str, now: DateTime<Utc>) {
        let mut next = session.typed().to_vec();
        next.extend(s.chars());
        session.apply(&KeyInput::Replace(next), true, now);
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new("abc");
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.started_at().is_none());
        assert_eq!(session.line_starts(), &[0]);
        assert!(session.review_cells().is_none());
    }

    #[test]
    fn test_phase_progression() {
        let mut session = Session::new("ab");
        type_str(&mut session, "a", t0());
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.started_at(), Some(t0()));

        // Deleting back to empty keeps the run going.
        session.apply(&KeyInput::Replace(Vec::new()), true, t0());
        assert_eq!(session.phase(), Phase::Running);

        let end = t0() + Duration::seconds(3);
        type_str(&mut session, "ab", end);
        assert_eq!(session.phase(), Phase::Done);
        assert_eq!(session.ended_at(), Some(end));
    }

    #[test]
    fn test_single_event_can_start_and_finish() {
        let mut session = Session::new("hi");
        type_str(&mut session, "hi", t0());
        assert_eq!(session.phase(), Phase::Done);
        assert_eq!(session.started_at(), session.ended_at());
    }

    #[test]
    fn test_done_is_sticky() {
        let mut session = Session::new("ab");
        type_str(&mut session, "ab", t0());
        let later = t0() + Duration::seconds(10);
        for input in [
            KeyInput::Tab,
            KeyInput::Enter,
            KeyInput::Replace(Vec::new()),
        ] {
            assert_eq!(session.apply(&input, true, later), KeyAction::Ignored);
        }
        assert_eq!(session.typed(), chars("ab").as_slice());
        assert_eq!(session.phase(), Phase::Done);
        assert_eq!(
            session.apply(&KeyInput::Restart, true, later),
            KeyAction::Restart
        );
    }

    #[test]
    fn test_wrong_chars_still_complete() {
        let mut session = Session::new("cat dog");
        type_str(&mut session, "cat dig", t0());
        assert!(session.is_done());
        let stats = session.stats(t0());
        assert_eq!(stats.accuracy, 86);
    }

    #[test]
    fn test_stats_frozen_after_done() {
        let mut session = Session::new("cat dog");
        type_str(&mut session, "c", t0());
        let end = t0() + Duration::seconds(6);
        type_str(&mut session, "at dog", end);
        let frozen = session.stats(end);
        assert_eq!(frozen.wpm, 14);
        let much_later = end + Duration::hours(2);
        assert_eq!(session.stats(much_later), frozen);
    }

    #[test]
    fn test_completion_reported_once() {
        let mut session = Session::new("ab");
        assert!(session.take_completion().is_none());
        type_str(&mut session, "ab", t0());
        let completion = session.take_completion().unwrap();
        assert_eq!(completion.stats.progress, 100);
        assert!(session.take_completion().is_none());

        session.restart("xy");
        assert!(session.take_completion().is_none());
        type_str(&mut session, "xy", t0());
        assert!(session.take_completion().is_some());
    }

    #[test]
    fn test_restart_resets() {
        let mut session = Session::new("ab");
        type_str(&mut session, "a", t0());
        session.restart("line\nnext");
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.typed().is_empty());
        assert!(session.started_at().is_none());
        assert!(session.ended_at().is_none());
        assert_eq!(session.line_starts(), &[0, 5]);
    }

    #[test]
    fn test_empty_target_never_runs() {
        let mut session = Session::new("");
        type_str(&mut session, "abc", t0());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.typed().is_empty());
        assert!(session.take_completion().is_none());
    }

    #[test]
    fn test_enter_through_session() {
        let mut session = Session::new("if x:\n    pass");
        type_str(&mut session, "if x:", t0());
        session.apply(&KeyInput::Enter, true, t0());
        assert_eq!(session.typed().iter().collect::<String>(), "if x:\n    ");
        assert_eq!(session.window(WindowConfig::default()).current_line, 1);
    }

    #[test]
    fn test_review_cells_only_when_done() {
        let mut session = Session::new("ab");
        type_str(&mut session, "x", t0());
        assert!(session.review_cells().is_none());
        type_str(&mut session, "b", t0());
        let cells = session.review_cells().unwrap();
        assert_eq!(cells[0].status, CharStatus::Wrong);
        assert_eq!(cells[1].status, CharStatus::Correct);
    }

    #[test]
    fn test_visible_cells_follow_window() {
        let text: String = (0..20)
            .map(|i| format!("l{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut session = Session::new(&text);
        let upto = session.line_starts()[12];
        let typed: Vec<char> = text.chars().take(upto).collect();
        session.apply(&KeyInput::Replace(typed), true, t0());
        let cells = session.visible_cells(WindowConfig::default());
        let window = session.window(WindowConfig::default());
        assert_eq!(window.start_line, 10);
        assert_eq!(cells.first().map(|c| c.idx), Some(window.start_char));
        assert_eq!(cells.len(), window.end_char - window.start_char);
    }
}
