use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CHARS_PER_WORD: f64 = 5.0;

/// Minimum elapsed time while a run is in progress, so the first keystrokes
/// don't report absurd speeds.
pub const WARMUP_FLOOR_MS: i64 = 2_000;

const EPSILON_MINUTES: f64 = 1.0 / 60_000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub accuracy: u32,
    /// Net speed over fully correct leading words.
    pub wpm: u32,
    pub raw_wpm: u32,
    pub progress: u32,
    pub elapsed_ms: i64,
}

pub fn correct_keystrokes(target: &[char], typed: &[char]) -> usize {
    typed
        .iter()
        .zip(target.iter())
        .filter(|(a, b)| a == b)
        .count()
}

pub fn accuracy(target: &[char], typed: &[char]) -> u32 {
    if typed.is_empty() {
        return 100;
    }
    let ok = correct_keystrokes(target, typed) as f64;
    (100.0 * ok / typed.len() as f64).round().max(0.0) as u32
}

pub fn progress(target: &[char], typed: &[char]) -> u32 {
    if target.is_empty() {
        return 0;
    }
    (100.0 * typed.len() as f64 / target.len() as f64)
        .round()
        .clamp(0.0, 100.0) as u32
}

fn wpm_for(chars: usize, minutes: f64) -> u32 {
    let minutes = minutes.max(EPSILON_MINUTES);
    let wpm = ((chars as f64 / CHARS_PER_WORD) / minutes).round();
    if wpm.is_finite() { wpm.max(0.0) as u32 } else { 0 }
}

pub fn raw_wpm(typed_len: usize, minutes: f64) -> u32 {
    wpm_for(typed_len, minutes)
}

pub fn correct_wpm(target: &[char], typed: &[char], minutes: f64) -> u32 {
    wpm_for(correct_word_chars(target, typed), minutes)
}

/// Split into (word, separator) pairs after dropping leading whitespace.
fn word_pairs(text: &[char]) -> Vec<(&[char], &[char])> {
    let start = text
        .iter()
        .position(|c| !c.is_whitespace())
        .unwrap_or(text.len());
    let text = &text[start..];

    let mut pairs = Vec::new();
    let mut i = 0;
    while i < text.len() {
        let word_end = text[i..]
            .iter()
            .position(|c| c.is_whitespace())
            .map_or(text.len(), |p| i + p);
        let sep_end = text[word_end..]
            .iter()
            .position(|c| !c.is_whitespace())
            .map_or(text.len(), |p| word_end + p);
        pairs.push((&text[i..word_end], &text[word_end..sep_end]));
        i = sep_end;
    }
    pairs
}

/// Characters belonging to the run of leading words typed exactly right,
/// separators included. Scoring stops at the first word or separator that
/// differs, even if later words happen to match again.
pub fn correct_word_chars(target: &[char], typed: &[char]) -> usize {
    let mut total = 0;
    for ((tw, ts), (yw, ys)) in word_pairs(target).into_iter().zip(word_pairs(typed)) {
        if tw != yw || ts != ys {
            break;
        }
        total += yw.len() + ys.len();
    }
    total
}

/// Minutes between start and end. `end` is `ended` once done, `now` otherwise;
/// a running session is floored at [`WARMUP_FLOOR_MS`].
pub fn elapsed_minutes(
    started: Option<DateTime<Utc>>,
    ended: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    done: bool,
) -> f64 {
    elapsed_ms(started, ended, now, done) as f64 / 60_000.0
}

pub fn elapsed_ms(
    started: Option<DateTime<Utc>>,
    ended: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    done: bool,
) -> i64 {
    let Some(start) = started else {
        return 0;
    };
    let end = match (done, ended) {
        (true, Some(end)) => end,
        _ => now,
    };
    let ms = (end - start).num_milliseconds().max(0);
    if done { ms } else { ms.max(WARMUP_FLOOR_MS) }
}

pub fn compute(
    target: &[char],
    typed: &[char],
    started: Option<DateTime<Utc>>,
    ended: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    done: bool,
) -> SessionStats {
    let elapsed = elapsed_ms(started, ended, now, done);
    let minutes = elapsed as f64 / 60_000.0;
    SessionStats {
        accuracy: accuracy(target, typed),
        wpm: correct_wpm(target, typed, minutes),
        raw_wpm: raw_wpm(typed.len(), minutes),
        progress: progress(target, typed),
        elapsed_ms: elapsed,
    }
}
