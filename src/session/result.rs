use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generator::{Concept, Language};
use crate::session::state::Completion;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub language: Language,
    pub concept: Concept,
    pub wpm: u32,
    pub raw_wpm: u32,
    pub accuracy: u32,
    #[serde(default)]
    pub chars: usize,
}

impl RunRecord {
    pub fn from_completion(
        completion: &Completion,
        language: Language,
        concept: Concept,
        chars: usize,
    ) -> Self {
        Self {
            started_at: completion.started_at,
            ended_at: completion.ended_at,
            duration_ms: completion.stats.elapsed_ms,
            language,
            concept,
            wpm: completion.stats.wpm,
            raw_wpm: completion.stats.raw_wpm,
            accuracy: completion.stats.accuracy,
            chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::session::stats::SessionStats;

    #[test]
    fn test_from_completion() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let completion = Completion {
            started_at: start,
            ended_at: start + Duration::seconds(30),
            stats: SessionStats {
                accuracy: 97,
                wpm: 52,
                raw_wpm: 60,
                progress: 100,
                elapsed_ms: 30_000,
            },
        };
        let record = RunRecord::from_completion(&completion, Language::Go, Concept::Io, 150);
        assert_eq!(record.duration_ms, 30_000);
        assert_eq!(record.wpm, 52);
        assert_eq!(record.raw_wpm, 60);
        assert_eq!(record.accuracy, 97);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"language\":\"go\""));
        assert!(json.contains("\"concept\":\"io\""));
    }

    #[test]
    fn test_old_records_without_chars_load() {
        let json = r#"{
            "started_at": "2024-05-01T12:00:00Z",
            "ended_at": "2024-05-01T12:00:10Z",
            "duration_ms": 10000,
            "language": "python",
            "concept": "loops",
            "wpm": 40,
            "raw_wpm": 45,
            "accuracy": 95
        }"#;
        let record: RunRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.chars, 0);
        assert_eq!(record.concept, Concept::Loops);
    }
}
