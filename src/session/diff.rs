use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Pending,
    Correct,
    Wrong,
}

/// A target character paired with how the player has done on it so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharCell {
    pub idx: usize,
    pub ch: char,
    pub status: CharStatus,
}

pub fn status_at(target: &[char], typed: &[char], idx: usize) -> CharStatus {
    match typed.get(idx) {
        None => CharStatus::Pending,
        Some(&ch) if target.get(idx) == Some(&ch) => CharStatus::Correct,
        Some(_) => CharStatus::Wrong,
    }
}

pub fn classify(target: &[char], typed: &[char]) -> Vec<CharCell> {
    classify_range(target, typed, 0..target.len())
}

pub fn classify_range(target: &[char], typed: &[char], range: Range<usize>) -> Vec<CharCell> {
    let end = range.end.min(target.len());
    let start = range.start.min(end);
    (start..end)
        .map(|idx| CharCell {
            idx,
            ch: target[idx],
            status: status_at(target, typed, idx),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_classify_covers_whole_target() {
        let target = chars("cat dog");
        let typed = chars("cat dig");
        let cells = classify(&target, &typed);
        assert_eq!(cells.len(), target.len());
        let wrong: Vec<usize> = cells
            .iter()
            .filter(|c| c.status == CharStatus::Wrong)
            .map(|c| c.idx)
            .collect();
        assert_eq!(wrong, vec![5]);
    }

    #[test]
    fn test_untyped_positions_are_pending() {
        let target = chars("hello");
        let typed = chars("hx");
        let cells = classify(&target, &typed);
        assert_eq!(cells[0].status, CharStatus::Correct);
        assert_eq!(cells[1].status, CharStatus::Wrong);
        assert!(cells[2..].iter().all(|c| c.status == CharStatus::Pending));
    }

    #[test]
    fn test_classify_range_clamps() {
        let target = chars("abc");
        let cells = classify_range(&target, &[], 1..10);
        assert_eq!(cells.iter().map(|c| c.ch).collect::<String>(), "bc");
        assert!(classify_range(&target, &[], 5..9).is_empty());
    }

    #[test]
    fn test_empty_typed_all_pending() {
        let target = chars("x\ny");
        assert!(
            classify(&target, &[])
                .iter()
                .all(|c| c.status == CharStatus::Pending)
        );
    }
}
