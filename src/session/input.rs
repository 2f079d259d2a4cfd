/// Logical input after the terminal adapter has resolved raw key events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Tab,
    Enter,
    /// New full contents of the typed buffer.
    Replace(Vec<char>),
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Replace(Vec<char>),
    Restart,
    Ignored,
}

fn is_hspace(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Length of the run starting at `from` whose chars satisfy `pred`.
fn run_len(target: &[char], from: usize, pred: impl Fn(char) -> bool) -> usize {
    target
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|&&c| pred(c)).count())
}

/// Chars Tab would add at the cursor: the horizontal whitespace run there.
pub fn tab_run(target: &[char], cursor: usize) -> &[char] {
    let len = run_len(target, cursor, is_hspace);
    &target[cursor.min(target.len())..cursor.min(target.len()) + len]
}

/// Chars Enter would add at the cursor, before clamping.
///
/// On the target's newline run, the run is mirrored exactly; with
/// `auto_indent`, whitespace-only lines that follow are consumed as they are
/// and the next content line's indentation is appended. If the target ends
/// before any content line, only the newline run is kept.
///
/// Off a newline, Enter adds a lone `\n`, plus with `auto_indent` whatever
/// horizontal whitespace the target has just after the cursor.
pub fn enter_run(target: &[char], cursor: usize, auto_indent: bool) -> Vec<char> {
    let newlines = run_len(target, cursor, |c| c == '\n');
    if newlines == 0 {
        let mut add = vec!['\n'];
        if auto_indent {
            let from = (cursor + 1).min(target.len());
            let indent = run_len(target, from, is_hspace);
            add.extend_from_slice(&target[from..from + indent]);
        }
        return add;
    }

    let mut add = target[cursor..cursor + newlines].to_vec();
    if !auto_indent {
        return add;
    }

    let mut pos = cursor + add.len();
    let mut pending = Vec::new();
    while pos < target.len() {
        let ws = run_len(target, pos, is_hspace);
        let line_end = pos + ws;
        match target.get(line_end) {
            None => break,
            Some('\n') => {
                pending.extend_from_slice(&target[pos..=line_end]);
                pos = line_end + 1;
            }
            Some(_) => {
                add.extend(pending);
                add.extend_from_slice(&target[pos..line_end]);
                break;
            }
        }
    }
    add
}

fn clamped(mut chars: Vec<char>, limit: usize) -> Vec<char> {
    chars.truncate(limit);
    chars
}

/// Decides what a key does to the typed buffer. Never mutates; the result is
/// always within the target length.
pub fn interpret(input: &KeyInput, target: &[char], typed: &[char], auto_indent: bool) -> KeyAction {
    let cursor = typed.len();
    match input {
        KeyInput::Restart => KeyAction::Restart,
        KeyInput::Replace(next) => KeyAction::Replace(clamped(next.clone(), target.len())),
        KeyInput::Tab => {
            let run = tab_run(target, cursor);
            if run.is_empty() {
                return KeyAction::Ignored;
            }
            let mut next = typed.to_vec();
            next.extend_from_slice(run);
            KeyAction::Replace(clamped(next, target.len()))
        }
        KeyInput::Enter => {
            if cursor >= target.len() {
                return KeyAction::Ignored;
            }
            let mut next = typed.to_vec();
            next.extend(enter_run(target, cursor, auto_indent));
            KeyAction::Replace(clamped(next, target.len()))
        }
    }
}
