//! Vim-style key notation (`"d2w"`, `"ifoo<Esc>"`, `"<C-r>"`) for scripts and tests.

use crate::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("unterminated key name starting at char {0}")]
    Unterminated(usize),
    #[error("unknown key name <{0}>")]
    UnknownKey(String),
}

/// Parse a key script into individual key events.
///
/// Literal chars map to themselves; `<...>` groups name special keys
/// (`Esc`, `CR`/`Enter`, `BS`, `Tab`, `Up`, `Down`, `Left`, `Right`, `Home`,
/// `End`, `lt`, `Space`) optionally prefixed by `C-`, `A-` or `S-`.
pub fn parse_keys(script: &str) -> Result<Vec<KeyEvent>, KeyParseError> {
    let chars: Vec<char> = script.chars().collect();
    let mut keys = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '<' {
            keys.push(KeyEvent::char(c));
            i += 1;
            continue;
        }
        let close = chars[i + 1..]
            .iter()
            .position(|&ch| ch == '>')
            .map(|off| i + 1 + off)
            .ok_or(KeyParseError::Unterminated(i))?;
        let name: String = chars[i + 1..close].iter().collect();
        keys.push(parse_named(&name)?);
        i = close + 1;
    }
    Ok(keys)
}

fn parse_named(name: &str) -> Result<KeyEvent, KeyParseError> {
    let mut mods = KeyModifiers::empty();
    let mut rest = name;
    loop {
        let lower = rest.get(..2).map(str::to_ascii_lowercase);
        match lower.as_deref() {
            Some("c-") if rest.len() > 2 => mods |= KeyModifiers::CTRL,
            Some("a-") | Some("m-") if rest.len() > 2 => mods |= KeyModifiers::ALT,
            Some("s-") if rest.len() > 2 => mods |= KeyModifiers::SHIFT,
            _ => break,
        }
        rest = &rest[2..];
    }
    let code = match rest.to_ascii_lowercase().as_str() {
        "esc" => KeyCode::Esc,
        "cr" | "enter" | "return" => KeyCode::Enter,
        "bs" | "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "lt" => KeyCode::Char('<'),
        "space" => KeyCode::Char(' '),
        _ => {
            let mut it = rest.chars();
            match (it.next(), it.next()) {
                (Some(c), None) if !mods.is_empty() => KeyCode::Char(c),
                _ => return Err(KeyParseError::UnknownKey(name.to_string())),
            }
        }
    };
    Ok(KeyEvent::new(code, mods))
}
