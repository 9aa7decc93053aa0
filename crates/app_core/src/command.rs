//! Command system for keyboard actions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Command identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Navigation commands
    pub const NAV_NEXT_ITEM: &'static str = "nav.next_item";
    pub const NAV_PREV_ITEM: &'static str = "nav.prev_item";

    // View commands
    pub const VIEW_CLOSE: &'static str = "view.close";
    pub const VIEW_POSITION: &'static str = "view.position";
}

/// Command with an optional argument
///
/// Bindings spell arguments after a colon: `view.position:top`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: CommandId,
    pub arg: Option<String>,
}

impl Command {
    pub fn new(id: &str) -> Self {
        Self {
            id: CommandId::new(id),
            arg: None,
        }
    }

    pub fn with_arg(mut self, value: &str) -> Self {
        self.arg = Some(value.to_string());
        self
    }

    /// Parse a binding name such as `view.position:top`
    pub fn parse(binding: &str) -> Self {
        match binding.split_once(':') {
            Some((id, arg)) => Command::new(id).with_arg(arg),
            None => Command::new(binding),
        }
    }

    pub fn is(&self, id: &str) -> bool {
        self.id.as_str() == id
    }
}

/// Key chord -> command lookup built from the configured bindings
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    chords: HashMap<String, Command>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `command -> [chord, ...]` bindings
    ///
    /// When two commands claim one chord, the one whose name sorts first wins
    /// so the result does not depend on map iteration order.
    pub fn from_bindings(bindings: &HashMap<String, Vec<String>>) -> Self {
        let mut names: Vec<_> = bindings.keys().collect();
        names.sort();

        let mut keymap = Self::new();
        for name in names.into_iter().rev() {
            for chord in &bindings[name] {
                keymap.bind(chord, Command::parse(name));
            }
        }
        keymap
    }

    pub fn bind(&mut self, chord: &str, command: Command) {
        if let Some(previous) = self.chords.insert(normalize_chord(chord), command) {
            tracing::debug!("Chord {} rebound (was {})", chord, previous.id.as_str());
        }
    }

    pub fn resolve(&self, chord: &str) -> Option<&Command> {
        self.chords.get(&normalize_chord(chord))
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

/// Canonical chord text: modifiers sorted and capitalised, key kept as typed
fn normalize_chord(chord: &str) -> String {
    let mut parts: Vec<&str> = chord.split('+').map(str::trim).filter(|p| !p.is_empty()).collect();
    let Some(key) = parts.pop() else {
        return String::new();
    };

    let mut modifiers: Vec<String> = parts
        .into_iter()
        .map(|m| match m.to_ascii_lowercase().as_str() {
            "cmd" | "command" | "super" | "meta" => "Meta".to_string(),
            "ctrl" | "control" => "Ctrl".to_string(),
            "alt" | "option" => "Alt".to_string(),
            "shift" => "Shift".to_string(),
            other => other.to_string(),
        })
        .collect();
    modifiers.sort();
    modifiers.dedup();

    modifiers.push(key.to_string());
    modifiers.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binding() {
        let cmd = Command::parse("view.position:top");
        assert!(cmd.is(CommandId::VIEW_POSITION));
        assert_eq!(cmd.arg.as_deref(), Some("top"));

        let cmd = Command::parse("nav.next_item");
        assert!(cmd.is(CommandId::NAV_NEXT_ITEM));
        assert_eq!(cmd.arg, None);
    }

    #[test]
    fn test_modifier_aliases() {
        let mut keymap = Keymap::new();
        keymap.bind("Meta+t", Command::parse("view.position:top"));

        assert!(keymap.resolve("Cmd+t").is_some());
        assert!(keymap.resolve("command + t").is_some());
        assert!(keymap.resolve("t").is_none());
        assert!(keymap.resolve("Meta+T").is_none());
    }

    #[test]
    fn test_from_bindings_conflict_is_deterministic() {
        let mut bindings = HashMap::new();
        bindings.insert("b.second".to_string(), vec!["x".to_string()]);
        bindings.insert("a.first".to_string(), vec!["x".to_string(), "Shift+Ctrl+y".to_string()]);

        let keymap = Keymap::from_bindings(&bindings);
        assert!(keymap.resolve("x").unwrap().is("a.first"));
        assert!(keymap.resolve("Ctrl+Shift+y").unwrap().is("a.first"));
        assert_eq!(keymap.len(), 2);
    }
}
