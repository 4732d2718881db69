//! tui/keymap: key events and their bindings.

/// A key press, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Home,
    End,
    Char(char),
    Ctrl(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    NewBucket,
    NewKey,
    Delete,
    DeleteBucket,
    Enter,
    Esc,
    Quit,
    Help,
    PrevTab,
    NextTab,
    /// Zero-based bucket tab.
    SelectTab(usize),
    EditKey,
    EditBucket,
    Settings,
}

pub struct Binding {
    pub keys: Vec<Key>,
    pub action: Action,
    pub help_keys: &'static str,
    pub help: &'static str,
}

impl Binding {
    fn new(keys: Vec<Key>, action: Action, help_keys: &'static str, help: &'static str) -> Self {
        Self {
            keys,
            action,
            help_keys,
            help,
        }
    }
}

pub struct KeyMap {
    bindings: Vec<Binding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use Key::*;
        let mut bindings = vec![
            Binding::new(vec![Up, Char('k')], Action::Up, "↑/k", "move up"),
            Binding::new(vec![Down, Char('j')], Action::Down, "↓/j", "move down"),
            Binding::new(vec![Left, Char('h')], Action::Left, "←/h", "move left"),
            Binding::new(vec![Right, Char('l')], Action::Right, "→/l", "move right"),
            Binding::new(vec![Ctrl('t')], Action::NewBucket, "ctrl+t", "new bucket"),
            Binding::new(vec![Ctrl('n')], Action::NewKey, "ctrl+n", "new key"),
            Binding::new(vec![Ctrl('d')], Action::Delete, "ctrl+d", "delete key"),
            Binding::new(vec![Ctrl('r')], Action::DeleteBucket, "ctrl+r", "remove bucket"),
            Binding::new(vec![Enter], Action::Enter, "enter", "select/confirm"),
            Binding::new(vec![Esc], Action::Esc, "esc", "back"),
            Binding::new(vec![Ctrl('c')], Action::Quit, "ctrl+c", "quit"),
            Binding::new(vec![Char('?')], Action::Help, "?", "toggle help"),
            Binding::new(vec![BackTab], Action::PrevTab, "shift+tab", "previous bucket"),
            Binding::new(vec![Tab], Action::NextTab, "tab", "next bucket"),
            Binding::new(vec![Ctrl('e')], Action::EditKey, "ctrl+e", "edit key name"),
            Binding::new(vec![Ctrl('b')], Action::EditBucket, "ctrl+b", "edit bucket name"),
            Binding::new(vec![Ctrl('o')], Action::Settings, "ctrl+o", "settings"),
        ];
        for (i, c) in ('1'..='9').enumerate() {
            let help_keys = if i == 0 { "1-9" } else { "" };
            bindings.push(Binding::new(vec![Char(c)], Action::SelectTab(i), help_keys, "select bucket"));
        }
        Self { bindings }
    }
}

impl KeyMap {
    pub fn action(&self, key: Key) -> Option<Action> {
        self.bindings
            .iter()
            .find(|b| b.keys.contains(&key))
            .map(|b| b.action)
    }

    fn entry(&self, action: Action) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.action == action)
    }

    fn describe(&self, actions: &[Action]) -> Vec<String> {
        actions
            .iter()
            .filter_map(|a| self.entry(*a))
            .map(|b| format!("{} {}", b.help_keys, b.help))
            .collect()
    }

    /// One-line summary.
    pub fn short_help(&self) -> String {
        use Action::*;
        self.describe(&[
            Up, Down, Enter, Esc, NewBucket, NewKey, EditKey, EditBucket, Delete, DeleteBucket,
            Settings, Help, Quit,
        ])
        .join(" • ")
    }

    /// Grouped help, one group per line.
    pub fn full_help(&self) -> Vec<String> {
        use Action::*;
        let groups: [&[Action]; 4] = [
            &[Up, Down, Left, Right],
            &[Enter, Esc, NewBucket, NewKey, EditKey, EditBucket, Delete, DeleteBucket],
            &[PrevTab, NextTab, SelectTab(0), Settings],
            &[Help, Quit],
        ];
        groups
            .iter()
            .map(|g| self.describe(g).join("   "))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let km = KeyMap::default();
        assert_eq!(km.action(Key::Ctrl('t')), Some(Action::NewBucket));
        assert_eq!(km.action(Key::Char('j')), Some(Action::Down));
        assert_eq!(km.action(Key::Down), Some(Action::Down));
        assert_eq!(km.action(Key::BackTab), Some(Action::PrevTab));
        assert_eq!(km.action(Key::Char('1')), Some(Action::SelectTab(0)));
        assert_eq!(km.action(Key::Char('9')), Some(Action::SelectTab(8)));
        assert_eq!(km.action(Key::Char('x')), None);
    }

    #[test]
    fn help_text_mentions_bindings() {
        let km = KeyMap::default();
        assert!(km.short_help().contains("ctrl+o settings"));
        let full = km.full_help();
        assert_eq!(full.len(), 4);
        assert!(full[2].contains("1-9 select bucket"));
    }
}
