//! Core vocabulary for plan diff rendering
//!
//! Action kinds, line markers and the terminal styles they are painted with.

use owo_colors::Color;
use owo_colors::colors::{BrightBlack, Cyan, Green, Red, Yellow};

const BOLD: &str = "\x1b[1m";

/// Escape sequence that clears every active style
pub const RESET: &str = "\x1b[0m";

/// High-level action for a resource or output change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Resource will be created
    Create,
    /// Resource will be updated in-place
    Update,
    /// Resource will be destroyed
    Delete,
    /// Resource will be destroyed and recreated
    Replace,
    /// Data source will be read during apply
    Read,
    /// No changes
    NoOp,
    /// Action list did not match any known combination
    Unknown,
}

impl ActionKind {
    /// Classify a raw action list such as `["delete", "create"]`
    pub fn classify<S: AsRef<str>>(actions: &[S]) -> Self {
        match actions {
            [single] => match single.as_ref() {
                "create" => ActionKind::Create,
                "update" => ActionKind::Update,
                "delete" => ActionKind::Delete,
                "read" => ActionKind::Read,
                "no-op" => ActionKind::NoOp,
                _ => ActionKind::Unknown,
            },
            [first, second] => match (first.as_ref(), second.as_ref()) {
                ("delete", "create") | ("create", "delete") => ActionKind::Replace,
                _ => ActionKind::Unknown,
            },
            _ => ActionKind::Unknown,
        }
    }

    /// Phrase that follows the address in a resource header
    ///
    /// Delete and Replace split their phrase so the final word can be
    /// emphasised; this returns the plain prefix and the emphasised tail.
    pub fn verb(&self) -> (&'static str, Option<&'static str>) {
        match self {
            ActionKind::Create => ("will be created", None),
            ActionKind::Update => ("will be updated in-place", None),
            ActionKind::Delete => ("will be ", Some("destroyed")),
            ActionKind::Replace => ("must be ", Some("replaced")),
            ActionKind::Read => ("will be read during apply", None),
            ActionKind::NoOp | ActionKind::Unknown => ("will be changed", None),
        }
    }

    /// Leading padding before the resource-level marker so every marker ends
    /// in the same column
    pub fn block_indent(&self) -> &'static str {
        match self {
            ActionKind::Replace => "",
            ActionKind::Read => " ",
            _ => "  ",
        }
    }

    /// Contribution of this action to the add/change/destroy summary
    pub fn summary_counts(&self) -> (usize, usize, usize) {
        match self {
            ActionKind::Create => (1, 0, 0),
            ActionKind::Update => (0, 1, 0),
            ActionKind::Delete => (0, 0, 1),
            ActionKind::Replace => (1, 0, 1),
            ActionKind::Read | ActionKind::NoOp | ActionKind::Unknown => (0, 0, 0),
        }
    }
}

/// Single-character marker that prefixes an attribute line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Add,
    Remove,
    Change,
}

impl Marker {
    pub fn symbol(&self) -> &'static str {
        match self {
            Marker::Add => "+",
            Marker::Remove => "-",
            Marker::Change => "~",
        }
    }

    pub fn style(&self) -> AnsiStyle {
        match self {
            Marker::Add => AnsiStyle::Green,
            Marker::Remove => AnsiStyle::Red,
            Marker::Change => AnsiStyle::Yellow,
        }
    }
}

/// Semantic text style understood by the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiStyle {
    Bold,
    Green,
    Yellow,
    Red,
    Cyan,
    Dim,
}

impl AnsiStyle {
    /// Escape sequence that switches this style on
    pub fn escape(&self) -> &'static str {
        match self {
            AnsiStyle::Bold => BOLD,
            AnsiStyle::Green => <Green as Color>::ANSI_FG,
            AnsiStyle::Yellow => <Yellow as Color>::ANSI_FG,
            AnsiStyle::Red => <Red as Color>::ANSI_FG,
            AnsiStyle::Cyan => <Cyan as Color>::ANSI_FG,
            AnsiStyle::Dim => <BrightBlack as Color>::ANSI_FG,
        }
    }
}
