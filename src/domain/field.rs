use crate::domain::session::Action;

/// The three selections that parameterize a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Genre,
    Mood,
    Level,
}

impl FieldKind {
    pub fn id(&self) -> &'static str {
        match self {
            FieldKind::Genre => "genre",
            FieldKind::Mood => "mood",
            FieldKind::Level => "level",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "genre" => Some(FieldKind::Genre),
            "mood" => Some(FieldKind::Mood),
            "level" => Some(FieldKind::Level),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldKind::Genre => "Please select a genre",
            FieldKind::Mood => "Please select a mood",
            FieldKind::Level => "Please select a level",
        }
    }

    /// Action reporting a pick on this field
    pub fn action(&self, value: String) -> Action {
        match self {
            FieldKind::Genre => Action::SetGenre(value),
            FieldKind::Mood => Action::SetMood(value),
            FieldKind::Level => Action::SetLevel(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldItem {
    pub value: String,
    pub selected: bool,
}

/// A labeled dropdown over a list of option strings.
///
/// Holds no derived state: items are computed from `options` and `value`
/// every time. Validation is left to whoever handles the pick.
#[derive(Debug, Clone)]
pub struct SelectField<'a> {
    pub kind: FieldKind,
    options: Vec<&'a str>,
    value: &'a str,
}

impl<'a> SelectField<'a> {
    pub fn new<I>(kind: FieldKind, options: I, value: &'a str) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            kind,
            options: options.into_iter().collect(),
            value,
        }
    }

    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    pub fn placeholder(&self) -> &'static str {
        self.kind.placeholder()
    }

    pub fn value(&self) -> &str {
        self.value
    }

    /// Each option exactly once, in the given order
    pub fn items(&self) -> Vec<FieldItem> {
        let mut items: Vec<FieldItem> = Vec::with_capacity(self.options.len());
        for option in &self.options {
            if items.iter().any(|item| item.value == *option) {
                continue;
            }
            items.push(FieldItem {
                value: option.to_string(),
                selected: !self.value.is_empty() && *option == self.value,
            });
        }
        items
    }

    /// No option matches the current value, so "none chosen" is showing
    pub fn placeholder_selected(&self) -> bool {
        self.value.is_empty() || !self.options.contains(&self.value)
    }

    /// Nothing to choose from (mood before a genre is picked)
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn pick<F>(&self, choice: &str, on_select: F)
    where
        F: FnOnce(String),
    {
        on_select(choice.to_string());
    }
}
