use serde_json::Value;

/// Outcome for one variable of a prompting session.
#[derive(Debug, Clone, PartialEq)]
pub enum VarState {
    /// Value came from a loaded context file.
    SkippedContext,
    /// Value was supplied up front, e.g. on the command line.
    SkippedProvided,
    /// Operator typed a value.
    Resolved(Value),
    /// Default taken on empty input or in batch mode.
    Defaulted(Value),
    /// No value; the name is left out of the context.
    Absent,
    /// Required variable left without a value.
    RejectedRequired,
}

impl VarState {
    /// Value to store in the context, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            VarState::Resolved(v) | VarState::Defaulted(v) => Some(v),
            _ => None,
        }
    }
}

/// Per-variable outcomes in resolution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    entries: Vec<(String, VarState)>,
}

impl SessionReport {
    pub(crate) fn record(&mut self, name: &str, state: VarState) {
        self.entries.push((name.to_string(), state));
    }

    pub fn state(&self, name: &str) -> Option<&VarState> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarState)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    fn names_where(&self, pred: impl Fn(&VarState) -> bool) -> Vec<&str> {
        self.iter().filter(|(_, s)| pred(s)).map(|(n, _)| n).collect()
    }

    pub fn prompted(&self) -> Vec<&str> {
        self.names_where(|s| matches!(s, VarState::Resolved(_)))
    }

    pub fn defaulted(&self) -> Vec<&str> {
        self.names_where(|s| matches!(s, VarState::Defaulted(_)))
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.names_where(|s| matches!(s, VarState::SkippedContext | VarState::SkippedProvided))
    }

    pub fn absent(&self) -> Vec<&str> {
        self.names_where(|s| matches!(s, VarState::Absent))
    }

    pub fn missing_required(&self) -> Vec<&str> {
        self.names_where(|s| matches!(s, VarState::RejectedRequired))
    }
}
