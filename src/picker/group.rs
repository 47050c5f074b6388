use serde::Serialize;
use std::fmt;

/// The four selection dimensions of the download picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Binaries,
    Os,
    Arch,
    Version,
}

impl GroupKind {
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Binaries,
        GroupKind::Os,
        GroupKind::Arch,
        GroupKind::Version,
    ];

    /// Dataset key carried by every button of this group (`data-<key>`).
    pub fn dataset_key(self) -> &'static str {
        match self {
            GroupKind::Binaries => "binaries",
            GroupKind::Os => "os",
            GroupKind::Arch => "architecture",
            GroupKind::Version => "version",
        }
    }

    /// Full attribute name, e.g. `data-os`.
    pub fn data_attribute(self) -> String {
        format!("data-{}", self.dataset_key())
    }

    /// Resolve a group from a dataset attribute, with or without the `data-` prefix.
    pub fn from_data_attribute(attribute: &str) -> Option<Self> {
        let key = attribute.strip_prefix("data-").unwrap_or(attribute);
        GroupKind::ALL
            .into_iter()
            .find(|kind| kind.dataset_key() == key)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dataset_key())
    }
}

/// One selectable value within a [`ButtonGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    pub id: String,
    pub enabled: bool,
    pub active: bool,
}

impl PickerOption {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            active: false,
        }
    }
}

/// An ordered set of mutually exclusive options for one dimension.
///
/// The group does not itself enforce "exactly one active"; [`ButtonGroup::activate`]
/// keeps it that way, while `disable` may leave the group with no active option
/// until a rule or click activates another one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonGroup {
    kind: GroupKind,
    options: Vec<PickerOption>,
}

impl ButtonGroup {
    /// Create a group with every option enabled.
    ///
    /// `default` becomes the active option; if it is `None` or not one of `ids`,
    /// the first option is active instead.
    pub fn new<I, S>(kind: GroupKind, ids: I, default: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut group = Self {
            kind,
            options: ids.into_iter().map(PickerOption::new).collect(),
        };

        let activated = default.is_some_and(|id| group.activate(id));
        if !activated {
            if let Some(first) = group.options.first_mut() {
                first.active = true;
            }
        }
        group
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn options(&self) -> &[PickerOption] {
        &self.options
    }

    pub fn option(&self, id: &str) -> Option<&PickerOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.option(id).is_some()
    }

    /// Identifier of the active option.
    pub fn active(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.active)
            .map(|o| o.id.as_str())
    }

    /// Mark `id` active and deactivate its siblings.
    ///
    /// Returns `false` without touching the group if `id` is not a member.
    pub fn activate(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        for option in &mut self.options {
            option.active = option.id == id;
        }
        true
    }

    pub fn enable(&mut self, id: &str) {
        if let Some(option) = self.option_mut(id) {
            option.enabled = true;
        }
    }

    /// Disable `id`. A disabled option is never active.
    pub fn disable(&mut self, id: &str) {
        if let Some(option) = self.option_mut(id) {
            option.enabled = false;
            option.active = false;
        }
    }

    pub fn enable_all(&mut self) {
        for option in &mut self.options {
            option.enabled = true;
        }
    }

    fn option_mut(&mut self, id: &str) -> Option<&mut PickerOption> {
        self.options.iter_mut().find(|o| o.id == id)
    }
}
