#![forbid(unsafe_code)]

/// Literal search/replace pair. The search text is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplacePair {
    search: String,
    replace: String,
}

impl ReplacePair {
    pub fn try_new(
        search: impl Into<String>,
        replace: impl Into<String>,
    ) -> Result<Self, ReplacePairError> {
        let search = search.into();
        if search.is_empty() {
            return Err(ReplacePairError::EmptySearch);
        }
        Ok(Self {
            search,
            replace: replace.into(),
        })
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn replace(&self) -> &str {
        &self.replace
    }

    /// Replaces every occurrence; `None` when the text comes out unchanged.
    pub fn apply(&self, text: &str) -> Option<String> {
        if !text.contains(self.search.as_str()) {
            return None;
        }
        let replaced = text.replace(self.search.as_str(), &self.replace);
        (replaced != text).then_some(replaced)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplacePairError {
    EmptySearch,
}

impl ReplacePairError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptySearch => "search string must not be empty",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    TestCase,
    Step,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TestCase => "testcase",
            Self::Step => "step",
        }
    }
}

/// Updatable text fields. Generation and apply share these keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Summary,
    Preconditions,
    Action,
    ExpectedResult,
}

impl Field {
    pub const TESTCASE_FIELDS: [Field; 2] = [Field::Summary, Field::Preconditions];
    pub const STEP_FIELDS: [Field; 2] = [Field::Action, Field::ExpectedResult];

    pub fn kind(self) -> TargetKind {
        match self {
            Self::Summary | Self::Preconditions => TargetKind::TestCase,
            Self::Action | Self::ExpectedResult => TargetKind::Step,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Preconditions => "preconditions",
            Self::Action => "action",
            Self::ExpectedResult => "expected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Preconditions => "Precond",
            Self::Action => "Actions",
            Self::ExpectedResult => "Expected",
        }
    }
}

/// Record a candidate writes to. `id` is always the row id of the owning table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeTarget {
    TestCase {
        id: i64,
        external_id: i64,
    },
    Step {
        id: i64,
        number: i64,
        testcase_id: i64,
        external_id: i64,
    },
}

impl ChangeTarget {
    pub fn id(&self) -> i64 {
        match self {
            Self::TestCase { id, .. } | Self::Step { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Self::TestCase { .. } => TargetKind::TestCase,
            Self::Step { .. } => TargetKind::Step,
        }
    }

    pub fn external_id(&self) -> i64 {
        match self {
            Self::TestCase { external_id, .. } | Self::Step { external_id, .. } => *external_id,
        }
    }

    /// Version record id of the test case the target belongs to.
    pub fn testcase_id(&self) -> i64 {
        match self {
            Self::TestCase { id, .. } => *id,
            Self::Step { testcase_id, .. } => *testcase_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChange {
    pub field: Field,
    pub old: String,
    pub new: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeCandidate {
    target: ChangeTarget,
    changes: Vec<FieldChange>,
}

impl ChangeCandidate {
    pub fn try_new(target: ChangeTarget, changes: Vec<FieldChange>) -> Result<Self, CandidateError> {
        if changes.is_empty() {
            return Err(CandidateError::NoChanges);
        }
        let mut seen = Vec::with_capacity(changes.len());
        for change in &changes {
            if change.field.kind() != target.kind() {
                return Err(CandidateError::FieldKindMismatch {
                    field: change.field,
                    kind: target.kind(),
                });
            }
            if seen.contains(&change.field) {
                return Err(CandidateError::DuplicateField(change.field));
            }
            seen.push(change.field);
        }
        Ok(Self { target, changes })
    }

    /// Builds a candidate whose fields are already known to be distinct and
    /// to belong to the target's kind.
    pub(crate) fn from_parts(target: ChangeTarget, changes: Vec<FieldChange>) -> Self {
        debug_assert!(!changes.is_empty());
        debug_assert!(changes.iter().all(|c| c.field.kind() == target.kind()));
        Self { target, changes }
    }

    pub fn target(&self) -> &ChangeTarget {
        &self.target
    }

    pub fn target_id(&self) -> i64 {
        self.target.id()
    }

    pub fn kind(&self) -> TargetKind {
        self.target.kind()
    }

    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.changes.iter().map(|change| change.field)
    }

    /// Replacement text for `field`, if this candidate changes it.
    pub fn text(&self, field: Field) -> Option<&str> {
        self.changes
            .iter()
            .find(|change| change.field == field)
            .map(|change| change.new.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CandidateError {
    NoChanges,
    FieldKindMismatch { field: Field, kind: TargetKind },
    DuplicateField(Field),
}

impl CandidateError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoChanges => "candidate must change at least one field",
            Self::FieldKindMismatch { .. } => "field does not belong to the target kind",
            Self::DuplicateField(_) => "field listed more than once",
        }
    }
}
