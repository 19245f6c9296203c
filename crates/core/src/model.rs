#![forbid(unsafe_code)]

/// Type tag of a `nodes_hierarchy` row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Project,
    Container,
    TestCase,
    TestCaseVersion,
    Step,
    Other(i64),
}

impl NodeType {
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Project => 1,
            Self::Container => 2,
            Self::TestCase => 3,
            Self::TestCaseVersion => 4,
            Self::Step => 9,
            Self::Other(raw) => raw,
        }
    }

    pub fn from_i64(raw: i64) -> Self {
        match raw {
            1 => Self::Project,
            2 => Self::Container,
            3 => Self::TestCase,
            4 => Self::TestCaseVersion,
            9 => Self::Step,
            other => Self::Other(other),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Container => "container",
            Self::TestCase => "testcase",
            Self::TestCaseVersion => "testcase_version",
            Self::Step => "step",
            Self::Other(_) => "other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyNode {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub node_type: NodeType,
}

impl HierarchyNode {
    pub fn is_container(&self) -> bool {
        self.node_type == NodeType::Container
    }

    pub fn is_testcase(&self) -> bool {
        self.node_type == NodeType::TestCase
    }
}

/// Live (highest) version of a test case together with its steps.
///
/// `id` is the version record id, which is also the parent node of the steps.
/// `node_id` is the leaf hierarchy node the version hangs under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    pub id: i64,
    pub node_id: i64,
    pub name: String,
    pub external_id: i64,
    pub version: i64,
    pub summary: String,
    pub preconditions: String,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub id: i64,
    pub number: i64,
    pub action: String,
    pub expected: String,
}
