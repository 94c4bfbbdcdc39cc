use serde::Serialize;

/// Markdown level prefix per fragment kind. Every fragment carries its own
/// prefix and trailing newline so flattening is pure concatenation.
mod md {
    pub const SECTION: &str = "## ";
    pub const REPORTER_HEADING: &str = "##### ";
    pub const TASK_BULLET: &str = " - ";
    pub const DETAIL_BULLET: &str = "   - ";
}

/// Full heading text of the two report sections.
pub mod section {
    pub const THIS_WEEK: &str = "## 一、本周工作\n";
    pub const NEXT_WEEK: &str = "## 二、下周工作\n";
}

/// The report division a chain lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bucket {
    ThisWeek,
    NextWeek,
}

impl Bucket {
    pub fn heading(self) -> &'static str {
        match self {
            Bucket::ThisWeek => section::THIS_WEEK,
            Bucket::NextWeek => section::NEXT_WEEK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FragmentKind {
    Section,
    ReporterHeading,
    TaskBullet,
    DetailBullet,
}

/// A single pre-rendered Markdown text unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub text: String,
}

/// One row's contribution to the document: section fragment first, detail
/// fragment last.
pub type Chain = Vec<Fragment>;

impl Fragment {
    pub fn section(bucket: Bucket) -> Self {
        Self {
            kind: FragmentKind::Section,
            text: bucket.heading().to_string(),
        }
    }

    pub fn reporter_heading(label: &str) -> Self {
        Self {
            kind: FragmentKind::ReporterHeading,
            text: format!("{}{label}\n", md::REPORTER_HEADING),
        }
    }

    pub fn task_bullet(label: &str) -> Self {
        Self {
            kind: FragmentKind::TaskBullet,
            text: format!("{}{label}\n", md::TASK_BULLET),
        }
    }

    /// `body` is the already-joined detail text (each value followed by a
    /// single space).
    pub fn detail_bullet(body: &str) -> Self {
        Self {
            kind: FragmentKind::DetailBullet,
            text: format!("{}{body}\n", md::DETAIL_BULLET),
        }
    }
}
