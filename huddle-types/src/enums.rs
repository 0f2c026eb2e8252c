use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Celebrate,
    Idea,
    Fire,
    Applause,
}

impl ReactionKind {
    /// Display order of the reaction bar
    pub const ALL: [ReactionKind; 6] = [
        ReactionKind::Like,
        ReactionKind::Love,
        ReactionKind::Celebrate,
        ReactionKind::Idea,
        ReactionKind::Fire,
        ReactionKind::Applause,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Love => "love",
            ReactionKind::Celebrate => "celebrate",
            ReactionKind::Idea => "idea",
            ReactionKind::Fire => "fire",
            ReactionKind::Applause => "applause",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ReactionKind::Like => "👍",
            ReactionKind::Love => "❤️",
            ReactionKind::Celebrate => "🎉",
            ReactionKind::Idea => "💡",
            ReactionKind::Fire => "🔥",
            ReactionKind::Applause => "👏",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportReason {
    Spam,
    Inappropriate,
    Offensive,
    Harassment,
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 5] = [
        ReportReason::Spam,
        ReportReason::Inappropriate,
        ReportReason::Offensive,
        ReportReason::Harassment,
        ReportReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Spam => "spam",
            ReportReason::Inappropriate => "inappropriate",
            ReportReason::Offensive => "offensive",
            ReportReason::Harassment => "harassment",
            ReportReason::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportReason::Spam => "Spam",
            ReportReason::Inappropriate => "Inappropriate Content",
            ReportReason::Offensive => "Offensive Language",
            ReportReason::Harassment => "Harassment",
            ReportReason::Other => "Other",
        }
    }
}

/// Kind of content a report is filed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget {
    Post(i64),
    Comment(i64),
}

impl ReportTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            ReportTarget::Post(_) => "post",
            ReportTarget::Comment(_) => "comment",
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            ReportTarget::Post(id) | ReportTarget::Comment(id) => *id,
        }
    }
}
