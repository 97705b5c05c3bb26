//! Origin metadata attached to pooled strings.

/// Kind of dataset entity a pooled string came from.
///
/// Stored as a single byte in the record header.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum OriginKind {
    #[default]
    Unknown = 0,
    Actor = 1,
    Variable = 2,
    Conversation = 3,
    DialogueEntry = 4,
}

impl OriginKind {
    /// Decode from a record header byte. Unrecognized values map to
    /// `Unknown` rather than failing.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Actor,
            2 => Self::Variable,
            3 => Self::Conversation,
            4 => Self::DialogueEntry,
            _ => Self::Unknown,
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Actor => "actor",
            Self::Variable => "variable",
            Self::Conversation => "conversation",
            Self::DialogueEntry => "dialogue entry",
        }
    }
}

/// Back-reference from a pooled string to the entity that owns it.
///
/// Lookup-only: the pool stores it and hands it back, collaborators follow
/// it. Never an ownership edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Lookback {
    pub kind: OriginKind,
    pub index: u32,
}

impl Lookback {
    pub fn new(kind: OriginKind, index: u32) -> Self {
        Self { kind, index }
    }
}
