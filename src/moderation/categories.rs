// The fixed set of moderation categories and their flagging thresholds.
//
// These are the six Perspective API attributes the gate requests. The
// thresholds are deliberately uneven: severe toxicity, identity attacks,
// and threats flag at 0.5, while plain profanity needs 0.8 before the
// gate closes.

/// One axis of content-risk scoring.
///
/// Declaration order is the request order and the order categories appear
/// in a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Toxicity,
    SevereToxicity,
    IdentityAttack,
    Insult,
    Profanity,
    Threat,
}

impl Category {
    /// All categories, in request/verdict order.
    pub const ALL: [Category; 6] = [
        Category::Toxicity,
        Category::SevereToxicity,
        Category::IdentityAttack,
        Category::Insult,
        Category::Profanity,
        Category::Threat,
    ];

    /// The Perspective API attribute name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Toxicity => "TOXICITY",
            Category::SevereToxicity => "SEVERE_TOXICITY",
            Category::IdentityAttack => "IDENTITY_ATTACK",
            Category::Insult => "INSULT",
            Category::Profanity => "PROFANITY",
            Category::Threat => "THREAT",
        }
    }

    /// Score at or above this value marks the category as exceeded.
    pub fn threshold(&self) -> f64 {
        match self {
            Category::Toxicity => 0.70,
            Category::SevereToxicity => 0.50,
            Category::IdentityAttack => 0.50,
            Category::Insult => 0.70,
            Category::Profanity => 0.80,
            Category::Threat => 0.50,
        }
    }

    /// Look up a category by its attribute name.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn an attribute name into prose: lowercased, underscores to spaces.
/// "SEVERE_TOXICITY" becomes "severe toxicity".
pub fn humanize(name: &str) -> String {
    name.to_lowercase().replace('_', " ")
}
