//! Deterministic keyword rules mapping a free-text description to a
//! (Category, Kind) pair.
//!
//! Matching is plain substring search over the lower-cased description.
//! Groups are tested in order and the first hit wins, so a description
//! containing "bus" inside "business" still lands in Transport.

use tally_core::{Category, Kind};

/// Result of categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub kind: Kind,
}

/// One keyword group in the rule table
#[derive(Debug)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub category: Category,
    pub kind: Kind,
}

impl Rule {
    /// First keyword of this group found in an already lower-cased description
    pub fn first_match(&self, desc: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|kw| desc.contains(kw))
    }
}

/// Why a description got its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explanation {
    pub classification: Classification,
    /// Keyword that triggered the rule; `None` for the fallback bucket
    pub keyword: Option<&'static str>,
}

static RULES: [Rule; 5] = [
    // Fuel and upkeep
    Rule {
        keywords: &[
            "fuel", "gasoline", "petrol", "toll", "oil", "tire", "tyre",
            "gasolina", "combustible", "peaje", "aceite", "llanta",
        ],
        category: Category::Vehicle,
        kind: Kind::NecessaryOptimizable,
    },
    // Rides and public transit
    Rule {
        keywords: &[
            "rideshare", "uber", "taxi", "didi", "bus", "metro", "subway", "transmilenio",
        ],
        category: Category::Transport,
        kind: Kind::Necessary,
    },
    // Small indulgences
    Rule {
        keywords: &[
            "ice cream", "coffee", "dessert", "beer", "cigarette", "soda",
            "helado", "café", "postre", "cerveza", "cigarrillo", "gaseosa",
        ],
        category: Category::Craving,
        kind: Kind::AntExpense,
    },
    // Going out
    Rule {
        keywords: &[
            "movies", "cinema", "party", "liquor", "outing", "restaurant",
            "cine", "fiesta", "licor", "salida", "restaurante",
        ],
        category: Category::Leisure,
        kind: Kind::Discretionary,
    },
    // Bills and the pantry
    Rule {
        keywords: &[
            "rent", "electricity", "water", "gas", "groceries", "internet",
            "arriendo", "luz", "agua", "mercado",
        ],
        category: Category::Household,
        kind: Kind::Mandatory,
    },
];

const FALLBACK: Classification = Classification {
    category: Category::Miscellaneous,
    kind: Kind::General,
};

/// Ordered rule table, highest priority first
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Classify a description. Never fails; unmatched text is Miscellaneous/General.
pub fn classify(description: &str) -> Classification {
    explain(description).classification
}

/// Like [`classify`], also reporting the keyword that decided it.
pub fn explain(description: &str) -> Explanation {
    let desc = description.to_lowercase();

    for rule in rules() {
        if let Some(keyword) = rule.first_match(&desc) {
            return Explanation {
                classification: Classification {
                    category: rule.category,
                    kind: rule.kind,
                },
                keyword: Some(keyword),
            };
        }
    }

    Explanation {
        classification: FALLBACK,
        keyword: None,
    }
}
