use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Threat families used by both the analyzer and the threat library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatCategory {
    Phishing,
    Malware,
    Social,
    Fraud,
}

impl ThreatCategory {
    /// Enumeration order used for scoring and recommendations.
    pub const ALL: [ThreatCategory; 4] = [
        ThreatCategory::Phishing,
        ThreatCategory::Malware,
        ThreatCategory::Social,
        ThreatCategory::Fraud,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            ThreatCategory::Phishing => "phishing",
            ThreatCategory::Malware => "malware",
            ThreatCategory::Social => "social",
            ThreatCategory::Fraud => "fraud",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ThreatCategory::Phishing => "Phishing",
            ThreatCategory::Malware => "Malware",
            ThreatCategory::Social => "Social Engineering",
            ThreatCategory::Fraud => "Fraud & Scams",
        }
    }
}

impl fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error type for parsing a category slug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseCategoryError {
    #[error("unknown threat category: {0}")]
    Unknown(String),
}

impl FromStr for ThreatCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThreatCategory::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .ok_or_else(|| ParseCategoryError::Unknown(s.to_string()))
    }
}

/// Tab selection in the threat library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ThreatCategory),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, category: ThreatCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// Parses a tab value; `"all"` and unknown values both mean `All`.
    #[must_use]
    pub fn from_tab(value: &str) -> Self {
        value
            .parse::<ThreatCategory>()
            .map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatCard {
    pub title: &'static str,
    pub category: ThreatCategory,
    pub summary: &'static str,
}

const THREAT_LIBRARY: [ThreatCard; 8] = [
    ThreatCard {
        title: "Email Phishing",
        category: ThreatCategory::Phishing,
        summary: "Fraudulent emails that impersonate trusted brands to steal credentials.",
    },
    ThreatCard {
        title: "Smishing",
        category: ThreatCategory::Phishing,
        summary: "Text messages about parcels, banks or prizes that link to fake login pages.",
    },
    ThreatCard {
        title: "Ransomware",
        category: ThreatCategory::Malware,
        summary: "Malicious software that encrypts your files and demands payment.",
    },
    ThreatCard {
        title: "Fake Updates",
        category: ThreatCategory::Malware,
        summary: "Pop-ups urging you to install a plugin or security update that is really malware.",
    },
    ThreatCard {
        title: "Pretexting",
        category: ThreatCategory::Social,
        summary: "Attackers invent a believable story to get you to share information.",
    },
    ThreatCard {
        title: "Grandparent Scam",
        category: ThreatCategory::Social,
        summary: "A caller poses as a stranded relative and asks for urgent money.",
    },
    ThreatCard {
        title: "Tax & Refund Fraud",
        category: ThreatCategory::Fraud,
        summary: "Messages claiming to be from tax agencies promising refunds or threatening penalties.",
    },
    ThreatCard {
        title: "Gift Card Scams",
        category: ThreatCategory::Fraud,
        summary: "Requests to pay a fee, fine or prize claim using gift cards.",
    },
];

/// The static threat library.
#[must_use]
pub fn threat_library() -> &'static [ThreatCard] {
    &THREAT_LIBRARY
}

/// Cards visible under `filter`, in library order.
#[must_use]
pub fn filter_threats(cards: &[ThreatCard], filter: CategoryFilter) -> Vec<&ThreatCard> {
    cards
        .iter()
        .filter(|card| filter.matches(card.category))
        .collect()
}
