use serde::{Deserialize, Serialize};

use crate::model::ThreatCategory;

//
// ─── KEYWORDS ──────────────────────────────────────────────────────────────────
//

const PHISHING_KEYWORDS: &[&str] = &[
    "urgent",
    "immediately",
    "account suspended",
    "verify your account",
    "password expired",
    "dear customer",
    "click here",
    "bank",
    "paypal",
    "security alert",
    "login",
    "credentials",
    "won prize",
    "lottery",
    "text stop",
    "reply stop",
    "unsubscribe",
    "sms",
    "text message",
    "your package",
    "delivery failed",
    "tracking number",
    "fedex",
    "ups",
    "amazon",
    "netflix",
    "spotify",
    "apple",
    "google",
    "microsoft",
];

const MALWARE_KEYWORDS: &[&str] = &[
    "download",
    "attachment",
    "install",
    "file",
    "software",
    "update",
    "flash player",
    "java",
    "plugin",
    "antivirus",
    "security update",
];

const SOCIAL_KEYWORDS: &[&str] = &[
    "trust me",
    "friend",
    "family",
    "emergency",
    "help",
    "stranded",
    "grandchild",
    "relative",
    "need money",
    "wire transfer",
    "gift cards",
];

const FRAUD_KEYWORDS: &[&str] = &[
    "irs",
    "tax",
    "refund",
    "social security",
    "insurance",
    "medicare",
    "investment",
    "bitcoin",
    "crypto",
    "nigerian prince",
    "inheritance",
    "gift card",
    "itunes",
    "google play",
    "steam",
    "prepaid",
    "call now",
    "text back",
    "reply yes",
    "confirm",
    "verify",
    "suspended",
    "locked",
    "expired",
    "renew",
    "reactivate",
    "congratulations",
    "winner",
    "selected",
    "claim",
    "prize",
];

/// Keywords that raise the score of `category`.
#[must_use]
pub fn keywords(category: ThreatCategory) -> &'static [&'static str] {
    match category {
        ThreatCategory::Phishing => PHISHING_KEYWORDS,
        ThreatCategory::Malware => MALWARE_KEYWORDS,
        ThreatCategory::Social => SOCIAL_KEYWORDS,
        ThreatCategory::Fraud => FRAUD_KEYWORDS,
    }
}

//
// ─── INCREMENTS ────────────────────────────────────────────────────────────────
//

/// Lower bound (inclusive) of a single keyword hit.
pub const MIN_INCREMENT: f64 = 5.0;
/// Upper bound (exclusive) of a single keyword hit.
pub const MAX_INCREMENT: f64 = 10.0;
/// Category and overall scores are capped here.
pub const MAX_SCORE: f64 = 100.0;

/// Supplies the score added for each keyword hit.
///
/// Values should lie in `[MIN_INCREMENT, MAX_INCREMENT)`; the analyzer clamps
/// anything outside that range.
pub trait IncrementSource {
    fn next_increment(&mut self) -> f64;
}

/// Deterministic source that returns the same weight for every hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedIncrement(pub f64);

impl IncrementSource for FixedIncrement {
    fn next_increment(&mut self) -> f64 {
        self.0
    }
}

impl<S: IncrementSource + ?Sized> IncrementSource for &mut S {
    fn next_increment(&mut self) -> f64 {
        (**self).next_increment()
    }
}

impl<S: IncrementSource + ?Sized> IncrementSource for Box<S> {
    fn next_increment(&mut self) -> f64 {
        (**self).next_increment()
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Per-category scores for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub phishing_score: f64,
    pub malware_score: f64,
    pub social_score: f64,
    pub fraud_score: f64,
    pub overall_score: f64,
}

impl AnalysisResult {
    /// Builds a result from category scores, clamping each to `[0, 100]`.
    #[must_use]
    pub fn from_scores(phishing: f64, malware: f64, social: f64, fraud: f64) -> Self {
        let phishing_score = clamp_score(phishing);
        let malware_score = clamp_score(malware);
        let social_score = clamp_score(social);
        let fraud_score = clamp_score(fraud);
        Self {
            phishing_score,
            malware_score,
            social_score,
            fraud_score,
            overall_score: (phishing_score + malware_score + social_score + fraud_score) / 4.0,
        }
    }

    #[must_use]
    pub fn score(&self, category: ThreatCategory) -> f64 {
        match category {
            ThreatCategory::Phishing => self.phishing_score,
            ThreatCategory::Malware => self.malware_score,
            ThreatCategory::Social => self.social_score,
            ThreatCategory::Fraud => self.fraud_score,
        }
    }

    #[must_use]
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_overall(self.overall_score)
    }

    /// Advice for every category above 50, then generic hygiene tips when the
    /// overall score is low.
    #[must_use]
    pub fn recommendations(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        for category in ThreatCategory::ALL {
            if self.score(category) > 50.0 {
                out.extend_from_slice(category_advice(category));
            }
        }
        if self.overall_score < 30.0 {
            out.extend_from_slice(&HYGIENE_ADVICE);
        }
        out
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, MAX_SCORE)
}

//
// ─── RISK BANDS ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// `< 30` is low, `< 70` is medium, everything else is high.
    #[must_use]
    pub fn from_overall(overall: f64) -> Self {
        if overall < 30.0 {
            RiskBand::Low
        } else if overall < 70.0 {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }

    /// Width of the threat meter, in percent.
    #[must_use]
    pub fn meter_width(self) -> u8 {
        match self {
            RiskBand::Low => 20,
            RiskBand::Medium => 50,
            RiskBand::High => 90,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            RiskBand::Low => "risk-low",
            RiskBand::Medium => "risk-medium",
            RiskBand::High => "risk-high",
        }
    }

    #[must_use]
    pub fn advisory(self) -> &'static str {
        match self {
            RiskBand::Low => {
                "This appears to be low risk. However, always exercise caution online."
            }
            RiskBand::Medium => {
                "This shows some suspicious characteristics. Please be cautious and verify the source."
            }
            RiskBand::High => {
                "Warning! This exhibits multiple characteristics of a cyber threat. Do not engage further."
            }
        }
    }
}

//
// ─── RECOMMENDATIONS ───────────────────────────────────────────────────────────
//

const PHISHING_ADVICE: [&str; 3] = [
    "Do not click any links in the message",
    "Verify the sender's email address carefully",
    "Contact the organization directly using official channels",
];

const MALWARE_ADVICE: [&str; 3] = [
    "Do not download any attachments",
    "Ensure your antivirus software is up to date",
    "Scan your system for malware",
];

const SOCIAL_ADVICE: [&str; 3] = [
    "Verify the identity of the person contacting you",
    "Be cautious of emotional manipulation tactics",
    "Never send money to unverified contacts",
];

const FRAUD_ADVICE: [&str; 3] = [
    "Do not provide any personal or financial information",
    "Report this to the appropriate authorities if applicable",
    "Monitor your accounts for suspicious activity",
];

const HYGIENE_ADVICE: [&str; 3] = [
    "While this appears safe, always practice good cyber hygiene",
    "Keep your software updated",
    "Use unique passwords for different accounts",
];

fn category_advice(category: ThreatCategory) -> &'static [&'static str] {
    match category {
        ThreatCategory::Phishing => &PHISHING_ADVICE,
        ThreatCategory::Malware => &MALWARE_ADVICE,
        ThreatCategory::Social => &SOCIAL_ADVICE,
        ThreatCategory::Fraud => &FRAUD_ADVICE,
    }
}

//
// ─── ANALYZER ──────────────────────────────────────────────────────────────────
//

/// Keyword heuristic that scores free text against the four threat families.
///
/// Matching is case-insensitive substring search. Every keyword found adds one
/// increment from the injected source to its category, so a randomized source
/// yields different scores for the same text.
///
/// # Examples
///
/// ```
/// # use cybersafe_core::analyzer::{analyze, FixedIncrement, RiskBand};
/// let result = analyze("URGENT: verify your account at PayPal", &mut FixedIncrement(5.0));
/// assert!(result.phishing_score > 0.0);
/// assert_eq!(result.risk_band(), RiskBand::Low);
/// ```
pub fn analyze(text: &str, increments: &mut impl IncrementSource) -> AnalysisResult {
    let lowered = text.to_lowercase();
    let mut scores = [0.0_f64; 4];
    for (slot, category) in scores.iter_mut().zip(ThreatCategory::ALL) {
        for keyword in keywords(category) {
            if lowered.contains(keyword) {
                *slot += increments
                    .next_increment()
                    .clamp(MIN_INCREMENT, MAX_INCREMENT);
            }
        }
    }
    AnalysisResult::from_scores(scores[0], scores[1], scores[2], scores[3])
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
