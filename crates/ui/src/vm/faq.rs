#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ_ITEMS: [FaqItem; 4] = [
    FaqItem {
        question: "What is phishing?",
        answer: "Phishing is a message that pretends to come from someone you trust so you will click a link, open a file or hand over credentials.",
    },
    FaqItem {
        question: "How can I tell if a link is safe?",
        answer: "Hover to preview the real address, check the domain spelling, and when in doubt open the site yourself instead of using the link.",
    },
    FaqItem {
        question: "Why do scammers ask for gift cards?",
        answer: "Gift cards are hard to trace and easy to resell. No legitimate agency or company asks to be paid with them.",
    },
    FaqItem {
        question: "What should I do if I clicked a suspicious link?",
        answer: "Disconnect, change the affected passwords from a trusted device, enable multi-factor authentication and watch your accounts for unusual activity.",
    },
];

/// `+` when collapsed, `-` when expanded.
#[must_use]
pub fn toggle_marker(open: bool) -> &'static str {
    if open { "-" } else { "+" }
}
