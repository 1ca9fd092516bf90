/// Rough classification of a case snippet, recorded in the metadata sibling
/// file. First matching class wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    ErrorInformation,
    CriticalInformation,
    ResolutionInformation,
    ProblemDescription,
    CustomerInformation,
    TemporalInformation,
    ConfigurationInformation,
    GeneralInformation,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::ErrorInformation => "error_information",
            ContentType::CriticalInformation => "critical_information",
            ContentType::ResolutionInformation => "resolution_information",
            ContentType::ProblemDescription => "problem_description",
            ContentType::CustomerInformation => "customer_information",
            ContentType::TemporalInformation => "temporal_information",
            ContentType::ConfigurationInformation => "configuration_information",
            ContentType::GeneralInformation => "general_information",
        }
    }
}

/// Priority bucket derived from keyword hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
    Normal,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
            PriorityLevel::Normal => "normal",
        }
    }
}

/// Signals derived from the snippet body, written to metadata only. They
/// never influence whether a save happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSignals {
    pub content_type: ContentType,
    pub priority: PriorityLevel,
    pub contains_incident: bool,
    pub contains_critical: bool,
    pub contains_support: bool,
}

/// Pure keyword scan over the lowercased text.
pub fn analyze(text: &str) -> ContentSignals {
    let lower = text.to_lowercase();
    ContentSignals {
        content_type: classify_content_type(&lower),
        priority: determine_priority(&lower),
        contains_incident: lower.contains("incident"),
        contains_critical: lower.contains("critical"),
        contains_support: lower.contains("support"),
    }
}

fn classify_content_type(lower: &str) -> ContentType {
    const CLASSES: &[(&[&str], ContentType)] = &[
        (
            &["error", "exception", "failed", "failure"],
            ContentType::ErrorInformation,
        ),
        (
            &["critical", "urgent", "emergency"],
            ContentType::CriticalInformation,
        ),
        (
            &["resolution", "solution", "fix", "resolved"],
            ContentType::ResolutionInformation,
        ),
        (
            &["symptom", "issue", "problem"],
            ContentType::ProblemDescription,
        ),
        (
            &["customer", "client", "user"],
            ContentType::CustomerInformation,
        ),
        (
            &["timeline", "schedule", "date", "time"],
            ContentType::TemporalInformation,
        ),
        (
            &["configuration", "settings", "setup"],
            ContentType::ConfigurationInformation,
        ),
    ];

    for (keywords, content_type) in CLASSES {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *content_type;
        }
    }
    ContentType::GeneralInformation
}

fn determine_priority(lower: &str) -> PriorityLevel {
    const BUCKETS: &[(&[&str], PriorityLevel)] = &[
        (
            &["critical", "urgent", "emergency", "outage", "down", "failed"],
            PriorityLevel::High,
        ),
        (
            &["important", "significant", "major", "escalation"],
            PriorityLevel::Medium,
        ),
        (
            &["minor", "cosmetic", "enhancement", "suggestion"],
            PriorityLevel::Low,
        ),
    ];

    for (keywords, priority) in BUCKETS {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *priority;
        }
    }
    PriorityLevel::Normal
}
