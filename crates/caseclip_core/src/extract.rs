use regex::Regex;

/// Identifiers pulled out of one clipboard snippet. Both fields are optional
/// and independent; a snippet is only worth saving when at least one is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseIds {
    /// 9-digit incident number following an `ICM` token.
    pub icm_id: Option<String>,
    /// 13+-digit support case number following a known label.
    pub case_id: Option<String>,
}

impl CaseIds {
    /// True when at least one identifier was found.
    pub fn is_actionable(&self) -> bool {
        self.icm_id.is_some() || self.case_id.is_some()
    }
}

/// Regex-based extractor for case identifiers.
///
/// Case numbers are matched only after a known label ("Support Request
/// Number:", "Case", "CRI"). Standalone digit runs are deliberately not
/// matched: long numbers occur in unrelated text too often.
#[derive(Debug)]
pub struct CaseIdExtractor {
    icm: Regex,
    case_labels: Vec<Regex>,
}

impl CaseIdExtractor {
    pub fn new() -> Self {
        // `.` does not cross newlines, so the digits must share a line with
        // the ICM token.
        let icm = Regex::new(r"(?i)ICM.*?(\d{9})").expect("icm pattern is valid");
        // Tried in priority order; the first pattern with a match wins.
        let case_labels = [
            r"(?i)Support Request Number:\s*(\d{13,})",
            r"(?i)Case[:\s#]*(\d{13,})",
            r"(?i)CRI[:\s]*(\d{13,})",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("case pattern is valid"))
        .collect();
        Self { icm, case_labels }
    }

    /// Pure function of the input text; leftmost match wins per pattern and
    /// at most one identifier of each kind is returned.
    pub fn extract(&self, text: &str) -> CaseIds {
        let icm_id = self
            .icm
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        let case_id = self.case_labels.iter().find_map(|pattern| {
            pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        });

        CaseIds { icm_id, case_id }
    }
}

impl Default for CaseIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}
