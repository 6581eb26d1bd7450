use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementFlags {
    pub smooth: bool,
    pub asymmetric: bool,
    pub consistent_edges: bool,
    pub unnatural: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    AiGenerated,
    NotAiGenerated,
}

impl Verdict {
    pub fn is_ai_generated(&self) -> bool {
        matches!(self, Verdict::AiGenerated)
    }

    pub fn as_yes_no(&self) -> &'static str {
        yes_no(self.is_ai_generated())
    }
}

// Asymmetry is reported but is not part of the rule.
pub fn decide(flags: &MeasurementFlags) -> Verdict {
    if flags.smooth || !flags.consistent_edges || flags.unnatural {
        Verdict::AiGenerated
    } else {
        Verdict::NotAiGenerated
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
