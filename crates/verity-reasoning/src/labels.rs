use verity_core::config::ReasoningConfig;
use verity_core::models::EvidenceTag;

/// Maps an ordinal truth label to an evidence tag: strictly above the cutoff
/// is true, everything else is fake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPolicy {
    true_label_cutoff: i64,
}

impl LabelPolicy {
    pub fn new(true_label_cutoff: i64) -> Self {
        Self { true_label_cutoff }
    }

    pub fn from_config(config: &ReasoningConfig) -> Self {
        Self::new(config.true_label_cutoff)
    }

    pub fn cutoff(&self) -> i64 {
        self.true_label_cutoff
    }

    pub fn tag(&self, label: i64) -> EvidenceTag {
        if label > self.true_label_cutoff {
            EvidenceTag::SupportsTruth
        } else {
            EvidenceTag::IndicatesFalsehood
        }
    }
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self::from_config(&ReasoningConfig::default())
    }
}
