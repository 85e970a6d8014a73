pub mod alert_rules;
pub mod severity;
pub mod tone;

pub use alert_rules::AlertRules;
pub use severity::Severity;
pub use tone::Tone;
