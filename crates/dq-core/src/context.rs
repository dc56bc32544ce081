use dq_model::PipelineOptions;
use dq_rules::RuleContext;
use dq_standards::{ReferenceRegistry, RuleConfig};
use dq_validate::Validators;

/// Shared, read-only state of a pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineContext<'a> {
    pub rules: RuleContext<'a>,
    pub validators: Validators<'a>,
}

impl<'a> PipelineContext<'a> {
    pub fn new(rules: RuleContext<'a>, validators: Validators<'a>) -> Self {
        Self { rules, validators }
    }

    /// Context over a loaded registry, using its rule configuration.
    pub fn from_registry(registry: &'a ReferenceRegistry, options: &PipelineOptions) -> Self {
        Self::with_rules(registry, &registry.rules, options)
    }

    /// Context over a loaded registry with a rule configuration loaded
    /// from elsewhere.
    pub fn with_rules(
        registry: &'a ReferenceRegistry,
        rules: &'a RuleConfig,
        options: &PipelineOptions,
    ) -> Self {
        Self {
            rules: RuleContext::new(rules, &registry.email_domains),
            validators: Validators::from_registry(registry, options),
        }
    }
}
