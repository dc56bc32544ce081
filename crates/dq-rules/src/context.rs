use dq_standards::{DomainAllowList, RuleConfig};

/// Read-only inputs of every detector and corrector.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub rules: &'a RuleConfig,
    /// Common email domains; a domain outside the list raises `2110`.
    pub email_domains: &'a DomainAllowList,
}

impl<'a> RuleContext<'a> {
    pub fn new(rules: &'a RuleConfig, email_domains: &'a DomainAllowList) -> Self {
        Self {
            rules,
            email_domains,
        }
    }
}
