//! Ordered predicate/action rule chains.
//!
//! Both the classifier and the normalizer are priority engines: several rules
//! could apply to the same token and only the first match counts. A
//! [`RuleChain`] makes that order an explicit, inspectable value instead of a
//! nest of conditionals.
//!
//! ```text
//! token ──▶ rule 1? ──no──▶ rule 2? ──no──▶ ... ──▶ fallback
//!             │yes            │yes
//!             ▼               ▼
//!          action 1        action 2
//! ```

use std::fmt;

use crate::analysis::config::NormalizationConfig;
use crate::analysis::token::Token;

/// Predicate deciding whether a rule applies to a token.
pub type Condition = fn(&Token, &NormalizationConfig) -> bool;

/// Action producing the rule's outcome for a token it applies to.
pub type Action<O> = fn(&Token, &NormalizationConfig) -> O;

/// A named predicate/action pair.
pub struct Rule<O> {
    name: &'static str,
    condition: Condition,
    action: Action<O>,
}

impl<O> Rule<O> {
    /// Create a new rule.
    pub const fn new(name: &'static str, condition: Condition, action: Action<O>) -> Self {
        Rule {
            name,
            condition,
            action,
        }
    }

    /// Get the name of this rule.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the rule applies to the token.
    pub fn applies(&self, token: &Token, config: &NormalizationConfig) -> bool {
        (self.condition)(token, config)
    }

    /// Run the rule's action.
    pub fn apply(&self, token: &Token, config: &NormalizationConfig) -> O {
        (self.action)(token, config)
    }
}

impl<O> Clone for Rule<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for Rule<O> {}

impl<O> fmt::Debug for Rule<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The outcome of a rule chain together with the rule that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleMatch<O> {
    pub rule: &'static str,
    pub outcome: O,
}

/// An ordered list of rules evaluated until the first match.
///
/// The chain always ends with an unconditional fallback, so evaluation never
/// comes up empty.
pub struct RuleChain<O> {
    rules: Vec<Rule<O>>,
    fallback: Rule<O>,
}

impl<O> RuleChain<O> {
    /// Create a chain that yields `fallback` when nothing matches.
    pub fn new(name: &'static str, fallback: Action<O>) -> Self {
        RuleChain {
            rules: Vec::new(),
            fallback: Rule::new(name, always, fallback),
        }
    }

    /// Append a rule with lower priority than every rule added before it.
    pub fn then(mut self, rule: Rule<O>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Evaluate the chain, returning the first matching rule's outcome.
    pub fn evaluate(&self, token: &Token, config: &NormalizationConfig) -> RuleMatch<O> {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.applies(token, config))
            .unwrap_or(&self.fallback);

        RuleMatch {
            rule: rule.name(),
            outcome: rule.apply(token, config),
        }
    }

    /// Rule names in priority order, fallback last.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .chain(std::iter::once(&self.fallback))
            .map(Rule::name)
            .collect()
    }

    /// Number of rules including the fallback.
    pub fn len(&self) -> usize {
        self.rules.len() + 1
    }

    /// Always false: the fallback rule is always present.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<O> fmt::Debug for RuleChain<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}

fn always(_: &Token, _: &NormalizationConfig) -> bool {
    true
}
