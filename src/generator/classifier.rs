use super::segmenter::{Clause, ClauseRole};
use crate::catalog::{NodeCatalog, NodeTypeDescriptor, TriggerKind};
use crate::error::GenerationError;
use crate::text::contains_keyword;
use tracing::{debug, warn};

/// The test a rule applies to a lower-cased clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Matches when any keyword occurs on word boundaries. Returns the first
    /// keyword, in declaration order, that does.
    AnyKeyword(&'static [&'static str]),
}

impl Predicate {
    pub fn evaluate(&self, lowered: &str) -> Option<&'static str> {
        match self {
            Predicate::AnyKeyword(keywords) => keywords
                .iter()
                .copied()
                .find(|keyword| contains_keyword(lowered, keyword)),
        }
    }
}

/// A `(predicate, descriptor)` pair. Rules are evaluated top to bottom and
/// the first match wins, so rule order is part of the output contract.
#[derive(Debug, Clone, Copy)]
pub struct Rule<'c> {
    pub predicate: Predicate,
    pub descriptor: &'c NodeTypeDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Trigger(TriggerKind),
    Action,
}

/// A clause paired with the node type it resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedIntent<'c> {
    pub kind: IntentKind,
    pub descriptor: &'c NodeTypeDescriptor,
    /// The keyword that selected the descriptor; `None` for the fallback node.
    pub extracted_label: Option<&'static str>,
    pub clause: Clause,
}

impl ResolvedIntent<'_> {
    pub fn is_fallback(&self) -> bool {
        self.extracted_label.is_none()
    }
}

/// Resolves clauses against the catalog's trigger and action rule lists.
#[derive(Debug, Clone)]
pub struct IntentClassifier<'c> {
    trigger_rules: Vec<Rule<'c>>,
    action_rules: Vec<Rule<'c>>,
    fallback: &'c NodeTypeDescriptor,
}

impl<'c> IntentClassifier<'c> {
    pub fn new(catalog: &'c NodeCatalog) -> Self {
        let to_rule = |descriptor: &'c NodeTypeDescriptor| Rule {
            predicate: Predicate::AnyKeyword(descriptor.match_keywords),
            descriptor,
        };
        Self {
            trigger_rules: catalog.triggers().map(to_rule).collect(),
            action_rules: catalog.actions().map(to_rule).collect(),
            fallback: catalog.fallback(),
        }
    }

    pub fn trigger_rules(&self) -> &[Rule<'c>] {
        &self.trigger_rules
    }

    pub fn action_rules(&self) -> &[Rule<'c>] {
        &self.action_rules
    }

    /// Classifies a single clause according to its role.
    ///
    /// An action clause that matches nothing becomes the fallback node; a
    /// trigger clause that matches nothing fails with `UnresolvedTrigger`.
    pub fn classify(&self, clause: &Clause) -> Result<ResolvedIntent<'c>, GenerationError> {
        let lowered = clause.text.to_lowercase();
        match clause.role {
            ClauseRole::Trigger => {
                let (rule, keyword) = Self::first_match(&self.trigger_rules, &lowered)
                    .ok_or_else(|| GenerationError::UnresolvedTrigger {
                        clause: Some(clause.text.clone()),
                    })?;
                let kind = rule.descriptor.trigger_kind().unwrap_or(TriggerKind::Event);
                debug!(clause = %clause.text, node = rule.descriptor.label, keyword, "resolved trigger");
                Ok(ResolvedIntent {
                    kind: IntentKind::Trigger(kind),
                    descriptor: rule.descriptor,
                    extracted_label: Some(keyword),
                    clause: clause.clone(),
                })
            }
            ClauseRole::Action => match Self::first_match(&self.action_rules, &lowered) {
                Some((rule, keyword)) => {
                    debug!(clause = %clause.text, node = rule.descriptor.label, keyword, "resolved action");
                    Ok(ResolvedIntent {
                        kind: IntentKind::Action,
                        descriptor: rule.descriptor,
                        extracted_label: Some(keyword),
                        clause: clause.clone(),
                    })
                }
                None => {
                    warn!(clause = %clause.text, fallback = self.fallback.label, "no rule matched action clause");
                    Ok(ResolvedIntent {
                        kind: IntentKind::Action,
                        descriptor: self.fallback,
                        extracted_label: None,
                        clause: clause.clone(),
                    })
                }
            },
        }
    }

    /// Classifies every clause, failing fast on the first unresolved trigger.
    pub fn classify_all(
        &self,
        clauses: &[Clause],
    ) -> Result<Vec<ResolvedIntent<'c>>, GenerationError> {
        if clauses.is_empty() {
            return Err(GenerationError::UnresolvedTrigger { clause: None });
        }
        clauses.iter().map(|clause| self.classify(clause)).collect()
    }

    fn first_match<'r>(
        rules: &'r [Rule<'c>],
        lowered: &str,
    ) -> Option<(&'r Rule<'c>, &'static str)> {
        rules
            .iter()
            .find_map(|rule| rule.predicate.evaluate(lowered).map(|keyword| (rule, keyword)))
    }
}
