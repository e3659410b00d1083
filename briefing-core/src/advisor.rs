use crate::{
    model::{Advisory, CurrentConditions},
    rules::{ConditionRule, RuleTable, TemperatureRule},
};

/// Turns one weather sample into exactly one [`Advisory`].
///
/// Resolution never fails: absent data and unrecognized condition text both
/// produce the table's fallback advisory.
#[derive(Debug, Clone, Copy)]
pub struct WeatherAdvisor<'a> {
    table: &'a RuleTable,
}

impl<'a> WeatherAdvisor<'a> {
    pub fn new(table: &'a RuleTable) -> Self {
        Self { table }
    }

    pub fn resolve(&self, conditions: Option<&CurrentConditions>) -> Advisory {
        let Some(conditions) = conditions else {
            return self.table.fallback().clone();
        };

        let Some(rule) = self.matching_rule(conditions) else {
            tracing::debug!(condition = %conditions.condition_text, "no rule matches condition text");
            return self.table.fallback().clone();
        };

        let mut advisory = rule.advisory.clone();
        if let Some(clause) = first_in_range(self.table.temperatures(), conditions.temperature_f) {
            advisory.phrase = format!("{}. {}", advisory.phrase.trim_end_matches('.'), clause);
        }

        advisory
    }

    /// Whether the condition text matches a rule, i.e. `resolve` would not fall back.
    pub fn recognizes(&self, conditions: &CurrentConditions) -> bool {
        self.matching_rule(conditions).is_some()
    }

    /// Standalone remark to speak after the advisory, if the temperature calls for one.
    pub fn remark(&self, conditions: &CurrentConditions) -> Option<&'a str> {
        first_in_range(self.table.remarks(), conditions.temperature_f)
    }

    fn matching_rule(&self, conditions: &CurrentConditions) -> Option<&'a ConditionRule> {
        let text = conditions.condition_text.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }

        self.table.conditions().iter().find(|rule| rule.matches(&text))
    }
}

fn first_in_range(rules: &[TemperatureRule], temperature_f: f64) -> Option<&str> {
    if !temperature_f.is_finite() {
        return None;
    }

    rules.iter().find(|rule| rule.range.contains(temperature_f)).map(|rule| rule.clause.as_str())
}
