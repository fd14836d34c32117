use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use super::patch::Patch;
use super::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Compliant,
    NonCompliant,
    NotApplicable,
    NotTested,
}

impl Status {
    /// Combined status of one criterion across several reports.
    ///
    /// Any failure wins, then any gap in testing; a criterion is only
    /// not applicable when it is not applicable everywhere.
    pub fn aggregate(statuses: &[Status]) -> Status {
        if statuses.contains(&Status::NonCompliant) {
            Status::NonCompliant
        } else if statuses.is_empty() || statuses.contains(&Status::NotTested) {
            Status::NotTested
        } else if statuses.iter().all(|s| *s == Status::NotApplicable) {
            Status::NotApplicable
        } else {
            Status::Compliant
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Compliant => "COMPLIANT",
            Status::NonCompliant => "NON_COMPLIANT",
            Status::NotApplicable => "NOT_APPLICABLE",
            Status::NotTested => "NOT_TESTED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WcagLevel {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessCriterion {
    pub number: String,
    pub name: String,
    #[serde(default)]
    pub principle: String,
    pub wcag_level: WcagLevel,
    pub status: Status,
    #[serde(default)]
    pub breaking_the_law: String,
    #[serde(default)]
    pub law_does_not_apply: String,
    #[serde(default)]
    pub too_hard_to_comply: String,
}

/// Changes to one criterion, matched by `number`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessCriterionUpdate {
    pub number: String,
    #[serde(default)]
    pub status: Patch<Status>,
    #[serde(default)]
    pub breaking_the_law: Patch<String>,
    #[serde(default)]
    pub law_does_not_apply: Patch<String>,
    #[serde(default)]
    pub too_hard_to_comply: Patch<String>,
}

impl SuccessCriterion {
    pub fn apply(&mut self, update: SuccessCriterionUpdate) {
        update.status.apply_to(&mut self.status);
        update.breaking_the_law.apply_to(&mut self.breaking_the_law);
        update.law_does_not_apply.apply_to(&mut self.law_does_not_apply);
        update.too_hard_to_comply.apply_to(&mut self.too_hard_to_comply);
    }
}

/// Applies updates to the criteria with a matching number. Updates for
/// numbers the report does not carry are dropped.
pub fn apply_updates(criteria: &mut [SuccessCriterion], updates: Vec<SuccessCriterionUpdate>) {
    for update in updates {
        if let Some(criterion) = criteria.iter_mut().find(|c| c.number == update.number) {
            criterion.apply(update);
        }
    }
}

/// Folds the criteria of several reports into one list, keyed by number in
/// first-seen order.
pub fn aggregate_criteria(reports: &[Report]) -> Vec<SuccessCriterion> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&SuccessCriterion>> = HashMap::new();

    for criterion in reports.iter().flat_map(|r| r.success_criteria.iter()) {
        let entry = grouped.entry(criterion.number.as_str()).or_default();
        if entry.is_empty() {
            order.push(criterion.number.as_str());
        }
        entry.push(criterion);
    }

    order
        .into_iter()
        .filter_map(|number| grouped.get(number))
        .map(|group| merge_group(group))
        .collect()
}

fn merge_group(group: &[&SuccessCriterion]) -> SuccessCriterion {
    let first = group[0];
    let statuses: Vec<Status> = group.iter().map(|c| c.status).collect();
    SuccessCriterion {
        number: first.number.clone(),
        name: first.name.clone(),
        principle: first.principle.clone(),
        wcag_level: first.wcag_level,
        status: Status::aggregate(&statuses),
        breaking_the_law: join_distinct(group.iter().map(|c| c.breaking_the_law.as_str())),
        law_does_not_apply: join_distinct(group.iter().map(|c| c.law_does_not_apply.as_str())),
        too_hard_to_comply: join_distinct(group.iter().map(|c| c.too_hard_to_comply.as_str())),
    }
}

fn join_distinct<'a>(texts: impl Iterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for text in texts.map(str::trim).filter(|t| !t.is_empty()) {
        if !seen.contains(&text) {
            seen.push(text);
        }
    }
    seen.join("\n")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn criterion(number: &str, status: Status) -> SuccessCriterion {
        SuccessCriterion {
            number: number.to_string(),
            name: format!("Criterion {}", number),
            principle: "perceivable".to_string(),
            wcag_level: WcagLevel::A,
            status,
            breaking_the_law: String::new(),
            law_does_not_apply: String::new(),
            too_hard_to_comply: String::new(),
        }
    }

    #[test]
    fn test_status_aggregate_precedence() {
        use Status::*;
        assert_eq!(Status::aggregate(&[Compliant, NonCompliant, NotTested]), NonCompliant);
        assert_eq!(Status::aggregate(&[Compliant, NotTested]), NotTested);
        assert_eq!(Status::aggregate(&[NotApplicable, NotApplicable]), NotApplicable);
        assert_eq!(Status::aggregate(&[NotApplicable, Compliant]), Compliant);
        assert_eq!(Status::aggregate(&[]), NotTested);
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&Status::NonCompliant).unwrap();
        assert_eq!(json, "\"NON_COMPLIANT\"");
        let level: WcagLevel = serde_json::from_str("\"AA\"").unwrap();
        assert_eq!(level, WcagLevel::Aa);
    }

    #[test]
    fn test_apply_updates_matches_by_number() {
        let mut criteria = vec![criterion("1.1.1", Status::NotTested), criterion("1.4.3", Status::NotTested)];
        let updates: Vec<SuccessCriterionUpdate> = serde_json::from_str(
            r#"[{"number": "1.4.3", "status": "NON_COMPLIANT", "breakingTheLaw": "low contrast"},
                {"number": "9.9.9", "status": "COMPLIANT"}]"#,
        ).unwrap();

        apply_updates(&mut criteria, updates);

        assert_eq!(criteria[0].status, Status::NotTested);
        assert_eq!(criteria[1].status, Status::NonCompliant);
        assert_eq!(criteria[1].breaking_the_law, "low contrast");
        assert_eq!(criteria[1].law_does_not_apply, "");
    }

    #[test]
    fn test_join_distinct_skips_blank_and_duplicates() {
        let joined = join_distinct(["a", " ", "b", "a "].into_iter());
        assert_eq!(joined, "a\nb");
    }
}
