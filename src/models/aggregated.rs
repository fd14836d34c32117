use serde::{Deserialize, Serialize};
use crate::auth::User;
use crate::utils::time;
use super::criteria::{aggregate_criteria, apply_updates};
use super::organization::OrganizationUnit;
use super::patch::Patch;
use super::report::{Author, Report, ReportSummary, ReportType};
use super::requests::AggregatedReportChanges;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedReport {
    #[serde(flatten)]
    pub report: Report,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub from_reports: Vec<ReportSummary>,
}

impl AggregatedReport {
    /// Assembles a new aggregated report from already validated sources.
    pub fn build(
        url: String,
        descriptive_name: String,
        organization_unit: Option<OrganizationUnit>,
        sources: &[Report],
        user: &User,
        notes: String,
    ) -> Self {
        let now = time::now();
        Self {
            report: Report {
                report_id: uuid::Uuid::new_v4().to_string(),
                url,
                descriptive_name: Some(descriptive_name),
                report_type: ReportType::Aggregated,
                organization_unit,
                author: Author::from(user),
                created: now,
                last_changed: now,
                last_updated_by: None,
                success_criteria: aggregate_criteria(sources),
            },
            notes,
            from_reports: sources.iter().map(Report::summary).collect(),
        }
    }

    pub fn report_id(&self) -> &str {
        &self.report.report_id
    }

    /// Merges `changes` field by field; anything not set is kept as is.
    pub fn updated_with(mut self, changes: AggregatedReportChanges, user: &User) -> Self {
        changes.descriptive_name.map(Some).apply_to(&mut self.report.descriptive_name);
        changes.url.apply_to(&mut self.report.url);
        changes.notes.apply_to(&mut self.notes);
        changes.organization_unit.apply_to(&mut self.report.organization_unit);
        if let Patch::Set(updates) = changes.success_criteria {
            apply_updates(&mut self.report.success_criteria, updates);
        }
        self.report.touch(user);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::user::tests::test_user;
    use crate::models::criteria::tests::criterion;
    use crate::models::criteria::Status;
    use crate::models::requests::AggregatedReportUpdateRequest;

    fn source(name: &str, criteria: Vec<crate::models::SuccessCriterion>) -> Report {
        let user = test_user("tester@example.com", false);
        let team = OrganizationUnit::create_new("Team Web", None);
        Report::new_single(format!("https://{}.example.com", name), Some(name.to_string()), Some(team), &user, criteria)
    }

    fn built() -> AggregatedReport {
        let admin = test_user("admin@example.com", true);
        let sources = vec![
            source("a", vec![criterion("1.1.1", Status::Compliant), criterion("1.4.3", Status::NonCompliant)]),
            source("b", vec![criterion("1.1.1", Status::NotApplicable), criterion("2.1.1", Status::Compliant)]),
        ];
        AggregatedReport::build(
            "https://example.com".into(),
            "Samlerapport".into(),
            None,
            &sources,
            &admin,
            "first pass".into(),
        )
    }

    #[test]
    fn test_build_sets_type_and_snapshots_sources() {
        let report = built();
        assert_eq!(report.report.report_type, ReportType::Aggregated);
        assert_eq!(report.report.created, report.report.last_changed);
        assert_eq!(report.report.author.email, "admin@example.com");
        assert_eq!(report.from_reports.len(), 2);
        assert_eq!(report.from_reports[0].descriptive_name.as_deref(), Some("a"));
        assert_eq!(report.from_reports[1].organization_unit_name.as_deref(), Some("Team Web"));
        assert_eq!(report.notes, "first pass");
    }

    #[test]
    fn test_build_aggregates_criteria_in_first_seen_order() {
        let report = built();
        let numbers: Vec<&str> = report.report.success_criteria.iter().map(|c| c.number.as_str()).collect();
        assert_eq!(numbers, vec!["1.1.1", "1.4.3", "2.1.1"]);
        assert_eq!(report.report.success_criteria[0].status, Status::Compliant);
        assert_eq!(report.report.success_criteria[1].status, Status::NonCompliant);
    }

    #[test]
    fn test_update_only_notes_keeps_everything_else() {
        let original = built();
        let editor = test_user("editor@example.com", true);
        let request: AggregatedReportUpdateRequest = serde_json::from_str(r#"{"notes": "revised"}"#).unwrap();

        let updated = original.clone().updated_with(request.into_changes(Patch::Absent), &editor);

        assert_eq!(updated.notes, "revised");
        assert!(updated.report.last_changed > original.report.last_changed);
        assert_eq!(updated.report.last_updated_by.as_ref().map(|a| a.email.as_str()), Some("editor@example.com"));

        let mut expected = original.clone();
        expected.notes = updated.notes.clone();
        expected.report.last_changed = updated.report.last_changed;
        expected.report.last_updated_by = updated.report.last_updated_by.clone();
        assert_eq!(updated, expected);
    }

    #[test]
    fn test_update_overwrites_present_fields() {
        let original = built();
        let editor = test_user("editor@example.com", true);
        let request: AggregatedReportUpdateRequest = serde_json::from_str(
            r#"{"descriptiveName": "Ny tittel", "url": "https://new.example.com",
                "successCriteria": [{"number": "2.1.1", "status": "NON_COMPLIANT"}]}"#,
        ).unwrap();
        let team = OrganizationUnit::create_new("Team Design", None);

        let updated = original.updated_with(request.into_changes(Patch::Set(Some(team.clone()))), &editor);

        assert_eq!(updated.report.descriptive_name.as_deref(), Some("Ny tittel"));
        assert_eq!(updated.report.url, "https://new.example.com");
        assert_eq!(updated.report.organization_unit, Some(team));
        assert_eq!(updated.report.success_criteria[2].status, Status::NonCompliant);
        assert_eq!(updated.notes, "first pass");
    }

    #[test]
    fn test_update_with_unknown_team_clears_unit() {
        let team = OrganizationUnit::create_new("Team Web", None);
        let mut original = built();
        original.report.organization_unit = Some(team);
        let editor = test_user("editor@example.com", true);

        let updated = original.updated_with(
            AggregatedReportUpdateRequest::default().into_changes(Patch::Set(None)),
            &editor,
        );

        assert!(updated.report.organization_unit.is_none());
    }

    #[test]
    fn test_json_flattens_report_fields() {
        let report = built();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["reportType"], "AGGREGATED");
        assert_eq!(json["notes"], "first pass");
        assert_eq!(json["fromReports"].as_array().unwrap().len(), 2);

        let back: AggregatedReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
