use std::collections::HashMap;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use crate::errors::ReportError;
use crate::models::{AggregatedReport, Report, ReportType};
use crate::utils::time::format_timestamp;
use super::Database;

/// Stays well below SQLite's bound-parameter limit (32766).
const MAX_IDS_PER_QUERY: usize = 10_000;

impl Database {
    pub fn get_report(&self, id: &str) -> Result<Option<Report>, ReportError> {
        let data = {
            let conn = self.lock()?;
            report_data_row(&conn, "SELECT report_data FROM reports WHERE report_id = ?1", id)?
        };
        data.as_deref().map(decode).transpose()
    }

    /// Looks up an aggregated report; single reports with the same id are
    /// treated as missing.
    pub fn get_aggregated_report(&self, id: &str) -> Result<Option<AggregatedReport>, ReportError> {
        let data = {
            let conn = self.lock()?;
            report_data_row(
                &conn,
                "SELECT report_data FROM reports WHERE report_id = ?1 AND report_type = 'AGGREGATED'",
                id,
            )?
        };
        data.as_deref().map(decode).transpose()
    }

    /// Fetches the reports with the given ids, in the order the ids were
    /// given. Unknown ids are skipped.
    pub fn get_reports(&self, ids: &[String]) -> Result<Vec<Report>, ReportError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::new();
        {
            let conn = self.lock()?;
            for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
                let placeholders = (1..=chunk.len()).map(|i| format!("?{}", i)).collect::<Vec<_>>().join(", ");
                let sql = format!("SELECT report_data FROM reports WHERE report_id IN ({})", placeholders);
                rows.extend(report_data_rows(&conn, &sql, rusqlite::params_from_iter(chunk.iter()))?);
            }
        }

        let positions: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .rev()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let mut found: Vec<Report> = rows.iter().map(|data| decode(data)).collect::<Result<_, _>>()?;
        found.sort_by_key(|r| positions.get(r.report_id.as_str()).copied());
        Ok(found)
    }

    /// Reports of `report_type` last changed within `[start, end]`.
    pub fn get_reports_by_date_range(
        &self,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
        report_type: ReportType,
    ) -> Result<Vec<Report>, ReportError> {
        let rows = {
            let conn = self.lock()?;
            report_data_rows(
                &conn,
                "SELECT report_data FROM reports WHERE report_type = ?1 AND last_changed >= ?2 AND last_changed <= ?3 ORDER BY last_changed",
                rusqlite::params![report_type.as_str(), format_timestamp(start), format_timestamp(end)],
            )?
        };
        rows.iter().map(|data| decode(data)).collect()
    }

    pub fn list_reports(&self) -> Result<Vec<Report>, ReportError> {
        let rows = {
            let conn = self.lock()?;
            report_data_rows(&conn, "SELECT report_data FROM reports ORDER BY created", [])?
        };
        rows.iter().map(|data| decode(data)).collect()
    }

    pub fn upsert_report_returning(&self, report: &Report) -> Result<Report, ReportError> {
        self.write_report(report, serde_json::to_string(report)?)?;
        self.get_report(&report.report_id)?
            .ok_or_else(|| ReportError::Internal(format!("Report {} vanished after upsert", report.report_id)))
    }

    pub fn upsert_aggregated_report_returning(
        &self,
        report: &AggregatedReport,
    ) -> Result<AggregatedReport, ReportError> {
        self.write_report(&report.report, serde_json::to_string(report)?)?;
        self.get_aggregated_report(report.report_id())?
            .ok_or_else(|| ReportError::Internal(format!("Report {} vanished after upsert", report.report_id())))
    }

    pub fn delete_report(&self, id: &str) -> Result<bool, ReportError> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM reports WHERE report_id = ?1", rusqlite::params![id])
            .map_err(|e| ReportError::Database(format!("Delete failed: {}", e)))?;
        Ok(affected > 0)
    }

    fn write_report(&self, report: &Report, data: String) -> Result<(), ReportError> {
        let conn = self.lock()?;
        // The type column is never overwritten; a mismatching upsert changes no rows.
        let affected = conn.execute(
            "INSERT INTO reports (report_id, url, descriptive_name, report_type, organization_unit_id, created, last_changed, report_data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(report_id) DO UPDATE SET
                url = excluded.url,
                descriptive_name = excluded.descriptive_name,
                organization_unit_id = excluded.organization_unit_id,
                last_changed = excluded.last_changed,
                report_data = excluded.report_data
             WHERE reports.report_type = excluded.report_type",
            rusqlite::params![
                report.report_id,
                report.url,
                report.descriptive_name,
                report.report_type.as_str(),
                report.organization_unit.as_ref().map(|o| o.id.as_str()),
                format_timestamp(&report.created),
                format_timestamp(&report.last_changed),
                data,
            ],
        ).map_err(|e| ReportError::Database(format!("Upsert failed: {}", e)))?;

        if affected == 0 {
            return Err(ReportError::BadRequest(format!(
                "Report {} already exists with a different report type than {}",
                report.report_id, report.report_type
            )));
        }
        Ok(())
    }
}

fn report_data_row(conn: &Connection, sql: &str, id: &str) -> Result<Option<String>, ReportError> {
    let mut stmt = conn.prepare(sql)
        .map_err(|e| ReportError::Database(format!("Query failed: {}", e)))?;

    match stmt.query_row(rusqlite::params![id], |row: &rusqlite::Row| row.get::<_, String>(0)) {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(ReportError::Database(format!("Query error: {}", e))),
    }
}

fn report_data_rows<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<String>, ReportError> {
    let mut stmt = conn.prepare(sql)
        .map_err(|e| ReportError::Database(format!("Query failed: {}", e)))?;

    let rows = stmt.query_map(params, |row: &rusqlite::Row| row.get::<_, String>(0))
        .map_err(|e| ReportError::Database(format!("Query error: {}", e)))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| ReportError::Database(format!("Row error: {}", e)))?);
    }
    Ok(results)
}

fn decode<T: DeserializeOwned>(data: &str) -> Result<T, ReportError> {
    serde_json::from_str(data)
        .map_err(|e| ReportError::Database(format!("Stored report is not valid: {}", e)))
}
