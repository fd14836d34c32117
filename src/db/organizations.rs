use crate::errors::ReportError;
use crate::models::OrganizationUnit;
use crate::utils::time::{format_timestamp, now};
use super::Database;

impl Database {
    pub fn get_organization_unit(&self, id: &str) -> Result<Option<OrganizationUnit>, ReportError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, email FROM organization_units WHERE id = ?1")
            .map_err(|e| ReportError::Database(format!("Query failed: {}", e)))?;

        let result = stmt.query_row(rusqlite::params![id], |row: &rusqlite::Row| {
            Ok(OrganizationUnit {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        });

        match result {
            Ok(unit) => Ok(Some(unit)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(ReportError::Database(format!("Query error: {}", e))),
        }
    }

    pub fn list_organization_units(&self) -> Result<Vec<OrganizationUnit>, ReportError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, email FROM organization_units ORDER BY name")
            .map_err(|e| ReportError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], |row: &rusqlite::Row| {
            Ok(OrganizationUnit {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        }).map_err(|e| ReportError::Database(format!("Query error: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| ReportError::Database(format!("Row error: {}", e)))?);
        }
        Ok(results)
    }

    /// Inserts a new unit. Returns `false` when the id is already taken.
    pub fn create_organization_unit(&self, unit: &OrganizationUnit) -> Result<bool, ReportError> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "INSERT OR IGNORE INTO organization_units (id, name, email, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![unit.id, unit.name, unit.email, format_timestamp(&now())],
        ).map_err(|e| ReportError::Database(format!("Insert failed: {}", e)))?;
        Ok(affected > 0)
    }

    /// Removes the unit only; reports that embed it are left untouched.
    pub fn delete_org_unit(&self, id: &str) -> Result<bool, ReportError> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM organization_units WHERE id = ?1", rusqlite::params![id])
            .map_err(|e| ReportError::Database(format!("Delete failed: {}", e)))?;
        Ok(affected > 0)
    }
}
