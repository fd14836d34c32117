pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS organization_units (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reports (
    report_id TEXT PRIMARY KEY,
    url TEXT NOT NULL,
    descriptive_name TEXT,
    report_type TEXT NOT NULL CHECK (report_type IN ('SINGLE', 'AGGREGATED')),
    organization_unit_id TEXT,
    created TEXT NOT NULL,
    last_changed TEXT NOT NULL,
    report_data TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_reports_type_changed ON reports(report_type, last_changed);
CREATE INDEX IF NOT EXISTS idx_reports_org_unit ON reports(organization_unit_id);
";
