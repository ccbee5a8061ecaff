//! Ingest summaries for a jurisdiction's operations team.

use compact_notifications_core::content::ingest::{
    alls_well, error_report, no_license_updates, ReportPeriod,
};
use compact_notifications_core::contract::{
    CompactConfiguration, JurisdictionConfiguration, RecipientType,
};
use compact_notifications_core::events::{IngestFailureEvent, ValidationErrorEvent};
use compact_notifications_core::recipients::jurisdiction_recipients;
use compact_notifications_core::Result;

use super::ServiceContext;

pub struct IngestReportService<'a> {
    context: ServiceContext<'a>,
}

impl<'a> IngestReportService<'a> {
    pub fn new(context: ServiceContext<'a>) -> Self {
        Self { context }
    }

    pub fn send_ingest_error_report_email(
        &self,
        compact: &CompactConfiguration,
        jurisdiction: &JurisdictionConfiguration,
        ingest_failures: &[IngestFailureEvent],
        validation_errors: &[ValidationErrorEvent],
    ) -> Result<String> {
        let to = operations_team(jurisdiction)?;
        let content = error_report(
            self.context.settings,
            compact,
            jurisdiction,
            ingest_failures,
            validation_errors,
        );
        self.context.send("ingestErrorReport", to, content)
    }

    pub fn send_alls_well_email(
        &self,
        compact: &CompactConfiguration,
        jurisdiction: &JurisdictionConfiguration,
        period: ReportPeriod,
    ) -> Result<String> {
        let to = operations_team(jurisdiction)?;
        let content = alls_well(self.context.settings, compact, jurisdiction, period);
        self.context.send("ingestAllsWell", to, content)
    }

    pub fn send_no_license_updates_email(
        &self,
        compact: &CompactConfiguration,
        jurisdiction: &JurisdictionConfiguration,
        period: ReportPeriod,
    ) -> Result<String> {
        let to = operations_team(jurisdiction)?;
        let content = no_license_updates(self.context.settings, compact, jurisdiction, period);
        self.context.send("ingestNoLicenseUpdates", to, content)
    }
}

fn operations_team(jurisdiction: &JurisdictionConfiguration) -> Result<Vec<String>> {
    jurisdiction_recipients(jurisdiction, RecipientType::JurisdictionOperationsTeam)
}
