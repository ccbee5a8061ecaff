use compact_notifications_core::content::transactions::{
    batch_settlement_failure, compact_transaction_report, jurisdiction_transaction_report,
    CompactReportVariables, JurisdictionReportVariables,
};
use compact_notifications_core::contract::Recipients;
use compact_notifications_core::request::TemplateName;
use compact_notifications_core::Result;

use super::ServiceContext;

pub struct TransactionService<'a> {
    context: ServiceContext<'a>,
}

impl<'a> TransactionService<'a> {
    pub fn new(context: ServiceContext<'a>) -> Self {
        Self { context }
    }

    pub fn send_transaction_batch_settlement_failure_email(
        &self,
        compact: &str,
        recipients: &Recipients,
    ) -> Result<String> {
        let to = self.context.resolve_recipients(compact, None, recipients)?;
        let content = batch_settlement_failure(self.context.settings, compact);
        self.context.send(
            TemplateName::TransactionBatchSettlementFailure.as_str(),
            to,
            content,
        )
    }

    /// Attaches the financial summary and the transaction detail reports.
    pub fn send_compact_transaction_report_email(
        &self,
        compact: &str,
        recipients: &Recipients,
        variables: &CompactReportVariables,
    ) -> Result<String> {
        let to = self.context.resolve_recipients(compact, None, recipients)?;
        let compact_config = self.context.configuration.get_compact_configuration(compact)?;
        let content = compact_transaction_report(self.context.settings, &compact_config, variables);
        self.context.send_with_attachments(
            TemplateName::CompactTransactionReporting.as_str(),
            to,
            content,
            &[
                variables.compact_financial_summary_report_s3_path.as_str(),
                variables.compact_transaction_report_s3_path.as_str(),
            ],
        )
    }

    pub fn send_jurisdiction_transaction_report_email(
        &self,
        compact: &str,
        jurisdiction: &str,
        recipients: &Recipients,
        variables: &JurisdictionReportVariables,
    ) -> Result<String> {
        let to = self
            .context
            .resolve_recipients(compact, Some(jurisdiction), recipients)?;
        let compact_config = self.context.configuration.get_compact_configuration(compact)?;
        let jurisdiction_config = self
            .context
            .configuration
            .get_jurisdiction_configuration(compact, jurisdiction)?;
        let content = jurisdiction_transaction_report(
            self.context.settings,
            &compact_config,
            &jurisdiction_config,
            variables,
        );
        self.context.send_with_attachments(
            TemplateName::JurisdictionTransactionReporting.as_str(),
            to,
            content,
            &[variables.jurisdiction_transaction_report_s3_path.as_str()],
        )
    }
}
