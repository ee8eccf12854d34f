//! Human-readable context for the confirmation banner.

use webling_debtors_api::{ApiError, Filter, WeblingApi};
use webling_debtors_api_models::PeriodId;

/// Titles of a period and the accounting that contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodContext {
    /// Display title of the period.
    pub period_title: String,
    /// Display title of the containing period group.
    pub accounting_title: String,
}

/// Looks up the period title and the title of the first period group
/// containing it.
///
/// # Errors
///
/// Returns [`ApiError`] if either lookup fails, or
/// [`ApiError::EmptyResponse`] if no period group contains the period.
pub async fn resolve(api: &dyn WeblingApi, period_id: PeriodId) -> Result<PeriodContext, ApiError> {
    let period = api.fetch_period(period_id).await?;
    let groups = api
        .fetch_period_groups(&Filter::period_group_of(period_id))
        .await?;

    let group = groups.first().ok_or_else(|| ApiError::EmptyResponse {
        message: format!("no period group contains period {period_id}"),
    })?;

    Ok(PeriodContext {
        period_title: period.title().to_string(),
        accounting_title: group.title().to_string(),
    })
}
