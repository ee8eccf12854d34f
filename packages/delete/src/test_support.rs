//! Scripted [`WeblingApi`] double that records every call.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use webling_debtors_api::{ApiError, Filter, StatusCode, WeblingApi};
use webling_debtors_api_models::{DebtorId, Period, PeriodGroup, PeriodId, TitleProperties};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchDebtorIds(String),
    FetchPeriod(PeriodId),
    FetchPeriodGroups(String),
    Delete(Vec<DebtorId>),
}

/// Scripted response for a delete request.
#[derive(Debug, Clone, Copy)]
pub enum DeleteReply {
    Status(StatusCode),
    Timeout,
}

pub struct ScriptedApi {
    ids: Vec<DebtorId>,
    fetch_ids_unavailable: bool,
    period_groups: Vec<&'static str>,
    delete_script: Mutex<VecDeque<DeleteReply>>,
    delete_fallback: DeleteReply,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub fn with_ids(count: u64) -> Self {
        Self {
            ids: (1..=count).map(DebtorId).collect(),
            fetch_ids_unavailable: false,
            period_groups: vec!["Mitglieder"],
            delete_script: Mutex::new(VecDeque::new()),
            delete_fallback: DeleteReply::Status(StatusCode::NO_CONTENT),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replies to consume in order before falling back.
    pub fn script_deletes(self, replies: impl IntoIterator<Item = DeleteReply>) -> Self {
        *self.delete_script.lock().unwrap() = replies.into_iter().collect();
        self
    }

    pub fn delete_fallback(mut self, reply: DeleteReply) -> Self {
        self.delete_fallback = reply;
        self
    }

    pub fn fetch_ids_unavailable(mut self) -> Self {
        self.fetch_ids_unavailable = true;
        self
    }

    pub fn without_period_groups(mut self) -> Self {
        self.period_groups.clear();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<Vec<DebtorId>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Delete(ids) => Some(ids),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn titled(title: &str) -> TitleProperties {
    TitleProperties {
        title: title.to_string(),
    }
}

#[async_trait]
impl WeblingApi for ScriptedApi {
    async fn fetch_debtor_ids(&self, filter: &Filter) -> Result<Vec<DebtorId>, ApiError> {
        self.record(Call::FetchDebtorIds(filter.to_string()));
        if self.fetch_ids_unavailable {
            return Err(ApiError::ServiceUnavailable {
                url: "http://test/debitor".to_string(),
            });
        }
        Ok(self.ids.clone())
    }

    async fn fetch_period(&self, period_id: PeriodId) -> Result<Period, ApiError> {
        self.record(Call::FetchPeriod(period_id));
        Ok(Period {
            properties: titled("2024"),
        })
    }

    async fn fetch_period_groups(&self, filter: &Filter) -> Result<Vec<PeriodGroup>, ApiError> {
        self.record(Call::FetchPeriodGroups(filter.to_string()));
        Ok(self
            .period_groups
            .iter()
            .map(|title| PeriodGroup {
                properties: titled(title),
            })
            .collect())
    }

    async fn delete_debtors(&self, ids: &[DebtorId]) -> Result<StatusCode, ApiError> {
        self.record(Call::Delete(ids.to_vec()));
        let reply = self
            .delete_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.delete_fallback);
        match reply {
            DeleteReply::Status(status) => Ok(status),
            DeleteReply::Timeout => Err(ApiError::Timeout {
                url: "http://test/debitor".to_string(),
            }),
        }
    }
}
