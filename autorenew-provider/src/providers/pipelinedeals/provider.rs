//! `PipelineDeals` `DealProvider` trait implementation

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::traits::DealProvider;
use crate::types::{
    DealCompany, DealEntry, DealFieldSchema, DealQueryParams, DealStatus, PaginatedResponse,
};

use super::{DEALS_PATH, DealListResponse, PipelineDealsEntry, PipelinedealsProvider};

/// Custom text field: blank strings count as absent
fn custom_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// Custom dropdown field: a value id sent as a number or a numeric string
///
/// The CRM documents dropdown ids as numbers, but some accounts send them
/// quoted. Both forms are accepted, so `"1936195"` matches the purchase
/// channel code just like `1936195`. Anything else is no code.
fn custom_code(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Custom date field, kept as sent
fn custom_date(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        other => custom_text(Some(other)),
    }
}

impl PipelinedealsProvider {
    pub(crate) fn entry_to_deal(entry: PipelineDealsEntry, schema: &DealFieldSchema) -> DealEntry {
        let fields = &entry.custom_fields;
        DealEntry {
            id: entry.id,
            name: entry.name,
            status: DealStatus::from_code(entry.status.as_ref().and_then(Value::as_i64)),
            company: entry.company.map(|c| DealCompany {
                id: c.id,
                name: c.name,
            }),
            domain_name: custom_text(fields.get(&schema.domain_field)),
            purchase_channel_code: custom_code(fields.get(&schema.purchase_channel_field)),
            purchase_confirmed_date: custom_date(fields.get(&schema.purchase_confirmed_field)),
        }
    }

    pub(crate) fn list_response_to_page(
        response: DealListResponse,
        schema: &DealFieldSchema,
    ) -> PaginatedResponse<DealEntry> {
        let pagination = response.pagination;
        let items = response
            .entries
            .into_iter()
            .map(|entry| Self::entry_to_deal(entry, schema))
            .collect();

        PaginatedResponse::with_total_pages(
            items,
            pagination.page,
            pagination.per_page,
            pagination.total,
            pagination.pages,
        )
    }
}

#[async_trait]
impl DealProvider for PipelinedealsProvider {
    fn id(&self) -> &'static str {
        "pipelinedeals"
    }

    async fn list_deals(&self, params: &DealQueryParams) -> Result<PaginatedResponse<DealEntry>> {
        let mut query = Vec::new();
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = params.per_page {
            query.push(("per_page", per_page.to_string()));
        }

        let response: DealListResponse = self.get(DEALS_PATH, &query).await?;
        Ok(Self::list_response_to_page(response, &self.schema))
    }
}
