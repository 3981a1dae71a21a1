//! # Gateway
//!
//! Hosted checkout links. A gateway is created with an amount and currency,
//! returns a `link` the shopper pays on, and moves from `waiting` to
//! `confirmed`, `authorized` or `reserved`.

use crate::client::ApiClient;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use payrexx_core::{
    CreateRequest, Currency, DeleteResponse, PayrexxError, PayrexxResult, Resource,
    ResourceAction, ResourceSnapshot,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Endpoint segment of the Gateway resource
pub const GATEWAY_RESOURCE: &str = "Gateway";

/// A gateway entity bound to the actions that created or fetched it
pub type Gateway<'a> = Resource<'a, GatewayActions>;

// =============================================================================
// Request
// =============================================================================

/// Parameters for creating a gateway.
///
/// `psp`, `pm` and `basket` are left off the wire when empty; an empty PSP
/// list and an omitted one both mean "all PSPs of the instance".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    /// Amount in the smallest currency unit (cents). Required, non-zero.
    #[serde(default)]
    pub amount: u64,

    /// VAT rate percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,

    pub currency: Currency,

    /// Product stock keeping unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Purpose of the payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_redirect_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_redirect_url: Option<String>,

    /// Redirect after manual cancellation by the shopper
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_redirect_url: Option<String>,

    /// PSP ids to offer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub psp: Vec<u32>,

    /// Payment mean names to display
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pm: Vec<String>,

    /// Charge manually at a later date (authorization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_authorization: Option<bool>,

    /// Charge the authorization during the first payment; needs `pre_authorization`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_on_authorization: Option<bool>,

    /// Charge manually at a later date (reservation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<bool>,

    /// Your internal reference id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,

    /// Contact data stored along with the payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ContactFields>,

    /// Concardis PSP only, with the custom ORDERID option enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concardis_order_id: Option<String>,

    /// Redirect straight to the success/failed URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_result_page: Option<bool>,

    /// Validity in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,

    /// All products, shipping included
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub basket: Vec<BasketProduct>,
}

impl GatewayRequest {
    pub fn new(amount: u64, currency: Currency) -> Self {
        Self {
            amount,
            currency,
            ..Default::default()
        }
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    pub fn with_vat_rate(mut self, vat_rate: f64) -> Self {
        self.vat_rate = Some(vat_rate);
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Builder: success, failed and cancel redirect URLs
    pub fn with_redirects(
        mut self,
        success: impl Into<String>,
        failed: impl Into<String>,
        cancel: impl Into<String>,
    ) -> Self {
        self.success_redirect_url = Some(success.into());
        self.failed_redirect_url = Some(failed.into());
        self.cancel_redirect_url = Some(cancel.into());
        self
    }

    pub fn with_psp(mut self, psp: impl IntoIterator<Item = u32>) -> Self {
        self.psp = psp.into_iter().collect();
        self
    }

    pub fn with_payment_means<S: Into<String>>(mut self, pm: impl IntoIterator<Item = S>) -> Self {
        self.pm = pm.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pre_authorization(mut self, charge_on_authorization: bool) -> Self {
        self.pre_authorization = Some(true);
        self.charge_on_authorization = Some(charge_on_authorization);
        self
    }

    pub fn with_reservation(mut self) -> Self {
        self.reservation = Some(true);
        self
    }

    pub fn with_fields(mut self, fields: ContactFields) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_validity(mut self, minutes: u32) -> Self {
        self.validity = Some(minutes);
        self
    }

    pub fn with_skip_result_page(mut self, skip: bool) -> Self {
        self.skip_result_page = Some(skip);
        self
    }

    pub fn with_button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = Some(text.into());
        self
    }

    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn with_concardis_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.concardis_order_id = Some(order_id.into());
        self
    }

    /// Builder: append a basket line
    pub fn with_basket_product(mut self, product: BasketProduct) -> Self {
        self.basket.push(product);
        self
    }
}

impl CreateRequest for GatewayRequest {
    fn validate(&self) -> PayrexxResult<()> {
        if self.amount == 0 {
            return Err(PayrexxError::Validation("Amount required".to_string()));
        }
        if self.charge_on_authorization == Some(true) && self.pre_authorization != Some(true) {
            return Err(PayrexxError::Validation(
                "chargeOnAuthorization requires preAuthorization".to_string(),
            ));
        }
        Ok(())
    }
}

/// One basket line. `name` and `description` hold one entry per language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketProduct {
    pub name: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<String>>,
    pub quantity: u32,
    /// Unit amount in the smallest currency unit
    pub amount: u64,
    pub vat_rate: f64,
}

impl BasketProduct {
    pub fn new(name: impl Into<String>, quantity: u32, amount: u64, vat_rate: f64) -> Self {
        Self {
            name: vec![name.into()],
            description: None,
            quantity,
            amount,
            vat_rate,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(vec![description.into()]);
        self
    }
}

/// A prefilled contact field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub value: String,
}

impl FieldValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Contact data fields; wire names are snake_case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forename: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_title: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_forename: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_surname: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_company: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_street: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_postcode: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_place: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_country: Option<FieldValue>,
}

impl ContactFields {
    /// Shopper name and email, the common prefill
    pub fn contact(
        forename: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            forename: Some(FieldValue::new(forename)),
            surname: Some(FieldValue::new(surname)),
            email: Some(FieldValue::new(email)),
            ..Default::default()
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Gateway lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    Waiting,
    Confirmed,
    Authorized,
    Reserved,
}

impl GatewayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayStatus::Waiting => "waiting",
            GatewayStatus::Confirmed => "confirmed",
            GatewayStatus::Authorized => "authorized",
            GatewayStatus::Reserved => "reserved",
        }
    }
}

impl std::fmt::Display for GatewayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility of one contact field on the hosted page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub mandatory: bool,
    /// Localized labels, present on some fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Value>,
}

/// Per-field options reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    pub title: Option<FieldOption>,
    pub forename: Option<FieldOption>,
    pub surname: Option<FieldOption>,
    pub company: Option<FieldOption>,
    pub street: Option<FieldOption>,
    pub postcode: Option<FieldOption>,
    pub place: Option<FieldOption>,
    pub country: Option<FieldOption>,
    pub phone: Option<FieldOption>,
    pub email: Option<FieldOption>,
    pub date_of_birth: Option<FieldOption>,
    pub delivery_title: Option<FieldOption>,
    pub delivery_forename: Option<FieldOption>,
    pub delivery_surname: Option<FieldOption>,
    pub delivery_company: Option<FieldOption>,
    pub delivery_street: Option<FieldOption>,
    pub delivery_postcode: Option<FieldOption>,
    pub delivery_place: Option<FieldOption>,
    pub delivery_country: Option<FieldOption>,
}

/// Server representation of a gateway. Replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewaySnapshot {
    id: Option<u64>,
    status: Option<GatewayStatus>,
    hash: Option<String>,
    reference_id: Option<String>,
    link: Option<String>,
    invoices: Vec<Value>,
    pre_authorization: i64,
    fields: FieldOptions,
    psp: Vec<Value>,
    pm: Vec<Value>,
    amount: u64,
    vat_rate: Option<f64>,
    currency: Option<String>,
    sku: Option<String>,
    created_at: i64,
}

impl GatewaySnapshot {
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn status(&self) -> Option<GatewayStatus> {
        self.status
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.reference_id.as_deref()
    }

    /// Hosted checkout URL to send the shopper to
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn invoices(&self) -> &[Value] {
        &self.invoices
    }

    pub fn pre_authorization(&self) -> bool {
        self.pre_authorization != 0
    }

    pub fn fields(&self) -> &FieldOptions {
        &self.fields
    }

    pub fn psp(&self) -> &[Value] {
        &self.psp
    }

    pub fn pm(&self) -> &[Value] {
        &self.pm
    }

    /// Amount in the smallest currency unit
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn vat_rate(&self) -> Option<f64> {
        self.vat_rate
    }

    /// Currency code as reported by the service
    pub fn currency_code(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Parsed currency, `None` if the code is not one of [`Currency`]
    pub fn currency(&self) -> Option<Currency> {
        self.currency.as_deref().and_then(|code| code.parse().ok())
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    /// Creation time as unix seconds
    pub fn created_at_timestamp(&self) -> i64 {
        self.created_at
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}

impl ResourceSnapshot for GatewaySnapshot {
    fn id(&self) -> Option<u64> {
        self.id
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Create, fetch and delete gateways.
///
/// Obtained from [`Payrexx::gateway`](crate::Payrexx::gateway). Holds no
/// per-call state; safe to share across tasks.
#[derive(Clone)]
pub struct GatewayActions {
    api: Arc<ApiClient>,
}

impl GatewayActions {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceAction for GatewayActions {
    type Request = GatewayRequest;
    type Snapshot = GatewaySnapshot;

    fn resource_name(&self) -> &'static str {
        GATEWAY_RESOURCE
    }

    #[instrument(skip(self, request), fields(amount = request.amount, currency = %request.currency))]
    async fn create<'a>(&'a self, request: &GatewayRequest) -> PayrexxResult<Gateway<'a>> {
        request.validate()?;

        debug!(
            "Creating gateway: {} basket items, {} psp",
            request.basket.len(),
            request.psp.len()
        );

        let snapshot: GatewaySnapshot = self.api.create(GATEWAY_RESOURCE, request).await?;

        info!(
            "Created gateway: id={:?}, link={:?}",
            snapshot.id(),
            snapshot.link()
        );

        Ok(Resource::from_snapshot(self, snapshot))
    }

    #[instrument(skip(self))]
    async fn get<'a>(&'a self, id: u64) -> PayrexxResult<Gateway<'a>> {
        let snapshot: GatewaySnapshot = self.api.fetch(GATEWAY_RESOURCE, id).await?;

        debug!("Fetched gateway: id={}, status={:?}", id, snapshot.status());

        Ok(Resource::from_snapshot(self, snapshot))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: u64) -> PayrexxResult<DeleteResponse> {
        let ack = self.api.remove(GATEWAY_RESOURCE, id).await?;
        info!("Deleted gateway: id={}", id);
        Ok(ack)
    }
}
