use crate::client::QiwiClient;
use crate::error::QiwiError;
use crate::mapper::map_record;
use crate::method::{ApiMethod, HttpMethod, Payload};
use crate::model::order::OrderDetails;
use crate::validation::require_non_empty;

/// Status of a QIWI Master card order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOrderDetails {
    order_id: String,
}

impl FetchOrderDetails {
    pub fn new(order_id: impl Into<String>) -> Result<Self, QiwiError> {
        let order_id = order_id.into();
        require_non_empty(&order_id, "order_id")?;
        Ok(Self { order_id })
    }
}

impl ApiMethod for FetchOrderDetails {
    type Output = OrderDetails;

    const PATH: &'static str = "/cards/v2/persons/{phone_number}/orders/{order_id}";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("order_id", self.order_id.clone())]
    }

    fn parse_response(&self, payload: Payload) -> Result<OrderDetails, QiwiError> {
        map_record(payload.into_json()?)
    }
}

impl QiwiClient {
    /// GET /cards/v2/persons/{phone_number}/orders/{order_id}
    pub async fn get_order_details(
        &self,
        order_id: impl Into<String>,
    ) -> Result<OrderDetails, QiwiError> {
        self.execute(&FetchOrderDetails::new(order_id)?).await
    }
}
