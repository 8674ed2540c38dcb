use std::fmt;

use eqt_schemas::{BracketOrderBody, ModifyOrderBody, OrderParams};

/// Order family. Selects validation rules, wire shape and vendor endpoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderFamily {
    Normal,
    Bracket,
    Cover,
}

impl fmt::Display for OrderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderFamily::Normal => write!(f, "normal"),
            OrderFamily::Bracket => write!(f, "bracket"),
            OrderFamily::Cover => write!(f, "cover"),
        }
    }
}

/// Vendor identifiers of the order being modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifyIds {
    pub order_no: String,
    pub group_id: i64,
    pub serial_no: i64,
    pub leg_no: Option<i64>,
    pub algo_order_no: Option<String>,
}

/// One order-management request, tagged by family.
#[derive(Clone, Debug, PartialEq)]
pub enum OrderRequest {
    Normal(OrderParams),
    Bracket {
        params: OrderParams,
        profit_value: f64,
        stoploss_value: f64,
    },
    Cover(OrderParams),
    Modify {
        family: OrderFamily,
        params: OrderParams,
        ids: ModifyIds,
    },
}

impl OrderRequest {
    pub fn bracket(body: BracketOrderBody) -> Self {
        OrderRequest::Bracket {
            params: body.params,
            profit_value: body.profit_value,
            stoploss_value: body.stoploss_value,
        }
    }

    pub fn modify(family: OrderFamily, body: ModifyOrderBody) -> Self {
        OrderRequest::Modify {
            family,
            params: body.params,
            ids: ModifyIds {
                order_no: body.order_no,
                group_id: body.group_id,
                serial_no: body.serial_no,
                leg_no: body.leg_no,
                algo_order_no: body.algo_order_no,
            },
        }
    }

    pub fn params(&self) -> &OrderParams {
        match self {
            OrderRequest::Normal(p) | OrderRequest::Cover(p) => p,
            OrderRequest::Bracket { params, .. } | OrderRequest::Modify { params, .. } => params,
        }
    }

    pub fn family(&self) -> OrderFamily {
        match self {
            OrderRequest::Normal(_) => OrderFamily::Normal,
            OrderRequest::Bracket { .. } => OrderFamily::Bracket,
            OrderRequest::Cover(_) => OrderFamily::Cover,
            OrderRequest::Modify { family, .. } => *family,
        }
    }

    pub fn is_modify(&self) -> bool {
        matches!(self, OrderRequest::Modify { .. })
    }
}

/// Authenticated caller, supplied by the transport's auth layer and threaded
/// into every vendor request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: String,
    pub client_id: String,
    pub entity_id: String,
}

impl CallerIdentity {
    /// Identity where the client and entity ids equal the user id, which is
    /// how retail accounts are provisioned at the vendor.
    pub fn new<S: Into<String>>(user_id: S) -> Self {
        let user_id = user_id.into();
        Self {
            client_id: user_id.clone(),
            entity_id: user_id.clone(),
            user_id,
        }
    }

    pub fn with_client_id<S: Into<String>>(mut self, client_id: S) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_entity_id<S: Into<String>>(mut self, entity_id: S) -> Self {
        self.entity_id = entity_id.into();
        self
    }
}
