//! Legacy endpoint routing
//!
//! Early builds of the page talked to a REST backend through
//! `fetch(path, { method, body })`. Those calls are still accepted and routed
//! onto bridge operations:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | `POST` | `/transactions` | `SAVE_TRANSACTION` (body is the record) |
//! | any other | `/transactions` | `GET_TRANSACTIONS` |
//! | `DELETE` | `/transactions/{id}` | `DELETE_TRANSACTION` |
//! | `POST` | `/partners` | `SAVE_PARTNER` |
//! | any other | `/partners` | `GET_PARTNERS` |
//! | `DELETE` | `/partners/{id}` | `DELETE_PARTNER` |
//!
//! Anything else resolves absent without sending.

use bridge_traits::HttpMethod;
use serde_json::{Map, Value};
use tracing::warn;

use crate::bridge::NativeBridge;
use crate::models::RecordId;
use crate::protocol::CorrelatedOp;
use crate::reply::{decode_raw, Reply};

/// A recognized legacy endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ListTransactions,
    SaveTransaction,
    DeleteTransaction(RecordId),
    ListPartners,
    SavePartner,
    DeletePartner(RecordId),
}

impl Route {
    pub fn resolve(method: HttpMethod, path: &str) -> Option<Route> {
        match path {
            "/transactions" if method == HttpMethod::Post => Some(Route::SaveTransaction),
            "/transactions" => Some(Route::ListTransactions),
            "/partners" if method == HttpMethod::Post => Some(Route::SavePartner),
            "/partners" => Some(Route::ListPartners),
            _ if method == HttpMethod::Delete => {
                if let Some(id) = record_id(path, "/transactions/") {
                    Some(Route::DeleteTransaction(id))
                } else {
                    record_id(path, "/partners/").map(Route::DeletePartner)
                }
            }
            _ => None,
        }
    }
}

fn record_id(path: &str, prefix: &str) -> Option<RecordId> {
    let id = path.strip_prefix(prefix)?.rsplit('/').next()?;
    (!id.is_empty()).then(|| RecordId::from(id))
}

impl NativeBridge {
    /// Route a legacy REST-style call; resolves to the host's raw result.
    pub fn fetch(&self, method: HttpMethod, path: &str, body: Option<&str>) -> Reply<Option<Value>> {
        match Self::legacy_operation(method, path, body) {
            Some(op) => self.correlated(op, || None, decode_raw),
            None => Reply::settled(None),
        }
    }

    fn legacy_operation(method: HttpMethod, path: &str, body: Option<&str>) -> Option<CorrelatedOp> {
        let Some(route) = Route::resolve(method, path) else {
            warn!(%method, path, "No bridge operation for endpoint");
            return None;
        };

        let op = match route {
            Route::ListTransactions => CorrelatedOp::GetTransactions,
            Route::ListPartners => CorrelatedOp::GetPartners,
            Route::DeleteTransaction(id) => CorrelatedOp::DeleteTransaction(id),
            Route::DeletePartner(id) => CorrelatedOp::DeletePartner(id),
            Route::SaveTransaction => CorrelatedOp::SaveTransaction(parse_body(path, body)?),
            Route::SavePartner => CorrelatedOp::SavePartner(parse_body(path, body)?),
        };
        Some(op)
    }
}

/// The body must be a JSON object; it is forwarded as the payload unchanged.
fn parse_body(path: &str, body: Option<&str>) -> Option<Map<String, Value>> {
    let Some(body) = body else {
        warn!(path, "Save request without a body");
        return None;
    };
    match serde_json::from_str(body) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(path, error = %err, "Save request body is not a JSON object");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_table() {
        assert_eq!(
            Route::resolve(HttpMethod::Get, "/transactions"),
            Some(Route::ListTransactions)
        );
        assert_eq!(
            Route::resolve(HttpMethod::Post, "/transactions"),
            Some(Route::SaveTransaction)
        );
        assert_eq!(
            Route::resolve(HttpMethod::Delete, "/transactions/42"),
            Some(Route::DeleteTransaction(RecordId::from("42")))
        );
        assert_eq!(
            Route::resolve(HttpMethod::Get, "/partners"),
            Some(Route::ListPartners)
        );
        assert_eq!(
            Route::resolve(HttpMethod::Post, "/partners"),
            Some(Route::SavePartner)
        );
        assert_eq!(
            Route::resolve(HttpMethod::Delete, "/partners/p-7"),
            Some(Route::DeletePartner(RecordId::from("p-7")))
        );
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(Route::resolve(HttpMethod::Get, "/reports"), None);
        assert_eq!(Route::resolve(HttpMethod::Get, "/partners/p-7"), None);
        assert_eq!(Route::resolve(HttpMethod::Delete, "/partners/"), None);
    }

    #[test]
    fn test_delete_without_id_on_collection_lists() {
        assert_eq!(
            Route::resolve(HttpMethod::Delete, "/transactions"),
            Some(Route::ListTransactions)
        );
    }

    #[test]
    fn test_save_requires_valid_body() {
        assert!(NativeBridge::legacy_operation(HttpMethod::Post, "/partners", None).is_none());
        assert!(NativeBridge::legacy_operation(HttpMethod::Post, "/partners", Some("{")).is_none());
        assert!(matches!(
            NativeBridge::legacy_operation(
                HttpMethod::Post,
                "/partners",
                Some(r#"{"id":1,"name":"Sara","percent":50}"#)
            ),
            Some(CorrelatedOp::SavePartner(_))
        ));
        assert!(NativeBridge::legacy_operation(HttpMethod::Post, "/partners", Some("[1]")).is_none());
    }

    #[test]
    fn test_save_body_is_forwarded_as_is() {
        let body = r#"{"id":"lx1abc","type":"sale","amount":50,"quantity":null}"#;
        let op = NativeBridge::legacy_operation(HttpMethod::Post, "/transactions", Some(body));
        let Some(CorrelatedOp::SaveTransaction(fields)) = op else {
            panic!("expected a transaction save");
        };
        assert_eq!(serde_json::to_string(&fields).unwrap(), body);
        assert!(!fields.contains_key("amountBase"));
    }
}
