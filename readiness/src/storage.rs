//! Helpers at the storage boundary.
//!
//! The shareable state travels as an `application/x-www-form-urlencoded`
//! query string. Sensitive answers live in a [`SecureStore`], one entry per
//! field, and every failure of that store degrades to "no value".

use readiness_types::{ParamSet, Schema, SecureStore};
use url::form_urlencoded;

use crate::ReadinessConfig;

/// Parse a query string, with or without its leading `?`.
///
/// Later duplicates win and empty values are dropped.
pub fn parse_query(query: &str) -> ParamSet {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Serialize parameters to a query string without a leading `?`.
pub fn to_query(params: &ParamSet) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

/// Read every sensitive entry of the schema from the secure store.
pub fn read_secure(
    store: &impl SecureStore,
    schema: &Schema,
    config: &ReadinessConfig,
) -> ParamSet {
    let mut params = ParamSet::new();
    for key in schema.sensitive_keys() {
        let field = key.to_string();
        match store.get(&config.secure_name(&field)) {
            Ok(Some(value)) => params.set(field, value),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%key, error = %err, "secure store read failed");
            }
        }
    }
    params
}

/// Store or delete one sensitive entry. An empty value deletes it.
///
/// Failures are logged and swallowed.
pub fn write_secure(
    store: &mut impl SecureStore,
    config: &ReadinessConfig,
    field: &str,
    value: &str,
) {
    let name = config.secure_name(field);
    let result = if value.is_empty() {
        store.remove(&name)
    } else {
        store.set(&name, value)
    };
    if let Err(err) = result {
        tracing::warn!(field, error = %err, "secure store write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::memory::MemorySecureStore;

    #[test]
    fn parse_decodes_escapes() {
        let params = parse_query("?loc_gcp_frontend_monitoring_newrelic=APM+%28dashboard%29%7CSYNT&empty=&slo_exists=1");
        assert_eq!(
            params.get("loc_gcp_frontend_monitoring_newrelic"),
            Some("APM (dashboard)|SYNT")
        );
        assert_eq!(params.get("slo_exists"), Some("1"));
        assert!(!params.contains("empty"));
    }

    #[test]
    fn later_duplicates_win() {
        let params = parse_query("dr_plan=0&dr_plan=1");
        assert_eq!(params.get("dr_plan"), Some("1"));
    }

    #[test]
    fn serialize_escapes() {
        let params = ParamSet::new()
            .with("other_mentions", "a&b=c d")
            .with("dr_plan", "na");
        let query = to_query(&params);
        assert_eq!(query, "dr_plan=na&other_mentions=a%26b%3Dc+d");
        assert_eq!(parse_query(&query), params);
    }

    #[test]
    fn secure_round_trip() {
        let config = ReadinessConfig::default();
        let mut store = MemorySecureStore::new();
        write_secure(&mut store, &config, "nar_id", "NAR-7");
        assert_eq!(store.entry("secure_nar_id"), Some("NAR-7"));

        let params = read_secure(&store, catalog::schema(), &config);
        assert_eq!(params.get("nar_id"), Some("NAR-7"));
        assert_eq!(params.len(), 1);

        write_secure(&mut store, &config, "nar_id", "");
        assert!(read_secure(&store, catalog::schema(), &config).is_empty());
    }

    #[test]
    fn unavailable_store_degrades_to_empty() {
        let config = ReadinessConfig::default();
        let mut store = MemorySecureStore::unavailable();
        write_secure(&mut store, &config, "app_name", "Ledger");
        assert!(read_secure(&store, catalog::schema(), &config).is_empty());
    }
}
