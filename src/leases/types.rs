//! WAPI object types used by the lease strategies
//!
//! The Grid Master owns these schemas. Only the fields this tool reads are
//! typed; anything else returned is kept verbatim in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Binding state of a lease currently held by a client
pub const ACTIVE_BINDING_STATE: &str = "ACTIVE";

/// DHCP lease record (`lease` object)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    /// WAPI object reference
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_view: Option<String>,

    /// `ACTIVE`, `FREE`, `EXPIRED`, `BACKUP`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_state: Option<String>,

    /// Client MAC address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,

    /// Client last transaction time, seconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cltt: Option<i64>,

    /// Lease end, seconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends: Option<i64>,

    /// Member that served the lease
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_hostname: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Lease {
    /// Whether the lease is currently bound
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.binding_state.as_deref() == Some(ACTIVE_BINDING_STATE)
    }
}

/// IPv4 address record (`ipv4address` object)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4AddressRecord {
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_view: Option<String>,

    /// `USED` or `UNUSED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub types: Vec<String>,

    /// Services using the address, e.g. `DHCP`, `DNS`
    #[serde(default)]
    pub usage: Vec<String>,

    /// References of the objects bound to the address
    #[serde(default)]
    pub objects: Vec<String>,
}

impl Ipv4AddressRecord {
    /// Reference of the lease object behind this address, if it is a DHCP-used address
    #[must_use]
    pub fn lease_reference(&self) -> Option<&str> {
        if self.status.as_deref() != Some("USED") {
            return None;
        }
        if !self.usage.iter().any(|usage| usage == "DHCP") {
            return None;
        }
        self.objects
            .iter()
            .map(String::as_str)
            .find(|object| object.contains("lease"))
    }
}

/// Keep only leases whose binding state is `ACTIVE`
#[must_use]
pub fn filter_active(leases: Vec<Lease>) -> Vec<Lease> {
    leases.into_iter().filter(Lease::is_active).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lease_keeps_unknown_fields() {
        let lease: Lease = serde_json::from_value(json!({
            "_ref": "lease/abc:10.0.0.5/default",
            "address": "10.0.0.5",
            "binding_state": "ACTIVE",
            "ends": 1_650_000_000,
            "fingerprint": "Apple iOS"
        }))
        .unwrap();

        assert_eq!(lease.address.as_deref(), Some("10.0.0.5"));
        assert_eq!(lease.ends, Some(1_650_000_000));
        assert_eq!(lease.extra.get("fingerprint"), Some(&json!("Apple iOS")));

        let back = serde_json::to_value(&lease).unwrap();
        assert_eq!(back["fingerprint"], json!("Apple iOS"));
        assert!(back.get("hardware").is_none());
    }

    #[test]
    fn filter_active_drops_other_states() {
        let lease = |state: &str| Lease {
            binding_state: Some(state.to_owned()),
            ..Lease::default()
        };
        let leases = vec![lease("ACTIVE"), lease("FREE"), lease("EXPIRED"), lease("ACTIVE")];

        assert_eq!(filter_active(leases).len(), 2);
        assert!(!Lease::default().is_active());
    }

    #[test]
    fn lease_reference_requires_used_dhcp_address() {
        let record = Ipv4AddressRecord {
            status: Some("USED".to_owned()),
            usage: vec!["DNS".to_owned(), "DHCP".to_owned()],
            objects: vec![
                "record:a/ZG5z:host.example.com/default".to_owned(),
                "lease/ZG5zLmxlYXNl:10.0.0.5/default".to_owned(),
                "lease/second:10.0.0.5/default".to_owned(),
            ],
            ..Ipv4AddressRecord::default()
        };
        assert_eq!(
            record.lease_reference(),
            Some("lease/ZG5zLmxlYXNl:10.0.0.5/default")
        );

        let unused = Ipv4AddressRecord {
            status: Some("UNUSED".to_owned()),
            ..record.clone()
        };
        assert_eq!(unused.lease_reference(), None);

        let dns_only = Ipv4AddressRecord {
            usage: vec!["DNS".to_owned()],
            ..record.clone()
        };
        assert_eq!(dns_only.lease_reference(), None);

        let fixed = Ipv4AddressRecord {
            objects: vec!["fixedaddress/ZG5z:10.0.0.5/default".to_owned()],
            ..record
        };
        assert_eq!(fixed.lease_reference(), None);
    }
}
