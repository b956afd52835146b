//! Typed records projected from the admin tool's answers
//!
//! Each entity kind has a fixed table mapping struct fields to the source
//! keys of the monitoring format. Projection is total: a key missing from
//! the line leaves the field empty.
//!
//! Values are kept as the strings the tool printed; [`gauge`] gives the
//! numeric view used by exporters.

use crate::monitoring::{self, MonitoringLine};

/// Declares a record struct together with its source-key table and projector
macro_rules! monitoring_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident => $key:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, ::serde::Serialize)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: String, )+
        }

        impl $crate::records::FromMonitoring for $name {
            const KEYS: &'static [&'static str] = &[$($key),+];

            fn from_monitoring(line: &$crate::monitoring::MonitoringLine) -> Self {
                Self {
                    $( $field: line.value($key), )+
                }
            }
        }

        impl $name {
            /// `(source key, value)` pairs in declaration order
            pub fn fields(&self) -> Vec<(&'static str, &str)> {
                vec![$( ($key, self.$field.as_str()), )+]
            }

            /// Numeric value of the field sourced from `key`
            pub fn gauge(&self, key: &str) -> Option<f64> {
                self.fields()
                    .into_iter()
                    .find(|(k, _)| *k == key)
                    .and_then(|(_, value)| $crate::records::gauge(value))
            }
        }
    };
}

pub mod fs;
pub mod group;
pub mod namespace;
pub mod node;
pub mod space;
pub mod version;

pub use fs::FsRecord;
pub use group::{BalancingState, GroupRecord};
pub use namespace::{NamespaceActivityRecord, NamespaceRecord, NamespaceSnapshot};
pub use node::NodeRecord;
pub use space::SpaceRecord;
pub use version::VersionRecord;

/// Projection from a monitoring line
pub trait FromMonitoring: Sized {
    /// Source keys, one per field, in declaration order
    const KEYS: &'static [&'static str];

    fn from_monitoring(line: &MonitoringLine) -> Self;

    fn from_line(line: &str) -> Self {
        Self::from_monitoring(&MonitoringLine::parse(line))
    }
}

/// Project every non-empty line of `raw`, preserving order
pub fn parse_records<T: FromMonitoring>(raw: &str) -> Vec<T> {
    monitoring::records(raw).map(T::from_line).collect()
}

/// Numeric view of a field value
pub fn gauge(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge() {
        assert_eq!(gauge("12"), Some(12.0));
        assert_eq!(gauge("0.25"), Some(0.25));
        assert_eq!(gauge(""), None);
        assert_eq!(gauge("online"), None);
    }

    #[test]
    fn test_parse_records_preserves_order_and_duplicates() {
        let raw = "hostport=b:1095\n\nhostport=a:1095\nhostport=b:1095\n";
        let nodes: Vec<NodeRecord> = parse_records(raw);
        let hosts: Vec<_> = nodes.iter().map(|n| n.hostport.as_str()).collect();
        assert_eq!(hosts, vec!["b:1095", "a:1095", "b:1095"]);
    }

    #[test]
    fn test_every_projector_is_total_on_empty_line() {
        let empty = MonitoringLine::default();
        assert_eq!(NodeRecord::from_monitoring(&empty), NodeRecord::default());
        assert_eq!(SpaceRecord::from_monitoring(&empty), SpaceRecord::default());
        assert_eq!(GroupRecord::from_monitoring(&empty), GroupRecord::default());
        assert_eq!(FsRecord::from_monitoring(&empty), FsRecord::default());
        assert_eq!(NamespaceRecord::from_monitoring(&empty), NamespaceRecord::default());
        assert_eq!(
            NamespaceActivityRecord::from_monitoring(&empty),
            NamespaceActivityRecord::default()
        );
    }

    #[test]
    fn test_key_tables_have_no_duplicates() {
        fn check(keys: &[&str]) {
            let mut sorted = keys.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), keys.len());
        }
        check(NodeRecord::KEYS);
        check(SpaceRecord::KEYS);
        check(GroupRecord::KEYS);
        check(FsRecord::KEYS);
        check(NamespaceRecord::KEYS);
        check(NamespaceActivityRecord::KEYS);
    }
}
