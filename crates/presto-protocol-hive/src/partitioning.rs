use presto_protocol::capability::{ConnectorPartitioningHandle, ConnectorPartitioningHandleCapability};
use presto_protocol::types::TypeSignature;
use presto_protocol::{impl_variant, wire_record};

use crate::enums::BucketFunctionType;
use crate::metastore::HiveType;

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HivePartitioningHandle {
        pub bucket_count: i32 => "bucketCount",
        pub max_compatible_bucket_count: Option<i32> => "maxCompatibleBucketCount",
        pub bucket_function_type: BucketFunctionType => "bucketFunctionType",
        pub hive_types: Option<Vec<HiveType>> => "hiveTypes",
        pub types: Option<Vec<TypeSignature>> => "types",
    }
}

impl HivePartitioningHandle {
    /// Whether data bucketed with this handle can be read as `bucket_count` buckets.
    ///
    /// The counts are compatible when one is a power-of-two multiple of the other,
    /// within the maximum compatible count when one is set.
    pub fn is_compatible_bucket_count(&self, bucket_count: i32) -> bool {
        if bucket_count <= 0 || self.bucket_count <= 0 {
            return false;
        }
        if let Some(max) = self.max_compatible_bucket_count {
            if bucket_count > max {
                return false;
            }
        }
        let (larger, smaller) = if bucket_count >= self.bucket_count {
            (bucket_count, self.bucket_count)
        } else {
            (self.bucket_count, bucket_count)
        };
        larger % smaller == 0 && (larger / smaller).count_ones() == 1
    }
}

impl ConnectorPartitioningHandle for HivePartitioningHandle {}

impl_variant!(HivePartitioningHandle => ConnectorPartitioningHandleCapability);

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(bucket_count: i32, max: Option<i32>) -> HivePartitioningHandle {
        HivePartitioningHandle {
            bucket_count,
            max_compatible_bucket_count: max,
            bucket_function_type: BucketFunctionType::HiveCompatible,
            hive_types: None,
            types: None,
        }
    }

    #[test]
    fn test_compatible_bucket_count() {
        let h = handle(8, None);
        assert!(h.is_compatible_bucket_count(8));
        assert!(h.is_compatible_bucket_count(32));
        assert!(h.is_compatible_bucket_count(2));
        assert!(!h.is_compatible_bucket_count(24));
        assert!(!h.is_compatible_bucket_count(6));
        assert!(!h.is_compatible_bucket_count(0));
        assert!(!handle(8, Some(16)).is_compatible_bucket_count(32));
        assert!(handle(8, Some(16)).is_compatible_bucket_count(16));
    }
}
