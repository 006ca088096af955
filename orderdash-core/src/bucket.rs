//! Status bucket vocabulary and the multi-membership bucket index

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Business-status buckets, in vocabulary order.
///
/// Matching is by substring against the lower-cased status text, so the
/// serialized names double as the match patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    All,
    Rto,
    DoorStepExchanged,
    Delivered,
    Cancelled,
    ReadyToShip,
    Shipped,
    SupplierListedPrice,
    SupplierDiscountedPrice,
    Other,
}

impl Bucket {
    /// Named vocabulary (everything except the implicit `Other`)
    pub const VOCABULARY: [Bucket; 9] = [
        Bucket::All,
        Bucket::Rto,
        Bucket::DoorStepExchanged,
        Bucket::Delivered,
        Bucket::Cancelled,
        Bucket::ReadyToShip,
        Bucket::Shipped,
        Bucket::SupplierListedPrice,
        Bucket::SupplierDiscountedPrice,
    ];

    /// Vocabulary plus `Other`
    pub const ALL: [Bucket; 10] = [
        Bucket::All,
        Bucket::Rto,
        Bucket::DoorStepExchanged,
        Bucket::Delivered,
        Bucket::Cancelled,
        Bucket::ReadyToShip,
        Bucket::Shipped,
        Bucket::SupplierListedPrice,
        Bucket::SupplierDiscountedPrice,
        Bucket::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::All => "all",
            Bucket::Rto => "rto",
            Bucket::DoorStepExchanged => "door_step_exchanged",
            Bucket::Delivered => "delivered",
            Bucket::Cancelled => "cancelled",
            Bucket::ReadyToShip => "ready_to_ship",
            Bucket::Shipped => "shipped",
            Bucket::SupplierListedPrice => "supplier_listed_price",
            Bucket::SupplierDiscountedPrice => "supplier_discounted_price",
            Bucket::Other => "other",
        }
    }

    /// Buckets assigned by plain substring match (no `all`, `rto`, `other`)
    pub fn generic() -> impl Iterator<Item = Bucket> {
        Self::VOCABULARY
            .into_iter()
            .filter(|b| !matches!(b, Bucket::All | Bucket::Rto))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Bucket -> member record indices (input order).
///
/// Not a partition: one record can sit in several buckets when its status
/// text contains several vocabulary names.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets {
    members: BTreeMap<Bucket, Vec<usize>>,
}

impl Default for Buckets {
    fn default() -> Self {
        Self {
            members: Bucket::ALL.into_iter().map(|b| (b, Vec::new())).collect(),
        }
    }
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bucket: Bucket, index: usize) {
        self.members.entry(bucket).or_default().push(index);
    }

    /// Record indices in `bucket`
    pub fn members(&self, bucket: Bucket) -> &[usize] {
        self.members.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.members(bucket).len()
    }

    pub fn contains(&self, bucket: Bucket, index: usize) -> bool {
        self.members(bucket).contains(&index)
    }

    /// Resolve members of `bucket` against the record slice they index into
    pub fn records<'a, T>(&'a self, bucket: Bucket, records: &'a [T]) -> impl Iterator<Item = &'a T> {
        self.members(bucket).iter().filter_map(|&i| records.get(i))
    }

    /// Buckets holding `index`, excluding `All`
    pub fn buckets_of(&self, index: usize) -> Vec<Bucket> {
        Bucket::ALL
            .into_iter()
            .filter(|&b| b != Bucket::All && self.contains(b, index))
            .collect()
    }

    /// (bucket, count) for every bucket in vocabulary order
    pub fn counts(&self) -> Vec<(Bucket, usize)> {
        Bucket::ALL.into_iter().map(|b| (b, self.count(b))).collect()
    }
}

impl Serialize for Buckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.members.len()))?;
        for (bucket, indices) in &self.members {
            map.serialize_entry(bucket.as_str(), indices)?;
        }
        map.end()
    }
}
