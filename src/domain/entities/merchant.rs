//! Affiliate merchant records.

/// The result of resolving a domain against the merchant dataset.
///
/// `merchant_id` may be absent: the domain is known but has no affiliate
/// program, which is an ordinary outcome rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantRecord {
    pub merchant_id: Option<String>,
    pub merchant_name: String,
    pub domain_name: String,
}

impl MerchantRecord {
    pub fn new(
        merchant_id: Option<String>,
        merchant_name: impl Into<String>,
        domain_name: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id,
            merchant_name: merchant_name.into(),
            domain_name: domain_name.into(),
        }
    }
}
