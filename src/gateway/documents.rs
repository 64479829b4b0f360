//! Typed shapes of the procedures that answer with one JSON document.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::db::Record;

/// `get_product_details` output.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductDocument {
    pub info: ProductInfo,

    #[serde(default)]
    pub variants: Vec<Record>,

    #[serde(default)]
    pub latest_reviews: Vec<Record>,
}

/// Product header. Only `name` is required; the rest is passed to the view.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductInfo {
    pub name: String,

    #[serde(flatten)]
    pub details: Record,
}

/// `checkout` output.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutReceipt {
    pub order_id: i64,

    /// Kept as the server's number so it renders exactly as computed.
    pub final_amount: Number,
}

/// `login_user` output.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginProfile {
    pub user_id: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub avatar: Option<String>,
}

/// Pull the new account id out of `register_user`'s status line, e.g.
/// `SUCCESS: Successfully register new account. User ID: 12`.
pub fn registered_user_id(message: &str) -> Option<i64> {
    let (_, rest) = message.split_once("User ID:")?;
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RecordSet;

    #[test]
    fn test_product_document() {
        let set = RecordSet::scalar(
            "JSON_F52E2B61-18A1-11d1-B105-00805F49916B",
            r#"{
                "info": {"product_id": 3, "name": "Canvas Tote", "price": 120000},
                "variants": [{"variant_id": 9, "color": "Sand", "stock": 4}]
            }"#,
        );
        let doc: ProductDocument = set.decode_document().unwrap();
        assert_eq!(doc.info.name, "Canvas Tote");
        assert_eq!(doc.info.details["price"], 120000);
        assert_eq!(doc.variants.len(), 1);
        assert!(doc.latest_reviews.is_empty());
    }

    #[test]
    fn test_product_info_flattens_back() {
        let set = RecordSet::scalar("doc", r#"{"info": {"name": "Mug", "price": 9.5}}"#);
        let doc: ProductDocument = set.decode_document().unwrap();
        let value = serde_json::to_value(&doc.info).unwrap();
        assert_eq!(value["name"], "Mug");
        assert_eq!(value["price"], 9.5);
    }

    #[test]
    fn test_checkout_receipt() {
        let set = RecordSet::scalar("doc", r#"{"order_id": 1001, "final_amount": 450000.5}"#);
        let receipt: CheckoutReceipt = set.decode_document().unwrap();
        assert_eq!(receipt.order_id, 1001);
        assert_eq!(receipt.final_amount.to_string(), "450000.5");
    }

    #[test]
    fn test_login_profile_optional_fields() {
        let set = RecordSet::scalar("doc", r#"{"user_id": 4, "name": "Linh", "role": "customer"}"#);
        let profile: LoginProfile = set.decode_document().unwrap();
        assert_eq!(profile.user_id, 4);
        assert_eq!(profile.role.as_deref(), Some("customer"));
        assert!(profile.avatar.is_none());
    }

    #[test]
    fn test_registered_user_id() {
        assert_eq!(
            registered_user_id("SUCCESS: Successfully register new account. User ID: 12"),
            Some(12)
        );
        assert_eq!(registered_user_id("User ID:7"), Some(7));
        assert_eq!(registered_user_id("SUCCESS"), None);
        assert_eq!(registered_user_id("User ID: none"), None);
    }
}
