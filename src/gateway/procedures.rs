//! The stored-procedure contract: one constructor per procedure, with the
//! parameter names and SQL types the database expects.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::db::ProcedureCall;

/// Filters for `browse_products`.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseFilter {
    pub keyword: Option<String>,
    pub category_slug: Option<String>,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub sort_by: String,
    pub limit: i32,
    pub offset: i32,
}

pub fn browse_products(filter: &BrowseFilter) -> ProcedureCall {
    ProcedureCall::new("browse_products")
        .input("p_keyword", filter.keyword.clone())
        .input("p_category_slug", filter.category_slug.clone())
        .input("p_min_price", filter.min_price)
        .input("p_max_price", filter.max_price)
        .input("p_sort_by", filter.sort_by.as_str())
        .input("p_limit", filter.limit)
        .input("p_offset", filter.offset)
}

/// The admin listing only pages; every filter is left to the procedure's own
/// defaults.
pub fn browse_products_page(limit: i32, offset: i32) -> ProcedureCall {
    ProcedureCall::new("browse_products")
        .input("p_limit", limit)
        .input("p_offset", offset)
}

pub fn get_product_details(product_id: Option<i32>) -> ProcedureCall {
    ProcedureCall::new("get_product_details").input("p_product_id", product_id)
}

/// Profile changes; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

pub fn update_profile(update: ProfileUpdate) -> ProcedureCall {
    ProcedureCall::new("update_profile")
        .input("p_user_id", update.user_id)
        .input("p_name", update.name)
        .input("p_phone", update.phone)
        .input("p_password", update.password)
        .input("p_avatar", update.avatar)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

pub fn register_user(registration: Registration) -> ProcedureCall {
    ProcedureCall::new("register_user")
        .input("p_email", registration.email)
        .input("p_password", registration.password)
        .input("p_name", registration.name)
        .input("p_phone", registration.phone)
}

pub fn login_user(email: Option<String>, password: Option<String>) -> ProcedureCall {
    ProcedureCall::new("login_user")
        .input("p_email", email)
        .input("p_password", password)
}

pub fn cart_add_item(user_id: Option<i32>, variant_id: Option<i32>, quantity: i32) -> ProcedureCall {
    ProcedureCall::new("cart_add_item")
        .input("p_user_id", user_id)
        .input("p_variant_id", variant_id)
        .input("p_quantity", quantity)
}

pub fn cart_view_details(user_id: i32) -> ProcedureCall {
    ProcedureCall::new("cart_view_details").input("p_user_id", user_id)
}

pub fn cart_update_item_quantity(
    user_id: Option<i32>,
    variant_id: Option<i32>,
    new_quantity: Option<i32>,
) -> ProcedureCall {
    ProcedureCall::new("cart_update_item_quantity")
        .input("p_user_id", user_id)
        .input("p_variant_id", variant_id)
        .input("p_new_quantity", new_quantity)
}

pub fn cart_remove_item(user_id: Option<i32>, variant_id: Option<i32>) -> ProcedureCall {
    ProcedureCall::new("cart_remove_item")
        .input("p_user_id", user_id)
        .input("p_variant_id", variant_id)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutRequest {
    pub user_id: Option<i32>,
    pub address_id: Option<i32>,
    pub payment_method_id: Option<i32>,
    pub voucher_id: Option<i32>,
}

pub fn checkout(request: CheckoutRequest) -> ProcedureCall {
    ProcedureCall::new("checkout")
        .input("p_user_id", request.user_id)
        .input("p_address_id", request.address_id)
        .input("p_payment_method_id", request.payment_method_id)
        .input("p_voucher_id", request.voucher_id)
}

pub fn get_my_addresses(user_id: Option<i32>) -> ProcedureCall {
    ProcedureCall::new("get_my_addresses").input("p_user_id", user_id)
}

/// Address book entry as submitted by the add/edit forms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressFields {
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub detail: Option<String>,
}

pub fn add_address(user_id: Option<i32>, address: AddressFields) -> ProcedureCall {
    ProcedureCall::new("add_address")
        .input("p_user_id", user_id)
        .input("p_recipient_name", address.recipient_name)
        .input("p_phone", address.phone)
        .input("p_city", address.city)
        .input("p_district", address.district)
        .input("p_detail", address.detail)
}

pub fn delete_address(address_id: Option<i32>, user_id: Option<i32>) -> ProcedureCall {
    ProcedureCall::new("delete_address")
        .input("p_address_id", address_id)
        .input("p_user_id", user_id)
}

pub fn update_address(
    address_id: Option<i32>,
    user_id: Option<i32>,
    address: AddressFields,
    is_default: bool,
) -> ProcedureCall {
    ProcedureCall::new("update_address")
        .input("p_address_id", address_id)
        .input("p_user_id", user_id)
        .input("p_recipient_name", address.recipient_name)
        .input("p_phone", address.phone)
        .input("p_city", address.city)
        .input("p_district", address.district)
        .input("p_detail", address.detail)
        .input("p_is_default", is_default)
}

pub fn view_my_vouchers(user_id: i32) -> ProcedureCall {
    ProcedureCall::new("view_my_vouchers").input("p_user_id", user_id)
}

pub fn collect_voucher(user_id: Option<i32>, voucher_code: Option<String>) -> ProcedureCall {
    ProcedureCall::new("collect_voucher")
        .input("p_user_id", user_id)
        .input("p_voucher_code", voucher_code)
}

pub fn view_order_history(user_id: i32) -> ProcedureCall {
    ProcedureCall::new("view_order_history").input("p_user_id", user_id)
}

pub fn cancel_order(user_id: Option<i32>, order_id: Option<i32>) -> ProcedureCall {
    ProcedureCall::new("cancel_order")
        .input("p_user_id", user_id)
        .input("p_order_id", order_id)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductEdit {
    pub product_id: Option<i32>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
}

/// Prices bind as DECIMAL(10,2), rounding half away from zero like the
/// server's own conversion.
pub fn update_product(edit: ProductEdit) -> ProcedureCall {
    ProcedureCall::new("update_product")
        .input("p_product_id", edit.product_id)
        .input("p_name", edit.name)
        .input(
            "p_price",
            edit.price
                .map(|p| p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)),
        )
        .input("p_thumbnail", edit.thumbnail)
        .input("p_description", edit.description)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub original_price: Option<Decimal>,
    pub price: Option<Decimal>,
    pub thumbnail: Option<String>,
    /// JSON array text, e.g. `[1,2]`.
    pub category_ids: Option<String>,
}

pub fn create_product(product: NewProduct) -> ProcedureCall {
    ProcedureCall::new("create_product")
        .input("p_name", product.name)
        .input("p_slug", product.slug)
        .input("p_description", product.description)
        .input("p_original_price", product.original_price)
        .input("p_price", product.price)
        .input("p_thumbnail", product.thumbnail)
        .input("p_category_ids", product.category_ids)
}

pub fn delete_product(product_id: Option<i32>) -> ProcedureCall {
    ProcedureCall::new("delete_product").input("p_product_id", product_id)
}

pub fn view_orders(status: Option<String>) -> ProcedureCall {
    ProcedureCall::new("view_orders").input("p_status", status)
}

pub fn update_order_status(order_id: Option<i32>, new_status: Option<String>) -> ProcedureCall {
    ProcedureCall::new("update_order_status")
        .input("p_order_id", order_id)
        .input("p_new_status", new_status)
}

pub fn report_revenue_by_date(start: NaiveDate, end: NaiveDate) -> ProcedureCall {
    ProcedureCall::new("report_revenue_by_date")
        .input("p_start_date", start)
        .input("p_end_date", end)
}

pub fn report_best_sellers(limit: i32, start: NaiveDate, end: NaiveDate) -> ProcedureCall {
    ProcedureCall::new("report_best_sellers")
        .input("p_limit", limit)
        .input("p_start_date", start)
        .input("p_end_date", end)
}
