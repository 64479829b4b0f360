//! Stored-procedure invocations as plain data.
//!
//! A [`ProcedureCall`] is built by a route, handed to a
//! [`ProcedureClient`](crate::db::ProcedureClient), and can be inspected in
//! tests without a database.

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tiberius::{ColumnData, ToSql};

use crate::db::error::DbError;

/// A typed, nullable procedure argument.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(Option<i32>),
    Decimal(Option<Decimal>),
    NVarChar(Option<String>),
    Date(Option<NaiveDate>),
    Bit(Option<bool>),
}

impl SqlParam {
    /// Name of the SQL type, for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlParam::Int(_) => "int",
            SqlParam::Decimal(_) => "decimal",
            SqlParam::NVarChar(_) => "nvarchar",
            SqlParam::Date(_) => "date",
            SqlParam::Bit(_) => "bit",
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            SqlParam::Int(v) => v.is_none(),
            SqlParam::Decimal(v) => v.is_none(),
            SqlParam::NVarChar(v) => v.is_none(),
            SqlParam::Date(v) => v.is_none(),
            SqlParam::Bit(v) => v.is_none(),
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            SqlParam::Int(v) => *v,
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlParam::NVarChar(v) => v.as_deref(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            SqlParam::Decimal(v) => *v,
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            SqlParam::Date(v) => *v,
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlParam::Bit(v) => *v,
            _ => None,
        }
    }
}

impl From<Option<i32>> for SqlParam {
    fn from(v: Option<i32>) -> Self {
        SqlParam::Int(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(Some(v))
    }
}

impl From<Option<Decimal>> for SqlParam {
    fn from(v: Option<Decimal>) -> Self {
        SqlParam::Decimal(v)
    }
}

impl From<Decimal> for SqlParam {
    fn from(v: Decimal) -> Self {
        SqlParam::Decimal(Some(v))
    }
}

impl From<Option<String>> for SqlParam {
    fn from(v: Option<String>) -> Self {
        SqlParam::NVarChar(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::NVarChar(Some(v.to_string()))
    }
}

impl From<Option<NaiveDate>> for SqlParam {
    fn from(v: Option<NaiveDate>) -> Self {
        SqlParam::Date(v)
    }
}

impl From<NaiveDate> for SqlParam {
    fn from(v: NaiveDate) -> Self {
        SqlParam::Date(Some(v))
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Bit(Some(v))
    }
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> ColumnData<'_> {
        match self {
            SqlParam::Int(v) => ColumnData::I32(*v),
            SqlParam::Decimal(Some(d)) => d.to_sql(),
            SqlParam::Decimal(None) => ColumnData::Numeric(None),
            SqlParam::NVarChar(v) => ColumnData::String(v.as_deref().map(Cow::Borrowed)),
            SqlParam::Date(Some(d)) => d.to_sql(),
            SqlParam::Date(None) => ColumnData::Date(None),
            SqlParam::Bit(v) => ColumnData::Bit(*v),
        }
    }
}

/// One named stored procedure with its named arguments, in binding order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    name: &'static str,
    params: Vec<(&'static str, SqlParam)>,
}

impl ProcedureCall {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
        }
    }

    /// Bind a named input. Names are given without the leading `@`.
    pub fn input(mut self, name: &'static str, value: impl Into<SqlParam>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[(&'static str, SqlParam)] {
        &self.params
    }

    /// Look up a bound argument by name.
    pub fn param(&self, name: &str) -> Option<&SqlParam> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Render the `EXEC` batch with positional placeholders `@P1..@Pn`.
    ///
    /// Identifiers are checked so the batch can never carry anything but a
    /// procedure name and parameter names.
    pub fn to_exec_sql(&self) -> Result<String, DbError> {
        check_identifier(self.name)?;

        let mut sql = format!("EXEC [{}]", self.name);
        for (i, (name, _)) in self.params.iter().enumerate() {
            check_identifier(name)?;
            sql.push_str(if i == 0 { " " } else { ", " });
            sql.push_str(&format!("@{} = @P{}", name, i + 1));
        }
        Ok(sql)
    }
}

fn check_identifier(ident: &str) -> Result<(), DbError> {
    let mut chars = ident.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidIdentifier(ident.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_sql_binds_positionally() {
        let call = ProcedureCall::new("cart_add_item")
            .input("p_user_id", 1)
            .input("p_variant_id", 5)
            .input("p_quantity", 2);

        assert_eq!(
            call.to_exec_sql().unwrap(),
            "EXEC [cart_add_item] @p_user_id = @P1, @p_variant_id = @P2, @p_quantity = @P3"
        );
    }

    #[test]
    fn test_exec_sql_without_params() {
        let call = ProcedureCall::new("view_orders");
        assert_eq!(call.to_exec_sql().unwrap(), "EXEC [view_orders]");
    }

    #[test]
    fn test_rejects_bad_identifiers() {
        let call = ProcedureCall::new("browse_products; DROP TABLE users");
        assert!(matches!(call.to_exec_sql(), Err(DbError::InvalidIdentifier(_))));

        let call = ProcedureCall::new("browse_products").input("p limit", 1);
        assert!(matches!(call.to_exec_sql(), Err(DbError::InvalidIdentifier(_))));
    }

    #[test]
    fn test_param_lookup() {
        let call = ProcedureCall::new("checkout")
            .input("p_user_id", 7)
            .input("p_voucher_id", None::<i32>);

        assert_eq!(call.param("p_user_id").and_then(SqlParam::as_int), Some(7));
        assert!(call.param("p_voucher_id").unwrap().is_null());
        assert!(call.param("p_missing").is_none());
    }

    #[test]
    fn test_null_params_keep_their_type() {
        assert!(matches!(SqlParam::Int(None).to_sql(), ColumnData::I32(None)));
        assert!(matches!(SqlParam::NVarChar(None).to_sql(), ColumnData::String(None)));
        assert!(matches!(SqlParam::Bit(Some(true)).to_sql(), ColumnData::Bit(Some(true))));
    }
}
