//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`, `from_attr()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use bazaar_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let product_id = ProductId::new(1);
/// let order_id = OrderId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }

            /// Parse an ID carried in a markup data attribute.
            ///
            /// Leading whitespace and an optional sign are accepted, then the
            /// longest run of ASCII digits is used; trailing text is ignored.
            /// Returns `None` when no digits lead the value or it overflows.
            #[must_use]
            pub fn from_attr(value: &str) -> Option<Self> {
                $crate::types::id::parse_leading_int(value).map(Self)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);

/// Parse the leading integer of an attribute value.
#[doc(hidden)]
#[must_use]
pub fn parse_leading_int(value: &str) -> Option<i32> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..)?),
        Some(b'+') => (false, trimmed.get(1..)?),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let digits = rest.get(..digits_len).filter(|d| !d.is_empty())?;
    let magnitude = digits.parse::<i32>().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attr_plain() {
        assert_eq!(ProductId::from_attr("4"), Some(ProductId::new(4)));
        assert_eq!(ProductId::from_attr("  12"), Some(ProductId::new(12)));
    }

    #[test]
    fn test_from_attr_ignores_trailing_text() {
        assert_eq!(ProductId::from_attr("4abc"), Some(ProductId::new(4)));
        assert_eq!(ProductId::from_attr("7 "), Some(ProductId::new(7)));
    }

    #[test]
    fn test_from_attr_signed() {
        assert_eq!(ProductId::from_attr("-3"), Some(ProductId::new(-3)));
        assert_eq!(ProductId::from_attr("+3"), Some(ProductId::new(3)));
    }

    #[test]
    fn test_from_attr_rejects_non_numeric() {
        assert_eq!(ProductId::from_attr(""), None);
        assert_eq!(ProductId::from_attr("abc"), None);
        assert_eq!(ProductId::from_attr("-"), None);
        assert_eq!(ProductId::from_attr("99999999999"), None);
    }

    #[test]
    fn test_display_and_conversions() {
        let id = ProductId::from(5);
        assert_eq!(id.to_string(), "5");
        assert_eq!(i32::from(id), 5);
        assert_eq!(id.as_i32(), 5);
    }
}
