//! Closed vocabularies scraped from the listings page.
//!
//! The page keeps growing its vocabulary (new jobs, new data centres), so
//! every scraped token is wrapped in [`Lenient`]: either one of the values
//! this crate knows about, or the raw text as it appeared on the page.

use std::fmt;

use serde::{Serialize, Serializer};

/// A closed set of string tokens with a fixed textual form.
pub trait KnownValue: Sized + Copy + fmt::Debug + PartialEq + 'static {
    /// Every known value, in declaration order.
    const ALL: &'static [Self];

    /// The token as it appears on the page and in config files.
    fn as_str(&self) -> &'static str;

    /// Exact, case-sensitive lookup.
    fn from_known(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Declares an enum of known page tokens.
///
/// Generates the enum, its [`KnownValue`] impl, `Display`, and string-based
/// serde impls. Deserialization is strict: unknown tokens are rejected.
macro_rules! known_values {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::models::KnownValue for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::models::KnownValue::as_str(self))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::models::KnownValue::as_str(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::models::KnownValue>::from_known(&raw).ok_or_else(|| {
                    ::serde::de::Error::unknown_variant(&raw, &[$( $text ),+])
                })
            }
        }
    };
}

pub(crate) use known_values;

/// A scraped token that is either known or kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lenient<T> {
    Known(T),
    Raw(String),
}

impl<T: KnownValue> Lenient<T> {
    /// Resolve a raw token. Never fails; unknown tokens become [`Lenient::Raw`].
    pub fn parse(raw: &str) -> Self {
        match T::from_known(raw) {
            Some(value) => Lenient::Known(value),
            None => Lenient::Raw(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Lenient::Known(value) => Some(*value),
            Lenient::Raw(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Lenient::Known(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Lenient::Known(value) => value.as_str(),
            Lenient::Raw(raw) => raw,
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Known(value)
    }
}

impl<T: KnownValue> fmt::Display for Lenient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: KnownValue> Serialize for Lenient<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
