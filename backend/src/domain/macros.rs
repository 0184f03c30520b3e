//! Declarative helpers for the domain error types.

/// Declare a domain error subtype pinned to one module and code.
///
/// The generated newtype wraps a [`ServiceError`](crate::domain::ServiceError),
/// exposes `MODULE` and `CODE` constants, formats its message from the
/// constructor arguments, and converts into the root type.
///
/// # Examples
/// ```
/// pfj_backend::define_service_error! {
///     /// Raised when an order cannot be located.
///     pub struct OrderMissingError(id: &str) {
///         module: "OrderService",
///         code: "ORDER_MISSING",
///         message: "Order {id} is missing",
///     }
/// }
///
/// let err = OrderMissingError::new("42");
/// assert_eq!(err.error_payload().message, "Order 42 is missing");
/// assert_eq!(OrderMissingError::CODE, "ORDER_MISSING");
/// ```
#[macro_export]
macro_rules! define_service_error {
    (
        $(#[$outer:meta])*
        pub struct $name:ident ( $($arg:ident : $ty:ty),* $(,)? ) {
            module: $module:literal,
            code: $code:literal,
            message: $message:literal $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name($crate::domain::ServiceError);

        impl $name {
            /// Module reported by every instance.
            pub const MODULE: &'static str = $module;
            /// Code reported by every instance.
            pub const CODE: &'static str = $code;

            /// Build the error, interpolating the arguments into the message.
            pub fn new($($arg: $ty),*) -> Self {
                Self($crate::domain::ServiceError::new(
                    Self::MODULE,
                    Self::CODE,
                    format!($message),
                ))
            }

            /// Attach structured context to the wrapped error.
            #[must_use]
            pub fn with_details(self, details: ::serde_json::Value) -> Self {
                Self(self.0.with_details(details))
            }

            /// Project into the transport-neutral payload.
            pub fn error_payload(&self) -> $crate::domain::ErrorPayload {
                self.0.error_payload()
            }

            /// Borrow the wrapped root error.
            pub fn as_service_error(&self) -> &$crate::domain::ServiceError {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::error::Error for $name {}

        impl ::std::convert::From<$name> for $crate::domain::ServiceError {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Declare a port error enum with `thiserror` messages and snake_case
/// constructors that accept `impl Into<T>` for each field.
macro_rules! define_port_error {
    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, ::thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
            )*
        }
    };
}

pub(crate) use define_port_error;
