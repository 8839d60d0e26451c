//! `define_port_error!`: declares a port error enum with `thiserror` messages
//! and one snake_case constructor per variant.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
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
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum RelayPortError {
            Unreachable { host: String } => "relay unreachable: {host}",
            Throttled { retry_after: u64 } => "relay throttled for {retry_after}s",
            Rejected { reason: String, code: u16 } => "relay rejected message: {reason} ({code})",
            Disabled => "relay disabled",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = RelayPortError::unreachable("smtp.example.com");
        assert_eq!(err.to_string(), "relay unreachable: smtp.example.com");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = RelayPortError::throttled(30_u64);
        assert_eq!(err, RelayPortError::Throttled { retry_after: 30 });
    }

    #[test]
    fn mixed_fields_and_unit_variants_get_constructors() {
        let err = RelayPortError::rejected("mailbox full", 552_u16);
        assert_eq!(err.to_string(), "relay rejected message: mailbox full (552)");
        assert_eq!(RelayPortError::disabled().to_string(), "relay disabled");
    }
}
