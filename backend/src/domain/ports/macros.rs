//! Helper macro for declaring port error enums.
//!
//! Each variant gets a snake-case constructor whose parameters accept
//! `impl Into<T>`, so adapters can write `PostRepositoryError::query("...")`.

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
        pub enum SamplePortError {
            Offline => "store offline",
            Query { message: String } => "query failed: {message}",
            Gone { id: i64, table: String } => "{table} row {id} is gone",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(
            SamplePortError::query("timeout").to_string(),
            "query failed: timeout"
        );
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::gone(4_i64, "posts");
        assert_eq!(err.to_string(), "posts row 4 is gone");
    }
}
