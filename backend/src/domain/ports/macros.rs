//! `define_port_error!`: error enums for driven ports.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum FeatureFlagError {
//!         Unavailable { message: String } => "feature flag service unavailable: {message}",
//!     }
//! }
//! // FeatureFlagError::unavailable("timed out")
//! ```
//!
//! Every variant gets a snake_case constructor taking `impl Into<T>` for each
//! field, so call sites pass `&str` where the variant stores `String`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: $ty),* } )?,
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Build [`" $name "::" $variant "`]."]
                    pub fn [<$variant:snake>]($( $($field: impl Into<$ty>),* )?) -> Self {
                        Self::$variant { $( $($field: $field.into()),* )? }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;
