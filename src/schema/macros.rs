//! Declarative placement table.
//!
//! `record!` is the single place where a record's wire layout is written
//! down: its tag, its attributes in emission order, and its child elements
//! in emission order. The same table expands into the struct, the decoder
//! (`Record::decode_body`) and the encoder (`Record::encode_body`), so the
//! two directions cannot drift apart.
//!
//! Attribute kinds:
//! - `required T` - plain `T`, missing attribute is a schema error
//! - `optional T` - `Field<T>`, absent / empty / value
//! - `zoned T` - `Field<ZonedTimestamp>` spread over an epoch attribute and
//!   its ctime twin, written `name = "epoch" / "text"`
//!
//! Child kinds: `one T` (`Option<T>`), `many T` (`Vec<T>`), `some T`
//! (`Vec<T>`, at least one) and `text T` (character content).

macro_rules! attr_type {
    (required $ty:ty) => { $ty };
    (optional $ty:ty) => { $crate::schema::Field<$ty> };
    (zoned $ty:ty) => { $crate::schema::Field<$ty> };
}

macro_rules! child_type {
    (one $ty:ty) => { Option<$ty> };
    (many $ty:ty) => { Vec<$ty> };
    (some $ty:ty) => { Vec<$ty> };
    (text $ty:ty) => { $ty };
}

macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident $(= $tag:literal)? {
            attributes {
                $(
                    $(#[$ameta:meta])*
                    $attr:ident: $akind:ident $aty:ty = $wire:literal $(/ $twin:literal)?
                ),* $(,)?
            }
            children {
                $(
                    $(#[$cmeta:meta])*
                    $child:ident: $ckind:ident $cty:ty
                ),* $(,)?
            }
            $(
                extra {
                    $(
                        $(#[$xmeta:meta])*
                        $extra:ident: $xty:ty
                    ),* $(,)?
                }
            )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
        pub struct $name {
            $(
                $(#[$ameta])*
                pub $attr: attr_type!($akind $aty),
            )*
            $(
                $(#[$cmeta])*
                pub $child: child_type!($ckind $cty),
            )*
            $($(
                $(#[$xmeta])*
                pub $extra: $xty,
            )*)?
        }

        impl $crate::schema::Record for $name {
            #[allow(unused_variables)]
            fn decode_body(
                fields: &mut $crate::parser::Fields<'_>,
            ) -> Result<Self, $crate::utils::error::DecodeError> {
                $( let $attr = fields.$akind($wire $(, $twin)?)?; )*
                $( let $child = fields.$ckind(stringify!($child))?; )*
                Ok(Self {
                    $( $attr, )*
                    $( $child, )*
                    $($( $extra: Default::default(), )*)?
                })
            }

            #[allow(unused_variables)]
            fn encode_body(&self, writer: &mut $crate::output::XmlWriter) {
                $( writer.$akind($wire $(, $twin)?, &self.$attr); )*
                $( writer.$ckind(stringify!($child), &self.$child); )*
            }
        }

        $(
            impl $crate::schema::Child for $name {
                fn accepts(tag: &str) -> bool {
                    tag == $tag
                }

                fn decode(
                    node: &$crate::parser::Node,
                    path: String,
                    options: &$crate::utils::config::DecodeOptions,
                ) -> Result<Self, $crate::utils::error::DecodeError> {
                    $crate::parser::decode_record(node, path, options)
                }

                fn encode(&self, writer: &mut $crate::output::XmlWriter) {
                    writer.open($tag);
                    $crate::schema::Record::encode_body(self, writer);
                    writer.close();
                }
            }
        )?
    };
}

macro_rules! scalar_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $wire:literal
            ),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Spelling used on the wire
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    _ => Err(format!(
                        "expected one of: {}",
                        [$($wire),+].join(", ")
                    )),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl $crate::schema::Scalar for $name {
            fn parse(raw: &str) -> Result<Self, String> {
                raw.parse()
            }

            fn render(&self) -> std::borrow::Cow<'_, str> {
                std::borrow::Cow::Borrowed(self.as_str())
            }
        }
    };
}
