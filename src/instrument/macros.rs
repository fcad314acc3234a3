//! The `tracked!` declarative macro

/// Declares a tracked type.
///
/// Sections are optional but must appear in this order: `values`,
/// `references`, `lists`, `sets`, `maps`, `collections`. Every field names
/// its setter.
///
/// ```ignore
/// smartvo::tracked! {
///     #[derive(Debug)]
///     pub struct Company {
///         values {
///             name: Option<String> => set_name,
///         }
///         references {
///             parent: Option<Shared<Company>> => set_parent,
///         }
///         lists {
///             staff: Shared<Employee> => set_staff,
///         }
///         maps {
///             offices: String => Shared<Office> => set_offices,
///         }
///     }
/// }
/// ```
///
/// Value and reference fields are private; a getter named after the field
/// and the declared setter are generated. Reference fields must implement
/// `Element` and are enumerated as children when they hold a tracked node.
/// Container fields are public tracked containers; their setter takes the
/// raw `Vec`, `HashSet` or `HashMap` and stores a freshly wrapped container.
/// Every field type must implement `Default`. Accessors a caller never
/// uses do not raise `dead_code`.
#[macro_export]
macro_rules! tracked {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(values {
                $($vfield:ident : $vty:ty => $vset:ident),* $(,)?
            })?
            $(references {
                $($rfield:ident : $rty:ty => $rset:ident),* $(,)?
            })?
            $(lists {
                $($lfield:ident : $lty:ty => $lset:ident),* $(,)?
            })?
            $(sets {
                $($sfield:ident : $sty:ty => $sset:ident),* $(,)?
            })?
            $(maps {
                $($mfield:ident : $mkty:ty => $mvty:ty => $mset:ident),* $(,)?
            })?
            $(collections {
                $($cfield:ident : $cty:ty => $cset:ident),* $(,)?
            })?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            version: $crate::version::VersionState,
            $($($vfield: $vty,)*)?
            $($($rfield: $rty,)*)?
            $($(pub $lfield: $crate::container::TrackedList<$lty>,)*)?
            $($(pub $sfield: $crate::container::TrackedSet<$sty>,)*)?
            $($(pub $mfield: $crate::container::TrackedMap<$mkty, $mvty>,)*)?
            $($(pub $cfield: $crate::container::TrackedCollection<$cty>,)*)?
        }

        #[allow(dead_code)]
        impl $name {
            /// Creates a new instance in the created state.
            pub fn new() -> Self {
                Self {
                    version: $crate::version::VersionState::new(),
                    $($($vfield: ::core::default::Default::default(),)*)?
                    $($($rfield: ::core::default::Default::default(),)*)?
                    $($($lfield: ::core::default::Default::default(),)*)?
                    $($($sfield: ::core::default::Default::default(),)*)?
                    $($($mfield: ::core::default::Default::default(),)*)?
                    $($($cfield: ::core::default::Default::default(),)*)?
                }
            }

            $($(
                pub fn $vfield(&self) -> &$vty {
                    &self.$vfield
                }

                pub fn $vset(&mut self, value: $vty) {
                    #[allow(unused_imports)]
                    use $crate::instrument::{AlwaysWrite as _, CompareOnWrite as _};
                    let probe = $crate::instrument::WriteProbe::<$vty>::new();
                    if (&&probe).assign(&mut self.$vfield, value) {
                        $crate::version::Versionable::touch_field(&self.version, stringify!($vfield));
                    }
                }
            )*)?

            $($(
                pub fn $rfield(&self) -> &$rty {
                    &self.$rfield
                }

                pub fn $rset(&mut self, value: $rty) {
                    #[allow(unused_imports)]
                    use $crate::instrument::{AlwaysWrite as _, CompareOnWrite as _};
                    let probe = $crate::instrument::WriteProbe::<$rty>::new();
                    if (&&probe).assign(&mut self.$rfield, value) {
                        $crate::version::Versionable::touch_field(&self.version, stringify!($rfield));
                    }
                }
            )*)?

            $($(
                pub fn $lset(&mut self, raw: ::std::vec::Vec<$lty>) {
                    self.$lfield = $crate::container::wrap($crate::container::ListStore(raw));
                }
            )*)?

            $($(
                pub fn $sset(&mut self, raw: ::std::collections::HashSet<$sty>) {
                    self.$sfield = $crate::container::wrap($crate::container::SetStore(raw));
                }
            )*)?

            $($(
                pub fn $mset(&mut self, raw: ::std::collections::HashMap<$mkty, $mvty>) {
                    self.$mfield = $crate::container::wrap($crate::container::MapStore(raw));
                }
            )*)?

            $($(
                pub fn $cset(&mut self, raw: ::std::vec::Vec<$cty>) {
                    self.$cfield = $crate::container::wrap($crate::container::BagStore(raw));
                }
            )*)?
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::version::Versionable for $name {
            fn touch_field(&self, field: &str) {
                $crate::version::Versionable::touch_field(&self.version, field);
            }

            fn create(&self) {
                $crate::version::Versionable::create(&self.version);
            }

            fn delete(&self) {
                $crate::version::Versionable::delete(&self.version);
            }

            fn is_created(&self) -> bool {
                $crate::version::Versionable::is_created(&self.version)
            }

            fn is_deleted(&self) -> bool {
                $crate::version::Versionable::is_deleted(&self.version)
            }

            fn is_dirty(&self) -> bool {
                $crate::version::Versionable::is_dirty(&self.version)
            }

            fn mark_clean(&self) {
                $crate::version::Versionable::mark_clean(&self.version);
            }

            fn version_id(&self) -> $crate::version::VersionId {
                $crate::version::Versionable::version_id(&self.version)
            }

            fn set_version_id(&self, id: $crate::version::VersionId) {
                $crate::version::Versionable::set_version_id(&self.version, id);
            }
        }

        impl $crate::node::Node for $name {
            fn versionable(&self) -> ::core::option::Option<&dyn $crate::version::Versionable> {
                ::core::option::Option::Some(self)
            }

            #[allow(unused_mut)]
            fn children(&self) -> ::std::vec::Vec<$crate::node::Child<'_>> {
                let mut children = ::std::vec::Vec::new();
                $($(
                    if let ::core::option::Option::Some(child) =
                        $crate::node::Element::child(&self.$rfield)
                    {
                        children.push(child);
                    }
                )*)?
                $($(children.push($crate::node::Child::Embedded(&self.$lfield));)*)?
                $($(children.push($crate::node::Child::Embedded(&self.$sfield));)*)?
                $($(children.push($crate::node::Child::Embedded(&self.$mfield));)*)?
                $($(children.push($crate::node::Child::Embedded(&self.$cfield));)*)?
                children
            }

            fn type_name(&self) -> &'static str {
                stringify!($name)
            }
        }

        impl $crate::instrument::Instrumented for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            #[allow(unused_imports, unused_mut)]
            fn fields() -> ::std::vec::Vec<$crate::instrument::FieldInfo> {
                use $crate::instrument::{AlwaysWrite as _, CompareOnWrite as _};
                use $crate::instrument::{FieldInfo, WriteSemantics};
                use $crate::container::ContainerKind;

                let mut fields = ::std::vec::Vec::new();
                $($(fields.push(FieldInfo {
                    name: stringify!($vfield),
                    setter: stringify!($vset),
                    semantics: (&&$crate::instrument::WriteProbe::<$vty>::new()).semantics(),
                });)*)?
                $($(fields.push(FieldInfo {
                    name: stringify!($rfield),
                    setter: stringify!($rset),
                    semantics: (&&$crate::instrument::WriteProbe::<$rty>::new()).semantics(),
                });)*)?
                $($(fields.push(FieldInfo {
                    name: stringify!($lfield),
                    setter: stringify!($lset),
                    semantics: WriteSemantics::Container(ContainerKind::List),
                });)*)?
                $($(fields.push(FieldInfo {
                    name: stringify!($sfield),
                    setter: stringify!($sset),
                    semantics: WriteSemantics::Container(ContainerKind::Set),
                });)*)?
                $($(fields.push(FieldInfo {
                    name: stringify!($mfield),
                    setter: stringify!($mset),
                    semantics: WriteSemantics::Container(ContainerKind::Map),
                });)*)?
                $($(fields.push(FieldInfo {
                    name: stringify!($cfield),
                    setter: stringify!($cset),
                    semantics: WriteSemantics::Container(ContainerKind::Collection),
                });)*)?
                fields
            }

            fn version_state(&self) -> &$crate::version::VersionState {
                &self.version
            }
        }
    };
}
