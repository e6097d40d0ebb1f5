//! Record shapes: the declared slots a schema decode fills.
//!
//! A shape is built once per decode call from [`Record::shape`]. Each slot
//! carries its effective name, the kind its storage type accepts, and a
//! setter. Header names are matched against slot names through a name index
//! that ignores the case of the first character.

use std::collections::HashMap;
use std::fmt;

use csvtab_model::{TypeKind, Value};

use crate::error::{Result, TableError};

/// A type whose rows can be decoded from a table.
///
/// Implementations are usually generated with [`record_shape!`](crate::record_shape).
pub trait Record: Default + 'static {
    fn shape() -> RecordShape<Self>;
}

/// Storage types a slot may have.
///
/// `from_value` returns `None` when the coerced column value is of another
/// kind; the binder reports that as a binding error.
pub trait SlotValue: Sized {
    const KIND: TypeKind;

    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! int_slot_value {
    ($($ty:ty),*) => {
        $(
            impl SlotValue for $ty {
                const KIND: TypeKind = TypeKind::Int;

                fn from_value(value: Value) -> Option<Self> {
                    // Out-of-range integers take the zero default like any malformed cell.
                    value.as_i64().map(|n| <$ty>::try_from(n).unwrap_or_default())
                }
            }
        )*
    };
}

int_slot_value!(i8, i16, i32, i64, isize);

impl SlotValue for f64 {
    const KIND: TypeKind = TypeKind::Float;

    fn from_value(value: Value) -> Option<Self> {
        value.as_f64()
    }
}

impl SlotValue for f32 {
    const KIND: TypeKind = TypeKind::Float;

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Option<Self> {
        value.as_f64().map(|n| n as f32)
    }
}

impl SlotValue for bool {
    const KIND: TypeKind = TypeKind::Bool;

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl SlotValue for String {
    const KIND: TypeKind = TypeKind::String;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(text),
            _ => None,
        }
    }
}

type Assign<R> = Box<dyn Fn(&mut R, Value) -> bool>;

/// One named, typed slot of a record.
pub struct Slot<R> {
    name: String,
    kind: TypeKind,
    assign: Assign<R>,
}

impl<R: 'static> Slot<R> {
    /// Declares a slot named `name` stored through `access`.
    pub fn new<T: SlotValue + 'static>(name: impl Into<String>, access: fn(&mut R) -> &mut T) -> Self {
        Self {
            name: name.into(),
            kind: T::KIND,
            assign: Box::new(move |record, value| match T::from_value(value) {
                Some(value) => {
                    *access(record) = value;
                    true
                }
                None => false,
            }),
        }
    }
}

impl<R> Slot<R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of value the slot's storage type accepts.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Stores `value` into the slot of `record`.
    pub fn assign(&self, record: &mut R, value: Value) -> Result<()> {
        let column = value.kind();
        if (self.assign)(record, value) {
            Ok(())
        } else {
            Err(TableError::Binding {
                slot: self.name.clone(),
                column,
                target: self.kind,
            })
        }
    }
}

impl<R> fmt::Debug for Slot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The ordered slots of a record plus its name index.
pub struct RecordShape<R> {
    slots: Vec<Slot<R>>,
    index: HashMap<String, usize>,
    // Whole-name case folded; `None` marks names shared by several slots.
    folded: HashMap<String, Option<usize>>,
}

impl<R> RecordShape<R> {
    pub fn new(slots: Vec<Slot<R>>) -> Self {
        let mut index = HashMap::with_capacity(slots.len());
        let mut folded: HashMap<String, Option<usize>> = HashMap::with_capacity(slots.len());
        for (position, slot) in slots.iter().enumerate() {
            index.insert(normalize_name(&slot.name), position);
            folded
                .entry(slot.name.to_ascii_lowercase())
                .and_modify(|entry| *entry = None)
                .or_insert(Some(position));
        }
        Self {
            slots,
            index,
            folded,
        }
    }

    /// Checks the shape can receive rows at all.
    pub fn validate(&self) -> Result<()> {
        if self.slots.is_empty() {
            return Err(TableError::InvalidTarget {
                reason: "record shape has no slots".to_string(),
            });
        }
        if self.slots.iter().any(|slot| slot.name.is_empty()) {
            return Err(TableError::InvalidTarget {
                reason: "record shape has a slot with an empty name".to_string(),
            });
        }
        Ok(())
    }

    /// Finds the slot bound to a header name.
    ///
    /// The first character of both names is compared without case. When that
    /// finds nothing, a whole-name ASCII case-insensitive match is used if it
    /// is unambiguous, so `ID` still binds to a slot named `Id`.
    pub fn lookup(&self, name: &str) -> Option<&Slot<R>> {
        let position = match self.index.get(&normalize_name(name)) {
            Some(position) => Some(*position),
            None => self
                .folded
                .get(&name.to_ascii_lowercase())
                .copied()
                .flatten(),
        };
        position.map(|position| &self.slots[position])
    }

    pub fn slots(&self) -> &[Slot<R>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<R> fmt::Debug for RecordShape<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordShape")
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

/// Lower-cases the first character of a name and keeps the rest.
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Implements [`Record`] for a struct from its field list.
///
/// Each field binds to the column sharing its name; `=> "column"` overrides
/// the name. Field types must implement [`SlotValue`].
///
/// ```ignore
/// #[derive(Debug, Default)]
/// struct Goods {
///     id: i64,
///     name: String,
///     cost: f64,
/// }
///
/// csvtab_ingest::record_shape!(Goods { id, name, cost => "price" });
/// ```
#[macro_export]
macro_rules! record_shape {
    (@name $field:ident) => {
        stringify!($field)
    };
    (@name $field:ident, $name:literal) => {
        $name
    };
    ($record:ty { $($field:ident $(=> $name:literal)?),* $(,)? }) => {
        impl $crate::Record for $record {
            fn shape() -> $crate::RecordShape<Self> {
                $crate::RecordShape::new(vec![
                    $(
                        $crate::Slot::<$record>::new(
                            $crate::record_shape!(@name $field $(, $name)?),
                            |record: &mut $record| &mut record.$field,
                        ),
                    )*
                ])
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        id: i32,
        title: String,
        weight: f32,
        active: bool,
    }

    crate::record_shape!(Item { id => "Id", title => "name", weight, active });

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Name"), "name");
        assert_eq!(normalize_name("ID"), "iD");
        assert_eq!(normalize_name("id"), "id");
        assert_eq!(normalize_name("Élan"), "élan");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_lookup_first_character_case() {
        let shape = Item::shape();
        assert_eq!(shape.lookup("id").map(Slot::name), Some("Id"));
        assert_eq!(shape.lookup("Id").map(Slot::name), Some("Id"));
        assert_eq!(shape.lookup("Name").map(Slot::name), Some("name"));
        assert_eq!(shape.lookup("Weight").map(Slot::name), Some("weight"));
        assert!(shape.lookup("title").is_none());
    }

    #[test]
    fn test_lookup_whole_name_fallback() {
        let shape = Item::shape();
        assert_eq!(shape.lookup("ID").map(Slot::name), Some("Id"));
        assert_eq!(shape.lookup("NAME").map(Slot::name), Some("name"));
    }

    #[test]
    fn test_ambiguous_fallback_is_ignored() {
        #[derive(Default)]
        #[allow(dead_code)]
        struct Pair {
            upper: i64,
            lower: i64,
        }
        crate::record_shape!(Pair { upper => "Code", lower => "cODE" });

        let shape = Pair::shape();
        assert_eq!(shape.lookup("code").map(Slot::name), Some("Code"));
        assert!(shape.lookup("COde").is_none());
    }

    #[test]
    fn test_slot_kinds_follow_storage_type() {
        let shape = Item::shape();
        let kinds: Vec<TypeKind> = shape.slots().iter().map(Slot::kind).collect();
        assert_eq!(
            kinds,
            vec![TypeKind::Int, TypeKind::String, TypeKind::Float, TypeKind::Bool]
        );
    }

    #[test]
    fn test_assign_and_mismatch() {
        let shape = Item::shape();
        let mut item = Item::default();
        let id = shape.lookup("id").unwrap();
        id.assign(&mut item, Value::Int(300)).unwrap();
        assert_eq!(item.id, 300);

        let result = id.assign(&mut item, Value::String("x".to_string()));
        assert!(matches!(
            result,
            Err(TableError::Binding {
                column: TypeKind::String,
                target: TypeKind::Int,
                ..
            })
        ));
    }

    #[test]
    fn test_narrow_integer_overflow_is_zero() {
        #[derive(Default)]
        struct Tiny {
            level: i8,
        }
        crate::record_shape!(Tiny { level });

        let shape = Tiny::shape();
        let mut tiny = Tiny::default();
        shape.slots()[0].assign(&mut tiny, Value::Int(1000)).unwrap();
        assert_eq!(tiny.level, 0);
    }

    #[test]
    fn test_validate_rejects_empty_shapes() {
        let shape: RecordShape<Item> = RecordShape::new(Vec::new());
        assert!(matches!(
            shape.validate(),
            Err(TableError::InvalidTarget { .. })
        ));

        let shape = RecordShape::new(vec![Slot::<Item>::new("", |item: &mut Item| &mut item.id)]);
        assert!(matches!(
            shape.validate(),
            Err(TableError::InvalidTarget { .. })
        ));
    }
}
