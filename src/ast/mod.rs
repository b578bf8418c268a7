pub mod collection;
pub mod descriptor;
pub mod values;

pub use self::collection::{CollectionKind, CollectionMutation, CollectionOp, CollectionValue};
pub use self::descriptor::{ColumnValue, Operation, QueryDescriptor, Row, row};
pub use self::values::Scalar;
