pub mod schema;
pub mod strategy;
pub mod types;
pub mod value;

pub use schema::{PropertySchema, PropertyType, SchemaBuilder, SettingsSchema};
pub use strategy::DefaultValueStrategy;
pub use types::{
    Constructor, EnumType, Fit, MethodShape, ObjectType, ObjectTypeBuilder, StaticMethod,
    TypeCatalog, ValueType,
};
pub use value::{EnumValue, ObjectValue, Value};
