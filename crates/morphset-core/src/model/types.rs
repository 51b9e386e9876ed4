use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::value::{EnumValue, Value};

/// Builds a value-object from literal constructor arguments
pub type ConstructorFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;
/// Static method returning the default value
pub type ReturningFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;
/// Static method mutating the already-initialized value in place
pub type InPlaceFn = Arc<dyn Fn(&mut Value, &[Value]) + Send + Sync>;

/// Declared type of a property or of a collection's items
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    Str,
    Enum(Arc<EnumType>),
    Object(Arc<ObjectType>),
    List(Box<ValueType>),
}

/// How well a literal fits a parameter type during overload matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fit {
    Exact,
    Converted,
}

impl ValueType {
    pub fn list_of(item: ValueType) -> Self {
        ValueType::List(Box::new(item))
    }

    /// Display name, e.g. `string` or `list<Color>`
    pub fn name(&self) -> String {
        match self {
            ValueType::Bool => "bool".to_string(),
            ValueType::Int => "int".to_string(),
            ValueType::Float => "float".to_string(),
            ValueType::Str => "string".to_string(),
            ValueType::Enum(e) => e.name().to_string(),
            ValueType::Object(o) => o.name().to_string(),
            ValueType::List(item) => format!("list<{}>", item.name()),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ValueType::List(_))
    }

    /// Item type of a collection type
    pub fn item_type(&self) -> Option<&ValueType> {
        match self {
            ValueType::List(item) => Some(item),
            _ => None,
        }
    }

    /// The value a property holds when no default-value strategy applies
    pub fn zero(&self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::Int(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::Str => Value::Str(String::new()),
            ValueType::Enum(e) => Value::Enum(EnumValue {
                type_name: e.name().to_string(),
                ordinal: 0,
            }),
            ValueType::Object(_) => Value::Null,
            ValueType::List(_) => Value::List(Vec::new()),
        }
    }

    /// Primitives and enums always compare; object types only when declared so
    pub fn supports_equality(&self) -> bool {
        match self {
            ValueType::Object(o) => o.has_equality(),
            ValueType::List(item) => item.supports_equality(),
            _ => true,
        }
    }

    /// First object type in this type (or its items) that lacks equality
    pub fn find_missing_equality(&self) -> Option<&ObjectType> {
        match self {
            ValueType::Object(o) if !o.has_equality() => Some(o),
            ValueType::List(item) => item.find_missing_equality(),
            _ => None,
        }
    }

    /// How `value` fits this type, if at all
    pub fn fit(&self, value: &Value) -> Option<Fit> {
        match (self, value) {
            (ValueType::Bool, Value::Bool(_))
            | (ValueType::Int, Value::Int(_))
            | (ValueType::Float, Value::Float(_))
            | (ValueType::Str, Value::Str(_)) => Some(Fit::Exact),
            (ValueType::Float, Value::Int(_)) => Some(Fit::Converted),
            // ordinal 0 is the zero value even when no member declares it
            (ValueType::Enum(e), Value::Enum(v)) if v.type_name == e.name() => {
                (v.ordinal == 0 || e.name_of(v.ordinal).is_some()).then_some(Fit::Exact)
            }
            (ValueType::Enum(e), Value::Int(ordinal)) => {
                e.name_of(*ordinal).map(|_| Fit::Converted)
            }
            (ValueType::Enum(e), Value::Str(name)) => e.ordinal_of(name).map(|_| Fit::Converted),
            (ValueType::Object(_), Value::Null) => Some(Fit::Exact),
            (ValueType::Object(o), Value::Object(v)) if v.type_name == o.name() => {
                Some(Fit::Exact)
            }
            (ValueType::List(item), Value::List(items)) => {
                let mut fit = Fit::Exact;
                for v in items {
                    fit = fit.max(item.fit(v)?);
                }
                Some(fit)
            }
            _ => None,
        }
    }

    /// Convert `value` to this type's representation
    ///
    /// Ints widen to floats; enums convert from their ordinal or member name.
    /// Returns `None` when the value cannot represent this type.
    pub fn coerce(&self, value: Value) -> Option<Value> {
        match (self, value) {
            (ValueType::Float, Value::Int(i)) => Some(Value::Float(i as f64)),
            (ValueType::Enum(e), Value::Int(ordinal)) => {
                e.name_of(ordinal)?;
                Some(Value::Enum(EnumValue {
                    type_name: e.name().to_string(),
                    ordinal,
                }))
            }
            (ValueType::Enum(e), Value::Str(name)) => e.value_of(&name),
            (ValueType::List(item), Value::List(items)) => items
                .into_iter()
                .map(|v| item.coerce(v))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            (ty, value) => match ty.fit(&value)? {
                Fit::Exact => Some(value),
                Fit::Converted => None,
            },
        }
    }
}

/// An enum type: members with their underlying ordinals
#[derive(Debug, Clone)]
pub struct EnumType {
    name: String,
    members: Vec<(String, i64)>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Arc<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Arc::new(Self {
            name: name.into(),
            members: members.into_iter().map(|(n, o)| (n.into(), o)).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[(String, i64)] {
        &self.members
    }

    pub fn ordinal_of(&self, member: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|(n, _)| n == member)
            .map(|(_, o)| *o)
    }

    pub fn name_of(&self, ordinal: i64) -> Option<&str> {
        self.members
            .iter()
            .find(|(_, o)| *o == ordinal)
            .map(|(n, _)| n.as_str())
    }

    /// The enum value for a member name
    pub fn value_of(&self, member: &str) -> Option<Value> {
        self.ordinal_of(member).map(|ordinal| {
            Value::Enum(EnumValue {
                type_name: self.name.clone(),
                ordinal,
            })
        })
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A constructor overload of an object type
#[derive(Clone)]
pub struct Constructor {
    params: Vec<ValueType>,
    build: ConstructorFn,
}

impl Constructor {
    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    pub fn build_fn(&self) -> &ConstructorFn {
        &self.build
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// The two accepted static-method shapes
#[derive(Clone)]
pub enum MethodShape {
    /// `method(args) -> V`
    Returning(ReturningFn),
    /// `method(&mut current, args)`
    InPlace(InPlaceFn),
}

/// A static method an object type exposes to default-value strategies
#[derive(Clone)]
pub struct StaticMethod {
    name: String,
    params: Vec<ValueType>,
    /// Returned (or mutated) type; `None` means the declaring type
    value_type: Option<ValueType>,
    shape: MethodShape,
}

impl StaticMethod {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    pub fn value_type(&self) -> Option<&ValueType> {
        self.value_type.as_ref()
    }

    pub fn shape(&self) -> &MethodShape {
        &self.shape
    }

    pub fn is_in_place(&self) -> bool {
        matches!(self.shape, MethodShape::InPlace(_))
    }
}

impl fmt::Debug for StaticMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMethod")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("value_type", &self.value_type)
            .field("in_place", &self.is_in_place())
            .finish()
    }
}

/// A value-object type, or a host type that only carries static methods
#[derive(Debug, Clone)]
pub struct ObjectType {
    name: String,
    equality: bool,
    is_abstract: bool,
    constructors: Vec<Constructor>,
    statics: Vec<StaticMethod>,
}

impl ObjectType {
    pub fn builder(name: impl Into<String>) -> ObjectTypeBuilder {
        ObjectTypeBuilder {
            inner: ObjectType {
                name: name.into(),
                equality: true,
                is_abstract: false,
                constructors: Vec::new(),
                statics: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_equality(&self) -> bool {
        self.equality
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// All overloads of the named static method
    pub fn statics_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a StaticMethod> {
        self.statics.iter().filter(move |m| m.name == name)
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Builder for [`ObjectType`]
pub struct ObjectTypeBuilder {
    inner: ObjectType,
}

impl ObjectTypeBuilder {
    /// The type has no value equality (identity semantics only)
    pub fn without_equality(mut self) -> Self {
        self.inner.equality = false;
        self
    }

    /// The type cannot be instantiated
    pub fn abstract_type(mut self) -> Self {
        self.inner.is_abstract = true;
        self
    }

    pub fn constructor<F>(mut self, params: Vec<ValueType>, build: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.inner.constructors.push(Constructor {
            params,
            build: Arc::new(build),
        });
        self
    }

    pub fn static_returning<F>(
        mut self,
        name: impl Into<String>,
        params: Vec<ValueType>,
        returns: Option<ValueType>,
        call: F,
    ) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.inner.statics.push(StaticMethod {
            name: name.into(),
            params,
            value_type: returns,
            shape: MethodShape::Returning(Arc::new(call)),
        });
        self
    }

    pub fn static_in_place<F>(
        mut self,
        name: impl Into<String>,
        params: Vec<ValueType>,
        target: Option<ValueType>,
        call: F,
    ) -> Self
    where
        F: Fn(&mut Value, &[Value]) + Send + Sync + 'static,
    {
        self.inner.statics.push(StaticMethod {
            name: name.into(),
            params,
            value_type: target,
            shape: MethodShape::InPlace(Arc::new(call)),
        });
        self
    }

    pub fn build(self) -> Arc<ObjectType> {
        Arc::new(self.inner)
    }
}

/// Registry of the object types default-value strategies may reference
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, Arc<ObjectType>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any previous type of the same name
    pub fn register(&mut self, ty: Arc<ObjectType>) -> &mut Self {
        self.types.insert(ty.name().to_string(), ty);
        self
    }

    pub fn with(mut self, ty: Arc<ObjectType>) -> Self {
        self.register(ty);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ObjectType>> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
