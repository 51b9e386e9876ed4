use super::value::Value;

/// Rule producing a property's initial value during default construction
///
/// The absence of a strategy leaves the type's zero value. Arguments are
/// literals; they are matched against overload parameter types once, when the
/// owning schema is synthesized.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValueStrategy {
    /// Assign the value, converted to the declared type
    Constant(Value),
    /// Assign `new type_name(args...)`
    ConstructorCall { type_name: String, args: Vec<Value> },
    /// Call a static method of `type_name`, either returning the value or
    /// mutating the already-initialized value in place
    StaticCall {
        type_name: String,
        method: String,
        args: Vec<Value>,
    },
}

impl DefaultValueStrategy {
    pub fn constant(value: impl Into<Value>) -> Self {
        DefaultValueStrategy::Constant(value.into())
    }

    pub fn construct(type_name: impl Into<String>, args: Vec<Value>) -> Self {
        DefaultValueStrategy::ConstructorCall {
            type_name: type_name.into(),
            args,
        }
    }

    pub fn static_call(
        type_name: impl Into<String>,
        method: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        DefaultValueStrategy::StaticCall {
            type_name: type_name.into(),
            method: method.into(),
            args,
        }
    }

    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            DefaultValueStrategy::Constant(_) => "constant",
            DefaultValueStrategy::ConstructorCall { .. } => "constructor_call",
            DefaultValueStrategy::StaticCall { .. } => "static_call",
        }
    }
}
