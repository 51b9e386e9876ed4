use morphset_core_types::SettingsKind;
use thiserror::Error;

/// Result type alias using MorphsetError
pub type Result<T> = std::result::Result<T, MorphsetError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised by the synthesis engine. Each kind maps to a stable error code that
/// can be used for programmatic error handling and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Schema construction
    DuplicateProperty,
    InvalidInput,

    // Generation (raised once per schema)
    DefaultResolution,
    ConflictingDefaults,
    NotFound,
    Unconstructible,
    MissingEquality,

    // Instance
    ReadOnlyViolation,
    NullSource,
    SchemaMismatch,
    TypeMismatch,
    NotObservable,
    AlreadyExists,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateProperty => "ERR_DUPLICATE_PROPERTY",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::DefaultResolution => "ERR_DEFAULT_RESOLUTION",
            ExErrorKind::ConflictingDefaults => "ERR_CONFLICTING_DEFAULTS",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Unconstructible => "ERR_UNCONSTRUCTIBLE",
            ExErrorKind::MissingEquality => "ERR_MISSING_EQUALITY",
            ExErrorKind::ReadOnlyViolation => "ERR_READ_ONLY_VIOLATION",
            ExErrorKind::NullSource => "ERR_NULL_SOURCE",
            ExErrorKind::SchemaMismatch => "ERR_SCHEMA_MISMATCH",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::NotObservable => "ERR_NOT_OBSERVABLE",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    schema: Option<String>,
    property: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            schema: None,
            property: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add schema name context
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add property name context
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the schema name context, if any
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Get the property name context, if any
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(schema) = &self.schema {
            write!(f, " (schema: {})", schema)?;
        }
        if let Some(property) = &self.property {
            write!(f, " (property: {})", property)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for schema construction, synthesis and instance operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MorphsetError {
    // ===== Schema Construction Errors =====
    /// Two properties share a name across the inheritance chain
    #[error("Duplicate property '{property}' in schema {schema}")]
    DuplicateProperty { schema: String, property: String },

    /// Schema or property name is empty
    #[error("Invalid schema: {reason}")]
    InvalidSchema { reason: String },

    // ===== Generation Errors =====
    /// No (or more than one) static method overload fits the declaration
    #[error("default-value resolution failed: {type_name}.{method}")]
    DefaultResolutionFailed {
        type_name: String,
        method: String,
        reason: String,
    },

    /// More than one default-value strategy declared on a property
    #[error("conflicting default-value declarations on {schema}.{property}")]
    ConflictingDefaults {
        schema: String,
        property: String,
        count: usize,
    },

    /// No (or more than one) constructor overload fits the declaration
    #[error("constructor resolution failed: {type_name} with {arity} argument(s)")]
    ConstructorResolutionFailed {
        type_name: String,
        arity: usize,
        reason: String,
    },

    /// A strategy names a type that is not in the catalog
    #[error("Unknown type: {type_name}")]
    UnknownType { type_name: String },

    /// A constant cannot be represented as the declared type
    #[error("Constant for {schema}.{property} is not convertible to {expected}")]
    ConstantNotConvertible {
        schema: String,
        property: String,
        expected: String,
    },

    /// A collection item type is abstract
    #[error("Collection {schema}.{property} has item type {item_type} that cannot be constructed")]
    UnconstructibleCollection {
        schema: String,
        property: String,
        item_type: String,
    },

    /// An object type without equality is used by an observable variant
    #[error("Property {schema}.{property} of type {type_name} lacks equality required by observable variants")]
    MissingEquality {
        schema: String,
        property: String,
        type_name: String,
    },

    /// Dictionary properties always start empty
    #[error("Default-value strategy not supported on dictionary property {schema}.{property}")]
    UnsupportedDefault { schema: String, property: String },

    // ===== Instance Errors =====
    /// Attempt to mutate a Read instance
    #[error("Read-only violation: cannot modify {target} on read-only {schema}")]
    ReadOnlyViolation { schema: String, target: String },

    /// Copy called without a source instance
    #[error("Null source: copy into {schema} requires a source instance")]
    NullSource { schema: String },

    /// Copy source is not an instance of the target schema
    #[error("Schema mismatch: expected {expected}, got {actual}")]
    SchemaMismatch { expected: String, actual: String },

    /// Property name is not part of the schema
    #[error("Unknown property '{property}' on schema {schema}")]
    UnknownProperty { schema: String, property: String },

    /// Value does not conform to the declared property type
    #[error("Type mismatch on {schema}.{property}: expected {expected}, got {actual}")]
    TypeMismatch {
        schema: String,
        property: String,
        expected: String,
        actual: String,
    },

    /// Scalar accessor used on a collection/dictionary, or the reverse
    #[error("Property {schema}.{property} is a {actual}, not a {expected}")]
    PropertyShapeMismatch {
        schema: String,
        property: String,
        expected: String,
        actual: String,
    },

    /// Subscribe/unsubscribe on a Copy or Read instance
    #[error("{schema} ({kind}) does not support change notification")]
    NotObservable { schema: String, kind: SettingsKind },

    /// Dictionary already holds the key
    #[error("Key already exists in {property}: {key}")]
    DuplicateKey { property: String, key: String },

    /// Collection edit at a position past its end
    #[error("Index {index} out of range for {property} (len {len})")]
    IndexOutOfRange {
        property: String,
        index: usize,
        len: usize,
    },

    // ===== Internal Errors =====
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MorphsetError {
    /// Returns true for errors raised while resolving a schema into variants
    ///
    /// These are fatal for the schema: no variant of it is ever produced.
    pub fn is_generation_error(&self) -> bool {
        matches!(
            self,
            MorphsetError::DefaultResolutionFailed { .. }
                | MorphsetError::ConflictingDefaults { .. }
                | MorphsetError::ConstructorResolutionFailed { .. }
                | MorphsetError::UnknownType { .. }
                | MorphsetError::ConstantNotConvertible { .. }
                | MorphsetError::UnconstructibleCollection { .. }
                | MorphsetError::MissingEquality { .. }
                | MorphsetError::UnsupportedDefault { .. }
        )
    }
}

/// Conversion from MorphsetError to ExError
impl From<MorphsetError> for ExError {
    fn from(err: MorphsetError) -> Self {
        match err {
            MorphsetError::DuplicateProperty { schema, property } => {
                ExError::new(ExErrorKind::DuplicateProperty)
                    .with_schema(schema)
                    .with_property(property)
                    .with_message("Property name repeated across inheritance chain")
            }

            MorphsetError::InvalidSchema { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            MorphsetError::DefaultResolutionFailed {
                type_name,
                method,
                reason,
            } => ExError::new(ExErrorKind::DefaultResolution).with_message(format!(
                "default-value resolution failed: {}.{} ({})",
                type_name, method, reason
            )),

            MorphsetError::ConflictingDefaults {
                schema,
                property,
                count,
            } => ExError::new(ExErrorKind::ConflictingDefaults)
                .with_schema(schema)
                .with_property(property)
                .with_message(format!(
                    "conflicting default-value declarations ({} declared)",
                    count
                )),

            MorphsetError::ConstructorResolutionFailed {
                type_name,
                arity,
                reason,
            } => ExError::new(ExErrorKind::DefaultResolution).with_message(format!(
                "No constructor {}/{}: {}",
                type_name, arity, reason
            )),

            MorphsetError::UnknownType { type_name } => ExError::new(ExErrorKind::NotFound)
                .with_message(format!("Type not in catalog: {}", type_name)),

            MorphsetError::ConstantNotConvertible {
                schema,
                property,
                expected,
            } => ExError::new(ExErrorKind::DefaultResolution)
                .with_schema(schema)
                .with_property(property)
                .with_message(format!("Constant not convertible to {}", expected)),

            MorphsetError::UnconstructibleCollection {
                schema,
                property,
                item_type,
            } => ExError::new(ExErrorKind::Unconstructible)
                .with_schema(schema)
                .with_property(property)
                .with_message(format!("Item type {} cannot be constructed", item_type)),

            MorphsetError::MissingEquality {
                schema,
                property,
                type_name,
            } => ExError::new(ExErrorKind::MissingEquality)
                .with_schema(schema)
                .with_property(property)
                .with_message(format!("Type {} has no equality", type_name)),

            MorphsetError::UnsupportedDefault { schema, property } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_schema(schema)
                    .with_property(property)
                    .with_message("Dictionary properties cannot declare a default")
            }

            MorphsetError::ReadOnlyViolation { schema, target } => {
                ExError::new(ExErrorKind::ReadOnlyViolation)
                    .with_schema(schema)
                    .with_property(target)
                    .with_message("Instance is read-only")
            }

            MorphsetError::NullSource { schema } => ExError::new(ExErrorKind::NullSource)
                .with_op("copy")
                .with_schema(schema)
                .with_message("Copy source is missing"),

            MorphsetError::SchemaMismatch { expected, actual } => {
                ExError::new(ExErrorKind::SchemaMismatch)
                    .with_schema(expected)
                    .with_message(format!("Source schema is {}", actual))
            }

            MorphsetError::UnknownProperty { schema, property } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_schema(schema)
                    .with_property(property)
                    .with_message("Unknown property")
            }

            MorphsetError::TypeMismatch {
                schema,
                property,
                expected,
                actual,
            } => ExError::new(ExErrorKind::TypeMismatch)
                .with_schema(schema)
                .with_property(property)
                .with_message(format!("Expected {}, got {}", expected, actual)),

            MorphsetError::PropertyShapeMismatch {
                schema,
                property,
                expected,
                actual,
            } => ExError::new(ExErrorKind::TypeMismatch)
                .with_schema(schema)
                .with_property(property)
                .with_message(format!("Property is a {}, not a {}", actual, expected)),

            MorphsetError::NotObservable { schema, kind } => {
                ExError::new(ExErrorKind::NotObservable)
                    .with_schema(schema)
                    .with_message(format!("Kind {} has no notification channel", kind))
            }

            MorphsetError::DuplicateKey { property, key } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_property(property)
                    .with_message(format!("Key already exists: {}", key))
            }

            MorphsetError::IndexOutOfRange {
                property,
                index,
                len,
            } => ExError::new(ExErrorKind::InvalidInput)
                .with_property(property)
                .with_message(format!("Index {} out of range (len {})", index, len)),

            MorphsetError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
