//! Default-value strategy interpreter
//!
//! Strategies are resolved once per schema into an [`Initializer`]; each
//! default-constructed instance then only runs [`Initializer::produce`].
//! Collection properties always start from a freshly materialized empty list
//! and the declared strategy is layered on top of it.

use std::fmt;

use crate::errors::{MorphsetError, Result};
use crate::model::types::{ConstructorFn, InPlaceFn, ReturningFn};
use crate::model::{
    DefaultValueStrategy, Fit, MethodShape, ObjectType, PropertySchema, PropertyType,
    SettingsSchema, StaticMethod, TypeCatalog, Value, ValueType,
};

/// Resolved form of a property's default-value strategy
#[derive(Clone)]
pub enum Initializer {
    /// Leave the type's zero value
    Zero,
    /// Assign an already-converted constant
    Assign(Value),
    /// Call a constructor overload with converted literal arguments
    Construct { build: ConstructorFn, args: Vec<Value> },
    /// Assign the result of a static method
    StaticReturning { call: ReturningFn, args: Vec<Value> },
    /// Let a static method mutate the initialized value in place
    StaticInPlace { call: InPlaceFn, args: Vec<Value> },
}

impl fmt::Debug for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Initializer::Zero => f.write_str("Zero"),
            Initializer::Assign(v) => f.debug_tuple("Assign").field(v).finish(),
            Initializer::Construct { args, .. } => {
                f.debug_struct("Construct").field("args", args).finish()
            }
            Initializer::StaticReturning { args, .. } => {
                f.debug_struct("StaticReturning").field("args", args).finish()
            }
            Initializer::StaticInPlace { args, .. } => {
                f.debug_struct("StaticInPlace").field("args", args).finish()
            }
        }
    }
}

impl Initializer {
    /// Produce the initial value for a property of type `ty`
    pub fn produce(&self, ty: &ValueType) -> Value {
        let mut value = ty.zero();
        match self {
            Initializer::Zero => {}
            Initializer::Assign(v) => value = v.clone(),
            Initializer::Construct { build, args } => value = conform(ty, build(args)),
            Initializer::StaticReturning { call, args } => value = conform(ty, call(args)),
            Initializer::StaticInPlace { call, args } => call(&mut value, args),
        }
        value
    }
}

/// Widen values a method returned in a convertible representation (int for float)
fn conform(ty: &ValueType, value: Value) -> Value {
    match ty.fit(&value) {
        Some(Fit::Converted) => ty.coerce(value.clone()).unwrap_or(value),
        _ => value,
    }
}

/// Resolve the declared strategy of `property` against `catalog`
///
/// # Errors
///
/// * `ConflictingDefaults` - More than one strategy declared
/// * `UnsupportedDefault` - A strategy on a dictionary property
/// * `UnconstructibleCollection` - A collection of an abstract item type
/// * `ConstantNotConvertible` - Constant does not fit the declared type
/// * `UnknownType` / `ConstructorResolutionFailed` - Constructor call does not resolve
/// * `DefaultResolutionFailed` - Static call does not resolve to exactly one overload
pub fn resolve(
    schema: &SettingsSchema,
    property: &PropertySchema,
    catalog: &TypeCatalog,
) -> Result<Initializer> {
    let declared = property.defaults();
    if declared.len() > 1 {
        return Err(MorphsetError::ConflictingDefaults {
            schema: schema.name().to_string(),
            property: property.name().to_string(),
            count: declared.len(),
        });
    }

    let ty = match property.property_type() {
        PropertyType::Dict(_) => {
            if declared.is_empty() {
                return Ok(Initializer::Zero);
            }
            return Err(MorphsetError::UnsupportedDefault {
                schema: schema.name().to_string(),
                property: property.name().to_string(),
            });
        }
        PropertyType::Value(ty) => ty,
    };

    if let Some(ValueType::Object(item)) = ty.item_type() {
        if item.is_abstract() {
            return Err(MorphsetError::UnconstructibleCollection {
                schema: schema.name().to_string(),
                property: property.name().to_string(),
                item_type: item.name().to_string(),
            });
        }
    }

    let Some(strategy) = declared.first() else {
        return Ok(Initializer::Zero);
    };

    tracing::debug!(
        schema = schema.name(),
        property = property.name(),
        strategy = strategy.label(),
        "resolving default value"
    );

    match strategy {
        DefaultValueStrategy::Constant(v) => ty
            .coerce(v.clone())
            .map(Initializer::Assign)
            .ok_or_else(|| MorphsetError::ConstantNotConvertible {
                schema: schema.name().to_string(),
                property: property.name().to_string(),
                expected: ty.name(),
            }),
        DefaultValueStrategy::ConstructorCall { type_name, args } => {
            resolve_constructor(ty, type_name, args, catalog)
        }
        DefaultValueStrategy::StaticCall {
            type_name,
            method,
            args,
        } => resolve_static(ty, type_name, method, args, catalog),
    }
}

/// Look up a type in the catalog, falling back to the property's own object type
fn lookup<'a>(
    ty: &'a ValueType,
    type_name: &str,
    catalog: &'a TypeCatalog,
) -> Option<&'a ObjectType> {
    if let Some(found) = catalog.get(type_name) {
        return Some(found.as_ref());
    }
    match ty {
        ValueType::Object(own) if own.name() == type_name => Some(own.as_ref()),
        _ => None,
    }
}

fn resolve_constructor(
    ty: &ValueType,
    type_name: &str,
    args: &[Value],
    catalog: &TypeCatalog,
) -> Result<Initializer> {
    let fail = |reason: String| MorphsetError::ConstructorResolutionFailed {
        type_name: type_name.to_string(),
        arity: args.len(),
        reason,
    };

    let target = lookup(ty, type_name, catalog).ok_or_else(|| MorphsetError::UnknownType {
        type_name: type_name.to_string(),
    })?;

    if target.is_abstract() {
        return Err(fail("type is abstract".to_string()));
    }
    if !matches!(ty, ValueType::Object(own) if own.name() == target.name()) {
        return Err(fail(format!("produces {}, property is {}", target.name(), ty.name())));
    }

    let overloads: Vec<&[ValueType]> = target.constructors().iter().map(|c| c.params()).collect();
    let chosen = select_overload(&overloads, args).map_err(|e| fail(e.to_string()))?;
    let ctor = &target.constructors()[chosen];

    Ok(Initializer::Construct {
        build: ctor.build_fn().clone(),
        args: convert_args(ctor.params(), args),
    })
}

fn resolve_static(
    ty: &ValueType,
    type_name: &str,
    method: &str,
    args: &[Value],
    catalog: &TypeCatalog,
) -> Result<Initializer> {
    let fail = |reason: String| MorphsetError::DefaultResolutionFailed {
        type_name: type_name.to_string(),
        method: method.to_string(),
        reason,
    };

    let host = lookup(ty, type_name, catalog).ok_or_else(|| fail("unknown type".to_string()))?;

    let produces_property_type = |m: &&StaticMethod| match m.value_type() {
        Some(vt) => vt == ty,
        None => matches!(ty, ValueType::Object(own) if own.name() == host.name()),
    };
    let (in_place, returning): (Vec<&StaticMethod>, Vec<&StaticMethod>) = host
        .statics_named(method)
        .filter(produces_property_type)
        .partition(|m| m.is_in_place());

    let (preferred, fallback) = if ty.is_collection() {
        (in_place, returning)
    } else {
        (returning, in_place)
    };

    let method_def = match pick(&preferred, args) {
        Ok(m) => m,
        Err(OverloadError::NoMatch) => pick(&fallback, args).map_err(|e| fail(e.to_string()))?,
        Err(e) => return Err(fail(e.to_string())),
    };

    let args = convert_args(method_def.params(), args);
    Ok(match method_def.shape() {
        MethodShape::Returning(call) => Initializer::StaticReturning {
            call: call.clone(),
            args,
        },
        MethodShape::InPlace(call) => Initializer::StaticInPlace {
            call: call.clone(),
            args,
        },
    })
}

fn pick<'a>(
    candidates: &[&'a StaticMethod],
    args: &[Value],
) -> std::result::Result<&'a StaticMethod, OverloadError> {
    let overloads: Vec<&[ValueType]> = candidates.iter().map(|m| m.params()).collect();
    select_overload(&overloads, args).map(|i| candidates[i])
}

fn convert_args(params: &[ValueType], args: &[Value]) -> Vec<Value> {
    params
        .iter()
        .zip(args)
        .map(|(p, a)| p.coerce(a.clone()).unwrap_or_else(|| a.clone()))
        .collect()
}

/// Why no single overload was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadError {
    NoMatch,
    Ambiguous,
}

impl fmt::Display for OverloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverloadError::NoMatch => f.write_str("no overload matches the arguments"),
            OverloadError::Ambiguous => f.write_str("more than one overload matches equally well"),
        }
    }
}

/// Choose the overload whose parameters fit `args` with the fewest conversions
///
/// # Errors
///
/// `NoMatch` when no overload of the right arity accepts every argument;
/// `Ambiguous` when several tie for the fewest conversions.
pub fn select_overload(
    overloads: &[&[ValueType]],
    args: &[Value],
) -> std::result::Result<usize, OverloadError> {
    let scored: Vec<(usize, usize)> = overloads
        .iter()
        .enumerate()
        .filter(|(_, params)| params.len() == args.len())
        .filter_map(|(i, params)| {
            let mut conversions = 0;
            for (param, arg) in params.iter().zip(args) {
                if param.fit(arg)? == Fit::Converted {
                    conversions += 1;
                }
            }
            Some((i, conversions))
        })
        .collect();

    let best = scored
        .iter()
        .map(|&(_, c)| c)
        .min()
        .ok_or(OverloadError::NoMatch)?;
    let mut winners = scored.iter().filter(|&&(_, c)| c == best);
    match (winners.next(), winners.next()) {
        (Some(&(i, _)), None) => Ok(i),
        _ => Err(OverloadError::Ambiguous),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_prefers_exact_over_converted() {
        let exact: &[ValueType] = &[ValueType::Int];
        let widened: &[ValueType] = &[ValueType::Float];
        assert_eq!(select_overload(&[widened, exact], &[Value::Int(1)]), Ok(1));
        assert_eq!(select_overload(&[widened], &[Value::Int(1)]), Ok(0));
    }

    #[test]
    fn test_select_reports_no_match_and_ambiguity() {
        let a: &[ValueType] = &[ValueType::Str];
        let b: &[ValueType] = &[ValueType::Str];
        assert_eq!(
            select_overload(&[a], &[Value::Int(1)]),
            Err(OverloadError::NoMatch)
        );
        assert_eq!(
            select_overload(&[a, b], &[Value::from("x")]),
            Err(OverloadError::Ambiguous)
        );
        assert_eq!(select_overload(&[a], &[]), Err(OverloadError::NoMatch));
    }

    #[test]
    fn test_collection_initializer_starts_from_empty_list() {
        let ty = ValueType::list_of(ValueType::Str);
        let init = Initializer::StaticInPlace {
            call: std::sync::Arc::new(|v: &mut Value, _: &[Value]| {
                if let Some(items) = v.as_list_mut() {
                    items.push(Value::from("filled"));
                }
            }),
            args: vec![],
        };
        assert_eq!(init.produce(&ty), Value::str_list(["filled"]));
        assert_eq!(Initializer::Zero.produce(&ty), Value::List(vec![]));
    }
}
