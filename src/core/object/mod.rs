use anyhow::{Context, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// An untyped (JSON) Object from which [TypedParameters](TypedParameter) can be parsed.
///
/// Represents the generic JSON view of an authorization request.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UntypedObject(pub(crate) Map<String, Json>);

/// A strongly typed parameter that can represent request parameters.
pub trait TypedParameter:
    TryFrom<Json, Error = anyhow::Error> + TryInto<Json> + Clone + std::fmt::Debug
{
    const KEY: &'static str;
}

impl UntypedObject {
    /// Get a [TypedParameter] from the Object.
    ///
    /// An entry holding JSON `null` is treated as absent.
    ///
    /// Note that this method clones the underlying data.
    pub fn get<T: TypedParameter>(&self) -> Option<Result<T>> {
        let value = self.0.get(T::KEY).filter(|value| !value.is_null())?;
        Some(value.clone().try_into().map_err(Into::into))
    }

    /// Insert a [TypedParameter].
    ///
    /// Returns the existing [TypedParameter] if one already exists.
    ///
    /// # Errors
    /// Returns an error if there was already an entry in the Object, but it could not be parsed from JSON.
    pub fn insert<T: TypedParameter>(&mut self, t: T) -> Option<Result<T>> {
        match t.try_into() {
            Err(_) => Some(Err(Error::msg("failed to parse typed parameter"))),
            Ok(value) => Some(
                self.0
                    .insert(T::KEY.to_owned(), value)?
                    .try_into()
                    .map_err(Into::into),
            ),
        }
    }
}

impl From<Map<String, Json>> for UntypedObject {
    fn from(value: Map<String, Json>) -> Self {
        Self(value)
    }
}

impl From<UntypedObject> for Json {
    fn from(value: UntypedObject) -> Self {
        value.0.into()
    }
}

impl TryFrom<Json> for UntypedObject {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        Ok(serde_json::from_value(value).map(Self)?)
    }
}

pub trait ParsingErrorContext {
    type T: TypedParameter;

    fn parsing_error(self) -> Result<Self::T>;
}

impl<T: TypedParameter> ParsingErrorContext for Option<Result<T>> {
    type T = T;

    fn parsing_error(self) -> Result<T> {
        self.context(format!("'{}' is missing", T::KEY))?
            .context(format!("'{}' could not be parsed", T::KEY))
    }
}

impl<T: TypedParameter> ParsingErrorContext for Result<T> {
    type T = T;

    fn parsing_error(self) -> Result<T> {
        self.context(format!("'{}' could not be parsed", T::KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[derive(Debug, Clone)]
    struct Nonce(String);

    impl TypedParameter for Nonce {
        const KEY: &'static str = "nonce";
    }

    impl TryFrom<Json> for Nonce {
        type Error = Error;

        fn try_from(value: Json) -> Result<Self> {
            Ok(Self(serde_json::from_value(value)?))
        }
    }

    impl From<Nonce> for Json {
        fn from(value: Nonce) -> Self {
            Json::String(value.0)
        }
    }

    #[test]
    fn null_is_absent() {
        let object: UntypedObject = json!({ "nonce": null }).try_into().unwrap();
        assert!(object.get::<Nonce>().is_none());
    }

    #[test]
    fn parsing_error_names_key() {
        let object: UntypedObject = json!({ "nonce": 7 }).try_into().unwrap();
        let err = object.get::<Nonce>().parsing_error().unwrap_err();
        assert_eq!(err.to_string(), "'nonce' could not be parsed");

        let err = UntypedObject::default()
            .get::<Nonce>()
            .parsing_error()
            .unwrap_err();
        assert_eq!(err.to_string(), "'nonce' is missing");
    }

    #[test]
    fn insert_returns_previous() {
        let mut object = UntypedObject::default();
        assert!(object.insert(Nonce("a".into())).is_none());

        let previous = object.insert(Nonce("b".into())).unwrap().unwrap();
        assert_eq!(previous.0, "a");
        assert_eq!(object.get::<Nonce>().unwrap().unwrap().0, "b");
    }
}
