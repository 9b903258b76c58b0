//! The [`toon!`] macro for building [`crate::Value`] trees inline.

/// Builds a [`crate::Value`] from a JSON-like literal.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{toon, Value};
///
/// let data = toon!({
///     "name": "Ada",
///     "tags": ["math", "computing"],
///     "active": true
/// });
///
/// assert!(data.is_object());
/// ```
#[macro_export]
macro_rules! toon {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toon!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::toon!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any other expression
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Map, Value};

    #[test]
    fn test_toon_macro_primitives() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(false), Value::Bool(false));
        assert_eq!(toon!(42), Value::Number(42.0));
        assert_eq!(toon!(3.5), Value::Number(3.5));
        assert_eq!(toon!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_toon_macro_arrays() {
        assert_eq!(toon!([]), Value::Array(vec![]));

        let arr = toon!([1, 2, 3]);
        match arr {
            Value::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], Value::Number(1.0));
                assert_eq!(vec[2], Value::Number(3.0));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_toon_macro_objects() {
        assert_eq!(toon!({}), Value::Object(Map::new()));

        let obj = toon!({
            "name": "Ada",
            "age": 36
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::String("Ada".to_string())));
                assert_eq!(map.get("age"), Some(&Value::Number(36.0)));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_toon_macro_nesting() {
        let value = toon!({
            "user": { "id": 1, "tags": ["a", "b"] },
            "empty": {}
        });

        let user = value.as_object().unwrap().get("user").unwrap();
        assert_eq!(user.as_object().unwrap().get("id"), Some(&Value::Number(1.0)));
        let tags = user.as_object().unwrap().get("tags").unwrap();
        assert_eq!(tags.as_array().unwrap().len(), 2);
    }
}
