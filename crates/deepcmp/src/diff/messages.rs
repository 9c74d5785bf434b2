//! Fixed catalog of difference messages.

pub const ONLY_ONE_IS_VALID: &str = "only one is valid";
pub const ONLY_ONE_IS_NIL: &str = "only one is nil";
pub const TYPE_NOT_EQUAL: &str = "type not equal";
pub const CAPACITY_NOT_EQUAL: &str = "capacity not equal";
pub const LENGTH_NOT_EQUAL: &str = "length not equal";
pub const BOOL_NOT_EQUAL: &str = "bool not equal";
pub const INT_NOT_EQUAL: &str = "int not equal";
pub const UINT_NOT_EQUAL: &str = "uint not equal";
pub const FLOAT_NOT_EQUAL: &str = "float not equal";
pub const COMPLEX_NOT_EQUAL: &str = "complex not equal";
pub const STRING_NOT_EQUAL: &str = "string not equal";
pub const MAP_KEY_NOT_DEFINED: &str = "map key not defined";
pub const UNSAFE_POINTER_NOT_EQUAL: &str = "unsafe pointer not equal";
pub const FUNC_POINTER_NOT_EQUAL: &str = "func pointer not equal";

/// Message for an equality method that reported a mismatch.
pub fn method_returned_false(name: &str) -> String {
    format!("method .{name}() returned false")
}

/// Message for an ordering method that returned a non-zero result.
pub fn method_returned(name: &str, result: i64) -> String {
    format!("method .{name}() returned {result}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_messages() {
        assert_eq!(method_returned_false("Equal"), "method .Equal() returned false");
        assert_eq!(method_returned("Cmp", -1), "method .Cmp() returned -1");
    }
}
