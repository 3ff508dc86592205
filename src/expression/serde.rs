use std::{fmt, marker::PhantomData};

use serde::{de, de::Visitor, Deserialize, Deserializer, Serialize, Serializer};

use crate::{DataType, ExpressionNode};

impl<T: DataType> Serialize for ExpressionNode<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, T: DataType> Deserialize<'de> for ExpressionNode<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ExpressionNodeVisitor {
            dummy: PhantomData,
        })
    }
}

#[derive(Debug)]
struct ExpressionNodeVisitor<T> {
    dummy: PhantomData<T>,
}

impl<'de, T: DataType> Visitor<'de> for ExpressionNodeVisitor<T> {
    type Value = ExpressionNode<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a string that can be parsed by the `treecalc` crate")
    }

    fn visit_str<E>(self, unparsed: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        ExpressionNode::parse(unparsed)
            .map_err(|epe| E::custom(format!("Parse error - {}", epe.msg)))
    }
}

#[cfg(test)]
use serde_test::Token;

#[test]
fn test_ser_de() {
    let tree = ExpressionNode::<f64>::parse("(2+3) * 4 - 1.5").unwrap();
    serde_test::assert_tokens(&tree, &[Token::Str("((2 + 3) * 4) - 1.5")]);

    let tree = ExpressionNode::<f32>::parse("7").unwrap();
    serde_test::assert_tokens(&tree, &[Token::Str("7")]);

    serde_test::assert_de_tokens_error::<ExpressionNode<f64>>(
        &[Token::Str("2 +")],
        "Parse error - the last element cannot be an operator, found +",
    );
}
