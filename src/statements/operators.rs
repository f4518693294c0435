use std::fmt::Display;

/// The fixed set of binary operators. Operator text maps 1:1 onto this
/// set; anything else fails parsing.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulate,
    And,
    Or,
    Is,
    IsNot,
    Smaller,
    Bigger,
}

impl BinaryOperator {
    pub fn from_text(text: &str) -> Option<BinaryOperator> {
        match text {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Subtract),
            "*" => Some(BinaryOperator::Multiply),
            "/" => Some(BinaryOperator::Divide),
            "%" => Some(BinaryOperator::Modulate),
            "and" => Some(BinaryOperator::And),
            "or" => Some(BinaryOperator::Or),
            "is" => Some(BinaryOperator::Is),
            "isnot" => Some(BinaryOperator::IsNot),
            "<" => Some(BinaryOperator::Smaller),
            ">" => Some(BinaryOperator::Bigger),
            _ => None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulate => "%",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::Is => "is",
            BinaryOperator::IsNot => "isnot",
            BinaryOperator::Smaller => "<",
            BinaryOperator::Bigger => ">",
        }
    }

    /// Canonical name of the operator method synthesized on a type.
    pub fn method_name(self) -> &'static str {
        match self {
            BinaryOperator::Add => "add",
            BinaryOperator::Subtract => "subtract",
            BinaryOperator::Multiply => "multiply",
            BinaryOperator::Divide => "divide",
            BinaryOperator::Modulate => "modulate",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::Is => "is",
            BinaryOperator::IsNot => "isnot",
            BinaryOperator::Smaller => "smaller",
            BinaryOperator::Bigger => "bigger",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}
