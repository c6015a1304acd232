use crate::interpreter::lexer::Token;

/// The declared kind of a variable.
///
/// The kind is a label only: arithmetic is always carried out in `f64`, and
/// an `Int` variable may end up holding a fractional result after an
/// assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Declared with the `i` tag.
    Int,
    /// Declared with the `f` tag.
    Float,
}

impl VarKind {
    /// Decodes a declaration tag.
    ///
    /// # Example
    /// ```
    /// use scopecalc::interpreter::value::core::VarKind;
    ///
    /// assert_eq!(VarKind::from_tag("i"), Some(VarKind::Int));
    /// assert_eq!(VarKind::from_tag("f"), Some(VarKind::Float));
    /// assert_eq!(VarKind::from_tag("s"), None);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "i" => Some(Self::Int),
            "f" => Some(Self::Float),
            _ => None,
        }
    }
}

impl std::fmt::Display for VarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
        }
    }
}

/// A variable stored in a scope.
///
/// The value is kept in its textual decimal form and is re-parsed every time
/// an operator consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// The declared kind.
    pub kind:  VarKind,
    /// The current value, as text.
    pub value: String,
}

impl Variable {
    #[must_use]
    pub fn new(kind: VarKind, value: impl Into<String>) -> Self {
        Self { kind,
               value: value.into() }
    }
}

/// A user-defined inline function.
///
/// The body is kept as unexpanded tokens; parameter names appear in it as
/// ordinary words and are substituted at every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Parameter names, in call order.
    pub params: Vec<String>,
    /// The body tokens, without the terminating `;`.
    pub body:   Vec<Token>,
}

impl Function {
    /// Name of the built-in wrapper every bare expression is inlined through.
    pub const WRAPPER: &'static str = "expression";

    #[must_use]
    pub const fn new(params: Vec<String>, body: Vec<Token>) -> Self {
        Self { params, body }
    }

    /// The built-in identity function `expression(x): x`.
    ///
    /// # Example
    /// ```
    /// use scopecalc::interpreter::{lexer::Token, value::core::Function};
    ///
    /// let wrapper = Function::wrapper();
    /// assert_eq!(wrapper.params, vec!["x".to_string()]);
    /// assert_eq!(wrapper.body, vec![Token::word("x")]);
    /// ```
    #[must_use]
    pub fn wrapper() -> Self {
        Self { params: vec!["x".to_string()],
               body:   vec![Token::word("x")], }
    }

    /// Returns the position of `name` in the parameter list.
    #[must_use]
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p == name)
    }
}
