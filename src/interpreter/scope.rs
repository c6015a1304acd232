use std::{collections::HashMap, iter};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Function, Variable},
    },
};

/// A single namespace frame.
///
/// Variable names and function names are separate key sets; writing an
/// existing name replaces the previous entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Variables declared in this scope.
    pub variables: HashMap<String, Variable>,
    /// Functions defined in this scope.
    pub functions: HashMap<String, Function>,
}

/// The stack of lexical scopes.
///
/// The base scope always exists and cannot be popped; it holds the built-in
/// `expression` wrapper. Every lookup walks from the innermost scope outward,
/// so the nearest declaration wins for both variables and functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeStack {
    base:   Scope,
    nested: Vec<Scope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Creates a stack holding only the base scope.
    ///
    /// # Example
    /// ```
    /// use scopecalc::interpreter::{scope::ScopeStack, value::core::Function};
    ///
    /// let scopes = ScopeStack::new();
    /// assert_eq!(scopes.depth(), 1);
    /// assert!(scopes.lookup_function(Function::WRAPPER).is_some());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut stack = Self { base:   Scope::default(),
                               nested: Vec::new(), };
        stack.ensure_base_scope();
        stack
    }

    /// Installs the built-in `expression` wrapper in the base scope if it is
    /// missing. Calling it again has no effect.
    pub fn ensure_base_scope(&mut self) {
        self.base
            .functions
            .entry(Function::WRAPPER.to_string())
            .or_insert_with(Function::wrapper);
    }

    /// Number of scopes, the base scope included.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.nested.len() + 1
    }

    /// Pushes a new empty scope, which becomes the innermost one.
    pub fn push_scope(&mut self) {
        self.nested.push(Scope::default());
    }

    /// Removes the innermost scope.
    ///
    /// Returns `false` without doing anything when only the base scope is
    /// left.
    ///
    /// # Example
    /// ```
    /// use scopecalc::interpreter::scope::ScopeStack;
    ///
    /// let mut scopes = ScopeStack::new();
    /// scopes.push_scope();
    ///
    /// assert!(scopes.pop_scope());
    /// assert!(!scopes.pop_scope());
    /// assert_eq!(scopes.depth(), 1);
    /// ```
    pub fn pop_scope(&mut self) -> bool {
        self.nested.pop().is_some()
    }

    fn innermost_mut(&mut self) -> &mut Scope {
        self.nested.last_mut().unwrap_or(&mut self.base)
    }

    /// Iterates over the scopes from the innermost to the base scope.
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.nested.iter().rev().chain(iter::once(&self.base))
    }

    /// The built-in wrapper function from the base scope.
    #[must_use]
    pub fn wrapper(&self) -> Function {
        self.base
            .functions
            .get(Function::WRAPPER)
            .cloned()
            .unwrap_or_else(Function::wrapper)
    }

    /// Declares (or redeclares) a variable in the innermost scope.
    pub fn declare_variable(&mut self, name: &str, variable: Variable) {
        self.innermost_mut()
            .variables
            .insert(name.to_string(), variable);
    }

    /// Finds the nearest variable called `name`.
    ///
    /// # Example
    /// ```
    /// use scopecalc::interpreter::{
    ///     scope::ScopeStack,
    ///     value::core::{VarKind, Variable},
    /// };
    ///
    /// let mut scopes = ScopeStack::new();
    /// scopes.declare_variable("x", Variable::new(VarKind::Int, "1"));
    /// scopes.push_scope();
    /// scopes.declare_variable("x", Variable::new(VarKind::Float, "2.5"));
    ///
    /// assert_eq!(scopes.lookup_variable("x").map(|v| v.value.as_str()), Some("2.5"));
    /// assert!(scopes.lookup_variable("y").is_none());
    /// ```
    #[must_use]
    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.iter().find_map(|scope| scope.variables.get(name))
    }

    /// Replaces the value of the nearest variable called `name`, in the scope
    /// that owns it. The declared kind is kept.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownVariable` when no scope declares `name`.
    ///
    /// # Example
    /// ```
    /// use scopecalc::interpreter::{
    ///     scope::ScopeStack,
    ///     value::core::{VarKind, Variable},
    /// };
    ///
    /// let mut scopes = ScopeStack::new();
    /// scopes.declare_variable("total", Variable::new(VarKind::Int, "1"));
    /// scopes.push_scope();
    ///
    /// scopes.update_variable("total", "5", 3).unwrap();
    /// scopes.pop_scope();
    ///
    /// assert_eq!(scopes.lookup_variable("total").map(|v| v.value.as_str()), Some("5"));
    /// assert!(scopes.update_variable("missing", "1", 4).is_err());
    /// ```
    pub fn update_variable(&mut self, name: &str, value: &str, line: usize) -> EvalResult<()> {
        let owner = self.nested
                        .iter_mut()
                        .rev()
                        .chain(iter::once(&mut self.base))
                        .find_map(|scope| scope.variables.get_mut(name));

        match owner {
            Some(variable) => {
                variable.value = value.to_string();
                Ok(())
            },
            None => Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                        line }),
        }
    }

    /// Defines (or redefines) a function in the innermost scope.
    ///
    /// # Errors
    /// Returns `RuntimeError::BuiltinFunctionRedefinition` for the name of the
    /// built-in wrapper.
    pub fn declare_function(&mut self,
                            name: &str,
                            function: Function,
                            line: usize)
                            -> EvalResult<()> {
        if name == Function::WRAPPER {
            return Err(RuntimeError::BuiltinFunctionRedefinition { name: name.to_string(),
                                                                   line });
        }
        self.innermost_mut()
            .functions
            .insert(name.to_string(), function);
        Ok(())
    }

    /// Finds the nearest function called `name`.
    #[must_use]
    pub fn lookup_function(&self, name: &str) -> Option<&Function> {
        self.iter().find_map(|scope| scope.functions.get(name))
    }
}
