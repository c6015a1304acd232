/// Variable and function records stored in scopes.
///
/// Defines `VarKind`, the `Variable` record holding a textual value, and the
/// `Function` record holding parameter names and an unexpanded body.
pub mod core;
