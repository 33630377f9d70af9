//! Utility macros for reducing boilerplate

/// Macro to implement `FromRef<AppState>` for state extractors.
///
/// This lets handlers extract just the piece of state they use.
///
/// # Example
/// ```ignore
/// impl_from_ref!(ProjectRepo, projects);
/// // Expands to:
/// impl axum::extract::FromRef<AppState> for ProjectRepo {
///     fn from_ref(state: &AppState) -> Self {
///         state.projects.clone()
///     }
/// }
/// ```
#[macro_export]
macro_rules! impl_from_ref {
    ($type:ty, $field:ident) => {
        impl axum::extract::FromRef<$crate::state::AppState> for $type {
            fn from_ref(state: &$crate::state::AppState) -> Self {
                state.$field.clone()
            }
        }
    };
}
