//! The compatibility evaluator.

use crate::error::SettingsError;
use crate::types::TypeSettings;
use stk_domain::{StackCandidate, StackComparison};

/// Decides whether `a` and `b` may merge under `settings`.
///
/// Checks run first-fail, generic policy before the type-specific predicate:
/// stacking enabled, merged size within the limit, category-wide checks, then the
/// type's own predicate. The function never touches storage.
///
/// # Errors
/// Returns [`SettingsError::TypeMismatch`] when either candidate's key differs from the
/// settings' key.
pub fn can_stack_with<S: TypeSettings>(
    settings: &S,
    a: &S::Candidate,
    b: &S::Candidate,
) -> Result<StackComparison, SettingsError> {
    let key = settings.key();
    let (key_a, key_b) = (a.type_key(), b.type_key());
    if key_a != key || key_b != key {
        return Err(SettingsError::TypeMismatch {
            message: format!("{key_a} and {key_b} compared under {key} settings").into(),
            context: Some(S::CATEGORY.as_ref().to_owned().into()),
        });
    }

    Ok(evaluate(settings, a, b))
}

/// The evaluation proper; both candidates are known to share the settings' key.
fn evaluate<S: TypeSettings>(settings: &S, a: &S::Candidate, b: &S::Candidate) -> StackComparison {
    if !settings.stacking_enabled() {
        return StackComparison::StackingDisabled;
    }

    if a.stack_size().saturating_add(b.stack_size()) > settings.max_stack_size() {
        return StackComparison::StackSizeTooLarge;
    }

    match settings.compare_generic(a, b) {
        StackComparison::CanStack => settings.compare_specific(a, b),
        rejected => rejected,
    }
}
