const UP_SUFFIX: &str = "_up";
const DOWN_SUFFIX: &str = "_down";

/// Name of the method that undoes `method`.
///
/// `x_up` is undone by `x_down` and `x_down` by `x_up`. Any other name has no
/// counterpart.
#[must_use]
pub fn rollback_method(method: &str) -> Option<String> {
    if let Some(base) = method.strip_suffix(UP_SUFFIX) {
        Some(format!("{base}{DOWN_SUFFIX}"))
    } else {
        method
            .strip_suffix(DOWN_SUFFIX)
            .map(|base| format!("{base}{UP_SUFFIX}"))
    }
}
