use crate::profile::is_truthy;

#[test]
fn only_lowercase_truthy_values_enable_profiling() {
    assert!(is_truthy(Some("1")));
    assert!(is_truthy(Some("true")));
    assert!(is_truthy(Some("yes")));
    assert!(!is_truthy(Some("TRUE")));
    assert!(!is_truthy(Some("0")));
    assert!(!is_truthy(None));
}
