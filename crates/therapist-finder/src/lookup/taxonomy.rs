use std::collections::HashSet;
use std::sync::OnceLock;

/// NUCC taxonomy codes treated as mental-health practice.
pub const MENTAL_HEALTH_TAXONOMY_CODES: [&str; 6] = [
    "101YP2500X", // professional counselor
    "101YM0800X", // mental health counselor
    "101YA0400X", // addiction counselor
    "103TC0700X", // clinical psychologist
    "1041C0700X", // clinical social worker
    "106H00000X", // marriage & family therapist
];

fn code_set() -> &'static HashSet<&'static str> {
    static CODES: OnceLock<HashSet<&'static str>> = OnceLock::new();
    CODES.get_or_init(|| MENTAL_HEALTH_TAXONOMY_CODES.into_iter().collect())
}

/// Exact, case-sensitive match against the registry code.
pub fn is_mental_health_code(code: &str) -> bool {
    code_set().contains(code)
}
