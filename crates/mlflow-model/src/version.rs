/// Relation schema versions this operator understands, most preferred first.
pub const SUPPORTED_VERSIONS: &[&str] = &["v1"];

/// Pick the first `local` version that the remote side also lists.
pub fn negotiate<'a, R: AsRef<str>>(local: &[&'a str], remote: &[R]) -> Option<&'a str> {
    local
        .iter()
        .copied()
        .find(|v| remote.iter().any(|r| r.as_ref() == *v))
}

/// `_supported_versions` value advertised on our side of a versioned relation,
/// formatted as a YAML block sequence.
pub fn advertised_versions() -> String {
    SUPPORTED_VERSIONS
        .iter()
        .map(|v| format!("- {v}\n"))
        .collect()
}
