//! The fixed vocabulary of recognized target-framework monikers.
//!
//! Used when a compilation unit's display name carries no explicit target
//! framework and the label has to be recovered from the build output path.

/// Known target-framework monikers, sorted for binary search.
///
/// Spans the legacy .NET Framework versions still common in the wild
/// through current cross-platform and OS-specific identifiers.
pub const KNOWN: &[&str] = &[
    "net462",
    "net47",
    "net472",
    "net6.0",
    "net8.0",
    "net8.0-browser",
    "net8.0-unix",
    "net8.0-windows",
    "net9.0",
    "net9.0-android",
    "net9.0-browser",
    "net9.0-freebsd",
    "net9.0-haiku",
    "net9.0-illumos",
    "net9.0-ios",
    "net9.0-linux",
    "net9.0-maccatalyst",
    "net9.0-osx",
    "net9.0-solaris",
    "net9.0-tvos",
    "net9.0-unix",
    "net9.0-wasi",
    "net9.0-windows",
    "netcoreapp2.1",
    "netstandard2.0",
    "netstandard2.1",
];

/// Whether `segment` is a recognized target-framework moniker.
///
/// Comparison is ordinal and case-sensitive, matching how build output
/// directories are named by the SDK.
pub fn is_known(segment: &str) -> bool {
    KNOWN.binary_search(&segment).is_ok()
}
