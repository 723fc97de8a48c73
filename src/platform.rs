//! Native library classifier for the host platform
//!
//! Native libraries are published per platform under a classifier such as
//! `natives-linux`. The classifier is picked from the operating system name
//! by prefix; an unknown name is an error, never a guess.

use crate::config::PlatformConfig;

const LINUX_PREFIXES: [&str; 4] = ["Linux", "FreeBSD", "SunOS", "Unit"];
const MACOS_PREFIXES: [&str; 2] = ["Mac OS X", "Darwin"];
const WINDOWS_PREFIXES: [&str; 1] = ["Windows"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativesClassifier {
    Linux,
    MacOs,
    Windows,
}

impl NativesClassifier {
    pub const ALL: [NativesClassifier; 3] = [
        NativesClassifier::Linux,
        NativesClassifier::MacOs,
        NativesClassifier::Windows,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NativesClassifier::Linux => "natives-linux",
            NativesClassifier::MacOs => "natives-macos",
            NativesClassifier::Windows => "natives-windows",
        }
    }
}

impl std::fmt::Display for NativesClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NativesClassifier {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PlatformError::InvalidOverride(s.to_string()))
    }
}

/// Platform detection error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The operating system name matches no known platform
    Unsupported { os_name: String, os_arch: String },
    /// The configured override is not a known classifier
    InvalidOverride(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::Unsupported { os_name, os_arch } => write!(
                f,
                "Unrecognized or unsupported platform '{}' ({}). Please set the natives classifier manually (platform.natives)",
                os_name, os_arch
            ),
            PlatformError::InvalidOverride(value) => write!(
                f,
                "Unknown natives classifier '{}' (expected one of natives-linux, natives-macos, natives-windows)",
                value
            ),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Classifier for an operating system name
///
/// `os_arch` does not influence the result; it is only reported back in the
/// error for an unsupported platform.
pub fn natives_classifier(os_name: &str, os_arch: &str) -> Result<NativesClassifier, PlatformError> {
    let matches = |prefixes: &[&str]| prefixes.iter().any(|p| os_name.starts_with(p));

    if matches(&LINUX_PREFIXES) {
        Ok(NativesClassifier::Linux)
    } else if matches(&MACOS_PREFIXES) {
        Ok(NativesClassifier::MacOs)
    } else if matches(&WINDOWS_PREFIXES) {
        Ok(NativesClassifier::Windows)
    } else {
        Err(PlatformError::Unsupported {
            os_name: os_name.to_string(),
            os_arch: os_arch.to_string(),
        })
    }
}

/// Host operating system in the naming [`natives_classifier`] expects
pub fn host_os_name() -> String {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Mac OS X",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "solaris" | "illumos" => "SunOS",
        other => other,
    }
    .to_string()
}

pub fn host_classifier() -> Result<NativesClassifier, PlatformError> {
    natives_classifier(&host_os_name(), std::env::consts::ARCH)
}

/// Configured override if present, otherwise the host's classifier
pub fn resolve_classifier(config: &PlatformConfig) -> Result<NativesClassifier, PlatformError> {
    match &config.natives {
        Some(natives) => {
            log::debug!("Using configured natives classifier {}", natives);
            natives.parse()
        }
        None => host_classifier(),
    }
}
