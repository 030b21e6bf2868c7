//! Matching release assets to the running platform

/// OS and architecture as reported by `std::env::consts`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// `<binary>_<OS>_<Arch>` as used in release asset names
    pub fn asset_stem(&self, binary: &str) -> String {
        format!(
            "{binary}_{}_{}",
            release_os(&self.os),
            release_arch(&self.arch)
        )
    }

    /// File name of the executable inside a release archive
    pub fn binary_file_name(&self, binary: &str) -> String {
        if self.is_windows() {
            format!("{binary}.exe")
        } else {
            binary.to_string()
        }
    }
}

/// OS name in release asset naming. Unknown names pass through.
pub fn release_os(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "darwin" | "macos" => "Darwin",
        "windows" => "Windows",
        other => other,
    }
}

/// Architecture name in release asset naming. Unknown names pass through.
pub fn release_arch(arch: &str) -> &str {
    match arch {
        "amd64" | "x86_64" => "x86_64",
        "386" | "x86" | "i686" => "i386",
        "arm64" | "aarch64" => "arm64",
        other => other,
    }
}

/// First asset name containing `<binary>_<OS>_<Arch>`
pub fn find_matching_binary<'a, I>(names: I, platform: &Platform, binary: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let expected = platform.asset_stem(binary);
    names.into_iter().find(|name| name.contains(&expected))
}
