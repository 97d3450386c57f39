//! One-time provisioning of the CasperJS toolchain.
//!
//! Downloads a pinned release archive for the detected platform, unpacks it
//! under a vendor directory, and exposes the tool's launcher through a
//! symlink in a shared binary directory. Entirely decoupled from the
//! runtime builder, which only consumes the binary directory via `PATH`.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{Result, WraithError};

/// Operating systems with published release archives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
}

impl Os {
    /// The compile-time target OS, or `None` on anything unrecognized.
    pub fn current() -> Option<Os> {
        if cfg!(target_os = "linux") {
            Some(Os::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Os::MacOs)
        } else if cfg!(target_os = "windows") {
            Some(Os::Windows)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::MacOs => "macosx",
            Os::Windows => "windows",
        }
    }
}

/// Word size of the running host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitWidth {
    B32,
    B64,
}

impl BitWidth {
    pub fn current() -> Option<BitWidth> {
        match std::mem::size_of::<usize>() {
            4 => Some(BitWidth::B32),
            8 => Some(BitWidth::B64),
            _ => None,
        }
    }
}

/// Detected operating system and word size, resolved once per install.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub bits: BitWidth,
}

impl Platform {
    pub fn detect() -> Option<Platform> {
        Some(Platform {
            os: Os::current()?,
            bits: BitWidth::current()?,
        })
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits = match self.bits {
            BitWidth::B32 => "32-bit",
            BitWidth::B64 => "64-bit",
        };
        write!(f, "{}/{}", self.os.as_str(), bits)
    }
}

/// Tools installable into the shared binary directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    CasperJs,
    PhantomJs,
    SlimerJs,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::CasperJs => "casperjs",
            Tool::PhantomJs => "phantomjs",
            Tool::SlimerJs => "slimerjs",
        }
    }

    /// Pinned release installed by this crate.
    pub fn version(&self) -> &'static str {
        match self {
            Tool::CasperJs => "1.1-beta3",
            Tool::PhantomJs => "1.9.8",
            Tool::SlimerJs => "0.9.6",
        }
    }

    /// Release archive URL for the platform, `None` where no package is
    /// published.
    pub fn archive_url(&self, platform: Platform) -> Option<String> {
        match self {
            Tool::CasperJs => Some(format!(
                "https://github.com/n1k0/casperjs/zipball/{}",
                self.version()
            )),
            Tool::PhantomJs => {
                let base = format!(
                    "https://bitbucket.org/ariya/phantomjs/downloads/phantomjs-{}",
                    self.version()
                );
                match (platform.os, platform.bits) {
                    (Os::Windows, _) => Some(format!("{base}-windows.zip")),
                    (Os::MacOs, _) => Some(format!("{base}-macosx.zip")),
                    (Os::Linux, BitWidth::B32) => Some(format!("{base}-linux-i686.tar.bz2")),
                    (Os::Linux, BitWidth::B64) => Some(format!("{base}-linux-x86_64.tar.bz2")),
                }
            }
            Tool::SlimerJs => {
                let base = format!(
                    "https://download.slimerjs.org/releases/{version}/slimerjs-{version}",
                    version = self.version()
                );
                match (platform.os, platform.bits) {
                    (Os::Windows, _) => Some(format!("{base}-win32.zip")),
                    (Os::MacOs, _) => Some(format!("{base}-mac.tar.bz2")),
                    (Os::Linux, BitWidth::B32) => Some(format!("{base}-linux-i686.tar.bz2")),
                    (Os::Linux, BitWidth::B64) => Some(format!("{base}-linux-x86_64.tar.bz2")),
                }
            }
        }
    }

    /// Launcher path relative to the extracted archive root.
    pub fn launcher(&self, os: Os) -> &'static str {
        match (self, os) {
            (Tool::CasperJs, _) => "bin/casperjs",
            (Tool::PhantomJs, Os::Windows) => "phantomjs.exe",
            (Tool::PhantomJs, _) => "bin/phantomjs",
            (Tool::SlimerJs, Os::Windows) => "slimerjs.bat",
            (Tool::SlimerJs, _) => "slimerjs",
        }
    }
}

/// Archive packaging, inferred from the URL extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistType {
    Zip,
    TarBz2,
    TarGz,
}

impl DistType {
    pub fn from_url(url: &str) -> DistType {
        if url.ends_with(".tar.bz2") {
            DistType::TarBz2
        } else if url.ends_with(".tar.gz") || url.ends_with(".tgz") {
            DistType::TarGz
        } else {
            // github zipballs carry no extension
            DistType::Zip
        }
    }
}

/// Default shared binary directory (`~/.wraith/bin`).
pub fn default_bin_dir() -> PathBuf {
    wraith_home().join("bin")
}

/// Default download/extract directory (`~/.wraith/vendor`).
pub fn default_vendor_dir() -> PathBuf {
    wraith_home().join("vendor")
}

fn wraith_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wraith")
}

/// Installs pinned tool releases under a vendor directory and links their
/// launchers into the shared binary directory.
pub struct Provisioner {
    bin_dir: PathBuf,
    vendor_dir: PathBuf,
}

impl Provisioner {
    pub fn new(bin_dir: impl Into<PathBuf>, vendor_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            vendor_dir: vendor_dir.into(),
        }
    }

    pub fn with_default_dirs() -> Self {
        Self::new(default_bin_dir(), default_vendor_dir())
    }

    /// Downloads, extracts, and links one tool; returns the path of the
    /// launcher link in the binary directory.
    pub fn install(&self, tool: Tool) -> Result<PathBuf> {
        let platform = Platform::detect().ok_or_else(|| WraithError::UnsupportedPlatform {
            tool: tool.name().to_string(),
            platform: "unknown".to_string(),
        })?;
        let url = tool
            .archive_url(platform)
            .ok_or_else(|| WraithError::UnsupportedPlatform {
                tool: tool.name().to_string(),
                platform: platform.to_string(),
            })?;

        let target_dir = self.vendor_dir.join(tool.name());
        fs::create_dir_all(&target_dir)?;

        info!("downloading {} {} from {}", tool.name(), tool.version(), url);
        let archive = download(&url)?;
        extract(&archive, DistType::from_url(&url), &target_dir)?;

        let launcher = find_launcher(&target_dir, tool.launcher(platform.os))?;
        debug!("launcher extracted at {}", launcher.display());

        self.link_into_bin(&launcher)
    }

    /// Exposes a launcher through the shared binary directory: a 0755
    /// symlink on Unix, a plain copy on Windows.
    fn link_into_bin(&self, launcher: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.bin_dir)?;
        let file_name = launcher.file_name().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "launcher has no file name")
        })?;
        let link = self.bin_dir.join(file_name);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(launcher, fs::Permissions::from_mode(0o755))?;
            if link.symlink_metadata().is_ok() {
                fs::remove_file(&link)?;
            }
            std::os::unix::fs::symlink(launcher, &link)?;
        }

        #[cfg(not(unix))]
        {
            fs::copy(launcher, &link)?;
        }

        info!("linked {} into {}", launcher.display(), self.bin_dir.display());
        Ok(link)
    }
}

fn download(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

fn extract(archive: &[u8], dist_type: DistType, target_dir: &Path) -> Result<()> {
    match dist_type {
        DistType::Zip => {
            let mut archive = zip::ZipArchive::new(Cursor::new(archive))?;
            archive.extract(target_dir)?;
        }
        DistType::TarBz2 => {
            let decoder = bzip2::read::BzDecoder::new(Cursor::new(archive));
            tar::Archive::new(decoder).unpack(target_dir)?;
        }
        DistType::TarGz => {
            let decoder = flate2::read::GzDecoder::new(Cursor::new(archive));
            tar::Archive::new(decoder).unpack(target_dir)?;
        }
    }
    Ok(())
}

/// Locates the launcher under the extraction root, looking through one
/// level of wrapper directories (release tarballs and zipballs unpack into
/// a single versioned directory).
fn find_launcher(target_dir: &Path, relative: &str) -> Result<PathBuf> {
    let direct = target_dir.join(relative);
    if direct.exists() {
        return Ok(direct);
    }

    for entry in fs::read_dir(target_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            let nested = path.join(relative);
            if nested.exists() {
                return Ok(nested);
            }
        }
    }

    Err(WraithError::LauncherNotFound {
        launcher: relative.to_string(),
        dir: target_dir.to_path_buf(),
    })
}

#[cfg(test)]
#[path = "provision_test.rs"]
mod provision_test;
