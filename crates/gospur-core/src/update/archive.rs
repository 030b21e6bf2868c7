//! Pulling the executable out of a release archive

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Archive types release assets are published as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Detect the format from an asset name or download URL
    pub fn from_name(name: &str) -> Result<Self> {
        if name.ends_with(".zip") {
            Ok(Self::Zip)
        } else if name.ends_with(".tar.gz") {
            Ok(Self::TarGz)
        } else {
            Err(Error::UnsupportedArchiveFormat(name.to_string()))
        }
    }
}

/// Contents of the entry whose base name is `file_name`
pub fn extract_binary(format: ArchiveFormat, bytes: &[u8], file_name: &str) -> Result<Vec<u8>> {
    let found = match format {
        ArchiveFormat::Zip => extract_from_zip(bytes, file_name)?,
        ArchiveFormat::TarGz => extract_from_tar_gz(bytes, file_name)?,
    };
    found.ok_or_else(|| Error::BinaryNotFoundInArchive(file_name.to_string()))
}

fn base_name_matches(entry: &Path, file_name: &str) -> bool {
    entry.file_name().is_some_and(|name| name == file_name)
}

fn corrupt(archive: &str, reason: impl ToString) -> Error {
    Error::ArchiveCorrupt {
        archive: archive.to_string(),
        reason: reason.to_string(),
    }
}

fn extract_from_zip(bytes: &[u8], file_name: &str) -> Result<Option<Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| corrupt(".zip", e))?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| corrupt(".zip", e))?;
        if file.is_dir() || !base_name_matches(Path::new(file.name()), file_name) {
            continue;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| corrupt(".zip", e))?;
        return Ok(Some(contents));
    }

    Ok(None)
}

fn extract_from_tar_gz(bytes: &[u8], file_name: &str) -> Result<Option<Vec<u8>>> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));

    for entry in archive.entries().map_err(|e| corrupt(".tar.gz", e))? {
        let mut entry = entry.map_err(|e| corrupt(".tar.gz", e))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let matches = {
            let path = entry.path().map_err(|e| corrupt(".tar.gz", e))?;
            base_name_matches(&path, file_name)
        };
        if !matches {
            continue;
        }

        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).map_err(|e| corrupt(".tar.gz", e))?;
        return Ok(Some(contents));
    }

    Ok(None)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    pub(crate) fn tar_gz(files: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        for (name, data) in files {
            let mut header = tar::Header::new_gnu();
            header.set_entry_type(tar::EntryType::Regular);
            header.set_size(data.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder
                .append_data(&mut header, name, data.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    pub(crate) fn zip(files: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut writer = ZipWriter::new(Cursor::new(&mut buffer));
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
            writer.add_directory("gospur/", options).unwrap();
            for (name, data) in files {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(
            ArchiveFormat::from_name("gospur_Linux_x86_64.tar.gz").unwrap(),
            ArchiveFormat::TarGz
        );
        assert_eq!(
            ArchiveFormat::from_name("https://host/gospur_Windows_x86_64.zip").unwrap(),
            ArchiveFormat::Zip
        );
        for name in ["gospur.tar.bz2", "gospur.tgz", "gospur"] {
            assert!(matches!(
                ArchiveFormat::from_name(name).unwrap_err(),
                Error::UnsupportedArchiveFormat(_)
            ));
        }
    }

    #[test]
    fn test_tar_gz_finds_nested_binary() {
        let archive = tar_gz(&[
            ("README.md", "docs"),
            ("gospur_Linux_x86_64/gospur", "new binary"),
        ]);
        let binary = extract_binary(ArchiveFormat::TarGz, &archive, "gospur").unwrap();
        assert_eq!(binary, b"new binary");
    }

    #[test]
    fn test_zip_distinguishes_exe() {
        let archive = zip(&[("gospur/gospur", "unix"), ("gospur/gospur.exe", "windows")]);
        assert_eq!(
            extract_binary(ArchiveFormat::Zip, &archive, "gospur.exe").unwrap(),
            b"windows"
        );
        assert_eq!(
            extract_binary(ArchiveFormat::Zip, &archive, "gospur").unwrap(),
            b"unix"
        );
    }

    #[test]
    fn test_binary_missing() {
        let archive = tar_gz(&[("LICENSE", "MIT")]);
        let err = extract_binary(ArchiveFormat::TarGz, &archive, "gospur").unwrap_err();
        assert!(matches!(err, Error::BinaryNotFoundInArchive(ref name) if name == "gospur"));

        let archive = zip(&[("gospur-helper", "nope")]);
        let err = extract_binary(ArchiveFormat::Zip, &archive, "gospur").unwrap_err();
        assert!(matches!(err, Error::BinaryNotFoundInArchive(_)));
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let err = extract_binary(ArchiveFormat::Zip, b"not a zip", "gospur").unwrap_err();
        assert!(matches!(err, Error::ArchiveCorrupt { .. }));

        let err = extract_binary(ArchiveFormat::TarGz, b"not gzip", "gospur").unwrap_err();
        assert!(matches!(err, Error::ArchiveCorrupt { .. }));
    }
}
