use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("template not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    /// File name, used as the engine's template name.
    pub name: String,
    pub path: PathBuf,
    pub source: String,
}

impl LoadedTemplate {
    /// Directory the template lives in, for resolving includes.
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

pub fn load(path: &Path) -> Result<LoadedTemplate, TemplateLoadError> {
    let source = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            TemplateLoadError::NotFound(path.to_path_buf())
        } else {
            TemplateLoadError::Io { path: path.to_path_buf(), source: e }
        }
    })?;

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    Ok(LoadedTemplate { name, path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_reads_source_and_name() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("motd.j2");
        fs::write(&path, "Hi {{ user }}\n").unwrap();

        let tpl = load(&path).unwrap();
        assert_eq!(tpl.name, "motd.j2");
        assert_eq!(tpl.source, "Hi {{ user }}\n");
        assert_eq!(tpl.dir(), Some(tmp.path()));
    }

    #[test]
    fn missing_template_is_not_found() {
        let tmp = tempdir().unwrap();
        let err = load(&tmp.path().join("nope.j2")).unwrap_err();
        assert!(matches!(err, TemplateLoadError::NotFound(_)));
    }
}
