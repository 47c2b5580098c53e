use crate::fn_log;
use crate::level::Level;
use crate::pattern::Pattern;
use crate::ports::provided::ManifestError;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Expectation manifests: YAML files mapping level names to the message
/// patterns a suite expects at that level.
///
/// ```yaml
/// error:
///   - "token .* expired"
///   - "permission denied for .*"
/// warn:
///   - ".*"
/// ```
///
/// Files are loaded once and cached by stem; `.yml` and `.yaml` are both
/// accepted, both at once is an error. Loading is strict: a key that is not a
/// level name, a value that is not a list of strings, or an entry that does
/// not compile as a regex fails the whole file.
///
/// # Examples
///
/// ```
/// use console_intercept::{Level, Manifest};
///
/// let mut manifest = Manifest::new("tests/fixtures");
///
/// let patterns = manifest.patterns("auth", Level::Error).unwrap();
/// assert_eq!(patterns.len(), 2);
///
/// // A level the file does not mention has no expectations
/// let patterns = manifest.patterns("auth", Level::Trace).unwrap();
/// assert!(patterns.is_empty());
/// ```
pub struct Manifest {
    manifest_dir: PathBuf,
    cache: HashMap<String, HashMap<Level, Vec<Pattern>>>,
}

impl Manifest {
    pub fn new(manifest_dir: &str) -> Self {
        Self {
            manifest_dir: PathBuf::from(manifest_dir),
            cache: HashMap::new(),
        }
    }

    /// The patterns `file` declares for `level`, compiled and ready for
    /// [`Interceptor::install`](crate::Interceptor::install). A level absent
    /// from the file yields an empty list.
    pub fn patterns(&mut self, file: &str, level: Level) -> Result<Vec<Pattern>, ManifestError> {
        fn_log!("Manifest", "patterns", file, level.as_str());

        self.load_file(file)?;

        Ok(self
            .cache
            .get(file)
            .and_then(|levels| levels.get(&level))
            .cloned()
            .unwrap_or_default())
    }

    /// Loads and compiles `<file>.yml` or `<file>.yaml` from the manifest
    /// directory. Cached files are not re-read; failed files are not cached,
    /// so a retry sees the same error.
    fn load_file(&mut self, file: &str) -> Result<(), ManifestError> {
        if self.cache.contains_key(file) {
            return Ok(());
        }

        let yml_path = self.manifest_dir.join(format!("{}.yml", file));
        let yaml_path = self.manifest_dir.join(format!("{}.yaml", file));

        let yml_exists = yml_path.exists();
        let yaml_exists = yaml_path.exists();

        if yml_exists && yaml_exists {
            return Err(ManifestError::AmbiguousFile(format!(
                "both '{}.yml' and '{}.yaml' exist, use only one extension",
                file, file
            )));
        }

        let file_path = if yml_exists {
            yml_path
        } else if yaml_exists {
            yaml_path
        } else {
            return Err(ManifestError::FileNotFound(format!(
                "'{}.yml' or '{}.yaml' in '{}'",
                file,
                file,
                self.manifest_dir.display()
            )));
        };

        let content = fs::read_to_string(&file_path)
            .map_err(|e| ManifestError::ReadError(format!("{}: {}", file_path.display(), e)))?;

        let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(&content)
            .map_err(|e| ManifestError::ParseError(format!("{}: {}", file_path.display(), e)))?;
        let data = serde_json::to_value(&yaml)
            .map_err(|e| ManifestError::ParseError(format!("{}: {}", file_path.display(), e)))?;

        let expectations = Self::compile(&data)?;
        self.cache.insert(file.to_string(), expectations);

        Ok(())
    }

    fn compile(data: &Value) -> Result<HashMap<Level, Vec<Pattern>>, ManifestError> {
        let Value::Object(map) = data else {
            return Err(ManifestError::ParseError(
                "expected a mapping of level names to pattern lists".to_string(),
            ));
        };

        let mut expectations = HashMap::new();
        for (key, entry) in map {
            let level: Level = key
                .parse()
                .map_err(|_| ManifestError::UnknownLevel(key.clone()))?;

            let Value::Array(items) = entry else {
                return Err(ManifestError::ParseError(format!(
                    "'{}' must hold a list of pattern strings",
                    key
                )));
            };

            let mut patterns = Vec::with_capacity(items.len());
            for item in items {
                let Value::String(source) = item else {
                    return Err(ManifestError::InvalidPattern(format!(
                        "non-string entry under '{}'",
                        key
                    )));
                };
                let pattern = Pattern::regex(source)
                    .map_err(|e| ManifestError::InvalidPattern(format!("'{}': {}", source, e)))?;
                patterns.push(pattern);
            }
            expectations.insert(level, patterns);
        }

        Ok(expectations)
    }
}
