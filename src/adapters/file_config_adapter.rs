//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
[strategy]
window = 10
width = 1.5

[data]
path = /tmp/bars
";

    #[test]
    fn from_string_parses_config() {
        let config = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(config.get_int("strategy", "window", 20), 10);
        assert!((config.get_double("strategy", "width", 2.0) - 1.5).abs() < f64::EPSILON);
        assert_eq!(
            config.get_string("data", "path"),
            Some("/tmp/bars".to_string())
        );
    }

    #[test]
    fn from_file_parses_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let config = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(config.get_int("strategy", "window", 20), 10);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        assert_eq!(config.get_int("strategy", "window", 20), 20);
        assert!((config.get_double("strategy", "width", 2.0) - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.get_string("strategy", "anything"), None);
    }

    #[test]
    fn unparsable_int_falls_back_to_default() {
        let config = FileConfigAdapter::from_string("[strategy]\nwindow = soon\n").unwrap();
        assert_eq!(config.get_int("strategy", "window", 20), 20);
    }
}
