use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data.json";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Runtime settings for the web server and CLI modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub static_dir: PathBuf,
    pub autosave: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            autosave: true,
        }
    }
}

impl Config {
    /// Reads `TIMETABLE_DATA`, `TIMETABLE_STATIC` and `TIMETABLE_AUTOSAVE`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(path) = lookup("TIMETABLE_DATA").filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("TIMETABLE_STATIC").filter(|d| !d.trim().is_empty()) {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("TIMETABLE_AUTOSAVE") {
            config.autosave = parse_flag(&flag);
        }
        config
    }

    /// Port given after the `web` argument, falling back to the default
    pub fn with_port_arg(mut self, arg: Option<&str>) -> Self {
        if let Some(port) = arg.and_then(|p| p.trim().parse::<u16>().ok()) {
            self.port = port;
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    !(lower == "0" || lower == "false" || lower == "no" || lower == "off")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn env_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TIMETABLE_DATA", "/tmp/tt.json"),
            ("TIMETABLE_AUTOSAVE", "No"),
        ]))
        .with_port_arg(Some("9000"));

        assert_eq!(config.data_path, PathBuf::from("/tmp/tt.json"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(!config.autosave);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn bad_port_keeps_default() {
        let config = Config::default().with_port_arg(Some("http"));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
