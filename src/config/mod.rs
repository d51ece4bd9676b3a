use std::path::{Path, PathBuf};

pub const DEFAULT_PROGRAM: &str = "pio";
pub const DEFAULT_TAIL_LINES: usize = 10;

/// Directory (relative to a project root) holding the project-level config.
const PROJECT_DIR: &str = ".pio-wrapper";
const CONFIG_FILE: &str = "config.toml";

/// Runtime settings for the wrapper.
///
/// Sources, lowest to highest priority:
/// 1. built-in defaults
/// 2. `{config_dir}/pio-wrapper/config.toml` (e.g. `~/.config/pio-wrapper/config.toml`)
/// 3. `{project_root}/.pio-wrapper/config.toml`
/// 4. environment variables:
///    - `PIO_WRAPPER_PROGRAM`: executable to run instead of `pio`
///    - `PIO_WRAPPER_TAIL_LINES`: fallback tail length
///    - `PIO_WRAPPER_VERBOSE`: `true`/`1`/`yes` to log to stderr, `false`/`0`/`no` to stay quiet
///
/// Command-line arguments are never consulted; they all belong to the child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperConfig {
    pub program: String,
    pub tail_lines: usize,
    pub verbose: bool,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            tail_lines: DEFAULT_TAIL_LINES,
            verbose: false,
        }
    }
}

/// Private: parsed representation of a config file.
#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    wrapper: Option<WrapperSection>,
}

#[derive(serde::Deserialize, Default)]
struct WrapperSection {
    program: Option<String>,
    tail_lines: Option<usize>,
    verbose: Option<bool>,
}

/// Read the `[wrapper]` table from a TOML file. Returns `None` on any error.
fn read_section(path: &Path) -> Option<WrapperSection> {
    let content = std::fs::read_to_string(path).ok()?;
    let cfg: ConfigFile = toml::from_str(&content).ok()?;
    cfg.wrapper
}

/// Parse a boolean env value. `None` for anything outside the two known sets.
fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

impl WrapperConfig {
    /// Load settings from the auto-detected config files, then apply environment overrides.
    pub fn load() -> Self {
        let root = std::env::current_dir()
            .ok()
            .and_then(|cwd| project_root_for(&cwd));
        let global = dirs::config_dir().map(|d| d.join("pio-wrapper").join(CONFIG_FILE));
        let mut config = Self::load_from(root.as_deref(), global.as_deref());
        config.apply_env();
        config
    }

    /// Load settings from explicit paths, without looking at the environment.
    /// Priority: project config → global config → defaults.
    pub fn load_from(project_root: Option<&Path>, global_config: Option<&Path>) -> Self {
        let mut config = Self::default();
        if let Some(section) = global_config.and_then(read_section) {
            config.apply_section(section);
        }
        if let Some(section) =
            project_root.and_then(|root| read_section(&root.join(PROJECT_DIR).join(CONFIG_FILE)))
        {
            config.apply_section(section);
        }
        config
    }

    fn apply_section(&mut self, section: WrapperSection) {
        if let Some(program) = section.program.filter(|p| !p.trim().is_empty()) {
            self.program = program;
        }
        if let Some(tail_lines) = section.tail_lines {
            self.tail_lines = tail_lines;
        }
        if let Some(verbose) = section.verbose {
            self.verbose = verbose;
        }
    }

    /// Override fields from `PIO_WRAPPER_*` environment variables.
    /// Blank or unparsable values leave the current setting alone.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("PIO_WRAPPER_PROGRAM")
            && !val.trim().is_empty()
        {
            self.program = val;
        }
        if let Ok(val) = std::env::var("PIO_WRAPPER_TAIL_LINES")
            && let Ok(n) = val.trim().parse::<usize>()
        {
            self.tail_lines = n;
        }
        if let Ok(val) = std::env::var("PIO_WRAPPER_VERBOSE")
            && let Some(verbose) = parse_bool(&val)
        {
            self.verbose = verbose;
        }
    }
}

/// Walk up from `dir` to the nearest ancestor holding `.pio-wrapper/config.toml`.
/// `None` when no ancestor has one.
pub fn project_root_for(dir: &Path) -> Option<PathBuf> {
    let mut current = dir.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).join(CONFIG_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}
