//! The writer: dual-sink log emission with lazy day-based rotation.
//!
//! A [`Writer`] is configured once through [`WriterBuilder`], initialized, and
//! then driven through the per-severity emit methods. Every persistence
//! attempt re-derives the expected runtime log path for the current day and
//! transparently reopens storage when the day (or month) has rolled over
//! since the last save.
//!
//! Storage failures never reach the caller: they are converted into
//! `LOGGER_ERROR` console diagnostics, which themselves bypass the save path.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::style::Color;
use uuid::Uuid;

use crate::config::WriterConfig;
use crate::console::{ConsoleSink, TermConsole};
use crate::error::LogError;
use crate::rotation::{self, CustomLogPath, RuntimePath, TargetOs};
use crate::rules::{DisplayRules, WriterRules};
use crate::severity::Severity;
use crate::template::{LineTemplate, DATE_FORMAT};

/// Version string listed in every log file header.
pub const LOGGER_VERSION: &str = "1.0";

const HEADER_BANNER: &str = "\t\t=================================================== ";
const INSTANCE_MARKER: &str = "Starting a new writer instance...";

/// Staged configuration for a [`Writer`].
///
/// All configuration happens here; once `build()` hands over the writer, the
/// remaining mutable surface is operational (emits, token value updates,
/// color and header-property registration).
pub struct WriterBuilder {
    service_name: String,
    log_path: String,
    target_os: TargetOs,
    rules: WriterRules,
    template: LineTemplate,
    header_properties: BTreeMap<String, String>,
    custom_colors: HashMap<String, Color>,
    console: Box<dyn ConsoleSink + Send>,
}

impl Default for WriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WriterBuilder {
    pub fn new() -> Self {
        let template = LineTemplate::new();
        Self {
            service_name: crate::template::DEFAULT_SERVICE_NAME.to_string(),
            log_path: String::new(),
            target_os: TargetOs::default(),
            rules: WriterRules::default(),
            template,
            header_properties: BTreeMap::new(),
            custom_colors: HashMap::new(),
            console: Box::new(TermConsole::new()),
        }
    }

    /// Start from a loaded [`WriterConfig`] instead of the defaults.
    pub fn from_config(config: WriterConfig) -> Self {
        let mut builder = Self::new()
            .service_name(config.service_name)
            .log_path(config.log_path)
            .line_start(config.line_start)
            .target_os(config.target_os)
            .display_rules(config.display_rules)
            .save_rules(config.save_rules);
        for (name, value) in config.line_params {
            builder = builder.line_param(name, value);
        }
        for (key, value) in config.header_properties {
            builder = builder.header_property(key, value);
        }
        for (name, color) in config.custom_colors {
            register_color(&mut builder.custom_colors, &name, color);
        }
        builder
    }

    /// Rules gating console display per severity.
    pub fn display_rules(mut self, rules: DisplayRules) -> Self {
        self.rules.display = rules;
        self
    }

    /// Rules gating persistence per severity.
    pub fn save_rules(mut self, rules: DisplayRules) -> Self {
        self.rules.save = rules;
        self
    }

    /// Root folder the runtime and custom log trees live under.
    pub fn log_path(mut self, path: impl Into<String>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Service name; also propagated into the line template.
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self.template.set_service_name(self.service_name.clone());
        self
    }

    /// Line-prefix template text, keeping the registered tokens.
    pub fn line_start(mut self, text: impl Into<String>) -> Self {
        self.template.set_text(text);
        self
    }

    /// Register one custom template token with its initial value.
    pub fn line_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.template.add_param(name, value);
        self
    }

    /// Replace the template text and token set wholesale.
    pub fn line_template(mut self, template: LineTemplate) -> Self {
        self.template = template;
        self.template.set_service_name(self.service_name.clone());
        self
    }

    /// Add a key/value property to the log file header.
    pub fn header_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_properties.insert(key.into(), value.into());
        self
    }

    /// Path separator convention used for all derived log paths.
    pub fn target_os(mut self, os: TargetOs) -> Self {
        self.target_os = os;
        self
    }

    /// Replace the console sink (in-memory capture, embedding, tests).
    pub fn console(mut self, sink: impl ConsoleSink + Send + 'static) -> Self {
        self.console = Box::new(sink);
        self
    }

    pub fn build(self) -> Writer {
        Writer {
            service_name: self.service_name,
            log_path: self.log_path,
            target_os: self.target_os,
            rules: self.rules,
            template: self.template,
            header_properties: self.header_properties,
            custom_colors: self.custom_colors,
            console: self.console,
            active_file: None,
            ready: false,
        }
    }
}

/// Dual-sink log writer.
///
/// One writer drives one logical log stream. The type is not internally
/// synchronized; concurrent use requires external serialization (a
/// `Mutex<Writer>` works, the console sink is `Send`).
pub struct Writer {
    service_name: String,
    log_path: String,
    target_os: TargetOs,
    rules: WriterRules,
    template: LineTemplate,
    header_properties: BTreeMap<String, String>,
    custom_colors: HashMap<String, Color>,
    console: Box<dyn ConsoleSink + Send>,
    active_file: Option<String>,
    ready: bool,
}

impl Writer {
    pub fn builder() -> WriterBuilder {
        WriterBuilder::new()
    }

    /// Open (or create) the runtime log file for today.
    ///
    /// A freshly created file gets the header block; an existing file gets an
    /// instance-start marker line, never a second header. I/O failures are
    /// reported through the `LOGGER_ERROR` console channel and leave the
    /// writer not ready; they are never propagated.
    pub fn initialize(&mut self) {
        self.initialize_at(Local::now());
    }

    fn initialize_at(&mut self, now: DateTime<Local>) {
        let path = rotation::runtime_path(&self.log_path, self.target_os, now);
        match self.open_runtime_file(&path) {
            Ok(()) => {
                self.active_file = Some(path.full);
                self.ready = true;
            }
            Err(err) => {
                self.report("initialize", &format!("logger initialization failed: {err:#}"));
                self.ready = false;
            }
        }
    }

    fn open_runtime_file(&mut self, path: &RuntimePath) -> Result<()> {
        fs::create_dir_all(&path.folder).context("Failed to create the runtime log folder")?;
        if fs::metadata(&path.full).is_ok() {
            let mut file = OpenOptions::new()
                .append(true)
                .open(&path.full)
                .context("Failed to open the runtime log file")?;
            writeln!(file, "{INSTANCE_MARKER}").context("Failed to write the instance marker")?;
        } else {
            let header = self.build_header();
            fs::write(&path.full, header).context("Failed to create the runtime log file")?;
        }
        Ok(())
    }

    fn build_header(&mut self) -> String {
        self.header_properties
            .insert("Logger version".to_string(), LOGGER_VERSION.to_string());

        let mut header = String::from(HEADER_BANNER);
        if !self.service_name.is_empty() {
            header.push_str("      \n\t\t|                      Logs                       |");
        } else {
            header.push_str("\n\t\t|                   Module Logs                   |");
        }
        header.push('\n');
        header.push_str(HEADER_BANNER);
        header.push_str("\n\nService information: ");
        for (key, value) in &self.header_properties {
            header.push_str(&format!("\n[{key}] -> {value} "));
        }
        header.push_str("\n\n");
        header
    }

    /// Emit at `Info` severity.
    pub fn info(&mut self, text: &str) {
        self.emit_at(Severity::Info, text, Local::now());
    }

    /// Emit at `Debug` severity.
    pub fn debug(&mut self, text: &str) {
        self.emit_at(Severity::Debug, text, Local::now());
    }

    /// Emit at `Warning` severity.
    pub fn warning(&mut self, text: &str) {
        self.emit_at(Severity::Warning, text, Local::now());
    }

    /// Emit at `Error` severity.
    pub fn error(&mut self, text: &str) {
        self.emit_at(Severity::Error, text, Local::now());
    }

    /// Emit at `Success` severity.
    pub fn success(&mut self, text: &str) {
        self.emit_at(Severity::Success, text, Local::now());
    }

    // The per-severity entry points treat the display rule as a combined
    // gate: a severity that may not be displayed is not persisted either.
    fn emit_at(&mut self, severity: Severity, text: &str, now: DateTime<Local>) {
        if !self.rules.allows_display(severity) {
            return;
        }
        let prefix = self.render_prefix(now);
        self.console.write_colored_line(
            severity.color(),
            Severity::Info.color(),
            &format!("{prefix}{text}"),
        );
        if self.rules.allows_save(severity) {
            self.save_log_at(text, now);
        }
    }

    /// Emit with the display and save rules evaluated independently.
    ///
    /// Unlike the per-severity methods, a disabled display rule here only
    /// suppresses the console line; the save rule still decides persistence
    /// on its own. `LoggerError` entries display per their rule and never
    /// persist.
    pub fn write_line(&mut self, text: &str, severity: Severity) {
        self.write_line_at(text, severity, Local::now());
    }

    fn write_line_at(&mut self, text: &str, severity: Severity, now: DateTime<Local>) {
        if self.rules.allows_display(severity) {
            let prefix = self.render_prefix(now);
            self.console.write_colored_line(
                severity.color(),
                Severity::Info.color(),
                &format!("{prefix}{text}"),
            );
        }
        if self.rules.allows_save(severity) {
            self.save_log_at(text, now);
        }
    }

    /// Display a line in the color registered for a custom log type.
    ///
    /// An unregistered `type_name` produces a diagnostic and falls back to
    /// the `Info` color; the line is still displayed. Custom-typed entries
    /// are never persisted.
    pub fn write_custom(&mut self, type_name: &str, text: &str) {
        self.write_custom_at(type_name, text, Local::now());
    }

    fn write_custom_at(&mut self, type_name: &str, text: &str, now: DateTime<Local>) {
        let color = match self.custom_colors.get(type_name) {
            Some(color) => *color,
            None => {
                self.report(
                    "write_custom",
                    &format!("custom type `{type_name}` is not registered"),
                );
                Severity::Info.color()
            }
        };
        let prefix = self.render_prefix(now);
        self.console
            .write_colored_line(color, Severity::Info.color(), &format!("{prefix}{text}"));
    }

    fn save_log_at(&mut self, text: &str, now: DateTime<Local>) {
        if !self.ready {
            self.report("save_log", "could not save, the writer is not initialized");
            return;
        }
        let file = match self.active_file_at(now) {
            Ok(file) => file,
            Err(err) => {
                self.report("save_log", &err.to_string());
                return;
            }
        };
        let prefix = self.render_prefix(now);
        if let Err(err) = append_entry(&file, &prefix, text) {
            self.report(
                "save_log",
                &format!("failed to append to the runtime log: {err:#}"),
            );
        }
    }

    // The rotation check: recompute the expected path for `now` and reopen
    // storage when the open file no longer matches it.
    fn active_file_at(&mut self, now: DateTime<Local>) -> Result<String, LogError> {
        let expected = rotation::runtime_path(&self.log_path, self.target_os, now);
        if self.active_file.as_deref() != Some(expected.full.as_str()) {
            self.ready = false;
            self.initialize_at(now);
        }
        match (&self.active_file, self.ready) {
            (Some(file), true) => Ok(file.clone()),
            _ => Err(LogError::RuntimeLogFileGeneration(
                "reinitialization did not produce a usable file".to_string(),
            )),
        }
    }

    /// Write an ad-hoc dump file, independent of the rotating runtime log.
    ///
    /// The file lands under `{root}/custom/{month}-{year}/{day}-{month}-logs`
    /// with a fresh id in its name, and carries a two-section body: the
    /// description `text` and the `Display` rendering of `data`. Returns the
    /// full path, or `None` after a diagnostic if the writer is not
    /// initialized or the write failed.
    pub fn save_custom_log(&mut self, text: &str, name: &str, data: impl Display) -> Option<String> {
        self.save_custom_log_at(text, name, data, Local::now())
    }

    fn save_custom_log_at(
        &mut self,
        text: &str,
        name: &str,
        data: impl Display,
        now: DateTime<Local>,
    ) -> Option<String> {
        if !self.ready {
            self.report(
                "save_custom_log",
                "could not save, the writer is not initialized",
            );
            return None;
        }
        let path =
            rotation::custom_log_path(&self.log_path, self.target_os, name, Uuid::new_v4(), now);
        match write_custom_dump(&path, text, data) {
            Ok(()) => Some(path.full),
            Err(err) => {
                self.report(
                    "save_custom_log",
                    &format!("failed to save custom log `{name}`: {err:#}"),
                );
                None
            }
        }
    }

    /// Register a display color for a custom log type.
    ///
    /// A no-op when the name is empty, the name is already registered, or the
    /// color equals every built-in severity color at once (impossible while
    /// the built-in palette is pairwise distinct; kept as a guard).
    pub fn add_color_description(&mut self, name: &str, color: Color) {
        register_color(&mut self.custom_colors, name, color);
    }

    /// Update the value of a registered template token.
    pub fn set_line_param(&mut self, name: &str, value: impl Into<String>) -> Result<(), LogError> {
        self.template.set_param(name, value)
    }

    /// Add a header property; takes effect on the next header build, i.e.
    /// the next newly created log file.
    pub fn add_header_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.header_properties.insert(key.into(), value.into());
    }

    /// Whether the persistence subsystem has a verified active file.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn log_path(&self) -> &str {
        &self.log_path
    }

    /// Path of the currently open runtime log file, if any.
    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    fn render_prefix(&mut self, now: DateTime<Local>) -> String {
        self.template.set_date_now(now.format(DATE_FORMAT).to_string());
        self.template.set_service_name(self.service_name.clone());
        self.template.render()
    }

    // Self-diagnostics: displayed per the LoggerError display rule, never
    // persisted (a disk failure must not re-enter the save path).
    fn report(&mut self, method: &str, message: &str) {
        if !self.rules.allows_display(Severity::LoggerError) {
            return;
        }
        let prefix = self.render_prefix(Local::now());
        let line = format!("{prefix}[LOGGER_ERROR]->[{method}]->{message}");
        self.console
            .write_colored_line(Severity::LoggerError.color(), Severity::Info.color(), &line);
    }
}

fn register_color(colors: &mut HashMap<String, Color>, name: &str, color: Color) {
    if Severity::DISPLAY
        .iter()
        .all(|severity| severity.color() == color)
    {
        return;
    }
    if name.is_empty() || colors.contains_key(name) {
        return;
    }
    colors.insert(name.to_string(), color);
}

fn append_entry(path: &str, prefix: &str, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .context("Failed to open the runtime log file")?;
    write!(file, "{prefix}{text}\n\n").context("Failed to write the log entry")?;
    Ok(())
}

fn write_custom_dump(path: &CustomLogPath, text: &str, data: impl Display) -> Result<()> {
    fs::create_dir_all(&path.day_folder).context("Failed to create the custom log folders")?;
    let body = format!("\t LOG DESCRIPTION: \n{text}\n\t LOG CONTENT: \n{data}\n");
    fs::write(&path.full, body).context("Failed to write the custom log file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn march_fifth() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap()
    }

    fn test_writer(root: &str) -> (Writer, MemoryConsole) {
        let console = MemoryConsole::new();
        let writer = Writer::builder()
            .service_name("api")
            .log_path(root)
            .target_os(TargetOs::Linux)
            .console(console.clone())
            .build();
        (writer, console)
    }

    fn runtime_file(root: &str) -> String {
        rotation::runtime_path(root, TargetOs::Linux, Local::now()).full
    }

    #[test]
    fn test_initialize_creates_file_with_header() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);

        writer.initialize();

        assert!(writer.is_ready());
        assert!(console.is_empty());
        let content = fs::read_to_string(runtime_file(&root)).unwrap();
        assert!(content.starts_with(HEADER_BANNER));
        assert!(content.contains("|                      Logs                       |"));
        assert!(content.contains("Service information: "));
        assert!(content.contains("[Logger version] -> 1.0 "));
    }

    #[test]
    fn test_initialize_header_lists_accumulated_properties() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let mut writer = Writer::builder()
            .service_name("api")
            .log_path(&root)
            .target_os(TargetOs::Linux)
            .header_property("Region", "eu-west-1")
            .console(MemoryConsole::new())
            .build();

        writer.initialize();

        let content = fs::read_to_string(runtime_file(&root)).unwrap();
        assert!(content.contains("[Region] -> eu-west-1 "));
        assert!(content.contains("[Logger version] -> 1.0 "));
    }

    #[test]
    fn test_initialize_twice_appends_marker_not_header() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, _console) = test_writer(&root);

        writer.initialize();
        writer.initialize();
        writer.initialize();

        let content = fs::read_to_string(runtime_file(&root)).unwrap();
        assert_eq!(content.matches("Service information: ").count(), 1);
        assert_eq!(content.matches(INSTANCE_MARKER).count(), 2);
    }

    #[test]
    fn test_info_writes_console_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);
        writer.initialize();

        writer.info("hello");

        let lines = console.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Color::White);
        assert!(lines[0].1.ends_with("hello"));
        assert!(lines[0].1.starts_with("[api]->["));

        let content = fs::read_to_string(runtime_file(&root)).unwrap();
        assert!(content.ends_with("hello\n\n"));
    }

    #[test]
    fn test_severity_methods_use_their_colors() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);
        writer.initialize();

        writer.debug("d");
        writer.warning("w");
        writer.error("e");
        writer.success("s");

        let colors: Vec<Color> = console.lines().iter().map(|(c, _)| *c).collect();
        assert_eq!(
            colors,
            vec![Color::Cyan, Color::Yellow, Color::Red, Color::Green]
        );
    }

    #[test]
    fn test_disabled_display_rule_suppresses_save_too() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let console = MemoryConsole::new();
        let mut display = DisplayRules::all(true);
        display.info = false;
        let mut writer = Writer::builder()
            .service_name("api")
            .log_path(&root)
            .target_os(TargetOs::Linux)
            .display_rules(display)
            .console(console.clone())
            .build();
        writer.initialize();
        let before = fs::read_to_string(runtime_file(&root)).unwrap();

        writer.info("invisible");

        assert!(console.is_empty());
        let after = fs::read_to_string(runtime_file(&root)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_disabled_save_rule_keeps_console_output() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let console = MemoryConsole::new();
        let mut save = DisplayRules::all(true);
        save.info = false;
        let mut writer = Writer::builder()
            .service_name("api")
            .log_path(&root)
            .target_os(TargetOs::Linux)
            .save_rules(save)
            .console(console.clone())
            .build();
        writer.initialize();

        writer.info("console only");

        assert_eq!(console.len(), 1);
        let content = fs::read_to_string(runtime_file(&root)).unwrap();
        assert!(!content.contains("console only"));
    }

    #[test]
    fn test_write_line_gates_display_and_save_independently() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let console = MemoryConsole::new();
        let mut writer = Writer::builder()
            .service_name("api")
            .log_path(&root)
            .target_os(TargetOs::Linux)
            .display_rules(DisplayRules::all(false))
            .console(console.clone())
            .build();
        writer.initialize();

        writer.write_line("saved quietly", Severity::Info);

        assert!(console.is_empty());
        let content = fs::read_to_string(runtime_file(&root)).unwrap();
        assert!(content.contains("saved quietly"));
    }

    #[test]
    fn test_write_line_logger_error_never_persists() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);
        writer.initialize();

        writer.write_line("self diagnostic", Severity::LoggerError);

        assert_eq!(console.len(), 1);
        assert_eq!(console.lines()[0].0, Color::DarkRed);
        let content = fs::read_to_string(runtime_file(&root)).unwrap();
        assert!(!content.contains("self diagnostic"));
    }

    #[test]
    fn test_rotation_on_day_change_splits_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, _console) = test_writer(&root);

        let day_one = march_fifth();
        let day_two = Local.with_ymd_and_hms(2024, 3, 6, 0, 0, 5).unwrap();
        writer.initialize_at(day_one);
        writer.save_log_at("first day entry", day_one);
        writer.save_log_at("second day entry", day_two);

        let first = rotation::runtime_path(&root, TargetOs::Linux, day_one);
        let second = rotation::runtime_path(&root, TargetOs::Linux, day_two);
        assert_ne!(first.full, second.full);
        assert_eq!(writer.active_file(), Some(second.full.as_str()));

        let first_content = fs::read_to_string(&first.full).unwrap();
        let second_content = fs::read_to_string(&second.full).unwrap();
        assert!(first_content.contains("first day entry"));
        assert!(!first_content.contains("second day entry"));
        assert!(second_content.contains("second day entry"));
        assert!(!second_content.contains("first day entry"));
        // the new day's file is fresh, so it opens with the header
        assert!(second_content.starts_with(HEADER_BANNER));
    }

    #[test]
    fn test_write_custom_uses_registered_color() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);
        writer.initialize();

        writer.add_color_description("alert", Color::Magenta);
        writer.add_color_description("alert", Color::Blue);
        writer.write_custom("alert", "msg");

        let lines = console.lines();
        assert_eq!(lines.len(), 1);
        // the duplicate registration was a no-op
        assert_eq!(lines[0].0, Color::Magenta);
        assert!(lines[0].1.ends_with("msg"));
    }

    #[test]
    fn test_write_custom_unknown_type_falls_back_after_diagnostic() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);
        writer.initialize();

        writer.write_custom("missing", "still shown");

        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, Color::DarkRed);
        assert!(lines[0].1.contains("[LOGGER_ERROR]->[write_custom]->"));
        assert!(lines[0].1.contains("missing"));
        assert_eq!(lines[1].0, Color::White);
        assert!(lines[1].1.ends_with("still shown"));
    }

    #[test]
    fn test_add_color_description_ignores_empty_names() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);
        writer.initialize();

        writer.add_color_description("", Color::Magenta);
        writer.write_custom("", "msg");

        // the empty name was never registered, so the lookup reports and
        // falls back
        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].0, Color::White);
    }

    #[test]
    fn test_save_before_initialize_reports_diagnostic() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);

        writer.info("too early");

        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, Color::White);
        assert!(lines[0].1.ends_with("too early"));
        assert_eq!(lines[1].0, Color::DarkRed);
        assert!(lines[1].1.contains("not initialized"));
        assert!(!runtime_exists(&root));
    }

    fn runtime_exists(root: &str) -> bool {
        fs::metadata(runtime_file(root)).is_ok()
    }

    #[test]
    fn test_logger_error_display_rule_silences_diagnostics() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let console = MemoryConsole::new();
        let mut display = DisplayRules::all(true);
        display.logger_error = false;
        let mut writer = Writer::builder()
            .service_name("api")
            .log_path(&root)
            .target_os(TargetOs::Linux)
            .display_rules(display)
            .console(console.clone())
            .build();

        writer.info("too early");

        // only the message line; the not-initialized diagnostic is suppressed
        assert_eq!(console.len(), 1);
    }

    #[test]
    fn test_save_custom_log_writes_two_section_body() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);
        writer.initialize();

        let path = writer
            .save_custom_log("payment rejected", "payments", 402)
            .unwrap();

        assert!(console.is_empty());
        assert!(path.contains("/custom/"));
        assert!(path.contains("log-payments-"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\t LOG DESCRIPTION: \npayment rejected\n"));
        assert!(content.contains("\t LOG CONTENT: \n402\n"));
    }

    #[test]
    fn test_save_custom_log_not_ready_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, console) = test_writer(&root);

        let path = writer.save_custom_log("desc", "dump", "data");

        assert!(path.is_none());
        assert_eq!(console.len(), 1);
        assert_eq!(console.lines()[0].0, Color::DarkRed);
    }

    #[test]
    fn test_set_line_param_requires_registration() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let console = MemoryConsole::new();
        let mut writer = Writer::builder()
            .service_name("api")
            .log_path(&root)
            .target_os(TargetOs::Linux)
            .line_start("<@Env> [@ServiceName]->")
            .line_param("@Env", "staging")
            .console(console.clone())
            .build();
        writer.initialize();

        writer.info("one");
        writer.set_line_param("@Env", "production").unwrap();
        writer.info("two");

        let lines = console.lines();
        assert!(lines[0].1.starts_with("<staging> [api]->"));
        assert!(lines[1].1.starts_with("<production> [api]->"));

        let err = writer.set_line_param("@Region", "eu").unwrap_err();
        assert_eq!(err, LogError::ParamNotFound("@Region".to_string()));
    }

    #[test]
    fn test_builder_from_config_applies_every_field() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let console = MemoryConsole::new();

        let mut config = WriterConfig::default();
        config.service_name = "billing".to_string();
        config.log_path = root.clone();
        config.line_start = "<@Env> [@ServiceName]: ".to_string();
        config.target_os = TargetOs::Linux;
        config.save_rules.debug = false;
        config
            .line_params
            .insert("@Env".to_string(), "staging".to_string());
        config
            .header_properties
            .insert("Region".to_string(), "eu-west-1".to_string());
        config
            .custom_colors
            .insert("alert".to_string(), Color::Magenta);

        let mut writer = WriterBuilder::from_config(config)
            .console(console.clone())
            .build();
        writer.initialize();
        writer.debug("not saved");
        writer.write_custom("alert", "boom");

        assert_eq!(writer.service_name(), "billing");
        let lines = console.lines();
        assert!(lines[0].1.starts_with("<staging> [billing]: "));
        assert_eq!(lines[1].0, Color::Magenta);

        let content = fs::read_to_string(runtime_file(&root)).unwrap();
        assert!(content.contains("[Region] -> eu-west-1 "));
        assert!(!content.contains("not saved"));
    }

    #[test]
    fn test_empty_service_name_gets_module_header_title() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let mut writer = Writer::builder()
            .service_name("")
            .log_path(&root)
            .target_os(TargetOs::Linux)
            .console(MemoryConsole::new())
            .build();

        writer.initialize();

        let content = fs::read_to_string(runtime_file(&root)).unwrap();
        assert!(content.contains("|                   Module Logs                   |"));
    }

    #[test]
    fn test_added_header_property_lands_in_next_header() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_str().unwrap().to_string();
        let (mut writer, _console) = test_writer(&root);

        let day_one = march_fifth();
        let day_two = Local.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap();
        writer.initialize_at(day_one);
        writer.add_header_property("Build", "1234");
        writer.save_log_at("rolls over", day_two);

        let first = rotation::runtime_path(&root, TargetOs::Linux, day_one).full;
        let second = rotation::runtime_path(&root, TargetOs::Linux, day_two).full;
        assert!(!fs::read_to_string(&first).unwrap().contains("[Build] -> 1234 "));
        assert!(fs::read_to_string(&second).unwrap().contains("[Build] -> 1234 "));
    }
}
