//! Interactive Shell
//!
//! Thin command front-end over the namespace core, mimicking Linux console
//! commands (`ls`/`mkdir`/`touch`/`cd`/`pwd`/`mv`/`rm`/`find`/`write`/`cat`).
//! Each prompt line is parsed with a clap multicall grammar and executed
//! against a shared namespace; no namespace logic lives here.

use crate::concurrency::SharedNamespace;
use crate::config::{ConfigLoader, ShellConfig};
use crate::error::FsError;
use crate::logging::{init_logging, LoggingConfig};
use crate::types::{CollisionPolicy, EntryKind, MoveOutcome};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use dialoguer::Input;
use owo_colors::OwoColorize;
use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;

/// Memfs shell - in-memory hierarchical namespace
#[derive(Parser)]
#[command(name = "memfs")]
#[command(about = "In-memory hierarchical namespace with Unix-like commands")]
pub struct Cli {
    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run commands from a script file, then exit
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// One prompt line.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    /// List the current directory
    Ls {
        /// Tabular listing with kinds and full paths
        #[arg(short = 'l')]
        long: bool,
        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a directory in the current directory
    Mkdir { name: String },
    /// Create an empty leaf file in the current directory
    Touch { name: String },
    /// Change the current directory
    Cd {
        path: String,
        /// Create missing directories along the way
        #[arg(long)]
        force: bool,
    },
    /// Print the current directory's full path
    Pwd,
    /// Move or rename a leaf file
    Mv {
        source: String,
        dest: String,
        /// Create missing destination directories
        #[arg(long)]
        force: bool,
        /// What to do when the destination name is taken
        #[arg(long, value_enum, default_value_t = PolicyArg::Replace)]
        policy: PolicyArg,
    },
    /// Delete a file, or a directory with everything below it
    Rm { path: String },
    /// Find entries under the current directory matching a name exactly
    Find {
        name: String,
        /// Search the whole subtree
        #[arg(short = 'r')]
        recursive: bool,
    },
    /// Append content to a leaf file
    Write { path: String, content: Vec<String> },
    /// Print a leaf's content, or list a directory's entries
    Cat { path: String },
    /// Leave the shell
    Exit,
}

/// Collision policy flag for `mv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Replace,
    Abort,
    Keep,
}

impl From<PolicyArg> for CollisionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Replace => CollisionPolicy::Replace,
            PolicyArg::Abort => CollisionPolicy::Abort,
            PolicyArg::Keep => CollisionPolicy::KeepPrevious,
        }
    }
}

/// What executing one command produced.
#[derive(Debug, PartialEq)]
pub struct CommandOutput {
    pub text: Option<String>,
    pub exit: bool,
}

impl CommandOutput {
    fn text(text: impl Into<String>) -> Self {
        CommandOutput {
            text: Some(text.into()),
            exit: false,
        }
    }

    fn quiet() -> Self {
        CommandOutput {
            text: None,
            exit: false,
        }
    }

    fn exit() -> Self {
        CommandOutput {
            text: None,
            exit: true,
        }
    }
}

/// The interactive shell session.
pub struct Shell {
    namespace: SharedNamespace,
    config: ShellConfig,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Shell {
            namespace: SharedNamespace::new(),
            config,
        }
    }

    /// Prompt loop on the controlling terminal; EOF ends the session.
    pub fn run_interactive(&mut self) -> anyhow::Result<()> {
        loop {
            let prompt = self.prompt();
            let line: String = match Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
            {
                Ok(line) => line,
                Err(_) => break,
            };
            if self.run_line(&line) {
                break;
            }
        }
        Ok(())
    }

    /// Execute commands line by line from a script or piped stdin.
    pub fn run_reader(&mut self, reader: impl BufRead) -> anyhow::Result<()> {
        for line in reader.lines() {
            let line = line.context("failed to read command line")?;
            if self.run_line(&line) {
                break;
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        let cwd = self
            .namespace
            .with(|ns| ns.full_path(ns.cwd()))
            .unwrap_or_else(|_| "?".to_string());
        format!("{} {}", self.config.prompt, cwd)
    }

    /// Parse and execute one line. Returns true when the shell should exit.
    pub fn run_line(&mut self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return false;
        }
        match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => match self.execute(parsed.command) {
                Ok(output) => {
                    if let Some(text) = output.text {
                        println!("{}", text);
                    }
                    output.exit
                }
                Err(err) => {
                    self.report_error(&err);
                    false
                }
            },
            Err(err) => {
                // clap renders usage and the built-in help command
                print!("{}", err);
                false
            }
        }
    }

    fn report_error(&self, err: &FsError) {
        if self.config.color {
            eprintln!("{}", err.red());
        } else {
            eprintln!("{}", err);
        }
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<CommandOutput, FsError> {
        match command {
            ShellCommand::Ls { long, json } => self.list(long, json),
            ShellCommand::Mkdir { name } => {
                self.namespace
                    .with(|ns| ns.create_entry(&name, EntryKind::Directory))?;
                Ok(CommandOutput::quiet())
            }
            ShellCommand::Touch { name } => {
                self.namespace
                    .with(|ns| ns.create_entry(&name, EntryKind::Leaf))?;
                Ok(CommandOutput::quiet())
            }
            ShellCommand::Cd { path, force } => {
                self.namespace.with(|ns| ns.change_directory(&path, force))?;
                Ok(CommandOutput::quiet())
            }
            ShellCommand::Pwd => {
                let path = self.namespace.with(|ns| ns.full_path(ns.cwd()))?;
                Ok(CommandOutput::text(path))
            }
            ShellCommand::Mv {
                source,
                dest,
                force,
                policy,
            } => {
                let outcome = self
                    .namespace
                    .with(|ns| ns.move_entry(&source, &dest, force, policy.into()))?;
                match outcome {
                    MoveOutcome::KeptExisting => Ok(CommandOutput::text(
                        "destination already exists, kept the existing entry",
                    )),
                    MoveOutcome::Moved | MoveOutcome::Replaced => Ok(CommandOutput::quiet()),
                }
            }
            ShellCommand::Rm { path } => {
                self.namespace.with(|ns| ns.delete(&path))?;
                Ok(CommandOutput::quiet())
            }
            ShellCommand::Find { name, recursive } => {
                let matches = self
                    .namespace
                    .with(|ns| ns.find_exact(&name, recursive))?;
                if matches.is_empty() {
                    Ok(CommandOutput::quiet())
                } else {
                    Ok(CommandOutput::text(matches.join("\n")))
                }
            }
            ShellCommand::Write { path, content } => {
                let text = content.join(" ");
                self.namespace.with(|ns| ns.write_content(&path, &text))?;
                Ok(CommandOutput::quiet())
            }
            ShellCommand::Cat { path } => {
                let read = self.namespace.with(|ns| ns.read_content(&path));
                match read {
                    Ok(content) => Ok(CommandOutput::text(content)),
                    // a directory lists its entries instead
                    Err(FsError::NotALeaf(_)) => {
                        let paths = self.namespace.with(|ns| ns.list_paths(&path))?;
                        Ok(CommandOutput::text(paths.join("\n")))
                    }
                    Err(err) => Err(err),
                }
            }
            ShellCommand::Exit => Ok(CommandOutput::exit()),
        }
    }

    fn list(&mut self, long: bool, json: bool) -> Result<CommandOutput, FsError> {
        let entries = self.namespace.with(|ns| ns.list_children())?;
        if json {
            let rows: Vec<serde_json::Value> = entries
                .iter()
                .map(|(name, kind)| serde_json::json!({ "name": name, "kind": kind }))
                .collect();
            return Ok(CommandOutput::text(
                serde_json::Value::Array(rows).to_string(),
            ));
        }
        if long || self.config.full_paths {
            let paths = self.namespace.with(|ns| ns.list_paths("."))?;
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Name", "Kind", "Path"]);
            for ((name, kind), path) in entries.into_iter().zip(paths) {
                let kind = match kind {
                    EntryKind::Directory => "dir",
                    EntryKind::Leaf => "leaf",
                };
                table.add_row(vec![name, kind.to_string(), path]);
            }
            return Ok(CommandOutput::text(table.to_string()));
        }
        let names: Vec<String> = entries.into_iter().map(|(name, _)| name).collect();
        Ok(CommandOutput::text(names.join("\n")))
    }
}

/// Entry point used by the binary: load config, initialize logging, and run
/// the shell against the terminal, a script file, or piped stdin.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?;
    apply_log_overrides(&mut config.logging, &cli);
    init_logging(Some(&config.logging))?;

    let mut shell = Shell::new(config.shell);
    if let Some(script) = &cli.script {
        let file = std::fs::File::open(script)
            .with_context(|| format!("failed to open script {:?}", script))?;
        shell.run_reader(std::io::BufReader::new(file))
    } else if std::io::stdin().is_terminal() {
        shell.run_interactive()
    } else {
        shell.run_reader(std::io::stdin().lock())
    }
}

fn apply_log_overrides(logging: &mut LoggingConfig, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        logging.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        logging.file = Some(file.clone());
    }
}
