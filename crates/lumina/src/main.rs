//! Lumina CLI - personal blog engine.
//!
//! Provides commands for:
//! - `posts`: list, show, outline and delete posts
//! - `render`: render a Markdown file to HTML
//! - `edit`: edit a post with autosave and publish it
//! - `generate`: draft content with the AI writing assistant
//! - `comments`: read and write comments
//! - `session`: simulated reader and admin login

mod commands;
mod context;
mod error;
mod output;
mod terminal;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CommentsCommand, EditArgs, GenerateArgs, PostsCommand, RenderArgs, SessionCommand,
};
use context::{Context, GlobalArgs};
use error::CliError;
use output::Output;

/// Lumina - personal blog engine.
#[derive(Parser, Debug)]
#[command(name = "lumina", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse and manage posts.
    #[command(subcommand)]
    Posts(PostsCommand),
    /// Render a Markdown file to HTML on stdout.
    Render(RenderArgs),
    /// Edit a post from a file, autosaving until published.
    Edit(EditArgs),
    /// Generate content with the AI writing assistant.
    Generate(GenerateArgs),
    /// Read and write comments.
    #[command(subcommand)]
    Comments(CommentsCommand),
    /// Simulated login.
    #[command(subcommand)]
    Session(SessionCommand),
}

impl Cli {
    /// Run the command. `render` needs no configuration, so it runs before
    /// the config file is loaded.
    fn run(self, output: &Output) -> Result<(), CliError> {
        match self.command {
            Commands::Render(args) => args.execute(output),
            command => {
                let ctx = Context::load(&self.global)?;
                command.execute(&ctx, output)
            }
        }
    }
}

impl Commands {
    fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        match self {
            Self::Posts(cmd) => cmd.execute(ctx, output),
            Self::Render(args) => args.execute(output),
            Self::Edit(args) => args.execute(ctx, output),
            Self::Generate(args) => args.execute(ctx, output),
            Self::Comments(cmd) => cmd.execute(ctx, output),
            Self::Session(cmd) => cmd.execute(ctx, output),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.run(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lumina",
            "posts",
            "list",
            "--data-dir",
            "/tmp/blog",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.global.data_dir, Some(PathBuf::from("/tmp/blog")));
        assert!(cli.global.verbose);
        assert!(matches!(cli.command, Commands::Posts(PostsCommand::List(_))));
    }

    #[test]
    fn test_generate_mode_parsing() {
        let cli = Cli::try_parse_from(["lumina", "generate", "Rust", "--mode", "outline"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate command");
        };
        assert!(format!("{args:?}").contains("mode: Outline"));
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["lumina", "posts", "list", "--category", "Food"]).is_err());
    }

    #[test]
    fn test_render_ignores_broken_config() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("lumina.toml");
        std::fs::write(&config, "[storage\ndata_dir = ").unwrap();
        let input = tmp.path().join("post.md");
        std::fs::write(&input, "# Title\nBody").unwrap();

        let render = Cli::try_parse_from([
            OsStr::new("lumina"),
            OsStr::new("render"),
            input.as_os_str(),
            OsStr::new("--config"),
            config.as_os_str(),
        ])
        .unwrap();
        render.run(&Output::new()).unwrap();

        let list = Cli::try_parse_from([
            OsStr::new("lumina"),
            OsStr::new("posts"),
            OsStr::new("list"),
            OsStr::new("--config"),
            config.as_os_str(),
        ])
        .unwrap();
        assert!(list.run(&Output::new()).is_err());
    }
}
