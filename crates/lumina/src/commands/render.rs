//! `lumina render` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use lumina_markdown::render_to_html;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Markdown file to render, or `-` for stdin.
    input: PathBuf,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let content = if self.input.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(&self.input)?
        };

        output.content(&render_to_html(&content));
        Ok(())
    }
}
