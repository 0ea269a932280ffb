//! `lumina generate` command implementation.

use clap::Args;
use lumina_ai::{GenerationMode, generate_or_message};

use crate::context::Context;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Topic to write about (or text to summarize with `--mode summary`).
    topic: String,

    /// What to generate: outline, full or summary.
    #[arg(short, long, default_value = "full")]
    mode: GenerationMode,
}

impl GenerateArgs {
    /// Execute the generate command.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(CliError::Validation("topic cannot be empty".to_owned()));
        }

        output.info(&format!(
            "Generating {} with {}...",
            self.mode, ctx.config.ai.model
        ));
        let client = ctx.ai_client();
        output.content(&generate_or_message(&client, topic, self.mode));
        Ok(())
    }
}
