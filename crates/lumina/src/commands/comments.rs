//! `lumina comments` command implementation.

use clap::Subcommand;
use lumina_store::Comment;

use crate::context::Context;
use crate::error::CliError;
use crate::output::Output;

/// Comment commands.
#[derive(Subcommand, Debug)]
pub(crate) enum CommentsCommand {
    /// List comments on a post, newest first.
    List {
        /// Post ID.
        post_id: String,
    },
    /// Comment on a post as the logged-in user.
    Add {
        /// Post ID.
        post_id: String,
        /// Comment text.
        text: String,
    },
}

impl CommentsCommand {
    /// Execute the comments command.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        let blog = ctx.blog();
        match self {
            Self::List { post_id } => {
                let comments = blog.list_comments(&post_id)?;
                if comments.is_empty() {
                    output.info("No comments yet");
                }
                for comment in &comments {
                    print_comment(output, comment);
                }
            }
            Self::Add { post_id, text } => {
                let Some(user) = ctx.session()?.user else {
                    return Err(CliError::Unauthorized(
                        "log in with `lumina session login` to comment".to_owned(),
                    ));
                };
                if text.trim().is_empty() {
                    return Err(CliError::Validation("comment cannot be empty".to_owned()));
                }
                if blog.get_post(&post_id)?.is_none() {
                    return Err(CliError::NotFound(format!("post not found: {post_id}")));
                }

                let comment = Comment::new(post_id, user, text);
                blog.add_comment(&comment)?;
                output.success(&format!("Comment {} added", comment.id));
            }
        }
        Ok(())
    }
}

/// Print one comment as a header line and an indented body.
pub(crate) fn print_comment(output: &Output, comment: &Comment) {
    output.highlight(&format!(
        "{} (@{}) · {}",
        comment.user.name, comment.user.username, comment.date
    ));
    for line in comment.content.lines() {
        output.info(&format!("  {line}"));
    }
}
