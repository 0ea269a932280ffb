//! `lumina posts` command implementation.

use clap::{Args, Subcommand};
use lumina_markdown::{extract_headings, render, render_html};
use lumina_store::{Category, Post, PostQuery};

use super::comments::print_comment;
use crate::context::Context;
use crate::error::CliError;
use crate::output::Output;
use crate::terminal::render_terminal;

/// Number of related posts shown under a post.
const RELATED_LIMIT: usize = 3;

/// Post browsing and management commands.
#[derive(Subcommand, Debug)]
pub(crate) enum PostsCommand {
    /// List posts, newest first.
    List(ListArgs),
    /// Show a post with its outline, comments and related posts.
    Show(ShowArgs),
    /// Print the table of contents of a post.
    Toc {
        /// Post ID.
        id: String,

        /// Print the outline as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Delete a post (admin only).
    Delete {
        /// Post ID.
        id: String,
    },
}

/// Arguments for `posts list`.
#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Case-insensitive search over title, category and tags.
    #[arg(short, long, default_value = "")]
    search: String,

    /// Only show posts in this category.
    #[arg(long)]
    category: Option<Category>,
}

/// Arguments for `posts show`.
#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Post ID.
    id: String,

    /// Print the content as HTML instead of terminal text.
    #[arg(long)]
    html: bool,
}

impl PostsCommand {
    /// Execute the posts command.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        match self {
            Self::List(args) => list(ctx, output, args),
            Self::Show(args) => show(ctx, output, &args),
            Self::Toc { id, json } => toc(ctx, output, &id, json),
            Self::Delete { id } => delete(ctx, output, &id),
        }
    }
}

fn list(ctx: &Context, output: &Output, args: ListArgs) -> Result<(), CliError> {
    let query = PostQuery {
        search: args.search,
        category: args.category,
    };
    let posts = ctx.blog().find_posts(&query)?;
    if posts.is_empty() {
        output.info("No posts found");
    }
    for post in &posts {
        output.content(&summary_line(post));
    }
    Ok(())
}

fn show(ctx: &Context, output: &Output, args: &ShowArgs) -> Result<(), CliError> {
    let blog = ctx.blog();
    let post = find(ctx, &args.id)?;

    output.highlight(&post.title);
    output.muted(&format!(
        "{} · {} · {}",
        post.category, post.date, post.read_time
    ));
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|t| format!("#{t}")).collect();
        output.muted(&tags.join(" "));
    }
    if !post.excerpt.is_empty() {
        output.info(&post.excerpt);
    }

    let headings = extract_headings(&post.content);
    if !headings.is_empty() {
        output.separator();
        output.info("Contents");
        for heading in &headings {
            output.info(&toc_line(heading.level, &heading.text));
        }
    }

    output.separator();
    let blocks = render(&post.content);
    if args.html {
        output.content(&render_html(&blocks));
    } else {
        output.content(&render_terminal(&blocks));
    }

    let comments = blog.list_comments(&post.id)?;
    output.separator();
    output.info(&format!("Comments ({})", comments.len()));
    for comment in &comments {
        print_comment(output, comment);
    }

    let related = blog.related_posts(&post, RELATED_LIMIT)?;
    if !related.is_empty() {
        output.separator();
        output.info("Related posts");
        for post in &related {
            output.info(&summary_line(post));
        }
    }
    Ok(())
}

fn toc(ctx: &Context, output: &Output, id: &str, json: bool) -> Result<(), CliError> {
    let post = find(ctx, id)?;
    let headings = extract_headings(&post.content);
    if json {
        output.content(&serde_json::to_string_pretty(&headings)?);
        return Ok(());
    }
    for heading in headings {
        output.content(&format!(
            "{} (#{})",
            toc_line(heading.level, &heading.text),
            heading.id
        ));
    }
    Ok(())
}

fn delete(ctx: &Context, output: &Output, id: &str) -> Result<(), CliError> {
    ctx.require_admin()?;
    let blog = ctx.blog();
    if blog.get_post(id)?.is_none() {
        return Err(CliError::NotFound(format!("post not found: {id}")));
    }
    blog.delete_post(id)?;
    output.success(&format!("Deleted post {id}"));
    Ok(())
}

fn find(ctx: &Context, id: &str) -> Result<Post, CliError> {
    ctx.blog()
        .get_post(id)?
        .ok_or_else(|| CliError::NotFound(format!("post not found: {id}")))
}

fn summary_line(post: &Post) -> String {
    format!(
        "{:<38} {:<12} {} ({})",
        post.id,
        format!("[{}]", post.category),
        post.title,
        post.date
    )
}

fn toc_line(level: u8, text: &str) -> String {
    format!("{}- {text}", "  ".repeat(usize::from(level.saturating_sub(1))))
}
